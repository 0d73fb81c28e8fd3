use serde::{Deserialize, Serialize};

use super::is_missing_amount;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecommendationId(
    #[serde(deserialize_with = "super::deserialize_identifier")] pub String,
);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Dismissed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// A dashboard recommendation. Financial fields are optional on the wire and are
/// backfilled from matched products when absent or zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: RecommendationId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub estimated_savings: Option<f64>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub implementation_cost: Option<f64>,
    #[serde(default)]
    pub payback_period: Option<f64>,
    #[serde(default)]
    pub status: RecommendationStatus,
    #[serde(default)]
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: RecommendationId(id.into()),
            title: title.into(),
            kind: kind.into(),
            estimated_savings: None,
            estimated_cost: None,
            implementation_cost: None,
            payback_period: None,
            status: RecommendationStatus::default(),
            priority: Priority::default(),
        }
    }

    pub fn with_estimated_savings(mut self, savings: f64) -> Self {
        self.estimated_savings = Some(savings);
        self
    }

    pub fn with_estimated_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = Some(cost);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn needs_financials(&self) -> bool {
        is_missing_amount(self.estimated_savings)
            || is_missing_amount(self.estimated_cost)
            || is_missing_amount(self.implementation_cost)
            || is_missing_amount(self.payback_period)
    }

    /// Searchable text used by keyword tiers of the recommendation filter.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.kind).to_lowercase()
    }
}
