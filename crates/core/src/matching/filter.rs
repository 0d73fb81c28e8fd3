//! Preference-driven filtering of recommendation lists.
//!
//! Tiers are tried in order and the first one that yields anything wins:
//!
//! 1. direct type special cases for preferences whose recommendation types
//!    rarely share vocabulary with product categories
//! 2. category match through [`PreferenceMatcher`]
//! 3. keyword overlap between preference and title/type
//! 4. per-preference substring fallback table
//! 5. the first few recommendations, so the view is never empty

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{normalize_label, tokens_overlap, CategoryMapper, PreferenceMatcher};
use super::DEFAULT_FALLBACK_COUNT;
use crate::domain::recommendation::Recommendation;

const DIRECT_TYPE_CASES: &[(&str, &[&str])] = &[
    ("renewable", &["solar", "renewable", "photovoltaic"]),
    ("smart home", &["smart", "thermostat", "energy monitor"]),
    ("water heating", &["water heat", "hot water", "tankless"]),
];

const CATEGORY_FALLBACKS: &[(&str, &[&str])] = &[
    ("energy efficiency", &["efficien", "energy", "upgrade"]),
    ("hvac", &["heat", "cool", "air", "furnace", "thermostat", "duct"]),
    ("insulation", &["insulat", "attic", "seal", "draft"]),
    ("lighting", &["light", "lamp", "bulb", "led"]),
    ("appliances", &["appliance", "fridge", "refrigerator", "washer", "dryer"]),
    ("renewable", &["solar", "panel", "renewable", "wind", "battery"]),
    ("smart home", &["smart", "automat", "monitor", "plug"]),
    ("water heating", &["water", "shower", "faucet"]),
    ("windows", &["window", "door", "glaz"]),
    ("weatherization", &["weather", "seal", "caulk", "strip"]),
];

/// Which tier of the cascade produced a [`FilterOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// No preferences were given; the input is returned as-is.
    Unfiltered,
    Direct,
    Exact,
    Flexible,
    CategoryFallback,
    /// Nothing matched; the first few items are shown instead.
    FirstN,
}

impl MatchTier {
    /// True when the recommendations actually relate to the preferences.
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchTier::FirstN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome {
    pub recommendations: Vec<Recommendation>,
    pub tier: MatchTier,
}

#[derive(Debug, Clone)]
pub struct RecommendationFilter {
    fallback_count: usize,
}

impl RecommendationFilter {
    pub fn new() -> Self {
        Self { fallback_count: DEFAULT_FALLBACK_COUNT }
    }

    pub fn with_fallback_count(fallback_count: usize) -> Self {
        Self { fallback_count }
    }

    pub fn filter(
        &self,
        recommendations: &[Recommendation],
        preferences: &[String],
    ) -> FilterOutcome {
        let preferences: Vec<&str> = preferences
            .iter()
            .map(|preference| preference.trim())
            .filter(|preference| !preference.is_empty())
            .collect();

        if preferences.is_empty() || recommendations.is_empty() {
            return FilterOutcome {
                recommendations: recommendations.to_vec(),
                tier: MatchTier::Unfiltered,
            };
        }

        let tiers: [(MatchTier, fn(&Recommendation, &str) -> bool); 4] = [
            (MatchTier::Direct, direct_type_match),
            (MatchTier::Exact, exact_category_match),
            (MatchTier::Flexible, flexible_keyword_match),
            (MatchTier::CategoryFallback, category_fallback_match),
        ];

        for (tier, predicate) in tiers {
            let selected: Vec<Recommendation> = recommendations
                .iter()
                .filter(|recommendation| {
                    preferences.iter().any(|preference| predicate(recommendation, preference))
                })
                .cloned()
                .collect();

            if !selected.is_empty() {
                debug!(tier = ?tier, selected = selected.len(), "recommendation filter matched");
                return FilterOutcome { recommendations: selected, tier };
            }
        }

        debug!(
            fallback_count = self.fallback_count,
            "no recommendation matched preferences; showing first items"
        );
        FilterOutcome {
            recommendations: recommendations.iter().take(self.fallback_count).cloned().collect(),
            tier: MatchTier::FirstN,
        }
    }
}

impl Default for RecommendationFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn table_entry(
    table: &'static [(&'static str, &'static [&'static str])],
    preference: &str,
) -> Option<&'static [&'static str]> {
    let preference = normalize_label(preference);
    table.iter().find(|(key, _)| *key == preference).map(|(_, needles)| *needles)
}

fn direct_type_match(recommendation: &Recommendation, preference: &str) -> bool {
    let Some(needles) = table_entry(DIRECT_TYPE_CASES, preference) else {
        return false;
    };
    let kind = normalize_label(&recommendation.kind);
    needles.iter().any(|needle| kind.contains(needle))
}

fn exact_category_match(recommendation: &Recommendation, preference: &str) -> bool {
    let mapping = CategoryMapper::map(&recommendation.kind, Some(&recommendation.title));
    if !mapping.is_general()
        && (PreferenceMatcher::matches(preference, &mapping.main_category)
            || PreferenceMatcher::matches(preference, &mapping.sub_category))
    {
        return true;
    }

    PreferenceMatcher::matches(preference, &recommendation.kind)
}

fn flexible_keyword_match(recommendation: &Recommendation, preference: &str) -> bool {
    tokens_overlap(&normalize_label(preference), &normalize_label(&recommendation.search_text()))
}

fn category_fallback_match(recommendation: &Recommendation, preference: &str) -> bool {
    let Some(needles) = table_entry(CATEGORY_FALLBACKS, preference) else {
        return false;
    };
    let text = recommendation.search_text();
    needles.iter().any(|needle| text.contains(needle))
}
