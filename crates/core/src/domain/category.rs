use serde::{Deserialize, Serialize};

pub const GENERAL_CATEGORY: &str = "General";

/// Main/sub product classification derived from a recommendation. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMapping {
    pub main_category: String,
    pub sub_category: String,
}

impl CategoryMapping {
    pub fn new(main_category: impl Into<String>, sub_category: impl Into<String>) -> Self {
        Self { main_category: main_category.into(), sub_category: sub_category.into() }
    }

    pub fn general() -> Self {
        Self::new(GENERAL_CATEGORY, GENERAL_CATEGORY)
    }

    pub fn is_general(&self) -> bool {
        self.main_category == GENERAL_CATEGORY
    }
}
