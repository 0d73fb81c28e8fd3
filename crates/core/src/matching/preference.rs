//! Preference to category matching.

use tracing::debug;

use super::{normalize_label, tokens_overlap, MIN_FRAGMENT_LEN};

/// Preference identifiers offered by the onboarding quiz, with the category
/// labels each one should be treated as equivalent to.
const PREFERENCE_SYNONYMS: &[(&str, &[&str])] = &[
    ("renewable", &["electronics", "solar panels", "solar", "renewable energy"]),
    ("solar", &["electronics", "solar panels", "renewable energy"]),
    (
        "smart_home",
        &["smart home", "smart devices", "smart thermostats", "smart plugs", "energy monitors"],
    ),
    (
        "hvac",
        &[
            "heating & cooling",
            "heat pumps",
            "air conditioners",
            "furnaces & boilers",
            "hvac systems",
            "smart thermostats",
        ],
    ),
    ("heating", &["heating & cooling", "furnaces & boilers", "heat pumps"]),
    ("cooling", &["heating & cooling", "air conditioners", "ceiling fans"]),
    ("insulation", &["building products", "insulation", "air sealing"]),
    ("weatherization", &["building products", "air sealing", "windows & doors", "insulation"]),
    ("windows", &["building products", "windows & doors"]),
    ("lighting", &["lighting & fans", "light bulbs", "ceiling fans"]),
    ("water_heating", &["water heaters", "heat pump water heaters"]),
    ("appliances", &["appliances", "refrigerators", "dishwashers", "clothes washers & dryers"]),
    (
        "energy_efficiency",
        &["appliances", "lighting & fans", "building products", "heating & cooling"],
    ),
    ("electronics", &["electronics", "home electronics"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchStep {
    Exact,
    Substring,
    Synonym,
    Normalized,
    TokenOverlap,
}

impl MatchStep {
    fn as_str(self) -> &'static str {
        match self {
            MatchStep::Exact => "exact",
            MatchStep::Substring => "substring",
            MatchStep::Synonym => "synonym",
            MatchStep::Normalized => "normalized",
            MatchStep::TokenOverlap => "token_overlap",
        }
    }
}

/// Decides whether a user-selected preference matches a product/recommendation
/// category. Pure; the only side effect is a debug event naming the step that hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceMatcher;

impl PreferenceMatcher {
    pub fn matches(preference: &str, category: &str) -> bool {
        match Self::matching_step(preference, category) {
            Some(step) => {
                debug!(preference, category, step = step.as_str(), "preference matched category");
                true
            }
            None => false,
        }
    }

    /// Category labels the synonym table associates with a preference, if any.
    pub fn synonyms_for(preference: &str) -> Option<&'static [&'static str]> {
        let preference = preference.trim().to_lowercase();
        synonym_entry(&preference).map(|(_, synonyms)| synonyms)
    }

    fn matching_step(preference: &str, category: &str) -> Option<MatchStep> {
        let preference = preference.trim().to_lowercase();
        let category = category.trim().to_lowercase();
        if preference.is_empty() || category.is_empty() {
            return None;
        }

        if let Some(step) = direct_step(&preference, &category) {
            return Some(step);
        }

        let normalized_preference = normalize_label(&preference);
        let normalized_category = normalize_label(&category);
        let changed = normalized_preference != preference || normalized_category != category;
        if changed && direct_step(&normalized_preference, &normalized_category).is_some() {
            return Some(MatchStep::Normalized);
        }

        if tokens_overlap(&normalized_preference, &normalized_category) {
            return Some(MatchStep::TokenOverlap);
        }

        None
    }
}

/// Exact, substring and synonym steps over already-lowercased input.
fn direct_step(preference: &str, category: &str) -> Option<MatchStep> {
    if preference == category {
        return Some(MatchStep::Exact);
    }

    if contains_either_way(preference, category) {
        return Some(MatchStep::Substring);
    }

    let (_, synonyms) = synonym_entry(preference)?;
    synonyms
        .iter()
        .any(|synonym| *synonym == category || contains_either_way(synonym, category))
        .then_some(MatchStep::Synonym)
}

/// Looks a preference up by exact key first, then by substring key.
fn synonym_entry(preference: &str) -> Option<(&'static str, &'static [&'static str])> {
    let key_matches = |key: &str| key == preference || normalize_label(key) == preference;

    PREFERENCE_SYNONYMS
        .iter()
        .find(|(key, _)| key_matches(key))
        .or_else(|| {
            PREFERENCE_SYNONYMS.iter().find(|(key, _)| {
                let key = normalize_label(key);
                contains_either_way(&key, &normalize_label(preference))
            })
        })
        .copied()
}

fn contains_either_way(left: &str, right: &str) -> bool {
    let (shorter, longer) = if left.len() <= right.len() { (left, right) } else { (right, left) };
    shorter.chars().count() >= MIN_FRAGMENT_LEN && longer.contains(shorter)
}

#[cfg(test)]
mod tests {
    use super::{MatchStep, PreferenceMatcher};

    #[test]
    fn renewable_matches_electronics() {
        assert!(PreferenceMatcher::matches("renewable", "Electronics"));
    }

    #[test]
    fn exact_match_ignores_case_and_padding() {
        assert_eq!(
            PreferenceMatcher::matching_step(" Appliances ", "appliances"),
            Some(MatchStep::Exact)
        );
    }

    #[test]
    fn substring_match_works_in_both_directions() {
        assert_eq!(
            PreferenceMatcher::matching_step("insulation", "Attic Insulation"),
            Some(MatchStep::Substring)
        );
        assert_eq!(
            PreferenceMatcher::matching_step("heat pumps for cold climates", "Heat Pumps"),
            Some(MatchStep::Substring)
        );
    }

    #[test]
    fn synonym_table_covers_unrelated_labels() {
        assert_eq!(
            PreferenceMatcher::matching_step("hvac", "Heating & Cooling"),
            Some(MatchStep::Synonym)
        );
        assert_eq!(
            PreferenceMatcher::matching_step("weatherization", "Windows & Doors"),
            Some(MatchStep::Synonym)
        );
    }

    #[test]
    fn synonym_lookup_falls_back_to_substring_keys() {
        // "renewables" is not a key, but contains the `renewable` key.
        assert_eq!(
            PreferenceMatcher::matching_step("renewables", "Solar Panels"),
            Some(MatchStep::Synonym)
        );
    }

    #[test]
    fn separators_are_normalized_before_retrying() {
        assert_eq!(
            PreferenceMatcher::matching_step("water_heating", "water heating"),
            Some(MatchStep::Normalized)
        );
        assert_eq!(
            PreferenceMatcher::matching_step("attic-fans", "Attic Fans"),
            Some(MatchStep::Normalized)
        );
    }

    #[test]
    fn token_overlap_is_the_last_resort() {
        assert_eq!(
            PreferenceMatcher::matching_step("fans for the bedroom", "Lighting & Fans"),
            Some(MatchStep::TokenOverlap)
        );
    }

    #[test]
    fn unrelated_or_blank_inputs_do_not_match() {
        assert!(!PreferenceMatcher::matches("insulation", "Lighting & Fans"));
        assert!(!PreferenceMatcher::matches("", "Appliances"));
        assert!(!PreferenceMatcher::matches("appliances", "  "));
        assert!(!PreferenceMatcher::matches("zz", "Electronics"));
    }

    #[test]
    fn synonyms_for_exposes_table_entries() {
        let synonyms = PreferenceMatcher::synonyms_for("Water_Heating").expect("entry exists");
        assert!(synonyms.contains(&"water heaters"));
        assert!(PreferenceMatcher::synonyms_for("nuclear").is_none());
    }
}
