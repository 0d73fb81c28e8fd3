//! Keyword lookup from recommendation type/title to product categories.

use tracing::trace;

use super::normalize_label;
use crate::domain::category::CategoryMapping;

#[derive(Debug, Clone, Copy)]
struct CategoryRule {
    keywords: &'static [&'static str],
    main_category: &'static str,
    sub_category: &'static str,
}

// Order matters: the first rule with a matching keyword wins, so the more specific
// phrases ("water heater", "heat pump", "dishwasher") sit above the generic ones.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["water heater", "water heating", "tankless", "hot water"],
        main_category: "Water Heaters",
        sub_category: "Water Heaters",
    },
    CategoryRule {
        keywords: &["heat pump"],
        main_category: "Heating & Cooling",
        sub_category: "Heat Pumps",
    },
    CategoryRule {
        keywords: &["thermostat"],
        main_category: "Heating & Cooling",
        sub_category: "Smart Thermostats",
    },
    CategoryRule {
        keywords: &["air condition", "ac unit", "cooling"],
        main_category: "Heating & Cooling",
        sub_category: "Air Conditioners",
    },
    CategoryRule {
        keywords: &["furnace", "boiler", "heating"],
        main_category: "Heating & Cooling",
        sub_category: "Furnaces & Boilers",
    },
    CategoryRule {
        keywords: &["hvac", "duct"],
        main_category: "Heating & Cooling",
        sub_category: "HVAC Systems",
    },
    CategoryRule {
        keywords: &["insulation", "insulate", "attic"],
        main_category: "Building Products",
        sub_category: "Insulation",
    },
    CategoryRule {
        keywords: &["window", "door", "skylight"],
        main_category: "Building Products",
        sub_category: "Windows & Doors",
    },
    CategoryRule {
        keywords: &["air seal", "weatheriz", "weather strip", "draft", "caulk"],
        main_category: "Building Products",
        sub_category: "Air Sealing",
    },
    CategoryRule {
        keywords: &["solar", "renewable", "photovoltaic"],
        main_category: "Electronics",
        sub_category: "Solar Panels",
    },
    CategoryRule {
        keywords: &["lighting", "led", "light bulb", "bulb"],
        main_category: "Lighting & Fans",
        sub_category: "Light Bulbs",
    },
    CategoryRule {
        keywords: &["ceiling fan", "fan"],
        main_category: "Lighting & Fans",
        sub_category: "Ceiling Fans",
    },
    CategoryRule {
        keywords: &["refrigerator", "fridge", "freezer"],
        main_category: "Appliances",
        sub_category: "Refrigerators",
    },
    CategoryRule {
        keywords: &["dishwasher"],
        main_category: "Appliances",
        sub_category: "Dishwashers",
    },
    CategoryRule {
        keywords: &["washer", "dryer", "laundry"],
        main_category: "Appliances",
        sub_category: "Clothes Washers & Dryers",
    },
    CategoryRule {
        keywords: &["appliance"],
        main_category: "Appliances",
        sub_category: "Appliances",
    },
    CategoryRule {
        keywords: &["smart plug", "power strip", "standby", "phantom"],
        main_category: "Smart Home",
        sub_category: "Smart Plugs",
    },
    CategoryRule {
        keywords: &["energy monitor", "smart meter", "monitoring"],
        main_category: "Smart Home",
        sub_category: "Energy Monitors",
    },
    CategoryRule {
        keywords: &["smart home", "smart device", "automation"],
        main_category: "Smart Home",
        sub_category: "Smart Devices",
    },
    CategoryRule {
        keywords: &["electronic", "computer", "television", "tv"],
        main_category: "Electronics",
        sub_category: "Home Electronics",
    },
];

/// Maps a recommendation's free-text type (and optionally its title) to a
/// main/sub category pair. Unknown input maps to `General`; mapping never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryMapper;

impl CategoryMapper {
    pub fn map(kind: &str, title: Option<&str>) -> CategoryMapping {
        if let Some(mapping) = Self::scan(kind) {
            return mapping;
        }

        if let Some(mapping) = title.and_then(Self::scan) {
            return mapping;
        }

        trace!(kind, "recommendation type did not match any category keyword");
        CategoryMapping::general()
    }

    /// Every keyword in the lookup table, in scan order.
    pub fn known_keywords() -> impl Iterator<Item = &'static str> {
        CATEGORY_RULES.iter().flat_map(|rule| rule.keywords.iter().copied())
    }

    /// Distinct main categories the lookup table can produce.
    pub fn main_categories() -> Vec<&'static str> {
        let mut categories: Vec<&'static str> = Vec::new();
        for rule in CATEGORY_RULES {
            if !categories.contains(&rule.main_category) {
                categories.push(rule.main_category);
            }
        }
        categories
    }

    fn scan(text: &str) -> Option<CategoryMapping> {
        let normalized = normalize_label(text);
        if normalized.is_empty() {
            return None;
        }

        // Keywords must start at a word boundary so "led" does not fire on "installed".
        let haystack = format!(" {normalized}");
        CATEGORY_RULES
            .iter()
            .find(|rule| {
                rule.keywords.iter().any(|keyword| haystack.contains(&format!(" {keyword}")))
            })
            .map(|rule| CategoryMapping::new(rule.main_category, rule.sub_category))
    }
}
