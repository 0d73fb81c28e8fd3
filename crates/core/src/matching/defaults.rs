//! Hand-authored products used when the catalog has nothing for a category.

use crate::domain::category::GENERAL_CATEGORY;
use crate::domain::product::Product;

#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    price: f64,
    annual_savings: f64,
    features: &'static [&'static str],
}

impl ProductSeed {
    fn to_product(self) -> Product {
        Product::new(self.id, self.name, self.category, self.price, self.annual_savings)
            .with_features(self.features.iter().copied())
            .normalized()
    }
}

const HEATING_COOLING_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "default-smart-thermostat",
        name: "Smart Programmable Thermostat",
        category: "Heating & Cooling",
        price: 249.0,
        annual_savings: 180.0,
        features: &["Learning schedule", "Remote control", "Energy reports"],
    },
    ProductSeed {
        id: "default-heat-pump",
        name: "Cold-Climate Air Source Heat Pump",
        category: "Heating & Cooling",
        price: 5_500.0,
        annual_savings: 950.0,
        features: &["Heating and cooling", "Variable-speed compressor"],
    },
    ProductSeed {
        id: "default-mini-split",
        name: "Ductless Mini-Split System",
        category: "Heating & Cooling",
        price: 3_200.0,
        annual_savings: 520.0,
        features: &["Zoned comfort", "No ductwork required"],
    },
];

const BUILDING_PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "default-attic-insulation",
        name: "Blown-In Attic Insulation (R-49)",
        category: "Building Products",
        price: 1_800.0,
        annual_savings: 420.0,
        features: &["Reduces heat loss", "Professional installation"],
    },
    ProductSeed {
        id: "default-weatherstrip-kit",
        name: "Door and Window Weatherstripping Kit",
        category: "Building Products",
        price: 45.0,
        annual_savings: 60.0,
        features: &["DIY friendly", "Stops drafts"],
    },
    ProductSeed {
        id: "default-low-e-window",
        name: "Double-Pane Low-E Window",
        category: "Building Products",
        price: 650.0,
        annual_savings: 75.0,
        features: &["Low-emissivity coating", "Argon gas fill"],
    },
];

const LIGHTING_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "default-led-pack",
        name: "LED Bulb 10-Pack",
        category: "Lighting & Fans",
        price: 35.0,
        annual_savings: 75.0,
        features: &["800 lumens", "25,000 hour lifespan"],
    },
    ProductSeed {
        id: "default-ceiling-fan",
        name: "Efficient DC Ceiling Fan",
        category: "Lighting & Fans",
        price: 220.0,
        annual_savings: 40.0,
        features: &["DC motor", "Integrated LED light"],
    },
];

const WATER_HEATER_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "default-hpwh",
        name: "Heat Pump Water Heater (50 gal)",
        category: "Water Heaters",
        price: 1_900.0,
        annual_savings: 450.0,
        features: &["Hybrid mode", "Up to 4x efficiency"],
    },
    ProductSeed {
        id: "default-tankless",
        name: "Tankless Gas Water Heater",
        category: "Water Heaters",
        price: 1_200.0,
        annual_savings: 110.0,
        features: &["On-demand hot water", "Compact"],
    },
];

const APPLIANCE_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "default-refrigerator",
        name: "ENERGY STAR Refrigerator",
        category: "Appliances",
        price: 1_300.0,
        annual_savings: 90.0,
        features: &["Inverter compressor", "LED lighting"],
    },
    ProductSeed {
        id: "default-heat-pump-dryer",
        name: "Heat Pump Clothes Dryer",
        category: "Appliances",
        price: 1_100.0,
        annual_savings: 85.0,
        features: &["Ventless", "Low temperature drying"],
    },
    ProductSeed {
        id: "default-dishwasher",
        name: "High-Efficiency Dishwasher",
        category: "Appliances",
        price: 700.0,
        annual_savings: 35.0,
        features: &["Soil sensor", "Quiet operation"],
    },
];

const ELECTRONICS_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "default-solar-kit",
        name: "Rooftop Solar Panel Kit (4 kW)",
        category: "Electronics",
        price: 9_800.0,
        annual_savings: 1_100.0,
        features: &["Monitoring app", "25-year warranty"],
    },
    ProductSeed {
        id: "default-advanced-power-strip",
        name: "Advanced Power Strip",
        category: "Electronics",
        price: 40.0,
        annual_savings: 50.0,
        features: &["Cuts standby load", "Master outlet sensing"],
    },
];

const SMART_HOME_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "default-energy-monitor",
        name: "Whole-Home Energy Monitor",
        category: "Smart Home",
        price: 300.0,
        annual_savings: 120.0,
        features: &["Real-time usage", "Appliance detection"],
    },
    ProductSeed {
        id: "default-smart-plug",
        name: "Smart Plug 4-Pack",
        category: "Smart Home",
        price: 50.0,
        annual_savings: 30.0,
        features: &["Scheduling", "Usage tracking"],
    },
];

const GENERAL_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "default-led-pack",
        name: "LED Bulb 10-Pack",
        category: GENERAL_CATEGORY,
        price: 35.0,
        annual_savings: 75.0,
        features: &["800 lumens", "25,000 hour lifespan"],
    },
    ProductSeed {
        id: "default-smart-thermostat",
        name: "Smart Programmable Thermostat",
        category: GENERAL_CATEGORY,
        price: 249.0,
        annual_savings: 180.0,
        features: &["Learning schedule", "Remote control"],
    },
    ProductSeed {
        id: "default-weatherstrip-kit",
        name: "Door and Window Weatherstripping Kit",
        category: GENERAL_CATEGORY,
        price: 45.0,
        annual_savings: 60.0,
        features: &["DIY friendly", "Stops drafts"],
    },
];

/// Default products for a main category. Unknown categories get the general list.
pub fn default_products(main_category: &str) -> Vec<Product> {
    let seeds = match main_category {
        "Heating & Cooling" => HEATING_COOLING_SEEDS,
        "Building Products" => BUILDING_PRODUCT_SEEDS,
        "Lighting & Fans" => LIGHTING_SEEDS,
        "Water Heaters" => WATER_HEATER_SEEDS,
        "Appliances" => APPLIANCE_SEEDS,
        "Electronics" => ELECTRONICS_SEEDS,
        "Smart Home" => SMART_HOME_SEEDS,
        _ => GENERAL_SEEDS,
    };

    seeds.iter().map(|seed| seed.to_product()).collect()
}

/// Every categorized default product, used as the built-in catalog when no
/// products API is configured.
pub fn builtin_catalog() -> Vec<Product> {
    [
        HEATING_COOLING_SEEDS,
        BUILDING_PRODUCT_SEEDS,
        LIGHTING_SEEDS,
        WATER_HEATER_SEEDS,
        APPLIANCE_SEEDS,
        ELECTRONICS_SEEDS,
        SMART_HOME_SEEDS,
    ]
    .into_iter()
    .flatten()
    .map(|seed| seed.to_product())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{builtin_catalog, default_products};
    use crate::matching::CategoryMapper;

    #[test]
    fn every_main_category_has_defaults() {
        for category in CategoryMapper::main_categories() {
            let products = default_products(category);
            assert!(!products.is_empty(), "no defaults for `{category}`");
            assert!(products.iter().all(|product| product.category == category));
        }
    }

    #[test]
    fn defaults_carry_derived_financials() {
        for product in default_products("Water Heaters") {
            assert!(product.roi.is_some_and(|roi| roi > 0.0));
            assert!(product.payback_period.is_some_and(|years| years > 0.0));
        }
    }

    #[test]
    fn unknown_category_gets_general_defaults() {
        let products = default_products("Pool Equipment");
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|product| product.category == "General"));
    }

    #[test]
    fn builtin_catalog_skips_general_products() {
        let catalog = builtin_catalog();
        assert!(catalog.len() >= CategoryMapper::main_categories().len());
        assert!(catalog.iter().all(|product| product.category != "General"));
    }
}
