pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod matching;

pub use catalog::{CatalogError, ProductCatalog};
pub use domain::category::CategoryMapping;
pub use domain::product::{Product, ProductId};
pub use domain::recommendation::{
    Priority, Recommendation, RecommendationId, RecommendationStatus,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use matching::{
    CategoryMapper, FilterOutcome, MatchService, MatchTier, PreferenceMatcher, ProductMatcher,
    ProductRecommendationMatch, RecommendationFilter,
};
