//! Recommendation to product matching
//!
//! Maps free-text recommendation types to product categories, decides whether a
//! user's preferences match a category, picks the best products for a
//! recommendation, and filters recommendation lists for display.
//!
//! Dependency order: `category` → `preference` → `products` → `filter`.

mod category;
mod defaults;
mod filter;
mod preference;
mod products;
mod service;

pub use category::CategoryMapper;
pub use defaults::{builtin_catalog, default_products};
pub use filter::{FilterOutcome, MatchTier, RecommendationFilter};
pub use preference::PreferenceMatcher;
pub use products::{ProductMatcher, ProductRecommendationMatch};
pub use service::{validate_budget, MatchService};

/// Maximum products attached to a single recommendation.
pub const DEFAULT_MAX_PRODUCTS: usize = 3;

/// Items returned by the last-resort tier of the recommendation filter.
pub const DEFAULT_FALLBACK_COUNT: usize = 2;

/// Shortest fragment allowed to take part in substring and token matching.
const MIN_FRAGMENT_LEN: usize = 3;

const STOP_WORDS: &[&str] = &["and", "the", "for", "with", "your"];

/// Lowercases, turns `_`/`-` into spaces and collapses whitespace.
pub(crate) fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct lowercase word tokens, dropping stop words and short fragments.
pub(crate) fn keyword_tokens(value: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in value.to_lowercase().split(|ch: char| !ch.is_alphanumeric()) {
        if token.chars().count() < MIN_FRAGMENT_LEN || STOP_WORDS.contains(&token) {
            continue;
        }
        if !tokens.iter().any(|existing| existing == token) {
            tokens.push(token.to_owned());
        }
    }
    tokens
}

pub(crate) fn tokens_overlap(left: &str, right: &str) -> bool {
    let right_tokens = keyword_tokens(right);
    keyword_tokens(left).iter().any(|token| right_tokens.contains(token))
}
