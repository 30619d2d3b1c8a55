//! Cache key management utilities.
//!
//! Keys are opaque strings. A parameterless query uses its action name as the
//! key; a parameterized one appends the argument after a `:` separator. The
//! action prefix never contains `:`, so the mapping is injective in the
//! argument even when the argument itself contains `:`.

/// Key for the list of cases.
pub const CASES_KEY: &str = "getCases";

/// Key for the live stock listing.
pub const LIVE_STOCK_KEY: &str = "getLiveStock";

/// Prefix for per-case component listings.
pub const COMPONENTS_PREFIX: &str = "getComponents";

/// Builder for cache keys.
pub struct CacheKeyBuilder;

impl CacheKeyBuilder {
    /// Key for `list_cases`.
    pub fn cases() -> String {
        CASES_KEY.to_string()
    }

    /// Key for `get_live_stock`.
    pub fn live_stock() -> String {
        LIVE_STOCK_KEY.to_string()
    }

    /// Key for `list_components(case_name)`.
    pub fn components(case_name: &str) -> String {
        Self::build_with_prefix(COMPONENTS_PREFIX, &case_name)
    }

    /// Build cache key with custom prefix.
    pub fn build_with_prefix(prefix: &str, id: &dyn std::fmt::Display) -> String {
        format!("{}:{}", prefix, id)
    }

    /// Split a key into its prefix and argument.
    ///
    /// Only the first `:` separates, so arguments may contain `:`.
    pub fn parse(key: &str) -> (&str, Option<&str>) {
        match key.split_once(':') {
            Some((prefix, arg)) => (prefix, Some(arg)),
            None => (key, None),
        }
    }
}
