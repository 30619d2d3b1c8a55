//! Cache strategies for read operations.
//!
//! | Strategy | Cache Hit | Cache Miss | Populates cache |
//! |----------|-----------|-----------|-----------------|
//! | **Refresh** | Return | Fetch | Yes |
//! | **Invalidate** | Delete, fetch | Fetch | Yes |
//! | **Bypass** | Ignored | Fetch | No |
//!
//! Listings use `Refresh`. Per-user holdings use `Bypass`: they change with
//! every borrow and return, so they are always read live.

/// Strategy enum controlling cache read behavior.
///
/// # Examples
///
/// ```
/// use inventory_kit::strategy::CacheStrategy;
///
/// assert_eq!(CacheStrategy::default(), CacheStrategy::Refresh);
/// assert_eq!(CacheStrategy::Bypass.to_string(), "Bypass");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheStrategy {
    /// **Refresh**: Serve from cache if fresh, otherwise fetch and store.
    ///
    /// Flow:
    /// 1. Check cache
    /// 2. If hit: return cached value
    /// 3. If miss or expired: fetch from backend
    /// 4. Store in cache
    /// 5. Return value
    #[default]
    Refresh,

    /// **Invalidate**: Drop the cached entry and refetch.
    ///
    /// Flow:
    /// 1. Delete from cache
    /// 2. Fetch from backend
    /// 3. Store in cache
    /// 4. Return value
    Invalidate,

    /// **Bypass**: Never read nor write the cache.
    Bypass,
}

impl CacheStrategy {
    /// Whether a fetched value is written back to the cache.
    pub fn populates(self) -> bool {
        !matches!(self, CacheStrategy::Bypass)
    }
}

impl std::fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheStrategy::Refresh => write!(f, "Refresh"),
            CacheStrategy::Invalidate => write!(f, "Invalidate"),
            CacheStrategy::Bypass => write!(f, "Bypass"),
        }
    }
}
