//! Offset pagination for list operations.

use serde::{Deserialize, Serialize};

/// A request for a window of results, expressed as skip/limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of rows to skip.
    pub skip: u64,
    /// Maximum number of rows to return.
    pub limit: u64,
}

impl PageRequest {
    /// The default number of rows returned.
    pub const DEFAULT_LIMIT: u64 = 100;

    /// Creates a new page request.
    #[must_use]
    pub const fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Returns the offset for database queries.
    ///
    /// Values beyond `i64::MAX` saturate; no table is that large.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}
