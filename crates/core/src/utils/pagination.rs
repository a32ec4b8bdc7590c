use crate::constants::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

/// Offset/limit window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// Builds a window from optional caller input.
    ///
    /// Negative offsets become zero. Missing or non-positive limits fall back
    /// to the default, and limits above the maximum are capped.
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        let skip = skip.unwrap_or(0).max(0);
        let limit = match limit {
            Some(l) if l > 0 => l.min(MAX_LIST_LIMIT),
            _ => DEFAULT_LIST_LIMIT,
        };
        Self { skip, limit }
    }

    /// The widest window, used when every row is needed.
    pub fn all() -> Self {
        Self {
            skip: 0,
            limit: MAX_LIST_LIMIT,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
