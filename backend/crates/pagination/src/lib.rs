//! Limit/offset page requests for listing endpoints.
//!
//! Listings across tenders, bids and reviews share one pagination contract:
//! `limit` defaults to [`DEFAULT_LIMIT`] and must be at least one, `offset`
//! defaults to [`DEFAULT_OFFSET`] and must be non-negative. Adapters parse raw
//! query values with [`PageRequest::parse`] and persistence layers read the
//! bounds back through [`PageRequest::limit_i64`] and
//! [`PageRequest::offset_i64`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size applied when the caller omits `limit`.
pub const DEFAULT_LIMIT: u32 = 5;
/// Offset applied when the caller omits `offset`.
pub const DEFAULT_OFFSET: u32 = 0;

/// Errors raised while validating page bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// `limit` was zero, negative, or not an integer.
    #[error("limit must be a positive integer, got `{value}`")]
    InvalidLimit {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// `offset` was negative or not an integer.
    #[error("offset must be a non-negative integer, got `{value}`")]
    InvalidOffset {
        /// Raw value supplied by the caller.
        value: String,
    },
}

/// Validated limit/offset window.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let page = PageRequest::parse(Some("10"), None).expect("valid page");
/// assert_eq!(page.limit(), 10);
/// assert_eq!(page.offset(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    offset: u32,
}

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.limit, raw.offset)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl PageRequest {
    /// Build a page from numeric bounds.
    ///
    /// # Errors
    /// Returns [`PageRequestError::InvalidLimit`] when `limit` is zero.
    pub fn new(limit: u32, offset: u32) -> Result<Self, PageRequestError> {
        if limit == 0 {
            return Err(PageRequestError::InvalidLimit {
                value: limit.to_string(),
            });
        }
        Ok(Self { limit, offset })
    }

    /// Parse optional raw query values, applying defaults for absent ones.
    ///
    /// # Errors
    /// Returns a [`PageRequestError`] naming the first malformed bound.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, PageRequestError> {
        let parsed_limit = match limit {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| PageRequestError::InvalidLimit {
                    value: raw.to_owned(),
                })?,
            None => DEFAULT_LIMIT,
        };
        let parsed_offset = match offset {
            Some(raw) => {
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| PageRequestError::InvalidOffset {
                        value: raw.to_owned(),
                    })?
            }
            None => DEFAULT_OFFSET,
        };
        Self::new(parsed_limit, parsed_offset)
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Number of items skipped before the page starts.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// `limit` widened for SQL `LIMIT` clauses.
    #[must_use]
    pub fn limit_i64(self) -> i64 {
        i64::from(self.limit)
    }

    /// `offset` widened for SQL `OFFSET` clauses.
    #[must_use]
    pub fn offset_i64(self) -> i64 {
        i64::from(self.offset)
    }

    /// Apply the window to an already ordered sequence.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::new(2, 1).expect("valid page");
    /// let window: Vec<_> = page.apply(vec!["a", "b", "c", "d"]).collect();
    /// assert_eq!(window, vec!["b", "c"]);
    /// ```
    pub fn apply<I>(self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take)
    }
}
