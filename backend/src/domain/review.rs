//! Review feedback attached to bids.

use chrono::{DateTime, Utc};

use super::bid::BidId;
use super::identity::uuid_identifier;
use super::validation::{FEEDBACK_MAX_CHARS, FieldViolations};
use super::Error;

uuid_identifier!(
    /// Identifier of a review.
    ReviewId
);

/// Immutable feedback left by a tender owner about a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Review identifier.
    pub id: ReviewId,
    /// Bid the feedback concerns. Not exposed to clients.
    pub bid_id: BidId,
    /// Feedback text.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validated feedback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidFeedback(String);

impl BidFeedback {
    /// Validate feedback text.
    ///
    /// # Errors
    /// Returns [`Error::validation`] naming `bidFeedback` when the text is
    /// blank or longer than the allowed maximum.
    pub fn new(text: impl Into<String>) -> Result<Self, Error> {
        let text = text.into();
        let mut violations = FieldViolations::new();
        violations.check_text("bidFeedback", &text, FEEDBACK_MAX_CHARS);
        violations.into_result()?;
        Ok(Self(text))
    }

    /// Feedback text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
