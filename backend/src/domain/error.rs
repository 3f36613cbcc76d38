//! Domain-level error types.
//!
//! These errors are transport agnostic. Every lifecycle operation fails with a
//! [`Error`] whose [`ErrorCode`] names exactly one failure kind; inbound
//! adapters translate the kind into protocol-specific statuses.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::trace_id::TraceId;

/// Stable machine-readable error code describing the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// One or more request fields fail length, emptiness, or enum rules.
    ValidationError,
    /// A path or query parameter is missing or malformed.
    InvalidParameter,
    /// The supplied username does not resolve to an employee.
    UserNotExists,
    /// The employee exists but lacks the organization or author relationship.
    UnauthorizedAccess,
    /// The referenced tender does not exist.
    TenderNotExists,
    /// The referenced bid does not exist.
    BidNotExists,
    /// The requested historical version does not exist.
    VersionNotExists,
    /// A referenced author (employee or organization) does not exist.
    ElementNotExists,
    /// The author has no bid against the given tender.
    BidForTenderNotExists,
    /// A concurrent writer already stored the version being written.
    Conflict,
    /// Unclassified failure, typically from persistence.
    InternalError,
}

impl ErrorCode {
    const fn default_message(self) -> &'static str {
        match self {
            Self::ValidationError => "request fields are invalid",
            Self::InvalidParameter => "request parameters are invalid",
            Self::UserNotExists => "user does not exist or is not valid for this request",
            Self::UnauthorizedAccess => "insufficient permissions to perform this request",
            Self::TenderNotExists => "tender does not exist",
            Self::BidNotExists => "bid does not exist",
            Self::VersionNotExists => "version does not exist",
            Self::ElementNotExists => "user or organization does not exist",
            Self::BidForTenderNotExists => "the author has no bids for the given tender",
            Self::Conflict => "the resource was modified concurrently",
            Self::InternalError => "internal server error",
        }
    }
}

/// Validation failures raised by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// Message was empty once trimmed.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// Trace identifier was empty once trimmed.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - Constructors capture the [`TraceId`] in scope, if any.
///
/// # Examples
/// ```
/// use tenders::domain::{Error, ErrorCode};
///
/// let err = Error::validation(["name", "serviceType"]);
/// assert_eq!(err.code(), ErrorCode::ValidationError);
/// assert_eq!(err.invalid_fields(), vec!["name", "serviceType"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

impl Error {
    /// Build an error, substituting the code's default message when `message`
    /// is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Fallible constructor rejecting blank messages.
    ///
    /// # Errors
    /// Returns [`ErrorValidationError::EmptyMessage`] for blank messages.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::new(code, message))
    }

    fn of_kind(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message surfaced to callers.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured when the error was raised.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Field names carried by a validation error, in reporting order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("fields"))
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Override the trace identifier, rejecting blank values.
    ///
    /// # Errors
    /// Returns [`ErrorValidationError::EmptyTraceId`] for blank identifiers.
    pub fn try_with_trace_id(
        self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(self.with_trace_id(trace_id))
    }

    /// Validation failure listing every offending field.
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        Self::new(
            ErrorCode::ValidationError,
            format!("invalid fields: {}", fields.join(", ")),
        )
        .with_details(json!({ "fields": fields }))
    }

    /// Convenience constructor for [`ErrorCode::InvalidParameter`].
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParameter, message)
    }

    /// Convenience constructor for [`ErrorCode::UserNotExists`].
    #[must_use]
    pub fn user_not_exists() -> Self {
        Self::of_kind(ErrorCode::UserNotExists)
    }

    /// Convenience constructor for [`ErrorCode::UnauthorizedAccess`].
    #[must_use]
    pub fn unauthorized_access() -> Self {
        Self::of_kind(ErrorCode::UnauthorizedAccess)
    }

    /// Convenience constructor for [`ErrorCode::TenderNotExists`].
    #[must_use]
    pub fn tender_not_exists() -> Self {
        Self::of_kind(ErrorCode::TenderNotExists)
    }

    /// Convenience constructor for [`ErrorCode::BidNotExists`].
    #[must_use]
    pub fn bid_not_exists() -> Self {
        Self::of_kind(ErrorCode::BidNotExists)
    }

    /// Convenience constructor for [`ErrorCode::VersionNotExists`].
    #[must_use]
    pub fn version_not_exists() -> Self {
        Self::of_kind(ErrorCode::VersionNotExists)
    }

    /// Convenience constructor for [`ErrorCode::ElementNotExists`].
    #[must_use]
    pub fn element_not_exists() -> Self {
        Self::of_kind(ErrorCode::ElementNotExists)
    }

    /// Convenience constructor for [`ErrorCode::BidForTenderNotExists`].
    #[must_use]
    pub fn bid_for_tender_not_exists() -> Self {
        Self::of_kind(ErrorCode::BidForTenderNotExists)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
