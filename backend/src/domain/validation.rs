//! Field rules shared by tender, bid, and feedback inputs.
//!
//! Checks accumulate every offending field before failing so a caller learns
//! about all invalid inputs in one [`Error::validation`] response.

use std::str::FromStr;

use super::Error;

/// Maximum length of a tender or bid name, in characters.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum length of a tender or bid description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;
/// Maximum length of review feedback, in characters.
pub const FEEDBACK_MAX_CHARS: usize = 1000;

/// Accumulator for invalid field names.
#[derive(Debug, Default)]
pub(crate) struct FieldViolations {
    fields: Vec<&'static str>,
}

impl FieldViolations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `field` unless `value` is non-blank and at most `max_chars` long.
    pub(crate) fn check_text(&mut self, field: &'static str, value: &str, max_chars: usize) {
        if !is_valid_text(value, max_chars) {
            self.fields.push(field);
        }
    }

    /// Parse `raw`, recording `field` when it is not a known value.
    pub(crate) fn check_parse<T: FromStr>(&mut self, field: &'static str, raw: &str) -> Option<T> {
        let parsed = raw.parse().ok();
        if parsed.is_none() {
            self.fields.push(field);
        }
        parsed
    }

    pub(crate) fn into_result(self) -> Result<(), Error> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(self.fields))
        }
    }
}

fn is_valid_text(value: &str, max_chars: usize) -> bool {
    !value.trim().is_empty() && value.chars().count() <= max_chars
}

/// Treat an absent or empty partial-update field as "keep the prior value".
pub(crate) fn provided(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.is_empty())
}
