//! Multi-valued query string extraction shared by the handlers.
//!
//! `web::Query` collapses repeated keys, but the published listing accepts
//! `service_type` several times, so handlers read the raw pairs instead.
//! Every parse failure becomes [`ErrorCode::InvalidParameter`].
//!
//! [`ErrorCode::InvalidParameter`]: crate::domain::ErrorCode::InvalidParameter

use std::future::{Ready, ready};
use std::str::FromStr;

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use pagination::PageRequest;

use crate::domain::Error;

/// Raw query pairs in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode a raw query string.
    ///
    /// # Examples
    /// ```
    /// use tenders::inbound::http::query::QueryParams;
    ///
    /// let params = QueryParams::parse("service_type=Delivery&service_type=Construction");
    /// assert_eq!(params.all("service_type").count(), 2);
    /// ```
    #[must_use]
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`, if present.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Every value for `key`, in request order.
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// First non-blank value for `key`, if any.
    #[must_use]
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        self.first(key).filter(|value| !value.trim().is_empty())
    }

    /// Non-blank value for `key`.
    ///
    /// # Errors
    /// Fails with `InvalidParameter` when the key is absent or blank.
    pub fn required(&self, key: &str) -> Result<String, Error> {
        self.non_blank(key)
            .map(str::to_owned)
            .ok_or_else(|| Error::invalid_parameter(format!("parameter `{key}` is required")))
    }

    /// Required value for `key` parsed into `T`.
    ///
    /// # Errors
    /// Fails with `InvalidParameter` when absent, blank or unparsable.
    pub fn required_parsed<T: FromStr>(&self, key: &str) -> Result<T, Error> {
        let raw = self.required(key)?;
        raw.parse()
            .map_err(|_| Error::invalid_parameter(format!("parameter `{key}` is invalid: {raw}")))
    }

    /// Every value for `key` parsed into `T`.
    ///
    /// # Errors
    /// Fails with `InvalidParameter` on the first unparsable value.
    pub fn all_parsed<T: FromStr>(&self, key: &str) -> Result<Vec<T>, Error> {
        self.all(key)
            .map(|raw| {
                raw.parse().map_err(|_| {
                    Error::invalid_parameter(format!("parameter `{key}` is invalid: {raw}"))
                })
            })
            .collect()
    }

    /// `limit`/`offset` window; blank values fall back to the defaults.
    ///
    /// # Errors
    /// Fails with `InvalidParameter` for malformed bounds.
    pub fn page(&self) -> Result<PageRequest, Error> {
        PageRequest::parse(self.non_blank("limit"), self.non_blank("offset"))
            .map_err(|err| Error::invalid_parameter(err.to_string()))
    }

    /// Reject keys outside `allowed`.
    ///
    /// # Errors
    /// Fails with `InvalidParameter` naming the first unexpected key.
    pub fn reject_unknown(&self, allowed: &[&str]) -> Result<(), Error> {
        match self
            .pairs
            .iter()
            .find(|(name, _)| !allowed.contains(&name.as_str()))
        {
            Some((name, _)) => Err(Error::invalid_parameter(format!(
                "unexpected parameter `{name}`"
            ))),
            None => Ok(()),
        }
    }
}

impl FromRequest for QueryParams {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::parse(req.query_string())))
    }
}

/// Parse a path segment, failing with `InvalidParameter`.
///
/// # Errors
/// Returns `InvalidParameter` naming `name` when `raw` does not parse.
pub fn parse_path<T: FromStr>(raw: &str, name: &str) -> Result<T, Error> {
    raw.parse()
        .map_err(|_| Error::invalid_parameter(format!("path segment `{name}` is invalid: {raw}")))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode, ServiceType, TenderId};

    #[rstest]
    fn repeated_keys_are_kept_in_order() {
        let params = QueryParams::parse("service_type=Delivery&service_type=Construction");

        let types: Vec<ServiceType> = params.all_parsed("service_type").expect("known labels");
        assert_eq!(types, [ServiceType::Delivery, ServiceType::Construction]);
    }

    #[rstest]
    fn unknown_labels_are_invalid_parameters() {
        let params = QueryParams::parse("service_type=Catering");

        let error = params
            .all_parsed::<ServiceType>("service_type")
            .expect_err("unknown label");
        assert_eq!(error.code(), ErrorCode::InvalidParameter);
    }

    #[rstest]
    #[case("")]
    #[case("username=")]
    #[case("username=%20%20")]
    fn blank_usernames_are_missing(#[case] query: &str) {
        let error = QueryParams::parse(query)
            .required("username")
            .expect_err("missing username");
        assert_eq!(error.code(), ErrorCode::InvalidParameter);
    }

    #[rstest]
    fn percent_encoded_values_are_decoded() {
        let params = QueryParams::parse("bidFeedback=on%20time%2C%20thanks");
        assert_eq!(params.first("bidFeedback"), Some("on time, thanks"));
    }

    #[rstest]
    #[case("", 5, 0)]
    #[case("limit=&offset=", 5, 0)]
    #[case("limit=2&offset=4", 2, 4)]
    fn page_defaults_apply_to_absent_bounds(
        #[case] query: &str,
        #[case] limit: u32,
        #[case] offset: u32,
    ) {
        let page = QueryParams::parse(query).page().expect("valid page");
        assert_eq!((page.limit(), page.offset()), (limit, offset));
    }

    #[rstest]
    #[case("limit=0")]
    #[case("limit=-1")]
    #[case("offset=-3")]
    #[case("limit=ten")]
    fn malformed_bounds_are_invalid_parameters(#[case] query: &str) {
        let error = QueryParams::parse(query).page().expect_err("bad bounds");
        assert_eq!(error.code(), ErrorCode::InvalidParameter);
    }

    #[rstest]
    fn unexpected_keys_are_rejected() {
        let params = QueryParams::parse("username=alice&bidFeedback=ok&extra=1");

        let error = params
            .reject_unknown(&["username", "bidFeedback"])
            .expect_err("extra key");
        assert!(error.message().contains("extra"));
        assert!(params.reject_unknown(&["username", "bidFeedback", "extra"]).is_ok());
    }

    #[rstest]
    fn malformed_path_ids_are_invalid_parameters() {
        let error = parse_path::<TenderId>("not-a-uuid", "tenderId").expect_err("bad uuid");
        assert_eq!(error.code(), ErrorCode::InvalidParameter);
        assert_eq!(parse_path::<u32>("3", "version").expect("number"), 3);
    }
}
