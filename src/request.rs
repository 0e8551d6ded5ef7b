//! Namespace-qualified request payloads for the two Creditsafe operations.
//!
//! Keys are sent to the wire exactly as written here. The service rejects
//! payloads whose elements are not qualified with the expected prefixes, so
//! the prefixes are part of the contract rather than decoration.

use std::fmt::Display;

/// Report type requested from `RetrieveCompanyOnlineReport`.
pub const REPORT_TYPE: &str = "Full";

/// Language used for reports when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// A single value in a request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestValue {
    /// Element text.
    Text(String),
    /// An explicitly nil element (`xsi:nil="true"`).
    Nil,
    /// A nested group of elements.
    Nested(RequestParams),
}

impl From<&str> for RequestValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RequestValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Option<&str>> for RequestValue {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Self::Nil, Self::from)
    }
}

impl From<RequestParams> for RequestValue {
    fn from(p: RequestParams) -> Self {
        Self::Nested(p)
    }
}

/// An ordered mapping from qualified element name to value.
///
/// Insertion order is the order elements appear in the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, RequestValue)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key`, replacing the value in place if the key is already present.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RequestValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RequestValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&RequestValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The text stored under `key`, if it is a text value.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            RequestValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The nested group stored under `key`, if any.
    pub fn nested(&self, key: &str) -> Option<&RequestParams> {
        match self.get(key)? {
            RequestValue::Nested(p) => Some(p),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RequestValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the `FindCompanies` payload.
///
/// Neither argument is validated; which combinations the service accepts is
/// the caller's decision. A `None` is sent as a nil element.
pub fn find_company_request(
    country_code: Option<&str>,
    registration_number: Option<&str>,
) -> RequestParams {
    RequestParams::new()
        .with(
            "oper:countries",
            RequestParams::new().with("oper:CountryCode", country_code),
        )
        .with(
            "oper:searchCriteria",
            RequestParams::new().with("dat:RegistrationNumber", registration_number),
        )
}

/// Builds the `RetrieveCompanyOnlineReport` payload for a full report.
pub fn company_report_request(company_id: impl Display, language: Option<&str>) -> RequestParams {
    RequestParams::new()
        .with("oper:companyId", company_id.to_string())
        .with("oper:reportType", REPORT_TYPE)
        .with("oper:language", language.unwrap_or(DEFAULT_LANGUAGE))
}
