//! Creditsafe business message codes.
//!
//! Responses may carry `Message` elements with a `Code` attribute even when
//! the call succeeded at the HTTP and SOAP level. Some codes are purely
//! informational; the rest mean the request failed.

/// Broad category of a message code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Informational; never a failure.
    Info,
    /// The requested data does not exist or cannot be provided.
    Data,
    /// A problem with the account making the request.
    Account,
    /// The request itself was malformed or incomplete.
    Request,
    /// The service failed while processing a valid request.
    Processing,
}

/// A resolved message code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiMessage {
    pub code: String,
    pub message: String,
    pub kind: MessageKind,
    pub is_error: bool,
}

/// Resolves message codes found in responses.
pub trait MessageLookup: Send + Sync {
    fn for_code(&self, code: &str) -> ApiMessage;
}

const MESSAGES: &[(&str, &str, MessageKind)] = &[
    ("010", "Search results returned", MessageKind::Info),
    ("011", "There are no results matching specified criteria", MessageKind::Info),
    ("012", "Additional data is not available for this company", MessageKind::Info),
    ("013", "Report returned from cache", MessageKind::Info),
    ("020", "Invalid request XML", MessageKind::Request),
    ("021", "Invalid query string", MessageKind::Request),
    ("022", "Search criteria was missing", MessageKind::Request),
    ("023", "Invalid search criteria", MessageKind::Request),
    ("024", "Invalid country code", MessageKind::Request),
    ("025", "Invalid language code", MessageKind::Request),
    ("026", "Invalid report type", MessageKind::Request),
    ("030", "Report unavailable", MessageKind::Data),
    ("031", "Report unavailable due to legal causes", MessageKind::Data),
    ("032", "Report unavailable for online ordering", MessageKind::Data),
    ("033", "Company not found", MessageKind::Data),
    ("034", "Invalid company identifier", MessageKind::Data),
    ("040", "Invalid username or password", MessageKind::Account),
    ("041", "Account has expired", MessageKind::Account),
    ("042", "Access to the requested country is not included in your subscription", MessageKind::Account),
    ("043", "Insufficient report credits", MessageKind::Account),
    ("044", "Account is locked", MessageKind::Account),
    ("050", "Internal processing error", MessageKind::Processing),
    ("051", "Service temporarily unavailable", MessageKind::Processing),
    ("052", "Request timed out while generating the report", MessageKind::Processing),
];

/// The bundled Creditsafe message table.
///
/// Unknown codes resolve to an error so that new failure codes are never
/// silently treated as success.
#[derive(Clone, Copy, Debug, Default)]
pub struct CreditsafeMessages;

impl MessageLookup for CreditsafeMessages {
    fn for_code(&self, code: &str) -> ApiMessage {
        let code = normalize_code(code);
        match MESSAGES.iter().find(|(c, _, _)| *c == code) {
            Some(&(c, message, kind)) => ApiMessage {
                code: c.to_string(),
                message: message.to_string(),
                kind,
                is_error: kind != MessageKind::Info,
            },
            None => ApiMessage {
                message: format!("Unknown error (code {code})"),
                code,
                kind: MessageKind::Processing,
                is_error: true,
            },
        }
    }
}

/// Numeric codes are matched zero-padded to three digits (`"10"` -> `"010"`).
fn normalize_code(code: &str) -> String {
    let code = code.trim();
    if !code.is_empty() && code.len() < 3 && code.bytes().all(|b| b.is_ascii_digit()) {
        format!("{code:0>3}")
    } else {
        code.to_string()
    }
}
