//! Turns everything that can go wrong in a call into a [`CreditsafeError`].
//!
//! Two sources are inspected: failures the transport reports, and `Message`
//! elements embedded in responses that otherwise look successful.

use xmltree::Element;

use crate::core::CreditsafeError;
use crate::messages::MessageLookup;
use crate::soap::{TransportError, descendants};

/// Message raised when the service answers a call with a bare HTTP 401.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: invalid credentials";

/// A namespace prefix under which `Message` elements are looked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessagePrefix {
    /// Elements written as `<prefix:Message>`.
    Named(String),
    /// Elements written as `<Message>` in any default namespace.
    Unprefixed,
    /// Elements written as `<Message>` whose default namespace is this URI.
    /// Payload fields that happen to be called `Message` are left alone.
    Namespaced(String),
}

impl MessagePrefix {
    fn matches(&self, el: &Element) -> bool {
        let prefix = el.prefix.as_deref();
        match self {
            Self::Named(p) => prefix == Some(p.as_str()),
            Self::Unprefixed => prefix.is_none(),
            Self::Namespaced(uri) => {
                prefix.is_none() && el.namespace.as_deref() == Some(uri.as_str())
            }
        }
    }
}

impl From<&str> for MessagePrefix {
    fn from(p: &str) -> Self {
        if p.is_empty() {
            Self::Unprefixed
        } else {
            Self::Named(p.to_string())
        }
    }
}

struct Rule {
    matches: fn(&TransportError) -> bool,
    convert: fn(TransportError) -> CreditsafeError,
}

/// Evaluated in order; the first matching rule wins, so the 401 rule must
/// precede the generic status rule.
const RULES: &[Rule] = &[
    Rule {
        matches: is_fault,
        convert: fault_to_api,
    },
    Rule {
        matches: is_unauthorized,
        convert: unauthorized_to_api,
    },
    Rule {
        matches: is_status,
        convert: status_to_api,
    },
    Rule {
        matches: is_connection,
        convert: connection_to_http,
    },
];

fn is_fault(err: &TransportError) -> bool {
    matches!(err, TransportError::Fault { .. })
}

fn is_unauthorized(err: &TransportError) -> bool {
    matches!(err, TransportError::Status { status: 401, .. })
}

fn is_status(err: &TransportError) -> bool {
    matches!(err, TransportError::Status { .. })
}

fn is_connection(err: &TransportError) -> bool {
    matches!(err, TransportError::Connection(_))
}

fn fault_to_api(err: TransportError) -> CreditsafeError {
    match err {
        TransportError::Fault { message, .. } => CreditsafeError::api(message),
        other => unchanged(other),
    }
}

fn unauthorized_to_api(_: TransportError) -> CreditsafeError {
    CreditsafeError::api(UNAUTHORIZED_MESSAGE)
}

fn status_to_api(err: TransportError) -> CreditsafeError {
    match err {
        TransportError::Status { message, .. } => CreditsafeError::api(message),
        other => unchanged(other),
    }
}

fn connection_to_http(err: TransportError) -> CreditsafeError {
    match err {
        TransportError::Connection(message) => CreditsafeError::Http(message),
        other => unchanged(other),
    }
}

fn unchanged(err: TransportError) -> CreditsafeError {
    match err {
        TransportError::Other(source) => CreditsafeError::Transport(source),
        other => CreditsafeError::Transport(Box::new(other)),
    }
}

/// Reclassifies a transport failure.
pub fn classify(err: TransportError) -> CreditsafeError {
    match RULES.iter().find(|rule| (rule.matches)(&err)) {
        Some(rule) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %err, "classifying transport failure");
            (rule.convert)(err)
        }
        None => unchanged(err),
    }
}

/// Fails with the first error-coded `Message` element in `document`.
///
/// Elements are matched by local name `Message` under any of `prefixes` and
/// resolved through `lookup` by their `Code` attribute. Elements without a
/// code are ignored. The element text, when present, is appended to the
/// resolved message.
///
/// # Errors
///
/// Returns [`CreditsafeError::Api`] for the first message whose code is an error.
pub fn check_messages(
    document: &Element,
    prefixes: &[MessagePrefix],
    lookup: &dyn MessageLookup,
) -> Result<(), CreditsafeError> {
    let messages = descendants(document).into_iter().filter(|el| {
        el.name == "Message" && prefixes.iter().any(|p| p.matches(el))
    });

    for el in messages {
        let Some(code) = el.attributes.get("Code") else {
            continue;
        };
        let resolved = lookup.for_code(code);
        let detail = el
            .get_text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if !resolved.is_error {
            #[cfg(feature = "tracing")]
            tracing::debug!(code = %resolved.code, message = %resolved.message, "service message");
            continue;
        }

        let message = match detail {
            Some(detail) => format!("{} ({detail})", resolved.message),
            None => resolved.message,
        };
        return Err(CreditsafeError::Api {
            message,
            code: Some(resolved.code),
        });
    }
    Ok(())
}
