//! SOAP plumbing: the transport seam, envelope serialization and response parsing.
//!
//! [`SoapTransport`] is the only thing the client needs from this module. The
//! bundled [`HttpTransport`] implements it over `reqwest`; tests and callers
//! with their own HTTP stack can supply any other implementation.

pub mod envelope;
mod http;
mod response;

pub use http::{HttpTransport, HttpTransportConfig};
pub use response::{SoapParseError, SoapResponse};

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use xmltree::Element;

use crate::request::RequestParams;

/// The remote operations exposed by the Creditsafe company data service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Company search.
    FindCompanies,
    /// Full company report retrieval.
    RetrieveCompanyOnlineReport,
}

impl Operation {
    /// The operation name as it appears in the service definition.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FindCompanies => "FindCompanies",
            Self::RetrieveCompanyOnlineReport => "RetrieveCompanyOnlineReport",
        }
    }

    pub const fn all() -> [Self; 2] {
        [Self::FindCompanies, Self::RetrieveCompanyOnlineReport]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failures a transport reports for a single call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with a SOAP fault.
    #[error("SOAP fault ({code}): {message}")]
    Fault {
        /// The `faultcode` (or SOAP 1.2 `Code/Value`).
        code: String,
        /// The `faultstring` (or SOAP 1.2 `Reason/Text`).
        message: String,
    },

    /// The service answered with a non-success HTTP status and no SOAP fault.
    #[error("{message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Description of the failure, including the response body when present.
        message: String,
    },

    /// No response could be obtained (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Connection(String),

    /// Anything else.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// The future returned by [`SoapTransport::call`].
pub type CallFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SoapResponse, TransportError>> + Send + 'a>>;

/// A configured connection to the Creditsafe service.
///
/// Implementations perform exactly one remote call per invocation. Namespace
/// bindings, authentication and endpoint selection are the implementation's
/// concern; `params` reach the wire with their keys unchanged.
pub trait SoapTransport: Send + Sync {
    fn call<'a>(&'a self, operation: Operation, params: RequestParams) -> CallFuture<'a>;
}

/// `root` and all of its descendant elements, in document order.
pub(crate) fn descendants(root: &Element) -> Vec<&Element> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(el) = stack.pop() {
        out.push(el);
        stack.extend(
            el.children
                .iter()
                .rev()
                .filter_map(|node| node.as_element()),
        );
    }
    out
}

/// Strips any `prefix:` from a name.
pub(crate) fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}
