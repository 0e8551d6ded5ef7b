//! creditsafe-rs: async client for the Creditsafe GlobalData SOAP service.
//!
//! Two operations are exposed, company search and full company report
//! retrieval. Results are returned as `serde_json::Value` fragments with
//! `snake_case` keys; the Creditsafe data schema is not modelled.
//!
//! Every failure surfaces as a [`CreditsafeError`]:
//! - [`CreditsafeError::Api`] when the service rejects a request, whether by
//!   SOAP fault, HTTP status, or an error-coded `Message` element inside an
//!   otherwise successful response.
//! - [`CreditsafeError::Http`] when the service could not be reached.
//! - [`CreditsafeError::MissingKey`] when a response lacks the expected structure.

pub mod core;
pub mod messages;
pub mod normalize;
pub mod request;
pub mod soap;
pub mod wsdl;

pub use crate::core::{
    CreditsafeClient, CreditsafeClientBuilder, CreditsafeError, Credentials, Environment, Result,
    TransportOptions,
};
pub use messages::{ApiMessage, CreditsafeMessages, MessageKind, MessageLookup};
pub use normalize::MessagePrefix;
pub use request::{RequestParams, RequestValue};
pub use soap::{Operation, SoapResponse, SoapTransport, TransportError};
