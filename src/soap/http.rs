//! The default `reqwest` transport.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::envelope::build_envelope;
use super::{CallFuture, Operation, SoapResponse, SoapTransport, TransportError};
use crate::core::CreditsafeError;
use crate::request::RequestParams;

const SOAP_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";
const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Everything needed to build an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub endpoint: Url,
    /// `(prefix, uri)` pairs declared on every envelope.
    pub namespaces: Vec<(String, String)>,
    /// Prefix of the operation element (`oper:FindCompanies`).
    pub operation_prefix: String,
    pub soap_actions: HashMap<Operation, String>,
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Extra headers; these replace defaults with the same name.
    pub headers: Vec<(String, String)>,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

/// A [`SoapTransport`] that POSTs SOAP 1.1 envelopes over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    endpoint: Url,
    namespaces: Vec<(String, String)>,
    operation_prefix: String,
    soap_actions: HashMap<Operation, String>,
    /// Set when a caller header replaces the per-operation `SOAPAction`.
    soap_action_overridden: bool,
}

impl HttpTransport {
    /// Builds the HTTP client with the authentication and extra headers installed.
    ///
    /// # Errors
    ///
    /// Returns [`CreditsafeError::Config`] if a header is not valid or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: HttpTransportConfig) -> Result<Self, CreditsafeError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&config.authorization)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE));
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CreditsafeError::Config(format!("invalid header name `{name}`: {e}")))?;
            headers.insert(name, header_value(value)?);
        }
        let soap_action_overridden = headers.contains_key(SOAP_ACTION_HEADER);

        let mut httpb = Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers);
        if let Some(t) = config.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = config.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }
        let http = httpb
            .build()
            .map_err(|e| CreditsafeError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            namespaces: config.namespaces,
            operation_prefix: config.operation_prefix,
            soap_actions: config.soap_actions,
            soap_action_overridden,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    async fn send(
        &self,
        operation: Operation,
        params: RequestParams,
    ) -> Result<SoapResponse, TransportError> {
        let element = format!("{}:{}", self.operation_prefix, operation.name());
        let payload = build_envelope(&element, &params, &self.namespaces)
            .map_err(|e| TransportError::Other(Box::new(e)))?;

        // Request-level headers beat the client defaults, so the action is only
        // set here when the caller has not fixed one.
        let mut req = self.http.post(self.endpoint.clone()).body(payload);
        if !self.soap_action_overridden
            && let Some(action) = self.soap_actions.get(&operation)
        {
            req = req.header(SOAP_ACTION_HEADER, action.as_str());
        }

        let resp = req.send().await.map_err(from_reqwest)?;
        let status = resp.status();
        let text = resp.text().await.map_err(from_reqwest)?;

        if status.is_success() {
            let parsed =
                SoapResponse::from_xml(&text).map_err(|e| TransportError::Other(Box::new(e)))?;
            if let Some((code, message)) = parsed.fault() {
                return Err(TransportError::Fault { code, message });
            }
            return Ok(parsed);
        }

        // Faults normally arrive as HTTP 500 with a SOAP body.
        if let Ok(parsed) = SoapResponse::from_xml(&text)
            && let Some((code, message)) = parsed.fault()
        {
            return Err(TransportError::Fault { code, message });
        }

        let body = text.trim();
        let message = if body.is_empty() {
            format!("HTTP error ({})", status.as_u16())
        } else {
            format!("HTTP error ({}): {body}", status.as_u16())
        };
        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl SoapTransport for HttpTransport {
    fn call<'a>(&'a self, operation: Operation, params: RequestParams) -> CallFuture<'a> {
        Box::pin(self.send(operation, params))
    }
}

fn header_value(value: &str) -> Result<HeaderValue, CreditsafeError> {
    HeaderValue::from_str(value)
        .map_err(|e| CreditsafeError::Config(format!("invalid header value: {e}")))
}

fn from_reqwest(e: reqwest::Error) -> TransportError {
    if e.is_connect() || e.is_timeout() || e.is_request() || e.is_body() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Other(Box::new(e))
    }
}
