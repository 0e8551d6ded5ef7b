//! Public client surface + builder.
//! Internals are split into `auth` (credentials) and `constants` (namespaces + defaults).

mod auth;
mod constants;

pub use auth::Credentials;

use std::fmt::{self, Display};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use constants::{
    DEFAULT_SOAP_ACTION_BASE, OPERATIONS_PREFIX, USER_AGENT, default_message_prefixes,
    default_namespaces,
};
use serde_json::Value;
use tokio::sync::OnceCell;
use url::Url;

use crate::core::{CreditsafeError, Environment, Result};
use crate::messages::{CreditsafeMessages, MessageLookup};
use crate::normalize::{self, MessagePrefix};
use crate::request::{self, RequestParams};
use crate::soap::{HttpTransport, HttpTransportConfig, Operation, SoapTransport};
use crate::wsdl::Wsdl;

const FIND_COMPANIES_PATH: &[&str] = &[
    "find_companies_response",
    "find_companies_result",
    "companies",
    "company",
];

const COMPANY_REPORT_PATH: &[&str] = &[
    "retrieve_company_online_report_response",
    "retrieve_company_online_report_result",
    "reports",
    "report",
];

/// Caller overrides applied on top of the transport defaults.
///
/// Anything set here wins over the value derived from the environment.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    endpoint: Option<Url>,
    wsdl_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
    namespaces: Vec<(String, String)>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send requests here instead of the address in the service definition.
    #[must_use]
    pub fn endpoint(mut self, url: Url) -> Self {
        self.endpoint = Some(url);
        self
    }

    /// Read `creditsafe-<env>.xml` from this directory instead of the bundled copy.
    #[must_use]
    pub fn wsdl_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.wsdl_dir = Some(dir.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Add a header to every request. Replaces a default header of the same name
    /// (case-insensitive), `Authorization`, `Content-Type` and `SOAPAction` included.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Bind an extra namespace prefix, or rebind one of `oper`, `dat` and `cred`.
    #[must_use]
    pub fn namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.push((prefix.into(), uri.into()));
        self
    }
}

/// A client for the Creditsafe company data service.
///
/// Bound to one environment and one credential pair for its whole lifetime;
/// use separate clients for different accounts or environments. The
/// transport is built on the first call and reused afterwards. Clones share
/// it.
///
/// # Example
///
/// ```no_run
/// # use creditsafe_rs::{CreditsafeClient, Credentials};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CreditsafeClient::new("test", Credentials::new("user", "secret"))?;
/// let companies = client.find_company(Some("GB"), Some("12345678")).await?;
/// println!("{companies:#}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CreditsafeClient {
    inner: Arc<Inner>,
}

struct Inner {
    environment: Environment,
    credentials: Credentials,
    options: TransportOptions,
    messages: Arc<dyn MessageLookup>,
    message_prefixes: Vec<MessagePrefix>,
    transport: OnceCell<Arc<dyn SoapTransport>>,
}

impl CreditsafeClient {
    /// Creates a client with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`CreditsafeError::Config`] if `environment` is not `"test"` or `"live"`.
    pub fn new(environment: &str, credentials: Credentials) -> Result<Self> {
        Self::builder(environment, credentials).build()
    }

    /// Create a new builder.
    pub fn builder(environment: impl Into<String>, credentials: Credentials) -> CreditsafeClientBuilder {
        CreditsafeClientBuilder {
            environment: environment.into(),
            credentials,
            options: TransportOptions::default(),
            messages: None,
            message_prefixes: None,
            transport: None,
        }
    }

    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Whether the transport has been built (or supplied) yet.
    pub fn transport_ready(&self) -> bool {
        self.inner.transport.initialized()
    }

    /// Searches for companies by country and registration number.
    ///
    /// Returns the `company` fragment of the result list unchanged: an object
    /// for a single match, an array for several.
    ///
    /// # Errors
    ///
    /// - [`CreditsafeError::Api`] if the service rejected the request.
    /// - [`CreditsafeError::Http`] if the service could not be reached.
    /// - [`CreditsafeError::MissingKey`] if the response has an unexpected shape.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(env = %self.inner.environment)))]
    pub async fn find_company(
        &self,
        country_code: Option<&str>,
        registration_number: Option<&str>,
    ) -> Result<Value> {
        let params = request::find_company_request(country_code, registration_number);
        let body = self.invoke(Operation::FindCompanies, params).await?;
        extract(body, FIND_COMPANIES_PATH)
    }

    /// Retrieves the full online report for a company.
    ///
    /// `language` defaults to `"EN"`. Returns the `report` fragment unchanged.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`find_company`](Self::find_company).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, company_id), err, fields(env = %self.inner.environment, company_id = %company_id)))]
    pub async fn company_report(
        &self,
        company_id: impl Display,
        language: Option<&str>,
    ) -> Result<Value> {
        let params = request::company_report_request(company_id, language);
        let body = self.invoke(Operation::RetrieveCompanyOnlineReport, params).await?;
        extract(body, COMPANY_REPORT_PATH)
    }

    /// Performs one call and normalizes every failure, including embedded error messages.
    async fn invoke(&self, operation: Operation, params: RequestParams) -> Result<Value> {
        let transport = self.transport().await?;
        let response = transport
            .call(operation, params)
            .await
            .map_err(normalize::classify)?;
        normalize::check_messages(
            &response.document,
            &self.inner.message_prefixes,
            self.inner.messages.as_ref(),
        )?;
        Ok(response.body)
    }

    async fn transport(&self) -> Result<&Arc<dyn SoapTransport>> {
        self.inner
            .transport
            .get_or_try_init(|| async { self.build_transport() })
            .await
    }

    fn build_transport(&self) -> Result<Arc<dyn SoapTransport>> {
        let inner = &self.inner;
        let opts = &inner.options;

        let wsdl = match &opts.wsdl_dir {
            Some(dir) => Wsdl::from_dir(dir, inner.environment)?,
            None => Wsdl::bundled(inner.environment)?,
        };
        let endpoint = match &opts.endpoint {
            Some(url) => url.clone(),
            None => wsdl.endpoint()?,
        };
        let soap_actions = Operation::all()
            .into_iter()
            .map(|op| {
                let action = wsdl
                    .soap_action(op)
                    .unwrap_or_else(|| format!("{DEFAULT_SOAP_ACTION_BASE}/{}", op.name()));
                (op, action)
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(env = %inner.environment, endpoint = %endpoint, "building transport");

        let config = HttpTransportConfig {
            endpoint,
            namespaces: merge_pairs(default_namespaces(), &opts.namespaces),
            operation_prefix: OPERATIONS_PREFIX.to_string(),
            soap_actions,
            authorization: inner.credentials.basic_auth_header(),
            headers: opts.headers.clone(),
            user_agent: opts
                .user_agent
                .clone()
                .unwrap_or_else(|| USER_AGENT.to_string()),
            timeout: opts.timeout,
            connect_timeout: opts.connect_timeout,
        };
        Ok(Arc::new(HttpTransport::new(config)?))
    }
}

impl fmt::Debug for CreditsafeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditsafeClient")
            .field("environment", &self.inner.environment)
            .field("credentials", &self.inner.credentials)
            .field("options", &self.inner.options)
            .field("message_prefixes", &self.inner.message_prefixes)
            .field("transport_ready", &self.transport_ready())
            .finish_non_exhaustive()
    }
}

/* ----------------------- Builder ----------------------- */

pub struct CreditsafeClientBuilder {
    environment: String,
    credentials: Credentials,
    options: TransportOptions,
    messages: Option<Arc<dyn MessageLookup>>,
    message_prefixes: Option<Vec<MessagePrefix>>,
    transport: Option<Arc<dyn SoapTransport>>,
}

impl CreditsafeClientBuilder {
    /// Transport overrides; see [`TransportOptions`].
    #[must_use]
    pub fn transport_options(mut self, options: TransportOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the bundled message-code table.
    #[must_use]
    pub fn message_lookup(mut self, lookup: impl MessageLookup + 'static) -> Self {
        self.messages = Some(Arc::new(lookup));
        self
    }

    /// Replace the prefixes under which `Message` elements are scanned.
    /// An empty string stands for unprefixed elements in any namespace; use
    /// [`MessagePrefix::Namespaced`] to pin them to one.
    #[must_use]
    pub fn message_prefixes<I, P>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<MessagePrefix>,
    {
        self.message_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    /// Use this transport instead of building one from the environment.
    /// Transport options are then ignored.
    #[must_use]
    pub fn transport(mut self, transport: impl SoapTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// # Errors
    ///
    /// Returns [`CreditsafeError::Config`] if the environment is not `"test"` or `"live"`.
    pub fn build(self) -> Result<CreditsafeClient> {
        let environment: Environment = self.environment.parse()?;
        let message_prefixes = self
            .message_prefixes
            .unwrap_or_else(default_message_prefixes);
        let messages: Arc<dyn MessageLookup> = match self.messages {
            Some(lookup) => lookup,
            None => Arc::new(CreditsafeMessages),
        };

        Ok(CreditsafeClient {
            inner: Arc::new(Inner {
                environment,
                credentials: self.credentials,
                options: self.options,
                messages,
                message_prefixes,
                transport: OnceCell::new_with(self.transport),
            }),
        })
    }
}

/// Descends `path` through nested objects; a missing step is an error.
fn extract(mut value: Value, path: &[&str]) -> Result<Value> {
    for (depth, key) in path.iter().enumerate() {
        value = match value {
            Value::Object(mut map) => map.remove(*key),
            _ => None,
        }
        .ok_or_else(|| CreditsafeError::MissingKey(path[..=depth].join("/")))?;
    }
    Ok(value)
}

/// Overlays `overrides` on `defaults` by key, keeping first-seen order.
fn merge_pairs(
    mut defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    for (key, value) in overrides {
        match defaults.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.clone(),
            None => defaults.push((key.clone(), value.clone())),
        }
    }
    defaults
}
