//! Environment-keyed service definitions.
//!
//! Each environment has a static WSDL named `creditsafe-<env>.xml`. The
//! bundled copies live in `data/` and are compiled in; a directory holding
//! replacements can be supplied through [`TransportOptions::wsdl_dir`].
//!
//! [`TransportOptions::wsdl_dir`]: crate::TransportOptions

use std::fs;
use std::io::BufReader;
use std::path::Path;

use url::Url;
use xmltree::Element;

use crate::core::{CreditsafeError, Environment};
use crate::soap::{Operation, descendants};

const TEST_WSDL: &str = include_str!("../data/creditsafe-test.xml");
const LIVE_WSDL: &str = include_str!("../data/creditsafe-live.xml");

/// A parsed service definition.
#[derive(Debug, Clone)]
pub struct Wsdl {
    document: Element,
}

impl Wsdl {
    /// The file name of the definition for `env`.
    pub fn file_name(env: Environment) -> String {
        format!("creditsafe-{env}.xml")
    }

    /// The definition compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`CreditsafeError::Config`] if the bundled file does not parse.
    pub fn bundled(env: Environment) -> Result<Self, CreditsafeError> {
        let source = match env {
            Environment::Test => TEST_WSDL,
            Environment::Live => LIVE_WSDL,
        };
        Self::parse(source)
    }

    /// Reads `<dir>/creditsafe-<env>.xml`.
    ///
    /// # Errors
    ///
    /// Returns [`CreditsafeError::Config`] if the file is unreadable or not XML.
    pub fn from_dir(dir: &Path, env: Environment) -> Result<Self, CreditsafeError> {
        let path = dir.join(Self::file_name(env));
        let source = fs::read_to_string(&path).map_err(|e| {
            CreditsafeError::Config(format!("cannot read WSDL {}: {e}", path.display()))
        })?;
        Self::parse(&source)
    }

    /// # Errors
    ///
    /// Returns [`CreditsafeError::Config`] if `source` is not well-formed XML.
    pub fn parse(source: &str) -> Result<Self, CreditsafeError> {
        let document = Element::parse(BufReader::new(source.as_bytes()))
            .map_err(|e| CreditsafeError::Config(format!("invalid WSDL: {e}")))?;
        Ok(Self { document })
    }

    /// The service endpoint from the first `soap:address`.
    ///
    /// # Errors
    ///
    /// Returns [`CreditsafeError::Config`] if no address is declared or it is not a URL.
    pub fn endpoint(&self) -> Result<Url, CreditsafeError> {
        let location = descendants(&self.document)
            .into_iter()
            .filter(|el| el.name == "address")
            .find_map(|el| el.attributes.get("location"))
            .ok_or_else(|| CreditsafeError::Config("WSDL declares no service address".into()))?;
        Url::parse(location)
            .map_err(|e| CreditsafeError::Config(format!("invalid service address `{location}`: {e}")))
    }

    /// The `soapAction` the binding declares for `operation`, if any.
    pub fn soap_action(&self, operation: Operation) -> Option<String> {
        descendants(&self.document)
            .into_iter()
            .filter(|el| {
                el.name == "operation"
                    && el.attributes.get("name").map(String::as_str) == Some(operation.name())
            })
            .find_map(|el| {
                el.get_child("operation")
                    .and_then(|soap_op| soap_op.attributes.get("soapAction"))
                    .cloned()
            })
    }
}
