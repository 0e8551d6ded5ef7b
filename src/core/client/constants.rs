//! Centralized constants for namespaces, headers and the default UA.

use crate::normalize::MessagePrefix;

pub(crate) const USER_AGENT: &str = concat!("creditsafe-rs/", env!("CARGO_PKG_VERSION"));

/// Prefix of the operation namespace; also used for the operation element itself.
pub(crate) const OPERATIONS_PREFIX: &str = "oper";
pub(crate) const OPERATIONS_NS: &str = "http://www.creditsafe.com/globaldata/operations";

pub(crate) const DATATYPES_PREFIX: &str = "dat";
pub(crate) const DATATYPES_NS: &str = "http://www.creditsafe.com/globaldata/datatypes";

pub(crate) const CREDENTIALS_PREFIX: &str = "cred";
pub(crate) const CREDENTIALS_NS: &str =
    "http://schemas.datacontract.org/2004/07/Creditsafe.GlobalData";

/// SOAPAction base used when the service definition does not name one.
pub(crate) const DEFAULT_SOAP_ACTION_BASE: &str =
    "http://www.creditsafe.com/globaldata/operations/CompanyDataAccessService";

/// Where the service has been seen to emit `Message` elements: under `q1`, or
/// unprefixed in the data-types namespace.
pub(crate) fn default_message_prefixes() -> Vec<MessagePrefix> {
    vec![
        MessagePrefix::Named("q1".to_string()),
        MessagePrefix::Namespaced(DATATYPES_NS.to_string()),
    ]
}

/// The three namespace bindings every request carries, in declaration order.
pub(crate) fn default_namespaces() -> Vec<(String, String)> {
    [
        (OPERATIONS_PREFIX, OPERATIONS_NS),
        (DATATYPES_PREFIX, DATATYPES_NS),
        (CREDENTIALS_PREFIX, CREDENTIALS_NS),
    ]
    .into_iter()
    .map(|(p, ns)| (p.to_string(), ns.to_string()))
    .collect()
}
