use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::CreditsafeError;

/// The Creditsafe deployment a client talks to.
///
/// Selects both the bundled service-definition file and, through it, the endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// The Creditsafe sandbox.
    Test,
    /// The production service.
    Live,
}

impl Environment {
    /// The lowercase name used in file names and configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CreditsafeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Self::Test),
            "live" => Ok(Self::Live),
            other => Err(CreditsafeError::Config(format!(
                "unknown environment `{other}` (expected `test` or `live`)"
            ))),
        }
    }
}
