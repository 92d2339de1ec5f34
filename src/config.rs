//! # Configuration
//!
//! Process configuration is read from environment variables. The binary loads
//! a `.env` file first, if one exists.
//!
//! | Variable                | Required | Purpose                              |
//! |-------------------------|----------|--------------------------------------|
//! | `VC_VERIFIER_TOKEN_URL` | yes      | verifier token endpoint              |
//! | `CONTEXT_BROKER_URL`    | yes      | NGSI-LD context broker base URL      |
//! | `CONTEXT_URL`           | yes      | JSON-LD context sent in `Link`       |
//! | `PRIVATE_KEY`           | yes      | PEM RSA private key                  |
//! | `CREDENTIAL_PATH`       | no       | credential file, default below       |

use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::error::{Error, Result};
use crate::flow::Endpoints;

/// Credential file read when `CREDENTIAL_PATH` is not set.
pub const DEFAULT_CREDENTIAL_PATH: &str = "verifiable-credential.json";

const TOKEN_URL: &str = "VC_VERIFIER_TOKEN_URL";
const BROKER_URL: &str = "CONTEXT_BROKER_URL";
const CONTEXT_URL: &str = "CONTEXT_URL";
const PRIVATE_KEY: &str = "PRIVATE_KEY";
const CREDENTIAL_PATH: &str = "CREDENTIAL_PATH";

/// Settings for one run of the presentation flow.
#[derive(Clone)]
pub struct Config {
    /// Verifier and broker endpoints.
    pub endpoints: Endpoints,

    /// PEM encoded RSA private key.
    pub private_key: String,

    /// Location of the credential document.
    pub credential_path: PathBuf,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationMissing`] if a required variable is unset
    /// or empty and [`Error::InvalidConfiguration`] if a URL does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// As for [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &'static str| {
            lookup(name).filter(|v| !v.trim().is_empty()).ok_or(Error::ConfigurationMissing(name))
        };
        let url = |name: &'static str| {
            let value = required(name)?;
            Url::parse(value.trim()).map_err(|e| Error::InvalidConfiguration {
                name,
                reason: e.to_string(),
            })
        };

        Ok(Self {
            endpoints: Endpoints {
                token: url(TOKEN_URL)?,
                broker: url(BROKER_URL)?,
                context: url(CONTEXT_URL)?,
            },
            private_key: required(PRIVATE_KEY)?,
            credential_path: lookup(CREDENTIAL_PATH)
                .filter(|v| !v.is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_CREDENTIAL_PATH), PathBuf::from),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoints", &self.endpoints)
            .field("private_key", &"***")
            .field("credential_path", &self.credential_path)
            .finish()
    }
}
