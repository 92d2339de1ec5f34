//! # Verifiable Credential
//!
//! The credential is treated as an opaque, already-signed JSON document. The
//! only field read from it is `issuer`, which becomes the holder and subject
//! of the presentation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A Verifiable Credential document, kept exactly as loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VerifiableCredential(Map<String, Value>);

impl VerifiableCredential {
    /// Load a credential from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read or does not contain a
    /// JSON object.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let io_err = |reason: String| Error::Io {
            path: path.display().to_string(),
            reason,
        };

        let contents = tokio::fs::read_to_string(path).await.map_err(|e| io_err(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| io_err(e.to_string()))
    }

    /// The credential's issuer identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCredential`] if `issuer` is missing, is not a
    /// string, or is empty.
    pub fn issuer(&self) -> Result<&str> {
        match self.0.get("issuer") {
            Some(Value::String(issuer)) if !issuer.is_empty() => Ok(issuer.as_str()),
            Some(Value::String(_)) => {
                Err(Error::MalformedCredential("`issuer` is empty".into()))
            }
            Some(_) => Err(Error::MalformedCredential("`issuer` is not a string".into())),
            None => Err(Error::MalformedCredential("`issuer` is missing".into())),
        }
    }
}

impl From<Map<String, Value>> for VerifiableCredential {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for VerifiableCredential {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(Error::MalformedCredential("credential is not a JSON object".into())),
        }
    }
}
