//! # Errors
//!
//! Every failure aborts the remainder of the flow. Errors carry enough context
//! (stage, endpoint, HTTP status and body) to diagnose a failed run without
//! re-running it.

use std::fmt;

use thiserror::Error;

/// Result type for all fallible operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building, presenting and redeeming a presentation.
#[derive(Debug, Error)]
pub enum Error {
    /// The credential has no usable `issuer`.
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    /// The key could not be used to produce an RS256 signature.
    #[error("signing error: {0}")]
    Signing(String),

    /// The token endpoint rejected the presentation or returned no token.
    #[error("token exchange with {endpoint} failed ({status}): {body}")]
    TokenExchangeFailed {
        /// Token endpoint the presentation was sent to.
        endpoint: String,
        /// HTTP status returned.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The context broker returned a non-success response.
    #[error("entity fetch failed ({status}): {body}")]
    ResourceFetchFailed {
        /// HTTP status returned.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The presentation could not be encoded for the token request.
    #[error("cannot encode token request: {0}")]
    Encoding(String),

    /// A request could not be sent or its response could not be read.
    #[error("{stage}: request to {url} failed")]
    Transport {
        /// Stage the request belongs to.
        stage: Stage,
        /// Target URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// A required configuration value is absent or empty.
    #[error("configuration value {0} is missing")]
    ConfigurationMissing(&'static str),

    /// A configuration value is present but cannot be used.
    #[error("configuration value {name} is invalid: {reason}")]
    InvalidConfiguration {
        /// Configuration name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The credential file is unreadable or not valid JSON.
    #[error("cannot load credential from {path}: {reason}")]
    Io {
        /// File path.
        path: String,
        /// Read or parse failure.
        reason: String,
    },
}

impl Error {
    /// The pipeline stage that raised the error.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::MalformedCredential(_) => Stage::BuildClaims,
            Self::Signing(_) => Stage::Sign,
            Self::TokenExchangeFailed { .. } | Self::Encoding(_) => Stage::TokenExchange,
            Self::ResourceFetchFailed { .. } => Stage::FetchEntities,
            Self::Transport { stage, .. } => *stage,
            Self::ConfigurationMissing(_) | Self::InvalidConfiguration { .. } => {
                Stage::Configuration
            }
            Self::Io { .. } => Stage::LoadCredential,
        }
    }
}

/// Steps of the presentation flow, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Reading process configuration.
    Configuration,
    /// Loading the credential document.
    LoadCredential,
    /// Building the presentation claim-set.
    BuildClaims,
    /// Signing the claim-set.
    Sign,
    /// Exchanging the presentation for an access token.
    TokenExchange,
    /// Fetching entities from the context broker.
    FetchEntities,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::LoadCredential => "load credential",
            Self::BuildClaims => "build claims",
            Self::Sign => "sign",
            Self::TokenExchange => "token exchange",
            Self::FetchEntities => "fetch entities",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_follows_variant() {
        let err = Error::TokenExchangeFailed {
            endpoint: "https://verifier.example/token".into(),
            status: 400,
            body: "invalid_grant".into(),
        };
        assert_eq!(err.stage(), Stage::TokenExchange);
        assert_eq!(
            err.to_string(),
            "token exchange with https://verifier.example/token failed (400): invalid_grant"
        );

        assert_eq!(Error::ConfigurationMissing("PRIVATE_KEY").stage(), Stage::Configuration);
        assert_eq!(Error::MalformedCredential("no issuer".into()).stage(), Stage::BuildClaims);
        assert_eq!(Error::Encoding("bad presentation".into()).stage(), Stage::TokenExchange);
    }
}
