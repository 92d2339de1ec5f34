//! # Token Exchange
//!
//! Redeems a Verifiable Presentation for a bearer access token using the
//! `vp_token` grant. The presentation travels as unpadded standard base64 of
//! its JSON serialization in a form-urlencoded body.

use std::fmt;

use base64ct::{Base64Unpadded, Encoding};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result, Stage};
use crate::presentation::VerifiablePresentation;

/// Grant type for exchanging a presentation for a token.
pub const VP_TOKEN_GRANT: &str = "vp_token";

/// Form body posted to the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenRequest {
    /// Always `vp_token`.
    pub grant_type: String,

    /// Encoded presentation. See [`encode_vp_token`].
    pub vp_token: String,

    /// Sent empty.
    pub presentation_submission: String,

    /// Sent empty.
    pub scope: String,
}

impl TokenRequest {
    /// Build the token request for `vp`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the presentation cannot be serialized.
    pub fn new(vp: &VerifiablePresentation) -> Result<Self> {
        Ok(Self {
            grant_type: VP_TOKEN_GRANT.to_string(),
            vp_token: encode_vp_token(vp)?,
            presentation_submission: String::new(),
            scope: String::new(),
        })
    }
}

/// Successful token endpoint response. Only `access_token` is required; the
/// other fields are logged as received, whatever their JSON type.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// The bearer token.
    pub access_token: String,

    /// Token type, usually `Bearer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<Value>,

    /// Token lifetime, usually seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<Value>,

    /// Granted scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Value>,
}

/// An opaque bearer token. Its `Debug` output never reveals the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// The raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Encode `vp` as standard base64 of its compact JSON, without `=` padding.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the presentation cannot be serialized.
pub fn encode_vp_token(vp: &VerifiablePresentation) -> Result<String> {
    let json = serde_json::to_vec(vp)
        .map_err(|e| Error::Encoding(format!("cannot serialize presentation: {e}")))?;
    Ok(Base64Unpadded::encode_string(&json))
}

/// Exchange `vp` for an access token at `endpoint`. A single attempt is made.
///
/// # Errors
///
/// Returns [`Error::TokenExchangeFailed`] for a non-success status or a body
/// without an `access_token`, and [`Error::Transport`] if the request cannot
/// be completed.
pub async fn exchange_token(
    client: &reqwest::Client, endpoint: &Url, vp: &VerifiablePresentation,
) -> Result<AccessToken> {
    let request = TokenRequest::new(vp)?;
    let transport = |source| Error::Transport {
        stage: Stage::TokenExchange,
        url: endpoint.to_string(),
        source,
    };

    let response =
        client.post(endpoint.clone()).form(&request).send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    let failed = |body: String| Error::TokenExchangeFailed {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    };
    if !status.is_success() {
        return Err(failed(body));
    }

    let Ok(token) = serde_json::from_str::<TokenResponse>(&body) else {
        return Err(failed(body));
    };
    if token.access_token.is_empty() {
        return Err(failed(body));
    }

    tracing::debug!(
        token_type = ?token.token_type,
        expires_in = ?token.expires_in,
        scope = ?token.scope,
        "access token issued"
    );
    Ok(AccessToken(token.access_token))
}
