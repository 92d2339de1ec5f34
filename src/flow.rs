//! # Presentation Flow
//!
//! Runs the holder side of the exchange end to end:
//!
//! 1. build the presentation claims from the credential,
//! 2. sign them,
//! 3. assemble the wire presentation,
//! 4. exchange it for an access token,
//! 5. fetch entities from the context broker with that token.
//!
//! Each step consumes the previous step's output, so the flow is strictly
//! sequential. The first failure ends the run; nothing is retried.

use serde_json::Value;
use url::Url;

use crate::broker::fetch_entities;
use crate::claims::build_claims;
use crate::credential::VerifiableCredential;
use crate::error::Result;
use crate::identifier::{IdGenerator, RandomIds};
use crate::presentation::assemble;
use crate::signer::{sign, Signer};
use crate::token::exchange_token;
use crate::window::TimeWindow;

/// Remote services the flow talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Verifier token endpoint.
    pub token: Url,

    /// Context broker base URL.
    pub broker: Url,

    /// JSON-LD context advertised to the broker.
    pub context: Url,
}

/// Holder-side presentation flow.
#[derive(Debug)]
pub struct PresentationFlow<S, G = RandomIds> {
    client: reqwest::Client,
    signer: S,
    ids: G,
    endpoints: Endpoints,
}

impl<S: Signer> PresentationFlow<S> {
    /// Create a flow signing with `signer` and drawing random identifiers.
    pub fn new(signer: S, endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            signer,
            ids: RandomIds,
            endpoints,
        }
    }
}

impl<S: Signer, G: IdGenerator> PresentationFlow<S, G> {
    /// Replace the identifier source.
    pub fn with_ids<H: IdGenerator>(self, ids: H) -> PresentationFlow<S, H> {
        PresentationFlow {
            client: self.client,
            signer: self.signer,
            ids,
            endpoints: self.endpoints,
        }
    }

    /// Replace the HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Present `vc` for the duration of `window` and return the broker's
    /// entity collection.
    ///
    /// # Errors
    ///
    /// Returns the error of the first step that fails. No request is sent
    /// unless the presentation was fully built and signed, and the broker is
    /// not contacted unless a token was obtained.
    pub async fn run(&self, vc: &VerifiableCredential, window: &TimeWindow) -> Result<Value> {
        let claims = build_claims(vc, window, &self.ids)?;
        tracing::debug!(
            nonce = %claims.nonce,
            jti = %claims.jti,
            vp_id = %claims.vp.id,
            "presentation claims built"
        );

        let jwt = sign(&claims, &self.signer)?;
        tracing::info!(kid = %claims.iss, "presentation signed");

        let vp = assemble(&claims, &jwt, vc);

        let token = exchange_token(&self.client, &self.endpoints.token, &vp).await?;
        tracing::info!(endpoint = %self.endpoints.token, "access token obtained");

        let entities =
            fetch_entities(&self.client, &self.endpoints.broker, &token, &self.endpoints.context)
                .await?;
        tracing::info!(broker = %self.endpoints.broker, "entities fetched");

        Ok(entities)
    }
}
