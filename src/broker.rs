//! # Context Broker
//!
//! Fetches `Streetlight` entities from an NGSI-LD context broker using a
//! bearer token. The JSON-LD context is supplied out-of-band in a `Link`
//! header as NGSI-LD requires.

use reqwest::header::{ACCEPT, LINK};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result, Stage};
use crate::token::AccessToken;

/// Entity type queried from the broker.
pub const ENTITY_TYPE: &str = "Streetlight";

/// Link relation identifying a JSON-LD context.
pub const JSON_LD_CONTEXT_REL: &str = "http://www.w3.org/ns/json-ld#context";

/// `{broker}/ngsi-ld/v1/entities?type=Streetlight`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if `broker` cannot have a path
/// appended (e.g. `mailto:` URLs).
pub fn entities_url(broker: &Url) -> Result<Url> {
    let mut url = broker.clone();
    url.path_segments_mut()
        .map_err(|()| Error::InvalidConfiguration {
            name: "CONTEXT_BROKER_URL",
            reason: format!("{broker} cannot be a base URL"),
        })?
        .pop_if_empty()
        .extend(["ngsi-ld", "v1", "entities"]);
    url.set_query(None);
    url.query_pairs_mut().append_pair("type", ENTITY_TYPE);
    Ok(url)
}

/// `Link` header value pointing at `context`.
#[must_use]
pub fn context_link(context: &Url) -> String {
    format!(r#"<{context}>; rel="{JSON_LD_CONTEXT_REL}"; type="application/ld+json""#)
}

/// Fetch the entity collection. The response body is returned unmodified.
///
/// # Errors
///
/// Returns [`Error::ResourceFetchFailed`] for a non-success status or a body
/// that is not JSON, and [`Error::Transport`] if the request cannot be
/// completed.
pub async fn fetch_entities(
    client: &reqwest::Client, broker: &Url, token: &AccessToken, context: &Url,
) -> Result<Value> {
    let url = entities_url(broker)?;
    let transport = |source| Error::Transport {
        stage: Stage::FetchEntities,
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url.clone())
        .bearer_auth(token.as_str())
        .header(LINK, context_link(context))
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if !status.is_success() {
        return Err(Error::ResourceFetchFailed {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|_| Error::ResourceFetchFailed {
        status: status.as_u16(),
        body: body.clone(),
    })
}
