//! # Presentation Claims
//!
//! Builds the JWT claim-set of a Verifiable Presentation. The claim-set is
//! what gets signed; the document sent to the verifier is a different shape,
//! derived from these claims in [`crate::presentation`].

use serde::{Deserialize, Serialize};

use crate::credential::VerifiableCredential;
use crate::error::Result;
use crate::identifier::IdGenerator;
use crate::window::TimeWindow;

/// JSON-LD context of W3C Verifiable Credentials Data Model v1.1.
pub const CREDENTIALS_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Type tag of a Verifiable Presentation.
pub const PRESENTATION_TYPE: &str = "VerifiablePresentation";

/// JWT claim-set of a Verifiable Presentation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresentationClaims {
    /// Issuer of the JWT: the credential issuer acting as holder.
    pub iss: String,

    /// Subject of the JWT. Same as `iss`.
    pub sub: String,

    /// Issued at (epoch seconds).
    pub iat: i64,

    /// Not before (epoch seconds). Same as `iat`.
    pub nbf: i64,

    /// Expiry (epoch seconds).
    pub exp: i64,

    /// Single-use value binding the presentation to this exchange.
    pub nonce: String,

    /// Unique JWT identifier.
    pub jti: String,

    /// The embedded presentation.
    pub vp: VpClaim,
}

/// The `vp` claim.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VpClaim {
    /// JSON-LD contexts.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Presentation identifier (`urn:uuid:...`).
    pub id: String,

    /// Presentation types.
    #[serde(rename = "type")]
    pub type_: Vec<String>,

    /// Holder of the wrapped credentials.
    pub holder: String,

    /// The wrapped credentials, unmodified.
    pub verifiable_credential: Vec<VerifiableCredential>,
}

/// Build the claim-set presenting `vc` for the duration of `window`.
///
/// Each call draws three new identifiers from `ids` for `nonce`, `jti` and
/// `vp.id`.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedCredential`] if the credential has no
/// usable `issuer`.
pub fn build_claims(
    vc: &VerifiableCredential, window: &TimeWindow, ids: &impl IdGenerator,
) -> Result<PresentationClaims> {
    let issuer = vc.issuer()?.to_string();

    Ok(PresentationClaims {
        iss: issuer.clone(),
        sub: issuer.clone(),
        iat: window.iat(),
        nbf: window.iat(),
        exp: window.exp(),
        nonce: ids.generate().to_string(),
        jti: ids.generate().to_string(),
        vp: VpClaim {
            context: vec![CREDENTIALS_CONTEXT.to_string()],
            id: format!("urn:uuid:{}", ids.generate()),
            type_: vec![PRESENTATION_TYPE.to_string()],
            holder: issuer,
            verifiable_credential: vec![vc.clone()],
        },
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::identifier::RandomIds;
    use crate::Error;

    fn credential() -> VerifiableCredential {
        VerifiableCredential::try_from(json!({
            "issuer": "did:example:123",
            "credentialSubject": {"id": "did:example:456"},
        }))
        .unwrap()
    }

    #[test]
    fn claims_from_credential() {
        let window = TimeWindow::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        let claims = build_claims(&credential(), &window, &RandomIds).unwrap();

        assert_eq!(claims.iss, "did:example:123");
        assert_eq!(claims.sub, "did:example:123");
        assert_eq!(claims.vp.holder, "did:example:123");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.exp, 1_700_000_030);
        assert_eq!(claims.vp.verifiable_credential, vec![credential()]);
        assert!(claims.vp.id.starts_with("urn:uuid:"));
    }

    #[test]
    fn fresh_identifiers() {
        let window = TimeWindow::now();
        let first = build_claims(&credential(), &window, &RandomIds).unwrap();
        let second = build_claims(&credential(), &window, &RandomIds).unwrap();

        let ids = [
            first.nonce.as_str(),
            first.jti.as_str(),
            &first.vp.id[9..],
            second.nonce.as_str(),
            second.jti.as_str(),
            &second.vp.id[9..],
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn missing_issuer() {
        let vc = VerifiableCredential::try_from(json!({"type": ["VerifiableCredential"]})).unwrap();
        let err = build_claims(&vc, &TimeWindow::now(), &RandomIds).unwrap_err();
        assert!(matches!(err, Error::MalformedCredential(_)));
    }

    #[test]
    fn claim_names() {
        let window = TimeWindow::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        let claims = build_claims(&credential(), &window, &RandomIds).unwrap();
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["vp"]["@context"], json!([CREDENTIALS_CONTEXT]));
        assert_eq!(value["vp"]["type"], json!([PRESENTATION_TYPE]));
        assert_eq!(value["vp"]["verifiableCredential"][0]["issuer"], "did:example:123");
    }
}
