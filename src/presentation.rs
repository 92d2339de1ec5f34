//! # Verifiable Presentation
//!
//! The document sent to the verifier's token endpoint. It restates the signed
//! claim-set in the shape the verifier expects and carries the compact JWT as
//! a `JwtProof2020` proof.

use serde::{Deserialize, Serialize};

use crate::claims::{PresentationClaims, CREDENTIALS_CONTEXT, PRESENTATION_TYPE};
use crate::credential::VerifiableCredential;
use crate::signer::SignedJwt;
use crate::window::iso8601;

/// Proof type of a presentation secured by a JWT.
pub const JWT_PROOF_TYPE: &str = "JwtProof2020";

/// Wire-level Verifiable Presentation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiablePresentation {
    /// Subject, from the claims.
    pub sub: String,

    /// Issued at (epoch seconds), from the claims.
    pub iat: i64,

    /// Nonce, from the claims.
    pub nonce: String,

    /// Slimmed `vp` claim.
    pub vp: VpSummary,

    /// The presented credentials, unmodified.
    pub verifiable_credential: Vec<VerifiableCredential>,

    /// Holder, the JWT issuer.
    pub holder: String,

    /// Presentation identifier, the JWT `jti`.
    pub id: String,

    /// Presentation types.
    #[serde(rename = "type")]
    pub type_: Vec<String>,

    /// JSON-LD contexts.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// ISO-8601 form of `iat`.
    pub issuance_date: String,

    /// ISO-8601 form of `exp`.
    pub expiration_date: String,

    /// Proof carrying the signed JWT.
    pub proof: Proof,
}

/// The identifying subset of the `vp` claim.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct VpSummary {
    /// Inner presentation identifier.
    pub id: String,

    /// Inner presentation holder.
    pub holder: String,
}

/// Presentation proof.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Proof {
    /// Proof type. Always `JwtProof2020`.
    #[serde(rename = "type")]
    pub type_: String,

    /// Compact signed JWT over the presentation claims.
    pub jwt: SignedJwt,
}

/// Assemble the wire presentation from its signed claims.
///
/// Every field is read from `claims`, `jwt` or `vc`; nothing is regenerated.
#[must_use]
pub fn assemble(
    claims: &PresentationClaims, jwt: &SignedJwt, vc: &VerifiableCredential,
) -> VerifiablePresentation {
    VerifiablePresentation {
        sub: claims.sub.clone(),
        iat: claims.iat,
        nonce: claims.nonce.clone(),
        vp: VpSummary {
            id: claims.vp.id.clone(),
            holder: claims.vp.holder.clone(),
        },
        verifiable_credential: vec![vc.clone()],
        holder: claims.iss.clone(),
        id: claims.jti.clone(),
        type_: vec![PRESENTATION_TYPE.to_string()],
        context: vec![CREDENTIALS_CONTEXT.to_string()],
        issuance_date: iso8601(claims.iat),
        expiration_date: iso8601(claims.exp),
        proof: Proof {
            type_: JWT_PROOF_TYPE.to_string(),
            jwt: jwt.clone(),
        },
    }
}
