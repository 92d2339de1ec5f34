//! # Signer
//!
//! Compact JWT signing of presentation claims. Key material stays behind the
//! [`Signer`] provider trait; [`RsaSigner`] is the RS256 implementation used
//! by the binary.

use std::fmt;

use anyhow::anyhow;
use base64ct::{Base64UrlUnpadded, Encoding};
use josekit::jws::alg::rsassa::RsassaJwsSigner;
use josekit::jws::{JwsSigner, JwsVerifier, RS256};
use serde::{Deserialize, Serialize};

use crate::claims::PresentationClaims;
use crate::error::{Error, Result};

/// Signature algorithms a [`Signer`] may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Algorithm {
    /// RSASSA-PKCS1-v1_5 using SHA-256.
    #[serde(rename = "RS256")]
    Rs256,

    /// Edwards-curve signatures.
    #[serde(rename = "EdDSA")]
    EdDSA,
}

/// Signing provider.
pub trait Signer: Send + Sync {
    /// The algorithm used in signing.
    fn algorithm(&self) -> Algorithm;

    /// Attempt to sign a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot produce a signature.
    fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>>;
}

/// RS256 signer backed by an RSA private key.
pub struct RsaSigner {
    signer: RsassaJwsSigner,
}

impl RsaSigner {
    /// Create a signer from a PKCS#1 or PKCS#8 PEM private key.
    ///
    /// Literal `\n` sequences, as found in single-line environment values,
    /// are treated as line breaks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signing`] if the PEM is not a usable RSA private key.
    pub fn from_pem(pem: impl AsRef<[u8]>) -> Result<Self> {
        let pem = String::from_utf8_lossy(pem.as_ref()).replace("\\n", "\n");
        let signer = RS256
            .signer_from_pem(pem.trim())
            .map_err(|e| Error::Signing(format!("invalid RSA private key: {e}")))?;
        Ok(Self { signer })
    }
}

impl fmt::Debug for RsaSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaSigner").finish_non_exhaustive()
    }
}

impl Signer for RsaSigner {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Rs256
    }

    fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.signer.sign(msg).map_err(|e| anyhow!("RS256 signing failed: {e}"))
    }
}

/// Protected header of a presentation JWT.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Header {
    /// Media type. Always `JWT`.
    pub typ: String,

    /// Signature algorithm.
    pub alg: Algorithm,

    /// Key identifier the verifier resolves the public key from.
    pub kid: String,
}

/// A decoded JWT.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jwt<T> {
    /// The JWT header.
    pub header: Header,

    /// The JWT claims.
    pub claims: T,
}

/// A compact serialized, signed JWT.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SignedJwt(String);

impl SignedJwt {
    /// The compact `header.payload.signature` form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SignedJwt {
    fn from(compact: String) -> Self {
        Self(compact)
    }
}

impl fmt::Display for SignedJwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sign `claims` as an RS256 JWT whose `kid` is the claims' issuer.
///
/// # Errors
///
/// Returns [`Error::Signing`] if the signer does not use RS256 or fails to
/// produce a signature.
pub fn sign(claims: &PresentationClaims, signer: &impl Signer) -> Result<SignedJwt> {
    if signer.algorithm() != Algorithm::Rs256 {
        return Err(Error::Signing(format!(
            "expected RS256 signer, got {:?}",
            signer.algorithm()
        )));
    }

    let header = Header {
        typ: "JWT".into(),
        alg: Algorithm::Rs256,
        kid: claims.iss.clone(),
    };
    let header = serde_json::to_vec(&header).map_err(|e| Error::Signing(e.to_string()))?;
    let payload = serde_json::to_vec(claims).map_err(|e| Error::Signing(e.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        Base64UrlUnpadded::encode_string(&header),
        Base64UrlUnpadded::encode_string(&payload)
    );
    let signature =
        signer.try_sign(signing_input.as_bytes()).map_err(|e| Error::Signing(format!("{e:#}")))?;

    Ok(SignedJwt(format!("{signing_input}.{}", Base64UrlUnpadded::encode_string(&signature))))
}

/// Verify an RS256 presentation JWT against a PEM public key and decode it.
///
/// # Errors
///
/// Returns [`Error::Signing`] if the token is malformed, uses another
/// algorithm, or its signature does not verify.
pub fn verify(jwt: &str, public_pem: impl AsRef<[u8]>) -> Result<Jwt<PresentationClaims>> {
    let parts: Vec<&str> = jwt.split('.').collect();
    let [header, payload, signature] = *parts.as_slice() else {
        return Err(Error::Signing("JWT must have three parts".into()));
    };

    let decode = |part: &str| {
        Base64UrlUnpadded::decode_vec(part).map_err(|e| Error::Signing(format!("bad encoding: {e}")))
    };
    let header: Header = serde_json::from_slice(&decode(header)?)
        .map_err(|e| Error::Signing(format!("bad header: {e}")))?;
    if header.alg != Algorithm::Rs256 {
        return Err(Error::Signing(format!("unexpected algorithm {:?}", header.alg)));
    }

    let verifier = RS256
        .verifier_from_pem(public_pem)
        .map_err(|e| Error::Signing(format!("invalid RSA public key: {e}")))?;
    let signing_input_len = jwt.len() - signature.len() - 1;
    verifier
        .verify(&jwt.as_bytes()[..signing_input_len], &decode(signature)?)
        .map_err(|e| Error::Signing(format!("signature does not verify: {e}")))?;

    let claims = serde_json::from_slice(&decode(payload)?)
        .map_err(|e| Error::Signing(format!("bad claims: {e}")))?;
    Ok(Jwt { header, claims })
}
