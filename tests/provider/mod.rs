//! Test fixtures shared by the flow tests: a deterministic identifier source,
//! RSA keys and a sample credential.

use std::sync::atomic::{AtomicU64, Ordering};

use josekit::jws::RS256;
use serde_json::json;
use uuid::Uuid;
use vptoken::identifier::IdGenerator;
use vptoken::VerifiableCredential;

pub const ISSUER: &str = "did:example:123";

/// Hands out `00000000-0000-0000-0000-000000000001`, `...0002`, and so on.
#[derive(Debug, Default)]
pub struct SequentialIds(AtomicU64);

impl IdGenerator for SequentialIds {
    fn generate(&self) -> Uuid {
        let next = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(u128::from(next))
    }
}

/// PEM private and public key of a fresh RSA key pair.
pub struct Keys {
    pub private_pem: Vec<u8>,
    pub public_pem: Vec<u8>,
}

pub fn keys() -> Keys {
    let key_pair = RS256.generate_key_pair(2048).expect("should generate key pair");
    Keys {
        private_pem: key_pair.to_pem_private_key(),
        public_pem: key_pair.to_pem_public_key(),
    }
}

pub fn credential() -> VerifiableCredential {
    VerifiableCredential::try_from(json!({
        "credentialSubject": {"id": "did:example:456"},
        "issuer": ISSUER,
        "type": ["VerifiableCredential"],
    }))
    .expect("should be a credential")
}
