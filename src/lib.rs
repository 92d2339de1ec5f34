//! # Credibil VP Token
//!
//! A holder agent that trades a Verifiable Credential for access to protected
//! data. It wraps the credential in a signed Verifiable Presentation, redeems
//! the presentation at a verifier's token endpoint (`grant_type=vp_token`) for
//! a bearer token, and uses the token to query an NGSI-LD context broker.
//!
//! # Design
//!
//! ** Single notion of time **
//!
//! A [`TimeWindow`] is captured once, before anything else runs, and passed
//! to every step. The JWT's `iat`/`nbf`/`exp` and the presentation's
//! `issuanceDate`/`expirationDate` are all derived from it.
//!
//! ** Two documents **
//!
//! The signed JWT claim-set ([`claims::PresentationClaims`]) and the document
//! sent to the verifier ([`presentation::VerifiablePresentation`]) are
//! different shapes. The latter is assembled from the former plus the signed
//! JWT; nothing is generated twice.
//!
//! ** Provider **
//!
//! Signing is delegated to a [`signer::Signer`] provider and identifier
//! generation to an [`identifier::IdGenerator`], so implementors can plug in
//! their own key storage and tests can use deterministic identifiers.
//!
//! # Example
//!
//! See `src/main.rs` for the command line entry point that runs the flow
//! against configured endpoints.

pub mod broker;
pub mod claims;
pub mod config;
pub mod credential;
pub mod error;
pub mod flow;
pub mod identifier;
pub mod presentation;
pub mod signer;
pub mod token;
pub mod window;

pub use crate::config::Config;
pub use crate::credential::VerifiableCredential;
pub use crate::error::{Error, Result, Stage};
pub use crate::flow::{Endpoints, PresentationFlow};
pub use crate::window::TimeWindow;
