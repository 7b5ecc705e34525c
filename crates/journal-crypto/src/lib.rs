//! Signing boundary for the journal record client.
//!
//! Wraps Ed25519 keys from `ed25519-dalek` and exposes the
//! [`TransactionSigner`] capability the client is handed. The client never
//! sees raw private-key material; it only asks the capability for an
//! identity and a signature over a constructed transaction message.

pub mod signer;

pub use signer::{LocalSigner, Signature, SignatureError, SigningKey, TransactionSigner, VerifyingKey};
