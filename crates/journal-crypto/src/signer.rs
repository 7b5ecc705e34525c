use std::fmt;

use journal_types::Identity;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ed25519 signing key (private). Never leaves this crate's API surface
/// except as raw bytes explicitly requested by key-management code.
pub struct SigningKey(ed25519_dalek::SigningKey);

/// Ed25519 verifying key (public).
#[derive(Clone, PartialEq, Eq)]
pub struct VerifyingKey(ed25519_dalek::VerifyingKey);

/// Ed25519 signature over a transaction message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 64]);

/// Errors from signing and verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    InvalidSignature,
    #[error("identity bytes are not a valid public key")]
    InvalidKey,
}

impl SigningKey {
    /// Generate a new random signing key.
    pub fn generate() -> Self {
        let mut csprng = rand::thread_rng();
        Self(ed25519_dalek::SigningKey::generate(&mut csprng))
    }

    /// Restore from a raw 32-byte secret.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(&bytes))
    }

    /// The corresponding public verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey(self.0.verifying_key())
    }

    /// The public [`Identity`] this key controls.
    pub fn identity(&self) -> Identity {
        self.verifying_key().identity()
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        use ed25519_dalek::Signer;
        Signature(self.0.sign(message).to_bytes())
    }

    /// Raw secret key bytes, for key-management code only.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl VerifyingKey {
    /// Reconstruct a verifying key from the raw bytes of an [`Identity`].
    ///
    /// Fails when the identity bytes are not a valid curve point; such an
    /// identity can own nothing, since no signature ever verifies for it.
    pub fn from_identity(identity: &Identity) -> Result<Self, SignatureError> {
        let key = ed25519_dalek::VerifyingKey::from_bytes(identity.as_bytes())
            .map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self(key))
    }

    /// The [`Identity`] carried by this public key.
    pub fn identity(&self) -> Identity {
        Identity::from_bytes(self.0.to_bytes())
    }

    /// Verify a signature on a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        use ed25519_dalek::Verifier;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        self.0
            .verify(message, &sig)
            .map_err(|_| SignatureError::InvalidSignature)
    }
}

impl Signature {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        self.0
    }
}

/// Capability injected into the record client to sign transactions.
///
/// The client constructs a canonical transaction message and asks this
/// capability for the caller identity and a signature; private keys stay
/// behind the implementation.
pub trait TransactionSigner: Send + Sync {
    fn identity(&self) -> Identity;
    fn sign(&self, message: &[u8]) -> Signature;
}

/// [`TransactionSigner`] backed by a locally held [`SigningKey`].
pub struct LocalSigner {
    key: SigningKey,
}

impl LocalSigner {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Convenience constructor with a freshly generated key.
    pub fn random() -> Self {
        Self::new(SigningKey::generate())
    }
}

impl TransactionSigner for LocalSigner {
    fn identity(&self) -> Identity {
        self.key.identity()
    }

    fn sign(&self, message: &[u8]) -> Signature {
        self.key.sign(message)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<redacted>)")
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalSigner({})", self.key.identity())
    }
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerifyingKey({})", hex::encode(self.0.to_bytes()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", hex::encode(&self.0[..8]))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(D::Error::custom)?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| D::Error::custom("expected 64-byte signature"))?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let sk = SigningKey::generate();
        let sig = sk.sign(b"journal entry");
        assert!(sk.verifying_key().verify(b"journal entry", &sig).is_ok());
    }

    #[test]
    fn verify_fails_on_wrong_message() {
        let sk = SigningKey::generate();
        let sig = sk.sign(b"original");
        let err = sk.verifying_key().verify(b"tampered", &sig).unwrap_err();
        assert_eq!(err, SignatureError::InvalidSignature);
    }

    #[test]
    fn verify_fails_with_wrong_key() {
        let sk1 = SigningKey::generate();
        let sk2 = SigningKey::generate();
        let sig = sk1.sign(b"message");
        assert!(sk2.verifying_key().verify(b"message", &sig).is_err());
    }

    #[test]
    fn identity_roundtrips_through_verifying_key() {
        let sk = SigningKey::generate();
        let identity = sk.identity();
        let vk = VerifyingKey::from_identity(&identity).unwrap();
        assert_eq!(vk.identity(), identity);
    }

    #[test]
    fn local_signer_signs_for_its_identity() {
        let signer = LocalSigner::random();
        let identity = signer.identity();
        let sig = signer.sign(b"payload");
        let vk = VerifyingKey::from_identity(&identity).unwrap();
        assert!(vk.verify(b"payload", &sig).is_ok());
    }

    #[test]
    fn from_bytes_roundtrip() {
        let sk = SigningKey::generate();
        let restored = SigningKey::from_bytes(sk.to_bytes());
        assert_eq!(sk.identity(), restored.identity());
    }

    #[test]
    fn signature_serde_roundtrip() {
        let sk = SigningKey::generate();
        let sig = sk.sign(b"test");
        let json = serde_json::to_string(&sig).unwrap();
        let parsed: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, parsed);
    }

    #[test]
    fn debug_redacts_signing_key() {
        let sk = SigningKey::generate();
        assert!(format!("{sk:?}").contains("redacted"));
    }
}
