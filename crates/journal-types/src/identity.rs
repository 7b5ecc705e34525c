use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque cryptographic identity of a record owner or caller.
///
/// An `Identity` wraps the raw 32 bytes of a public key. The client treats
/// it as an opaque value with equality and a stable textual form; it never
/// implies mutation rights beyond what the backend's signature check
/// enforces.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity {
    bytes: [u8; 32],
}

impl Identity {
    /// Wrap raw 32-byte public key material.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// A random identity for tests and demos. Not backed by a signing key.
    pub fn ephemeral() -> Self {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        Self { bytes }
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("own:{}", hex::encode(&self.bytes[..4]))
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("own:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { bytes: arr })
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.short_id())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_is_identity_preserving() {
        let id = Identity::from_bytes([7u8; 32]);
        assert_eq!(id.as_bytes(), &[7u8; 32]);
    }

    #[test]
    fn ephemeral_identities_are_unique() {
        let id1 = Identity::ephemeral();
        let id2 = Identity::ephemeral();
        assert_ne!(id1, id2);
    }

    #[test]
    fn hex_roundtrip() {
        let id = Identity::from_bytes([0xAB; 32]);
        let parsed = Identity::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn hex_roundtrip_with_prefix() {
        let id = Identity::from_bytes([3; 32]);
        let prefixed = format!("own:{}", id.to_hex());
        assert_eq!(Identity::from_hex(&prefixed).unwrap(), id);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Identity::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_bad_characters() {
        let err = Identity::from_hex("zz").unwrap_err();
        assert!(matches!(err, TypeError::InvalidHex(_)));
    }

    #[test]
    fn short_id_format() {
        let id = Identity::from_bytes([0; 32]);
        let short = id.short_id();
        assert!(short.starts_with("own:"));
        assert_eq!(short.len(), 12); // "own:" + 8 hex chars
    }

    #[test]
    fn serde_roundtrip() {
        let id = Identity::from_bytes([9; 32]);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
