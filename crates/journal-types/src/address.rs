use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::identity::Identity;

/// Identifier of the on-ledger program that owns journal record accounts.
///
/// Part of every address derivation, so two programs deploying the same
/// record layout never collide on storage addresses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId([u8; 32]);

impl ProgramId {
    /// The deployed journal record program.
    pub const JOURNAL: Self = Self(*b"journal-record-program-v1\0\0\0\0\0\0\0");

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProgramId({})", hex::encode(&self.0[..4]))
    }
}

/// Storage address of a journal record account.
///
/// An `Address` is derived deterministically from a program id, a
/// user-chosen record key, and the owner's [`Identity`] using
/// domain-separated BLAKE3. It is always recomputed from those inputs and
/// never stored. The derivation is one-way: the output is a hash, not
/// usable public key material, so a derived address can never double as a
/// signing identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    hash: [u8; 32],
}

impl Address {
    const DOMAIN: &'static [u8] = b"journal-address-v1";

    /// Derive the unique address for `(program, key, owner)`.
    ///
    /// Pure and deterministic: the same inputs always yield the same
    /// address, and because the owner bytes participate in the hash, two
    /// owners reusing the same key land on distinct addresses.
    pub fn derive(program: &ProgramId, key: &str, owner: &Identity) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(Self::DOMAIN);
        hasher.update(b":");
        hasher.update(program.as_bytes());
        hasher.update(&(key.len() as u32).to_le_bytes());
        hasher.update(key.as_bytes());
        hasher.update(owner.as_bytes());
        Self {
            hash: *hasher.finalize().as_bytes(),
        }
    }

    /// The raw 32-byte address.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("adr:{}", hex::encode(&self.hash[..4]))
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("adr:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { hash: arr })
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.short_id())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derive_is_deterministic() {
        let owner = Identity::from_bytes([1; 32]);
        let a1 = Address::derive(&ProgramId::JOURNAL, "groceries", &owner);
        let a2 = Address::derive(&ProgramId::JOURNAL, "groceries", &owner);
        assert_eq!(a1, a2);
    }

    #[test]
    fn different_keys_produce_different_addresses() {
        let owner = Identity::from_bytes([1; 32]);
        let a1 = Address::derive(&ProgramId::JOURNAL, "monday", &owner);
        let a2 = Address::derive(&ProgramId::JOURNAL, "tuesday", &owner);
        assert_ne!(a1, a2);
    }

    #[test]
    fn different_owners_produce_different_addresses() {
        let o1 = Identity::from_bytes([1; 32]);
        let o2 = Identity::from_bytes([2; 32]);
        let a1 = Address::derive(&ProgramId::JOURNAL, "shared-key", &o1);
        let a2 = Address::derive(&ProgramId::JOURNAL, "shared-key", &o2);
        assert_ne!(a1, a2);
    }

    #[test]
    fn different_programs_produce_different_addresses() {
        let owner = Identity::from_bytes([1; 32]);
        let other = ProgramId::new([0xEE; 32]);
        let a1 = Address::derive(&ProgramId::JOURNAL, "key", &owner);
        let a2 = Address::derive(&other, "key", &owner);
        assert_ne!(a1, a2);
    }

    #[test]
    fn key_bytes_are_length_prefixed_in_derivation() {
        // Without a length prefix "ab" + owner could alias "a" + shifted
        // input. The prefix keeps seed boundaries unambiguous.
        let owner = Identity::from_bytes([7; 32]);
        let a1 = Address::derive(&ProgramId::JOURNAL, "ab", &owner);
        let a2 = Address::derive(&ProgramId::JOURNAL, "a", &owner);
        assert_ne!(a1, a2);
    }

    #[test]
    fn hex_roundtrip() {
        let owner = Identity::ephemeral();
        let address = Address::derive(&ProgramId::JOURNAL, "note", &owner);
        let parsed = Address::from_hex(&address.to_hex()).unwrap();
        assert_eq!(address, parsed);
    }

    #[test]
    fn short_id_format() {
        let owner = Identity::from_bytes([0; 32]);
        let address = Address::derive(&ProgramId::JOURNAL, "x", &owner);
        assert!(address.short_id().starts_with("adr:"));
    }

    proptest! {
        #[test]
        fn derivation_deterministic_for_any_key(key in ".*", seed in any::<[u8; 32]>()) {
            let owner = Identity::from_bytes(seed);
            let a1 = Address::derive(&ProgramId::JOURNAL, &key, &owner);
            let a2 = Address::derive(&ProgramId::JOURNAL, &key, &owner);
            prop_assert_eq!(a1, a2);
        }

        #[test]
        fn distinct_owners_never_collide(
            key in ".*",
            s1 in any::<[u8; 32]>(),
            s2 in any::<[u8; 32]>(),
        ) {
            prop_assume!(s1 != s2);
            let a1 = Address::derive(&ProgramId::JOURNAL, &key, &Identity::from_bytes(s1));
            let a2 = Address::derive(&ProgramId::JOURNAL, &key, &Identity::from_bytes(s2));
            prop_assert_ne!(a1, a2);
        }
    }
}
