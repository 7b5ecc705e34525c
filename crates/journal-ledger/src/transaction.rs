use std::fmt;

use journal_crypto::{Signature, SignatureError, TransactionSigner, VerifyingKey};
use journal_types::{Address, Identity, ProgramId};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// An unsigned transaction: one encoded instruction bound to a program,
/// the derived account address it operates on, and the signer identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub program: ProgramId,
    pub account: Address,
    pub signer: Identity,
    pub instruction: Vec<u8>,
}

impl Transaction {
    pub fn new(
        program: ProgramId,
        account: Address,
        signer: Identity,
        instruction: Vec<u8>,
    ) -> Self {
        Self {
            program,
            account,
            signer,
            instruction,
        }
    }

    /// Canonical byte form signed by the caller's identity.
    pub fn signing_message(&self) -> LedgerResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Sign with the injected capability, producing a submittable
    /// transaction.
    pub fn sign(self, signer: &dyn TransactionSigner) -> LedgerResult<SignedTransaction> {
        let message = self.signing_message()?;
        let signature = signer.sign(&message);
        Ok(SignedTransaction {
            transaction: self,
            signature,
        })
    }
}

/// A transaction plus the Ed25519 signature over its canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
}

impl SignedTransaction {
    /// Verify the signature against the declared signer identity.
    ///
    /// An identity whose bytes are not a valid public key can never pass:
    /// no signature verifies for it.
    pub fn verify(&self) -> LedgerResult<()> {
        let key = VerifyingKey::from_identity(&self.transaction.signer)
            .map_err(|_| LedgerError::InvalidSignature)?;
        let message = self.transaction.signing_message()?;
        key.verify(&message, &self.signature).map_err(|e| match e {
            SignatureError::InvalidSignature | SignatureError::InvalidKey => {
                LedgerError::InvalidSignature
            }
        })
    }

    /// Deterministic transaction id: domain-separated BLAKE3 over the
    /// signed message and the signature.
    pub fn id(&self) -> LedgerResult<TxId> {
        let message = self.transaction.signing_message()?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"journal-tx-v1:");
        hasher.update(&message);
        hasher.update(&self.signature.to_bytes());
        Ok(TxId(*hasher.finalize().as_bytes()))
    }
}

/// Identifier of a submitted transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId([u8; 32]);

impl TxId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Returned to the caller after a successful mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_id: TxId,
    /// The derived address the mutation acted on.
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_codec::Instruction;
    use journal_crypto::{LocalSigner, SigningKey, TransactionSigner};

    fn sample_transaction(signer: &LocalSigner) -> Transaction {
        let identity = signer.identity();
        let instruction = Instruction::Create {
            key: "k".into(),
            body: "b".into(),
        }
        .encode();
        let account = Address::derive(&ProgramId::JOURNAL, "k", &identity);
        Transaction::new(ProgramId::JOURNAL, account, identity, instruction)
    }

    #[test]
    fn sign_and_verify() {
        let signer = LocalSigner::random();
        let signed = sample_transaction(&signer).sign(&signer).unwrap();
        signed.verify().unwrap();
    }

    #[test]
    fn tampered_instruction_fails_verification() {
        let signer = LocalSigner::random();
        let mut signed = sample_transaction(&signer).sign(&signer).unwrap();
        signed.transaction.instruction[9] ^= 0x01;
        assert_eq!(signed.verify().unwrap_err(), LedgerError::InvalidSignature);
    }

    #[test]
    fn signature_by_other_key_fails_verification() {
        let signer = LocalSigner::random();
        let other = LocalSigner::random();
        // Transaction declares `signer` but is signed by `other`.
        let signed = sample_transaction(&signer).sign(&other).unwrap();
        assert_eq!(signed.verify().unwrap_err(), LedgerError::InvalidSignature);
    }

    #[test]
    fn non_key_identity_never_verifies() {
        let signer = LocalSigner::random();
        let mut tx = sample_transaction(&signer);
        tx.signer = Identity::from_bytes(*blake3::hash(b"not a curve point").as_bytes());
        let signed = tx.sign(&signer).unwrap();
        assert!(signed.verify().is_err());
    }

    #[test]
    fn transaction_id_is_deterministic() {
        let key = SigningKey::generate();
        let signer = LocalSigner::new(key);
        let signed = sample_transaction(&signer).sign(&signer).unwrap();
        assert_eq!(signed.id().unwrap(), signed.id().unwrap());
    }

    #[test]
    fn different_transactions_have_different_ids() {
        let signer = LocalSigner::random();
        let signed1 = sample_transaction(&signer).sign(&signer).unwrap();
        let mut tx2 = sample_transaction(&signer);
        tx2.instruction = Instruction::Delete { key: "k".into() }.encode();
        let signed2 = tx2.sign(&signer).unwrap();
        assert_ne!(signed1.id().unwrap(), signed2.id().unwrap());
    }

    #[test]
    fn txid_hex_form() {
        let signer = LocalSigner::random();
        let signed = sample_transaction(&signer).sign(&signer).unwrap();
        let id = signed.id().unwrap();
        assert_eq!(id.to_hex().len(), 64);
    }
}
