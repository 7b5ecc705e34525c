use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use journal_codec::{decode_record, encode_record, Instruction};
use journal_types::{Address, ProgramId, RecordState};

use crate::error::{LedgerError, LedgerResult};
use crate::traits::{LedgerBackend, OwnerFilter};
use crate::transaction::{Receipt, SignedTransaction};

/// In-memory ledger for tests, local demos, and embedding.
///
/// Executes submitted instructions with the checks a real keyed-account
/// ledger applies: signature verification against the declared signer,
/// create-into-vacant, update/delete-require-existing, and stored owner
/// equals signer for mutations of an existing account.
pub struct InMemoryLedger {
    program: ProgramId,
    inner: RwLock<HashMap<Address, Vec<u8>>>,
}

impl InMemoryLedger {
    pub fn new(program: ProgramId) -> Self {
        Self {
            program,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live accounts. Test convenience.
    pub fn account_count(&self) -> LedgerResult<usize> {
        let accounts = self.inner.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(accounts.len())
    }

    fn execute(&self, tx: &SignedTransaction) -> LedgerResult<Receipt> {
        tx.verify()?;

        if tx.transaction.program != self.program {
            return Err(LedgerError::UnknownProgram);
        }

        let instruction = Instruction::decode(&tx.transaction.instruction)?;
        let signer = tx.transaction.signer;
        let declared = tx.transaction.account;

        let mut accounts = self.inner.write().map_err(|_| LedgerError::LockPoisoned)?;

        match &instruction {
            Instruction::Create { key, body } => {
                // Create allocates at the address derived from the signer;
                // a transaction declaring any other account is malformed.
                let expected = Address::derive(&self.program, key, &signer);
                if declared != expected {
                    return Err(LedgerError::AddressMismatch { expected, declared });
                }
                if accounts.contains_key(&declared) {
                    return Err(LedgerError::AccountInUse { address: declared });
                }
                let state = RecordState::new(signer, key.clone(), body.clone());
                accounts.insert(declared, encode_record(&state));
            }
            Instruction::Update { key, body } => {
                let data = accounts
                    .get(&declared)
                    .ok_or(LedgerError::AccountNotFound { address: declared })?;
                let mut state = decode_record(data)?;
                // The declared account must be the one (key, stored owner)
                // derives to, so an instruction cannot alias another record.
                let expected = Address::derive(&self.program, key, &state.owner);
                if declared != expected {
                    return Err(LedgerError::AddressMismatch { expected, declared });
                }
                if state.owner != signer {
                    return Err(LedgerError::OwnerMismatch { address: declared });
                }
                state.body = body.clone();
                accounts.insert(declared, encode_record(&state));
            }
            Instruction::Delete { key } => {
                let data = accounts
                    .get(&declared)
                    .ok_or(LedgerError::AccountNotFound { address: declared })?;
                let state = decode_record(data)?;
                let expected = Address::derive(&self.program, key, &state.owner);
                if declared != expected {
                    return Err(LedgerError::AddressMismatch { expected, declared });
                }
                if state.owner != signer {
                    return Err(LedgerError::OwnerMismatch { address: declared });
                }
                accounts.remove(&declared);
            }
        }

        let transaction_id = tx.id()?;
        tracing::debug!(
            op = %instruction.operation(),
            address = %declared,
            tx = %transaction_id,
            "executed instruction"
        );

        Ok(Receipt {
            transaction_id,
            address: declared,
        })
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(ProgramId::JOURNAL)
    }
}

#[async_trait]
impl LedgerBackend for InMemoryLedger {
    async fn get_account(&self, address: &Address) -> LedgerResult<Option<Vec<u8>>> {
        let accounts = self.inner.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(accounts.get(address).cloned())
    }

    async fn submit(&self, tx: &SignedTransaction) -> LedgerResult<Receipt> {
        self.execute(tx)
    }

    async fn scan_by_owner(&self, filter: &OwnerFilter) -> LedgerResult<Vec<(Address, Vec<u8>)>> {
        let accounts = self.inner.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(accounts
            .iter()
            .filter(|(_, data)| filter.matches(data))
            .map(|(address, data)| (*address, data.clone()))
            .collect())
    }
}
