use std::sync::Arc;

use journal_codec::{decode_record, Instruction, Operation};
use journal_crypto::TransactionSigner;
use journal_ledger::{LedgerBackend, OwnerFilter, Receipt, Transaction};
use journal_types::{Address, Identity, ProgramId, Record};

use crate::error::{ClientError, ClientResult};

/// The keyed record client.
///
/// Stateless: every call derives its storage address fresh from
/// `(program, key, owner)` and performs one exchange with the backend. The
/// only shared resource is the injected signer capability; mutations
/// require one, reads and listings do not. Calls never retry internally.
pub struct JournalClient<B> {
    program: ProgramId,
    backend: B,
    signer: Option<Arc<dyn TransactionSigner>>,
}

impl<B: LedgerBackend> JournalClient<B> {
    /// Client for the deployed journal program, with no signer attached.
    /// Reads and listings work; mutations fail with `NotAuthenticated`.
    pub fn new(backend: B) -> Self {
        Self::with_program(ProgramId::JOURNAL, backend)
    }

    pub fn with_program(program: ProgramId, backend: B) -> Self {
        Self {
            program,
            backend,
            signer: None,
        }
    }

    /// Attach the caller's signer capability.
    pub fn with_signer(mut self, signer: Arc<dyn TransactionSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// The attached caller identity, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.signer.as_ref().map(|s| s.identity())
    }

    /// The address a record with `key` owned by `owner` lives at.
    pub fn derive_address(&self, key: &str, owner: &Identity) -> Address {
        Address::derive(&self.program, key, owner)
    }

    /// Create a new record at the address derived from the caller and
    /// `key`. Fails with `AlreadyExists` when that address is occupied.
    pub async fn create(&self, key: &str, body: &str) -> ClientResult<Receipt> {
        let signer = self.require_signer()?;
        let key = non_empty(key, "key")?;
        let body = non_empty(body, "body")?;

        let owner = signer.identity();
        let address = self.derive_address(key, &owner);
        let instruction = Instruction::Create {
            key: key.to_owned(),
            body: body.to_owned(),
        };
        tracing::debug!(%address, owner = %owner, "submitting create");
        self.submit(signer, address, owner, instruction, Operation::Create)
            .await
    }

    /// Fetch and decode the record with `key` owned by `owner`.
    ///
    /// The key is trimmed exactly as the mutations trim it, so every
    /// operation agrees on which address a padded key derives to.
    pub async fn read(&self, key: &str, owner: &Identity) -> ClientResult<Record> {
        let address = self.derive_address(key.trim(), owner);
        let data = self
            .backend
            .get_account(&address)
            .await
            .map_err(ClientError::from)?
            .ok_or(ClientError::NotFound)?;
        let state = decode_record(&data)?;
        // The stored owner must be the identity the address was derived
        // from; anything else means collision or corruption.
        if state.owner != *owner {
            return Err(ClientError::CorruptRecord {
                address,
                stored: state.owner,
                expected: *owner,
            });
        }
        Ok(Record::from_state(state))
    }

    /// Overwrite the body of the caller's record with `key`, in place.
    /// Key and owner are immutable after creation.
    pub async fn update(&self, key: &str, body: &str) -> ClientResult<Receipt> {
        let signer = self.require_signer()?;
        let key = non_empty(key, "key")?;
        let body = non_empty(body, "body")?;

        let owner = signer.identity();
        let address = self.derive_address(key, &owner);
        let instruction = Instruction::Update {
            key: key.to_owned(),
            body: body.to_owned(),
        };
        tracing::debug!(%address, owner = %owner, "submitting update");
        self.submit(signer, address, owner, instruction, Operation::Update)
            .await
    }

    /// Delete the caller's record with `key`, freeing its address for
    /// reuse and refunding any locked resources to the caller.
    pub async fn delete(&self, key: &str) -> ClientResult<Receipt> {
        let signer = self.require_signer()?;
        let key = non_empty(key, "key")?;

        let owner = signer.identity();
        let address = self.derive_address(key, &owner);
        let instruction = Instruction::Delete { key: key.to_owned() };
        tracing::debug!(%address, owner = %owner, "submitting delete");
        self.submit(signer, address, owner, instruction, Operation::Delete)
            .await
    }

    /// All records owned by `owner`, filtered server-side at the owner
    /// field's fixed offset. Backend ordering is unspecified, so results
    /// are sorted lexicographically by key for deterministic output. A
    /// record that fails to decode is surfaced as an error, never skipped.
    pub async fn list_by_owner(&self, owner: &Identity) -> ClientResult<Vec<Record>> {
        let filter = OwnerFilter::records(*owner);
        let accounts = self
            .backend
            .scan_by_owner(&filter)
            .await
            .map_err(ClientError::from)?;
        tracing::debug!(owner = %owner, count = accounts.len(), "owner scan complete");

        let mut records = Vec::with_capacity(accounts.len());
        for (_, data) in &accounts {
            let state = decode_record(data)?;
            records.push(Record::from_state(state));
        }
        records.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(records)
    }

    fn require_signer(&self) -> ClientResult<&Arc<dyn TransactionSigner>> {
        self.signer.as_ref().ok_or(ClientError::NotAuthenticated)
    }

    async fn submit(
        &self,
        signer: &Arc<dyn TransactionSigner>,
        address: Address,
        owner: Identity,
        instruction: Instruction,
        operation: Operation,
    ) -> ClientResult<Receipt> {
        let encoded = instruction.encode();
        // A payload carrying the wrong discriminator must never reach the
        // backend, where it would execute as a different operation.
        Instruction::check_discriminator(&encoded, operation)
            .map_err(|e| ClientError::InvalidArgument(e.to_string()))?;

        let tx = Transaction::new(self.program, address, owner, encoded)
            .sign(signer.as_ref())
            .map_err(ClientError::from)?;
        self.backend.submit(&tx).await.map_err(ClientError::from)
    }
}

/// Trim and reject empty input before any network interaction.
fn non_empty<'a>(value: &'a str, field: &str) -> ClientResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidArgument(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed)
}
