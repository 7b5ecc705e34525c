use async_trait::async_trait;
use journal_codec::{OWNER_OFFSET, RECORD_DISCRIMINATOR};
use journal_types::{Address, Identity};

use crate::error::LedgerResult;
use crate::transaction::{Receipt, SignedTransaction};

/// Server-side filter for owner-scoped account scans.
///
/// Matches accounts of one discriminator whose owner bytes at a fixed
/// offset equal the given identity. Applied by the backend, so a client
/// never downloads other owners' accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerFilter {
    pub discriminator: [u8; 8],
    pub offset: usize,
    pub owner: Identity,
}

impl OwnerFilter {
    /// Filter for journal record accounts owned by `owner`.
    pub fn records(owner: Identity) -> Self {
        Self {
            discriminator: RECORD_DISCRIMINATOR,
            offset: OWNER_OFFSET,
            owner,
        }
    }

    /// Whether raw account bytes satisfy this filter.
    pub fn matches(&self, data: &[u8]) -> bool {
        if data.len() < self.offset + 32 {
            return false;
        }
        data[..8] == self.discriminator
            && data[self.offset..self.offset + 32] == self.owner.as_bytes()[..]
    }
}

/// The ledger a record client drives.
///
/// One outstanding mutation per caller is assumed; the backend's own
/// conflict resolution governs concurrent conflicting submissions and the
/// client surfaces whichever result comes back. All methods may suspend
/// for a network round trip; no timeouts are imposed here.
#[async_trait]
pub trait LedgerBackend: Send + Sync {
    /// Raw bytes of the account at `address`, or `None` if vacant.
    async fn get_account(&self, address: &Address) -> LedgerResult<Option<Vec<u8>>>;

    /// Execute one signed transaction. At-least-once semantics: the caller
    /// owns any retry policy.
    async fn submit(&self, tx: &SignedTransaction) -> LedgerResult<Receipt>;

    /// All accounts matching the filter, in backend-defined (unspecified)
    /// order.
    async fn scan_by_owner(&self, filter: &OwnerFilter) -> LedgerResult<Vec<(Address, Vec<u8>)>>;
}

#[async_trait]
impl<T: LedgerBackend + ?Sized> LedgerBackend for std::sync::Arc<T> {
    async fn get_account(&self, address: &Address) -> LedgerResult<Option<Vec<u8>>> {
        (**self).get_account(address).await
    }

    async fn submit(&self, tx: &SignedTransaction) -> LedgerResult<Receipt> {
        (**self).submit(tx).await
    }

    async fn scan_by_owner(&self, filter: &OwnerFilter) -> LedgerResult<Vec<(Address, Vec<u8>)>> {
        (**self).scan_by_owner(filter).await
    }
}
