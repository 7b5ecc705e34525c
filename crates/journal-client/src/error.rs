use journal_codec::CodecError;
use journal_ledger::LedgerError;
use journal_types::{Address, Identity};
use thiserror::Error;

/// Errors surfaced to callers of the record client.
///
/// Every failure is terminal for its call: precondition failures would not
/// change on retry, and blind retry of a mutation risks duplicate
/// submission, so any retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("no caller identity attached; connect a signer first")]
    NotAuthenticated,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("a record with this key already exists")]
    AlreadyExists,

    #[error("record not found")]
    NotFound,

    #[error("caller does not own this record")]
    Forbidden,

    #[error("record at {address} is corrupt: stored owner {stored} does not match {expected}")]
    CorruptRecord {
        address: Address,
        stored: Identity,
        expected: Identity,
    },

    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<LedgerError> for ClientError {
    /// Map backend results onto the client taxonomy. Precondition failures
    /// keep their identity; everything else is a submission failure the
    /// caller may retry at its own discretion.
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountInUse { .. } => Self::AlreadyExists,
            LedgerError::AccountNotFound { .. } => Self::NotFound,
            LedgerError::OwnerMismatch { .. } => Self::Forbidden,
            LedgerError::Codec(codec) => Self::Codec(codec),
            other => Self::SubmissionFailed(other.to_string()),
        }
    }
}
