use journal_types::Address;
use thiserror::Error;

/// Errors produced by ledger submission and query operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account {address} already in use")]
    AccountInUse { address: Address },

    #[error("account {address} not found")]
    AccountNotFound { address: Address },

    #[error("account {address} is not owned by the transaction signer")]
    OwnerMismatch { address: Address },

    #[error("transaction signature does not verify for the declared signer")]
    InvalidSignature,

    #[error("declared account {declared} does not match derived address {expected}")]
    AddressMismatch { expected: Address, declared: Address },

    #[error("transaction targets an unknown program")]
    UnknownProgram,

    #[error("instruction codec: {0}")]
    Codec(#[from] journal_codec::CodecError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

pub type LedgerResult<T> = Result<T, LedgerError>;
