//! Backend boundary for the journal record client.
//!
//! This crate defines what a compatible keyed-account ledger must provide:
//! - [`Transaction`] / [`SignedTransaction`] — a signed instruction bound to
//!   a program, a derived account address, and a signer identity
//! - [`LedgerBackend`] — the async trait the client drives: fetch an
//!   account, submit a transaction, scan accounts by owner
//! - [`InMemoryLedger`] — an in-process backend that executes instructions
//!   with the same signature, existence, and ownership checks a real ledger
//!   applies; used by tests and local embedding

pub mod error;
pub mod memory;
pub mod traits;
pub mod transaction;

pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use traits::{LedgerBackend, OwnerFilter};
pub use transaction::{Receipt, SignedTransaction, Transaction, TxId};
