//! Caller-facing journal record client.
//!
//! [`JournalClient`] is the façade presentation code drives: keyed
//! create/read/update/delete over records stored at deterministically
//! derived addresses, plus owner-scoped listing. It is stateless — every
//! call derives its address fresh and performs one request/response
//! exchange against the injected [`journal_ledger::LedgerBackend`].

pub mod client;
pub mod error;

pub use client::JournalClient;
pub use error::{ClientError, ClientResult};
