//! Foundation types for the journal record client.
//!
//! This crate provides the identity, addressing, and record types used
//! throughout the workspace. Every other journal crate depends on
//! `journal-types`.
//!
//! # Key Types
//!
//! - [`Identity`] — Opaque cryptographic public identity of a record owner
//! - [`Address`] — Storage address derived from (program, key, owner)
//! - [`ProgramId`] — Identifier of the on-ledger program that owns records
//! - [`RecordState`] — The persisted wire form of a journal record
//! - [`Record`] — The client-side record with advisory timestamps

pub mod address;
pub mod error;
pub mod identity;
pub mod record;

pub use address::{Address, ProgramId};
pub use error::TypeError;
pub use identity::Identity;
pub use record::{Record, RecordState};
