//! Binary layouts for journal records.
//!
//! Two fixed, versioned layouts live here, both keyed by 8-byte
//! discriminators matching the deployed program:
//!
//! - the account layout ([`encode_record`] / [`decode_record`]): what is
//!   stored at a derived address;
//! - the instruction layout ([`Instruction`]): what a submitted transaction
//!   carries for create, update, and delete.
//!
//! Decoding fails closed: an unknown discriminator is an error, never a
//! best-effort guess.

pub mod account;
pub mod error;
pub mod instruction;
mod wire;

pub use account::{decode_record, encode_record, OWNER_OFFSET, RECORD_DISCRIMINATOR};
pub use error::CodecError;
pub use instruction::{Instruction, Operation};
