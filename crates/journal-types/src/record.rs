use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// The persisted wire form of a journal record.
///
/// This is exactly what the backend stores behind the account
/// discriminator: owner, key, body. No timestamps exist on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordState {
    pub owner: Identity,
    pub key: String,
    pub body: String,
}

impl RecordState {
    pub fn new(owner: Identity, key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            owner,
            key: key.into(),
            body: body.into(),
        }
    }
}

/// A journal record as seen by the caller.
///
/// `created_at` and `updated_at` are advisory and client-local: the backend
/// persists no timestamps, so they are stamped when the record is decoded
/// and do not survive across sessions. Callers must not treat them as
/// durable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub body: String,
    pub owner: Identity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Build a client-side record from its wire form, stamping both
    /// advisory timestamps with the current time.
    pub fn from_state(state: RecordState) -> Self {
        let now = Utc::now();
        Self {
            key: state.key,
            body: state.body,
            owner: state.owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// The wire form of this record (timestamps dropped).
    pub fn to_state(&self) -> RecordState {
        RecordState {
            owner: self.owner,
            key: self.key.clone(),
            body: self.body.clone(),
        }
    }
}
