use journal_types::{Identity, RecordState};

use crate::error::CodecError;
use crate::wire::{write_string, Reader};

/// Account discriminator identifying a stored journal record.
///
/// Matches the deployed program's published value; any account whose first
/// eight bytes differ is some other account kind and must be rejected.
pub const RECORD_DISCRIMINATOR: [u8; 8] = [113, 86, 110, 124, 140, 14, 58, 66];

/// Byte offset of the owner field, immediately after the discriminator.
/// Owner-scoped scans compare 32 bytes at this offset server-side.
pub const OWNER_OFFSET: usize = RECORD_DISCRIMINATOR.len();

/// Encode a record into the account layout:
/// `[discriminator][owner][key len + key][body len + body]`.
pub fn encode_record(state: &RecordState) -> Vec<u8> {
    let mut buf =
        Vec::with_capacity(RECORD_DISCRIMINATOR.len() + 32 + 8 + state.key.len() + state.body.len());
    buf.extend_from_slice(&RECORD_DISCRIMINATOR);
    buf.extend_from_slice(state.owner.as_bytes());
    write_string(&mut buf, &state.key);
    write_string(&mut buf, &state.body);
    buf
}

/// Decode the account layout back into a [`RecordState`].
///
/// Validates the discriminator first and fails closed on a mismatch. The
/// total length is variable; truncation, bad UTF-8, and trailing garbage
/// are each distinct errors.
pub fn decode_record(data: &[u8]) -> Result<RecordState, CodecError> {
    let mut reader = Reader::new(data);
    let discriminator = reader.take_array::<8>()?;
    if discriminator != RECORD_DISCRIMINATOR {
        return Err(CodecError::UnknownDiscriminator {
            found: discriminator,
        });
    }
    let owner = Identity::from_bytes(reader.take_array::<32>()?);
    let key = reader.read_string("key")?;
    let body = reader.read_string("body")?;
    reader.finish()?;
    Ok(RecordState { owner, key, body })
}
