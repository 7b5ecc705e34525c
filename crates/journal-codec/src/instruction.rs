use std::fmt;

use crate::error::CodecError;
use crate::wire::{write_string, Reader};

/// The three mutating operations, each with its own fixed 8-byte
/// discriminator matching the deployed program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    /// The wire discriminator for this operation.
    pub const fn discriminator(&self) -> [u8; 8] {
        match self {
            Self::Create => [48, 65, 201, 186, 25, 41, 127, 0],
            Self::Update => [113, 164, 49, 62, 43, 83, 194, 172],
            Self::Delete => [156, 50, 93, 5, 157, 97, 188, 114],
        }
    }

    /// Look up an operation by discriminator. `None` for unknown bytes.
    pub fn from_discriminator(discriminator: [u8; 8]) -> Option<Self> {
        [Self::Create, Self::Update, Self::Delete]
            .into_iter()
            .find(|op| op.discriminator() == discriminator)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A decoded instruction: the operation plus its arguments.
///
/// Encoded form is `[discriminator][key len + key]` for delete, with a
/// length-prefixed body appended for create and update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Create { key: String, body: String },
    Update { key: String, body: String },
    Delete { key: String },
}

impl Instruction {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Create { .. } => Operation::Create,
            Self::Update { .. } => Operation::Update,
            Self::Delete { .. } => Operation::Delete,
        }
    }

    /// The record key this instruction targets. Every operation carries
    /// one, since the key is half of the address derivation.
    pub fn key(&self) -> &str {
        match self {
            Self::Create { key, .. } | Self::Update { key, .. } | Self::Delete { key } => key,
        }
    }

    /// Encode into the fixed instruction layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.operation().discriminator());
        match self {
            Self::Create { key, body } | Self::Update { key, body } => {
                write_string(&mut buf, key);
                write_string(&mut buf, body);
            }
            Self::Delete { key } => {
                write_string(&mut buf, key);
            }
        }
        buf
    }

    /// Decode an encoded instruction, failing closed on an unknown
    /// discriminator.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(data);
        let discriminator = reader.take_array::<8>()?;
        let operation = Operation::from_discriminator(discriminator).ok_or(
            CodecError::UnknownDiscriminator {
                found: discriminator,
            },
        )?;
        let instruction = match operation {
            Operation::Create => Self::Create {
                key: reader.read_string("key")?,
                body: reader.read_string("body")?,
            },
            Operation::Update => Self::Update {
                key: reader.read_string("key")?,
                body: reader.read_string("body")?,
            },
            Operation::Delete => Self::Delete {
                key: reader.read_string("key")?,
            },
        };
        reader.finish()?;
        Ok(instruction)
    }

    /// Confirm that encoded bytes carry the discriminator of `expected`.
    ///
    /// Run before submission so a mis-built payload is rejected locally
    /// instead of being coerced into some other operation by the backend.
    pub fn check_discriminator(data: &[u8], expected: Operation) -> Result<(), CodecError> {
        let mut reader = Reader::new(data);
        let found = reader.take_array::<8>()?;
        if found != expected.discriminator() {
            return Err(CodecError::UnknownDiscriminator { found });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_are_unique() {
        let mut tags = vec![
            Operation::Create.discriminator(),
            Operation::Update.discriminator(),
            Operation::Delete.discriminator(),
        ];
        let len = tags.len();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), len);
    }

    #[test]
    fn from_discriminator_roundtrip() {
        for op in [Operation::Create, Operation::Update, Operation::Delete] {
            assert_eq!(Operation::from_discriminator(op.discriminator()), Some(op));
        }
        assert_eq!(Operation::from_discriminator([0; 8]), None);
    }

    #[test]
    fn create_roundtrip() {
        let ix = Instruction::Create {
            key: "day-one".into(),
            body: "first entry".into(),
        };
        assert_eq!(Instruction::decode(&ix.encode()).unwrap(), ix);
    }

    #[test]
    fn update_roundtrip() {
        let ix = Instruction::Update {
            key: "day-one".into(),
            body: "revised".into(),
        };
        assert_eq!(Instruction::decode(&ix.encode()).unwrap(), ix);
    }

    #[test]
    fn delete_roundtrip() {
        let ix = Instruction::Delete { key: "day-one".into() };
        assert_eq!(Instruction::decode(&ix.encode()).unwrap(), ix);
    }

    #[test]
    fn delete_carries_no_body() {
        let with_body = Instruction::Create {
            key: "k".into(),
            body: "b".into(),
        };
        let without = Instruction::Delete { key: "k".into() };
        assert!(without.encode().len() < with_body.encode().len());
    }

    #[test]
    fn unknown_discriminator_fails_closed() {
        let mut data = Instruction::Delete { key: "k".into() }.encode();
        data[3] ^= 0x55;
        assert!(matches!(
            Instruction::decode(&data).unwrap_err(),
            CodecError::UnknownDiscriminator { .. }
        ));
    }

    #[test]
    fn check_discriminator_accepts_matching_operation() {
        let data = Instruction::Update {
            key: "k".into(),
            body: "b".into(),
        }
        .encode();
        Instruction::check_discriminator(&data, Operation::Update).unwrap();
    }

    #[test]
    fn check_discriminator_rejects_mismatched_operation() {
        let data = Instruction::Delete { key: "k".into() }.encode();
        let err = Instruction::check_discriminator(&data, Operation::Create).unwrap_err();
        assert!(matches!(err, CodecError::UnknownDiscriminator { .. }));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut data = Instruction::Delete { key: "k".into() }.encode();
        data.extend_from_slice(&[9, 9]);
        assert_eq!(
            Instruction::decode(&data).unwrap_err(),
            CodecError::TrailingBytes { extra: 2 }
        );
    }
}
