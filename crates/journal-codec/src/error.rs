use thiserror::Error;

/// Errors from encoding or decoding the binary layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unknown discriminator: {found:02x?}")]
    UnknownDiscriminator { found: [u8; 8] },

    #[error("truncated input: needed {needed} bytes, have {have}")]
    Truncated { needed: usize, have: usize },

    #[error("invalid utf-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{extra} trailing bytes after the last field")]
    TrailingBytes { extra: usize },
}
