//! Shared primitives for the fixed binary layouts: u32-LE length-prefixed
//! strings and a bounds-checked reader.

use crate::error::CodecError;

/// Append a length-prefixed UTF-8 string.
pub(crate) fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Bounds-checked sequential reader over a byte slice.
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos.checked_add(n).ok_or(CodecError::Truncated {
            needed: usize::MAX,
            have: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(CodecError::Truncated {
                needed: end,
                have: self.data.len(),
            });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let slice = self.take(N)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(slice);
        Ok(arr)
    }

    /// Read a u32-LE length-prefixed UTF-8 string.
    pub(crate) fn read_string(&mut self, field: &'static str) -> Result<String, CodecError> {
        let len = u32::from_le_bytes(self.take_array::<4>()?) as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { field })
    }

    /// Fail if any input remains unconsumed.
    pub(crate) fn finish(self) -> Result<(), CodecError> {
        let extra = self.data.len() - self.pos;
        if extra > 0 {
            return Err(CodecError::TrailingBytes { extra });
        }
        Ok(())
    }
}
