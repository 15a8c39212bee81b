//! Fixed-width little-endian cursors over instruction payloads.
//!
//! `WriteCursor` borrows a buffer that was allocated at its final length and
//! tracks the offset itself, so callers never thread offsets by hand. Running
//! past the end of the buffer is a schema violation: the layout and the
//! allocation disagree, which is a codec bug.
//!
//! `ReadCursor` is the decoding mirror. Running out of input there is a caller
//! problem (malformed payload), not a schema violation.

use crate::error::BatchError;
use solana_pubkey::Pubkey;

pub(crate) struct WriteCursor<'a> {
    buf: &'a mut [u8],
    offset: usize,
}

impl<'a> WriteCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        WriteCursor { buf, offset: 0 }
    }

    /// Copy `bytes` at the current offset and return the next free offset.
    fn put(&mut self, bytes: &[u8]) -> Result<usize, BatchError> {
        let end = self.offset + bytes.len();
        let len = self.buf.len();
        let dst = self
            .buf
            .get_mut(self.offset..end)
            .ok_or(BatchError::SchemaViolation {
                expected: len,
                actual: end,
            })?;
        dst.copy_from_slice(bytes);
        self.offset = end;
        Ok(end)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<usize, BatchError> {
        self.put(&[value])
    }

    pub fn write_u32_le(&mut self, value: u32) -> Result<usize, BatchError> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_u64_le(&mut self, value: u64) -> Result<usize, BatchError> {
        self.put(&value.to_le_bytes())
    }

    /// Raw 32-byte copy, no encoding.
    pub fn write_pubkey(&mut self, key: &Pubkey) -> Result<usize, BatchError> {
        self.put(key.as_ref())
    }

    /// Ensure every byte of the buffer was written.
    pub fn finish(self) -> Result<(), BatchError> {
        if self.offset != self.buf.len() {
            return Err(BatchError::SchemaViolation {
                expected: self.buf.len(),
                actual: self.offset,
            });
        }
        Ok(())
    }
}

pub(crate) struct ReadCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ReadCursor { data, offset: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], BatchError> {
        let end = self.offset + N;
        let bytes: [u8; N] = self
            .data
            .get(self.offset..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| {
                BatchError::MalformedInstruction(format!(
                    "payload truncated: need {} bytes at offset {}, have {}",
                    N,
                    self.offset,
                    self.data.len()
                ))
            })?;
        self.offset = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, BatchError> {
        self.take::<1>().map(|b| b[0])
    }

    pub fn read_u32_le(&mut self) -> Result<u32, BatchError> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    pub fn read_u64_le(&mut self) -> Result<u64, BatchError> {
        self.take::<8>().map(u64::from_le_bytes)
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey, BatchError> {
        self.take::<32>().map(Pubkey::from)
    }

    /// Ensure the payload had no trailing bytes.
    pub fn finish(self) -> Result<(), BatchError> {
        if self.offset != self.data.len() {
            return Err(BatchError::MalformedInstruction(format!(
                "{} trailing bytes after offset {}",
                self.data.len() - self.offset,
                self.offset
            )));
        }
        Ok(())
    }
}
