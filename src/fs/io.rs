use crate::fs::consts::STORAGE_BASE_ADDRESS;
use crate::fs::error::{FsError, FsResult};

/// The simulated disk: a fixed-length byte buffer split into blocks.
pub struct Storage {
    bytes: Vec<u8>,
    block_size: u32,
}

impl Storage {
    pub fn new(capacity: u32, block_size: u32) -> Self {
        Self {
            bytes: vec![0u8; capacity as usize],
            block_size,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.bytes.len() as u32
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Byte offset of the first byte of `block_index`.
    pub fn block_offset(&self, block_index: u32) -> u32 {
        block_index.saturating_mul(self.block_size)
    }

    /// Logical address of an arena offset, used as an extent-index key.
    pub fn address_of(&self, offset: u32) -> u32 {
        STORAGE_BASE_ADDRESS + offset
    }

    fn range(&self, offset: u32, len: u32) -> FsResult<std::ops::Range<usize>> {
        let start = offset as usize;
        let end = start + len as usize;
        if end > self.bytes.len() {
            return Err(FsError::no_space(format!(
                "byte range {start}..{end} exceeds storage of {} bytes",
                self.bytes.len()
            )));
        }
        Ok(start..end)
    }

    /// Copies `buf` into the arena at `offset`; the rest of the span up to
    /// `span_len` is zeroed when `buf` is shorter.
    pub fn write_span(&mut self, offset: u32, span_len: u32, buf: &[u8]) -> FsResult<()> {
        let range = self.range(offset, span_len)?;
        let span = &mut self.bytes[range];
        let copied = buf.len().min(span.len());
        span[..copied].copy_from_slice(&buf[..copied]);
        span[copied..].fill(0);
        Ok(())
    }

    pub fn read_span(&self, offset: u32, len: u32) -> FsResult<&[u8]> {
        let range = self.range(offset, len)?;
        Ok(&self.bytes[range])
    }

    /// Moves `len` bytes from `from` to `to`; overlapping spans are fine.
    pub fn move_span(&mut self, from: u32, to: u32, len: u32) -> FsResult<()> {
        let src = self.range(from, len)?;
        self.range(to, len)?;
        self.bytes.copy_within(src, to as usize);
        Ok(())
    }

    pub fn zero_span(&mut self, offset: u32, len: u32) -> FsResult<()> {
        let range = self.range(offset, len)?;
        self.bytes[range].fill(0);
        Ok(())
    }
}
