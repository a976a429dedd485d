use crate::fs::consts::{DEFAULT_BYTES_PER_BLOCK, STORAGE_BASE_ADDRESS, STORAGE_SIZE_IN_BYTES};
use crate::fs::error::{FsError, FsResult};

/// Where `read` starts copying bytes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadOrigin {
    /// Bytes always start at the extent base; `offset` only takes part in
    /// the bound check.
    #[default]
    ExtentBase,
    /// Bytes start at extent base + `offset`.
    Offset,
}

/// Geometry and behaviour the engine is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsConfig {
    pub capacity: u32,
    pub bytes_per_block: u32,
    pub read_origin: ReadOrigin,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            capacity: STORAGE_SIZE_IN_BYTES,
            bytes_per_block: DEFAULT_BYTES_PER_BLOCK,
            read_origin: ReadOrigin::default(),
        }
    }
}

impl FsConfig {
    pub fn validate(&self) -> FsResult<()> {
        if self.capacity == 0 {
            return Err(FsError::invalid("capacity must be nonzero"));
        }
        // arena offsets must stay addressable above the logical base
        if self.capacity > u32::MAX - STORAGE_BASE_ADDRESS {
            return Err(FsError::invalid(format!(
                "capacity must be at most {} bytes",
                u32::MAX - STORAGE_BASE_ADDRESS
            )));
        }
        if self.bytes_per_block == 0 {
            return Err(FsError::invalid("block size must be nonzero"));
        }
        if self.bytes_per_block > self.capacity {
            return Err(FsError::invalid("block size larger than capacity"));
        }
        Ok(())
    }

    /// Blocks needed to cover the whole arena (last block may be partial).
    pub fn block_count(&self) -> u32 {
        self.capacity.div_ceil(self.bytes_per_block)
    }

    /// Blocks needed to hold `bytes` bytes.
    pub fn blocks_for(&self, bytes: u32) -> u32 {
        bytes.div_ceil(self.bytes_per_block)
    }
}
