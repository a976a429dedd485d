pub const STORAGE_SIZE_IN_BYTES: u32 = 1000;
pub const DEFAULT_BYTES_PER_BLOCK: u32 = 1;
pub const MAX_DESCRIPTORS: u32 = 4096;

// Logical address of arena byte 0; content handle 0 means "no extent".
pub const STORAGE_BASE_ADDRESS: u32 = 0x1000;

pub const OPEN_ID_SHIFT: u32 = 0;
pub const OPEN_SLOT_SHIFT: u32 = 16;
pub const OPEN_FIELD_MASK: u32 = 0xFFFF;

pub const PATH_ROOT: &str = "root";
pub const PATH_CURRENT: &str = ".";
pub const PATH_PARENT: &str = "..";
pub const PATH_DELIM: char = '/';

pub const MAX_SYMLINK_DEPTH: usize = 8;
