use crate::fs::error::{FsError, FsResult};
use std::fmt;

/// State of a single block as recorded in the bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Free,
    Allocated,
}

/// Block bitmap: a set bit means the block is free, a clear bit means it is
/// allocated. Bits past `num_bits` in the last byte are never consulted.
pub struct Bitmap {
    map: Vec<u8>,
    num_bits: u32,
}

impl Bitmap {
    /// Creates a bitmap of `num_bits` blocks, all free.
    pub fn new(num_bits: u32) -> Self {
        let num_bytes = num_bits.div_ceil(8) as usize;
        Self {
            map: vec![0xFF; num_bytes],
            num_bits,
        }
    }

    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    fn is_free(&self, index: u32) -> bool {
        let byte = (index / 8) as usize;
        let mask = 1u8 << (index % 8);
        self.map[byte] & mask != 0
    }

    /// Point query. An index past the last block is an error, not a panic.
    pub fn bit_at(&self, index: u32) -> FsResult<BlockState> {
        if index >= self.num_bits {
            return Err(FsError::invalid(format!(
                "block {index} out of range (bitmap has {} blocks)",
                self.num_bits
            )));
        }
        Ok(if self.is_free(index) {
            BlockState::Free
        } else {
            BlockState::Allocated
        })
    }

    /// Marks `length` blocks starting at `start` free or allocated.
    /// Stops silently at the end of the bitmap.
    pub fn mark_range(&mut self, start: u32, length: u32, free: bool) {
        let end = start.saturating_add(length).min(self.num_bits);
        for index in start..end {
            let byte = (index / 8) as usize;
            let mask = 1u8 << (index % 8);
            if free {
                self.map[byte] |= mask;
            } else {
                self.map[byte] &= !mask;
            }
        }
    }

    /// First-fit search: start of the first run of `size` consecutive free
    /// blocks, scanning from block 0.
    pub fn find_free_run(&self, size: u32) -> Option<u32> {
        if size == 0 {
            return None;
        }
        let mut run = 0u32;
        for index in 0..self.num_bits {
            if self.is_free(index) {
                run += 1;
                if run == size {
                    return Some(index + 1 - size);
                }
            } else {
                run = 0;
            }
        }
        None
    }

    pub fn free_count(&self) -> u32 {
        (0..self.num_bits).filter(|&i| self.is_free(i)).count() as u32
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.num_bits {
            if index > 0 && index % 64 == 0 {
                writeln!(f)?;
            }
            write!(f, "{}", if self.is_free(index) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bitmap_is_all_free() {
        let bm = Bitmap::new(13);
        assert_eq!(bm.num_bits(), 13);
        assert_eq!(bm.free_count(), 13);
        assert_eq!(bm.find_free_run(13), Some(0));
        assert_eq!(bm.find_free_run(14), None);
    }

    #[test]
    fn mark_then_release_restores_free() {
        let mut bm = Bitmap::new(32);
        bm.mark_range(5, 10, false);
        for i in 5..15 {
            assert_eq!(bm.bit_at(i).unwrap(), BlockState::Allocated);
        }
        assert_eq!(bm.bit_at(4).unwrap(), BlockState::Free);
        assert_eq!(bm.bit_at(15).unwrap(), BlockState::Free);

        bm.mark_range(5, 10, true);
        for i in 5..15 {
            assert_eq!(bm.bit_at(i).unwrap(), BlockState::Free);
        }
        assert_eq!(bm.free_count(), 32);
    }

    #[test]
    fn mark_range_clamps_at_end() {
        let mut bm = Bitmap::new(10);
        bm.mark_range(8, 100, false);
        assert_eq!(bm.bit_at(8).unwrap(), BlockState::Allocated);
        assert_eq!(bm.bit_at(9).unwrap(), BlockState::Allocated);
        assert_eq!(bm.free_count(), 8);
        bm.mark_range(u32::MAX, 5, false);
        assert_eq!(bm.free_count(), 8);
    }

    #[test]
    fn bit_at_out_of_range_is_error() {
        let bm = Bitmap::new(10);
        assert!(matches!(bm.bit_at(10), Err(FsError::InvalidOperation(_))));
    }

    #[test]
    fn first_fit_skips_short_runs() {
        let mut bm = Bitmap::new(20);
        // free: 0..2, allocated: 2, free: 3..6, allocated: 6..8, free: 8..20
        bm.mark_range(2, 1, false);
        bm.mark_range(6, 2, false);
        assert_eq!(bm.find_free_run(2), Some(0));
        assert_eq!(bm.find_free_run(3), Some(3));
        assert_eq!(bm.find_free_run(4), Some(8));
        assert_eq!(bm.find_free_run(12), Some(8));
        assert_eq!(bm.find_free_run(13), None);
        assert_eq!(bm.find_free_run(0), None);
    }

    #[test]
    fn found_runs_are_entirely_free() {
        let mut bm = Bitmap::new(64);
        for start in [1, 7, 9, 20, 33, 34, 50] {
            bm.mark_range(start, 2, false);
        }
        for n in 1..10 {
            if let Some(start) = bm.find_free_run(n) {
                for i in start..start + n {
                    assert_eq!(bm.bit_at(i).unwrap(), BlockState::Free);
                }
            }
        }
    }

    #[test]
    fn display_renders_one_char_per_block() {
        let mut bm = Bitmap::new(4);
        bm.mark_range(1, 1, false);
        assert_eq!(bm.to_string(), "1011");
    }
}
