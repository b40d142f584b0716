//! Ping-pong index logic for the blur buffers.
//!
//! `PingPong` tracks which of the two blur buffers the next pass writes and
//! which it reads. Calling `swap()` after each pass flips them. Pure index
//! math with no GPU dependency.

/// Tracks the write/read indices for the pair of blur buffers. The invariant
/// `write_index() + read_index() == 1` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingPong {
    write: usize,
}

impl PingPong {
    /// Starts writing buffer 0 (and reading buffer 1).
    pub fn new() -> Self {
        Self { write: 0 }
    }

    /// Index of the buffer the next pass renders into.
    pub fn write_index(&self) -> usize {
        self.write
    }

    /// Index of the buffer the next pass samples.
    pub fn read_index(&self) -> usize {
        1 - self.write
    }

    /// Flips write and read, so the buffer just written becomes the source.
    pub fn swap(&mut self) {
        self.write = 1 - self.write;
    }
}

impl Default for PingPong {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_write_is_zero_read_is_one() {
        let pp = PingPong::new();
        assert_eq!(pp.write_index(), 0);
        assert_eq!(pp.read_index(), 1);
    }

    #[test]
    fn swap_flips_write_and_read() {
        let mut pp = PingPong::new();
        pp.swap();
        assert_eq!(pp.write_index(), 1, "after swap, write should be 1");
        assert_eq!(pp.read_index(), 0, "after swap, read should be 0");
    }

    #[test]
    fn write_plus_read_invariant_holds_over_100_swaps() {
        let mut pp = PingPong::new();
        for i in 0..100 {
            assert_eq!(
                pp.write_index() + pp.read_index(),
                1,
                "invariant broken at swap {i}"
            );
            pp.swap();
        }
    }

    #[test]
    fn buffer_written_is_read_after_swap() {
        let mut pp = PingPong::new();
        for _ in 0..7 {
            let written = pp.write_index();
            pp.swap();
            assert_eq!(pp.read_index(), written);
        }
    }
}
