//! The 1024-byte memory array, which doubles as the register file.
//!
//! Registers are fixed memory cells, not separate state: writing address 0
//! changes A, and arithmetic on X updates a flags byte whose top two bits
//! are simultaneously the current page selector. This aliasing is part of
//! the machine's programming model and is preserved exactly.

use std::ops::{Index, IndexMut};

use crate::flags::PAGE_MASK;

/// Total memory size: four 256-byte pages.
pub const MEMORY_SIZE: usize = 1024;

/// Size of one page, and of the original machine's whole address space.
pub const PAGE_SIZE: usize = 256;

/// A accumulator.
pub const REG_A: usize = 0o000;
/// B accumulator.
pub const REG_B: usize = 0o001;
/// X index register.
pub const REG_X: usize = 0o002;
/// Program counter, low 8 bits. Wraps within a page.
pub const REG_P: usize = 0o003;

/// Memory-mapped output port.
pub const REG_OUTPUT: usize = 0o200;
/// Flags for A (bit 0 = overflow, bit 1 = carry).
pub const REG_FLAGS_A: usize = 0o201;
/// Flags for B.
pub const REG_FLAGS_B: usize = 0o202;
/// Flags for X; also holds the current page number in its top two bits.
pub const REG_FLAGS_X: usize = 0o203;
/// Memory-mapped input port.
pub const REG_INPUT: usize = 0o377;

const ADDR_MASK: usize = MEMORY_SIZE - 1;

/// The KENBAK-1 memory: 1024 unsigned 8-bit cells.
///
/// All accesses are masked to stay within the array, so any computed
/// address is valid. Indexing with `[]` applies the same mask.
#[derive(Clone)]
pub struct Memory([u8; MEMORY_SIZE]);

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Create a zero-filled memory.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; MEMORY_SIZE])
    }

    /// Read the byte at `addr` (masked to 0..1024).
    #[must_use]
    pub const fn read(&self, addr: usize) -> u8 {
        self.0[addr & ADDR_MASK]
    }

    /// Write the byte at `addr` (masked to 0..1024).
    pub const fn write(&mut self, addr: usize, value: u8) {
        self.0[addr & ADDR_MASK] = value;
    }

    /// Zero all 1024 bytes, not just the original 256.
    pub fn clear(&mut self) {
        self.0.fill(0);
    }

    /// Copy `image` into memory starting at `origin`, wrapping if it runs
    /// off the end.
    pub fn load(&mut self, origin: usize, image: &[u8]) {
        for (i, &byte) in image.iter().enumerate() {
            self.write(origin + i, byte);
        }
    }

    /// The raw memory array, for bulk inspection (front panel, save state).
    #[must_use]
    pub const fn bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.0
    }

    /// Mutable access to the raw memory array.
    pub const fn bytes_mut(&mut self) -> &mut [u8; MEMORY_SIZE] {
        &mut self.0
    }

    /// Base address of the current page: the top two bits of X's flags
    /// byte, shifted up to bits 8-9 of the address.
    #[must_use]
    pub const fn page_base(&self) -> usize {
        ((self.0[REG_FLAGS_X] & PAGE_MASK) as usize) << 2
    }
}

impl Index<usize> for Memory {
    type Output = u8;

    fn index(&self, addr: usize) -> &u8 {
        &self.0[addr & ADDR_MASK]
    }
}

impl IndexMut<usize> for Memory {
    fn index_mut(&mut self, addr: usize) -> &mut u8 {
        &mut self.0[addr & ADDR_MASK]
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("a", &self.0[REG_A])
            .field("b", &self.0[REG_B])
            .field("x", &self.0[REG_X])
            .field("p", &self.0[REG_P])
            .field("flags_x", &self.0[REG_FLAGS_X])
            .field("output", &self.0[REG_OUTPUT])
            .finish_non_exhaustive()
    }
}
