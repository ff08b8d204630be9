//! KENBAK-1 instruction engine.
//!
//! Step-driven emulation of the KENBAK-1 CPU, extended with an optional
//! paged 1024-byte address space (4 pages of 256 bytes) in place of the
//! machine's original 256 bytes. The host drives the engine one instruction
//! at a time with [`Kenbak1::step`] and talks to the program through the
//! memory-mapped OUTPUT and INPUT ports.
//!
//! The KENBAK-1 has no separate register file: A, B, X, the program counter
//! and the flag bytes are ordinary memory cells at fixed addresses, and
//! every instruction that touches memory can touch them. [`Memory`] models
//! that directly as a single 1024-byte array.

pub mod addressing;
mod cpu;
pub mod flags;
mod hook;
mod memory;

pub use cpu::Kenbak1;
pub use hook::{AlwaysContinue, NoopHook};
pub use memory::{
    MEMORY_SIZE, Memory, PAGE_SIZE, REG_A, REG_B, REG_FLAGS_A, REG_FLAGS_B, REG_FLAGS_X,
    REG_INPUT, REG_OUTPUT, REG_P, REG_X,
};
