//! Flag bits stored in the per-register flag bytes.
//!
//! Each of A, B and X has its own flags byte (`REG_FLAGS_A` + register
//! index). Only ADD and SUB touch flags, and only bits 0-1: the top two
//! bits of X's flags byte hold the current page and must survive
//! arithmetic on X.

/// Overflow flag - set if the signed 8-bit result left [-128, 127].
pub const OVERFLOW: u8 = 0x01;

/// Carry flag - set on unsigned carry out (or borrow, for SUB).
pub const CARRY: u8 = 0x02;

/// The bits ADD/SUB are allowed to clear and set.
pub const ARITH_MASK: u8 = 0x03;

/// Page selector bits in X's flags byte.
pub const PAGE_MASK: u8 = 0xC0;
