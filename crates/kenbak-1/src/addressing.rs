//! Addressing-mode resolution.
//!
//! An operand byte plus a three-bit mode code resolve to the effective
//! memory address an instruction acts on. Two regimes exist: the legacy
//! resolver pins everything to page 0 (with one deliberate escape for
//! paged jump targets), while the current-page resolver offsets every
//! result onto the active page and exists only for the extension's
//! "Load A, current page" instruction.

use crate::memory::{Memory, REG_P, REG_X};

/// Constant/immediate: the operand byte itself is the value.
pub const CONST: u8 = 3;
/// Direct memory address.
pub const MEM: u8 = 4;
/// The byte at the operand address is itself an address.
pub const INDIRECT: u8 = 5;
/// Operand plus X, wrapping at 256.
pub const INDEXED: u8 = 6;
/// Indirect address plus X, wrapping at 256.
pub const INDIRECT_INDEXED: u8 = 7;

/// Resolve an operand to an effective address, page-0 regime.
///
/// `operand_addr` is the location of the operand byte (the one just
/// fetched); `CONST` resolves to that location itself, so an immediate
/// operand and its memory cell alias — a STORE through `CONST` rewrites
/// the operand byte.
///
/// `ind_paged` redirects a `MEM` resolution onto the current page. Jumps
/// use it so an indirect target (the first byte of a subroutine) is read
/// from the page being executed rather than page 0.
#[must_use]
pub fn resolve(mem: &Memory, operand_addr: usize, mode: u8, ind_paged: bool) -> usize {
    let operand = mem[operand_addr];
    let page = mem.page_base();

    // An indirect pointer naming the P register reads through the current
    // page: paged jump targets resolved via the PC must land there.
    let indirect = if usize::from(operand) == REG_P {
        page + usize::from(mem[REG_P])
    } else {
        usize::from(mem[usize::from(operand)])
    };

    match mode {
        MEM if ind_paged => page + usize::from(operand),
        MEM => usize::from(operand),
        INDIRECT => indirect,
        INDEXED => usize::from(operand.wrapping_add(mem[REG_X])),
        INDIRECT_INDEXED => (indirect + usize::from(mem[REG_X])) & 0xFF,
        // CONST and reserved mode codes: the operand byte itself.
        _ => operand_addr,
    }
}

/// Resolve an operand to an effective address on the current page.
///
/// Same mode semantics as [`resolve`], but every result is offset by the
/// page base. The indirect pointer is still read from page 0; only the
/// address it yields is redirected onto the current page.
#[must_use]
pub fn resolve_current_page(mem: &Memory, operand_addr: usize, mode: u8) -> usize {
    let operand = mem[operand_addr];
    let page = mem.page_base();

    match mode {
        MEM => page + usize::from(operand),
        INDIRECT => page + usize::from(mem[usize::from(operand)]),
        INDEXED => page + usize::from(operand.wrapping_add(mem[REG_X])),
        INDIRECT_INDEXED => page + usize::from(mem[usize::from(operand)].wrapping_add(mem[REG_X])),
        _ => operand_addr,
    }
}
