//! KENBAK-1 CPU: fetch, decode and execute.
//!
//! Each instruction byte splits into three fields: P (bits 6-7), Q (bits
//! 3-5) and R (bits 0-2). Dispatch is a dense, order-sensitive decision
//! table over those fields — the table below mirrors the machine's opcode
//! chart rather than any tidier instruction hierarchy.
//!
//! ```text
//! R=0          misc: halt (P<2), no-op / extension hook
//! R=1          shift/rotate A or B
//! R=2          bit test & manipulate        (two bytes)
//! Q>=4         jumps, plain or jump-and-mark (two bytes)
//! P=3, Q<4     or / and / lneg / load-A-current-page
//! else         add / sub / load / store     (two bytes)
//! ```

use crate::addressing::{self, CONST};
use crate::flags::{ARITH_MASK, CARRY, OVERFLOW};
use crate::hook::{AlwaysContinue, NoopHook};
use crate::memory::{Memory, REG_A, REG_B, REG_FLAGS_A, REG_FLAGS_X, REG_P};

// Jump condition codes carried in the R field.
const TEST_NE: u8 = 3;
const TEST_EQ: u8 = 4;
const TEST_LT: u8 = 5;
const TEST_GE: u8 = 6;
const TEST_GT: u8 = 7;

/// The KENBAK-1 instruction engine.
///
/// Construct with [`Kenbak1::new`] (legacy 256-byte behavior) or
/// [`Kenbak1::new_extended`] (paged 1K extension), optionally swap in a
/// [`NoopHook`] with [`Kenbak1::with_hook`], load a program into memory,
/// and call [`Kenbak1::step`] until it returns `false`.
#[derive(Debug)]
pub struct Kenbak1<H = AlwaysContinue> {
    mem: Memory,
    extended: bool,
    hook: H,
}

impl Kenbak1 {
    /// Create an engine with legacy semantics and the default hook.
    ///
    /// Memory is still allocated at 1024 bytes, but no instruction will
    /// move execution or addressing off page 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mem: Memory::new(),
            extended: false,
            hook: AlwaysContinue,
        }
    }

    /// Create an engine with the paging extension enabled.
    ///
    /// This turns on page-aware jump-and-mark, page-switching
    /// unconditional jumps, and "Load A, current page" in place of the
    /// otherwise-reserved NOP opcode.
    #[must_use]
    pub fn new_extended() -> Self {
        Self {
            extended: true,
            ..Self::new()
        }
    }
}

impl Default for Kenbak1 {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: NoopHook> Kenbak1<H> {
    /// Replace the extension hook, keeping memory and mode.
    pub fn with_hook<H2: NoopHook>(self, hook: H2) -> Kenbak1<H2> {
        Kenbak1 {
            mem: self.mem,
            extended: self.extended,
            hook,
        }
    }

    /// Whether the paging extension is enabled.
    #[must_use]
    pub const fn is_extended(&self) -> bool {
        self.extended
    }

    /// The engine's memory (registers included).
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.mem
    }

    /// Mutable access to the engine's memory.
    pub const fn memory_mut(&mut self) -> &mut Memory {
        &mut self.mem
    }

    /// The extension hook.
    #[must_use]
    pub const fn hook(&self) -> &H {
        &self.hook
    }

    /// Mutable access to the extension hook.
    pub const fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    /// Zero all memory.
    pub fn reset(&mut self) {
        self.mem.clear();
    }

    /// Execute one instruction. Returns `false` when the engine halts,
    /// either through a HALT opcode or a hook veto.
    pub fn step(&mut self) -> bool {
        let pc = self.fetch_byte();
        let inst = self.mem[pc];
        self.execute(inst)
    }

    /// Address of the next program byte: current page ORed with P.
    ///
    /// Increments P, which wraps at 256 — the page never auto-advances,
    /// so code running off the end of a page continues at its start.
    fn fetch_byte(&mut self) -> usize {
        let pc = self.mem.page_base() + usize::from(self.mem[REG_P]);
        self.mem[REG_P] = self.mem[REG_P].wrapping_add(1);
        pc
    }

    /// Decode and execute one instruction byte. `false` means halt.
    fn execute(&mut self, inst: u8) -> bool {
        let p = inst >> 6;
        let q = (inst >> 3) & 0x07;
        let r = inst & 0x07;

        match (p, q, r) {
            // Miscellaneous, one byte: halt or no-op. Any no-op with a
            // nonzero Q is an undefined slot and goes to the hook.
            (0 | 1, _, 0) => return false,
            (_, 0, 0) => {}
            (_, _, 0) => return self.hook.on_noop(&mut self.mem, inst),

            (_, _, 1) => self.shift_rotate(p, q),
            (_, _, 2) => self.bit_op(p, q),
            (_, 4.., _) => self.jump(p, q, r),

            // P=3, Q=1: "Load A, current page" under the extension, the
            // reserved one-byte NOP otherwise.
            (3, 1, _) => {
                if self.extended {
                    let operand = self.fetch_byte();
                    let addr = addressing::resolve_current_page(&self.mem, operand, r);
                    self.mem[REG_A] = self.mem[addr];
                } else {
                    return self.hook.on_noop(&mut self.mem, inst);
                }
            }
            (3, _, _) => self.logic(q, r),
            _ => self.arithmetic(p, q, r),
        }
        true
    }

    /// R=1: shift or rotate A (Q<4) or B (Q>=4) by `Q mod 4` places,
    /// where 0 means 4. P bit 0 selects rotate, bit 1 selects left.
    fn shift_rotate(&mut self, p: u8, q: u8) {
        let reg = if q & 0x04 != 0 { REG_B } else { REG_A };
        let mut places = q & 0x03;
        if places == 0 {
            places = 4;
        }
        let rotate = p & 0x01 != 0;
        let value = self.mem[reg];

        // Only the bit that falls off the far end comes back around on a
        // rotate; a plain shift discards it. Flags are not affected.
        self.mem[reg] = if p & 0x02 != 0 {
            let out = value & 0x80;
            let mut v = value << places;
            if rotate && out != 0 {
                v |= 0x01;
            }
            v
        } else {
            let out = value & 0x01;
            let mut v = value >> places;
            if rotate && out != 0 {
                v |= 0x80;
            }
            v
        };
    }

    /// R=2: bit test and manipulate. Bit `Q` of a page-0 cell; P bit 0 is
    /// the polarity, P bit 1 selects skip-on-match over set/clear.
    fn bit_op(&mut self, p: u8, q: u8) {
        let mask = 1u8 << q;
        let operand = self.fetch_byte();
        let addr = addressing::resolve(&self.mem, operand, addressing::MEM, false);
        let want_one = p & 0x01 != 0;

        if p & 0x02 != 0 {
            // SKIP: step over the following two-byte instruction. The
            // tested byte is never modified.
            if (self.mem[addr] & mask != 0) == want_one {
                self.mem[REG_P] = self.mem[REG_P].wrapping_add(2);
            }
        } else if want_one {
            self.mem[addr] |= mask;
        } else {
            self.mem[addr] &= !mask;
        }
    }

    /// Q>=4: conditional and unconditional jumps, with optional
    /// jump-and-mark (Q bit 1) and indirect targets (Q bit 0).
    fn jump(&mut self, p: u8, q: u8, mut r: u8) {
        let jump_and_mark = q & 0x02 != 0;
        let mode = CONST + (q & 0x01);
        let test = self.mem[usize::from(p)];
        let operand = self.fetch_byte();
        let mut target = self.mem[addressing::resolve(&self.mem, operand, mode, true)];

        let taken = if p == 3 {
            // Unconditional. A not-equal condition code is normalized to
            // equal, so a page-switch below selects page 0 (0343 opcodes
            // behave as 0344).
            if r == TEST_NE {
                r = TEST_EQ;
            }
            true
        } else {
            match r {
                TEST_NE => test != 0,
                TEST_EQ => test == 0,
                TEST_LT => test & 0x80 != 0,
                TEST_GE => test & 0x80 == 0 || test == 0,
                TEST_GT => test & 0x80 == 0 && test != 0,
                _ => false,
            }
        };
        if !taken {
            return;
        }

        if jump_and_mark {
            // Store the return address (low 8 bits of the PC) at the
            // target and land just past it. With the extension the mark
            // goes on the current page; returns assume the same page.
            let mark = if self.extended {
                self.mem.page_base() + usize::from(target)
            } else {
                usize::from(target)
            };
            self.mem[mark] = self.mem[REG_P];
            target = target.wrapping_add(1);
        }

        if self.extended && p == 3 && q & 0x01 == 0 && !jump_and_mark {
            // Page-switching jump: the low two bits of R become the page,
            // taking effect on the next fetch. Bits 2-5 of the flags byte
            // are dropped; the arithmetic bits survive.
            self.mem[REG_FLAGS_X] = r.wrapping_shl(6) | (self.mem[REG_FLAGS_X] & ARITH_MASK);
        }

        self.mem[REG_P] = target;
    }

    /// P=3, Q in {0,2,3}: OR, AND or two's-complement negate into A.
    /// None of these touch flags.
    fn logic(&mut self, q: u8, r: u8) {
        let operand = self.fetch_byte();
        let addr = addressing::resolve(&self.mem, operand, r, false);
        let value = self.mem[addr];
        match q {
            0 => self.mem[REG_A] |= value,
            2 => self.mem[REG_A] &= value,
            _ => self.mem[REG_A] = (value as i8).wrapping_neg() as u8,
        }
    }

    /// Add, subtract, load or store on register P (A/B/X), operand via
    /// the legacy resolver with mode R.
    fn arithmetic(&mut self, p: u8, q: u8, r: u8) {
        let dest = usize::from(p);
        let flags_addr = REG_FLAGS_A + dest;
        let operand = self.fetch_byte();
        let addr = addressing::resolve(&self.mem, operand, r, false);
        let lhs = self.mem[dest];
        let rhs = self.mem[addr];

        match q {
            0 | 1 => {
                let (wide, signed) = if q == 0 {
                    (
                        u16::from(lhs) + u16::from(rhs),
                        i16::from(lhs as i8) + i16::from(rhs as i8),
                    )
                } else {
                    (
                        u16::from(lhs).wrapping_sub(u16::from(rhs)),
                        i16::from(lhs as i8) - i16::from(rhs as i8),
                    )
                };
                self.mem[dest] = wide as u8;

                // Clear only the bottom two bits: the top of X's flags
                // byte is the page selector.
                let mut f = self.mem[flags_addr] & !ARITH_MASK;
                if wide & 0xFF00 != 0 {
                    f |= CARRY;
                }
                if !(-128..=127).contains(&signed) {
                    f |= OVERFLOW;
                }
                self.mem[flags_addr] = f;
            }
            2 => self.mem[dest] = rhs,
            _ => self.mem[addr] = lhs,
        }
    }
}
