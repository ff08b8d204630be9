//! The no-op extension hook.
//!
//! Undefined opcode slots all dispatch as no-ops carrying a nonzero
//! secondary field. The engine hands those to a host-supplied hook, which
//! can implement custom instructions (I/O traps and the like) or veto
//! continued execution.

use crate::memory::Memory;

/// Host callback for no-op variants with a nonzero Q field.
///
/// `op` is the full instruction byte. Return `false` to halt the engine;
/// [`Kenbak1::step`](crate::Kenbak1::step) propagates the result.
pub trait NoopHook {
    /// Handle an otherwise-undefined opcode.
    fn on_noop(&mut self, memory: &mut Memory, op: u8) -> bool;
}

/// The default hook: every undefined opcode is a benign no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysContinue;

impl NoopHook for AlwaysContinue {
    fn on_noop(&mut self, _memory: &mut Memory, _op: u8) -> bool {
        true
    }
}

impl<F> NoopHook for F
where
    F: FnMut(&mut Memory, u8) -> bool,
{
    fn on_noop(&mut self, memory: &mut Memory, op: u8) -> bool {
        self(memory, op)
    }
}
