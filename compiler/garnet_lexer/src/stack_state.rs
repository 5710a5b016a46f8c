//! One-bit-per-level nesting stacks.
//!
//! The condition stack and the command-argument stack each record one
//! boolean per open nesting level. Only the innermost bit is ever queried,
//! so both live in a single integer: push shifts left, pop shifts right.

/// A stack of booleans packed into a `u64`.
///
/// Levels deeper than 64 keep counting but their bits fall off the top;
/// only the innermost 64 levels are remembered. Popping an empty stack is a
/// no-op, so the depth never goes negative.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct BitStack {
    bits: u64,
    depth: u32,
}

impl BitStack {
    pub const fn new() -> Self {
        BitStack { bits: 0, depth: 0 }
    }

    #[inline]
    pub fn push(&mut self, value: bool) {
        self.bits = (self.bits << 1) | u64::from(value);
        self.depth = self.depth.saturating_add(1);
    }

    #[inline]
    pub fn pop(&mut self) {
        if self.depth > 0 {
            self.bits >>= 1;
            self.depth -= 1;
        }
    }

    /// Whether the innermost level is set.
    #[inline]
    pub fn is_set(self) -> bool {
        self.bits & 1 == 1
    }

    #[inline]
    pub fn depth(self) -> u32 {
        self.depth
    }
}
