//! Guest CPU Context
//!
//! CPU-wide architectural state touched by the vector translator. The state
//! is an explicit record threaded through the JIT rather than a global: each
//! hardware thread owns one `CpuContext`, and the emitted IR reads and
//! writes its fields through [`CtxField`](crate::recompiler::ir::CtxField)
//! context operations.
//!
//! Only two fields matter to this translator:
//!
//! - the VSCR image, read by `mfvscr` and written by `mtvscr`;
//! - the non-Java-mode flag, a cached copy of VSCR bit 16 kept unpacked
//!   because the floating-point emitters test it far more often than the
//!   full register is moved.

use crate::recompiler::ir::Vec128;

/// VSCR non-Java mode bit within word element 3.
pub const VSCR_NJ_BIT: u32 = 1 << 16;

/// Per-thread guest CPU state consumed by the vector translator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuContext {
    /// Vector status and control register image. Reserved bits are stored
    /// verbatim; what hardware does with them is implementation defined.
    pub vscr: Vec128,
    /// Non-Java mode flag, mirroring bit 16 of VSCR word element 3.
    pub njm: bool,
}

impl CpuContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new VSCR image, refreshing the unpacked NJM flag.
    pub fn set_vscr(&mut self, value: Vec128) {
        self.njm = value.u32x4()[3] & VSCR_NJ_BIT != 0;
        self.vscr = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_vscr_tracks_njm() {
        let mut ctx = CpuContext::new();
        ctx.set_vscr(Vec128::from_u32x4([0, 0, 0, VSCR_NJ_BIT]));
        assert!(ctx.njm);
        ctx.set_vscr(Vec128::from_u32x4([VSCR_NJ_BIT, VSCR_NJ_BIT, 0, 0]));
        assert!(!ctx.njm);
    }
}
