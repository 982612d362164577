//! Vector Instruction Field Accessors
//!
//! This module extracts operand fields from a raw 32-bit PowerPC instruction
//! word, per encoding form. It covers the forms used by the AltiVec/VMX
//! instruction set (X, VX, VXR, VXA) and the VMX128 extension forms (VX128,
//! VX128_1 through VX128_5, VX128_R, VX128_P).
//!
//! The VMX128 extension widens the vector register file to 128 registers,
//! but the base encoding only has room for 5-bit register fields. Register
//! indices are therefore reassembled from two or three disjoint bit groups:
//!
//! - `VD128 = VD128l | (VD128h << 5)`
//! - `VB128 = VB128l | (VB128h << 5)`
//! - `VA128 = VA128l | (VA128h << 5) | (VA128H << 6)`
//!
//! Only the A operand carries the seventh bit. Reconstructed indices are
//! always in `[0, 127]`; the base 32-register forms stay in `[0, 31]`.
//!
//! Accessors are pure and infallible: any bit pattern decodes to some
//! in-range integer. Matching the opcode bits against a mnemonic is the
//! decoder's job, not this module's.

/// Raw instruction word with per-form field accessors.
///
/// Bit positions below are counted from the least-significant bit of the
/// 32-bit word, so the primary opcode occupies bits 26-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrData {
    word: u32,
}

impl InstrData {
    pub const fn new(word: u32) -> Self {
        Self { word }
    }

    /// The raw 32-bit instruction word.
    pub const fn word(self) -> u32 {
        self.word
    }

    #[inline]
    const fn bits(self, lo: u32, len: u32) -> u32 {
        (self.word >> lo) & ((1 << len) - 1)
    }

    // X form: RT[21-25] RA[16-20] RB[11-15]

    pub fn x_rt(self) -> u32 {
        self.bits(21, 5)
    }
    pub fn x_ra(self) -> u32 {
        self.bits(16, 5)
    }
    pub fn x_rb(self) -> u32 {
        self.bits(11, 5)
    }

    // VX form: VD[21-25] VA[16-20] VB[11-15]
    // The VA field doubles as the 5-bit unsigned immediate for the splat
    // immediate and conversion opcodes.

    pub fn vx_vd(self) -> u32 {
        self.bits(21, 5)
    }
    pub fn vx_va(self) -> u32 {
        self.bits(16, 5)
    }
    pub fn vx_vb(self) -> u32 {
        self.bits(11, 5)
    }

    // VXR form: VX with the record bit at bit 10.

    pub fn vxr_vd(self) -> u32 {
        self.bits(21, 5)
    }
    pub fn vxr_va(self) -> u32 {
        self.bits(16, 5)
    }
    pub fn vxr_vb(self) -> u32 {
        self.bits(11, 5)
    }
    pub fn vxr_rc(self) -> bool {
        self.bits(10, 1) != 0
    }

    // VXA form: VX with a third source register VC at bits 6-10.

    pub fn vxa_vd(self) -> u32 {
        self.bits(21, 5)
    }
    pub fn vxa_va(self) -> u32 {
        self.bits(16, 5)
    }
    pub fn vxa_vb(self) -> u32 {
        self.bits(11, 5)
    }
    pub fn vxa_vc(self) -> u32 {
        self.bits(6, 5)
    }

    // VX128 form: three 7/6-bit vector registers.
    // VB128h[0-1] VD128h[2-3] VA128h[5] VA128H[10]
    // VB128l[11-15] VA128l[16-20] VD128l[21-25]

    pub fn vx128_vd(self) -> u32 {
        self.bits(21, 5) | (self.bits(2, 2) << 5)
    }
    pub fn vx128_va(self) -> u32 {
        self.bits(16, 5) | (self.bits(5, 1) << 5) | (self.bits(10, 1) << 6)
    }
    pub fn vx128_vb(self) -> u32 {
        self.bits(11, 5) | (self.bits(0, 2) << 5)
    }

    // VX128_1 form: vector destination with two GPR operands (memory ops).
    // VD128h[2-3] RB[11-15] RA[16-20] VD128l[21-25]

    pub fn vx128_1_vd(self) -> u32 {
        self.bits(21, 5) | (self.bits(2, 2) << 5)
    }
    pub fn vx128_1_ra(self) -> u32 {
        self.bits(16, 5)
    }
    pub fn vx128_1_rb(self) -> u32 {
        self.bits(11, 5)
    }

    // VX128_2 form: VX128 with a 3-bit VC field at bits 6-8 (vperm128).

    pub fn vx128_2_vd(self) -> u32 {
        self.bits(21, 5) | (self.bits(2, 2) << 5)
    }
    pub fn vx128_2_va(self) -> u32 {
        self.bits(16, 5) | (self.bits(5, 1) << 5) | (self.bits(10, 1) << 6)
    }
    pub fn vx128_2_vb(self) -> u32 {
        self.bits(11, 5) | (self.bits(0, 2) << 5)
    }
    pub fn vx128_2_vc(self) -> u32 {
        self.bits(6, 3)
    }

    // VX128_3 form: destination, source B and a 5-bit immediate where the
    // A field would be.
    // VB128h[0-1] VD128h[2-3] VB128l[11-15] IMM[16-20] VD128l[21-25]

    pub fn vx128_3_vd(self) -> u32 {
        self.bits(21, 5) | (self.bits(2, 2) << 5)
    }
    pub fn vx128_3_vb(self) -> u32 {
        self.bits(11, 5) | (self.bits(0, 2) << 5)
    }
    pub fn vx128_3_imm(self) -> u32 {
        self.bits(16, 5)
    }

    // VX128_4 form: VX128_3 with a 2-bit z field at bits 6-7
    // (vrlimi128 rotate count, vpkd3d128 shift).

    pub fn vx128_4_vd(self) -> u32 {
        self.bits(21, 5) | (self.bits(2, 2) << 5)
    }
    pub fn vx128_4_vb(self) -> u32 {
        self.bits(11, 5) | (self.bits(0, 2) << 5)
    }
    pub fn vx128_4_imm(self) -> u32 {
        self.bits(16, 5)
    }
    pub fn vx128_4_z(self) -> u32 {
        self.bits(6, 2)
    }

    // VX128_5 form: VX128 with a 4-bit shift amount at bits 6-9 (vsldoi128).

    pub fn vx128_5_vd(self) -> u32 {
        self.bits(21, 5) | (self.bits(2, 2) << 5)
    }
    pub fn vx128_5_va(self) -> u32 {
        self.bits(16, 5) | (self.bits(5, 1) << 5) | (self.bits(10, 1) << 6)
    }
    pub fn vx128_5_vb(self) -> u32 {
        self.bits(11, 5) | (self.bits(0, 2) << 5)
    }
    pub fn vx128_5_sh(self) -> u32 {
        self.bits(6, 4)
    }

    // VX128_P form: destination, source B and a split permute immediate.
    // PERM = PERMl | (PERMh << 5), PERMl[16-20] PERMh[6-8]

    pub fn vx128_p_vd(self) -> u32 {
        self.bits(21, 5) | (self.bits(2, 2) << 5)
    }
    pub fn vx128_p_vb(self) -> u32 {
        self.bits(11, 5) | (self.bits(0, 2) << 5)
    }
    pub fn vx128_p_perm(self) -> u32 {
        self.bits(16, 5) | (self.bits(6, 3) << 5)
    }

    // VX128_R form: VX128 with the record bit at bit 6.

    pub fn vx128_r_vd(self) -> u32 {
        self.bits(21, 5) | (self.bits(2, 2) << 5)
    }
    pub fn vx128_r_va(self) -> u32 {
        self.bits(16, 5) | (self.bits(5, 1) << 5) | (self.bits(10, 1) << 6)
    }
    pub fn vx128_r_vb(self) -> u32 {
        self.bits(11, 5) | (self.bits(0, 2) << 5)
    }
    pub fn vx128_r_rc(self) -> bool {
        self.bits(6, 1) != 0
    }
}
