//! IR Operations
//!
//! SSA operation set produced by the vector translator and consumed by the
//! code generator. Every operation produces at most one new value; values
//! are immutable once created and owned by the [`IrBlock`] of the current
//! translation unit. Guest-visible side effects (register stores, memory
//! stores, SAT/CR6 updates, context writes) are explicit operations so the
//! backend can order them exactly as emitted.
//!
//! Operation parameters that would otherwise explode into per-combination
//! opcodes (signed/unsigned, saturating/wrapping, lane width, compare
//! condition, rounding direction, pack layout) are carried as small tagged
//! configuration values instead.

use super::vec128::Vec128;
use smallvec::SmallVec;

/// Value type of an IR node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IrType {
    I8 = 0,
    I16 = 1,
    I32 = 2,
    I64 = 3,
    F32 = 4,
    /// 128-bit vector; lane interpretation is per-operation.
    V128 = 5,
}

/// Lane interpretation for vector operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Lane {
    I8 = 0,
    I16 = 1,
    I32 = 2,
    F32 = 3,
}

impl Lane {
    /// Number of lanes in a 128-bit vector.
    pub const fn count(self) -> usize {
        match self {
            Lane::I8 => 16,
            Lane::I16 => 8,
            Lane::I32 | Lane::F32 => 4,
        }
    }

    /// Lane width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Lane::I8 => 8,
            Lane::I16 => 16,
            Lane::I32 | Lane::F32 => 32,
        }
    }
}

/// Integer arithmetic mode for the add/sub family.
///
/// Wrapping arithmetic is modulo `2^width`; saturating arithmetic clamps to
/// the representable range and reports whether clamping occurred through
/// [`IrOp::DidSaturate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArithMode {
    pub unsigned: bool,
    pub saturate: bool,
}

impl ArithMode {
    pub const SIGNED: Self = Self { unsigned: false, saturate: false };
    pub const UNSIGNED: Self = Self { unsigned: true, saturate: false };
    pub const SIGNED_SAT: Self = Self { unsigned: false, saturate: true };
    pub const UNSIGNED_SAT: Self = Self { unsigned: true, saturate: true };
}

/// Per-lane compare condition.
///
/// For `Lane::F32` the result of any comparison against a NaN lane is
/// all-zero, never all-ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CmpCond {
    Eq = 0,
    SignedGt = 1,
    SignedGe = 2,
    UnsignedGt = 3,
}

/// Directed rounding mode for round-to-integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundMode {
    TowardNegative = 0,
    Nearest = 1,
    TowardPositive = 2,
    TowardZero = 3,
}

/// Element width of an integer pack/unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NarrowWidth {
    /// 16 halfwords narrowed to bytes (or widened back).
    ByteIn16 = 0,
    /// 8 words narrowed to halfwords (or widened back).
    HalfIn32 = 1,
}

/// Vector pack layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackFormat {
    /// Narrow two source vectors into one, high half from the first source.
    Int {
        width: NarrowWidth,
        src_signed: bool,
        dst_signed: bool,
        saturate: bool,
    },
    /// 8-8-8-8 color, four floats to four packed bytes.
    D3dColor,
    /// Two signed-normalized 16-bit values in word element 3.
    ShortNorm2,
    /// Four signed-normalized 16-bit values in elements 2-3.
    ShortNorm4,
    /// 2-10-10-10 packed normal, w_z_y_x.
    Packed2101010,
    /// Two half floats in word element 3.
    Float16x2,
    /// Four half floats in elements 2-3.
    Float16x4,
    /// 4-20-20-20 packed, w_z_y_x.
    Packed4202020,
}

/// Which half of the source an integer unpack widens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UnpackPart {
    High = 0,
    Low = 1,
}

/// Vector unpack layout. Integer unpacks sign-extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnpackFormat {
    Int { width: NarrowWidth, part: UnpackPart },
    D3dColor,
    ShortNorm2,
    ShortNorm4,
    Packed2101010,
    Float16x2,
    Float16x4,
    Packed4202020,
}

/// CPU context field addressed by context load/store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CtxField {
    /// Vector status and control register image (`V128`).
    Vscr = 0,
    /// Non-Java mode flag (`I8` boolean), mirrors VSCR bit 16.
    Njm = 1,
}

/// Immediate constant.
///
/// Floats are stored as raw bits so constants stay `Eq + Hash` for value
/// numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Const {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32Bits(u32),
    V128(Vec128),
}

impl Const {
    pub fn f32(value: f32) -> Self {
        Const::F32Bits(value.to_bits())
    }

    pub const fn ty(self) -> IrType {
        match self {
            Const::I8(_) => IrType::I8,
            Const::I16(_) => IrType::I16,
            Const::I32(_) => IrType::I32,
            Const::I64(_) => IrType::I64,
            Const::F32Bits(_) => IrType::F32,
            Const::V128(_) => IrType::V128,
        }
    }
}

/// Opaque handle to a value in the current block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IrValue {
    pub index: u32,
    pub ty: IrType,
}

/// One IR operation.
///
/// Operand handles always refer to earlier operations in the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrOp {
    /// Tombstone left by dead-op elimination; emits nothing.
    Nop,
    Constant(Const),

    /// Read guest vector register `vr`.
    LoadVr { vr: u32 },
    /// Write guest vector register `vr`.
    StoreVr { vr: u32, src: IrValue },
    /// Read guest general-purpose register `gpr` (for address math).
    LoadGpr { gpr: u32 },

    /// Load from guest memory at `ea`; result type is the instruction type.
    Load { ea: IrValue },
    /// Store `src` to guest memory at `ea`.
    Store { ea: IrValue, src: IrValue },
    /// Reverse the bytes of the value (element-order swap for vectors).
    ByteSwap { src: IrValue },

    /// AltiVec shift-table lookup for `lvsl` (entries `sh..sh+15`).
    LoadVectorShl { sh: IrValue },
    /// AltiVec shift-table lookup for `lvsr` (entries `16-sh..31-sh`).
    LoadVectorShr { sh: IrValue },
    /// Boundary-tolerant load of the bytes from `ea` up to the next 16-byte
    /// boundary; remaining lanes are zero. Loads nothing when `ea` is
    /// aligned (the register still becomes zero).
    LoadVectorRight { ea: IrValue },
    /// Boundary-tolerant load of the bytes from the enclosing 16-byte
    /// boundary up to `ea`; remaining lanes are zero.
    LoadVectorLeft { ea: IrValue },
    /// Mirror of [`IrOp::LoadVectorLeft`]; untouched guest bytes keep their
    /// old values. The emitted access must not widen past the boundary.
    StoreVectorLeft { ea: IrValue, src: IrValue },
    /// Mirror of [`IrOp::LoadVectorRight`].
    StoreVectorRight { ea: IrValue, src: IrValue },

    LoadContext { field: CtxField },
    StoreContext { field: CtxField, src: IrValue },

    And { a: IrValue, b: IrValue },
    Or { a: IrValue, b: IrValue },
    Xor { a: IrValue, b: IrValue },
    /// `a & !b`.
    AndNot { a: IrValue, b: IrValue },
    Not { src: IrValue },
    Neg { src: IrValue },
    Add { a: IrValue, b: IrValue },
    /// Whole-value left shift; for `V128` the quadword shifts as one
    /// 128-bit integer.
    Shl { a: IrValue, b: IrValue },
    Shr { a: IrValue, b: IrValue },
    /// Narrowing integer conversion; result type is the instruction type.
    Truncate { src: IrValue },
    /// 1 if any bit of `src` is set, else 0.
    IsTrue { src: IrValue },

    /// Lanewise f32 multiply.
    Mul { a: IrValue, b: IrValue },
    /// Lanewise f32 max/min.
    Max { a: IrValue, b: IrValue },
    Min { a: IrValue, b: IrValue },
    /// Fused `a * b + c`, one rounding.
    MulAdd { a: IrValue, b: IrValue, c: IrValue },
    /// Fused `-(a * b - c)`, one rounding.
    NegMulSub { a: IrValue, b: IrValue, c: IrValue },
    /// Reciprocal approximation; hardware edge-case tables (signed zero,
    /// infinity, NaN propagation) are not reproduced.
    Recip { src: IrValue },
    /// Reciprocal square root approximation, same caveat as `Recip`.
    RSqrt { src: IrValue },
    /// log2 approximation.
    Log2 { src: IrValue },
    /// 2^x approximation.
    Pow2 { src: IrValue },
    /// Round each f32 lane to an integral value.
    Round { src: IrValue, mode: RoundMode },
    /// Force subnormal f32 lanes to signed zero.
    DenormFlush { src: IrValue },
    /// 3-term dot product broadcast to all lanes.
    Dot3 { a: IrValue, b: IrValue },
    /// 4-term dot product broadcast to all lanes.
    Dot4 { a: IrValue, b: IrValue },

    VectorAdd { a: IrValue, b: IrValue, lane: Lane, mode: ArithMode },
    VectorSub { a: IrValue, b: IrValue, lane: Lane, mode: ArithMode },
    /// `(a + b + 1) >> 1` at one extra bit of precision.
    VectorAverage { a: IrValue, b: IrValue, lane: Lane, unsigned: bool },
    VectorMax { a: IrValue, b: IrValue, lane: Lane, unsigned: bool },
    VectorMin { a: IrValue, b: IrValue, lane: Lane, unsigned: bool },
    /// All-ones / all-zeros per-lane mask.
    VectorCompare { a: IrValue, b: IrValue, lane: Lane, cond: CmpCond },
    /// Per-lane shifts; the shift amount comes from the matching lane of
    /// `b`, masked to the lane width.
    VectorShl { a: IrValue, b: IrValue, lane: Lane },
    VectorShr { a: IrValue, b: IrValue, lane: Lane },
    VectorSha { a: IrValue, b: IrValue, lane: Lane },
    VectorRotl { a: IrValue, b: IrValue, lane: Lane },
    /// Lanewise int -> f32.
    VectorConvertI2F { src: IrValue, unsigned: bool },
    /// Lanewise f32 -> int with saturation; pairs with `DidSaturate`.
    VectorConvertF2I { src: IrValue, unsigned: bool },

    /// Broadcast a scalar to every lane of its width.
    Splat { src: IrValue },
    /// Extract lane `lane` as a scalar; result type is the instruction
    /// type.
    Extract { src: IrValue, lane: u8 },
    /// Extract with a runtime lane index.
    ExtractDyn { src: IrValue, index: IrValue },
    /// Generalized permute.
    ///
    /// For `Lane::I8` the control is a byte vector: each output byte picks
    /// from the 32-byte concatenation `a || b` by the low 5 bits of its
    /// control byte, and control bit 5 forces that output byte to zero.
    /// For `Lane::I32` the control is a packed u32 scalar, one selector
    /// byte per word lane (bit 2 picks the source, bits 0-1 the lane).
    Permute { control: IrValue, a: IrValue, b: IrValue, lane: Lane },
    /// Word-lane shuffle by a 2-bit-per-lane immediate mask.
    Swizzle { src: IrValue, mask: u8 },
    /// Bitwise select: result bit is from `a` where the mask bit is clear,
    /// from `b` where it is set.
    Select { mask: IrValue, a: IrValue, b: IrValue },
    /// Narrowing pack; `b` is present only for the two-source integer
    /// layouts.
    Pack { a: IrValue, b: Option<IrValue>, format: PackFormat },
    Unpack { src: IrValue, format: UnpackFormat },

    /// 1 if the producing operation clamped any lane, else 0.
    DidSaturate { src: IrValue },
    /// Feed the SAT sticky bit of VSCR.
    StoreSat { src: IrValue },
    /// Reduce a compare mask to the 4-bit CR6 summary
    /// (all-lanes-true, 0, all-lanes-false, 0).
    UpdateCr6 { src: IrValue },
}

impl IrOp {
    /// Whether the operation has a guest-visible effect and must survive
    /// dead-op elimination.
    pub const fn has_side_effect(&self) -> bool {
        matches!(
            self,
            IrOp::StoreVr { .. }
                | IrOp::Store { .. }
                | IrOp::StoreVectorLeft { .. }
                | IrOp::StoreVectorRight { .. }
                | IrOp::StoreContext { .. }
                | IrOp::StoreSat { .. }
                | IrOp::UpdateCr6 { .. }
        )
    }

    /// Operand values read by this operation, for def-use walks.
    pub fn sources(&self) -> SmallVec<[IrValue; 3]> {
        let mut out = SmallVec::new();
        match *self {
            IrOp::Nop | IrOp::Constant(_) | IrOp::LoadVr { .. } | IrOp::LoadGpr { .. } | IrOp::LoadContext { .. } => {}
            IrOp::StoreVr { src, .. }
            | IrOp::ByteSwap { src }
            | IrOp::LoadVectorShl { sh: src }
            | IrOp::LoadVectorShr { sh: src }
            | IrOp::Load { ea: src }
            | IrOp::LoadVectorLeft { ea: src }
            | IrOp::LoadVectorRight { ea: src }
            | IrOp::StoreContext { src, .. }
            | IrOp::Not { src }
            | IrOp::Neg { src }
            | IrOp::Truncate { src }
            | IrOp::IsTrue { src }
            | IrOp::Recip { src }
            | IrOp::RSqrt { src }
            | IrOp::Log2 { src }
            | IrOp::Pow2 { src }
            | IrOp::Round { src, .. }
            | IrOp::DenormFlush { src }
            | IrOp::VectorConvertI2F { src, .. }
            | IrOp::VectorConvertF2I { src, .. }
            | IrOp::Splat { src }
            | IrOp::Extract { src, .. }
            | IrOp::Swizzle { src, .. }
            | IrOp::Unpack { src, .. }
            | IrOp::DidSaturate { src }
            | IrOp::StoreSat { src }
            | IrOp::UpdateCr6 { src } => out.push(src),
            IrOp::Store { ea, src }
            | IrOp::StoreVectorLeft { ea, src }
            | IrOp::StoreVectorRight { ea, src } => {
                out.push(ea);
                out.push(src);
            }
            IrOp::And { a, b }
            | IrOp::Or { a, b }
            | IrOp::Xor { a, b }
            | IrOp::AndNot { a, b }
            | IrOp::Add { a, b }
            | IrOp::Shl { a, b }
            | IrOp::Shr { a, b }
            | IrOp::Mul { a, b }
            | IrOp::Max { a, b }
            | IrOp::Min { a, b }
            | IrOp::Dot3 { a, b }
            | IrOp::Dot4 { a, b }
            | IrOp::VectorAdd { a, b, .. }
            | IrOp::VectorSub { a, b, .. }
            | IrOp::VectorAverage { a, b, .. }
            | IrOp::VectorMax { a, b, .. }
            | IrOp::VectorMin { a, b, .. }
            | IrOp::VectorCompare { a, b, .. }
            | IrOp::VectorShl { a, b, .. }
            | IrOp::VectorShr { a, b, .. }
            | IrOp::VectorSha { a, b, .. }
            | IrOp::VectorRotl { a, b, .. } => {
                out.push(a);
                out.push(b);
            }
            IrOp::ExtractDyn { src, index } => {
                out.push(src);
                out.push(index);
            }
            IrOp::MulAdd { a, b, c } | IrOp::NegMulSub { a, b, c } => {
                out.push(a);
                out.push(b);
                out.push(c);
            }
            IrOp::Permute { control, a, b, .. } | IrOp::Select { mask: control, a, b } => {
                out.push(control);
                out.push(a);
                out.push(b);
            }
            IrOp::Pack { a, b, .. } => {
                out.push(a);
                if let Some(b) = b {
                    out.push(b);
                }
            }
        }
        out
    }
}

/// One operation plus the type of the value it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IrInst {
    pub op: IrOp,
    pub ty: IrType,
}

/// Append-only operation list for one translation unit.
///
/// Values are addressed by index; an [`IrValue`] handle is only valid for
/// the block that produced it.
#[derive(Debug, Clone, Default)]
pub struct IrBlock {
    insts: Vec<IrInst>,
}

impl IrBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: IrOp, ty: IrType) -> IrValue {
        let index = self.insts.len() as u32;
        self.insts.push(IrInst { op, ty });
        IrValue { index, ty }
    }

    pub fn inst(&self, value: IrValue) -> &IrInst {
        &self.insts[value.index as usize]
    }

    pub fn insts(&self) -> &[IrInst] {
        &self.insts
    }

    pub fn insts_mut(&mut self) -> &mut [IrInst] {
        &mut self.insts
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }
}
