//! IR Builder
//!
//! Append-only SSA builder handed to each instruction emitter. One method
//! per primitive operation; every method pushes one [`IrOp`] onto the
//! current block and returns the handle of the produced value. The builder
//! is the only mutable state an emitter touches, and it is scoped to a
//! single translation unit, so translations of different blocks can run on
//! different threads without any shared state.

use super::instruction::{
    ArithMode, CmpCond, Const, CtxField, IrBlock, IrOp, IrType, IrValue, Lane, PackFormat,
    RoundMode, UnpackFormat,
};
use super::vec128::Vec128;

/// SSA builder for one translation unit.
#[derive(Debug, Default)]
pub struct IrBuilder {
    block: IrBlock,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self) -> &IrBlock {
        &self.block
    }

    pub fn block_mut(&mut self) -> &mut IrBlock {
        &mut self.block
    }

    pub fn into_block(self) -> IrBlock {
        self.block
    }

    #[inline]
    fn push(&mut self, op: IrOp, ty: IrType) -> IrValue {
        self.block.push(op, ty)
    }

    // Guest registers.

    pub fn load_vr(&mut self, vr: u32) -> IrValue {
        debug_assert!(vr < 128, "vector register index out of range: {vr}");
        self.push(IrOp::LoadVr { vr }, IrType::V128)
    }

    pub fn store_vr(&mut self, vr: u32, src: IrValue) {
        debug_assert!(vr < 128, "vector register index out of range: {vr}");
        debug_assert_eq!(src.ty, IrType::V128);
        self.push(IrOp::StoreVr { vr, src }, IrType::V128);
    }

    pub fn load_gpr(&mut self, gpr: u32) -> IrValue {
        debug_assert!(gpr < 32, "gpr index out of range: {gpr}");
        self.push(IrOp::LoadGpr { gpr }, IrType::I64)
    }

    // Constants.

    pub fn load_constant(&mut self, value: Const) -> IrValue {
        let ty = value.ty();
        self.push(IrOp::Constant(value), ty)
    }

    pub fn const_i8(&mut self, value: i8) -> IrValue {
        self.load_constant(Const::I8(value))
    }

    pub fn const_i16(&mut self, value: i16) -> IrValue {
        self.load_constant(Const::I16(value))
    }

    pub fn const_i32(&mut self, value: i32) -> IrValue {
        self.load_constant(Const::I32(value))
    }

    pub fn const_i64(&mut self, value: i64) -> IrValue {
        self.load_constant(Const::I64(value))
    }

    pub fn const_f32(&mut self, value: f32) -> IrValue {
        self.load_constant(Const::f32(value))
    }

    pub fn const_v128(&mut self, value: Vec128) -> IrValue {
        self.load_constant(Const::V128(value))
    }

    /// All-zero vector.
    pub fn zero_v128(&mut self) -> IrValue {
        self.const_v128(Vec128::ZERO)
    }

    // Memory.

    pub fn load(&mut self, ea: IrValue, ty: IrType) -> IrValue {
        debug_assert_eq!(ea.ty, IrType::I64);
        self.push(IrOp::Load { ea }, ty)
    }

    pub fn store(&mut self, ea: IrValue, src: IrValue) {
        debug_assert_eq!(ea.ty, IrType::I64);
        self.push(IrOp::Store { ea, src }, src.ty);
    }

    pub fn byte_swap(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::ByteSwap { src }, src.ty)
    }

    pub fn load_vector_shl(&mut self, sh: IrValue) -> IrValue {
        self.push(IrOp::LoadVectorShl { sh }, IrType::V128)
    }

    pub fn load_vector_shr(&mut self, sh: IrValue) -> IrValue {
        self.push(IrOp::LoadVectorShr { sh }, IrType::V128)
    }

    pub fn load_vector_left(&mut self, ea: IrValue) -> IrValue {
        self.push(IrOp::LoadVectorLeft { ea }, IrType::V128)
    }

    pub fn load_vector_right(&mut self, ea: IrValue) -> IrValue {
        self.push(IrOp::LoadVectorRight { ea }, IrType::V128)
    }

    pub fn store_vector_left(&mut self, ea: IrValue, src: IrValue) {
        self.push(IrOp::StoreVectorLeft { ea, src }, src.ty);
    }

    pub fn store_vector_right(&mut self, ea: IrValue, src: IrValue) {
        self.push(IrOp::StoreVectorRight { ea, src }, src.ty);
    }

    // CPU context fields.

    pub fn load_context(&mut self, field: CtxField) -> IrValue {
        let ty = match field {
            CtxField::Vscr => IrType::V128,
            CtxField::Njm => IrType::I8,
        };
        self.push(IrOp::LoadContext { field }, ty)
    }

    pub fn store_context(&mut self, field: CtxField, src: IrValue) {
        self.push(IrOp::StoreContext { field, src }, src.ty);
    }

    // Bitwise and scalar integer.

    pub fn and(&mut self, a: IrValue, b: IrValue) -> IrValue {
        debug_assert_eq!(a.ty, b.ty);
        self.push(IrOp::And { a, b }, a.ty)
    }

    pub fn or(&mut self, a: IrValue, b: IrValue) -> IrValue {
        debug_assert_eq!(a.ty, b.ty);
        self.push(IrOp::Or { a, b }, a.ty)
    }

    pub fn xor(&mut self, a: IrValue, b: IrValue) -> IrValue {
        debug_assert_eq!(a.ty, b.ty);
        self.push(IrOp::Xor { a, b }, a.ty)
    }

    pub fn and_not(&mut self, a: IrValue, b: IrValue) -> IrValue {
        debug_assert_eq!(a.ty, b.ty);
        self.push(IrOp::AndNot { a, b }, a.ty)
    }

    pub fn not(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::Not { src }, src.ty)
    }

    pub fn neg(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::Neg { src }, src.ty)
    }

    pub fn add(&mut self, a: IrValue, b: IrValue) -> IrValue {
        debug_assert_eq!(a.ty, b.ty);
        self.push(IrOp::Add { a, b }, a.ty)
    }

    pub fn shl(&mut self, a: IrValue, b: IrValue) -> IrValue {
        self.push(IrOp::Shl { a, b }, a.ty)
    }

    pub fn shr(&mut self, a: IrValue, b: IrValue) -> IrValue {
        self.push(IrOp::Shr { a, b }, a.ty)
    }

    pub fn truncate(&mut self, src: IrValue, ty: IrType) -> IrValue {
        self.push(IrOp::Truncate { src }, ty)
    }

    pub fn is_true(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::IsTrue { src }, IrType::I8)
    }

    // Floating point, whole vector.

    pub fn mul(&mut self, a: IrValue, b: IrValue) -> IrValue {
        debug_assert_eq!(a.ty, b.ty);
        self.push(IrOp::Mul { a, b }, a.ty)
    }

    pub fn max(&mut self, a: IrValue, b: IrValue) -> IrValue {
        self.push(IrOp::Max { a, b }, a.ty)
    }

    pub fn min(&mut self, a: IrValue, b: IrValue) -> IrValue {
        self.push(IrOp::Min { a, b }, a.ty)
    }

    pub fn mul_add(&mut self, a: IrValue, b: IrValue, c: IrValue) -> IrValue {
        self.push(IrOp::MulAdd { a, b, c }, a.ty)
    }

    pub fn neg_mul_sub(&mut self, a: IrValue, b: IrValue, c: IrValue) -> IrValue {
        self.push(IrOp::NegMulSub { a, b, c }, a.ty)
    }

    pub fn recip(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::Recip { src }, src.ty)
    }

    pub fn rsqrt(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::RSqrt { src }, src.ty)
    }

    pub fn log2(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::Log2 { src }, src.ty)
    }

    pub fn pow2(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::Pow2 { src }, src.ty)
    }

    pub fn round(&mut self, src: IrValue, mode: RoundMode) -> IrValue {
        self.push(IrOp::Round { src, mode }, src.ty)
    }

    pub fn denorm_flush(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::DenormFlush { src }, src.ty)
    }

    pub fn dot3(&mut self, a: IrValue, b: IrValue) -> IrValue {
        self.push(IrOp::Dot3 { a, b }, IrType::V128)
    }

    pub fn dot4(&mut self, a: IrValue, b: IrValue) -> IrValue {
        self.push(IrOp::Dot4 { a, b }, IrType::V128)
    }

    // Lanewise vector arithmetic.

    pub fn vector_add(&mut self, a: IrValue, b: IrValue, lane: Lane, mode: ArithMode) -> IrValue {
        self.push(IrOp::VectorAdd { a, b, lane, mode }, IrType::V128)
    }

    pub fn vector_sub(&mut self, a: IrValue, b: IrValue, lane: Lane, mode: ArithMode) -> IrValue {
        self.push(IrOp::VectorSub { a, b, lane, mode }, IrType::V128)
    }

    pub fn vector_average(&mut self, a: IrValue, b: IrValue, lane: Lane, unsigned: bool) -> IrValue {
        self.push(IrOp::VectorAverage { a, b, lane, unsigned }, IrType::V128)
    }

    pub fn vector_max(&mut self, a: IrValue, b: IrValue, lane: Lane, unsigned: bool) -> IrValue {
        self.push(IrOp::VectorMax { a, b, lane, unsigned }, IrType::V128)
    }

    pub fn vector_min(&mut self, a: IrValue, b: IrValue, lane: Lane, unsigned: bool) -> IrValue {
        self.push(IrOp::VectorMin { a, b, lane, unsigned }, IrType::V128)
    }

    pub fn vector_compare(&mut self, a: IrValue, b: IrValue, lane: Lane, cond: CmpCond) -> IrValue {
        self.push(IrOp::VectorCompare { a, b, lane, cond }, IrType::V128)
    }

    pub fn vector_shl(&mut self, a: IrValue, b: IrValue, lane: Lane) -> IrValue {
        self.push(IrOp::VectorShl { a, b, lane }, IrType::V128)
    }

    pub fn vector_shr(&mut self, a: IrValue, b: IrValue, lane: Lane) -> IrValue {
        self.push(IrOp::VectorShr { a, b, lane }, IrType::V128)
    }

    pub fn vector_sha(&mut self, a: IrValue, b: IrValue, lane: Lane) -> IrValue {
        self.push(IrOp::VectorSha { a, b, lane }, IrType::V128)
    }

    pub fn vector_rotl(&mut self, a: IrValue, b: IrValue, lane: Lane) -> IrValue {
        self.push(IrOp::VectorRotl { a, b, lane }, IrType::V128)
    }

    pub fn vector_convert_i2f(&mut self, src: IrValue, unsigned: bool) -> IrValue {
        self.push(IrOp::VectorConvertI2F { src, unsigned }, IrType::V128)
    }

    pub fn vector_convert_f2i(&mut self, src: IrValue, unsigned: bool) -> IrValue {
        self.push(IrOp::VectorConvertF2I { src, unsigned }, IrType::V128)
    }

    // Shuffles.

    pub fn splat(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::Splat { src }, IrType::V128)
    }

    pub fn extract(&mut self, src: IrValue, lane: u8, ty: IrType) -> IrValue {
        self.push(IrOp::Extract { src, lane }, ty)
    }

    pub fn extract_dyn(&mut self, src: IrValue, index: IrValue, ty: IrType) -> IrValue {
        self.push(IrOp::ExtractDyn { src, index }, ty)
    }

    pub fn permute(&mut self, control: IrValue, a: IrValue, b: IrValue, lane: Lane) -> IrValue {
        self.push(IrOp::Permute { control, a, b, lane }, IrType::V128)
    }

    pub fn swizzle(&mut self, src: IrValue, mask: u8) -> IrValue {
        self.push(IrOp::Swizzle { src, mask }, IrType::V128)
    }

    pub fn select(&mut self, mask: IrValue, a: IrValue, b: IrValue) -> IrValue {
        self.push(IrOp::Select { mask, a, b }, IrType::V128)
    }

    pub fn pack(&mut self, a: IrValue, b: Option<IrValue>, format: PackFormat) -> IrValue {
        self.push(IrOp::Pack { a, b, format }, IrType::V128)
    }

    pub fn unpack(&mut self, src: IrValue, format: UnpackFormat) -> IrValue {
        self.push(IrOp::Unpack { src, format }, IrType::V128)
    }

    // Side channels.

    pub fn did_saturate(&mut self, src: IrValue) -> IrValue {
        self.push(IrOp::DidSaturate { src }, IrType::I8)
    }

    pub fn store_sat(&mut self, src: IrValue) {
        self.push(IrOp::StoreSat { src }, IrType::I8);
    }

    pub fn update_cr6(&mut self, src: IrValue) {
        debug_assert_eq!(src.ty, IrType::V128);
        self.push(IrOp::UpdateCr6 { src }, IrType::V128);
    }
}
