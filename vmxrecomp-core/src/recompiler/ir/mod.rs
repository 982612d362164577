//! Intermediate Representation
//!
//! SSA operation set, builder, 128-bit constants, constant evaluation, and
//! block-local optimization passes for the vector translator.

pub mod builder;
pub mod fold;
pub mod instruction;
pub mod optimizer;
pub mod vec128;

pub use builder::IrBuilder;
pub use instruction::{
    ArithMode, CmpCond, Const, CtxField, IrBlock, IrInst, IrOp, IrType, IrValue, Lane,
    NarrowWidth, PackFormat, RoundMode, UnpackFormat, UnpackPart,
};
pub use vec128::Vec128;
