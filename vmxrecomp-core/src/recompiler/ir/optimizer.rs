//! IR Optimization Passes
//!
//! Block-local cleanup run after translation, before the block is handed to
//! the code generator:
//!
//! - **Constant propagation**: replaces pure operations whose operands are
//!   all constants with the folded constant, using the lane-exact
//!   evaluation in [`fold`].
//! - **Dead-op elimination**: removes pure operations whose values never
//!   reach a store or side-channel update. Removed operations become
//!   [`IrOp::Nop`] tombstones so value indices stay stable.
//!
//! Both passes are optional; the emitted IR is correct without them.

use super::fold;
use super::instruction::{Const, IrBlock, IrOp, IrValue};

/// Optimizer for one translated block.
pub struct IrOptimizer;

impl IrOptimizer {
    /// Run all passes in order.
    pub fn optimize(block: &mut IrBlock) {
        Self::propagate_constants(block);
        Self::eliminate_dead_ops(block);
    }

    /// Fold pure operations with fully-constant operands.
    pub fn propagate_constants(block: &mut IrBlock) {
        for index in 0..block.len() {
            let inst = block.insts()[index];
            if inst.op.has_side_effect() {
                continue;
            }
            let folded = fold::try_eval(&inst, |value: IrValue| {
                match block.insts()[value.index as usize].op {
                    IrOp::Constant(c) => Some(c),
                    _ => None,
                }
            });
            if let Some(c) = folded {
                debug_assert_eq!(c.ty(), inst.ty);
                block.insts_mut()[index].op = IrOp::Constant(c);
            }
        }
    }

    /// Tombstone pure operations whose results are never used.
    pub fn eliminate_dead_ops(block: &mut IrBlock) {
        let mut live = vec![false; block.len()];
        for index in (0..block.len()).rev() {
            let inst = &block.insts()[index];
            if inst.op.has_side_effect() {
                live[index] = true;
            }
            if live[index] {
                for src in inst.op.sources() {
                    live[src.index as usize] = true;
                }
            }
        }
        for (index, inst) in block.insts_mut().iter_mut().enumerate() {
            if !live[index] {
                inst.op = IrOp::Nop;
            }
        }
    }

    /// Constant value of `value` after propagation, if it folded.
    pub fn constant_of(block: &IrBlock, value: IrValue) -> Option<Const> {
        match block.inst(value).op {
            IrOp::Constant(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recompiler::ir::builder::IrBuilder;
    use crate::recompiler::ir::instruction::{ArithMode, Lane};
    use crate::recompiler::ir::vec128::Vec128;

    #[test]
    fn folds_constant_vector_add() {
        let mut f = IrBuilder::new();
        let a = f.const_v128(Vec128::splat_u32(7));
        let b = f.const_v128(Vec128::splat_u32(5));
        let v = f.vector_add(a, b, Lane::I32, ArithMode::UNSIGNED);
        f.store_vr(0, v);

        let mut block = f.into_block();
        IrOptimizer::propagate_constants(&mut block);
        assert_eq!(
            IrOptimizer::constant_of(&block, v),
            Some(crate::recompiler::ir::instruction::Const::V128(Vec128::splat_u32(12)))
        );
    }

    #[test]
    fn dead_ops_are_tombstoned() {
        let mut f = IrBuilder::new();
        let a = f.load_vr(1);
        let b = f.load_vr(2);
        let unused = f.xor(a, b);
        let kept = f.and(a, b);
        f.store_vr(0, kept);

        let mut block = f.into_block();
        IrOptimizer::eliminate_dead_ops(&mut block);
        assert_eq!(block.inst(unused).op, IrOp::Nop);
        assert_ne!(block.inst(kept).op, IrOp::Nop);
    }
}
