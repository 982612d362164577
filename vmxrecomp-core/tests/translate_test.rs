//! Unit tests for translator emission shape
//!
//! These tests assert on the structure of the emitted IR: which operations
//! appear, in what order, and which value feeds each side channel. Numeric
//! behavior of the operations themselves is covered by `fold_test`.

use vmxrecomp_core::recompiler::decoder::InstrData;
use vmxrecomp_core::recompiler::error::TranslateError;
use vmxrecomp_core::recompiler::ir::optimizer::IrOptimizer;
use vmxrecomp_core::recompiler::ir::{
    ArithMode, Const, CtxField, IrBlock, IrBuilder, IrOp, IrValue, Lane, Vec128,
};
use vmxrecomp_core::recompiler::vector::{tables, translate, Opcode};

fn vx(vd: u32, va: u32, vb: u32) -> InstrData {
    InstrData::new(vd << 21 | va << 16 | vb << 11)
}

fn vxr(vd: u32, va: u32, vb: u32, rc: bool) -> InstrData {
    InstrData::new(vd << 21 | va << 16 | vb << 11 | (rc as u32) << 10)
}

fn vxa(vd: u32, va: u32, vb: u32, vc: u32) -> InstrData {
    InstrData::new(vd << 21 | va << 16 | vb << 11 | vc << 6)
}

fn emit(opcode: Opcode, i: InstrData) -> IrBlock {
    let mut f = IrBuilder::new();
    translate(&mut f, opcode, i).expect("translation should succeed");
    f.into_block()
}

/// Source value of the last store to `vr`.
fn stored_value(block: &IrBlock, vr: u32) -> IrValue {
    block
        .insts()
        .iter()
        .rev()
        .find_map(|inst| match inst.op {
            IrOp::StoreVr { vr: r, src } if r == vr => Some(src),
            _ => None,
        })
        .expect("no store to the destination register")
}

fn count_ops(block: &IrBlock, pred: impl Fn(&IrOp) -> bool) -> usize {
    block.insts().iter().filter(|inst| pred(&inst.op)).count()
}

#[test]
fn test_unimplemented_opcode_fails_by_name() {
    let mut f = IrBuilder::new();
    let err = translate(&mut f, Opcode::Vmulesb, vx(0, 1, 2)).unwrap_err();
    assert_eq!(err, TranslateError::Unimplemented(Opcode::Vmulesb));
    assert!(err.to_string().contains("vmulesb"));
    // No IR may be emitted for a failed translation.
    assert!(f.block().is_empty());
}

#[test]
fn test_every_opcode_is_registered() {
    // Each table entry either emits IR or reports itself unimplemented;
    // nothing panics and nothing silently emits a no-op.
    for &opcode in Opcode::ALL {
        let mut f = IrBuilder::new();
        match translate(&mut f, opcode, InstrData::new(0)) {
            Ok(()) => assert!(!f.block().is_empty(), "{} emitted nothing", opcode.mnemonic()),
            Err(TranslateError::Unimplemented(op)) => {
                assert_eq!(op.mnemonic(), opcode.mnemonic());
                assert!(f.block().is_empty());
            }
            // vpkd3d128 rejects its pack=0 sub-encoding before emitting.
            Err(TranslateError::UnhandledEncoding { .. }) => {
                assert!(f.block().is_empty());
            }
        }
    }
}

#[test]
fn test_vspltisb_zero_immediate_loads_zero() {
    let block = emit(Opcode::Vspltisb, vx(4, 0, 0));
    let src = stored_value(&block, 4);
    assert_eq!(block.inst(src).op, IrOp::Constant(Const::V128(Vec128::ZERO)));
}

#[test]
fn test_vspltisb_sign_extends_immediate() {
    // 0x1F is -1 in 5-bit two's complement: sixteen 0xFF bytes.
    let block = emit(Opcode::Vspltisb, vx(4, 0x1F, 0));
    let src = stored_value(&block, 4);
    let IrOp::Splat { src: scalar } = block.inst(src).op else {
        panic!("expected a splat");
    };
    assert_eq!(block.inst(scalar).op, IrOp::Constant(Const::I8(-1)));
}

#[test]
fn test_vspltish_sign_extends_to_halfword() {
    let block = emit(Opcode::Vspltish, vx(2, 0x10, 0));
    let src = stored_value(&block, 2);
    let IrOp::Splat { src: scalar } = block.inst(src).op else {
        panic!("expected a splat");
    };
    assert_eq!(block.inst(scalar).op, IrOp::Constant(Const::I16(-16)));
}

#[test]
fn test_saturating_add_updates_sat_from_its_result() {
    let block = emit(Opcode::Vaddubs, vx(1, 2, 3));
    let v = stored_value(&block, 1);
    let IrOp::VectorAdd { lane, mode, .. } = block.inst(v).op else {
        panic!("expected a lanewise add");
    };
    assert_eq!(lane, Lane::I8);
    assert_eq!(mode, ArithMode::UNSIGNED_SAT);
    // DidSaturate must consume exactly the add's value, and feed StoreSat.
    let did = block
        .insts()
        .iter()
        .find_map(|inst| match inst.op {
            IrOp::DidSaturate { src } => Some(src),
            _ => None,
        })
        .expect("missing saturation query");
    assert_eq!(did, v);
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::StoreSat { .. })), 1);
}

#[test]
fn test_wrapping_add_skips_sat_update() {
    let block = emit(Opcode::Vaddubm, vx(1, 2, 3));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::StoreSat { .. })), 0);
}

#[test]
fn test_record_compare_updates_cr6_from_unmodified_mask() {
    let block = emit(Opcode::Vcmpeqfp, vxr(1, 2, 3, true));
    let mask = stored_value(&block, 1);
    let cr6 = block
        .insts()
        .iter()
        .find_map(|inst| match inst.op {
            IrOp::UpdateCr6 { src } => Some(src),
            _ => None,
        })
        .expect("record form must update CR6");
    assert_eq!(cr6, mask);
}

#[test]
fn test_non_record_compare_skips_cr6() {
    let block = emit(Opcode::Vcmpeqfp, vxr(1, 2, 3, false));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::UpdateCr6 { .. })), 0);
}

#[test]
fn test_vcmpbfp_sets_two_bound_bits() {
    let block = emit(Opcode::Vcmpbfp, vxr(0, 1, 2, false));
    let hi = Const::V128(Vec128::splat_u32(0x8000_0000));
    let lo = Const::V128(Vec128::splat_u32(0x4000_0000));
    let consts: Vec<_> = block
        .insts()
        .iter()
        .filter_map(|inst| match inst.op {
            IrOp::Constant(c) => Some(c),
            _ => None,
        })
        .collect();
    assert!(consts.contains(&hi));
    assert!(consts.contains(&lo));
    let v = stored_value(&block, 0);
    assert!(matches!(block.inst(v).op, IrOp::Or { .. }));
}

#[test]
fn test_vsldoi_zero_shift_is_a_register_copy() {
    let block = emit(Opcode::Vsldoi, vxa(1, 2, 3, 0));
    let src = stored_value(&block, 1);
    assert_eq!(block.inst(src).op, IrOp::LoadVr { vr: 2 });
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::Permute { .. })), 0);
}

#[test]
fn test_vsldoi_general_path_uses_control_table() {
    let sh = 5u32;
    let block = emit(Opcode::Vsldoi, vxa(1, 2, 3, sh));
    let src = stored_value(&block, 1);
    let IrOp::Permute { control, lane: Lane::I8, .. } = block.inst(src).op else {
        panic!("expected a byte permute");
    };
    assert_eq!(
        block.inst(control).op,
        IrOp::Constant(Const::V128(tables::VSLDOI_CONTROL[sh as usize]))
    );
}

#[test]
fn test_vrlimi_all_new_no_rotate_is_a_copy() {
    // imm selects "new" for every lane and the rotate count is zero, so
    // the source lands in the destination untouched.
    let vd = 1u32;
    let vb = 9u32;
    let word = vd << 21 | 0xF << 16 | vb << 11;
    let block = emit(Opcode::Vrlimi128, InstrData::new(word));
    let src = stored_value(&block, vd);
    assert_eq!(block.inst(src).op, IrOp::LoadVr { vr: vb });
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::Permute { .. })), 0);
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::Swizzle { .. })), 0);
}

#[test]
fn test_vrlimi_rotate_without_blend_swizzles() {
    // All lanes "new" with rotate 2: one swizzle, still no blend permute.
    let word = 1 << 21 | 0xF << 16 | 9 << 11 | 2 << 6;
    let block = emit(Opcode::Vrlimi128, InstrData::new(word));
    let src = stored_value(&block, 1);
    assert!(matches!(block.inst(src).op, IrOp::Swizzle { .. }));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::Permute { .. })), 0);
}

#[test]
fn test_vmaddfp_flushes_every_input_denormal() {
    let block = emit(Opcode::Vmaddfp, vxa(1, 2, 3, 4));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::DenormFlush { .. })), 3);
    let v = stored_value(&block, 1);
    let IrOp::MulAdd { a, b, c } = block.inst(v).op else {
        panic!("expected fused multiply-add");
    };
    for operand in [a, b, c] {
        assert!(matches!(block.inst(operand).op, IrOp::DenormFlush { .. }));
    }
    // Output denormals are left as produced.
    assert!(!matches!(block.inst(v).op, IrOp::DenormFlush { .. }));
}

#[test]
fn test_vnmsubfp_flushes_every_input_denormal() {
    let block = emit(Opcode::Vnmsubfp, vxa(1, 2, 3, 4));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::DenormFlush { .. })), 3);
    let v = stored_value(&block, 1);
    assert!(matches!(block.inst(v).op, IrOp::NegMulSub { .. }));
}

#[test]
fn test_dot_product_flushes_the_result() {
    let word = 1 << 21 | 2 << 16 | 3 << 11;
    let block = emit(Opcode::Vmsum3fp128, InstrData::new(word));
    let v = stored_value(&block, 1);
    let IrOp::DenormFlush { src } = block.inst(v).op else {
        panic!("dot product result must be flushed");
    };
    assert!(matches!(block.inst(src).op, IrOp::Dot3 { .. }));
}

#[test]
fn test_vcfsx_zero_immediate_skips_the_scale() {
    let block = emit(Opcode::Vcfsx, vx(1, 0, 3));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::Mul { .. })), 0);
    let v = stored_value(&block, 1);
    assert!(matches!(block.inst(v).op, IrOp::VectorConvertI2F { unsigned: false, .. }));
}

#[test]
fn test_vcfsx_nonzero_immediate_scales_down() {
    let block = emit(Opcode::Vcfsx, vx(1, 3, 3));
    let v = stored_value(&block, 1);
    let IrOp::Mul { b, .. } = block.inst(v).op else {
        panic!("expected the power-of-two scale multiply");
    };
    let IrOp::Splat { src } = block.inst(b).op else {
        panic!("scale must be splatted");
    };
    assert_eq!(block.inst(src).op, IrOp::Constant(Const::f32(0.125)));
}

#[test]
fn test_vctsxs_saturates_and_reports() {
    let block = emit(Opcode::Vctsxs, vx(1, 0, 3));
    let v = stored_value(&block, 1);
    assert!(matches!(block.inst(v).op, IrOp::VectorConvertF2I { unsigned: false, .. }));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::StoreSat { .. })), 1);
}

#[test]
fn test_vor_same_source_is_a_copy() {
    let block = emit(Opcode::Vor, vx(1, 5, 5));
    let src = stored_value(&block, 1);
    assert_eq!(block.inst(src).op, IrOp::LoadVr { vr: 5 });
}

#[test]
fn test_vxor_same_source_clears() {
    let block = emit(Opcode::Vxor, vx(1, 5, 5));
    let src = stored_value(&block, 1);
    assert_eq!(block.inst(src).op, IrOp::Constant(Const::V128(Vec128::ZERO)));
}

#[test]
fn test_vslo_permutes_against_zero() {
    let block = emit(Opcode::Vslo, vx(1, 2, 3));
    let v = stored_value(&block, 1);
    let IrOp::Permute { b, lane: Lane::I8, .. } = block.inst(v).op else {
        panic!("expected byte permute");
    };
    assert_eq!(block.inst(b).op, IrOp::Constant(Const::V128(Vec128::ZERO)));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::LoadVectorShl { .. })), 1);
}

#[test]
fn test_mtvscr_updates_njm_and_vscr() {
    let block = emit(Opcode::Mtvscr, vx(0, 0, 3));
    let njm = block
        .insts()
        .iter()
        .find_map(|inst| match inst.op {
            IrOp::StoreContext { field: CtxField::Njm, src } => Some(src),
            _ => None,
        })
        .expect("mtvscr must update the NJM flag");
    assert!(matches!(block.inst(njm).op, IrOp::IsTrue { .. }));
    assert_eq!(
        count_ops(&block, |op| matches!(op, IrOp::StoreContext { field: CtxField::Vscr, .. })),
        1
    );
}

#[test]
fn test_mfvscr_reads_the_context_image() {
    let block = emit(Opcode::Mfvscr, vx(7, 0, 0));
    let src = stored_value(&block, 7);
    assert_eq!(block.inst(src).op, IrOp::LoadContext { field: CtxField::Vscr });
}

#[test]
fn test_lvx_strips_and_swaps() {
    let block = emit(Opcode::Lvx, vx(1, 2, 3));
    let v = stored_value(&block, 1);
    assert!(matches!(block.inst(v).op, IrOp::ByteSwap { .. }));
    let mask = block
        .insts()
        .iter()
        .find_map(|inst| match inst.op {
            IrOp::Constant(Const::I64(m)) => Some(m),
            _ => None,
        })
        .expect("alignment mask constant");
    assert_eq!(mask, !0xF);
}

#[test]
fn test_lvrx_does_not_widen_the_access() {
    let block = emit(Opcode::Lvrx, vx(1, 2, 3));
    let v = stored_value(&block, 1);
    assert!(matches!(block.inst(v).op, IrOp::LoadVectorRight { .. }));
    assert_eq!(count_ops(&block, |op| matches!(op, IrOp::Load { .. })), 0);
}

#[test]
fn test_vsl_uses_low_three_bits_of_byte_fifteen() {
    let block = emit(Opcode::Vsl, vx(1, 2, 3));
    let v = stored_value(&block, 1);
    let IrOp::Shl { b, .. } = block.inst(v).op else {
        panic!("expected whole-quadword shift");
    };
    let IrOp::And { b: m, .. } = block.inst(b).op else {
        panic!("shift amount must be masked");
    };
    assert_eq!(block.inst(m).op, IrOp::Constant(Const::I8(7)));
}

#[test]
fn test_optimizer_folds_splat_immediate_to_bytes() {
    // After constant propagation, vspltisb 0x1F resolves to sixteen 0xFF
    // bytes stored into the destination register.
    let mut f = IrBuilder::new();
    translate(&mut f, Opcode::Vspltisb, vx(4, 0x1F, 0)).unwrap();
    let mut block = f.into_block();
    IrOptimizer::optimize(&mut block);
    let src = stored_value(&block, 4);
    assert_eq!(
        block.inst(src).op,
        IrOp::Constant(Const::V128(Vec128::splat_u8(0xFF)))
    );
}

#[test]
fn test_optimizer_preserves_guest_dependent_ops() {
    let mut f = IrBuilder::new();
    translate(&mut f, Opcode::Vaddubs, vx(1, 2, 3)).unwrap();
    let mut block = f.into_block();
    IrOptimizer::optimize(&mut block);
    // Register loads are not constants; nothing may fold or vanish.
    assert_eq!(
        block
            .insts()
            .iter()
            .filter(|inst| matches!(inst.op, IrOp::Nop))
            .count(),
        0
    );
    let v = stored_value(&block, 1);
    assert!(matches!(block.inst(v).op, IrOp::VectorAdd { .. }));
}

#[test]
fn test_vmaddfp128_reuses_vd_as_addend() {
    // vd = va * vb + vd in the 128-register encoding.
    let vd = 1u32;
    let va = 2u32;
    let vb = 3u32;
    let word = vd << 21 | va << 16 | vb << 11;
    let block = emit(Opcode::Vmaddfp128, InstrData::new(word));
    let loads: Vec<u32> = block
        .insts()
        .iter()
        .filter_map(|inst| match inst.op {
            IrOp::LoadVr { vr } => Some(vr),
            _ => None,
        })
        .collect();
    assert_eq!(loads, vec![va, vd, vb]);
}
