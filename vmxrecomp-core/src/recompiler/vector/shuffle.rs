//! Vector Permutation and Shuffle Emitters
//!
//! Splats, merges, the generalized byte permute, concatenate-and-shift
//! (vsldoi) and the VMX128 blend-with-rotate (vrlimi128). The merge and
//! concatenate emitters draw their control vectors from
//! [`tables`](super::tables); the fast paths (vsldoi shift 0/16, vrlimi
//! identity blend) are defined behavior and must stay bit-identical to the
//! general permute they bypass.

use crate::recompiler::decoder::InstrData;
use crate::recompiler::ir::{IrBuilder, IrType, Lane, Vec128};

use super::tables::{
    word_permute_mask, swizzle_mask, IDENTITY_PERMUTE_MASK, MERGE_HIGH_BYTES, MERGE_HIGH_HALVES,
    MERGE_LOW_BYTES, MERGE_LOW_HALVES, SWIZZLE_XYZW_TO_WXYZ, SWIZZLE_XYZW_TO_YZWX,
    SWIZZLE_XYZW_TO_ZWXY, VSLDOI_CONTROL,
};
use super::EmitResult;

pub(super) fn vspltb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let src = f.load_vr(i.vx_vb());
    let b = f.extract(src, (i.vx_va() & 0xF) as u8, IrType::I8);
    let v = f.splat(b);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

pub(super) fn vsplth(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let src = f.load_vr(i.vx_vb());
    let h = f.extract(src, (i.vx_va() & 0x7) as u8, IrType::I16);
    let v = f.splat(h);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

fn vspltw_impl(f: &mut IrBuilder, vd: u32, vb: u32, uimm: u32) -> EmitResult {
    let src = f.load_vr(vb);
    let w = f.extract(src, (uimm & 0x3) as u8, IrType::I32);
    let v = f.splat(w);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vspltw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vspltw_impl(f, i.vx_vd(), i.vx_vb(), i.vx_va())
}

pub(super) fn vspltw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vspltw_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), i.vx128_3_imm())
}

/// Sign-extend a 5-bit immediate.
const fn simm5(uimm: u32) -> i32 {
    ((uimm << 27) as i32) >> 27
}

// The splat-immediate family sign-extends a 5-bit field to the lane width.
// Immediate 0 loads the zero vector directly, bypassing sign extension.

pub(super) fn vspltisb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let uimm = i.vx_va();
    let v = if uimm != 0 {
        let c = f.const_i8(simm5(uimm) as i8);
        f.splat(c)
    } else {
        f.zero_v128()
    };
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

pub(super) fn vspltish(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let uimm = i.vx_va();
    let v = if uimm != 0 {
        let c = f.const_i16(simm5(uimm) as i16);
        f.splat(c)
    } else {
        f.zero_v128()
    };
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

fn vspltisw_impl(f: &mut IrBuilder, vd: u32, uimm: u32) -> EmitResult {
    let v = if uimm != 0 {
        let c = f.const_i32(simm5(uimm));
        f.splat(c)
    } else {
        f.zero_v128()
    };
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vspltisw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vspltisw_impl(f, i.vx_vd(), i.vx_va())
}

pub(super) fn vspltisw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vspltisw_impl(f, i.vx128_3_vd(), i.vx128_3_imm())
}

fn merge_bytes_impl(f: &mut IrBuilder, i: InstrData, control: Vec128) -> EmitResult {
    let c = f.const_v128(control);
    let a = f.load_vr(i.vx_va());
    let b = f.load_vr(i.vx_vb());
    let v = f.permute(c, a, b, Lane::I8);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

pub(super) fn vmrghb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    merge_bytes_impl(f, i, MERGE_HIGH_BYTES)
}

pub(super) fn vmrglb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    merge_bytes_impl(f, i, MERGE_LOW_BYTES)
}

pub(super) fn vmrghh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    merge_bytes_impl(f, i, MERGE_HIGH_HALVES)
}

pub(super) fn vmrglh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    merge_bytes_impl(f, i, MERGE_LOW_HALVES)
}

fn vmrghw_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    // VD = A.x B.x A.y B.y
    let c = f.const_i32(word_permute_mask(0, 0, 1, 0, 0, 1, 1, 1) as i32);
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.permute(c, a, b, Lane::I32);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vmrghw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmrghw_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vmrghw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmrghw_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vmrglw_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    // VD = A.z B.z A.w B.w
    let c = f.const_i32(word_permute_mask(0, 2, 1, 2, 0, 3, 1, 3) as i32);
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.permute(c, a, b, Lane::I32);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vmrglw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmrglw_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vmrglw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmrglw_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vperm_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, vc: u32) -> EmitResult {
    let control = f.load_vr(vc);
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.permute(control, a, b, Lane::I8);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vperm(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vperm_impl(f, i.vxa_vd(), i.vxa_va(), i.vxa_vb(), i.vxa_vc())
}

pub(super) fn vperm128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vperm_impl(f, i.vx128_2_vd(), i.vx128_2_va(), i.vx128_2_vb(), i.vx128_2_vc())
}

pub(super) fn vpermwi128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    // VD.x = VB[perm bits 6-7], VD.y = VB[4-5], VD.z = VB[2-3], VD.w = VB[0-1]
    let perm = i.vx128_p_perm();
    let mask = swizzle_mask(perm >> 6, perm >> 4, perm >> 2, perm);
    let b = f.load_vr(i.vx128_p_vb());
    let v = f.swizzle(b, mask);
    f.store_vr(i.vx128_p_vd(), v);
    Ok(())
}

fn vsldoi_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, sh: u32) -> EmitResult {
    // (VD) <- (VA || VB) << (SH * 8)
    if sh == 0 {
        let v = f.load_vr(va);
        f.store_vr(vd, v);
        return Ok(());
    } else if sh == 16 {
        let v = f.load_vr(vb);
        f.store_vr(vd, v);
        return Ok(());
    }
    let control = f.const_v128(VSLDOI_CONTROL[sh as usize]);
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.permute(control, a, b, Lane::I8);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vsldoi(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vsldoi_impl(f, i.vxa_vd(), i.vxa_va(), i.vxa_vb(), i.vxa_vc() & 0xF)
}

pub(super) fn vsldoi128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vsldoi_impl(f, i.vx128_5_vd(), i.vx128_5_va(), i.vx128_5_vb(), i.vx128_5_sh())
}

pub(super) fn vrlimi128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let vd = i.vx128_4_vd();
    let vb = i.vx128_4_vb();
    let blend_src = i.vx128_4_imm();
    let rotate = i.vx128_4_z();

    // Rotate VB left by 0-3 word lanes, then blend lane-by-lane into VD.
    // The 4-bit immediate selects "new" per lane, bit 3 naming lane 0.
    let mut blend_mask: u32 = 0;
    blend_mask |= if blend_src >> 3 & 0x1 != 0 { 0 } else { 4 };
    blend_mask |= (if blend_src >> 2 & 0x1 != 0 { 1 } else { 5 }) << 8;
    blend_mask |= (if blend_src >> 1 & 0x1 != 0 { 2 } else { 6 }) << 16;
    blend_mask |= (if blend_src & 0x1 != 0 { 3 } else { 7 }) << 24;

    let mut v = f.load_vr(vb);
    if rotate != 0 {
        let swizzle = match rotate {
            1 => SWIZZLE_XYZW_TO_YZWX,
            2 => SWIZZLE_XYZW_TO_ZWXY,
            3 => SWIZZLE_XYZW_TO_WXYZ,
            _ => unreachable!("rotate field is two bits"),
        };
        v = f.swizzle(v, swizzle);
    }
    if blend_mask != IDENTITY_PERMUTE_MASK {
        let control = f.const_i32(blend_mask as i32);
        let old = f.load_vr(vd);
        v = f.permute(control, v, old, Lane::I32);
    }
    f.store_vr(vd, v);
    Ok(())
}
