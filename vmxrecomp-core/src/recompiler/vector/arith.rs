//! Vector Arithmetic and Logical Emitters
//!
//! One generic body per opcode family, parameterized by lane width and an
//! arithmetic mode, with thin per-mnemonic wrappers resolving the operand
//! fields of each encoding. Saturating forms are always followed by a SAT
//! update derived from that exact operation's result; record forms update
//! CR6 from the unmodified compare mask.

use crate::recompiler::decoder::InstrData;
use crate::recompiler::ir::{ArithMode, CmpCond, IrBuilder, IrType, Lane, Vec128};

use super::EmitResult;

fn vector_add_impl(
    f: &mut IrBuilder,
    vd: u32,
    va: u32,
    vb: u32,
    lane: Lane,
    mode: ArithMode,
) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.vector_add(a, b, lane, mode);
    if mode.saturate {
        let sat = f.did_saturate(v);
        f.store_sat(sat);
    }
    f.store_vr(vd, v);
    Ok(())
}

fn vector_sub_impl(
    f: &mut IrBuilder,
    vd: u32,
    va: u32,
    vb: u32,
    lane: Lane,
    mode: ArithMode,
) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.vector_sub(a, b, lane, mode);
    if mode.saturate {
        let sat = f.did_saturate(v);
        f.store_sat(sat);
    }
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vaddfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::F32, ArithMode::SIGNED)
}

pub(super) fn vaddfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), Lane::F32, ArithMode::SIGNED)
}

pub(super) fn vaddsbs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8, ArithMode::SIGNED_SAT)
}

pub(super) fn vaddshs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16, ArithMode::SIGNED_SAT)
}

pub(super) fn vaddsws(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32, ArithMode::SIGNED_SAT)
}

pub(super) fn vaddubm(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8, ArithMode::UNSIGNED)
}

pub(super) fn vaddubs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8, ArithMode::UNSIGNED_SAT)
}

pub(super) fn vadduhm(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16, ArithMode::UNSIGNED)
}

pub(super) fn vadduhs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16, ArithMode::UNSIGNED_SAT)
}

pub(super) fn vadduwm(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32, ArithMode::UNSIGNED)
}

pub(super) fn vadduws(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_add_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32, ArithMode::UNSIGNED_SAT)
}

pub(super) fn vsubfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::F32, ArithMode::SIGNED)
}

pub(super) fn vsubfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), Lane::F32, ArithMode::SIGNED)
}

pub(super) fn vsubsbs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8, ArithMode::SIGNED_SAT)
}

pub(super) fn vsubshs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16, ArithMode::SIGNED_SAT)
}

pub(super) fn vsubsws(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32, ArithMode::SIGNED_SAT)
}

pub(super) fn vsububm(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8, ArithMode::UNSIGNED)
}

pub(super) fn vsububs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8, ArithMode::UNSIGNED_SAT)
}

pub(super) fn vsubuhm(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16, ArithMode::UNSIGNED)
}

pub(super) fn vsubuhs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16, ArithMode::UNSIGNED_SAT)
}

pub(super) fn vsubuwm(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32, ArithMode::UNSIGNED)
}

pub(super) fn vsubuws(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sub_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32, ArithMode::UNSIGNED_SAT)
}

fn vavg_impl(f: &mut IrBuilder, i: InstrData, lane: Lane, unsigned: bool) -> EmitResult {
    let a = f.load_vr(i.vx_va());
    let b = f.load_vr(i.vx_vb());
    let v = f.vector_average(a, b, lane, unsigned);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

pub(super) fn vavgsb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vavg_impl(f, i, Lane::I8, false)
}

pub(super) fn vavgsh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vavg_impl(f, i, Lane::I16, false)
}

pub(super) fn vavgsw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vavg_impl(f, i, Lane::I32, false)
}

pub(super) fn vavgub(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vavg_impl(f, i, Lane::I8, true)
}

pub(super) fn vavguh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vavg_impl(f, i, Lane::I16, true)
}

pub(super) fn vavguw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vavg_impl(f, i, Lane::I32, true)
}

// Bitwise family.

fn vand_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.and(a, b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vand(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vand_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vand128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vand_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vandc_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.and_not(a, b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vandc(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vandc_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vandc128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vandc_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vnor_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let or = f.or(a, b);
    let v = f.not(or);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vnor(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vnor_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vnor128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vnor_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vor_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    // vor vd, vx, vx is the canonical register copy.
    if va == vb {
        let v = f.load_vr(va);
        f.store_vr(vd, v);
    } else {
        let a = f.load_vr(va);
        let b = f.load_vr(vb);
        let v = f.or(a, b);
        f.store_vr(vd, v);
    }
    Ok(())
}

pub(super) fn vor(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vor_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vor128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vor_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vxor_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    // vxor vd, vx, vx is the canonical register clear.
    let v = if va == vb {
        f.zero_v128()
    } else {
        let a = f.load_vr(va);
        let b = f.load_vr(vb);
        f.xor(a, b)
    };
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vxor(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vxor_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vxor128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vxor_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vsel_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, vc: u32) -> EmitResult {
    let mask = f.load_vr(vc);
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.select(mask, a, b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vsel(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vsel_impl(f, i.vxa_vd(), i.vxa_va(), i.vxa_vb(), i.vxa_vc())
}

pub(super) fn vsel128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    // The 128-register encoding reuses VD as the select control.
    vsel_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), i.vx128_vd())
}

// Min/max.

fn vmaxfp_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.max(a, b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vmaxfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmaxfp_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vmaxfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmaxfp_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vminfp_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.min(a, b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vminfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vminfp_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vminfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vminfp_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vmax_impl(f: &mut IrBuilder, i: InstrData, lane: Lane, unsigned: bool) -> EmitResult {
    let a = f.load_vr(i.vx_va());
    let b = f.load_vr(i.vx_vb());
    let v = f.vector_max(a, b, lane, unsigned);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

pub(super) fn vmaxsb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmax_impl(f, i, Lane::I8, false)
}

pub(super) fn vmaxsh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmax_impl(f, i, Lane::I16, false)
}

pub(super) fn vmaxsw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmax_impl(f, i, Lane::I32, false)
}

pub(super) fn vmaxub(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmax_impl(f, i, Lane::I8, true)
}

pub(super) fn vmaxuh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmax_impl(f, i, Lane::I16, true)
}

pub(super) fn vmaxuw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmax_impl(f, i, Lane::I32, true)
}

fn vmin_impl(f: &mut IrBuilder, i: InstrData, lane: Lane, unsigned: bool) -> EmitResult {
    let a = f.load_vr(i.vx_va());
    let b = f.load_vr(i.vx_vb());
    let v = f.vector_min(a, b, lane, unsigned);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

pub(super) fn vminsb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmin_impl(f, i, Lane::I8, false)
}

pub(super) fn vminsh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmin_impl(f, i, Lane::I16, false)
}

pub(super) fn vminsw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmin_impl(f, i, Lane::I32, false)
}

pub(super) fn vminub(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmin_impl(f, i, Lane::I8, true)
}

pub(super) fn vminuh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmin_impl(f, i, Lane::I16, true)
}

pub(super) fn vminuw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmin_impl(f, i, Lane::I32, true)
}

// Rotates and shifts.

fn vrl_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, lane: Lane) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.vector_rotl(a, b, lane);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vrlb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrl_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8)
}

pub(super) fn vrlh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrl_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16)
}

pub(super) fn vrlw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrl_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32)
}

pub(super) fn vrlw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrl_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), Lane::I32)
}

// vsl/vsr shift the whole quadword by 0-7 bits. The architecture only
// defines the result when all shift-amount lanes agree; the amount is
// taken from byte 15 alone, an approximation for the undocumented
// mismatched-lane case.

pub(super) fn vsl(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let a = f.load_vr(i.vx_va());
    let b = f.load_vr(i.vx_vb());
    let b15 = f.extract(b, 15, IrType::I8);
    let seven = f.const_i8(0b111);
    let sh = f.and(b15, seven);
    let v = f.shl(a, sh);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

pub(super) fn vsr(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let a = f.load_vr(i.vx_va());
    let b = f.load_vr(i.vx_vb());
    let b15 = f.extract(b, 15, IrType::I8);
    let seven = f.const_i8(0b111);
    let sh = f.and(b15, seven);
    let v = f.shr(a, sh);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

fn vector_shl_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, lane: Lane) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.vector_shl(a, b, lane);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vslb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_shl_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8)
}

pub(super) fn vslh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_shl_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16)
}

pub(super) fn vslw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_shl_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32)
}

pub(super) fn vslw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_shl_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), Lane::I32)
}

fn vector_shr_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, lane: Lane) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.vector_shr(a, b, lane);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vsrb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_shr_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8)
}

pub(super) fn vsrh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_shr_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16)
}

pub(super) fn vsrw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_shr_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32)
}

pub(super) fn vsrw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_shr_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), Lane::I32)
}

fn vector_sha_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, lane: Lane) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.vector_sha(a, b, lane);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vsrab(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sha_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I8)
}

pub(super) fn vsrah(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sha_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I16)
}

pub(super) fn vsraw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sha_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), Lane::I32)
}

pub(super) fn vsraw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vector_sha_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), Lane::I32)
}

// Shift by octet: a byte permute through the lvsl/lvsr tables with a
// zero-filled second source, so vacated bytes read as zero.

fn vslo_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    let b = f.load_vr(vb);
    let b15 = f.extract(b, 15, IrType::I8);
    let bits = f.const_i8(0x78);
    let masked = f.and(b15, bits);
    let three = f.const_i8(3);
    let sh = f.shr(masked, three);
    let control = f.load_vector_shl(sh);
    let a = f.load_vr(va);
    let zero = f.zero_v128();
    let v = f.permute(control, a, zero, Lane::I8);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vslo(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vslo_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vslo128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vslo_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

fn vsro_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32) -> EmitResult {
    let b = f.load_vr(vb);
    let b15 = f.extract(b, 15, IrType::I8);
    let bits = f.const_i8(0x78);
    let masked = f.and(b15, bits);
    let three = f.const_i8(3);
    let sh = f.shr(masked, three);
    let control = f.load_vector_shr(sh);
    let zero = f.zero_v128();
    let a = f.load_vr(va);
    let v = f.permute(control, zero, a, Lane::I8);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vsro(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vsro_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb())
}

pub(super) fn vsro128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vsro_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb())
}

// Compares. The mask fed to CR6 must be the unmodified compare result.

fn vcmpfp_impl(
    f: &mut IrBuilder,
    vd: u32,
    va: u32,
    vb: u32,
    rc: bool,
    cond: CmpCond,
) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.vector_compare(a, b, Lane::F32, cond);
    if rc {
        f.update_cr6(v);
    }
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vcmpeqfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpfp_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), CmpCond::Eq)
}

pub(super) fn vcmpeqfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpfp_impl(f, i.vx128_r_vd(), i.vx128_r_va(), i.vx128_r_vb(), i.vx128_r_rc(), CmpCond::Eq)
}

pub(super) fn vcmpgefp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpfp_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), CmpCond::SignedGe)
}

pub(super) fn vcmpgefp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpfp_impl(
        f,
        i.vx128_r_vd(),
        i.vx128_r_va(),
        i.vx128_r_vb(),
        i.vx128_r_rc(),
        CmpCond::SignedGe,
    )
}

pub(super) fn vcmpgtfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpfp_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), CmpCond::SignedGt)
}

pub(super) fn vcmpgtfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpfp_impl(
        f,
        i.vx128_r_vd(),
        i.vx128_r_va(),
        i.vx128_r_vb(),
        i.vx128_r_rc(),
        CmpCond::SignedGt,
    )
}

/// Bounds check against `+-B`: bit 31 of a lane is set when `a > b`,
/// bit 30 when `!(a >= -b)`, all other bits are zero. NaN operands set
/// both.
fn vcmpbfp_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, rc: bool) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let gt = f.vector_compare(a, b, Lane::F32, CmpCond::SignedGt);
    let neg_b = f.neg(b);
    let ge_neg = f.vector_compare(a, neg_b, Lane::F32, CmpCond::SignedGe);
    let lt = f.not(ge_neg);
    let hi_bit = f.const_v128(Vec128::splat_u32(0x8000_0000));
    let lo_bit = f.const_v128(Vec128::splat_u32(0x4000_0000));
    let gt_bits = f.and(gt, hi_bit);
    let lt_bits = f.and(lt, lo_bit);
    let v = f.or(gt_bits, lt_bits);
    f.store_vr(vd, v);
    if rc {
        // CR6 summarizes whether every lane was in bounds. Known
        // imprecision: this also drives the all-lanes-true bit, which the
        // hardware leaves untouched for this opcode.
        let any = f.or(gt, lt);
        f.update_cr6(any);
    }
    Ok(())
}

pub(super) fn vcmpbfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpbfp_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc())
}

pub(super) fn vcmpbfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpbfp_impl(f, i.vx128_r_vd(), i.vx128_r_va(), i.vx128_r_vb(), i.vx128_r_rc())
}

fn vcmpint_impl(
    f: &mut IrBuilder,
    vd: u32,
    va: u32,
    vb: u32,
    rc: bool,
    lane: Lane,
    cond: CmpCond,
) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.vector_compare(a, b, lane, cond);
    if rc {
        f.update_cr6(v);
    }
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vcmpequb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I8, CmpCond::Eq)
}

pub(super) fn vcmpequh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I16, CmpCond::Eq)
}

pub(super) fn vcmpequw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I32, CmpCond::Eq)
}

pub(super) fn vcmpequw128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(
        f,
        i.vx128_r_vd(),
        i.vx128_r_va(),
        i.vx128_r_vb(),
        i.vx128_r_rc(),
        Lane::I32,
        CmpCond::Eq,
    )
}

pub(super) fn vcmpgtsb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I8, CmpCond::SignedGt)
}

pub(super) fn vcmpgtsh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I16, CmpCond::SignedGt)
}

pub(super) fn vcmpgtsw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I32, CmpCond::SignedGt)
}

pub(super) fn vcmpgtub(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I8, CmpCond::UnsignedGt)
}

pub(super) fn vcmpgtuh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I16, CmpCond::UnsignedGt)
}

pub(super) fn vcmpgtuw(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcmpint_impl(f, i.vxr_vd(), i.vxr_va(), i.vxr_vb(), i.vxr_rc(), Lane::I32, CmpCond::UnsignedGt)
}
