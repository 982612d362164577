//! Floating-Point Special and Conversion Emitters
//!
//! Approximation operations, directed rounding, the fused multiply family
//! with its measured denormal behavior, dot products, fixed-point
//! conversions with power-of-two scaling, and the pack/unpack families,
//! including the hardware packed color/normal/half-float formats of the
//! 128-register extension.
//!
//! The approximation operations (vrefp, vrsqrtefp, vlogefp, vexptefp) do
//! not reproduce the hardware edge-case tables for signed zero, infinity
//! and NaN propagation. Games have not been observed to depend on them.

use crate::recompiler::decoder::InstrData;
use crate::recompiler::error::TranslateError;
use crate::recompiler::ir::{
    IrBuilder, IrValue, Lane, NarrowWidth, PackFormat, RoundMode, UnpackFormat, UnpackPart, Vec128,
};

use super::tables::word_permute_mask;
use super::EmitResult;

// Approximations.

fn vrefp_impl(f: &mut IrBuilder, vd: u32, vb: u32) -> EmitResult {
    let b = f.load_vr(vb);
    let v = f.recip(b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vrefp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrefp_impl(f, i.vx_vd(), i.vx_vb())
}

pub(super) fn vrefp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrefp_impl(f, i.vx128_3_vd(), i.vx128_3_vb())
}

fn vrsqrtefp_impl(f: &mut IrBuilder, vd: u32, vb: u32) -> EmitResult {
    let b = f.load_vr(vb);
    let v = f.rsqrt(b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vrsqrtefp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrsqrtefp_impl(f, i.vx_vd(), i.vx_vb())
}

pub(super) fn vrsqrtefp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrsqrtefp_impl(f, i.vx128_3_vd(), i.vx128_3_vb())
}

fn vlogefp_impl(f: &mut IrBuilder, vd: u32, vb: u32) -> EmitResult {
    let b = f.load_vr(vb);
    let v = f.log2(b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vlogefp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vlogefp_impl(f, i.vx_vd(), i.vx_vb())
}

pub(super) fn vlogefp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vlogefp_impl(f, i.vx128_3_vd(), i.vx128_3_vb())
}

fn vexptefp_impl(f: &mut IrBuilder, vd: u32, vb: u32) -> EmitResult {
    let b = f.load_vr(vb);
    let v = f.pow2(b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vexptefp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vexptefp_impl(f, i.vx_vd(), i.vx_vb())
}

pub(super) fn vexptefp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vexptefp_impl(f, i.vx128_3_vd(), i.vx128_3_vb())
}

// Round to integer, four directed modes.

fn vrfi_impl(f: &mut IrBuilder, vd: u32, vb: u32, mode: RoundMode) -> EmitResult {
    let b = f.load_vr(vb);
    let v = f.round(b, mode);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vrfim(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrfi_impl(f, i.vx_vd(), i.vx_vb(), RoundMode::TowardNegative)
}

pub(super) fn vrfim128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrfi_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), RoundMode::TowardNegative)
}

pub(super) fn vrfin(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrfi_impl(f, i.vx_vd(), i.vx_vb(), RoundMode::Nearest)
}

pub(super) fn vrfin128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrfi_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), RoundMode::Nearest)
}

pub(super) fn vrfip(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrfi_impl(f, i.vx_vd(), i.vx_vb(), RoundMode::TowardPositive)
}

pub(super) fn vrfip128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrfi_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), RoundMode::TowardPositive)
}

pub(super) fn vrfiz(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrfi_impl(f, i.vx_vd(), i.vx_vb(), RoundMode::TowardZero)
}

pub(super) fn vrfiz128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vrfi_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), RoundMode::TowardZero)
}

// Fused multiply family. Measurement on real silicon shows vmaddfp
// flushes denormal inputs to zero regardless of the non-Java-mode bit, so
// the flush is emitted unconditionally. Whether denormal results also
// flush is unverified; results are stored as produced.

fn vmaddfp_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, vc: u32) -> EmitResult {
    // (VD) <- (VA) * (VC) + (VB)
    let a = f.load_vr(va);
    let a = f.denorm_flush(a);
    let b = f.load_vr(vb);
    let b = f.denorm_flush(b);
    let c = f.load_vr(vc);
    let c = f.denorm_flush(c);
    let v = f.mul_add(a, c, b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vmaddfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vmaddfp_impl(f, i.vxa_vd(), i.vxa_va(), i.vxa_vb(), i.vxa_vc())
}

pub(super) fn vmaddfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    // (VD) <- (VA) * (VB) + (VD); the encoding reuses VD as the addend.
    vmaddfp_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vd(), i.vx128_vb())
}

pub(super) fn vmaddcfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    // (VD) <- (VA) * (VD) + (VB)
    let a = f.load_vr(i.vx128_va());
    let a = f.denorm_flush(a);
    let d = f.load_vr(i.vx128_vd());
    let d = f.denorm_flush(d);
    let b = f.load_vr(i.vx128_vb());
    let b = f.denorm_flush(b);
    let v = f.mul_add(a, d, b);
    f.store_vr(i.vx128_vd(), v);
    Ok(())
}

fn vnmsubfp_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, vc: u32) -> EmitResult {
    // (VD) <- -((VA) * (VC) - (VB)), single rounding.
    let a = f.load_vr(va);
    let a = f.denorm_flush(a);
    let b = f.load_vr(vb);
    let b = f.denorm_flush(b);
    let c = f.load_vr(vc);
    let c = f.denorm_flush(c);
    let v = f.neg_mul_sub(a, c, b);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vnmsubfp(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vnmsubfp_impl(f, i.vxa_vd(), i.vxa_va(), i.vxa_vb(), i.vxa_vc())
}

pub(super) fn vnmsubfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vnmsubfp_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vd(), i.vx128_vb())
}

pub(super) fn vmulfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let a = f.load_vr(i.vx128_va());
    let b = f.load_vr(i.vx128_vb());
    let v = f.mul(a, b);
    f.store_vr(i.vx128_vd(), v);
    Ok(())
}

// Dot products. Denormal results are unconditionally flushed to zero.

pub(super) fn vmsum3fp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    // (VD.xyzw) <- VA.x*VB.x + VA.y*VB.y + VA.z*VB.z
    let a = f.load_vr(i.vx128_va());
    let b = f.load_vr(i.vx128_vb());
    let v = f.dot3(a, b);
    let v = f.denorm_flush(v);
    f.store_vr(i.vx128_vd(), v);
    Ok(())
}

pub(super) fn vmsum4fp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    // (VD.xyzw) <- VA.x*VB.x + VA.y*VB.y + VA.z*VB.z + VA.w*VB.w
    let a = f.load_vr(i.vx128_va());
    let b = f.load_vr(i.vx128_vb());
    let v = f.dot4(a, b);
    let v = f.denorm_flush(v);
    f.store_vr(i.vx128_vd(), v);
    Ok(())
}

// Fixed-point conversions. The 5-bit immediate scales by 2^uimm; a zero
// immediate skips the multiply entirely.

fn scale_by_pow2(f: &mut IrBuilder, v: IrValue, exponent: i32) -> IrValue {
    let c = f.const_f32((2.0f32).powi(exponent));
    let s = f.splat(c);
    f.mul(v, s)
}

fn vcfsx_impl(f: &mut IrBuilder, vd: u32, vb: u32, uimm: u32) -> EmitResult {
    // (VD) <- float(VB as signed) / 2^uimm
    let b = f.load_vr(vb);
    let mut v = f.vector_convert_i2f(b, false);
    if uimm != 0 {
        v = scale_by_pow2(f, v, -(uimm as i32));
    }
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vcfsx(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcfsx_impl(f, i.vx_vd(), i.vx_vb(), i.vx_va())
}

pub(super) fn vcsxwfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcfsx_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), i.vx128_3_imm())
}

fn vcfux_impl(f: &mut IrBuilder, vd: u32, vb: u32, uimm: u32) -> EmitResult {
    // (VD) <- float(VB as unsigned) / 2^uimm
    let b = f.load_vr(vb);
    let mut v = f.vector_convert_i2f(b, true);
    if uimm != 0 {
        v = scale_by_pow2(f, v, -(uimm as i32));
    }
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vcfux(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcfux_impl(f, i.vx_vd(), i.vx_vb(), i.vx_va())
}

pub(super) fn vcuxwfp128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vcfux_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), i.vx128_3_imm())
}

fn vctsxs_impl(f: &mut IrBuilder, vd: u32, vb: u32, uimm: u32) -> EmitResult {
    // (VD) <- int_sat(VB as signed * 2^uimm)
    let mut v = f.load_vr(vb);
    if uimm != 0 {
        v = scale_by_pow2(f, v, uimm as i32);
    }
    let v = f.vector_convert_f2i(v, false);
    let sat = f.did_saturate(v);
    f.store_sat(sat);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vctsxs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vctsxs_impl(f, i.vx_vd(), i.vx_vb(), i.vx_va())
}

pub(super) fn vcfpsxws128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vctsxs_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), i.vx128_3_imm())
}

fn vctuxs_impl(f: &mut IrBuilder, vd: u32, vb: u32, uimm: u32) -> EmitResult {
    // (VD) <- int_sat(VB as unsigned * 2^uimm)
    let mut v = f.load_vr(vb);
    if uimm != 0 {
        v = scale_by_pow2(f, v, uimm as i32);
    }
    let v = f.vector_convert_f2i(v, true);
    let sat = f.did_saturate(v);
    f.store_sat(sat);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vctuxs(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vctuxs_impl(f, i.vx_vd(), i.vx_vb(), i.vx_va())
}

pub(super) fn vcfpuxws128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    vctuxs_impl(f, i.vx128_3_vd(), i.vx128_3_vb(), i.vx128_3_imm())
}

// Integer packs. The result's high half always comes from VA.

fn pack_sat_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, format: PackFormat) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.pack(a, Some(b), format);
    let sat = f.did_saturate(v);
    f.store_sat(sat);
    f.store_vr(vd, v);
    Ok(())
}

fn pack_mod_impl(f: &mut IrBuilder, vd: u32, va: u32, vb: u32, format: PackFormat) -> EmitResult {
    let a = f.load_vr(va);
    let b = f.load_vr(vb);
    let v = f.pack(a, Some(b), format);
    f.store_vr(vd, v);
    Ok(())
}

const PACK_SH_SS: PackFormat = PackFormat::Int {
    width: NarrowWidth::ByteIn16,
    src_signed: true,
    dst_signed: true,
    saturate: true,
};
const PACK_SH_US: PackFormat = PackFormat::Int {
    width: NarrowWidth::ByteIn16,
    src_signed: true,
    dst_signed: false,
    saturate: true,
};
const PACK_UH_UM: PackFormat = PackFormat::Int {
    width: NarrowWidth::ByteIn16,
    src_signed: false,
    dst_signed: false,
    saturate: false,
};
const PACK_UH_US: PackFormat = PackFormat::Int {
    width: NarrowWidth::ByteIn16,
    src_signed: false,
    dst_signed: false,
    saturate: true,
};
const PACK_SW_SS: PackFormat = PackFormat::Int {
    width: NarrowWidth::HalfIn32,
    src_signed: true,
    dst_signed: true,
    saturate: true,
};
const PACK_SW_US: PackFormat = PackFormat::Int {
    width: NarrowWidth::HalfIn32,
    src_signed: true,
    dst_signed: false,
    saturate: true,
};
const PACK_UW_UM: PackFormat = PackFormat::Int {
    width: NarrowWidth::HalfIn32,
    src_signed: false,
    dst_signed: false,
    saturate: false,
};
const PACK_UW_US: PackFormat = PackFormat::Int {
    width: NarrowWidth::HalfIn32,
    src_signed: false,
    dst_signed: false,
    saturate: true,
};

pub(super) fn vpkshss(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), PACK_SH_SS)
}

pub(super) fn vpkshss128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), PACK_SH_SS)
}

pub(super) fn vpkshus(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), PACK_SH_US)
}

pub(super) fn vpkshus128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), PACK_SH_US)
}

pub(super) fn vpkswss(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), PACK_SW_SS)
}

pub(super) fn vpkswss128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), PACK_SW_SS)
}

pub(super) fn vpkswus(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), PACK_SW_US)
}

pub(super) fn vpkswus128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), PACK_SW_US)
}

pub(super) fn vpkuhum(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_mod_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), PACK_UH_UM)
}

pub(super) fn vpkuhum128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_mod_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), PACK_UH_UM)
}

pub(super) fn vpkuhus(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), PACK_UH_US)
}

pub(super) fn vpkuhus128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), PACK_UH_US)
}

pub(super) fn vpkuwum(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_mod_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), PACK_UW_UM)
}

pub(super) fn vpkuwum128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_mod_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), PACK_UW_UM)
}

pub(super) fn vpkuwus(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx_vd(), i.vx_va(), i.vx_vb(), PACK_UW_US)
}

pub(super) fn vpkuwus128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    pack_sat_impl(f, i.vx128_vd(), i.vx128_va(), i.vx128_vb(), PACK_UW_US)
}

/// Reduce each 8-8-8-8 pixel to 1-5-5-5 in the low half of its word.
fn vpkpx_word_reduce(f: &mut IrBuilder, input: IrValue) -> IrValue {
    let shr_words = |f: &mut IrBuilder, v: IrValue, shift: u32| {
        let s = f.const_v128(Vec128::splat_u32(shift));
        f.vector_shr(v, s, Lane::I32)
    };
    let and_words = |f: &mut IrBuilder, v: IrValue, mask: u32| {
        let m = f.const_v128(Vec128::splat_u32(mask));
        f.and(v, m)
    };
    let t1 = shr_words(f, input, 9);
    let t1 = and_words(f, t1, 0xFC00);
    let t2 = shr_words(f, input, 6);
    let t2 = and_words(f, t2, 0x3E0);
    let t3 = shr_words(f, input, 3);
    let t3 = and_words(f, t3, 0x1F);
    let t12 = f.or(t1, t2);
    f.or(t3, t12)
}

pub(super) fn vpkpx(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let a = f.load_vr(i.vx_va());
    let b = f.load_vr(i.vx_vb());
    let pck1 = vpkpx_word_reduce(f, a);
    let pck2 = vpkpx_word_reduce(f, b);
    let v = f.pack(pck1, Some(pck2), PACK_UW_UM);
    f.store_vr(i.vx_vd(), v);
    Ok(())
}

// Integer unpacks, sign extended.

fn unpack_impl(f: &mut IrBuilder, vd: u32, vb: u32, format: UnpackFormat) -> EmitResult {
    let b = f.load_vr(vb);
    let v = f.unpack(b, format);
    f.store_vr(vd, v);
    Ok(())
}

const UNPACK_HSB: UnpackFormat =
    UnpackFormat::Int { width: NarrowWidth::ByteIn16, part: UnpackPart::High };
const UNPACK_LSB: UnpackFormat =
    UnpackFormat::Int { width: NarrowWidth::ByteIn16, part: UnpackPart::Low };
const UNPACK_HSH: UnpackFormat =
    UnpackFormat::Int { width: NarrowWidth::HalfIn32, part: UnpackPart::High };
const UNPACK_LSH: UnpackFormat =
    UnpackFormat::Int { width: NarrowWidth::HalfIn32, part: UnpackPart::Low };

pub(super) fn vupkhsb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    unpack_impl(f, i.vx_vd(), i.vx_vb(), UNPACK_HSB)
}

pub(super) fn vupkhsb128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    // VA = 0x60 is the halfword unpack; the two share an opcode slot in
    // the 128-register encoding tables.
    if i.vx128_va() == 0x60 {
        return unpack_impl(f, i.vx128_vd(), i.vx128_vb(), UNPACK_HSH);
    }
    unpack_impl(f, i.vx128_vd(), i.vx128_vb(), UNPACK_HSB)
}

pub(super) fn vupklsb(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    unpack_impl(f, i.vx_vd(), i.vx_vb(), UNPACK_LSB)
}

pub(super) fn vupklsb128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    if i.vx128_va() == 0x60 {
        return unpack_impl(f, i.vx128_vd(), i.vx128_vb(), UNPACK_LSH);
    }
    unpack_impl(f, i.vx128_vd(), i.vx128_vb(), UNPACK_LSB)
}

pub(super) fn vupkhsh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    unpack_impl(f, i.vx_vd(), i.vx_vb(), UNPACK_HSH)
}

pub(super) fn vupklsh(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    unpack_impl(f, i.vx_vd(), i.vx_vb(), UNPACK_LSH)
}

// Hardware packed formats (color, signed-normalized, 10-10-10-2, half
// float). The immediate selects the format; the pack variant then blends
// the packed words into the destination through a word permute keyed by
// the pack width and shift.

fn d3d_format(ty: u32) -> Option<PackFormat> {
    Some(match ty {
        0 => PackFormat::D3dColor,
        1 => PackFormat::ShortNorm2,
        2 => PackFormat::Packed2101010,
        3 => PackFormat::Float16x2,
        4 => PackFormat::ShortNorm4,
        5 => PackFormat::Float16x4,
        6 => PackFormat::Packed4202020,
        _ => return None,
    })
}

fn d3d_unpack_format(ty: u32) -> Option<UnpackFormat> {
    Some(match ty {
        0 => UnpackFormat::D3dColor,
        1 => UnpackFormat::ShortNorm2,
        2 => UnpackFormat::Packed2101010,
        3 => UnpackFormat::Float16x2,
        4 => UnpackFormat::ShortNorm4,
        5 => UnpackFormat::Float16x4,
        6 => UnpackFormat::Packed4202020,
        _ => return None,
    })
}

pub(super) fn vpkd3d128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let vd = i.vx128_4_vd();
    let vb = i.vx128_4_vb();
    let ty = i.vx128_4_imm() >> 2;
    let pack = i.vx128_4_imm() & 0x3;
    let shift = i.vx128_4_z();

    let format = d3d_format(ty).ok_or(TranslateError::UnhandledEncoding {
        mnemonic: "vpkd3d128",
        value: ty,
    })?;

    // control = prev:0123 | new:4567; resolved before any emission so a
    // failed sub-encoding leaves the block untouched.
    let control = match (pack, shift) {
        // 32-bit result; shift selects which destination word receives it.
        (1, 0) => word_permute_mask(0, 0, 0, 1, 0, 2, 1, 3),
        (1, 1) => word_permute_mask(0, 0, 0, 1, 1, 3, 0, 3),
        (1, 2) => word_permute_mask(0, 0, 1, 3, 0, 2, 0, 3),
        (1, 3) => word_permute_mask(1, 3, 0, 1, 0, 2, 0, 3),
        // 64-bit result.
        (2, 0) => word_permute_mask(0, 0, 0, 1, 1, 2, 1, 3),
        (2, 1) => word_permute_mask(0, 0, 1, 2, 1, 3, 0, 3),
        (2, 2) => word_permute_mask(1, 2, 1, 3, 0, 2, 0, 3),
        (2, 3) => word_permute_mask(1, 3, 0, 1, 0, 2, 0, 3),
        (3, 0) => word_permute_mask(0, 0, 0, 1, 1, 2, 1, 3),
        (3, 1) => word_permute_mask(0, 0, 1, 2, 1, 3, 0, 3),
        (3, 2) => word_permute_mask(1, 2, 1, 3, 0, 2, 0, 3),
        (3, 3) => word_permute_mask(0, 0, 0, 1, 0, 2, 1, 2),
        _ => {
            return Err(TranslateError::UnhandledEncoding {
                mnemonic: "vpkd3d128",
                value: pack,
            })
        }
    };

    let b = f.load_vr(vb);
    let v = f.pack(b, None, format);
    let c = f.const_i32(control as i32);
    let old = f.load_vr(vd);
    let v = f.permute(c, old, v, Lane::I32);
    f.store_vr(vd, v);
    Ok(())
}

pub(super) fn vupkd3d128(f: &mut IrBuilder, i: InstrData) -> EmitResult {
    let vd = i.vx128_3_vd();
    let vb = i.vx128_3_vb();
    let ty = i.vx128_3_imm() >> 2;
    let format = d3d_unpack_format(ty).ok_or(TranslateError::UnhandledEncoding {
        mnemonic: "vupkd3d128",
        value: ty,
    })?;
    let b = f.load_vr(vb);
    let v = f.unpack(b, format);
    f.store_vr(vd, v);
    Ok(())
}
