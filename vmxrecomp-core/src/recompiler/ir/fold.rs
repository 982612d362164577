//! Constant Evaluation
//!
//! Bit-exact evaluation of the pure vector operations over [`Vec128`]
//! constants. This module is the single definition of the numeric semantics
//! the backend must reproduce: lane arithmetic runs in a widened 64-bit
//! domain with an explicit lane width, so wrapping is a mask, saturation is
//! a clamp with a reported flag, and averages gain the extra precision bit
//! the architecture requires.
//!
//! [`try_eval`] is the entry point used by constant propagation: given an
//! instruction whose operands all resolve to constants, it returns the
//! folded constant, or `None` for operations that are impure, depend on
//! guest state, or have no folding implemented (the exotic packed formats
//! fold at runtime only).

use super::instruction::{
    ArithMode, CmpCond, Const, IrInst, IrOp, IrType, IrValue, Lane, NarrowWidth, PackFormat,
    RoundMode, UnpackFormat, UnpackPart,
};
use super::vec128::Vec128;

#[inline]
const fn lane_mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

/// Sign-extend the low `bits` of `x`.
#[inline]
const fn sext(x: u64, bits: u32) -> i64 {
    ((x << (64 - bits)) as i64) >> (64 - bits)
}

fn int_lanes(v: Vec128, lane: Lane) -> ([u64; 16], usize) {
    let mut out = [0u64; 16];
    match lane {
        Lane::I8 => {
            for (o, b) in out.iter_mut().zip(v.u8x16()) {
                *o = b as u64;
            }
            (out, 16)
        }
        Lane::I16 => {
            for (o, h) in out.iter_mut().zip(v.u16x8()) {
                *o = h as u64;
            }
            (out, 8)
        }
        Lane::I32 | Lane::F32 => {
            for (o, w) in out.iter_mut().zip(v.u32x4()) {
                *o = w as u64;
            }
            (out, 4)
        }
    }
}

fn from_int_lanes(lanes: [u64; 16], lane: Lane) -> Vec128 {
    match lane {
        Lane::I8 => {
            let mut bytes = [0u8; 16];
            for (b, l) in bytes.iter_mut().zip(lanes) {
                *b = l as u8;
            }
            Vec128::from_bytes(bytes)
        }
        Lane::I16 => {
            let mut halves = [0u16; 8];
            for (h, l) in halves.iter_mut().zip(lanes) {
                *h = l as u16;
            }
            Vec128::from_u16x8(halves)
        }
        Lane::I32 | Lane::F32 => {
            let mut words = [0u32; 4];
            for (w, l) in words.iter_mut().zip(lanes) {
                *w = l as u32;
            }
            Vec128::from_u32x4(words)
        }
    }
}

fn zip_int(a: Vec128, b: Vec128, lane: Lane, mut f: impl FnMut(u64, u64, u32) -> u64) -> Vec128 {
    let bits = lane.bits();
    let (la, n) = int_lanes(a, lane);
    let (lb, _) = int_lanes(b, lane);
    let mut out = [0u64; 16];
    for i in 0..n {
        out[i] = f(la[i], lb[i], bits) & lane_mask(bits);
    }
    from_int_lanes(out, lane)
}

fn zip_f32(a: Vec128, b: Vec128, mut f: impl FnMut(f32, f32) -> f32) -> Vec128 {
    let (la, lb) = (a.f32x4(), b.f32x4());
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = f(la[i], lb[i]);
    }
    Vec128::from_f32x4(out)
}

fn map_f32(v: Vec128, mut f: impl FnMut(f32) -> f32) -> Vec128 {
    let l = v.f32x4();
    Vec128::from_f32x4([f(l[0]), f(l[1]), f(l[2]), f(l[3])])
}

/// Lanewise add. Returns the result and whether any lane saturated.
pub fn vector_add(a: Vec128, b: Vec128, lane: Lane, mode: ArithMode) -> (Vec128, bool) {
    if lane == Lane::F32 {
        return (zip_f32(a, b, |x, y| x + y), false);
    }
    let mut sat = false;
    let v = zip_int(a, b, lane, |x, y, bits| {
        if mode.unsigned {
            let sum = x + y;
            if mode.saturate && sum > lane_mask(bits) {
                sat = true;
                lane_mask(bits)
            } else {
                sum
            }
        } else {
            let sum = sext(x, bits) + sext(y, bits);
            if mode.saturate {
                let max = (1i64 << (bits - 1)) - 1;
                let min = -(1i64 << (bits - 1));
                let clamped = sum.clamp(min, max);
                if clamped != sum {
                    sat = true;
                }
                clamped as u64
            } else {
                sum as u64
            }
        }
    });
    (v, sat)
}

/// Lanewise subtract. Returns the result and whether any lane saturated.
pub fn vector_sub(a: Vec128, b: Vec128, lane: Lane, mode: ArithMode) -> (Vec128, bool) {
    if lane == Lane::F32 {
        return (zip_f32(a, b, |x, y| x - y), false);
    }
    let mut sat = false;
    let v = zip_int(a, b, lane, |x, y, bits| {
        if mode.unsigned {
            let diff = x as i64 - y as i64;
            if mode.saturate {
                let clamped = diff.clamp(0, lane_mask(bits) as i64);
                if clamped != diff {
                    sat = true;
                }
                clamped as u64
            } else {
                diff as u64
            }
        } else {
            let diff = sext(x, bits) - sext(y, bits);
            if mode.saturate {
                let max = (1i64 << (bits - 1)) - 1;
                let min = -(1i64 << (bits - 1));
                let clamped = diff.clamp(min, max);
                if clamped != diff {
                    sat = true;
                }
                clamped as u64
            } else {
                diff as u64
            }
        }
    });
    (v, sat)
}

/// Lanewise `(a + b + 1) >> 1` with no intermediate overflow.
pub fn vector_average(a: Vec128, b: Vec128, lane: Lane, unsigned: bool) -> Vec128 {
    zip_int(a, b, lane, |x, y, bits| {
        if unsigned {
            (x + y + 1) >> 1
        } else {
            ((sext(x, bits) + sext(y, bits) + 1) >> 1) as u64
        }
    })
}

pub fn vector_max(a: Vec128, b: Vec128, lane: Lane, unsigned: bool) -> Vec128 {
    zip_int(a, b, lane, |x, y, bits| {
        let take_x = if unsigned { x >= y } else { sext(x, bits) >= sext(y, bits) };
        if take_x { x } else { y }
    })
}

pub fn vector_min(a: Vec128, b: Vec128, lane: Lane, unsigned: bool) -> Vec128 {
    zip_int(a, b, lane, |x, y, bits| {
        let take_x = if unsigned { x <= y } else { sext(x, bits) <= sext(y, bits) };
        if take_x { x } else { y }
    })
}

/// Per-lane compare to an all-ones / all-zeros mask.
///
/// A NaN in either float lane compares false, so the lane result is zero.
pub fn vector_compare(a: Vec128, b: Vec128, lane: Lane, cond: CmpCond) -> Vec128 {
    if lane == Lane::F32 {
        let (la, lb) = (a.f32x4(), b.f32x4());
        let mut out = [0u32; 4];
        for i in 0..4 {
            let hit = match cond {
                CmpCond::Eq => la[i] == lb[i],
                CmpCond::SignedGt => la[i] > lb[i],
                CmpCond::SignedGe => la[i] >= lb[i],
                CmpCond::UnsignedGt => unreachable!("unsigned compare on float lanes"),
            };
            out[i] = if hit { u32::MAX } else { 0 };
        }
        return Vec128::from_u32x4(out);
    }
    zip_int(a, b, lane, |x, y, bits| {
        let hit = match cond {
            CmpCond::Eq => x == y,
            CmpCond::SignedGt => sext(x, bits) > sext(y, bits),
            CmpCond::SignedGe => sext(x, bits) >= sext(y, bits),
            CmpCond::UnsignedGt => x > y,
        };
        if hit {
            lane_mask(bits)
        } else {
            0
        }
    })
}

pub fn vector_shl(a: Vec128, b: Vec128, lane: Lane) -> Vec128 {
    zip_int(a, b, lane, |x, y, bits| x << (y as u32 & (bits - 1)))
}

pub fn vector_shr(a: Vec128, b: Vec128, lane: Lane) -> Vec128 {
    zip_int(a, b, lane, |x, y, bits| x >> (y as u32 & (bits - 1)))
}

pub fn vector_sha(a: Vec128, b: Vec128, lane: Lane) -> Vec128 {
    zip_int(a, b, lane, |x, y, bits| {
        (sext(x, bits) >> (y as u32 & (bits - 1))) as u64
    })
}

pub fn vector_rotl(a: Vec128, b: Vec128, lane: Lane) -> Vec128 {
    zip_int(a, b, lane, |x, y, bits| {
        let s = y as u32 & (bits - 1);
        if s == 0 {
            x
        } else {
            (x << s) | (x >> (bits - s))
        }
    })
}

/// Generalized byte permute.
///
/// Each output byte selects from `a || b` by the low 5 bits of its control
/// byte; control bit 5 forces the output byte to zero.
pub fn byte_permute(control: Vec128, a: Vec128, b: Vec128) -> Vec128 {
    let (c, la, lb) = (control.u8x16(), a.u8x16(), b.u8x16());
    let mut out = [0u8; 16];
    for i in 0..16 {
        if c[i] & 0x20 != 0 {
            continue;
        }
        let idx = (c[i] & 0x1F) as usize;
        out[i] = if idx < 16 { la[idx] } else { lb[idx - 16] };
    }
    Vec128::from_bytes(out)
}

/// Word permute driven by a packed selector mask, one byte per output word
/// (bit 2 picks the source, bits 0-1 the lane).
pub fn word_permute(mask: u32, a: Vec128, b: Vec128) -> Vec128 {
    let (la, lb) = (a.u32x4(), b.u32x4());
    let mut out = [0u32; 4];
    for (e, o) in out.iter_mut().enumerate() {
        let sel = (mask >> (8 * e as u32)) & 0xFF;
        let lane = (sel & 3) as usize;
        *o = if sel & 4 == 0 { la[lane] } else { lb[lane] };
    }
    Vec128::from_u32x4(out)
}

/// Word-lane shuffle by a 2-bit-per-lane immediate.
pub fn swizzle(v: Vec128, mask: u8) -> Vec128 {
    let l = v.u32x4();
    let mut out = [0u32; 4];
    for (e, o) in out.iter_mut().enumerate() {
        *o = l[((mask >> (2 * e as u32)) & 3) as usize];
    }
    Vec128::from_u32x4(out)
}

/// Bitwise select: mask bit clear takes `a`, set takes `b`.
pub fn select(mask: Vec128, a: Vec128, b: Vec128) -> Vec128 {
    let (m, la, lb) = (mask.u8x16(), a.u8x16(), b.u8x16());
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = (la[i] & !m[i]) | (lb[i] & m[i]);
    }
    Vec128::from_bytes(out)
}

/// Narrowing integer pack; high half of the result comes from `a`.
/// Returns the result and whether any lane was clamped.
pub fn pack_int(
    a: Vec128,
    b: Vec128,
    width: NarrowWidth,
    src_signed: bool,
    dst_signed: bool,
    saturate: bool,
) -> (Vec128, bool) {
    let mut sat = false;
    let mut narrow = |src: u64, src_bits: u32, dst_bits: u32| -> u64 {
        let val = if src_signed { sext(src, src_bits) } else { src as i64 };
        if saturate {
            let (min, max) = if dst_signed {
                (-(1i64 << (dst_bits - 1)), (1i64 << (dst_bits - 1)) - 1)
            } else {
                (0, lane_mask(dst_bits) as i64)
            };
            let clamped = val.clamp(min, max);
            if clamped != val {
                sat = true;
            }
            clamped as u64 & lane_mask(dst_bits)
        } else {
            val as u64 & lane_mask(dst_bits)
        }
    };
    let v = match width {
        NarrowWidth::ByteIn16 => {
            let mut bytes = [0u8; 16];
            for (i, h) in a.u16x8().into_iter().chain(b.u16x8()).enumerate() {
                bytes[i] = narrow(h as u64, 16, 8) as u8;
            }
            Vec128::from_bytes(bytes)
        }
        NarrowWidth::HalfIn32 => {
            let mut halves = [0u16; 8];
            for (i, w) in a.u32x4().into_iter().chain(b.u32x4()).enumerate() {
                halves[i] = narrow(w as u64, 32, 16) as u16;
            }
            Vec128::from_u16x8(halves)
        }
    };
    (v, sat)
}

/// Widening integer unpack, sign extended.
pub fn unpack_int(v: Vec128, width: NarrowWidth, part: UnpackPart) -> Vec128 {
    match width {
        NarrowWidth::ByteIn16 => {
            let bytes = v.u8x16();
            let base = match part {
                UnpackPart::High => 0,
                UnpackPart::Low => 8,
            };
            let mut halves = [0u16; 8];
            for (i, h) in halves.iter_mut().enumerate() {
                *h = bytes[base + i] as i8 as i16 as u16;
            }
            Vec128::from_u16x8(halves)
        }
        NarrowWidth::HalfIn32 => {
            let halves = v.u16x8();
            let base = match part {
                UnpackPart::High => 0,
                UnpackPart::Low => 4,
            };
            let mut words = [0u32; 4];
            for (i, w) in words.iter_mut().enumerate() {
                *w = halves[base + i] as i16 as i32 as u32;
            }
            Vec128::from_u32x4(words)
        }
    }
}

/// Force subnormal f32 lanes to zero, keeping the sign.
pub fn denorm_flush(v: Vec128) -> Vec128 {
    let mut words = v.u32x4();
    for w in words.iter_mut() {
        if *w & 0x7F80_0000 == 0 && *w & 0x007F_FFFF != 0 {
            *w &= 0x8000_0000;
        }
    }
    Vec128::from_u32x4(words)
}

/// Fused lanewise `a * b + c`, one rounding.
pub fn mul_add(a: Vec128, b: Vec128, c: Vec128) -> Vec128 {
    let (la, lb, lc) = (a.f32x4(), b.f32x4(), c.f32x4());
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = la[i].mul_add(lb[i], lc[i]);
    }
    Vec128::from_f32x4(out)
}

/// Fused lanewise `-(a * b - c)`, one rounding.
pub fn neg_mul_sub(a: Vec128, b: Vec128, c: Vec128) -> Vec128 {
    let (la, lb, lc) = (a.f32x4(), b.f32x4(), c.f32x4());
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = (-la[i]).mul_add(lb[i], lc[i]);
    }
    Vec128::from_f32x4(out)
}

/// 3-term dot product broadcast to all lanes.
pub fn dot3(a: Vec128, b: Vec128) -> Vec128 {
    let (la, lb) = (a.f32x4(), b.f32x4());
    let sum = la[0] * lb[0] + la[1] * lb[1] + la[2] * lb[2];
    Vec128::from_f32x4([sum; 4])
}

/// 4-term dot product broadcast to all lanes.
pub fn dot4(a: Vec128, b: Vec128) -> Vec128 {
    let (la, lb) = (a.f32x4(), b.f32x4());
    let sum = la[0] * lb[0] + la[1] * lb[1] + la[2] * lb[2] + la[3] * lb[3];
    Vec128::from_f32x4([sum; 4])
}

/// Round each lane to an integral value in the requested direction.
pub fn round(v: Vec128, mode: RoundMode) -> Vec128 {
    map_f32(v, |x| match mode {
        RoundMode::TowardNegative => x.floor(),
        RoundMode::Nearest => x.round_ties_even(),
        RoundMode::TowardPositive => x.ceil(),
        RoundMode::TowardZero => x.trunc(),
    })
}

pub fn convert_i2f(v: Vec128, unsigned: bool) -> Vec128 {
    let words = v.u32x4();
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = if unsigned { words[i] as f32 } else { words[i] as i32 as f32 };
    }
    Vec128::from_f32x4(out)
}

/// Saturating f32 -> int conversion. NaN converts to zero and counts as
/// saturated.
pub fn convert_f2i(v: Vec128, unsigned: bool) -> (Vec128, bool) {
    let lanes = v.f32x4();
    let mut out = [0u32; 4];
    let mut sat = false;
    for i in 0..4 {
        let x = lanes[i];
        if unsigned {
            out[i] = x as u32;
            if x.is_nan() || x < 0.0 || x >= u32::MAX as f32 {
                sat = true;
            }
        } else {
            out[i] = (x as i32) as u32;
            if x.is_nan() || x < i32::MIN as f32 || x >= i32::MAX as f32 {
                sat = true;
            }
        }
    }
    (Vec128::from_u32x4(out), sat)
}

fn bitwise(a: Vec128, b: Vec128, mut f: impl FnMut(u8, u8) -> u8) -> Vec128 {
    let (la, lb) = (a.u8x16(), b.u8x16());
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = f(la[i], lb[i]);
    }
    Vec128::from_bytes(out)
}

/// Shift the quadword left as one 128-bit big-endian integer.
pub fn quad_shl(v: Vec128, sh: u32) -> Vec128 {
    let x = u128::from_be_bytes(v.bytes());
    Vec128::from_bytes((x << (sh & 127)).to_be_bytes())
}

/// Shift the quadword right as one 128-bit big-endian integer.
pub fn quad_shr(v: Vec128, sh: u32) -> Vec128 {
    let x = u128::from_be_bytes(v.bytes());
    Vec128::from_bytes((x >> (sh & 127)).to_be_bytes())
}

fn as_v128(c: Const) -> Option<Vec128> {
    match c {
        Const::V128(v) => Some(v),
        _ => None,
    }
}

fn splat_const(c: Const) -> Option<Vec128> {
    Some(match c {
        Const::I8(v) => Vec128::splat_u8(v as u8),
        Const::I16(v) => Vec128::splat_u16(v as u16),
        Const::I32(v) => Vec128::splat_u32(v as u32),
        Const::F32Bits(v) => Vec128::splat_u32(v),
        Const::I64(_) | Const::V128(_) => return None,
    })
}

fn scalar_u64(c: Const) -> Option<u64> {
    Some(match c {
        Const::I8(v) => v as u8 as u64,
        Const::I16(v) => v as u16 as u64,
        Const::I32(v) => v as u32 as u64,
        Const::I64(v) => v as u64,
        Const::F32Bits(_) | Const::V128(_) => return None,
    })
}

/// Attempt to fold one instruction whose operands resolve through `lookup`.
///
/// Returns `None` for side-effecting operations, operations that read guest
/// state, and layouts with no constant evaluation.
pub fn try_eval<F>(inst: &IrInst, lookup: F) -> Option<Const>
where
    F: Fn(IrValue) -> Option<Const>,
{
    let v128 = |val: IrValue| lookup(val).and_then(as_v128);
    Some(match inst.op {
        IrOp::Constant(c) => c,
        IrOp::And { a, b } => Const::V128(bitwise(v128(a)?, v128(b)?, |x, y| x & y)),
        IrOp::Or { a, b } => Const::V128(bitwise(v128(a)?, v128(b)?, |x, y| x | y)),
        IrOp::Xor { a, b } => Const::V128(bitwise(v128(a)?, v128(b)?, |x, y| x ^ y)),
        IrOp::AndNot { a, b } => Const::V128(bitwise(v128(a)?, v128(b)?, |x, y| x & !y)),
        IrOp::Not { src } => Const::V128(bitwise(v128(src)?, Vec128::ZERO, |x, _| !x)),
        IrOp::Neg { src } if inst.ty == IrType::V128 => {
            // Lanewise f32 negate: flip the sign bits.
            Const::V128(bitwise(v128(src)?, Vec128::splat_u32(0x8000_0000), |x, y| x ^ y))
        }
        IrOp::ByteSwap { src } if inst.ty == IrType::V128 => Const::V128(v128(src)?.byte_swapped()),
        IrOp::Shl { a, b } if inst.ty == IrType::V128 => {
            Const::V128(quad_shl(v128(a)?, scalar_u64(lookup(b)?)? as u32))
        }
        IrOp::Shr { a, b } if inst.ty == IrType::V128 => {
            Const::V128(quad_shr(v128(a)?, scalar_u64(lookup(b)?)? as u32))
        }
        IrOp::IsTrue { src } => match lookup(src)? {
            Const::V128(v) => Const::I8((v != Vec128::ZERO) as i8),
            c => Const::I8((scalar_u64(c)? != 0) as i8),
        },
        IrOp::Mul { a, b } if inst.ty == IrType::V128 => {
            Const::V128(zip_f32(v128(a)?, v128(b)?, |x, y| x * y))
        }
        IrOp::Max { a, b } if inst.ty == IrType::V128 => {
            Const::V128(zip_f32(v128(a)?, v128(b)?, f32::max))
        }
        IrOp::Min { a, b } if inst.ty == IrType::V128 => {
            Const::V128(zip_f32(v128(a)?, v128(b)?, f32::min))
        }
        IrOp::MulAdd { a, b, c } => Const::V128(mul_add(v128(a)?, v128(b)?, v128(c)?)),
        IrOp::NegMulSub { a, b, c } => Const::V128(neg_mul_sub(v128(a)?, v128(b)?, v128(c)?)),
        IrOp::Recip { src } => Const::V128(map_f32(v128(src)?, f32::recip)),
        IrOp::RSqrt { src } => Const::V128(map_f32(v128(src)?, |x| x.sqrt().recip())),
        IrOp::Log2 { src } => Const::V128(map_f32(v128(src)?, f32::log2)),
        IrOp::Pow2 { src } => Const::V128(map_f32(v128(src)?, f32::exp2)),
        IrOp::Round { src, mode } => Const::V128(round(v128(src)?, mode)),
        IrOp::DenormFlush { src } => Const::V128(denorm_flush(v128(src)?)),
        IrOp::Dot3 { a, b } => Const::V128(dot3(v128(a)?, v128(b)?)),
        IrOp::Dot4 { a, b } => Const::V128(dot4(v128(a)?, v128(b)?)),
        IrOp::VectorAdd { a, b, lane, mode } => {
            Const::V128(vector_add(v128(a)?, v128(b)?, lane, mode).0)
        }
        IrOp::VectorSub { a, b, lane, mode } => {
            Const::V128(vector_sub(v128(a)?, v128(b)?, lane, mode).0)
        }
        IrOp::VectorAverage { a, b, lane, unsigned } => {
            Const::V128(vector_average(v128(a)?, v128(b)?, lane, unsigned))
        }
        IrOp::VectorMax { a, b, lane, unsigned } => {
            Const::V128(vector_max(v128(a)?, v128(b)?, lane, unsigned))
        }
        IrOp::VectorMin { a, b, lane, unsigned } => {
            Const::V128(vector_min(v128(a)?, v128(b)?, lane, unsigned))
        }
        IrOp::VectorCompare { a, b, lane, cond } => {
            Const::V128(vector_compare(v128(a)?, v128(b)?, lane, cond))
        }
        IrOp::VectorShl { a, b, lane } => Const::V128(vector_shl(v128(a)?, v128(b)?, lane)),
        IrOp::VectorShr { a, b, lane } => Const::V128(vector_shr(v128(a)?, v128(b)?, lane)),
        IrOp::VectorSha { a, b, lane } => Const::V128(vector_sha(v128(a)?, v128(b)?, lane)),
        IrOp::VectorRotl { a, b, lane } => Const::V128(vector_rotl(v128(a)?, v128(b)?, lane)),
        IrOp::VectorConvertI2F { src, unsigned } => Const::V128(convert_i2f(v128(src)?, unsigned)),
        IrOp::VectorConvertF2I { src, unsigned } => {
            Const::V128(convert_f2i(v128(src)?, unsigned).0)
        }
        IrOp::Splat { src } => Const::V128(splat_const(lookup(src)?)?),
        IrOp::Extract { src, lane } => {
            let v = v128(src)?;
            match inst.ty {
                IrType::I8 => Const::I8(v.u8x16()[lane as usize & 0xF] as i8),
                IrType::I16 => Const::I16(v.u16x8()[lane as usize & 0x7] as i16),
                IrType::I32 => Const::I32(v.u32x4()[lane as usize & 0x3] as i32),
                IrType::F32 => Const::F32Bits(v.u32x4()[lane as usize & 0x3]),
                _ => return None,
            }
        }
        IrOp::Permute { control, a, b, lane: Lane::I8 } => {
            Const::V128(byte_permute(v128(control)?, v128(a)?, v128(b)?))
        }
        IrOp::Permute { control, a, b, lane: Lane::I32 } => {
            let mask = scalar_u64(lookup(control)?)? as u32;
            Const::V128(word_permute(mask, v128(a)?, v128(b)?))
        }
        IrOp::Swizzle { src, mask } => Const::V128(swizzle(v128(src)?, mask)),
        IrOp::Select { mask, a, b } => Const::V128(select(v128(mask)?, v128(a)?, v128(b)?)),
        IrOp::Pack {
            a,
            b,
            format: PackFormat::Int { width, src_signed, dst_signed, saturate },
        } => {
            let b = v128(b?)?;
            Const::V128(pack_int(v128(a)?, b, width, src_signed, dst_signed, saturate).0)
        }
        IrOp::Unpack { src, format: UnpackFormat::Int { width, part } } => {
            Const::V128(unpack_int(v128(src)?, width, part))
        }
        _ => return None,
    })
}
