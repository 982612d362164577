//! Unit tests for lane-exact constant evaluation
//!
//! These pin the numeric contracts of the vector operations: wrapping is
//! modulo the lane width, saturation clamps and reports exactly when the
//! true result escapes the representable range, averages carry the extra
//! precision bit, NaN compare lanes produce zero, and the permute fast
//! paths agree with the general path.

use vmxrecomp_core::recompiler::ir::fold;
use vmxrecomp_core::recompiler::ir::{ArithMode, CmpCond, Lane, NarrowWidth, RoundMode, UnpackPart, Vec128};
use vmxrecomp_core::recompiler::vector::tables::VSLDOI_CONTROL;

const SAMPLES_U8: [u8; 8] = [0, 1, 2, 0x7F, 0x80, 0xAA, 0xFE, 0xFF];
const SAMPLES_U16: [u16; 8] = [0, 1, 0x7FFF, 0x8000, 0xABCD, 0xFFFE, 0xFFFF, 0x1234];
const SAMPLES_U32: [u32; 8] = [
    0,
    1,
    0x7FFF_FFFF,
    0x8000_0000,
    0xDEAD_BEEF,
    0xFFFF_FFFE,
    0xFFFF_FFFF,
    0x0001_0000,
];

#[test]
fn test_wrapping_add_is_modular() {
    for &a in &SAMPLES_U8 {
        for &b in &SAMPLES_U8 {
            let va = Vec128::splat_u8(a);
            let vb = Vec128::splat_u8(b);
            let (v, sat) = fold::vector_add(va, vb, Lane::I8, ArithMode::UNSIGNED);
            assert_eq!(v.u8x16()[0], a.wrapping_add(b));
            assert!(!sat);
        }
    }
    for &a in &SAMPLES_U16 {
        for &b in &SAMPLES_U16 {
            let (v, _) = fold::vector_add(
                Vec128::splat_u16(a),
                Vec128::splat_u16(b),
                Lane::I16,
                ArithMode::UNSIGNED,
            );
            assert_eq!(v.u16x8()[0], a.wrapping_add(b));
        }
    }
    for &a in &SAMPLES_U32 {
        for &b in &SAMPLES_U32 {
            let (v, _) = fold::vector_add(
                Vec128::splat_u32(a),
                Vec128::splat_u32(b),
                Lane::I32,
                ArithMode::UNSIGNED,
            );
            assert_eq!(v.u32x4()[0], a.wrapping_add(b));
        }
    }
}

#[test]
fn test_signed_saturating_add_clamps_and_reports() {
    // Exhaustive at byte width: clamped exactly when the true sum escapes
    // the signed range, and SAT reported exactly then.
    for a in i8::MIN..=i8::MAX {
        for b in i8::MIN..=i8::MAX {
            let (v, sat) = fold::vector_add(
                Vec128::splat_u8(a as u8),
                Vec128::splat_u8(b as u8),
                Lane::I8,
                ArithMode::SIGNED_SAT,
            );
            let true_sum = a as i16 + b as i16;
            let expect = true_sum.clamp(i8::MIN as i16, i8::MAX as i16) as i8;
            assert_eq!(v.u8x16()[0] as i8, expect);
            assert_eq!(sat, true_sum != expect as i16);
        }
    }
}

#[test]
fn test_unsigned_saturating_sub_clamps_at_zero() {
    let (v, sat) = fold::vector_sub(
        Vec128::splat_u8(3),
        Vec128::splat_u8(7),
        Lane::I8,
        ArithMode::UNSIGNED_SAT,
    );
    assert_eq!(v.u8x16()[0], 0);
    assert!(sat);

    let (v, sat) = fold::vector_sub(
        Vec128::splat_u8(7),
        Vec128::splat_u8(3),
        Lane::I8,
        ArithMode::UNSIGNED_SAT,
    );
    assert_eq!(v.u8x16()[0], 4);
    assert!(!sat);
}

#[test]
fn test_wrapping_sub_is_modular() {
    let (v, _) = fold::vector_sub(
        Vec128::splat_u32(1),
        Vec128::splat_u32(2),
        Lane::I32,
        ArithMode::UNSIGNED,
    );
    assert_eq!(v.u32x4()[0], u32::MAX);
}

#[test]
fn test_average_has_no_intermediate_overflow() {
    let v = fold::vector_average(Vec128::splat_u8(255), Vec128::splat_u8(255), Lane::I8, true);
    assert_eq!(v.u8x16()[0], 255);
    let v = fold::vector_average(
        Vec128::splat_u32(u32::MAX),
        Vec128::splat_u32(u32::MAX),
        Lane::I32,
        true,
    );
    assert_eq!(v.u32x4()[0], u32::MAX);
    // (a + b + 1) >> 1 exactly.
    for &a in &SAMPLES_U8 {
        for &b in &SAMPLES_U8 {
            let v = fold::vector_average(Vec128::splat_u8(a), Vec128::splat_u8(b), Lane::I8, true);
            assert_eq!(v.u8x16()[0] as u16, (a as u16 + b as u16 + 1) >> 1);
        }
    }
}

#[test]
fn test_signed_average_rounds_toward_positive() {
    let v = fold::vector_average(
        Vec128::splat_u8(-3i8 as u8),
        Vec128::splat_u8(-4i8 as u8),
        Lane::I8,
        false,
    );
    assert_eq!(v.u8x16()[0] as i8, -3);
}

#[test]
fn test_permute_force_zero_bit_wins() {
    let a = Vec128::from_bytes([0x11; 16]);
    let b = Vec128::from_bytes([0x22; 16]);
    // Any control byte with bit 5 set yields zero regardless of its index
    // bits.
    for low in 0..32u8 {
        let mut control = [0u8; 16];
        control[0] = 0x20 | low;
        let v = fold::byte_permute(Vec128::from_bytes(control), a, b);
        assert_eq!(v.u8x16()[0], 0);
    }
}

#[test]
fn test_permute_selects_from_concatenation() {
    let mut a_bytes = [0u8; 16];
    let mut b_bytes = [0u8; 16];
    for i in 0..16 {
        a_bytes[i] = i as u8;
        b_bytes[i] = 0x40 + i as u8;
    }
    let a = Vec128::from_bytes(a_bytes);
    let b = Vec128::from_bytes(b_bytes);
    let control = Vec128::from_bytes([0, 15, 16, 31, 1, 17, 30, 14, 2, 18, 3, 19, 4, 20, 5, 21]);
    let v = fold::byte_permute(control, a, b);
    assert_eq!(
        v.u8x16(),
        [0, 15, 0x40, 0x4F, 1, 0x41, 0x4E, 14, 2, 0x42, 3, 0x43, 4, 0x44, 5, 0x45]
    );
}

#[test]
fn test_vsldoi_table_matches_manual_concat_shift() {
    let mut a_bytes = [0u8; 16];
    let mut b_bytes = [0u8; 16];
    for i in 0..16 {
        a_bytes[i] = i as u8;
        b_bytes[i] = 16 + i as u8;
    }
    let a = Vec128::from_bytes(a_bytes);
    let b = Vec128::from_bytes(b_bytes);
    // The short-circuit cases must equal the general path: entry 0 is the
    // identity on A, and a synthetic entry 16 selects exactly B.
    assert_eq!(fold::byte_permute(VSLDOI_CONTROL[0], a, b), a);
    let entry16 = Vec128::from_bytes([
        16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31,
    ]);
    assert_eq!(fold::byte_permute(entry16, a, b), b);
    for sh in 1..16usize {
        let v = fold::byte_permute(VSLDOI_CONTROL[sh], a, b);
        let mut expect = [0u8; 16];
        for (i, e) in expect.iter_mut().enumerate() {
            let idx = sh + i;
            *e = if idx < 16 { a_bytes[idx] } else { b_bytes[idx - 16] };
        }
        assert_eq!(v.u8x16(), expect);
    }
}

#[test]
fn test_float_compare_nan_lane_is_all_zero() {
    let nan = Vec128::from_f32x4([f32::NAN, 1.0, f32::NAN, 4.0]);
    let ones = Vec128::from_f32x4([1.0, 1.0, 1.0, 1.0]);
    for cond in [CmpCond::Eq, CmpCond::SignedGt, CmpCond::SignedGe] {
        let v = fold::vector_compare(nan, ones, Lane::F32, cond);
        assert_eq!(v.u32x4()[0], 0);
        assert_eq!(v.u32x4()[2], 0);
        let v = fold::vector_compare(ones, nan, Lane::F32, cond);
        assert_eq!(v.u32x4()[0], 0);
    }
    // A well-behaved lane still produces all-ones.
    let v = fold::vector_compare(nan, ones, Lane::F32, CmpCond::SignedGe);
    assert_eq!(v.u32x4()[3], u32::MAX);
}

#[test]
fn test_integer_compare_masks() {
    let v = fold::vector_compare(
        Vec128::splat_u8(0x80),
        Vec128::splat_u8(0x01),
        Lane::I8,
        CmpCond::UnsignedGt,
    );
    assert_eq!(v.u8x16()[0], 0xFF);
    // Signed: 0x80 is -128, less than 1.
    let v = fold::vector_compare(
        Vec128::splat_u8(0x80),
        Vec128::splat_u8(0x01),
        Lane::I8,
        CmpCond::SignedGt,
    );
    assert_eq!(v.u8x16()[0], 0x00);
}

#[test]
fn test_splat_broadcasts_one_lane() {
    let src = Vec128::from_u32x4([10, 20, 30, 40]);
    for k in 0..4 {
        let lanes = src.u32x4();
        let v = fold::swizzle(src, (k | k << 2 | k << 4 | k << 6) as u8);
        assert_eq!(v.u32x4(), [lanes[k as usize]; 4]);
    }
}

#[test]
fn test_pack_saturating_signed_to_unsigned() {
    // Negative halfwords clamp to 0, large ones to 255.
    let a = Vec128::from_u16x8([0x8000, 0x00FF, 0x0100, 0x7FFF, 0, 1, 2, 3]);
    let b = Vec128::from_u16x8([0; 8]);
    let (v, sat) = fold::pack_int(a, b, NarrowWidth::ByteIn16, true, false, true);
    let out = v.u8x16();
    assert_eq!(&out[0..4], &[0, 0xFF, 0xFF, 0xFF]);
    assert!(sat);
}

#[test]
fn test_pack_modulo_truncates() {
    let a = Vec128::from_u16x8([0x1234; 8]);
    let b = Vec128::from_u16x8([0xAB01; 8]);
    let (v, sat) = fold::pack_int(a, b, NarrowWidth::ByteIn16, false, false, false);
    assert_eq!(v.u8x16()[0], 0x34);
    assert_eq!(v.u8x16()[8], 0x01);
    assert!(!sat);
}

#[test]
fn test_unpack_sign_extends() {
    let v = Vec128::from_bytes([
        0x80, 0x7F, 0xFF, 0x01, 0, 0, 0, 0, 0x90, 0, 0, 0, 0, 0, 0, 0,
    ]);
    let hi = fold::unpack_int(v, NarrowWidth::ByteIn16, UnpackPart::High);
    assert_eq!(hi.u16x8()[0], 0xFF80);
    assert_eq!(hi.u16x8()[1], 0x007F);
    assert_eq!(hi.u16x8()[2], 0xFFFF);
    let lo = fold::unpack_int(v, NarrowWidth::ByteIn16, UnpackPart::Low);
    assert_eq!(lo.u16x8()[0], 0xFF90);
}

#[test]
fn test_denorm_flush_keeps_sign_and_normals() {
    let v = Vec128::from_u32x4([0x0000_0001, 0x8000_0001, 0x3F80_0000, 0x007F_FFFF]);
    let flushed = fold::denorm_flush(v).u32x4();
    assert_eq!(flushed, [0, 0x8000_0000, 0x3F80_0000, 0]);
}

#[test]
fn test_mul_add_with_flushed_denormal_input() {
    // A denormal operand flushed to zero contributes nothing to the sum.
    let a = fold::denorm_flush(Vec128::from_u32x4([0x0000_0001; 4]));
    let c = Vec128::from_f32x4([2.0; 4]);
    let b = Vec128::from_f32x4([3.0; 4]);
    let v = fold::mul_add(a, c, b);
    assert_eq!(v.f32x4(), [3.0; 4]);
}

#[test]
fn test_neg_mul_sub() {
    // -(a * c - b)
    let a = Vec128::from_f32x4([2.0; 4]);
    let c = Vec128::from_f32x4([3.0; 4]);
    let b = Vec128::from_f32x4([10.0; 4]);
    let v = fold::neg_mul_sub(a, c, b);
    assert_eq!(v.f32x4(), [4.0; 4]);
}

#[test]
fn test_dot_products_broadcast() {
    let a = Vec128::from_f32x4([1.0, 2.0, 3.0, 4.0]);
    let b = Vec128::from_f32x4([5.0, 6.0, 7.0, 8.0]);
    assert_eq!(fold::dot3(a, b).f32x4(), [38.0; 4]);
    assert_eq!(fold::dot4(a, b).f32x4(), [70.0; 4]);
}

#[test]
fn test_round_modes() {
    let v = Vec128::from_f32x4([1.5, -1.5, 2.5, -0.5]);
    assert_eq!(fold::round(v, RoundMode::TowardNegative).f32x4(), [1.0, -2.0, 2.0, -1.0]);
    assert_eq!(fold::round(v, RoundMode::TowardPositive).f32x4(), [2.0, -1.0, 3.0, -0.0]);
    assert_eq!(fold::round(v, RoundMode::TowardZero).f32x4(), [1.0, -1.0, 2.0, -0.0]);
    assert_eq!(fold::round(v, RoundMode::Nearest).f32x4(), [2.0, -2.0, 2.0, -0.0]);
}

#[test]
fn test_convert_f2i_saturates() {
    let v = Vec128::from_f32x4([3.0e9, -3.0e9, 1.5, -2.5]);
    let (out, sat) = fold::convert_f2i(v, false);
    let words = out.u32x4();
    assert_eq!(words[0] as i32, i32::MAX);
    assert_eq!(words[1] as i32, i32::MIN);
    assert_eq!(words[2] as i32, 1);
    assert_eq!(words[3] as i32, -2);
    assert!(sat);

    let (out, sat) = fold::convert_f2i(Vec128::from_f32x4([1.0, 2.0, 3.0, 4.0]), false);
    assert_eq!(out.u32x4(), [1, 2, 3, 4]);
    assert!(!sat);
}

#[test]
fn test_rotate_left_within_lanes() {
    let v = fold::vector_rotl(
        Vec128::splat_u8(0b1000_0001),
        Vec128::splat_u8(1),
        Lane::I8,
    );
    assert_eq!(v.u8x16()[0], 0b0000_0011);
    // Shift amounts wrap at the lane width.
    let v = fold::vector_rotl(
        Vec128::splat_u8(0b1000_0001),
        Vec128::splat_u8(8),
        Lane::I8,
    );
    assert_eq!(v.u8x16()[0], 0b1000_0001);
}

#[test]
fn test_quadword_shift() {
    let mut bytes = [0u8; 16];
    bytes[15] = 0x01;
    let v = fold::quad_shl(Vec128::from_bytes(bytes), 4);
    assert_eq!(v.u8x16()[15], 0x10);
    let v = fold::quad_shr(v, 4);
    assert_eq!(v.u8x16()[15], 0x01);
}

#[test]
fn test_bound_check_mask_composition() {
    // The vcmpbfp shape: bit 31 per lane for a > b, bit 30 for !(a >= -b).
    let a = Vec128::from_f32x4([5.0, 1.0, -5.0, 3.0]);
    let b = Vec128::from_f32x4([3.0; 4]);
    let neg_b = Vec128::from_f32x4([-3.0; 4]);
    let gt = fold::vector_compare(a, b, Lane::F32, CmpCond::SignedGt).u32x4();
    let ge = fold::vector_compare(a, neg_b, Lane::F32, CmpCond::SignedGe).u32x4();
    let mut out = [0u32; 4];
    for i in 0..4 {
        out[i] = (gt[i] & 0x8000_0000) | (!ge[i] & 0x4000_0000);
    }
    // a > b only: bit 31 set, bit 30 clear.
    assert_eq!(out[0], 0x8000_0000);
    // In bounds: no bits.
    assert_eq!(out[1], 0);
    // Below -b only: bit 30 set, bit 31 clear.
    assert_eq!(out[2], 0x4000_0000);
    // On the upper bound: neither strict compare fires.
    assert_eq!(out[3], 0);
}

#[test]
fn test_select_is_bitwise() {
    let mask = Vec128::from_u32x4([0x0000_FFFF, 0, u32::MAX, 0xF0F0_F0F0]);
    let a = Vec128::splat_u32(0x1111_1111);
    let b = Vec128::splat_u32(0x2222_2222);
    let v = fold::select(mask, a, b);
    assert_eq!(
        v.u32x4(),
        [0x1111_2222, 0x1111_1111, 0x2222_2222, 0x2121_2121]
    );
}
