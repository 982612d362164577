//! Unit tests for instruction field accessors

use vmxrecomp_core::recompiler::decoder::InstrData;

/// Assemble a VX128 word from full 7/6-bit register indices.
fn vx128(vd: u32, va: u32, vb: u32) -> InstrData {
    let word = (vd & 0x1F) << 21
        | ((vd >> 5) & 0x3) << 2
        | (va & 0x1F) << 16
        | ((va >> 5) & 0x1) << 5
        | ((va >> 6) & 0x1) << 10
        | (vb & 0x1F) << 11
        | ((vb >> 5) & 0x3);
    InstrData::new(word)
}

#[test]
fn test_vx_fields() {
    let i = InstrData::new(3 << 21 | 17 << 16 | 29 << 11);
    assert_eq!(i.vx_vd(), 3);
    assert_eq!(i.vx_va(), 17);
    assert_eq!(i.vx_vb(), 29);
}

#[test]
fn test_vxr_record_bit() {
    let i = InstrData::new(1 << 21 | 2 << 16 | 3 << 11 | 1 << 10);
    assert!(i.vxr_rc());
    assert_eq!(i.vxr_vd(), 1);
    let i = InstrData::new(1 << 21 | 2 << 16 | 3 << 11);
    assert!(!i.vxr_rc());
}

#[test]
fn test_vxa_third_operand() {
    let i = InstrData::new(4 << 21 | 5 << 16 | 6 << 11 | 21 << 6);
    assert_eq!(i.vxa_vd(), 4);
    assert_eq!(i.vxa_va(), 5);
    assert_eq!(i.vxa_vb(), 6);
    assert_eq!(i.vxa_vc(), 21);
}

#[test]
fn test_vx128_register_reconstruction() {
    // D and B carry six bits, A carries the extra seventh.
    let i = vx128(77, 127, 64);
    assert_eq!(i.vx128_vd(), 77);
    assert_eq!(i.vx128_va(), 127);
    assert_eq!(i.vx128_vb(), 64);
}

#[test]
fn test_vx128_reconstruction_covers_full_range() {
    for vd in [0u32, 31, 32, 63, 95, 127] {
        let d6 = vd & 0x3F;
        let i = vx128(d6, vd, d6);
        assert_eq!(i.vx128_vd(), d6);
        assert!(i.vx128_vd() < 128);
        assert_eq!(i.vx128_va(), vd);
        assert!(i.vx128_va() < 128);
    }
}

#[test]
fn test_vx128_1_gpr_fields() {
    let word = (41 & 0x1F) << 21 | ((41u32 >> 5) & 0x3) << 2 | 13 << 16 | 30 << 11;
    let i = InstrData::new(word);
    assert_eq!(i.vx128_1_vd(), 41);
    assert_eq!(i.vx128_1_ra(), 13);
    assert_eq!(i.vx128_1_rb(), 30);
}

#[test]
fn test_vx128_3_immediate() {
    let word = (100u32 & 0x1F) << 21 | ((100u32 >> 5) & 0x3) << 2 | 19 << 16 | (40 & 0x1F) << 11
        | (40u32 >> 5) & 0x3;
    let i = InstrData::new(word);
    assert_eq!(i.vx128_3_vd(), 100);
    assert_eq!(i.vx128_3_imm(), 19);
    assert_eq!(i.vx128_3_vb(), 40);
}

#[test]
fn test_vx128_4_z_field() {
    let i = InstrData::new(3 << 6);
    assert_eq!(i.vx128_4_z(), 3);
    assert_eq!(i.vx128_4_imm(), 0);
}

#[test]
fn test_vx128_5_shift_amount() {
    let i = InstrData::new(0xF << 6);
    assert_eq!(i.vx128_5_sh(), 15);
}

#[test]
fn test_vx128_p_permute_immediate() {
    // PERM = PERMl | PERMh << 5, split across bits 16-20 and 6-8.
    let perm = 0b101_10110u32;
    let word = (perm & 0x1F) << 16 | ((perm >> 5) & 0x7) << 6;
    let i = InstrData::new(word);
    assert_eq!(i.vx128_p_perm(), perm);
}

#[test]
fn test_vx128_r_record_bit() {
    let i = InstrData::new(1 << 6);
    assert!(i.vx128_r_rc());
    assert!(!InstrData::new(0).vx128_r_rc());
}

#[test]
fn test_accessors_are_pure() {
    let i = InstrData::new(0xFFFF_FFFF);
    // Every accessor decodes any bit pattern to an in-range integer.
    assert!(i.vx128_va() < 128);
    assert!(i.vx128_vd() < 128);
    assert!(i.vx128_vb() < 128);
    assert!(i.vx_vd() < 32);
    assert!(i.vxa_vc() < 32);
    assert!(i.vx128_5_sh() < 16);
}
