//! A small built-in catalog of known MCU variants (§6 "FidType
//! catalog"), enough to exercise the recovery pipeline end to end.
//! Real deployments are expected to supply their own table; this one
//! exists so the crate has something to analyze against out of the box
//! and so the seed tests in `tests/` have fixtures to target.

use crate::fidtype::{Feature, FidType, RamfLayout};

/// A classic single-checksum variant with a RAMF record and a secondary
/// vector table (§8 scenario S1/S3).
pub const SH7055_CLASSIC: FidType = FidType {
  cpu: *b"SH7055S\"",
  rom_size: 512 * 1024,
  fid_size: 0x40,
  ramf_header: 0xFFFF_8000,
  ramf_max_dist: 64,
  ramf: RamfLayout {
    p_ram_jump: 0,
    p_ram_dla_max: 4,
    packs_start: 8,
    packs_end: 12,
    p_ivt2: 16,
    p_ecurec: 20,
    p_romend: 24,
  },
  ivt2_expected: 0x7_F000,
  features: Feature::STDCKS.union(Feature::ALTCKS).union(Feature::IVT2),
};

/// An ECUREC-variant with no RAMF record, locating its alt-cks bounds
/// and IVT2 pointer by scanning for the expected IVT2 word instead (§8
/// scenario S4).
pub const SH7058_ECUREC: FidType = FidType {
  cpu: *b"SH7058S\"",
  rom_size: 1024 * 1024,
  fid_size: 0x40,
  ramf_header: 0,
  ramf_max_dist: 0,
  ramf: RamfLayout {
    p_ram_jump: 0,
    p_ram_dla_max: 0,
    packs_start: 8,
    packs_end: 12,
    p_ivt2: 16,
    p_ecurec: 0,
    p_romend: 20,
  },
  ivt2_expected: 0xF_E000,
  features: Feature::ALTCKS.union(Feature::ALT2CKS).union(Feature::ECUREC),
};

/// Returns the crate's built-in sample catalog.
pub fn builtin_catalog() -> Vec<FidType> {
  vec![SH7055_CLASSIC, SH7058_ECUREC]
}
