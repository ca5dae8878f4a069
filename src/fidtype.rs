//! The `FidType` record and feature flags (§3), and catalog lookup (§6).
//!
//! The catalog itself is a read-only collaborator the core does not own
//! (§6 "FidType catalog"); this module only defines the shape of an
//! entry and the lookup function. A small sample table lives in
//! `fidtable.rs` to exercise the seed tests.

use bitflags::bitflags;

bitflags! {
  /// Feature bits discriminating between recovery-pipeline variants
  /// (§3 "Feature bits").
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub struct Feature: u8 {
    /// Classical dual checksum present anywhere in the image.
    const STDCKS  = 1 << 0;
    /// An alternate checksum block bounded by start/end addresses.
    const ALTCKS  = 1 << 1;
    /// A second alternate checksum anchored at ECUREC.
    const ALT2CKS = 1 << 2;
    /// No RAMF; alt-cks bounds and the IVT2 pointer live in ECUREC.
    const ECUREC  = 1 << 3;
    /// Has a secondary vector table.
    const IVT2    = 1 << 4;
  }
}

/// Field offsets within the RAMF record (§3), relative to `p_ramf`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamfLayout {
  pub p_ram_jump: u32,
  pub p_ram_dla_max: u32,
  pub packs_start: u32,
  pub packs_end: u32,
  pub p_ivt2: u32,
  pub p_ecurec: u32,
  pub p_romend: u32,
}

/// A catalog entry describing one known MCU variant (§3 `FidType`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FidType {
  /// 8-byte CPU tag this entry matches against the FID-CPU string.
  pub cpu: [u8; 8],
  /// Expected image size in bytes.
  pub rom_size: u32,
  /// Size in bytes of the FID-base struct (used to locate RAMF/ECUREC).
  pub fid_size: u32,
  /// RAMF header sentinel (e.g. `0xFFFF_8000`), or `0` if RAMF is absent.
  pub ramf_header: u32,
  /// Maximum drift (in bytes) to search for a displaced RAMF record.
  pub ramf_max_dist: u32,
  /// Field offsets within the RAMF record.
  pub ramf: RamfLayout,
  /// Expected IVT2 address/offset, used by `find_ecurec`'s anchor scan.
  pub ivt2_expected: u32,
  pub features: Feature,
}

impl FidType {
  pub fn has(&self, feature: Feature) -> bool {
    self.features.contains(feature)
  }
}

/// Looks up a catalog entry by exact 8-byte CPU-string match (§6).
///
/// Returns `None` ("unknown sentinel") if nothing matches; callers
/// surface this as [`crate::error::UnknownFidTypeError`].
pub fn lookup<'a>(catalog: &'a [FidType], cpu: &[u8; 8]) -> Option<&'a FidType> {
  catalog.iter().find(|entry| &entry.cpu == cpu)
}
