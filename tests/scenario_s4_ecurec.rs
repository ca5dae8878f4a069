//! S4 (ECUREC): FidType has `ECUREC` and no RAMF header. The expected
//! IVT2 word is placed such that the derived `p_romend` word holds
//! `rom_size - 1`, letting `find_ecurec` recover `p_ivt2` and the
//! alt-cks bounds without a RAMF record at all.

mod common;

use romcore::{analyze, fidtype::FidType, fidtype::RamfLayout, Feature, Image};

const ROM_SIZE: usize = 1024 * 1024;

fn ecurec_fid_type() -> FidType {
  FidType {
    cpu: *b"SH7058S\"",
    rom_size: ROM_SIZE as u32,
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
    ivt2_expected: 0x7_FF00,
    features: Feature::ECUREC | Feature::ALTCKS,
  }
}

#[test]
fn ecurec_block_resolves_ivt2_and_altcks_bounds_without_ramf() {
  let mut bytes = vec![0u8; ROM_SIZE];

  let p_fid = 0x40000 - 4;
  common::place_fid(&mut bytes, p_fid, b"SH7058S\"");

  let p_ecurec = 0x9_0000usize;
  let ivt2_expected = 0x7_FF00u32;
  common::write_u32(&mut bytes, p_ecurec + 16, ivt2_expected);
  common::write_u32(&mut bytes, p_ecurec + 8, 0x1_0000);
  common::write_u32(&mut bytes, p_ecurec + 12, 0x1_FFFC);
  common::write_u32(&mut bytes, p_ecurec + 20, ROM_SIZE as u32 - 1);

  let catalog = vec![ecurec_fid_type()];
  let rom = analyze(Image::new(bytes, "s4.bin"), &catalog).expect("image is in bounds");

  assert_eq!(rom.p_ivt2.get(), Some(ivt2_expected));
  assert_eq!(rom.p_ecurec.get(), Some(p_ecurec as u32));
  assert_eq!(rom.p_acstart.get(), Some(0x1_0000));
  assert_eq!(rom.p_acend.get(), Some(0x1_FFFC));
}
