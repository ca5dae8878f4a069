//! S2 (alt cks): FidType declares ALTCKS; a RAMF record sits right
//! after the FID struct (no drift) and names an alt-cks block via
//! `packs_start`/`packs_end`. The fold over that block is placed
//! elsewhere in the image as `(p_acs, p_acx)`.

mod common;

use romcore::{analyze, fidtype::FidType, fidtype::RamfLayout, Feature, Image};

const ROM_SIZE: usize = 512 * 1024;
const FID_SIZE: u32 = 0x40;

fn altcks_fid_type() -> FidType {
  FidType {
    cpu: *b"SH7055S\"",
    rom_size: ROM_SIZE as u32,
    fid_size: FID_SIZE,
    ramf_header: 0xFFFF_8000,
    ramf_max_dist: 64,
    ramf: RamfLayout {
      p_ram_jump: 4,
      p_ram_dla_max: 8,
      packs_start: 12,
      packs_end: 16,
      p_ivt2: 20,
      p_ecurec: 24,
      p_romend: 28,
    },
    ivt2_expected: 0,
    features: Feature::ALTCKS,
  }
}

#[test]
fn altcks_block_is_located_and_validated() {
  let mut bytes = vec![0u8; ROM_SIZE];

  // Keep the FID/RAMF structs well clear of the alt-cks block
  // (acstart=0x10000, rounded acend=0x40000) so the fold's bulk fill
  // below doesn't clobber them.
  let p_fid = 0x60000 - 4;
  common::place_fid(&mut bytes, p_fid, b"SH7055S\"");

  let p_ramf = p_fid + FID_SIZE as usize;
  common::write_u32(&mut bytes, p_ramf, 0xFFFF_8000);

  let acstart = 0x1_0000u32;
  let acend = 0x3_FFFCu32;
  common::write_u32(&mut bytes, p_ramf + 12, acstart);
  common::write_u32(&mut bytes, p_ramf + 16, acend);

  // Fill the alt-cks block with distinguishable data, then compute its
  // fold over the rounded range and place the pair far outside it.
  let rounded_end = ((acend.wrapping_add(1)) & !0x3) + 4;
  for off in (acstart as usize..rounded_end as usize).step_by(4) {
    common::write_u32(&mut bytes, off, (off as u32).wrapping_mul(0x0ABC_DEF1));
  }
  let (acs, acx) = common::fold(&bytes, acstart as usize, rounded_end as usize, &[]);
  common::write_u32(&mut bytes, ROM_SIZE - 8, acs);
  common::write_u32(&mut bytes, ROM_SIZE - 4, acx);

  let catalog = vec![altcks_fid_type()];
  let rom = analyze(Image::new(bytes, "s2.bin"), &catalog).expect("image is in bounds");

  assert_eq!(rom.p_ramf.get(), Some(p_ramf as u32));
  assert_eq!(rom.ramf_offset, 0);
  assert!(rom.cks_alt_good);
  assert_eq!(rom.p_acs.get(), Some((ROM_SIZE - 8) as u32));
  assert_eq!(rom.p_acx.get(), Some((ROM_SIZE - 4) as u32));
}
