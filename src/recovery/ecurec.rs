//! `find_ecurec` (§4.4): the ECUREC-variant counterpart to `find_ramf`,
//! used when the selected `FidType` has no RAMF record and instead
//! anchors the secondary vector table and alt-cks bounds off an ECUREC
//! block located by scanning for its expected IVT2 word.

use crate::offset::Offset;
use crate::primitives::{read_u32, u32memstr};
use crate::romfile::RomFile;

use super::clamp_altcks_bounds;

/// Scans the image for the catalog's `ivt2_expected` word, treating each
/// hit as a candidate `p_ivt2` and working backward to the ECUREC
/// origin via the catalog's `RamfLayout` offsets. The first candidate
/// whose derived `p_romend` word equals `rom_size - 1` is accepted
/// (§4.4 "ECUREC anchor"); earlier candidates that fail this check are
/// skipped rather than treated as fatal.
pub fn find_ecurec(rom: &mut RomFile) -> bool {
  use crate::fidtype::Feature;
  let Some(fid_type) = rom.fid_type else { return false };
  if !fid_type.has(Feature::ECUREC) {
    return false;
  }

  let buf_len = rom.image.len();
  let layout = fid_type.ramf;
  let mut search_start = 0usize;

  while let Some(hit) = u32memstr(&rom.image.bytes, search_start, buf_len - search_start, fid_type.ivt2_expected) {
    if accept_ecurec(rom, &fid_type, hit) {
      let p_ecurec = (hit as i64 - layout.p_ivt2 as i64) as i64;
      if p_ecurec < 0 {
        search_start = hit + 4;
        continue;
      }
      let p_ecurec = p_ecurec as usize;
      rom.p_ecurec = Offset::known(p_ecurec as u32);
      rom.p_ivt2 = Offset::known(hit as u32);

      let word_at = |rel: u32| -> Option<u32> {
        let off = p_ecurec.checked_add(rel as usize)?;
        (off + 4 <= buf_len).then(|| read_u32(&rom.image.bytes, off))
      };
      let packs_start = word_at(layout.packs_start);
      let packs_end = word_at(layout.packs_end);
      clamp_altcks_bounds(rom, packs_start, packs_end);
      return true;
    }
    search_start = hit + 4;
  }

  log::debug!("find_ecurec: no candidate ECUREC block passed the p_romend check");
  false
}

/// Checks that the candidate's derived `p_romend` word equals
/// `rom_size - 1`, the single discriminating fact available without a
/// RAMF record to corroborate the guess.
fn accept_ecurec(rom: &RomFile, fid_type: &crate::fidtype::FidType, ivt2_hit: usize) -> bool {
  let layout = &fid_type.ramf;
  let signed_ecurec = ivt2_hit as i64 - layout.p_ivt2 as i64;
  if signed_ecurec < 0 {
    return false;
  }
  let p_ecurec = signed_ecurec as usize;
  let Some(p_romend) = p_ecurec.checked_add(layout.p_romend as usize) else { return false };
  if p_romend + 4 > rom.image.len() {
    return false;
  }
  read_u32(&rom.image.bytes, p_romend) == fid_type.rom_size.wrapping_sub(1)
}
