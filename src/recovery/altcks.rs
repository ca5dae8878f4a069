//! `validate_altcks` and `anchor_alt2` (§4.4): the two uses of the
//! checksum kernel's alt-locate primitive over the bounds `find_ramf`
//! or `find_ecurec` resolved.

use crate::checksum::checksum_alt2;
use crate::fidtype::Feature;
use crate::offset::Offset;
use crate::romfile::RomFile;

/// Rounds a `packs_end` address that lands two bytes short of word
/// alignment up to the next word boundary above it (§4.2 design note:
/// "add 1, mask low two bits, add 4").
fn round_acend(end: u32) -> u32 {
  (end.wrapping_add(1) & !0x3u32).wrapping_add(4)
}

/// Folds `[p_acstart, round_acend(p_acend))` with no skips and locates
/// the resulting pair across the whole image (§4.4). Gated on the
/// `ALTCKS` feature bit and on both bounds already being known.
pub fn validate_altcks(rom: &mut RomFile) -> bool {
  let Some(fid_type) = rom.fid_type else { return false };
  if !fid_type.has(Feature::ALTCKS) {
    return false;
  }
  let Some(start) = rom.p_acstart.index() else { return false };
  let Some(end) = rom.p_acend.index() else { return false };
  let end = round_acend(end as u32) as usize;
  if end > rom.image.len() || start >= end {
    log::warn!("validate_altcks: bounds [{start:#x}, {end:#x}) fall outside the image");
    return false;
  }

  match checksum_alt2(&rom.image.bytes, start, end, None, None) {
    Ok((p_acs, p_acx)) => {
      rom.p_acs = p_acs;
      rom.p_acx = p_acx;
      rom.cks_alt_good = true;
      true
    }
    Err(err) => {
      log::warn!("validate_altcks: {err}");
      false
    }
  }
}

/// Folds `[p_ecurec, image_end)` skipping the embedded IVT2 pointer
/// word at `(p_ivt2 - 4)` (§4.4 "alt2 anchor"), since that word is a
/// pointer into the image rather than protected data. Gated on the
/// `ALT2CKS` feature bit.
pub fn anchor_alt2(rom: &mut RomFile) -> bool {
  let Some(fid_type) = rom.fid_type else { return false };
  if !fid_type.has(Feature::ALT2CKS) {
    return false;
  }
  let Some(p_ecurec) = rom.p_ecurec.index() else { return false };
  let Some(p_ivt2) = rom.p_ivt2.index() else { return false };

  let skip2 = (p_ivt2.checked_sub(4)).and_then(|v| v.checked_sub(p_ecurec));
  rom.p_ac2start = Offset::known(p_ecurec as u32);
  let end = rom.image.len() - (rom.image.len() % 4);

  match checksum_alt2(&rom.image.bytes, p_ecurec, end, None, skip2) {
    Ok((p_acs, p_acx)) => {
      rom.p_a2cs = p_acs;
      rom.p_a2cx = p_acx;
      rom.cks_alt2_good = true;
      true
    }
    Err(err) => {
      log::warn!("anchor_alt2: {err}");
      false
    }
  }
}
