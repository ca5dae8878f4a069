//! Wires the checksum kernel's `checksum_std` into the recovery
//! pipeline, gated on the selected `FidType`'s `STDCKS` feature bit.

use crate::checksum::checksum_std;
use crate::fidtype::Feature;
use crate::romfile::RomFile;

pub fn locate_stdcks(rom: &mut RomFile) -> bool {
  let Some(fid_type) = rom.fid_type else {
    return false;
  };
  if !fid_type.has(Feature::STDCKS) {
    return false;
  }
  match checksum_std(&rom.image.bytes, rom.image.len()) {
    Ok((p_cks, p_ckx)) => {
      rom.p_cks = p_cks;
      rom.p_ckx = p_ckx;
      true
    }
    Err(err) => {
      log::warn!("locate_stdcks: {err}");
      false
    }
  }
}
