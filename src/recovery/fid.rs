//! `find_fid` (§4.4): locates the FID struct, guards against matching
//! inside the already-found `LOADER` struct, and selects a `FidType`
//! from the catalog.

use super::loader::LOADER_STRUCT_LEN;
use crate::error::UnknownFidTypeError;
use crate::fidtype::{self, FidType};
use crate::offset::Offset;
use crate::primitives::u8memstr;
use crate::romfile::{RomFile, SliceView};

const FID_ANCHOR: &[u8] = b"DATAB";
const FID_FULL_TAG_LEN: usize = b"DATABASE".len();
const FID_PREFIX_LEN: usize = 4;
const FID_TAG_OFFSET: usize = FID_PREFIX_LEN;
const FID_STRING_OFFSET: usize = FID_TAG_OFFSET + FID_FULL_TAG_LEN;
const FID_STRING_LEN: usize = 16;
const FID_CPU_OFFSET: usize = FID_STRING_OFFSET + FID_STRING_LEN;
const FID_CPU_LEN: usize = 8;

/// Locates `"DATAB"` (a sufficient anchor for `"DATABASE"`), re-searches
/// past the `LOADER` struct if the first hit lands inside it, then
/// selects the catalog entry matching the FID-CPU string.
///
/// Returns `Ok(false)` if no FID struct is found at all (non-fatal);
/// returns `Err` only when a FID struct is found but its CPU string
/// matches no catalog entry (§7 `UnknownFidType`, fatal to the rest of
/// the pipeline).
pub fn find_fid(rom: &mut RomFile, catalog: &[FidType]) -> Result<bool, UnknownFidTypeError> {
  let buf_len = rom.image.len();
  let mut search_start = 0usize;

  let p_fid = loop {
    let Some(tag_off) = u8memstr(&rom.image.bytes, search_start, buf_len - search_start, FID_ANCHOR)
    else {
      log::debug!("find_fid: DATABASE tag not found");
      return Ok(false);
    };
    if tag_off < FID_TAG_OFFSET {
      search_start = tag_off + 1;
      continue;
    }
    let candidate = tag_off - FID_TAG_OFFSET;
    if inside_loader_struct(rom, candidate) {
      let Some(p_loader) = rom.p_loader.index() else {
        search_start = tag_off + 1;
        continue;
      };
      search_start = p_loader + LOADER_STRUCT_LEN;
      continue;
    }
    break candidate;
  };

  rom.p_fid = Offset::known(p_fid as u32);

  let fid_cpu_off = p_fid + FID_CPU_OFFSET;
  if fid_cpu_off + FID_CPU_LEN > buf_len {
    log::warn!("find_fid: FID struct at {p_fid:#x} runs past the end of the image");
    return Ok(true);
  }
  rom.fid_string = SliceView::new(p_fid + FID_STRING_OFFSET, FID_STRING_LEN);
  rom.fid_cpu = SliceView::new(fid_cpu_off, FID_CPU_LEN);

  let mut cpu = [0u8; FID_CPU_LEN];
  cpu.copy_from_slice(&rom.image.bytes[fid_cpu_off..fid_cpu_off + FID_CPU_LEN]);

  let Some(entry) = fidtype::lookup(catalog, &cpu) else {
    return Err(UnknownFidTypeError { cpu });
  };

  if rom.image.len() != entry.rom_size as usize {
    log::warn!(
      "find_fid: image size {} does not match FidType.rom_size {}",
      rom.image.len(),
      entry.rom_size
    );
  }
  rom.fid_type = Some(*entry);
  Ok(true)
}

fn inside_loader_struct(rom: &RomFile, candidate: usize) -> bool {
  match rom.p_loader.index() {
    Some(p_loader) => candidate >= p_loader && candidate < p_loader + LOADER_STRUCT_LEN,
    None => false,
  }
}
