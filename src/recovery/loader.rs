//! `find_loader` (§4.4): locates the `LOADER` struct and parses its
//! version tag and CPU string.
//!
//! The struct layout (a fixed prefix before the tag, a two-digit ASCII
//! version immediately after it, then the CPU string) isn't spelled out
//! numerically in the distilled spec; the offsets below are this
//! crate's resolution of that gap, recorded in `DESIGN.md`.

use crate::offset::Offset;
use crate::primitives::u8memstr;
use crate::romfile::{RomFile, SliceView};

const LOADER_TAG: &[u8] = b"LOADER";
const LOADER_PREFIX_LEN: usize = 4;
const LOADER_VERSION_LEN: usize = 2;
const LOADER_CPU_OFFSET: usize = LOADER_PREFIX_LEN + LOADER_TAG.len() + LOADER_VERSION_LEN;
const LOADER_CPU_LEN: usize = 8;

/// Total size of the loader struct, from its origin through the CPU
/// string. Exposed so `find_fid` can tell whether a `DATAB` match
/// landed inside this struct.
pub(crate) const LOADER_STRUCT_LEN: usize = LOADER_CPU_OFFSET + LOADER_CPU_LEN;

/// Locates the ASCII needle `"LOADER"`, taking the first occurrence if
/// several exist, backs up to the struct origin, and parses the
/// two-digit decimal version and 8-byte CPU string that follow.
pub fn find_loader(rom: &mut RomFile) -> bool {
  let buf = &rom.image.bytes;
  let Some(tag_off) = u8memstr(buf, 0, buf.len(), LOADER_TAG) else {
    log::debug!("find_loader: LOADER tag not found");
    return false;
  };
  if tag_off < LOADER_PREFIX_LEN {
    log::warn!("find_loader: LOADER tag at {tag_off:#x} is too close to the start of the image");
    return false;
  }

  let p_loader = tag_off - LOADER_PREFIX_LEN;
  rom.p_loader = Offset::known(p_loader as u32);

  let version_off = tag_off + LOADER_TAG.len();
  rom.loader_v = buf
    .get(version_off..version_off + LOADER_VERSION_LEN)
    .and_then(parse_two_decimal_digits);

  let cpu_off = p_loader + LOADER_CPU_OFFSET;
  if cpu_off + LOADER_CPU_LEN <= buf.len() {
    rom.loader_cpu = SliceView::new(cpu_off, LOADER_CPU_LEN);
  }
  true
}

/// Design note §9: pinned to exactly two digits, per the spec's own
/// flagged ambiguity ("pin to exactly two digits if testing reveals
/// ambiguity") — any non-digit or wrong-length run is simply unparsed
/// rather than guessed at.
fn parse_two_decimal_digits(bytes: &[u8]) -> Option<u32> {
  if bytes.len() != LOADER_VERSION_LEN || !bytes.iter().all(u8::is_ascii_digit) {
    return None;
  }
  Some((bytes[0] - b'0') as u32 * 10 + (bytes[1] - b'0') as u32)
}
