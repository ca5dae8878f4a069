//! `detect_rm160` (§4.4): flags whether a RIPEMD-160 implementation's
//! initial-state constants appear anywhere in the image, as a simple
//! presence signal rather than an actual hash verification.

use crate::primitives::u32memstr;
use crate::romfile::RomFile;

const RM160_H0: u32 = 0x6745_2301;
const RM160_H1: u32 = 0x98BA_DCFE;

/// Sets `rom.has_rm160` if both initial-state words occur as aligned
/// words anywhere in the image (order and relative position are not
/// checked, matching the presence-only contract of this signal).
pub fn detect_rm160(rom: &mut RomFile) -> bool {
  let buf = &rom.image.bytes;
  let len = buf.len();
  let found = u32memstr(buf, 0, len, RM160_H0).is_some() && u32memstr(buf, 0, len, RM160_H1).is_some();
  rom.has_rm160 = found;
  found
}
