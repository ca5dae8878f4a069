//! Shared fixture builders for the end-to-end scenario tests. Mirrors
//! the struct layouts `recovery::loader` and `recovery::fid` assume
//! internally (prefix, tag, then fields) without depending on their
//! private constants, since these are black-box tests against
//! `romcore::analyze`.

use byteorder::{BigEndian, ByteOrder};

pub const LOADER_STRUCT_LEN: usize = 20;
pub const FID_CPU_OFFSET: usize = 28;

/// Writes a LOADER struct at `at`: 4-byte prefix, `"LOADER"`, a 2-digit
/// ASCII version, then an 8-byte CPU string.
pub fn place_loader(bytes: &mut [u8], at: usize, version: &[u8; 2], cpu: &[u8; 8]) {
  bytes[at + 4..at + 10].copy_from_slice(b"LOADER");
  bytes[at + 10..at + 12].copy_from_slice(version);
  bytes[at + 12..at + 20].copy_from_slice(cpu);
}

/// Writes a FID struct at `at`: 4-byte prefix, `"DATABASE"`, a 16-byte
/// string field, then an 8-byte CPU string.
pub fn place_fid(bytes: &mut [u8], at: usize, cpu: &[u8; 8]) {
  bytes[at + 4..at + 12].copy_from_slice(b"DATABASE");
  bytes[at + FID_CPU_OFFSET..at + FID_CPU_OFFSET + 8].copy_from_slice(cpu);
}

pub fn write_u32(bytes: &mut [u8], at: usize, value: u32) {
  BigEndian::write_u32(&mut bytes[at..at + 4], value);
}

pub fn read_u32(bytes: &[u8], at: usize) -> u32 {
  BigEndian::read_u32(&bytes[at..at + 4])
}

/// Writes a canonical IVT at `at`: matching reset-vector pair, PC
/// `0x104`, SP `0xFFFF7FFC`.
pub fn place_canonical_ivt(bytes: &mut [u8], at: usize) {
  write_u32(bytes, at, 0x0000_0104);
  write_u32(bytes, at + 4, 0xFFFF_7FFC);
  write_u32(bytes, at + 8, 0x0000_0104);
  write_u32(bytes, at + 12, 0xFFFF_7FFC);
}

/// Folds `bytes[start..end)` the same way the std/alt-cks algebra does,
/// skipping any offsets in `skips`, and returns `(cks, ckx)`.
pub fn fold(bytes: &[u8], start: usize, end: usize, skips: &[usize]) -> (u32, u32) {
  let (sum, xor) = fold_raw(bytes, start, end, skips);
  let cks = xor;
  let ckx = sum.wrapping_sub(xor).wrapping_sub(xor);
  (cks, ckx)
}

/// The plain `(sum, xor)` fold of `bytes[start..end)`, skipping any
/// offsets in `skips`, with no cks/ckx derivation applied. Used to build
/// whole-image self-consistent checksum fixtures, where the pair's own
/// slots are folded in rather than skipped (§4.2 "Standard locate").
pub fn fold_raw(bytes: &[u8], start: usize, end: usize, skips: &[usize]) -> (u32, u32) {
  let mut sum = 0u32;
  let mut xor = 0u32;
  let mut off = start;
  while off + 4 <= end {
    if !skips.contains(&off) {
      let word = read_u32(bytes, off);
      sum = sum.wrapping_add(word);
      xor ^= word;
    }
    off += 4;
  }
  (sum, xor)
}
