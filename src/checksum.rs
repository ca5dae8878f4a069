//! The checksum kernel (§4.2): the dual sum+xor fold, the two ways of
//! locating where its expected value is embedded in an image, and the
//! correction solver that inverts the fold to make a chosen region
//! produce any desired `(sum, xor)` pair.
//!
//! All arithmetic here is deliberately wrapping (design note §9): the
//! algebra only holds up under 32-bit modular addition, so every `+`/`-`
//! below is spelled out as `wrapping_add`/`wrapping_sub`.

use crate::error::{ChecksumError, InfeasibleError, NotFoundError};
use crate::offset::Offset;
use crate::primitives::{read_u32, u32memstr, write_u32};

/// Folds `buf[0..len)` (rounded down to a whole number of words) into a
/// `(sum, xor)` pair, skipping any aligned word offset present in
/// `skips`. `len` is assumed to already be a multiple of 4 by callers
/// that know their region is word-aligned; excess trailing bytes are
/// silently ignored otherwise (§4.2).
fn fold_skip(buf: &[u8], start: usize, end: usize, skips: &[Option<usize>]) -> (u32, u32) {
  let mut sum: u32 = 0;
  let mut xor: u32 = 0;
  let mut offset = start;
  while offset + 4 <= end {
    if !skips.contains(&Some(offset)) {
      let word = read_u32(buf, offset);
      sum = sum.wrapping_add(word);
      xor ^= word;
    }
    offset += 4;
  }
  (sum, xor)
}

/// `sum32(buf, len) -> (sum, xor)`: the whole-buffer fold, big-endian
/// word at a time, wrapping-add sum and running xor (§8 property 1).
pub fn sum32(buf: &[u8], len: usize) -> (u32, u32) {
  let words_len = len - (len % 4);
  fold_skip(buf, 0, words_len, &[])
}

fn locate_first(buf: &[u8], len: usize, needle: u32) -> Result<Offset, NotFoundError> {
  u32memstr(buf, 0, len, needle)
    .map(|off| Offset::known(off as u32))
    .ok_or(NotFoundError::Word(needle))
}

/// Locates the standard dual checksum (§4.2 "Standard locate").
///
/// Computed over the *whole* image: assuming the two embedded words
/// would read as zero, the algebra collapses to `cks =
/// xor-of-everything` and `ckx = sum - 2*xor` (§4.2: "Compute `(sumt,
/// xort)` over the whole image"); both are then searched for as aligned
/// words anywhere in the image. A warning (not an error) is logged if
/// either value occurs more than once; zero occurrences is a
/// [`NotFoundError`].
pub fn checksum_std(buf: &[u8], len: usize) -> Result<(Offset, Offset), ChecksumError> {
  let (sum_total, xor_total) = sum32(buf, len);
  let cks = xor_total;
  let ckx = sum_total.wrapping_sub(xor_total).wrapping_sub(xor_total);

  let p_cks = locate_first(buf, len, cks)?;
  let p_ckx = locate_first(buf, len, ckx)?;
  warn_if_ambiguous(buf, len, cks, p_cks, "CKS");
  warn_if_ambiguous(buf, len, ckx, p_ckx, "CKX");
  Ok((p_cks, p_ckx))
}

fn warn_if_ambiguous(buf: &[u8], len: usize, needle: u32, first: Offset, label: &str) {
  let Some(first) = first.index() else { return };
  if u32memstr(buf, first + 4, len.saturating_sub(first + 4), needle).is_some() {
    log::warn!("{label} value {needle:#010x} occurs more than once in the image; using the first match at {first:#x}");
  }
}

/// Locates the alt/alt2 checksum (§4.2 "Alternate locate").
///
/// Same algebra as [`checksum_std`], but the fold only runs over
/// `[start, end)` and skips up to two caller-supplied word offsets,
/// given *relative to `start`* (e.g. a pointer embedded inside the
/// protected region that isn't itself protected data — the alt2 anchor
/// in §4.4 passes `skip2 = (p_ivt2 - 4) - p_ecurec` with `start =
/// p_ecurec`). The located values are then searched for across the
/// *whole* image, matching how `validate_altcks` and the alt2 anchor
/// both use this primitive (§4.4).
pub fn checksum_alt2(
  buf: &[u8],
  start: usize,
  end: usize,
  skip1: Option<usize>,
  skip2: Option<usize>,
) -> Result<(Offset, Offset), ChecksumError> {
  let absolute = |rel: Option<usize>| rel.map(|r| start + r);
  let (sum_part, xor_part) = fold_skip(buf, start, end, &[absolute(skip1), absolute(skip2)]);
  let acs = xor_part;
  let acx = sum_part.wrapping_sub(xor_part).wrapping_sub(xor_part);

  let p_acs = locate_first(buf, buf.len(), acs)?;
  let p_acx = locate_first(buf, buf.len(), acx)?;
  Ok((p_acs, p_acx))
}

/// Solves `a + b = ds (mod 2^32)` given `a ^ b = dx`, processing bits
/// from the MSB down. Returns `None` when a bit position demands both
/// an incoming carry and a stored sum bit of `1` simultaneously, which
/// is the specified infeasibility condition (§4.2).
fn solve_add_xor(ds: u32, dx: u32) -> Option<(u32, u32)> {
  let mut a: u32 = 0;
  let mut b: u32 = 0;
  let mut carry: bool = false;
  for i in (0..32).rev() {
    let s_i = (ds >> i) & 1 == 1;
    let dx_i = (dx >> i) & 1 == 1;
    if dx_i {
      a |= 1 << i;
      carry = if !carry {
        !s_i
      } else if s_i {
        return None;
      } else {
        true
      };
    } else {
      if carry {
        a |= 1 << i;
        b |= 1 << i;
      }
      carry = s_i;
    }
  }
  Some((a, b))
}

/// The correction solver (§4.2 "Correction solver").
///
/// `p_cks`/`p_ckx` must already hold the target `(CKS, CKX)` values the
/// caller wants the whole-image fold to reproduce — using the same
/// role split as [`checksum_std`], where the word at `p_cks` is the
/// xor-channel value (`cks = xor-of-everything`) and the word at
/// `p_ckx` is the derived additive residual (`ckx = sum - 2*xor`).
/// `p_a`, `p_b`, `p_c` are three distinct word-aligned offsets the
/// solver is free to overwrite.
///
/// The solver first picks `mang` to cancel the xor channel exactly
/// (`a ^ b = dx' = 0`), reducing the problem to `a + b = ds'` for a
/// single free word split two ways; when the MSB-to-LSB bit
/// reconstruction hits a carry conflict, `mang` is decremented and the
/// whole derivation restarts from the top bit (§4.2). On success,
/// `checksum_std` re-locates `(CKS, CKX)` at their original positions
/// (§8 property 2). On failure, the buffer is left exactly as it was
/// (§7 `Infeasible`).
pub fn checksum_fix(
  buf: &mut [u8],
  len: usize,
  p_cks: usize,
  p_ckx: usize,
  p_a: usize,
  p_b: usize,
  p_c: usize,
) -> Result<(), ChecksumError> {
  let cks_target = read_u32(buf, p_cks);
  let ckx_target = read_u32(buf, p_ckx);
  let saved = (
    read_u32(buf, p_a),
    read_u32(buf, p_b),
    read_u32(buf, p_c),
  );

  write_u32(buf, p_a, 0);
  write_u32(buf, p_b, 0);
  write_u32(buf, p_c, 0);
  let (base_sum, base_xor) = sum32(buf, len);

  // The total fold, once a/b/mang are written back, must read
  // `total_xor == cks_target` and, by definition of the derived
  // residual, `total_sum == ckx_target + 2*cks_target`.
  let xor_delta = cks_target ^ base_xor;
  let sum_target = ckx_target.wrapping_add(cks_target.wrapping_mul(2));

  let mut mang: u32 = xor_delta;
  loop {
    let dx = xor_delta ^ mang;
    let ds = sum_target.wrapping_sub(base_sum).wrapping_sub(mang);
    match solve_add_xor(ds, dx) {
      Some((a, b)) => {
        write_u32(buf, p_a, a);
        write_u32(buf, p_b, b);
        write_u32(buf, p_c, mang);

        let (verify_sum, verify_xor) = sum32(buf, len);
        let verify_ckx = verify_sum.wrapping_sub(verify_xor).wrapping_sub(verify_xor);
        if verify_xor == cks_target && verify_ckx == ckx_target {
          return Ok(());
        }
        // The algebra above is exact; reaching this branch would mean a
        // logic error in the solver rather than a recoverable condition.
        log::error!("checksum_fix solved a candidate that failed re-verification");
        restore(buf, p_a, p_b, p_c, saved);
        return Err(InfeasibleError.into());
      }
      None => {
        if mang <= 1 {
          restore(buf, p_a, p_b, p_c, saved);
          return Err(InfeasibleError.into());
        }
        mang -= 1;
      }
    }
  }
}

fn restore(buf: &mut [u8], p_a: usize, p_b: usize, p_c: usize, saved: (u32, u32, u32)) {
  write_u32(buf, p_a, saved.0);
  write_u32(buf, p_b, saved.1);
  write_u32(buf, p_c, saved.2);
}
