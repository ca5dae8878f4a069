//! The structural recovery pipeline (§4.4): a fixed-order DAG of stages,
//! each recording its own partial result into the [`RomFile`] and
//! returning a success flag. A stage whose preconditions are unmet
//! short-circuits to "unknown" rather than guessing (§4.4, §7
//! `NotFound`); only an [`UnknownFidTypeError`] aborts the remainder of
//! the pipeline (§7 `UnknownFidType`).

pub mod altcks;
pub mod ecurec;
pub mod fid;
pub mod ivt;
pub mod loader;
pub mod ramf;
pub mod rm160;
pub mod stdcks;

use crate::error::UnknownFidTypeError;
use crate::fidtype::FidType;
use crate::offset::Offset;
use crate::romfile::RomFile;

/// Runs every recovery stage in the fixed order §4.4 describes.
///
/// Stages after `find_fid` all tolerate an unset upstream offset by
/// bailing out immediately (see each stage's own `let Some(..) else`
/// guard); the only error this can return is the one fatal condition
/// in the pipeline, an unrecognized FID-CPU string.
pub fn run(rom: &mut RomFile, catalog: &[FidType]) -> Result<(), UnknownFidTypeError> {
  log::debug!("recovery: find_primary_ivt");
  ivt::find_primary_ivt(rom);

  log::debug!("recovery: find_loader");
  loader::find_loader(rom);

  log::debug!("recovery: find_fid");
  if !fid::find_fid(rom, catalog)? {
    log::debug!("recovery: no FID struct found, stopping early");
    return Ok(());
  }

  log::debug!("recovery: locate_stdcks");
  stdcks::locate_stdcks(rom);

  log::debug!("recovery: find_ramf");
  if !ramf::find_ramf(rom) {
    log::debug!("recovery: find_ecurec");
    ecurec::find_ecurec(rom);
  }

  log::debug!("recovery: validate_altcks");
  altcks::validate_altcks(rom);

  log::debug!("recovery: anchor_alt2");
  altcks::anchor_alt2(rom);

  log::debug!("recovery: detect_rm160");
  rm160::detect_rm160(rom);

  Ok(())
}

/// Shared clamp used by both `find_ramf` and `find_ecurec` (§4.4): the
/// alt-cks bounds are only accepted when both addresses lie in range
/// and are monotonically ordered; otherwise they're cleared back to
/// unknown (§7 `Malformed`).
pub(crate) fn clamp_altcks_bounds(rom: &mut RomFile, start: Option<u32>, end: Option<u32>) {
  let n = rom.image.len();
  match (start, end) {
    (Some(s), Some(e)) if (s as usize) < n && (e as usize) < n && s < e => {
      rom.p_acstart = Offset::known(s);
      rom.p_acend = Offset::known(e);
    }
    _ => {
      rom.p_acstart = Offset::UNKNOWN;
      rom.p_acend = Offset::UNKNOWN;
    }
  }
}
