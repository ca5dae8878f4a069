//! The analyzer facade (§4.5): validates an image's size against the
//! accepted bounds, then runs the recovery pipeline over it.

use crate::error::{AnalyzeError, InputBoundsError};
use crate::fidtype::FidType;
use crate::recovery;
use crate::romfile::{Image, RomFile, MAX_ROMSIZE, MIN_ROMSIZE};

/// Validates `image`'s size, then runs every recovery stage over it
/// (§4.5). Returns the partially- or fully-populated [`RomFile`]; a
/// stage that can't find its anchor just leaves the corresponding field
/// unknown rather than failing the whole analysis (§7 `NotFound`).
///
/// The only way this itself fails is a size outside `[MIN_ROMSIZE,
/// MAX_ROMSIZE]` or not a multiple of 4 (§7 `InputBounds`); an
/// unrecognized FID-CPU string still returns `Ok` with a partial
/// `RomFile`, since `UnknownFidType` is fatal only to the remainder of
/// the pipeline, not to the analysis as a whole.
pub fn analyze(image: Image, catalog: &[FidType]) -> Result<RomFile, AnalyzeError> {
  check_bounds(&image)?;

  let mut rom = RomFile::new(image);
  if let Err(err) = recovery::run(&mut rom, catalog) {
    log::warn!("analyze: {err}");
  }
  Ok(rom)
}

fn check_bounds(image: &Image) -> Result<(), InputBoundsError> {
  let size = image.len();
  if size % 4 != 0 || size < MIN_ROMSIZE || size > MAX_ROMSIZE {
    return Err(InputBoundsError { size, min: MIN_ROMSIZE, max: MAX_ROMSIZE });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_undersized_image() {
    let image = Image::new(vec![0u8; 1024], "tiny.bin");
    assert!(analyze(image, &[]).is_err());
  }

  #[test]
  fn rejects_misaligned_size() {
    let image = Image::new(vec![0u8; MIN_ROMSIZE + 1], "odd.bin");
    assert!(analyze(image, &[]).is_err());
  }

  #[test]
  fn accepts_in_bounds_image_with_empty_catalog() {
    let image = Image::new(vec![0u8; MIN_ROMSIZE], "blank.bin");
    let rom = analyze(image, &[]).unwrap();
    assert!(rom.fid_type.is_none());
  }
}
