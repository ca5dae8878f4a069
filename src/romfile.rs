//! The `RomFile` analysis record (§3) and the `Image` it wraps.

use crate::fidtype::FidType;
use crate::offset::Offset;

/// Inclusive image size bounds (§3).
pub const MIN_ROMSIZE: usize = 128 * 1024;
pub const MAX_ROMSIZE: usize = 2 * 1024 * 1024;

/// An immutable-by-convention byte buffer plus a filename label (§3 `Image`).
#[derive(Clone, Debug)]
pub struct Image {
  pub bytes: Vec<u8>,
  pub filename: String,
}

impl Image {
  pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
    Self { bytes, filename: filename.into() }
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }
}

/// A slice view into the image buffer that does not outlive it (§5
/// "Resource lifetime"). Stored as an offset/length pair rather than a
/// borrowed `&[u8]` so `RomFile` itself stays free of lifetime
/// parameters; callers recover the bytes with [`RomFile::slice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SliceView {
  pub offset: usize,
  pub len: usize,
}

impl SliceView {
  pub fn new(offset: usize, len: usize) -> Self {
    Self { offset, len }
  }
}

/// Signed RAMF search drift, recorded once `find_ramf` sweeps away from
/// the naive `p_fid + sfid_size` position (§4.4).
pub type RamfDrift = i32;

/// The populated analysis record handed back to renderer collaborators
/// (§3 `RomFile`).
#[derive(Clone, Debug)]
pub struct RomFile {
  pub image: Image,

  pub p_loader: Offset,
  pub p_fid: Offset,
  pub p_ramf: Offset,
  pub p_ivt: Offset,
  pub p_ivt2: Offset,
  pub p_ecurec: Offset,

  pub p_cks: Offset,
  pub p_ckx: Offset,
  pub p_acs: Offset,
  pub p_acx: Offset,
  pub p_a2cs: Offset,
  pub p_a2cx: Offset,

  pub p_acstart: Offset,
  pub p_acend: Offset,
  pub p_ac2start: Offset,

  pub ram_jump: Offset,
  pub ram_dla_max: Offset,

  /// Set only when `find_ramf`'s catalog-driven lookup fails and
  /// `set_ivt2` falls back to brute-force scanning (§4.4): 75 if the
  /// brute-force hit also passes `check_ivt`, 50 otherwise.
  pub ivt2_confidence: Option<u8>,

  pub fid_type: Option<FidType>,
  pub loader_v: Option<u32>,

  pub loader_cpu: SliceView,
  pub fid_string: SliceView,
  pub fid_cpu: SliceView,

  pub cks_alt_good: bool,
  pub cks_alt2_good: bool,
  pub has_rm160: bool,
  pub ramf_offset: RamfDrift,
}

impl RomFile {
  /// Creates a fresh record with every offset unknown, ready for the
  /// recovery pipeline to populate.
  pub fn new(image: Image) -> Self {
    Self {
      image,
      p_loader: Offset::UNKNOWN,
      p_fid: Offset::UNKNOWN,
      p_ramf: Offset::UNKNOWN,
      p_ivt: Offset::UNKNOWN,
      p_ivt2: Offset::UNKNOWN,
      p_ecurec: Offset::UNKNOWN,
      p_cks: Offset::UNKNOWN,
      p_ckx: Offset::UNKNOWN,
      p_acs: Offset::UNKNOWN,
      p_acx: Offset::UNKNOWN,
      p_a2cs: Offset::UNKNOWN,
      p_a2cx: Offset::UNKNOWN,
      p_acstart: Offset::UNKNOWN,
      p_acend: Offset::UNKNOWN,
      p_ac2start: Offset::UNKNOWN,
      ram_jump: Offset::UNKNOWN,
      ram_dla_max: Offset::UNKNOWN,
      ivt2_confidence: None,
      fid_type: None,
      loader_v: None,
      loader_cpu: SliceView::default(),
      fid_string: SliceView::default(),
      fid_cpu: SliceView::default(),
      cks_alt_good: false,
      cks_alt2_good: false,
      has_rm160: false,
      ramf_offset: 0,
    }
  }

  pub fn len(&self) -> usize {
    self.image.len()
  }

  /// Recovers the bytes a [`SliceView`] points at. Returns an empty
  /// slice for a default/unset view.
  pub fn slice(&self, view: SliceView) -> &[u8] {
    let end = (view.offset + view.len).min(self.image.bytes.len());
    let start = view.offset.min(end);
    &self.image.bytes[start..end]
  }
}
