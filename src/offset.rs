//! The `0xFFFF_FFFF`-sentinel "unknown offset" scheme used throughout the
//! original tool, wrapped in a small newtype (design note §9) so the rest
//! of the crate can write `if let Some(p) = offset.get()` instead of
//! comparing against a magic constant by hand. The wire-level
//! representation a renderer would print is unchanged: `Offset::raw`
//! always returns the same `u32` the distilled spec describes.

use std::fmt;

/// Sentinel meaning "unknown/absent" per §3.
pub const UNKNOWN_OFFSET: u32 = 0xFFFF_FFFF;

/// A 32-bit image offset, or the absence of one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset(u32);

impl Offset {
  pub const UNKNOWN: Offset = Offset(UNKNOWN_OFFSET);

  /// Wraps a concrete offset. Panics in debug builds if `value` happens
  /// to collide with the sentinel; callers dealing with addresses that
  /// could legitimately be `0xFFFF_FFFF` should route through
  /// [`Offset::from_raw`] instead.
  pub fn known(value: u32) -> Self {
    debug_assert_ne!(value, UNKNOWN_OFFSET, "offset collides with the unknown sentinel");
    Offset(value)
  }

  /// Wraps a raw sentineled value exactly as a renderer would have
  /// received it from the original tool.
  pub fn from_raw(value: u32) -> Self {
    Offset(value)
  }

  pub fn is_known(self) -> bool {
    self.0 != UNKNOWN_OFFSET
  }

  pub fn get(self) -> Option<u32> {
    self.is_known().then_some(self.0)
  }

  /// Returns the offset as a `usize`, for indexing into a buffer.
  pub fn index(self) -> Option<usize> {
    self.get().map(|v| v as usize)
  }

  /// The raw sentineled representation, for renderer collaborators that
  /// expect the original `0xFFFF_FFFF` scheme verbatim.
  pub fn raw(self) -> u32 {
    self.0
  }
}

impl From<Option<u32>> for Offset {
  fn from(value: Option<u32>) -> Self {
    match value {
      Some(v) => Offset::known(v),
      None => Offset::UNKNOWN,
    }
  }
}

impl From<u32> for Offset {
  fn from(value: u32) -> Self {
    Offset::from_raw(value)
  }
}

impl fmt::Debug for Offset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.get() {
      Some(v) => write!(f, "Offset({v:#010x})"),
      None => write!(f, "Offset(unknown)"),
    }
  }
}
