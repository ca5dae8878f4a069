//! Error kinds returned by the core (§7 of the design).
//!
//! None of these are raised by panicking; every stage that can fail
//! returns one of these instead, the way the teacher's `patch/*.rs`
//! modules return a `thiserror` enum rather than unwinding.

use thiserror::Error;

/// Image failed its size/alignment bounds (§7 `InputBounds`).
///
/// Fatal unless the caller runs `analyze_in_force_mode`, in which case
/// bounds checks on individual reads remain mandatory regardless.
#[derive(Clone, Copy, Debug, Error)]
#[error("image size {size} is not a multiple of 4 in [{min}, {max}]")]
pub struct InputBoundsError {
  pub size: usize,
  pub min: usize,
  pub max: usize,
}

/// A stage could not locate its anchor (§7 `NotFound`).
///
/// Non-fatal on its own: the caller leaves the corresponding offset at
/// [`crate::Offset::UNKNOWN`] and downstream stages skip themselves.
#[derive(Clone, Copy, Debug, Error)]
pub enum NotFoundError {
  #[error("no aligned word in the image equals {0:#010x}")]
  Word(u32),
  #[error("ASCII needle not found in the image")]
  Needle,
}

/// `checksum_fix` reached a provably infeasible state (§7 `Infeasible`).
///
/// The buffer is left untouched when this is returned.
#[derive(Clone, Copy, Debug, Error)]
#[error("no correction words solve the requested checksum pair (mangler exhausted)")]
pub struct InfeasibleError;

/// Aggregate error surface for the checksum kernel (§4.2).
#[derive(Clone, Copy, Debug, Error)]
pub enum ChecksumError {
  #[error(transparent)]
  NotFound(#[from] NotFoundError),
  #[error(transparent)]
  Infeasible(#[from] InfeasibleError),
}

/// FID-CPU string didn't match any catalog entry (§7 `UnknownFidType`).
///
/// Aborts the remainder of the pipeline with a partial result.
#[derive(Clone, Debug, Error)]
#[error("no FidType entry matches CPU string {cpu:?}")]
pub struct UnknownFidTypeError {
  pub cpu: [u8; 8],
}

/// Top-level error returned by [`crate::analyze::analyze`].
///
/// Every other failure mode in the pipeline is non-fatal and is instead
/// reflected in the returned [`crate::RomFile`] as unknown offsets.
#[derive(Clone, Copy, Debug, Error)]
#[error(transparent)]
pub struct AnalyzeError(#[from] pub InputBoundsError);
