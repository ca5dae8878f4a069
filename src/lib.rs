//! Offline structural and checksum analyzer for big-endian ECU ROM
//! images: locates the loader/FID/RAMF/ECUREC/IVT structures a given
//! `FidType` catalog describes, validates or relocates their embedded
//! checksums, and reports everything it finds (or fails to find) in a
//! single [`RomFile`] record.
//!
//! [`analyze::analyze`] is the single entry point; everything else is
//! exposed so a caller can drive individual stages directly (e.g. to
//! run [`checksum::checksum_fix`] after hand-editing an image already
//! analyzed once).

pub mod analyze;
pub mod checksum;
pub mod diag;
pub mod error;
pub mod fidtable;
pub mod fidtype;
pub mod ivt;
pub mod offset;
pub mod primitives;
pub mod recovery;
pub mod romfile;

pub use analyze::analyze;
pub use error::AnalyzeError;
pub use fidtype::{Feature, FidType};
pub use offset::Offset;
pub use romfile::{Image, RomFile};
