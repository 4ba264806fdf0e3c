//! Error taxonomy for the VOXL container format.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a region.
#[derive(Debug, Error)]
pub enum RegionError {
    /// The data does not start with the `VOXL` magic bytes.
    #[error("invalid magic bytes")]
    InvalidMagic,
    /// The format version is not supported by this build.
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u8),
    /// The data is shorter than a field requires.
    #[error("data truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum expected byte count.
        expected: usize,
        /// Actual byte count available.
        actual: usize,
    },
    /// The file's chunk edge length does not match this build's.
    #[error("chunk edge mismatch: file has {actual}, expected {expected}")]
    EdgeMismatch {
        /// Edge length this build works with.
        expected: usize,
        /// Edge length recorded in the file.
        actual: usize,
    },
    /// The file's slot count does not match a region's.
    #[error("slot count mismatch: file has {actual}, expected {expected}")]
    SlotCountMismatch {
        /// Slots per region in this build.
        expected: usize,
        /// Slot count recorded in the file.
        actual: usize,
    },
    /// A value does not fit its fixed-width wire field.
    #[error("{field} {value} exceeds wire field maximum {max}")]
    FieldOverflow {
        /// Which field overflowed.
        field: &'static str,
        /// The value that did not fit.
        value: u64,
        /// Largest representable value.
        max: u64,
    },
    /// A slot index is outside the region.
    #[error("slot {0} out of range")]
    SlotOutOfRange(usize),
    /// A chunk payload header is malformed.
    #[error("bad chunk header: {0}")]
    BadChunkHeader(&'static str),
}
