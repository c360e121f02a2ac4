#![allow(dead_code)]

//! DC Offset Engine and DCO marker segment codec (C1 + C2, spec.md §4.1-4.2).

pub mod marker;
pub mod offset;

pub use marker::{decode as decode_marker, encode as encode_marker, DCOMarkerSegment, DCOffsetType};
pub use offset::{
    apply, compute_and_remove, compute_and_remove_all, compute_statistics, derive_offset, remove,
    DCOffsetConfiguration, DCOffsetMethod, DCOffsetResult, DCOffsetValue,
};
