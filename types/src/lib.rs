#![allow(dead_code)]

//! Shared types and errors for the JPEG 2000 Part 2 sample-domain pipeline
//! (C7). Every other crate in this workspace depends on this one for its
//! `Image`/`Component` model and its `J2kError` taxonomy.

pub mod error;
pub mod exchange;
pub mod image;
pub mod stats;
pub mod telemetry;
pub mod util;

pub use error::{J2kError, J2kResult};
pub use image::{Component, Image, Region, MAX_BIT_DEPTH};
pub use stats::ComponentStatistics;
