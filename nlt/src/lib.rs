#![allow(dead_code)]

//! NLT Engine (C3, spec.md §4.3): forward and inverse non-linear point
//! transforms, including the PQ (ST 2084) and HLG (BT.2100) HDR transfer
//! functions.

pub mod engine;
pub mod formulas;
pub mod lut;
pub mod piecewise;

pub use engine::{forward, inverse, NLTComponentTransform, NLTStatistics, TransformKind, MAX_BIT_DEPTH};
pub use formulas::{HLG_A, HLG_B, HLG_C, PQ_C1, PQ_C2, PQ_C3, PQ_M1, PQ_M2};
