//! NLT Engine (C3, spec.md §4.3): forward/inverse non-linear point
//! transforms over a component's sample buffer, dispatched through a single
//! `TransformKind` match -- following the same shape as the teacher's
//! `BoxTypes`/`ColourSpecificationMethods` enums, which dispatch
//! per-variant behaviour through `match` rather than a trait object per
//! variant.

use j2k_types::error::{J2kError, J2kResult};
use j2k_types::image::sample_range;
use j2k_types::util::{clamp, round_half_away_from_zero};

use crate::formulas;
use crate::lut;
use crate::piecewise;

/// Engine-wide upper bound on bit depth for the NLT engine (spec.md §3,
/// §9 open question 3): tighter than `j2k_types::MAX_BIT_DEPTH` (38), which
/// bounds the DC Offset engine. Preserved as an asymmetry rather than
/// unified -- see DESIGN.md.
pub const MAX_BIT_DEPTH: u8 = 32;

/// A single non-linear point transform, tagged by variant (spec.md §3
/// `NLTComponentTransform.transformType`).
#[derive(Debug, Clone, PartialEq)]
pub enum TransformKind {
    Identity,
    Gamma(f64),
    Logarithmic,
    Logarithmic10,
    Exponential,
    PerceptualQuantizer,
    HybridLogGamma,
    LookupTable {
        forward: Vec<f64>,
        inverse: Vec<f64>,
        interpolate: bool,
    },
    PiecewiseLinear {
        breakpoints: Vec<f64>,
        values: Vec<f64>,
    },
    /// Unimplemented by this core (spec.md §4.3, §9 open question 4):
    /// applying a `Custom` transform always fails with `InvalidParameter`.
    /// Callers are expected to pre-expand custom transforms into
    /// `LookupTable` or `PiecewiseLinear` form.
    Custom {
        params: Vec<f64>,
        tag: String,
    },
}

/// A transform bound to a specific component index (spec.md §3
/// `NLTComponentTransform`).
#[derive(Debug, Clone, PartialEq)]
pub struct NLTComponentTransform {
    pub component_index: usize,
    pub transform: TransformKind,
}

/// Statistics recorded alongside an NLT application (spec.md §3
/// `NLTStatistics`). Equality compares all fields exactly, per spec.md.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NLTStatistics {
    pub input_min: i32,
    pub input_max: i32,
    pub output_min: i32,
    pub output_max: i32,
    pub clipped: bool,
    pub sample_count: usize,
}

/// How far a raw pre-clamp output may deviate from its clamped counterpart
/// before `NLTStatistics.clipped` is set (spec.md §4.3).
const CLIP_EPSILON: f64 = 1e-3;

fn validate_bit_depth(bit_depth: u8) -> J2kResult<()> {
    if bit_depth == 0 || bit_depth > MAX_BIT_DEPTH {
        return Err(J2kError::invalid_parameter(format!(
            "bit depth {} out of range [1,{}]",
            bit_depth, MAX_BIT_DEPTH
        )));
    }
    Ok(())
}

fn validate_kind(kind: &TransformKind) -> J2kResult<()> {
    match kind {
        TransformKind::Gamma(gamma) if *gamma <= 0.0 => Err(J2kError::invalid_parameter(format!(
            "gamma must be > 0, got {}",
            gamma
        ))),
        TransformKind::LookupTable { forward, inverse, .. } => {
            lut::validate(forward)?;
            lut::validate(inverse)?;
            Ok(())
        }
        TransformKind::PiecewiseLinear { breakpoints, values } => {
            piecewise::validate(breakpoints, values)
        }
        TransformKind::Custom { tag, .. } => Err(J2kError::invalid_parameter(format!(
            "custom NLT transform \"{}\" is unimplemented by this engine; pre-expand to a lookup table or piecewise-linear form",
            tag
        ))),
        _ => Ok(()),
    }
}

fn apply_function(kind: &TransformKind, n: f64, forward: bool) -> f64 {
    match kind {
        TransformKind::Identity => {
            if forward {
                formulas::identity_forward(n)
            } else {
                formulas::identity_inverse(n)
            }
        }
        TransformKind::Gamma(gamma) => {
            if forward {
                formulas::gamma_forward(n, *gamma)
            } else {
                formulas::gamma_inverse(n, *gamma)
            }
        }
        TransformKind::Logarithmic => {
            if forward {
                formulas::logarithmic_forward(n)
            } else {
                formulas::logarithmic_inverse(n)
            }
        }
        TransformKind::Logarithmic10 => {
            if forward {
                formulas::logarithmic10_forward(n)
            } else {
                formulas::logarithmic10_inverse(n)
            }
        }
        TransformKind::Exponential => {
            if forward {
                formulas::exponential_forward(n)
            } else {
                formulas::exponential_inverse(n)
            }
        }
        TransformKind::PerceptualQuantizer => {
            if forward {
                formulas::pq_forward(n)
            } else {
                formulas::pq_inverse(n)
            }
        }
        TransformKind::HybridLogGamma => {
            if forward {
                formulas::hlg_forward(n)
            } else {
                formulas::hlg_inverse(n)
            }
        }
        TransformKind::LookupTable {
            forward: fwd,
            inverse: inv,
            interpolate,
        } => {
            if forward {
                lut::lookup(fwd, n, *interpolate)
            } else {
                lut::lookup(inv, n, *interpolate)
            }
        }
        TransformKind::PiecewiseLinear { breakpoints, values } => {
            if forward {
                piecewise::forward(breakpoints, values, n)
            } else {
                piecewise::inverse(breakpoints, values, n)
            }
        }
        TransformKind::Custom { .. } => unreachable!("validated against before apply_function"),
    }
}

/// Applies `kind` to `samples` (forward if `forward` is true, else inverse),
/// given the component's `bit_depth`/`signed` sample range (spec.md §4.3).
fn apply(kind: &TransformKind, samples: &[i32], bit_depth: u8, signed: bool, forward: bool) -> J2kResult<(Vec<i32>, NLTStatistics)> {
    validate_bit_depth(bit_depth)?;
    validate_kind(kind)?;
    if samples.is_empty() {
        return Err(J2kError::invalid_parameter("sample buffer must not be empty"));
    }

    let (lo, hi) = sample_range(bit_depth, signed);
    let lo = lo as f64;
    let hi = hi as f64;
    let span = hi - lo;

    let mut input_min = samples[0];
    let mut input_max = samples[0];
    let mut output_min = i32::MAX;
    let mut output_max = i32::MIN;
    let mut clipped = false;

    let output: Vec<i32> = samples
        .iter()
        .map(|&sample| {
            if sample < input_min {
                input_min = sample;
            }
            if sample > input_max {
                input_max = sample;
            }

            let normalised = (sample as f64 - lo) / span;
            let transformed = apply_function(kind, normalised, forward);
            let raw = lo + span * transformed;
            let clamped = clamp(raw, lo, hi);
            if (raw - clamped).abs() > CLIP_EPSILON {
                clipped = true;
            }

            let rounded = round_half_away_from_zero(clamped) as i32;
            if rounded < output_min {
                output_min = rounded;
            }
            if rounded > output_max {
                output_max = rounded;
            }
            rounded
        })
        .collect();

    Ok((
        output,
        NLTStatistics {
            input_min,
            input_max,
            output_min,
            output_max,
            clipped,
            sample_count: samples.len(),
        },
    ))
}

/// Forward NLT application (spec.md §4.3).
pub fn forward(kind: &TransformKind, samples: &[i32], bit_depth: u8, signed: bool) -> J2kResult<(Vec<i32>, NLTStatistics)> {
    apply(kind, samples, bit_depth, signed, true)
}

/// Inverse NLT application, undoing `forward` (spec.md §4.3).
pub fn inverse(kind: &TransformKind, samples: &[i32], bit_depth: u8, signed: bool) -> J2kResult<(Vec<i32>, NLTStatistics)> {
    apply(kind, samples, bit_depth, signed, false)
}
