//! DC Offset Engine (C1, spec.md §4.1).

use j2k_types::error::{J2kError, J2kResult};
use j2k_types::image::MAX_BIT_DEPTH;
use j2k_types::stats::ComponentStatistics;
use j2k_types::util::round_half_away_from_zero;

/// How a component's DC offset value is derived from its statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DCOffsetMethod {
    Mean { optimize_for_natural_images: bool },
    Midrange,
    /// The caller supplies the offset value through a different path; this
    /// engine always derives `0.0` for `Custom` (spec.md §4.1).
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DCOffsetConfiguration {
    pub enabled: bool,
    pub method: DCOffsetMethod,
}

impl Default for DCOffsetConfiguration {
    fn default() -> DCOffsetConfiguration {
        DCOffsetConfiguration {
            enabled: true,
            method: DCOffsetMethod::Mean {
                optimize_for_natural_images: false,
            },
        }
    }
}

/// A per-component DC offset (spec.md §3). `0.0` is the unit element: both
/// `remove`/`apply` are no-ops when `value == 0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DCOffsetValue {
    pub component_index: usize,
    pub value: f64,
}

impl DCOffsetValue {
    pub fn zero(component_index: usize) -> DCOffsetValue {
        DCOffsetValue {
            component_index,
            value: 0.0,
        }
    }

    /// `round(value)` per spec.md §3, half-away-from-zero.
    pub fn integer_value(&self) -> i32 {
        round_half_away_from_zero(self.value) as i32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DCOffsetResult {
    pub adjusted_data: Vec<i32>,
    pub offset: DCOffsetValue,
    pub statistics: ComponentStatistics,
}

fn validate_bit_depth(bit_depth: u8) -> J2kResult<()> {
    if bit_depth == 0 || bit_depth > MAX_BIT_DEPTH {
        return Err(J2kError::invalid_parameter(format!(
            "bit depth {} out of range [1,{}]",
            bit_depth, MAX_BIT_DEPTH
        )));
    }
    Ok(())
}

/// Computes single-pass statistics for a sample buffer (spec.md §4.1,
/// §4.1 "added" -- exposed standalone so callers that only want statistics
/// don't have to go through `compute_and_remove`).
pub fn compute_statistics(samples: &[i32]) -> ComponentStatistics {
    ComponentStatistics::compute(samples)
}

/// Derives a `DCOffsetValue` from already-computed statistics, per the
/// method table in spec.md §4.1.
pub fn derive_offset(
    component_index: usize,
    method: DCOffsetMethod,
    statistics: &ComponentStatistics,
) -> DCOffsetValue {
    let value = match method {
        DCOffsetMethod::Mean {
            optimize_for_natural_images: false,
        } => statistics.mean,
        DCOffsetMethod::Mean {
            optimize_for_natural_images: true,
        } => round_half_away_from_zero(statistics.mean),
        DCOffsetMethod::Midrange => statistics.midrange(),
        DCOffsetMethod::Custom => 0.0,
    };

    DCOffsetValue {
        component_index,
        value,
    }
}

/// Subtracts `round(offset.value)` from every sample (spec.md §4.1).
pub fn remove(samples: &[i32], offset: &DCOffsetValue) -> Vec<i32> {
    let delta = offset.integer_value();
    samples.iter().map(|sample| sample - delta).collect()
}

/// Adds `round(offset.value)` to every sample; the inverse of `remove`.
pub fn apply(samples: &[i32], offset: &DCOffsetValue) -> Vec<i32> {
    let delta = offset.integer_value();
    samples.iter().map(|sample| sample + delta).collect()
}

/// Computes statistics, derives the offset, and removes it in one call
/// (spec.md §4.1). When `configuration.enabled` is `false` the data passes
/// through byte-identical; the offset is still reported so a caller can
/// inspect what *would* have been removed.
pub fn compute_and_remove(
    component_index: usize,
    samples: &[i32],
    bit_depth: u8,
    configuration: &DCOffsetConfiguration,
) -> J2kResult<DCOffsetResult> {
    validate_bit_depth(bit_depth)?;

    let statistics = compute_statistics(samples);
    let offset = derive_offset(component_index, configuration.method, &statistics);

    let adjusted_data = if configuration.enabled {
        remove(samples, &offset)
    } else {
        samples.to_vec()
    };

    Ok(DCOffsetResult {
        adjusted_data,
        offset,
        statistics,
    })
}

/// Multi-component entry point. Fails with `InvalidParameter` if the
/// number of components, bit depths and configurations disagree in count
/// (spec.md §4.1).
pub fn compute_and_remove_all(
    samples_per_component: &[Vec<i32>],
    bit_depths: &[u8],
    configurations: &[DCOffsetConfiguration],
) -> J2kResult<Vec<DCOffsetResult>> {
    if samples_per_component.len() != bit_depths.len()
        || samples_per_component.len() != configurations.len()
    {
        return Err(J2kError::invalid_parameter(format!(
            "mismatched component counts: {} sample buffers, {} bit depths, {} configurations",
            samples_per_component.len(),
            bit_depths.len(),
            configurations.len()
        )));
    }

    samples_per_component
        .iter()
        .zip(bit_depths.iter())
        .zip(configurations.iter())
        .enumerate()
        .map(|(index, ((samples, &bit_depth), configuration))| {
            compute_and_remove(index, samples, bit_depth, configuration)
        })
        .collect()
}
