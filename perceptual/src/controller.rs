//! Perceptual Controller (C5, spec.md §4.5): per-subband and per-codeblock
//! quantisation steps, and the closed-loop quality/bitrate targeting
//! iteration.

use std::collections::HashMap;

use j2k_types::error::{J2kError, J2kResult};
use j2k_types::image::Image;
use j2k_metrics::QualityTarget;

use crate::collaborators::{Decoder, Encoder, Motion, Subband, VisualMasking, VisualWeighting};

/// Placeholder luminance/variance used by the per-subband quantisation
/// path until per-codeblock statistics are wired in (spec.md §9): "subject
/// to replacement". Kept as named constants, not inlined literals, so a
/// caller mocking `VisualMasking` can see exactly what arguments it will be
/// invoked with.
pub const PLACEHOLDER_LUMINANCE: f64 = 128.0;
pub const PLACEHOLDER_VARIANCE: f64 = 100.0;

/// Masking/weighting configuration is opaque to the controller -- it is
/// handed to the collaborator implementations, which interpret it however
/// they see fit (spec.md §4.5 names `maskingConfiguration`/
/// `weightingConfiguration` but leaves their shape to the collaborator).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskingConfiguration(pub HashMap<String, f64>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightingConfiguration(pub HashMap<String, f64>);

#[derive(Debug, Clone, PartialEq)]
pub struct PerceptualConfig {
    pub target_quality: QualityTarget,
    pub enable_visual_masking: bool,
    pub enable_frequency_weighting: bool,
    pub masking_configuration: MaskingConfiguration,
    pub weighting_configuration: WeightingConfiguration,
    pub max_iterations: u32,
    pub quality_tolerance: f64,
}

impl PerceptualConfig {
    fn validate(&self) -> J2kResult<()> {
        if self.max_iterations < 1 {
            return Err(J2kError::invalid_parameter(format!(
                "max_iterations must be >= 1, got {}",
                self.max_iterations
            )));
        }
        if self.quality_tolerance < 0.0 {
            return Err(J2kError::invalid_parameter(format!(
                "quality_tolerance must be >= 0, got {}",
                self.quality_tolerance
            )));
        }
        Ok(())
    }
}

/// The subbands present at decomposition level `level` out of `total_levels`
/// (spec.md §4.5): `{LH, HL, HH}` except at the coarsest level
/// `total_levels - 1`, which also carries `LL`.
pub fn subbands_at_level(level: u32, total_levels: u32) -> Vec<Subband> {
    if level == total_levels.saturating_sub(1) {
        vec![Subband::Ll, Subband::Lh, Subband::Hl, Subband::Hh]
    } else {
        vec![Subband::Lh, Subband::Hl, Subband::Hh]
    }
}

/// Per-subband quantisation steps for one decomposition level.
pub type LevelQuantizationMap = HashMap<Subband, f64>;

/// Builds the per-subband quantisation map across every decomposition
/// level (spec.md §4.5 "Per-subband quantisation map").
pub fn subband_quantization_map(
    config: &PerceptualConfig,
    base_quantization: f64,
    total_levels: u32,
    image_width: u32,
    image_height: u32,
    weighting: &dyn VisualWeighting,
    masking: &dyn VisualMasking,
) -> Vec<LevelQuantizationMap> {
    let mut levels = Vec::with_capacity(total_levels as usize);

    for level in 0..total_levels {
        let mut map = HashMap::new();
        for subband in subbands_at_level(level, total_levels) {
            let mut step = base_quantization;
            if config.enable_frequency_weighting {
                step *= weighting.weight(subband, level, total_levels, image_width, image_height);
            }
            if config.enable_visual_masking {
                step *= masking.calculate_masking_factor(PLACEHOLDER_LUMINANCE, PLACEHOLDER_VARIANCE, None);
            }
            map.insert(subband, step);
        }
        levels.push(map);
    }

    levels
}

/// Builds a `width * height` grid of per-pixel quantisation steps for one
/// codeblock region (spec.md §4.5 "Spatially-varying quantisation"):
/// starts from `base_quantization`, applies the frequency weight
/// uniformly, then multiplies pointwise by the region's masking factors.
pub fn spatially_varying_quantization(
    config: &PerceptualConfig,
    base_quantization: f64,
    subband: Subband,
    level: u32,
    total_levels: u32,
    region_samples: &[i32],
    region_width: u32,
    region_height: u32,
    bit_depth: u8,
    image_width: u32,
    image_height: u32,
    weighting: &dyn VisualWeighting,
    masking: &dyn VisualMasking,
) -> J2kResult<Vec<f64>> {
    let expected_len = (region_width as usize) * (region_height as usize);
    if region_samples.len() != expected_len {
        return Err(J2kError::invalid_parameter(format!(
            "region sample count {} does not match {}x{}",
            region_samples.len(),
            region_width,
            region_height
        )));
    }

    let mut uniform_step = base_quantization;
    if config.enable_frequency_weighting {
        uniform_step *= weighting.weight(subband, level, total_levels, image_width, image_height);
    }

    if !config.enable_visual_masking {
        return Ok(vec![uniform_step; expected_len]);
    }

    let masking_factors = masking.calculate_region_masking_factors(region_samples, region_width, region_height, bit_depth, None);
    if masking_factors.len() != expected_len {
        return Err(J2kError::invalid_parameter(format!(
            "VisualMasking returned {} factors, expected {}",
            masking_factors.len(),
            expected_len
        )));
    }

    Ok(masking_factors.iter().map(|&factor| uniform_step * factor).collect())
}

/// Stepwise initial base-quantisation estimate from a target bitrate
/// (spec.md §4.5).
pub fn estimate_base_quantization(bitrate_bpp: f64) -> f64 {
    if bitrate_bpp >= 4.0 {
        0.01
    } else if bitrate_bpp >= 2.0 {
        0.05
    } else if bitrate_bpp >= 1.0 {
        0.1
    } else if bitrate_bpp >= 0.5 {
        0.2
    } else {
        0.5
    }
}

/// Result of the quality-targeting loop (spec.md §4.5).
#[derive(Debug, Clone, PartialEq)]
pub struct QualityTargetingOutcome {
    pub base_quantization: f64,
    pub achieved_quality: f64,
    pub iterations_run: u32,
    pub met_target: bool,
}

fn meets_quality_target(target: QualityTarget, achieved: f64, tolerance: f64) -> bool {
    match target {
        QualityTarget::Bitrate(_) => true,
        QualityTarget::Psnr(goal) | QualityTarget::Ssim(goal) | QualityTarget::MsSsim(goal) => achieved >= goal - tolerance,
    }
}

/// Closed-loop quality/bitrate targeting (spec.md §4.5 "Quality-targeting
/// loop"). Polls `should_cancel` before each iteration and again between
/// the encode and evaluate steps (spec.md §5 "added"); on cancellation,
/// returns the best-so-far outcome rather than the first failure.
pub fn run_quality_targeting(
    config: &PerceptualConfig,
    original: &Image,
    initial_base_quantization: f64,
    encoder: &dyn Encoder,
    decoder: &dyn Decoder,
    should_cancel: Option<&dyn Fn() -> bool>,
) -> J2kResult<QualityTargetingOutcome> {
    config.validate()?;

    let no_cancel = || false;
    let check = should_cancel.unwrap_or(&no_cancel);

    let mut base_quantization = initial_base_quantization;
    let mut best = QualityTargetingOutcome {
        base_quantization,
        achieved_quality: f64::NEG_INFINITY,
        iterations_run: 0,
        met_target: false,
    };

    for iteration in 1..=config.max_iterations {
        if check() {
            return Ok(best);
        }

        let encoded = encoder.encode(original, base_quantization)?;

        if check() {
            return Ok(best);
        }

        let decoded = decoder.decode(&encoded)?;
        let achieved = j2k_metrics::quality_for_target(config.target_quality, original.components(), decoded.components())?;

        let met = meets_quality_target(config.target_quality, achieved, config.quality_tolerance);
        if achieved > best.achieved_quality || best.iterations_run == 0 {
            best = QualityTargetingOutcome {
                base_quantization,
                achieved_quality: achieved,
                iterations_run: iteration,
                met_target: met,
            };
        }

        if met {
            return Ok(best);
        }

        let target_value = config.target_quality.value();
        let adjustment = 1.0 - 0.3 * (target_value - achieved);
        base_quantization = (base_quantization * adjustment).max(0.001).min(1.0);
    }

    Ok(best)
}
