#![allow(dead_code)]

//! Perceptual Controller (C5) and Progressive Configuration (C6), spec.md
//! §4.5-4.6: per-subband/per-codeblock quantisation, closed-loop quality
//! targeting, and progression-mode validation/recommendation.

pub mod collaborators;
pub mod controller;
pub mod progressive;

pub use collaborators::{Decoder, Encoder, Motion, Subband, VisualMasking, VisualWeighting};
pub use controller::{
    estimate_base_quantization, run_quality_targeting, spatially_varying_quantization, subband_quantization_map,
    subbands_at_level, LevelQuantizationMap, MaskingConfiguration, PerceptualConfig, QualityTargetingOutcome,
    WeightingConfiguration, PLACEHOLDER_LUMINANCE, PLACEHOLDER_VARIANCE,
};
pub use j2k_metrics::QualityTarget;
pub use progressive::{validate_layer_bitrates, ProgressionOrder, ProgressiveMode, MAX_LAYERS, MAX_LEVELS, MIN_LAYERS, MIN_LEVELS};
