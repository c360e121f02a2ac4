use std::collections::HashMap;

use j2k_perceptual::{
    run_quality_targeting, subband_quantization_map, Decoder, Encoder, Motion, PerceptualConfig, QualityTarget, Subband,
    VisualMasking, VisualWeighting,
};
use j2k_types::error::J2kResult;
use j2k_types::image::{Component, Image};

struct NoopWeighting;
impl VisualWeighting for NoopWeighting {
    fn weight(&self, _subband: Subband, _level: u32, _total_levels: u32, _image_width: u32, _image_height: u32) -> f64 {
        1.0
    }
}

struct NoopMasking;
impl VisualMasking for NoopMasking {
    fn calculate_masking_factor(&self, _luminance: f64, _local_variance: f64, _motion: Option<Motion>) -> f64 {
        1.0
    }
    fn calculate_region_masking_factors(
        &self,
        _samples: &[i32],
        width: u32,
        height: u32,
        _bit_depth: u8,
        _motion_field: Option<&[Motion]>,
    ) -> Vec<f64> {
        vec![1.0; (width * height) as usize]
    }
}

#[test]
fn test_subband_quantization_map_has_one_entry_per_level() {
    let config = PerceptualConfig {
        target_quality: QualityTarget::Psnr(40.0),
        enable_visual_masking: false,
        enable_frequency_weighting: false,
        masking_configuration: Default::default(),
        weighting_configuration: Default::default(),
        max_iterations: 1,
        quality_tolerance: 0.0,
    };

    let levels = subband_quantization_map(&config, 0.1, 4, 256, 256, &NoopWeighting, &NoopMasking);
    assert_eq!(levels.len(), 4);
    assert_eq!(levels[0].len(), 3);
    assert_eq!(levels[3].len(), 4);
    assert!(levels[3].contains_key(&Subband::Ll));
}

struct NoisyEncoder {
    noise: i32,
}
impl Encoder for NoisyEncoder {
    fn encode(&self, image: &Image, _base_quantization: f64) -> J2kResult<Vec<u8>> {
        let mut bytes = Vec::new();
        for component in image.components() {
            for &sample in component.data() {
                bytes.extend_from_slice(&(sample + self.noise).to_be_bytes());
            }
        }
        Ok(bytes)
    }
}

struct PassthroughDecoder {
    width: u32,
    height: u32,
    bit_depth: u8,
}
impl Decoder for PassthroughDecoder {
    fn decode(&self, bytes: &[u8]) -> J2kResult<Image> {
        let samples: Vec<i32> = bytes.chunks_exact(4).map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]])).collect();
        let component = Component::new(0, self.bit_depth, false, self.width, self.height, 1, 1, samples)?;
        Image::new(self.width, self.height, vec![component])
    }
}

#[test]
fn test_quality_targeting_runs_up_to_max_iterations_when_unreachable() {
    let config = PerceptualConfig {
        target_quality: QualityTarget::Psnr(1000.0),
        enable_visual_masking: false,
        enable_frequency_weighting: false,
        masking_configuration: Default::default(),
        weighting_configuration: Default::default(),
        max_iterations: 3,
        quality_tolerance: 0.0,
    };

    let data: Vec<i32> = (0..64).map(|v| v % 256).collect();
    let component = Component::new(0, 8, false, 8, 8, 1, 1, data).unwrap();
    let image = Image::new(8, 8, vec![component]).unwrap();

    let encoder = NoisyEncoder { noise: 3 };
    let decoder = PassthroughDecoder { width: 8, height: 8, bit_depth: 8 };

    let outcome = run_quality_targeting(&config, &image, 0.2, &encoder, &decoder, None).unwrap();
    assert_eq!(outcome.iterations_run, 3);
    assert!(!outcome.met_target);
}

#[test]
fn test_quality_targeting_honours_metadata_map_defaults() {
    let mut masking_params = HashMap::new();
    masking_params.insert("strength".to_owned(), 0.5);
    let config = PerceptualConfig {
        target_quality: QualityTarget::Bitrate(0.5),
        enable_visual_masking: false,
        enable_frequency_weighting: false,
        masking_configuration: j2k_perceptual::MaskingConfiguration(masking_params),
        weighting_configuration: Default::default(),
        max_iterations: 1,
        quality_tolerance: 0.0,
    };
    assert_eq!(config.masking_configuration.0.get("strength"), Some(&0.5));
}
