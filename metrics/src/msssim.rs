//! Multi-scale SSIM (spec.md §4.4): 1-5 scales, Wang 2003 weights, 2x2
//! non-overlapping downsampling with integer-floor dimensions.

use j2k_types::error::{J2kError, J2kResult};
use j2k_types::image::Component;

use crate::ssim;

/// Wang 2003 per-scale weights, truncated to the requested scale count
/// (spec.md §4.4).
pub const WEIGHTS: [f64; 5] = [0.0448, 0.2856, 0.3001, 0.2363, 0.1333];

pub const MIN_SCALES: u32 = 1;
pub const MAX_SCALES: u32 = 5;

/// Non-overlapping 2x2 average downsample with integer-floor dimensions
/// (spec.md §4.4).
fn downsample(samples: &[i32], width: u32, height: u32) -> J2kResult<(Vec<i32>, u32, u32)> {
    let new_width = width / 2;
    let new_height = height / 2;
    if new_width == 0 || new_height == 0 {
        return Err(J2kError::metric_error(format!(
            "downsampling {}x{} would produce a non-positive dimension",
            width, height
        )));
    }

    let mut out = Vec::with_capacity((new_width * new_height) as usize);
    for y in 0..new_height {
        for x in 0..new_width {
            let x0 = x * 2;
            let y0 = y * 2;
            let i00 = (y0 * width + x0) as usize;
            let i01 = i00 + 1;
            let i10 = ((y0 + 1) * width + x0) as usize;
            let i11 = i10 + 1;
            let sum = samples[i00] as i64 + samples[i01] as i64 + samples[i10] as i64 + samples[i11] as i64;
            out.push((sum / 4) as i32);
        }
    }

    Ok((out, new_width, new_height))
}

/// Multi-scale SSIM for a single component's sample buffer (spec.md §4.4):
/// at each intermediate scale the contrast-structure term is recorded, at
/// the final scale the full SSIM value is used as the luminance term,
/// combined as `MSSSIM = L^w[last] * prod(CS_i^w[i])` for `i < last`.
pub fn msssim(reference: &[i32], distorted: &[i32], width: u32, height: u32, bit_depth: u8, scales: u32) -> J2kResult<f64> {
    if scales < MIN_SCALES || scales > MAX_SCALES {
        return Err(J2kError::invalid_parameter(format!(
            "scales must be in [{},{}], got {}",
            MIN_SCALES, MAX_SCALES, scales
        )));
    }

    let mut current_reference = reference.to_vec();
    let mut current_distorted = distorted.to_vec();
    let mut current_width = width;
    let mut current_height = height;

    let weights = &WEIGHTS[0..scales as usize];
    let last = (scales - 1) as usize;

    let mut product = 1.0f64;
    let mut final_luminance = 0.0f64;

    for (scale_index, &weight) in weights.iter().enumerate() {
        let (_, _, full_ssim) = ssim::scan(
            &current_reference,
            &current_distorted,
            current_width,
            current_height,
            bit_depth,
        )?;

        if scale_index == last {
            final_luminance = full_ssim;
        } else {
            product *= full_ssim.max(0.0).powf(weight);

            let (down_reference, new_width, new_height) = downsample(&current_reference, current_width, current_height)?;
            let (down_distorted, _, _) = downsample(&current_distorted, current_width, current_height)?;
            current_reference = down_reference;
            current_distorted = down_distorted;
            current_width = new_width;
            current_height = new_height;
        }
    }

    Ok(product * final_luminance.max(0.0).powf(weights[last]))
}

/// MS-SSIM between two components of matching shape.
pub fn msssim_component(reference: &Component, distorted: &Component, scales: u32) -> J2kResult<f64> {
    if reference.width() != distorted.width() || reference.height() != distorted.height() {
        return Err(J2kError::metric_error(format!(
            "component dimension mismatch: {}x{} vs {}x{}",
            reference.width(),
            reference.height(),
            distorted.width(),
            distorted.height()
        )));
    }
    msssim(
        reference.data(),
        distorted.data(),
        reference.width(),
        reference.height(),
        reference.bit_depth(),
        scales,
    )
}

/// Image-level MS-SSIM: the arithmetic mean over each component's MS-SSIM.
pub fn msssim_image(reference: &[Component], distorted: &[Component], scales: u32) -> J2kResult<f64> {
    if reference.len() != distorted.len() {
        return Err(J2kError::metric_error(format!(
            "component count mismatch: {} vs {}",
            reference.len(),
            distorted.len()
        )));
    }
    if reference.is_empty() {
        return Err(J2kError::metric_error("image must have at least one component"));
    }

    let mut sum = 0.0f64;
    for (r, d) in reference.iter().zip(distorted.iter()) {
        sum += msssim_component(r, d, scales)?;
    }
    Ok(sum / reference.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> Vec<i32> {
        (0..(width * height) as i32).map(|v| v % 256).collect()
    }

    #[test]
    fn test_reflexive_msssim_is_one() {
        let samples = ramp(32, 32);
        let result = msssim(&samples, &samples, 32, 32, 8, 3).unwrap();
        assert!((result - 1.0).abs() < 1e-9, "got {}", result);
    }

    #[test]
    fn test_rejects_out_of_range_scale_count() {
        let samples = ramp(32, 32);
        assert!(msssim(&samples, &samples, 32, 32, 8, 0).is_err());
        assert!(msssim(&samples, &samples, 32, 32, 8, 6).is_err());
    }

    #[test]
    fn test_downsample_rejects_degenerate_result() {
        let samples = vec![0; 2];
        let result = downsample(&samples, 1, 2);
        assert!(result.is_err());
    }

    #[test]
    fn test_downsample_floors_odd_dimensions() {
        let samples: Vec<i32> = (0..15).collect();
        let (down, width, height) = downsample(&samples, 5, 3).unwrap();
        assert_eq!((width, height), (2, 1));
        assert_eq!(down.len(), 2);
    }

    #[test]
    fn test_weak_monotonicity_with_noise_magnitude() {
        let reference = ramp(32, 32);
        let small_noise: Vec<i32> = reference.iter().map(|v| (v + 1).min(255)).collect();
        let large_noise: Vec<i32> = reference.iter().map(|v| (v + 20).min(255)).collect();

        let msssim_small = msssim(&reference, &small_noise, 32, 32, 8, 3).unwrap();
        let msssim_large = msssim(&reference, &large_noise, 32, 32, 8, 3).unwrap();
        assert!(msssim_small > msssim_large);
    }
}
