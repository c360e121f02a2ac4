//! PSNR over single- and multi-component images (spec.md §4.4).

use j2k_types::error::{J2kError, J2kResult};
use j2k_types::image::Component;

fn mse(reference: &[i32], distorted: &[i32]) -> J2kResult<f64> {
    if reference.len() != distorted.len() {
        return Err(J2kError::metric_error(format!(
            "PSNR requires equal-length buffers, got {} and {}",
            reference.len(),
            distorted.len()
        )));
    }
    if reference.is_empty() {
        return Err(J2kError::metric_error("PSNR requires non-empty buffers"));
    }

    let mut accumulator = 0.0f64;
    for (&r, &d) in reference.iter().zip(distorted.iter()) {
        let diff = (r - d) as f64;
        accumulator += diff * diff;
    }
    Ok(accumulator / reference.len() as f64)
}

/// PSNR (dB) between two equal-length sample buffers at `bit_depth`. Returns
/// `+inf` when MSE is exactly zero, per spec.md §4.4.
pub fn psnr(reference: &[i32], distorted: &[i32], bit_depth: u8) -> J2kResult<f64> {
    let error = mse(reference, distorted)?;
    let max = ((1u64 << bit_depth as u32) - 1) as f64;

    if error == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * ((max * max) / error).log10())
}

/// PSNR between two components of matching shape.
pub fn psnr_component(reference: &Component, distorted: &Component) -> J2kResult<f64> {
    if reference.width() != distorted.width() || reference.height() != distorted.height() {
        return Err(J2kError::metric_error(format!(
            "component dimension mismatch: {}x{} vs {}x{}",
            reference.width(),
            reference.height(),
            distorted.width(),
            distorted.height()
        )));
    }
    psnr(reference.data(), distorted.data(), reference.bit_depth())
}

/// Overall PSNR across all components of two images, computed from the mean
/// of per-component MSE using the *first* component's bit depth (spec.md
/// §4.4, §9 open question 1 -- inconsistent when component bit depths
/// differ, preserved as-is rather than silently "fixed").
pub fn psnr_image(reference: &[Component], distorted: &[Component]) -> J2kResult<f64> {
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

    let mut total_mse = 0.0f64;
    for (r, d) in reference.iter().zip(distorted.iter()) {
        if r.width() != d.width() || r.height() != d.height() {
            return Err(J2kError::metric_error(format!(
                "component {} dimension mismatch: {}x{} vs {}x{}",
                r.index(),
                r.width(),
                r.height(),
                d.width(),
                d.height()
            )));
        }
        total_mse += mse(r.data(), d.data())?;
    }

    let mean_mse = total_mse / reference.len() as f64;
    let max = ((1u64 << reference[0].bit_depth() as u32) - 1) as f64;

    if mean_mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * ((max * max) / mean_mse).log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive_psnr_is_infinite() {
        let samples = vec![10, 20, 30, 40];
        let result = psnr(&samples, &samples, 8).unwrap();
        assert!(result.is_infinite());
    }

    #[test]
    fn test_s6_psnr_ordering_scenario() {
        let reference: Vec<i32> = (0..64).collect();
        let distorted: Vec<i32> = reference.iter().map(|v| v + 1).collect();
        let result = psnr(&reference, &distorted, 8).unwrap();
        assert!((result - 48.13).abs() < 0.01, "got {}", result);
    }

    #[test]
    fn test_weak_monotonicity_with_noise_magnitude() {
        let reference: Vec<i32> = (0..64).collect();
        let small_noise: Vec<i32> = reference.iter().map(|v| v + 1).collect();
        let large_noise: Vec<i32> = reference.iter().map(|v| v + 5).collect();

        let psnr_small = psnr(&reference, &small_noise, 8).unwrap();
        let psnr_large = psnr(&reference, &large_noise, 8).unwrap();
        assert!(psnr_small > psnr_large);
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let result = psnr(&[1, 2, 3], &[1, 2], 8);
        assert!(result.is_err());
    }
}
