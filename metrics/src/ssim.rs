//! Windowed SSIM over single- and multi-component images (spec.md §4.4).

use j2k_types::error::{J2kError, J2kResult};
use j2k_types::image::Component;

/// Fixed window geometry from spec.md §4.4: 8x8 windows, stride 4, scanning
/// every top-left `(x, y)` with `x + 8 <= width` and `y + 8 <= height`.
pub const WINDOW_SIZE: u32 = 8;
pub const WINDOW_STRIDE: u32 = 4;

struct WindowStats {
    mean_x: f64,
    mean_y: f64,
    var_x: f64,
    var_y: f64,
    covar_xy: f64,
}

fn window_stats(x: &[i32], y: &[i32]) -> WindowStats {
    let n = x.len() as f64;

    let mean_x = x.iter().map(|&v| v as f64).sum::<f64>() / n;
    let mean_y = y.iter().map(|&v| v as f64).sum::<f64>() / n;

    let mean_x2 = x.iter().map(|&v| (v as f64) * (v as f64)).sum::<f64>() / n;
    let mean_y2 = y.iter().map(|&v| (v as f64) * (v as f64)).sum::<f64>() / n;
    let mean_xy = x
        .iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a as f64) * (b as f64))
        .sum::<f64>()
        / n;

    let var_x = (mean_x2 - mean_x * mean_x).max(0.0);
    let var_y = (mean_y2 - mean_y * mean_y).max(0.0);
    let covar_xy = mean_xy - mean_x * mean_y;

    WindowStats {
        mean_x,
        mean_y,
        var_x,
        var_y,
        covar_xy,
    }
}

fn extract_window(samples: &[i32], width: u32, x: u32, y: u32) -> Vec<i32> {
    let mut window = Vec::with_capacity((WINDOW_SIZE * WINDOW_SIZE) as usize);
    for row in 0..WINDOW_SIZE {
        let start = ((y + row) * width + x) as usize;
        window.extend_from_slice(&samples[start..start + WINDOW_SIZE as usize]);
    }
    window
}

/// Per-window luminance, contrast*structure, and full SSIM for a pair of
/// same-shape sample buffers -- the shared scan used by both `ssim` and the
/// multi-scale engine (which uses the full SSIM value as both the
/// contrast-structure term and the luminance term, per spec.md §4.4's
/// MS-SSIM combination rule).
pub(crate) fn scan(reference: &[i32], distorted: &[i32], width: u32, height: u32, bit_depth: u8) -> J2kResult<(f64, f64, f64)> {
    if reference.len() != distorted.len() {
        return Err(J2kError::metric_error(format!(
            "SSIM requires equal-length buffers, got {} and {}",
            reference.len(),
            distorted.len()
        )));
    }
    let expected_len = (width as usize) * (height as usize);
    if reference.len() != expected_len {
        return Err(J2kError::metric_error(format!(
            "buffer length {} does not match width*height {}",
            reference.len(),
            expected_len
        )));
    }
    if width < WINDOW_SIZE || height < WINDOW_SIZE {
        return Err(J2kError::metric_error(format!(
            "image {}x{} is smaller than the {}x{} SSIM window",
            width, height, WINDOW_SIZE, WINDOW_SIZE
        )));
    }

    let max = ((1u64 << bit_depth as u32) - 1) as f64;
    let c1 = (0.01 * max).powi(2);
    let c2 = (0.03 * max).powi(2);

    let mut luminance_sum = 0.0f64;
    let mut cs_sum = 0.0f64;
    let mut ssim_sum = 0.0f64;
    let mut window_count = 0usize;

    let mut y = 0u32;
    while y + WINDOW_SIZE <= height {
        let mut x = 0u32;
        while x + WINDOW_SIZE <= width {
            let window_x = extract_window(reference, width, x, y);
            let window_y = extract_window(distorted, width, x, y);
            let stats = window_stats(&window_x, &window_y);

            let luminance = (2.0 * stats.mean_x * stats.mean_y + c1) / (stats.mean_x * stats.mean_x + stats.mean_y * stats.mean_y + c1);
            let contrast = (2.0 * stats.var_x.sqrt() * stats.var_y.sqrt() + c2) / (stats.var_x + stats.var_y + c2);
            let structure = (stats.covar_xy + c2 / 2.0) / ((stats.var_x * stats.var_y).sqrt() + c2 / 2.0);

            luminance_sum += luminance;
            cs_sum += contrast * structure;
            ssim_sum += luminance * contrast * structure;
            window_count += 1;

            x += WINDOW_STRIDE;
        }
        y += WINDOW_STRIDE;
    }

    if window_count == 0 {
        return Err(J2kError::metric_error("no SSIM windows fit within the given dimensions"));
    }

    let count = window_count as f64;
    Ok((luminance_sum / count, cs_sum / count, ssim_sum / count))
}

/// SSIM for a single component's sample buffer (spec.md §4.4).
pub fn ssim(reference: &[i32], distorted: &[i32], width: u32, height: u32, bit_depth: u8) -> J2kResult<f64> {
    let (_, _, mean_ssim) = scan(reference, distorted, width, height, bit_depth)?;
    Ok(mean_ssim)
}

/// SSIM between two components of matching shape.
pub fn ssim_component(reference: &Component, distorted: &Component) -> J2kResult<f64> {
    if reference.width() != distorted.width() || reference.height() != distorted.height() {
        return Err(J2kError::metric_error(format!(
            "component dimension mismatch: {}x{} vs {}x{}",
            reference.width(),
            reference.height(),
            distorted.width(),
            distorted.height()
        )));
    }
    ssim(
        reference.data(),
        distorted.data(),
        reference.width(),
        reference.height(),
        reference.bit_depth(),
    )
}

/// Image-level SSIM: the arithmetic mean over each component's SSIM
/// (spec.md §4.4).
pub fn ssim_image(reference: &[Component], distorted: &[Component]) -> J2kResult<f64> {
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
        sum += ssim_component(r, d)?;
    }
    Ok(sum / reference.len() as f64)
}
