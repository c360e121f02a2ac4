use j2k_metrics::{msssim_image, psnr_image, ssim_image};
use j2k_types::image::Component;

fn ramp_component(index: usize, width: u32, height: u32) -> Component {
    let data: Vec<i32> = (0..(width * height) as i32).map(|v| v % 256).collect();
    Component::new(index, 8, false, width, height, 1, 1, data).unwrap()
}

#[test]
fn test_multi_component_psnr_reflexivity() {
    let image = vec![ramp_component(0, 16, 16), ramp_component(1, 16, 16)];
    let result = psnr_image(&image, &image).unwrap();
    assert!(result.is_infinite());
}

#[test]
fn test_multi_component_ssim_reflexivity() {
    let image = vec![ramp_component(0, 16, 16), ramp_component(1, 16, 16)];
    let result = ssim_image(&image, &image).unwrap();
    assert_eq!(result, 1.0);
}

#[test]
fn test_multi_component_msssim_reflexivity() {
    let image = vec![ramp_component(0, 32, 32), ramp_component(1, 32, 32)];
    let result = msssim_image(&image, &image, 3).unwrap();
    assert!((result - 1.0).abs() < 1e-9);
}

#[test]
fn test_rejects_component_count_mismatch() {
    let reference = vec![ramp_component(0, 16, 16), ramp_component(1, 16, 16)];
    let distorted = vec![ramp_component(0, 16, 16)];
    assert!(psnr_image(&reference, &distorted).is_err());
    assert!(ssim_image(&reference, &distorted).is_err());
    assert!(msssim_image(&reference, &distorted, 3).is_err());
}

#[test]
fn test_rejects_per_component_dimension_mismatch() {
    let reference = vec![ramp_component(0, 16, 16)];
    let distorted = vec![ramp_component(0, 32, 32)];
    assert!(psnr_image(&reference, &distorted).is_err());
    assert!(ssim_image(&reference, &distorted).is_err());
}
