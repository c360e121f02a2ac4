use j2k_nlt::{forward, inverse, TransformKind};

fn assert_within(actual: i32, expected: i32, tolerance: i32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}

#[test]
fn test_gamma_variants_invert_within_tolerance_at_bit_depth_8() {
    let samples = vec![0, 32, 64, 96, 128, 160, 192, 224, 255];
    for &gamma in &[1.0, 2.2, 0.5] {
        let kind = TransformKind::Gamma(gamma);
        let (forward_out, _) = forward(&kind, &samples, 8, false).unwrap();
        let (inverse_out, _) = inverse(&kind, &forward_out, 8, false).unwrap();
        for (original, reconstructed) in samples.iter().zip(inverse_out.iter()) {
            assert_within(*reconstructed, *original, 1);
        }
    }
}

#[test]
fn test_logarithmic_variants_invert_within_tolerance() {
    let samples = vec![0, 32, 64, 96, 128, 160, 192, 224, 255];
    for kind in [TransformKind::Logarithmic, TransformKind::Logarithmic10, TransformKind::Exponential] {
        let (forward_out, _) = forward(&kind, &samples, 8, false).unwrap();
        let (inverse_out, _) = inverse(&kind, &forward_out, 8, false).unwrap();
        for (original, reconstructed) in samples.iter().zip(inverse_out.iter()) {
            assert_within(*reconstructed, *original, 1);
        }
    }
}

#[test]
fn test_signed_component_round_trips() {
    let samples = vec![-128, -64, 0, 64, 127];
    let kind = TransformKind::Gamma(2.2);
    let (forward_out, _) = forward(&kind, &samples, 8, true).unwrap();
    let (inverse_out, _) = inverse(&kind, &forward_out, 8, true).unwrap();
    for (original, reconstructed) in samples.iter().zip(inverse_out.iter()) {
        assert_within(*reconstructed, *original, 1);
    }
}

#[test]
fn test_clipped_flag_is_false_for_well_behaved_transforms() {
    let samples = vec![0, 64, 128, 192, 255];
    let kind = TransformKind::Identity;
    let (_, statistics) = forward(&kind, &samples, 8, false).unwrap();
    assert!(!statistics.clipped);
    assert_eq!(statistics.sample_count, 5);
}
