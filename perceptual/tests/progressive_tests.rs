use j2k_perceptual::{validate_layer_bitrates, ProgressionOrder, ProgressiveMode};

#[test]
fn test_combined_mode_validates_both_bounds() {
    let mode = ProgressiveMode::Combined { layers: 20, levels: 10 };
    assert!(mode.validate().is_ok());
    assert_eq!(mode.recommended_progression_order(), ProgressionOrder::Rpcl);
    assert_eq!(mode.decomposition_levels(), Some(10));

    let invalid = ProgressiveMode::Combined { layers: 21, levels: 5 };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_none_mode_always_validates() {
    assert!(ProgressiveMode::None.validate().is_ok());
    assert_eq!(ProgressiveMode::None.decomposition_levels(), None);
}

#[test]
fn test_layer_bitrates_strategy_validation() {
    assert!(validate_layer_bitrates(4, Some(&[0.25, 0.5, 0.75, 1.0])).is_ok());
    assert!(validate_layer_bitrates(4, Some(&[0.25, 0.5, 0.75])).is_err());
    assert!(validate_layer_bitrates(2, Some(&[1.0, 1.0])).is_err());
}
