//! Progressive Configuration (C6, spec.md §4.6): validate and describe
//! progression modes, derive recommended packet order.

use j2k_types::error::{J2kError, J2kResult};

pub const MIN_LAYERS: u32 = 1;
pub const MAX_LAYERS: u32 = 20;
pub const MIN_LEVELS: u32 = 0;
pub const MAX_LEVELS: u32 = 10;

/// Packet progression order (spec.md §6, GLOSSARY): Layer, Resolution,
/// Component, Position, in the order each letter is prioritised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionOrder {
    Lrcp,
    Rlcp,
    Rpcl,
    Pcrl,
    Cprl,
}

/// A progression strategy (spec.md §3 `ProgressiveMode`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressiveMode {
    Snr { layers: u32 },
    Spatial { max_level: u32 },
    LayerProgressive { layers: u32, resolution_first: bool },
    Combined { layers: u32, levels: u32 },
    None,
}

fn validate_layers(layers: u32) -> J2kResult<()> {
    if layers < MIN_LAYERS || layers > MAX_LAYERS {
        return Err(J2kError::invalid_parameter(format!(
            "layers must be in [{},{}], got {}",
            MIN_LAYERS, MAX_LAYERS, layers
        )));
    }
    Ok(())
}

fn validate_levels(levels: u32) -> J2kResult<()> {
    if levels < MIN_LEVELS || levels > MAX_LEVELS {
        return Err(J2kError::invalid_parameter(format!(
            "levels must be in [{},{}], got {}",
            MIN_LEVELS, MAX_LEVELS, levels
        )));
    }
    Ok(())
}

impl ProgressiveMode {
    /// Enforces the bounds from spec.md §3: layers in `[1,20]`, levels in
    /// `[0,10]`.
    pub fn validate(&self) -> J2kResult<()> {
        match self {
            ProgressiveMode::Snr { layers } => validate_layers(*layers),
            ProgressiveMode::Spatial { max_level } => validate_levels(*max_level),
            ProgressiveMode::LayerProgressive { layers, .. } => validate_layers(*layers),
            ProgressiveMode::Combined { layers, levels } => {
                validate_layers(*layers)?;
                validate_levels(*levels)
            }
            ProgressiveMode::None => Ok(()),
        }
    }

    /// Recommended packet progression order for this mode (spec.md §4.6).
    pub fn recommended_progression_order(&self) -> ProgressionOrder {
        match self {
            ProgressiveMode::Snr { .. } => ProgressionOrder::Lrcp,
            ProgressiveMode::Spatial { .. } => ProgressionOrder::Rlcp,
            ProgressiveMode::LayerProgressive { resolution_first, .. } => {
                if *resolution_first {
                    ProgressionOrder::Rpcl
                } else {
                    ProgressionOrder::Lrcp
                }
            }
            ProgressiveMode::Combined { .. } => ProgressionOrder::Rpcl,
            ProgressiveMode::None => ProgressionOrder::Lrcp,
        }
    }

    /// The carried decomposition level count for `Spatial`/`Combined`
    /// modes, else `None` (spec.md §4.6).
    pub fn decomposition_levels(&self) -> Option<u32> {
        match self {
            ProgressiveMode::Spatial { max_level } => Some(*max_level),
            ProgressiveMode::Combined { levels, .. } => Some(*levels),
            _ => None,
        }
    }
}

/// Validates that, when `layer_bitrates` is provided, its length equals
/// `quality_layers` and its values are strictly increasing and positive
/// (spec.md §4.6).
pub fn validate_layer_bitrates(quality_layers: u32, layer_bitrates: Option<&[f64]>) -> J2kResult<()> {
    let bitrates = match layer_bitrates {
        Some(b) => b,
        None => return Ok(()),
    };

    if bitrates.len() as u32 != quality_layers {
        return Err(J2kError::invalid_parameter(format!(
            "layer_bitrates length {} does not match quality_layers {}",
            bitrates.len(),
            quality_layers
        )));
    }

    let mut previous: Option<f64> = None;
    for &rate in bitrates {
        if rate <= 0.0 {
            return Err(J2kError::invalid_parameter(format!(
                "layer bitrate {} must be positive",
                rate
            )));
        }
        if let Some(prev) = previous {
            if rate <= prev {
                return Err(J2kError::invalid_parameter(format!(
                    "layer bitrates must be strictly increasing, got {} after {}",
                    rate, prev
                )));
            }
        }
        previous = Some(rate);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_boundary_layer_counts() {
        assert!(ProgressiveMode::Snr { layers: 1 }.validate().is_ok());
        assert!(ProgressiveMode::Snr { layers: 20 }.validate().is_ok());
        assert!(ProgressiveMode::Snr { layers: 21 }.validate().is_err());
        assert!(ProgressiveMode::Snr { layers: 0 }.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_boundary_level_counts() {
        assert!(ProgressiveMode::Spatial { max_level: 0 }.validate().is_ok());
        assert!(ProgressiveMode::Spatial { max_level: 10 }.validate().is_ok());
        assert!(ProgressiveMode::Spatial { max_level: 11 }.validate().is_err());
    }

    #[test]
    fn test_recommended_progression_order_table() {
        assert_eq!(ProgressiveMode::Snr { layers: 5 }.recommended_progression_order(), ProgressionOrder::Lrcp);
        assert_eq!(ProgressiveMode::Spatial { max_level: 3 }.recommended_progression_order(), ProgressionOrder::Rlcp);
        assert_eq!(
            ProgressiveMode::LayerProgressive { layers: 5, resolution_first: true }.recommended_progression_order(),
            ProgressionOrder::Rpcl
        );
        assert_eq!(
            ProgressiveMode::LayerProgressive { layers: 5, resolution_first: false }.recommended_progression_order(),
            ProgressionOrder::Lrcp
        );
        assert_eq!(ProgressiveMode::Combined { layers: 5, levels: 3 }.recommended_progression_order(), ProgressionOrder::Rpcl);
        assert_eq!(ProgressiveMode::None.recommended_progression_order(), ProgressionOrder::Lrcp);
    }

    #[test]
    fn test_decomposition_levels_only_for_spatial_and_combined() {
        assert_eq!(ProgressiveMode::Spatial { max_level: 4 }.decomposition_levels(), Some(4));
        assert_eq!(ProgressiveMode::Combined { layers: 2, levels: 6 }.decomposition_levels(), Some(6));
        assert_eq!(ProgressiveMode::Snr { layers: 2 }.decomposition_levels(), None);
        assert_eq!(ProgressiveMode::None.decomposition_levels(), None);
    }

    #[test]
    fn test_layer_bitrates_require_strictly_increasing_positive_values() {
        assert!(validate_layer_bitrates(3, Some(&[0.1, 0.5, 1.0])).is_ok());
        assert!(validate_layer_bitrates(3, Some(&[0.1, 0.5])).is_err());
        assert!(validate_layer_bitrates(3, Some(&[0.5, 0.5, 1.0])).is_err());
        assert!(validate_layer_bitrates(3, Some(&[-0.1, 0.5, 1.0])).is_err());
        assert!(validate_layer_bitrates(3, None).is_ok());
    }
}
