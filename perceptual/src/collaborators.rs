//! Collaborator interfaces the perceptual controller depends on but does
//! not implement (spec.md §6): visual masking, frequency weighting, and
//! the external encode/decode round trip used by the quality-targeting
//! loop.

use j2k_types::error::J2kResult;
use j2k_types::image::Image;

/// A wavelet subband (GLOSSARY). `LL` only appears at the coarsest
/// decomposition level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subband {
    Ll,
    Lh,
    Hl,
    Hh,
}

/// A motion vector, carried optionally alongside masking inputs for
/// inter-frame (video) use; this core never produces one itself (spec.md
/// §1 excludes motion estimation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub dx: f64,
    pub dy: f64,
}

/// Visual masking collaborator (spec.md §6). The perceptual controller's
/// own implementation of this is out of scope (spec.md §1); this trait is
/// the seam a caller plugs a real implementation -- or a test double --
/// into.
pub trait VisualMasking {
    fn calculate_masking_factor(&self, luminance: f64, local_variance: f64, motion: Option<Motion>) -> f64;

    /// Per-pixel masking factors for a `w x h` region, one value per pixel
    /// in row-major order.
    fn calculate_region_masking_factors(
        &self,
        samples: &[i32],
        width: u32,
        height: u32,
        bit_depth: u8,
        motion_field: Option<&[Motion]>,
    ) -> Vec<f64>;
}

/// Frequency weighting collaborator (spec.md §6).
pub trait VisualWeighting {
    fn weight(&self, subband: Subband, level: u32, total_levels: u32, image_width: u32, image_height: u32) -> f64;
}

/// External encoder used by the quality-targeting loop (spec.md §4.5,
/// §6). Out of scope for this core (spec.md §1): the actual wavelet/
/// EBCOT/packetisation pipeline lives elsewhere, so this is a trait a
/// caller (or test) implements.
pub trait Encoder {
    fn encode(&self, image: &Image, base_quantization: f64) -> J2kResult<Vec<u8>>;
}

/// External decoder, the inverse of `Encoder` (spec.md §4.5, §6).
pub trait Decoder {
    fn decode(&self, bytes: &[u8]) -> J2kResult<Image>;
}
