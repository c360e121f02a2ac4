use crate::error::{J2kError, J2kResult};

/// Engine-wide upper bound on `Component::bit_depth` (spec.md §3). The NLT
/// engine imposes a tighter `<= 32` cap of its own (spec.md §9, open
/// question 3) -- that asymmetry is preserved rather than unified, see
/// DESIGN.md.
pub const MAX_BIT_DEPTH: u8 = 38;

/// A single image component: index, precision and its raw sample buffer.
///
/// `data` always has exactly `width * height` entries, in row-major order,
/// one i32 per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    index: usize,
    bit_depth: u8,
    signed: bool,
    width: u32,
    height: u32,
    subsampling_x: u32,
    subsampling_y: u32,
    data: Vec<i32>,
}

impl Component {
    pub fn new(
        index: usize,
        bit_depth: u8,
        signed: bool,
        width: u32,
        height: u32,
        subsampling_x: u32,
        subsampling_y: u32,
        data: Vec<i32>,
    ) -> J2kResult<Component> {
        if bit_depth == 0 || bit_depth > MAX_BIT_DEPTH {
            return Err(J2kError::invalid_parameter(format!(
                "bit depth {} out of range [1,{}]",
                bit_depth, MAX_BIT_DEPTH
            )));
        }
        if subsampling_x == 0 || subsampling_y == 0 {
            return Err(J2kError::invalid_parameter(
                "subsampling factors must be positive",
            ));
        }
        let expected_len = (width as usize) * (height as usize);
        if data.len() != expected_len {
            return Err(J2kError::invalid_parameter(format!(
                "data length {} does not match width*height {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Component {
            index,
            bit_depth,
            signed,
            width,
            height,
            subsampling_x,
            subsampling_y,
            data,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn subsampling_x(&self) -> u32 {
        self.subsampling_x
    }

    pub fn subsampling_y(&self) -> u32 {
        self.subsampling_y
    }

    pub fn data(&self) -> &[i32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<i32> {
        self.data
    }

    /// The inclusive sample range `[lo, hi]` implied by `bit_depth`/`signed`,
    /// per spec.md §3: `[-2^(b-1), 2^(b-1)-1]` when signed, else `[0, 2^b-1]`.
    pub fn sample_range(&self) -> (i64, i64) {
        sample_range(self.bit_depth, self.signed)
    }
}

/// Standalone form of `Component::sample_range`, usable before a `Component`
/// has been constructed (e.g. the NLT engine validates a caller-supplied
/// bit depth/signed pair directly).
pub fn sample_range(bit_depth: u8, signed: bool) -> (i64, i64) {
    if signed {
        let half = 1i64 << (bit_depth as i64 - 1);
        (-half, half - 1)
    } else {
        (0, (1i64 << bit_depth as i64) - 1)
    }
}

/// An ordered sequence of same-sized `Component`s (spec.md §3). Every
/// component's own `(width, height)` equals the image's after sub-sampling
/// is resolved; this core does not exercise sub-sampling, so we assert
/// equality at construction rather than carrying per-component grids.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    components: Vec<Component>,
}

impl Image {
    pub fn new(width: u32, height: u32, components: Vec<Component>) -> J2kResult<Image> {
        if width == 0 || height == 0 {
            return Err(J2kError::invalid_parameter(
                "image width and height must be positive",
            ));
        }
        for component in &components {
            if component.width() != width || component.height() != height {
                return Err(J2kError::invalid_parameter(format!(
                    "component {} has size {}x{}, expected {}x{}",
                    component.index(),
                    component.width(),
                    component.height(),
                    width,
                    height
                )));
            }
        }

        let mut seen_indices: Vec<usize> = components.iter().map(Component::index).collect();
        seen_indices.sort_unstable();
        seen_indices.dedup();
        if seen_indices.len() != components.len() {
            return Err(J2kError::invalid_parameter(
                "component indices must be unique",
            ));
        }

        Ok(Image {
            width,
            height,
            components,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

/// A rectangular sub-region of an image (spec.md §3). `x + width <=
/// image_width` and `y + height <= image_height` are enforced by
/// `Region::new`, not by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32, image_width: u32, image_height: u32) -> J2kResult<Region> {
        if width == 0 || height == 0 {
            return Err(J2kError::invalid_parameter(
                "region width and height must be positive",
            ));
        }
        if x.checked_add(width).map_or(true, |end| end > image_width)
            || y.checked_add(height).map_or(true, |end| end > image_height)
        {
            return Err(J2kError::invalid_parameter(format!(
                "region ({},{},{},{}) does not fit within image {}x{}",
                x, y, width, height, image_width, image_height
            )));
        }

        Ok(Region { x, y, width, height })
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
