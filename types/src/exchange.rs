//! The boundary image-exchange shape from spec.md §6: components carry a
//! contiguous host-order byte buffer of `width * height` i32 values rather
//! than a typed `Vec<i32>`. Kept separate from `image::Image` -- which
//! callers within this workspace should prefer -- because spec.md §9 flags
//! the byte-reinterpretation boundary as a known wart, not a design to
//! emulate internally.

use crate::error::{J2kError, J2kResult};
use crate::image::Component;

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDescriptor {
    pub index: usize,
    pub bit_depth: u8,
    pub signed: bool,
    pub width: u32,
    pub height: u32,
    pub subsampling_x: u32,
    pub subsampling_y: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub components: Vec<ComponentDescriptor>,
}

impl ComponentDescriptor {
    /// Reinterprets `data` as a host-order sequence of i32 samples and
    /// builds a `Component` from it.
    pub fn to_component(&self) -> J2kResult<Component> {
        let expected_bytes = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected_bytes {
            return Err(J2kError::invalid_parameter(format!(
                "component {} byte buffer length {} does not match width*height*4 {}",
                self.index,
                self.data.len(),
                expected_bytes
            )));
        }

        let samples: Vec<i32> = self
            .data
            .chunks_exact(4)
            .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Component::new(
            self.index,
            self.bit_depth,
            self.signed,
            self.width,
            self.height,
            self.subsampling_x,
            self.subsampling_y,
            samples,
        )
    }

    /// Inverse of `to_component`: serialises a `Component`'s samples back
    /// into a host-order byte buffer.
    pub fn from_component(component: &Component) -> ComponentDescriptor {
        let mut data = Vec::with_capacity(component.data().len() * 4);
        for sample in component.data() {
            data.extend_from_slice(&sample.to_ne_bytes());
        }

        ComponentDescriptor {
            index: component.index(),
            bit_depth: component.bit_depth(),
            signed: component.signed(),
            width: component.width(),
            height: component.height(),
            subsampling_x: component.subsampling_x(),
            subsampling_y: component.subsampling_y(),
            data,
        }
    }
}
