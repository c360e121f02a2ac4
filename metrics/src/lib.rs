#![allow(dead_code)]

//! Metric Engine (C4, spec.md §4.4): windowed SSIM, multi-scale MS-SSIM and
//! PSNR over multi-component images.

pub mod msssim;
pub mod psnr;
pub mod quality;
pub mod ssim;

pub use msssim::{msssim, msssim_component, msssim_image, MAX_SCALES, MIN_SCALES};
pub use psnr::{psnr, psnr_component, psnr_image};
pub use quality::{quality_for_target, QualityTarget};
pub use ssim::{ssim, ssim_component, ssim_image};
