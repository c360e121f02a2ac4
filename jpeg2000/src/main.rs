#![allow(dead_code)]

use std::error::Error;

use clap::{Parser, Subcommand};

use j2k_dco::{
    apply as dco_apply, compute_and_remove, decode_marker, encode_marker, DCOMarkerSegment, DCOffsetConfiguration,
    DCOffsetMethod, DCOffsetType, DCOffsetValue,
};
use j2k_metrics::{msssim, psnr, ssim};
use j2k_nlt::{forward as nlt_forward, inverse as nlt_inverse, TransformKind};
use j2k_perceptual::{estimate_base_quantization, ProgressiveMode};

#[derive(Parser)]
#[clap(name = "jpeg2000", about = "JPEG 2000 Part 2 sample-domain transform pipeline")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute and remove a per-component DC offset (C1).
    DcOffset {
        /// Comma-separated i32 samples.
        samples: String,
        #[clap(long, default_value_t = 8)]
        bit_depth: u8,
        #[clap(long)]
        midrange: bool,
    },
    /// Encode a DCO marker segment from comma-separated offsets (C2).
    DcoMarkerEncode {
        /// Comma-separated f64 offsets, one per component in order.
        offsets: String,
        #[clap(long)]
        floating_point: bool,
    },
    /// Decode a DCO marker segment from a hex byte string (C2).
    DcoMarkerDecode {
        /// Hex-encoded bytes, e.g. "FF5C000F...".
        hex: String,
    },
    /// Apply a forward or inverse non-linear point transform (C3).
    Nlt {
        /// Comma-separated i32 samples.
        samples: String,
        #[clap(long, default_value_t = 8)]
        bit_depth: u8,
        #[clap(long)]
        signed: bool,
        #[clap(long, default_value = "identity")]
        kind: String,
        #[clap(long, default_value_t = 2.2)]
        gamma: f64,
        #[clap(long)]
        inverse: bool,
    },
    /// Compute PSNR/SSIM/MS-SSIM between two equal-length sample buffers (C4).
    Metrics {
        /// Comma-separated i32 reference samples.
        reference: String,
        /// Comma-separated i32 distorted samples.
        distorted: String,
        #[clap(long, default_value_t = 8)]
        bit_depth: u8,
        #[clap(long)]
        width: u32,
        #[clap(long)]
        height: u32,
        #[clap(long, default_value_t = 3)]
        scales: u32,
    },
    /// Print the recommended progression order and initial base
    /// quantisation for a target bitrate (C5/C6).
    Progressive {
        #[clap(long, default_value_t = 4)]
        layers: u32,
        #[clap(long)]
        resolution_first: bool,
        #[clap(long, default_value_t = 1.0)]
        bitrate_bpp: f64,
    },
}

fn parse_i32_list(text: &str) -> Result<Vec<i32>, Box<dyn Error>> {
    text.split(',')
        .map(|s| s.trim().parse::<i32>().map_err(|e| e.into()))
        .collect()
}

fn parse_f64_list(text: &str) -> Result<Vec<f64>, Box<dyn Error>> {
    text.split(',')
        .map(|s| s.trim().parse::<f64>().map_err(|e| e.into()))
        .collect()
}

fn parse_hex(text: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    if text.len() % 2 != 0 {
        return Err("hex string must have an even number of digits".into());
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).map_err(|e| e.into()))
        .collect()
}

fn parse_transform_kind(kind: &str, gamma: f64) -> Result<TransformKind, Box<dyn Error>> {
    match kind {
        "identity" => Ok(TransformKind::Identity),
        "gamma" => Ok(TransformKind::Gamma(gamma)),
        "logarithmic" => Ok(TransformKind::Logarithmic),
        "logarithmic10" => Ok(TransformKind::Logarithmic10),
        "exponential" => Ok(TransformKind::Exponential),
        "pq" => Ok(TransformKind::PerceptualQuantizer),
        "hlg" => Ok(TransformKind::HybridLogGamma),
        other => Err(format!("unknown transform kind \"{}\"", other).into()),
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let opts = Opts::parse();

    match opts.command {
        Command::DcOffset { samples, bit_depth, midrange } => {
            let samples = parse_i32_list(&samples)?;
            let configuration = DCOffsetConfiguration {
                enabled: true,
                method: if midrange {
                    DCOffsetMethod::Midrange
                } else {
                    DCOffsetMethod::Mean {
                        optimize_for_natural_images: false,
                    }
                },
            };
            let result = compute_and_remove(0, &samples, bit_depth, &configuration)?;
            println!("offset: {}", result.offset.value);
            println!("adjusted: {:?}", result.adjusted_data);
            println!("restored: {:?}", dco_apply(&result.adjusted_data, &result.offset));
        }
        Command::DcoMarkerEncode { offsets, floating_point } => {
            let offsets = parse_f64_list(&offsets)?
                .into_iter()
                .enumerate()
                .map(|(component_index, value)| DCOffsetValue { component_index, value })
                .collect();
            let segment = DCOMarkerSegment {
                offset_type: if floating_point {
                    DCOffsetType::FloatingPoint
                } else {
                    DCOffsetType::Integer
                },
                offsets,
            };
            let bytes = encode_marker(&segment);
            println!("{}", bytes.iter().map(|b| format!("{:02X}", b)).collect::<String>());
        }
        Command::DcoMarkerDecode { hex } => {
            let bytes = parse_hex(&hex)?;
            let segment = decode_marker(&bytes, true)?;
            println!("{:?}", segment);
        }
        Command::Nlt {
            samples,
            bit_depth,
            signed,
            kind,
            gamma,
            inverse,
        } => {
            let samples = parse_i32_list(&samples)?;
            let kind = parse_transform_kind(&kind, gamma)?;
            let (output, statistics) = if inverse {
                nlt_inverse(&kind, &samples, bit_depth, signed)?
            } else {
                nlt_forward(&kind, &samples, bit_depth, signed)?
            };
            println!("output: {:?}", output);
            println!("statistics: {:?}", statistics);
        }
        Command::Metrics {
            reference,
            distorted,
            bit_depth,
            width,
            height,
            scales,
        } => {
            let reference = parse_i32_list(&reference)?;
            let distorted = parse_i32_list(&distorted)?;

            println!("psnr: {}", psnr(&reference, &distorted, bit_depth)?);
            println!("ssim: {}", ssim(&reference, &distorted, width, height, bit_depth)?);
            println!("msssim: {}", msssim(&reference, &distorted, width, height, bit_depth, scales)?);
        }
        Command::Progressive {
            layers,
            resolution_first,
            bitrate_bpp,
        } => {
            let mode = ProgressiveMode::LayerProgressive { layers, resolution_first };
            mode.validate()?;
            println!("progression order: {:?}", mode.recommended_progression_order());
            println!("initial base quantization: {}", estimate_base_quantization(bitrate_bpp));
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    match run() {
        Err(e) => Err(e.to_string().into()),
        Ok(_) => Ok(()),
    }
}
