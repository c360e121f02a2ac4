//! DCO Marker Segment Codec (C2, spec.md §4.2, ISO/IEC 15444-2 Annex A.3).
//!
//! Wire format (big-endian):
//!
//! ```text
//! FF 5C                   -- marker code (optional on decode, always on encode)
//! Ldco  (u16)              -- segment length = 3 + N*4
//! Sdco  (u8)                -- 0 = integer (i32), 1 = floating-point (f32)
//! SPdco_0 .. SPdco_{N-1}   -- N four-byte offsets, one per component
//! ```

use j2k_types::error::{J2kError, J2kResult};

use crate::offset::DCOffsetValue;

/// The two-byte DCO marker code, `0xFF 0x5C`.
pub const MARKER_CODE: [u8; 2] = [0xFF, 0x5C];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DCOffsetType {
    Integer,
    FloatingPoint,
}

impl DCOffsetType {
    fn to_sdco(self) -> u8 {
        match self {
            DCOffsetType::Integer => 0,
            DCOffsetType::FloatingPoint => 1,
        }
    }

    fn from_sdco(value: u8) -> J2kResult<DCOffsetType> {
        match value {
            0 => Ok(DCOffsetType::Integer),
            1 => Ok(DCOffsetType::FloatingPoint),
            _ => Err(J2kError::decoding_error(format!(
                "unknown Sdco value {}, expected 0 (integer) or 1 (floating-point)",
                value
            ))),
        }
    }
}

/// The Part 2 DCO marker segment: an offset type and one offset per
/// component, in ascending component-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct DCOMarkerSegment {
    pub offset_type: DCOffsetType,
    pub offsets: Vec<DCOffsetValue>,
}

/// Serialises `segment` to bytes, always including the `FF 5C` marker
/// code prefix (spec.md §4.2: "the emitted marker includes the 0xFF5C
/// prefix").
pub fn encode(segment: &DCOMarkerSegment) -> Vec<u8> {
    let n = segment.offsets.len();
    let ldco = (3 + n * 4) as u16;

    let mut bytes = Vec::with_capacity(2 + 2 + 1 + n * 4);
    bytes.extend_from_slice(&MARKER_CODE);
    bytes.extend_from_slice(&ldco.to_be_bytes());
    bytes.push(segment.offset_type.to_sdco());

    for offset in &segment.offsets {
        match segment.offset_type {
            DCOffsetType::Integer => {
                bytes.extend_from_slice(&offset.integer_value().to_be_bytes());
            }
            DCOffsetType::FloatingPoint => {
                let value = offset.value as f32;
                bytes.extend_from_slice(&value.to_be_bytes());
            }
        }
    }

    bytes
}

/// Decodes a DCO marker segment. `with_marker_code` selects whether `bytes`
/// starts with the two-byte `FF 5C` marker code (as a raw codestream slice
/// would) or starts directly at `Ldco` (as a caller that already consumed
/// the marker code while scanning would pass), mirroring how the teacher's
/// `ContiguousCodestream` decoder separates "marker code already read" from
/// "read it here".
pub fn decode(bytes: &[u8], with_marker_code: bool) -> J2kResult<DCOMarkerSegment> {
    let mut offset = 0usize;

    if with_marker_code {
        if bytes.len() < 2 {
            return Err(J2kError::decoding_error("buffer too short for marker code"));
        }
        if bytes[0..2] != MARKER_CODE {
            return Err(J2kError::decoding_error(format!(
                "expected marker code {:02X?}, found {:02X?}",
                MARKER_CODE,
                &bytes[0..2]
            )));
        }
        offset += 2;
    }

    if bytes.len() < offset + 2 {
        return Err(J2kError::decoding_error("buffer too short for Ldco"));
    }
    let ldco = u16::from_be_bytes([bytes[offset], bytes[offset + 1]]);
    offset += 2;

    if bytes.len() < offset + (ldco as usize).saturating_sub(2) {
        return Err(J2kError::decoding_error(format!(
            "buffer shorter than Ldco={} declares",
            ldco
        )));
    }

    if bytes.len() < offset + 1 {
        return Err(J2kError::decoding_error("buffer too short for Sdco"));
    }
    let sdco = bytes[offset];
    offset += 1;
    let offset_type = DCOffsetType::from_sdco(sdco)?;

    if ldco < 3 {
        return Err(J2kError::decoding_error(format!(
            "Ldco={} is smaller than the minimum 3",
            ldco
        )));
    }
    let payload_bytes = ldco as usize - 3;
    if payload_bytes % 4 != 0 {
        return Err(J2kError::decoding_error(format!(
            "Ldco={} leaves a non-multiple-of-4 payload of {} bytes",
            ldco, payload_bytes
        )));
    }
    let n = payload_bytes / 4;

    if bytes.len() < offset + payload_bytes {
        return Err(J2kError::decoding_error(
            "buffer shorter than the declared number of offsets",
        ));
    }

    let mut offsets = Vec::with_capacity(n);
    for component_index in 0..n {
        let start = offset + component_index * 4;
        let word = [
            bytes[start],
            bytes[start + 1],
            bytes[start + 2],
            bytes[start + 3],
        ];

        let value = match offset_type {
            DCOffsetType::Integer => i32::from_be_bytes(word) as f64,
            DCOffsetType::FloatingPoint => f32::from_be_bytes(word) as f64,
        };

        offsets.push(DCOffsetValue {
            component_index,
            value,
        });
    }

    Ok(DCOMarkerSegment {
        offset_type,
        offsets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s2_dco_encode_scenario() {
        let segment = DCOMarkerSegment {
            offset_type: DCOffsetType::Integer,
            offsets: vec![
                DCOffsetValue {
                    component_index: 0,
                    value: 10.0,
                },
                DCOffsetValue {
                    component_index: 1,
                    value: -20.0,
                },
                DCOffsetValue {
                    component_index: 2,
                    value: 300.0,
                },
            ],
        };

        let bytes = encode(&segment);
        let expected: Vec<u8> = vec![
            0xFF, 0x5C, 0x00, 0x0F, 0x00, 0x00, 0x00, 0x00, 0x0A, 0xFF, 0xFF, 0xFF, 0xEC, 0x00,
            0x00, 0x01, 0x2C,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_round_trip_integer() {
        let segment = DCOMarkerSegment {
            offset_type: DCOffsetType::Integer,
            offsets: vec![
                DCOffsetValue {
                    component_index: 0,
                    value: 42.0,
                },
                DCOffsetValue {
                    component_index: 1,
                    value: -7.0,
                },
            ],
        };

        let bytes = encode(&segment);
        let decoded = decode(&bytes, true).unwrap();
        assert_eq!(decoded, segment);
    }

    #[test]
    fn test_round_trip_floating_point() {
        let segment = DCOMarkerSegment {
            offset_type: DCOffsetType::FloatingPoint,
            offsets: vec![DCOffsetValue {
                component_index: 0,
                value: 12.5,
            }],
        };

        let bytes = encode(&segment);
        let decoded = decode(&bytes, true).unwrap();
        assert_eq!(decoded.offset_type, DCOffsetType::FloatingPoint);
        assert_eq!(decoded.offsets[0].value as f32, 12.5f32);
    }

    #[test]
    fn test_decode_without_marker_code_prefix() {
        let segment = DCOMarkerSegment {
            offset_type: DCOffsetType::Integer,
            offsets: vec![DCOffsetValue {
                component_index: 0,
                value: 1.0,
            }],
        };
        let bytes = encode(&segment);
        let decoded = decode(&bytes[2..], false).unwrap();
        assert_eq!(decoded, segment);
    }

    #[test]
    fn test_rejects_unknown_sdco() {
        let bytes: Vec<u8> = vec![0xFF, 0x5C, 0x00, 0x07, 0x02, 0x00, 0x00, 0x00, 0x00];
        let result = decode(&bytes, true);
        assert!(matches!(result, Err(J2kError::DecodingError { .. })));
    }

    #[test]
    fn test_rejects_misaligned_length() {
        let bytes: Vec<u8> = vec![0xFF, 0x5C, 0x00, 0x06, 0x00, 0x00, 0x00, 0x00];
        let result = decode(&bytes, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_short_buffer() {
        let bytes: Vec<u8> = vec![0xFF, 0x5C, 0x00, 0x0F, 0x00];
        let result = decode(&bytes, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_component_index_equals_wire_order() {
        let segment = DCOMarkerSegment {
            offset_type: DCOffsetType::Integer,
            offsets: vec![
                DCOffsetValue {
                    component_index: 0,
                    value: 1.0,
                },
                DCOffsetValue {
                    component_index: 1,
                    value: 2.0,
                },
                DCOffsetValue {
                    component_index: 2,
                    value: 3.0,
                },
            ],
        };
        let bytes = encode(&segment);
        let decoded = decode(&bytes, true).unwrap();
        for (i, offset) in decoded.offsets.iter().enumerate() {
            assert_eq!(offset.component_index, i);
        }
    }
}
