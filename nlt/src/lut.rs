//! Lookup-table NLT variant (spec.md §4.3).

use j2k_types::error::{J2kError, J2kResult};
use j2k_types::util::{clamp, round_half_away_from_zero};

pub fn validate(table: &[f64]) -> J2kResult<()> {
    if table.is_empty() {
        return Err(J2kError::invalid_parameter("lookup table must not be empty"));
    }
    Ok(())
}

/// Looks `n` (normalised to `[0,1]`) up in `table`, which is treated as
/// `L` evenly spaced samples over `[0,1]`. Without interpolation, the
/// nearest index is used; with interpolation, the two neighbouring
/// entries are linearly blended (spec.md §4.3 "LUT rule").
pub fn lookup(table: &[f64], n: f64, interpolate: bool) -> f64 {
    let last_index = (table.len() - 1) as f64;
    let position = clamp(n, 0.0, 1.0) * last_index;

    if !interpolate {
        let index = clamp(round_half_away_from_zero(position) as i64, 0, last_index as i64) as usize;
        return table[index];
    }

    let lower = clamp(position.floor() as i64, 0, last_index as i64) as usize;
    let upper = clamp(lower as i64 + 1, 0, last_index as i64) as usize;
    let fraction = position - lower as f64;

    table[lower] + (table[upper] - table[lower]) * fraction
}
