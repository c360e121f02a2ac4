//! Piecewise-linear NLT variant (spec.md §4.3, "Piecewise-linear rule").

use j2k_types::error::{J2kError, J2kResult};

/// Validates that `breakpoints` is non-empty, strictly increasing, and that
/// `values` has the same length.
pub fn validate(breakpoints: &[f64], values: &[f64]) -> J2kResult<()> {
    if breakpoints.is_empty() {
        return Err(J2kError::invalid_parameter(
            "piecewise-linear breakpoints must not be empty",
        ));
    }
    if breakpoints.len() != values.len() {
        return Err(J2kError::invalid_parameter(format!(
            "piecewise-linear breakpoints length {} does not match values length {}",
            breakpoints.len(),
            values.len()
        )));
    }
    for window in breakpoints.windows(2) {
        if window[1] <= window[0] {
            return Err(J2kError::invalid_parameter(
                "piecewise-linear breakpoints must be strictly increasing",
            ));
        }
    }
    Ok(())
}

/// Evaluates the piecewise-linear function through `(xs[i], ys[i])` at `n`.
/// Below `xs[0]` returns `ys[0]`; above `xs[last]` returns `ys[last]`;
/// otherwise linearly interpolates within the bracketing segment.
pub fn evaluate(xs: &[f64], ys: &[f64], n: f64) -> f64 {
    if n <= xs[0] {
        return ys[0];
    }
    let last = xs.len() - 1;
    if n > xs[last] {
        return ys[last];
    }

    for i in 0..last {
        if xs[i] < n && n <= xs[i + 1] {
            let span = xs[i + 1] - xs[i];
            let fraction = (n - xs[i]) / span;
            return ys[i] + (ys[i + 1] - ys[i]) * fraction;
        }
    }

    ys[last]
}

/// Forward evaluation through `(breakpoints, values)`.
pub fn forward(breakpoints: &[f64], values: &[f64], n: f64) -> f64 {
    evaluate(breakpoints, values, n)
}

/// Inverse evaluation through `(values, breakpoints)` (spec.md §4.3: the
/// inverse of a piecewise-linear forward transform is the same table with
/// its axes swapped). Requires `values` to be monotone for the swapped
/// table's own "strictly increasing x" precondition to hold -- this is the
/// caller's responsibility per spec.md §8 property 3, which only tests
/// invertibility "with monotone data".
pub fn inverse(breakpoints: &[f64], values: &[f64], n: f64) -> f64 {
    evaluate(values, breakpoints, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_non_increasing_breakpoints() {
        assert!(validate(&[0.0, 0.5, 0.5], &[0.0, 0.5, 1.0]).is_err());
    }

    #[test]
    fn test_validate_rejects_mismatched_lengths() {
        assert!(validate(&[0.0, 1.0], &[0.0]).is_err());
    }

    #[test]
    fn test_evaluate_clamps_outside_range() {
        let xs = vec![0.2, 0.5, 0.8];
        let ys = vec![0.1, 0.4, 0.9];
        assert_eq!(evaluate(&xs, &ys, 0.0), 0.1);
        assert_eq!(evaluate(&xs, &ys, 1.0), 0.9);
    }

    #[test]
    fn test_evaluate_interpolates_midsegment() {
        let xs = vec![0.0, 1.0];
        let ys = vec![0.0, 10.0];
        assert_eq!(evaluate(&xs, &ys, 0.5), 5.0);
    }

    #[test]
    fn test_forward_inverse_round_trip_monotone() {
        let breakpoints = vec![0.0, 0.5, 1.0];
        let values = vec![0.0, 0.3, 1.0];
        for &n in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            let out = forward(&breakpoints, &values, n);
            let back = inverse(&breakpoints, &values, out);
            assert!((back - n).abs() < 1e-9, "n={} back={}", n, back);
        }
    }
}
