//! Pure normalised-domain forward/inverse functions for each NLT variant
//! (spec.md §4.3). Every function here operates on `n` already normalised
//! to the component's sample range; `crate::engine` does the
//! normalise/denormalise/clamp/round dance around these.

use std::f64::consts::E;

/// SMPTE ST 2084 constants.
pub const PQ_M1: f64 = 0.1593017578125;
pub const PQ_M2: f64 = 78.84375;
pub const PQ_C1: f64 = 0.8359375;
pub const PQ_C2: f64 = 18.8515625;
pub const PQ_C3: f64 = 18.6875;

/// BT.2100 HLG constants.
pub const HLG_A: f64 = 0.17883277;
pub const HLG_B: f64 = 0.28466892;
pub const HLG_C: f64 = 0.55991073;

pub fn identity_forward(n: f64) -> f64 {
    n
}

pub fn identity_inverse(n: f64) -> f64 {
    n
}

pub fn gamma_forward(n: f64, gamma: f64) -> f64 {
    n.powf(gamma)
}

pub fn gamma_inverse(n: f64, gamma: f64) -> f64 {
    n.powf(1.0 / gamma)
}

/// `log(n+1)/log 2`. Preserved verbatim despite the name "logarithmic" --
/// this is not a pure natural log, it is log base 2 of `n+1` (spec.md §9,
/// open question 2). Any logarithm base works for the ratio as long as the
/// same base is used for numerator and denominator, so `ln` is used here.
pub fn logarithmic_forward(n: f64) -> f64 {
    (n + 1.0).ln() / 2.0_f64.ln()
}

pub fn logarithmic_inverse(n: f64) -> f64 {
    (n * 2.0_f64.ln()).exp() - 1.0
}

pub fn logarithmic10_forward(n: f64) -> f64 {
    (n + 1.0).log10() / 2.0_f64.log10()
}

pub fn logarithmic10_inverse(n: f64) -> f64 {
    10.0_f64.powf(n * 2.0_f64.log10()) - 1.0
}

pub fn exponential_forward(n: f64) -> f64 {
    (n.exp() - 1.0) / (E - 1.0)
}

pub fn exponential_inverse(n: f64) -> f64 {
    (n * (E - 1.0) + 1.0).ln()
}

/// PQ-EOTF: encoded `n` -> linear light `L`.
pub fn pq_forward(n: f64) -> f64 {
    let np = n.powf(1.0 / PQ_M2);
    let numerator = (np - PQ_C1).max(0.0);
    let denominator = PQ_C2 - PQ_C3 * np;
    (numerator / denominator).powf(1.0 / PQ_M1)
}

/// PQ-OETF: linear light `L` -> encoded `n`.
pub fn pq_inverse(l: f64) -> f64 {
    let lm1 = l.powf(PQ_M1);
    let numerator = PQ_C1 + PQ_C2 * lm1;
    let denominator = 1.0 + PQ_C3 * lm1;
    (numerator / denominator).powf(PQ_M2)
}

/// HLG-EOTF^-1 (linearise): encoded `n` -> linear light `L`.
pub fn hlg_forward(n: f64) -> f64 {
    if n <= 0.5 {
        n * n / 3.0
    } else {
        (((n - HLG_C) / HLG_A).exp() + HLG_B) / 12.0
    }
}

/// HLG-OETF: linear light `L` -> encoded `n`.
pub fn hlg_inverse(l: f64) -> f64 {
    if l <= 1.0 / 12.0 {
        (3.0 * l).sqrt()
    } else {
        HLG_A * (12.0 * l - HLG_B).ln() + HLG_C
    }
}
