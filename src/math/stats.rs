//! Replicate statistics.
//!
//! Empty input yields NaN rather than 0.0: an absent measurement must stay
//! distinguishable from a measured value downstream.

use serde::{Deserialize, Serialize};

/// How NaN Cq values (failed reactions) enter a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NanPolicy {
    /// A single NaN poisons the whole reduction.
    #[default]
    Propagate,
    /// NaN values are dropped before reducing.
    Skip,
}

pub fn mean(values: &[f64], policy: NanPolicy) -> f64 {
    match policy {
        NanPolicy::Propagate => raw_mean(values),
        NanPolicy::Skip => {
            let kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
            raw_mean(&kept)
        }
    }
}

/// Sample standard deviation (n - 1 denominator). NaN below two values.
pub fn sample_std(values: &[f64], policy: NanPolicy) -> f64 {
    match policy {
        NanPolicy::Propagate => raw_sample_std(values),
        NanPolicy::Skip => {
            let kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
            raw_sample_std(&kept)
        }
    }
}

fn raw_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn raw_sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = raw_mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// 2^(-dd_cq). NaN in, NaN out.
pub fn fold_change(dd_cq: f64) -> f64 {
    2f64.powf(-dd_cq)
}
