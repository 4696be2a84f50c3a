//! The three-stage relative quantification core: replicate averaging,
//! internal-control normalization (delta-Cq) and calibrator normalization
//! (delta-delta-Cq with fold change).

mod aggregate;
mod delta;
mod delta_delta;

pub use aggregate::{aggregate, aggregate_with};
pub use delta::{compute_delta_cq, compute_delta_cq_with, normalize_to_controls};
pub use delta_delta::{
    calibrator_baseline, compute_delta_delta_cq, compute_delta_delta_cq_with,
    normalize_to_calibrator,
};

use crate::math::stats::NanPolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantConfig {
    pub nan_policy: NanPolicy,
    /// Worker threads for group reduction (0 = rayon default, 1 = inline).
    pub threads: usize,
}
