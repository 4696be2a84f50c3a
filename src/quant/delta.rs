use std::collections::HashMap;

use tracing::debug;

use crate::error::QpcrResult;
use crate::math::stats::{self, NanPolicy};
use crate::quant::{QuantConfig, aggregate_with};
use crate::table::{AggregatedRecord, ControlSet, DeltaRecord, RawReading};

/// Aggregates replicates and normalizes every non-control target against
/// the per-sample mean of the internal-control means.
pub fn compute_delta_cq<S: AsRef<str>>(
    readings: &[RawReading],
    internal_controls: &[S],
) -> QpcrResult<Vec<DeltaRecord>> {
    compute_delta_cq_with(readings, internal_controls, &QuantConfig::default())
}

pub fn compute_delta_cq_with<S: AsRef<str>>(
    readings: &[RawReading],
    internal_controls: &[S],
    config: &QuantConfig,
) -> QpcrResult<Vec<DeltaRecord>> {
    let controls = ControlSet::new(internal_controls)?;
    let aggregated = aggregate_with(readings, config)?;
    Ok(normalize_to_controls(&aggregated, &controls, config.nan_policy))
}

/// Delta-Cq over an already aggregated table.
///
/// `mean_ic` is a mean of per-target means: every control target weighs the
/// same regardless of its replicate count. Samples without any control row
/// get `mean_ic = NaN`, and so do all their `d_cq` values.
pub fn normalize_to_controls(
    aggregated: &[AggregatedRecord],
    controls: &ControlSet,
    policy: NanPolicy,
) -> Vec<DeltaRecord> {
    let mut control_means: HashMap<&str, Vec<f64>> = HashMap::new();
    for rec in aggregated.iter().filter(|r| controls.contains(&r.target)) {
        control_means
            .entry(rec.sample.as_str())
            .or_default()
            .push(rec.mean);
    }
    let mean_ic: HashMap<&str, f64> = control_means
        .into_iter()
        .map(|(sample, means)| (sample, stats::mean(&means, policy)))
        .collect();

    debug!(
        pairs = aggregated.len(),
        samples_with_controls = mean_ic.len(),
        "control means computed"
    );

    aggregated
        .iter()
        .map(|rec| {
            let mean_ic = mean_ic
                .get(rec.sample.as_str())
                .copied()
                .unwrap_or(f64::NAN);
            let d_cq = if controls.contains(&rec.target) {
                f64::NAN
            } else {
                rec.mean - mean_ic
            };
            DeltaRecord {
                sample: rec.sample.clone(),
                target: rec.target.clone(),
                mean: rec.mean,
                std: rec.std,
                mean_ic,
                d_cq,
            }
        })
        .collect()
}
