use std::collections::HashMap;

use tracing::debug;

use crate::error::QpcrResult;
use crate::math::stats::fold_change;
use crate::quant::{QuantConfig, aggregate_with, normalize_to_controls};
use crate::table::{ControlSet, DeltaDeltaRecord, DeltaRecord, RawReading, validate_calibrator};

pub fn compute_delta_delta_cq<S: AsRef<str>>(
    readings: &[RawReading],
    internal_controls: &[S],
    calibrator: &str,
) -> QpcrResult<Vec<DeltaDeltaRecord>> {
    compute_delta_delta_cq_with(
        readings,
        internal_controls,
        calibrator,
        &QuantConfig::default(),
    )
}

pub fn compute_delta_delta_cq_with<S: AsRef<str>>(
    readings: &[RawReading],
    internal_controls: &[S],
    calibrator: &str,
    config: &QuantConfig,
) -> QpcrResult<Vec<DeltaDeltaRecord>> {
    validate_calibrator(calibrator)?;
    let controls = ControlSet::new(internal_controls)?;
    let aggregated = aggregate_with(readings, config)?;
    let delta = normalize_to_controls(&aggregated, &controls, config.nan_policy);
    normalize_to_calibrator(&delta, &controls, calibrator)
}

/// Per-target baseline: the calibrator's d_cq for each non-control target.
///
/// Empty when the calibrator matches no sample. Aggregated input holds at
/// most one row per (sample, target); should a caller pass duplicates, the
/// first row wins.
pub fn calibrator_baseline<'a>(
    delta: &'a [DeltaRecord],
    controls: &ControlSet,
    calibrator: &str,
) -> HashMap<&'a str, f64> {
    let mut baseline = HashMap::new();
    for rec in delta
        .iter()
        .filter(|r| r.sample == calibrator && !controls.contains(&r.target))
    {
        baseline.entry(rec.target.as_str()).or_insert(rec.d_cq);
    }
    baseline
}

/// Delta-delta-Cq over an already computed delta table.
///
/// The baseline join is keyed by target only, so every sample is compared
/// against the same calibrator value.
pub fn normalize_to_calibrator(
    delta: &[DeltaRecord],
    controls: &ControlSet,
    calibrator: &str,
) -> QpcrResult<Vec<DeltaDeltaRecord>> {
    validate_calibrator(calibrator)?;
    let baseline = calibrator_baseline(delta, controls, calibrator);
    debug!(
        calibrator,
        baseline_targets = baseline.len(),
        "calibrator baseline extracted"
    );

    Ok(delta
        .iter()
        .map(|rec| {
            let d_cq_ic = baseline
                .get(rec.target.as_str())
                .copied()
                .unwrap_or(f64::NAN);
            let dd_cq = rec.d_cq - d_cq_ic;
            DeltaDeltaRecord {
                sample: rec.sample.clone(),
                target: rec.target.clone(),
                mean: rec.mean,
                std: rec.std,
                mean_ic: rec.mean_ic,
                d_cq: rec.d_cq,
                d_cq_ic,
                dd_cq,
                fc: fold_change(dd_cq),
            }
        })
        .collect())
}
