//! Row types flowing through the quantification stages.
//!
//! Each stage produces a new owned table; no stage mutates its input.

use std::collections::HashSet;

use crate::error::{QpcrError, QpcrResult};

pub const RAW_COLUMNS: [&str; 3] = ["sample", "target", "cq"];
pub const AGGREGATED_COLUMNS: [&str; 4] = ["sample", "target", "mean", "std"];
pub const DELTA_COLUMNS: [&str; 6] = ["sample", "target", "mean", "std", "mean_ic", "d_cq"];
pub const DELTA_DELTA_COLUMNS: [&str; 9] = [
    "sample", "target", "mean", "std", "mean_ic", "d_cq", "d_cq_ic", "dd_cq", "fc",
];

/// One Cq measurement. Rows sharing (sample, target) are technical replicates.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub sample: String,
    pub target: String,
    pub cq: f64,
}

impl RawReading {
    pub fn new(sample: impl Into<String>, target: impl Into<String>, cq: f64) -> Self {
        Self {
            sample: sample.into(),
            target: target.into(),
            cq,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub sample: String,
    pub target: String,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRecord {
    pub sample: String,
    pub target: String,
    pub mean: f64,
    pub std: f64,
    /// Mean of the per-target control means of this sample.
    pub mean_ic: f64,
    /// NaN on control rows.
    pub d_cq: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeltaDeltaRecord {
    pub sample: String,
    pub target: String,
    pub mean: f64,
    pub std: f64,
    pub mean_ic: f64,
    pub d_cq: f64,
    /// Calibrator d_cq for this target, shared by every sample.
    pub d_cq_ic: f64,
    pub dd_cq: f64,
    pub fc: f64,
}

/// Builds readings from three parallel columns.
pub fn readings_from_columns(
    samples: Vec<String>,
    targets: Vec<String>,
    cqs: Vec<f64>,
) -> QpcrResult<Vec<RawReading>> {
    if samples.len() != targets.len() || samples.len() != cqs.len() {
        return Err(QpcrError::invalid(format!(
            "column length mismatch: sample={} target={} cq={}",
            samples.len(),
            targets.len(),
            cqs.len()
        )));
    }
    let readings = samples
        .into_iter()
        .zip(targets)
        .zip(cqs)
        .map(|((sample, target), cq)| RawReading { sample, target, cq })
        .collect::<Vec<_>>();
    validate_readings(&readings)?;
    Ok(readings)
}

pub(crate) fn validate_readings(readings: &[RawReading]) -> QpcrResult<()> {
    if readings.is_empty() {
        return Err(QpcrError::invalid("readings table is empty"));
    }
    for (i, r) in readings.iter().enumerate() {
        if r.sample.trim().is_empty() {
            return Err(QpcrError::invalid(format!("row {}: empty sample identifier", i + 1)));
        }
        if r.target.trim().is_empty() {
            return Err(QpcrError::invalid(format!("row {}: empty target identifier", i + 1)));
        }
    }
    Ok(())
}

/// Validated set of internal-control target identifiers.
#[derive(Debug, Clone)]
pub struct ControlSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl ControlSet {
    pub fn new<S: AsRef<str>>(controls: &[S]) -> QpcrResult<Self> {
        if controls.is_empty() {
            return Err(QpcrError::invalid("internal controls must name at least one target"));
        }
        let mut ordered = Vec::with_capacity(controls.len());
        let mut members = HashSet::with_capacity(controls.len());
        for c in controls {
            let id = c.as_ref();
            if id.trim().is_empty() {
                return Err(QpcrError::invalid("internal control identifier is empty"));
            }
            if members.insert(id.to_string()) {
                ordered.push(id.to_string());
            }
        }
        Ok(Self { ordered, members })
    }

    pub fn contains(&self, target: &str) -> bool {
        self.members.contains(target)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }
}

pub(crate) fn validate_calibrator(calibrator: &str) -> QpcrResult<()> {
    if calibrator.trim().is_empty() {
        return Err(QpcrError::invalid("calibrator sample identifier is empty"));
    }
    Ok(())
}
