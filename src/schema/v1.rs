use serde::{Deserialize, Serialize};

use crate::math::stats::NanPolicy;

/// Deepest quantification stage present in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Aggregate,
    Delta,
    DeltaDelta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    pub internal_controls: Vec<String>,
    pub calibrator: Option<String>,
    pub nan_policy: NanPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub rows: u64,
    pub samples: u64,
    pub targets: u64,
    pub pairs: u64,
}

/// One output row. NaN and not-yet-computed columns are both `null`;
/// `stage` on the report says which columns exist. Any non-finite value
/// (NaN or an overflowing `fc`) is written as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordV1 {
    pub sample: String,
    pub target: String,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub mean_ic: Option<f64>,
    pub d_cq: Option<f64>,
    pub d_cq_ic: Option<f64>,
    pub dd_cq: Option<f64>,
    pub fc: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QpcrReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub stage: StageKind,
    pub params: Params,
    pub input_meta: InputMeta,
    pub records: Vec<RecordV1>,
}

impl QpcrReportV1 {
    pub fn empty(tool_version: &str, stage: StageKind, params: Params) -> Self {
        Self {
            tool: "kira-qpcr".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            stage,
            params,
            input_meta: InputMeta {
                rows: 0,
                samples: 0,
                targets: 0,
                pairs: 0,
            },
            records: Vec::new(),
        }
    }
}

pub fn finite(value: f64) -> Option<f64> {
    if value.is_finite() { Some(value) } else { None }
}
