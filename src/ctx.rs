use std::path::PathBuf;

use crate::quant::QuantConfig;
use crate::schema::v1::StageKind;
use crate::table::{AggregatedRecord, ControlSet, DeltaDeltaRecord, DeltaRecord, RawReading};

#[derive(Debug, Clone, Default)]
pub struct InputMeta {
    pub rows: Option<u64>,
    pub samples: Option<u64>,
    pub targets: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub internal_controls: Vec<String>,
    pub calibrator: Option<String>,
    pub config: QuantConfig,
    pub write_json: bool,
    pub write_tsv: bool,
    pub controls: Option<ControlSet>,
    pub readings: Vec<RawReading>,
    pub aggregated: Option<Vec<AggregatedRecord>>,
    pub delta: Option<Vec<DeltaRecord>>,
    pub delta_delta: Option<Vec<DeltaDeltaRecord>>,
    pub input_meta: InputMeta,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub tool_version: String,
}

impl Ctx {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input: PathBuf,
        out_dir: PathBuf,
        internal_controls: Vec<String>,
        calibrator: Option<String>,
        config: QuantConfig,
        write_json: bool,
        write_tsv: bool,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("qpcr.json");
        let tsv_path = out_dir.join("qpcr.tsv");
        Self {
            input,
            internal_controls,
            calibrator,
            config,
            write_json,
            write_tsv,
            controls: None,
            readings: Vec::new(),
            aggregated: None,
            delta: None,
            delta_delta: None,
            input_meta: InputMeta::default(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                json_path,
                tsv_path,
            },
            tool_version: tool_version.to_string(),
        }
    }

    pub fn deepest_stage(&self) -> Option<StageKind> {
        if self.delta_delta.is_some() {
            Some(StageKind::DeltaDelta)
        } else if self.delta.is_some() {
            Some(StageKind::Delta)
        } else if self.aggregated.is_some() {
            Some(StageKind::Aggregate)
        } else {
            None
        }
    }

    pub fn pair_count(&self) -> usize {
        self.aggregated.as_ref().map(|a| a.len()).unwrap_or(0)
    }
}
