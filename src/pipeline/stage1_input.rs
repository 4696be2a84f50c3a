use std::collections::HashSet;

use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::cq_table::read_cq_table;
use crate::pipeline::Stage;
use crate::table::{ControlSet, validate_calibrator};

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        // Parameters are checked before the table is touched.
        let controls = ControlSet::new(&ctx.internal_controls)?;
        if let Some(calibrator) = &ctx.calibrator {
            validate_calibrator(calibrator)?;
        }

        let readings = read_cq_table(&ctx.input)?;
        let samples: HashSet<&str> = readings.iter().map(|r| r.sample.as_str()).collect();
        let targets: HashSet<&str> = readings.iter().map(|r| r.target.as_str()).collect();
        let failed = readings.iter().filter(|r| r.cq.is_nan()).count();

        info!(
            input = %ctx.input.display(),
            rows = readings.len(),
            samples = samples.len(),
            targets = targets.len(),
            failed_reactions = failed,
            "cq_table_loaded"
        );

        let mut warnings = Vec::new();
        for control in controls.as_slice() {
            if !targets.contains(control.as_str()) {
                warn!(control = %control, "internal control not found among targets");
                warnings.push(format!(
                    "internal control '{}' not found among targets; delta-Cq will be NaN",
                    control
                ));
            }
        }
        if let Some(calibrator) = &ctx.calibrator {
            if !samples.contains(calibrator.as_str()) {
                warn!(calibrator = %calibrator, "calibrator not found among samples");
                warnings.push(format!(
                    "calibrator '{}' not found among samples; fold changes will be NaN",
                    calibrator
                ));
            }
        }
        if failed > 0 {
            warnings.push(format!("{} reading(s) with missing Cq", failed));
        }

        ctx.input_meta.rows = Some(readings.len() as u64);
        ctx.input_meta.samples = Some(samples.len() as u64);
        ctx.input_meta.targets = Some(targets.len() as u64);
        ctx.warnings.extend(warnings);
        ctx.controls = Some(controls);
        ctx.readings = readings;
        Ok(())
    }
}
