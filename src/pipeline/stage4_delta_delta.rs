use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::quant::normalize_to_calibrator;

pub struct Stage4DeltaDelta;

impl Stage4DeltaDelta {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4DeltaDelta {
    fn name(&self) -> &'static str {
        "stage4_delta_delta"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let Some(calibrator) = ctx.calibrator.as_deref() else {
            info!("no calibrator given; stopping at delta-Cq");
            return Ok(());
        };
        // Reuses the delta table from the previous stage.
        let delta = ctx.delta.as_ref().context("delta table missing")?;
        let controls = ctx.controls.as_ref().context("internal controls not resolved")?;
        let dd = normalize_to_calibrator(delta, controls, calibrator)?;

        let missing_fc = dd
            .iter()
            .filter(|r| !controls.contains(&r.target) && r.fc.is_nan())
            .count();
        if missing_fc > 0 {
            warn!(rows = missing_fc, "fold change undefined");
            ctx.warnings.push(format!(
                "{} non-control row(s) without fold change",
                missing_fc
            ));
        }
        info!(rows = dd.len(), calibrator, "delta_delta_cq_computed");
        ctx.delta_delta = Some(dd);
        Ok(())
    }
}
