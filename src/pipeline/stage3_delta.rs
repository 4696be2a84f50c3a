use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::quant::normalize_to_controls;

pub struct Stage3Delta;

impl Stage3Delta {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Delta {
    fn name(&self) -> &'static str {
        "stage3_delta"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let aggregated = ctx.aggregated.as_ref().context("aggregated table missing")?;
        let controls = ctx.controls.as_ref().context("internal controls not resolved")?;
        let delta = normalize_to_controls(aggregated, controls, ctx.config.nan_policy);

        let mut seen = HashSet::new();
        let unnormalized: Vec<&str> = delta
            .iter()
            .filter(|r| r.mean_ic.is_nan())
            .map(|r| r.sample.as_str())
            .filter(|s| seen.insert(*s))
            .collect();
        if !unnormalized.is_empty() {
            warn!(samples = unnormalized.len(), "samples without control mean");
            ctx.warnings.push(format!(
                "no control mean for sample(s): {}",
                unnormalized.join(", ")
            ));
        }

        let defined = delta.iter().filter(|r| !r.d_cq.is_nan()).count();
        info!(rows = delta.len(), defined_d_cq = defined, "delta_cq_computed");
        ctx.delta = Some(delta);
        Ok(())
    }
}
