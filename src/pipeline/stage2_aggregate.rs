use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::quant::aggregate_with;

pub struct Stage2Aggregate;

impl Stage2Aggregate {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Aggregate {
    fn name(&self) -> &'static str {
        "stage2_aggregate"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let aggregated = aggregate_with(&ctx.readings, &ctx.config)?;
        let single = aggregated.iter().filter(|r| r.std.is_nan()).count();
        info!(
            pairs = aggregated.len(),
            without_std = single,
            "replicates_aggregated"
        );
        ctx.aggregated = Some(aggregated);
        Ok(())
    }
}
