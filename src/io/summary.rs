use anyhow::{Result, bail};

use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let Some(stage) = ctx.deepest_stage() else {
        bail!("no quantification table computed");
    };
    let rows = ctx.input_meta.rows.unwrap_or(0);
    let samples = ctx.input_meta.samples.unwrap_or(0);
    let targets = ctx.input_meta.targets.unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("kira-qpcr v{}\n", ctx.tool_version));
    out.push_str(&format!(
        "Input: {} readings, {} samples, {} targets, {} pairs\n",
        rows,
        samples,
        targets,
        ctx.pair_count()
    ));
    out.push_str(&format!(
        "Controls: {}\n",
        ctx.internal_controls.join(", ")
    ));
    match &ctx.calibrator {
        Some(c) => out.push_str(&format!("Calibrator: {}\n", c)),
        None => out.push_str("Calibrator: none\n"),
    }
    out.push_str(&format!("Stage: {:?}\n", stage));

    if let Some(dd) = &ctx.delta_delta {
        let defined = dd.iter().filter(|r| !r.fc.is_nan()).count();
        out.push_str(&format!("Fold changes: {}/{} defined\n", defined, dd.len()));
    } else if let Some(delta) = &ctx.delta {
        let defined = delta.iter().filter(|r| !r.d_cq.is_nan()).count();
        out.push_str(&format!("Delta-Cq: {}/{} defined\n", defined, delta.len()));
    }

    Ok(out)
}
