use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::{InputMeta, Params, QpcrReportV1, RecordV1, finite};

pub fn build_report(ctx: &Ctx) -> Result<QpcrReportV1> {
    let stage = ctx.deepest_stage().context("no quantification table computed")?;
    let params = Params {
        internal_controls: ctx.internal_controls.clone(),
        calibrator: ctx.calibrator.clone(),
        nan_policy: ctx.config.nan_policy,
    };

    let records: Vec<RecordV1> = if let Some(rows) = &ctx.delta_delta {
        rows.iter()
            .map(|r| RecordV1 {
                sample: r.sample.clone(),
                target: r.target.clone(),
                mean: finite(r.mean),
                std: finite(r.std),
                mean_ic: finite(r.mean_ic),
                d_cq: finite(r.d_cq),
                d_cq_ic: finite(r.d_cq_ic),
                dd_cq: finite(r.dd_cq),
                fc: finite(r.fc),
            })
            .collect()
    } else if let Some(rows) = &ctx.delta {
        rows.iter()
            .map(|r| RecordV1 {
                sample: r.sample.clone(),
                target: r.target.clone(),
                mean: finite(r.mean),
                std: finite(r.std),
                mean_ic: finite(r.mean_ic),
                d_cq: finite(r.d_cq),
                ..RecordV1::default()
            })
            .collect()
    } else {
        ctx.aggregated
            .iter()
            .flatten()
            .map(|r| RecordV1 {
                sample: r.sample.clone(),
                target: r.target.clone(),
                mean: finite(r.mean),
                std: finite(r.std),
                ..RecordV1::default()
            })
            .collect()
    };

    let mut report = QpcrReportV1::empty(&ctx.tool_version, stage, params);
    report.input_meta = InputMeta {
        rows: ctx.input_meta.rows.unwrap_or(0),
        samples: ctx.input_meta.samples.unwrap_or(0),
        targets: ctx.input_meta.targets.unwrap_or(0),
        pairs: ctx.pair_count() as u64,
    };
    report.records = records;
    Ok(report)
}

pub fn write_json(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_report(ctx)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
