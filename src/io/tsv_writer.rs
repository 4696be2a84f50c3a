use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::Ctx;
use crate::table::{AGGREGATED_COLUMNS, DELTA_COLUMNS, DELTA_DELTA_COLUMNS};

pub fn write_tsv(path: &Path, ctx: &Ctx) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_records(&mut w, ctx)?;
    w.flush()?;
    Ok(())
}

/// Writes the deepest computed table. NaN is written as `NaN`.
pub fn write_records<W: Write>(w: &mut W, ctx: &Ctx) -> Result<()> {
    if let Some(rows) = &ctx.delta_delta {
        writeln!(w, "{}", DELTA_DELTA_COLUMNS.join("\t"))?;
        for r in rows {
            writeln!(
                w,
                "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
                r.sample, r.target, r.mean, r.std, r.mean_ic, r.d_cq, r.d_cq_ic, r.dd_cq, r.fc
            )?;
        }
    } else if let Some(rows) = &ctx.delta {
        writeln!(w, "{}", DELTA_COLUMNS.join("\t"))?;
        for r in rows {
            writeln!(
                w,
                "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
                r.sample, r.target, r.mean, r.std, r.mean_ic, r.d_cq
            )?;
        }
    } else if let Some(rows) = &ctx.aggregated {
        writeln!(w, "{}", AGGREGATED_COLUMNS.join("\t"))?;
        for r in rows {
            writeln!(w, "{}\t{}\t{:.6}\t{:.6}", r.sample, r.target, r.mean, r.std)?;
        }
    } else {
        bail!("no quantification table to write");
    }
    Ok(())
}
