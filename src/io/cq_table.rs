use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::open_maybe_gz;
use crate::table::{RAW_COLUMNS, RawReading};

const NAN_TOKENS: [&str; 4] = ["", "na", "nan", "undetermined"];

/// Reads a long-format Cq table with `sample`, `target` and `cq` columns.
pub fn read_cq_table(path: &Path) -> Result<Vec<RawReading>> {
    let mut reader = open_maybe_gz(path)
        .with_context(|| format!("failed to open Cq table {}", path.display()))?;
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .with_context(|| format!("failed to read Cq table {}", path.display()))?;
    parse_cq_table(&content, delimiter_for(path), &path.display().to_string())
}

/// `,` for `.csv` (optionally gzipped), tab for everything else.
pub fn delimiter_for(path: &Path) -> char {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".csv") { ',' } else { '\t' }
}

pub fn parse_cq_table(content: &str, delimiter: char, source: &str) -> Result<Vec<RawReading>> {
    let mut columns: Option<(usize, usize, usize)> = None;
    let mut readings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        // Edge cells may be empty; only the line ending is stripped.
        let fields: Vec<&str> = line
            .trim_end_matches('\r')
            .split(delimiter)
            .map(unquote)
            .collect();

        let Some((sample_col, target_col, cq_col)) = columns else {
            columns = Some(header_columns(&fields, source)?);
            continue;
        };

        let width = sample_col.max(target_col).max(cq_col) + 1;
        if fields.len() < width {
            bail!(
                "{}:{} malformed row (expected at least {} columns, got {})",
                source,
                line_no,
                width,
                fields.len()
            );
        }
        let sample = fields[sample_col];
        let target = fields[target_col];
        if sample.is_empty() || target.is_empty() {
            bail!("{}:{} empty sample or target", source, line_no);
        }
        let cq = parse_cq(fields[cq_col])
            .with_context(|| format!("{}:{} invalid cq value '{}'", source, line_no, fields[cq_col]))?;
        readings.push(RawReading::new(sample, target, cq));
    }

    if columns.is_none() {
        bail!("{}: missing header row", source);
    }
    if readings.is_empty() {
        bail!("{}: no readings", source);
    }
    Ok(readings)
}

fn header_columns(fields: &[&str], source: &str) -> Result<(usize, usize, usize)> {
    let find = |name: &str| {
        fields
            .iter()
            .position(|f| f.eq_ignore_ascii_case(name))
            .with_context(|| format!("{}: missing required column '{}'", source, name))
    };
    let [sample, target, cq] = RAW_COLUMNS;
    Ok((find(sample)?, find(target)?, find(cq)?))
}

fn parse_cq(raw: &str) -> Result<f64> {
    if NAN_TOKENS.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
        return Ok(f64::NAN);
    }
    let value: f64 = raw.parse()?;
    if value.is_infinite() {
        bail!("infinite cq");
    }
    Ok(value)
}

fn unquote(field: &str) -> &str {
    let f = field.trim();
    f.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(f)
}
