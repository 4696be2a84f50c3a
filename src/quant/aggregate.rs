use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::QpcrResult;
#[cfg(feature = "mt")]
use crate::error::QpcrError;
use crate::math::stats::{self, NanPolicy};
use crate::quant::QuantConfig;
use crate::table::{AggregatedRecord, RawReading, validate_readings};

#[cfg(feature = "mt")]
const PAR_MIN_GROUPS: usize = 256;

type PairKey<'a> = (&'a str, &'a str);
type GroupStats<'a> = HashMap<PairKey<'a>, (f64, f64)>;

/// Collapses technical replicates into one (mean, std) row per distinct
/// (sample, target) pair, ordered by first occurrence in `readings`.
pub fn aggregate(readings: &[RawReading]) -> QpcrResult<Vec<AggregatedRecord>> {
    aggregate_with(readings, &QuantConfig::default())
}

pub fn aggregate_with(
    readings: &[RawReading],
    config: &QuantConfig,
) -> QpcrResult<Vec<AggregatedRecord>> {
    validate_readings(readings)?;

    let mut groups: HashMap<PairKey<'_>, Vec<f64>> = HashMap::new();
    for r in readings {
        groups
            .entry((r.sample.as_str(), r.target.as_str()))
            .or_default()
            .push(r.cq);
    }
    let stats = reduce_groups(groups, config)?;

    // Group order is arbitrary; the distinct-pair list carries the row order.
    let out = distinct_pairs(readings)
        .into_iter()
        .map(|key| {
            let (mean, std) = stats.get(&key).copied().unwrap_or((f64::NAN, f64::NAN));
            AggregatedRecord {
                sample: key.0.to_string(),
                target: key.1.to_string(),
                mean,
                std,
            }
        })
        .collect::<Vec<_>>();

    debug!(rows = readings.len(), pairs = out.len(), "replicates aggregated");
    Ok(out)
}

fn distinct_pairs(readings: &[RawReading]) -> Vec<PairKey<'_>> {
    let mut seen = HashSet::new();
    readings
        .iter()
        .map(|r| (r.sample.as_str(), r.target.as_str()))
        .filter(|key| seen.insert(*key))
        .collect()
}

fn replicate_stats(values: &[f64], policy: NanPolicy) -> (f64, f64) {
    (stats::mean(values, policy), stats::sample_std(values, policy))
}

fn reduce_groups<'a>(
    groups: HashMap<PairKey<'a>, Vec<f64>>,
    config: &QuantConfig,
) -> QpcrResult<GroupStats<'a>> {
    #[cfg(feature = "mt")]
    {
        if config.threads != 1 && groups.len() >= PAR_MIN_GROUPS {
            return reduce_groups_mt(groups, config);
        }
    }

    Ok(groups
        .into_iter()
        .map(|(key, values)| (key, replicate_stats(&values, config.nan_policy)))
        .collect())
}

#[cfg(feature = "mt")]
fn reduce_groups_mt<'a>(
    groups: HashMap<PairKey<'a>, Vec<f64>>,
    config: &QuantConfig,
) -> QpcrResult<GroupStats<'a>> {
    use rayon::prelude::*;

    let groups: Vec<(PairKey<'a>, Vec<f64>)> = groups.into_iter().collect();
    let policy = config.nan_policy;
    let reduce = || {
        groups
            .par_iter()
            .map(|(key, values)| (*key, replicate_stats(values, policy)))
            .collect::<GroupStats<'a>>()
    };

    if config.threads == 0 {
        return Ok(reduce());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| QpcrError::ThreadPool(e.to_string()))?;
    Ok(pool.install(reduce))
}
