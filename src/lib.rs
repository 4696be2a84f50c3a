//! Relative gene-expression quantification from qPCR Cq values.
//!
//! Technical replicates are averaged per (sample, target), normalized to the
//! internal-control targets of each sample (delta-Cq) and then to a
//! calibrator sample (delta-delta-Cq), giving fold change `2^-ddCq`.
//! Missing values travel through the tables as NaN; only malformed
//! arguments are errors.

pub mod cli;
pub mod ctx;
pub mod error;
pub mod io;
pub mod math;
pub mod pipeline;
pub mod quant;
pub mod schema;
pub mod table;

pub use error::{QpcrError, QpcrResult};
pub use math::stats::NanPolicy;
pub use quant::{
    QuantConfig, aggregate, aggregate_with, compute_delta_cq, compute_delta_cq_with,
    compute_delta_delta_cq, compute_delta_delta_cq_with,
};
pub use table::{
    AggregatedRecord, ControlSet, DeltaDeltaRecord, DeltaRecord, RawReading,
    readings_from_columns,
};
