mod diagnostic;
mod factor;
mod multiplier;
mod options;
mod percentage;
mod rescale;

pub use diagnostic::{Diagnostic, Diagnostics};
pub use factor::{FactorTable, Factors};
pub use multiplier::Multiplier;
pub use options::Options;
pub use percentage::{CpuPercentage, CAPACITY_FIELD, USAGE_FIELD};
pub use rescale::rescale;

use crate::model::Metric;

/// A pipeline stage that transforms batches of metrics.
///
/// `apply` returns the same number of metrics in the same order. Problems
/// with individual metrics never fail the batch; they are collected and
/// handed out by `drain_diagnostics`, which only holds what the latest
/// `apply` (or, before the first one, construction) reported.
pub trait Processor {
    fn description(&self) -> &'static str;

    fn sample_config(&self) -> &'static str;

    fn apply(&mut self, batch: Vec<Metric>) -> Vec<Metric>;

    fn drain_diagnostics(&mut self) -> Vec<Diagnostic> {
        Vec::new()
    }
}
