use super::diagnostic::{Diagnostic, Diagnostics};
use crate::model::{FieldValue, Metric};

/// Field carrying the total CPU capacity of a host, in MHz.
pub const CAPACITY_FIELD: &str = "totalmhz_average";

/// Field carrying the effective CPU usage, in MHz. Rewritten into a
/// percentage of the capacity.
pub const USAGE_FIELD: &str = "effectivecpu_average";

/// Latest capacity and usage readings seen by one stage.
///
/// Readings are overwritten, never averaged, and survive from one batch to
/// the next.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuPercentage {
    capacity: f64,
    usage: f64,
}

impl CpuPercentage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn usage(&self) -> f64 {
        self.usage
    }

    /// Records the capacity and usage readings `metric` carries, if any.
    pub fn observe(&mut self, metric: &Metric, diags: &mut Diagnostics) {
        if let Some(reading) = reading(metric, CAPACITY_FIELD, diags) {
            self.capacity = reading;
        }
        if let Some(reading) = reading(metric, USAGE_FIELD, diags) {
            self.usage = reading;
        }
    }

    /// `usage * 100 / capacity` truncated toward zero, or `None` while no
    /// non-zero capacity has been seen.
    pub fn percentage(&self) -> Option<i64> {
        if self.capacity == 0.0 {
            return None;
        }
        Some((self.usage * 100.0 / self.capacity) as i64)
    }

    /// Replaces the usage field of every metric in `batch` that has one with
    /// the current percentage. Metrics that can't be rebuilt stay as they are.
    pub fn rewrite(&self, batch: &mut [Metric], diags: &mut Diagnostics) {
        let percentage = match self.percentage() {
            Some(p) => p,
            None => return,
        };

        for metric in batch.iter_mut() {
            if metric.field(USAGE_FIELD).is_none() {
                continue;
            }

            let mut fields = metric.fields().clone();
            fields.insert(USAGE_FIELD.to_owned(), FieldValue::I64(percentage));

            match metric.with_fields(fields) {
                Ok(m) => *metric = m,
                Err(err) => diags.report(Diagnostic::RebuildFailed {
                    metric: metric.name().clone(),
                    error: err.to_string(),
                }),
            }
        }
    }
}

/// A reading that isn't a number counts as 0.
fn reading(metric: &Metric, field: &str, diags: &mut Diagnostics) -> Option<f64> {
    let value = metric.field(field)?;
    match value.as_f64() {
        Some(reading) => Some(reading),
        None => {
            diags.report(Diagnostic::NonNumericReading {
                metric: metric.name().clone(),
                field: field.to_owned(),
                value: value.clone(),
            });
            Some(0.0)
        }
    }
}
