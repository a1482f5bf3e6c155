use std::collections::HashMap;

use super::diagnostic::{Diagnostic, Diagnostics};
use crate::model::{FieldName, MetricName};
use crate::parser::parse_line;

pub type Factors = HashMap<FieldName, f64>;

/// Multiplication factors by metric name, then by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FactorTable {
    metrics: HashMap<MetricName, Factors>,
}

impl FactorTable {
    /// Builds the table from factor lines such as
    /// `mem used_percent=100,available_percent=100`.
    ///
    /// Lines that don't decode are reported and skipped. A factor that isn't
    /// a number is reported and stored as 0. A later line
    /// overrides the factor an earlier one set for the same metric field.
    pub fn build<S: AsRef<str>>(lines: &[S], diags: &mut Diagnostics) -> Self {
        let mut table = Self::default();

        for line in lines {
            let line = line.as_ref();
            let metric = match parse_line(line, 0) {
                Ok(metric) => metric,
                Err(err) => {
                    diags.report(Diagnostic::MalformedConfig {
                        line: line.to_owned(),
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            let keeper = table.metrics.entry(metric.name().clone()).or_default();

            for (field, value) in metric.fields() {
                let factor = value.as_f64().unwrap_or_else(|| {
                    diags.report(Diagnostic::NonNumericFactor {
                        metric: metric.name().clone(),
                        field: field.clone(),
                        value: value.clone(),
                    });
                    0.0
                });
                keeper.insert(field.clone(), factor);
            }
        }

        table
    }

    pub fn factors(&self, metric: &str) -> Option<&Factors> {
        self.metrics.get(metric)
    }

    pub fn factor(&self, metric: &str, field: &str) -> Option<f64> {
        self.factors(metric)?.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
