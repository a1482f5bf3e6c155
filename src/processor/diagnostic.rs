use std::fmt;

use tracing::warn;

use crate::model::{FieldName, FieldValue, MetricName};

/// Something the stage recovered from while building its factor table or
/// while processing a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    MalformedConfig {
        line: String,
        error: String,
    },
    NonNumericFactor {
        metric: MetricName,
        field: FieldName,
        value: FieldValue,
    },
    UnsupportedValue {
        metric: MetricName,
        field: FieldName,
        factor: f64,
        value: FieldValue,
    },
    NonNumericReading {
        metric: MetricName,
        field: FieldName,
        value: FieldValue,
    },
    RebuildFailed {
        metric: MetricName,
        error: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::MalformedConfig { line, error } => {
                write!(f, "skipping config line '{}': {}", line, error)
            }
            Diagnostic::NonNumericFactor {
                metric,
                field,
                value,
            } => write!(
                f,
                "factor for [{}.{}] is not a number: {} '{}'",
                metric,
                field,
                value.type_name(),
                value
            ),
            Diagnostic::UnsupportedValue {
                metric,
                field,
                factor,
                value,
            } => write!(
                f,
                "couldn't multiply [{}.{}] by {}: {} '{}'",
                metric,
                field,
                factor,
                value.type_name(),
                value
            ),
            Diagnostic::NonNumericReading {
                metric,
                field,
                value,
            } => write!(
                f,
                "ignoring [{}.{}] reading: {} '{}'",
                metric,
                field,
                value.type_name(),
                value
            ),
            Diagnostic::RebuildFailed { metric, error } => {
                write!(f, "cannot make a copy of '{}': {}", metric, error)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the diagnostic and keeps it until the next `drain` or `clear`.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        warn!("multiplier: {}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.items)
    }
}
