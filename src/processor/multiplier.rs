use super::diagnostic::{Diagnostic, Diagnostics};
use super::factor::FactorTable;
use super::options::Options;
use super::percentage::CpuPercentage;
use super::rescale::rescale;
use super::Processor;
use crate::model::Metric;

const DESCRIPTION: &str = "Multiply metrics values on some multiply factor";

const SAMPLE_CONFIG: &str = r#"{
  "config": [
    "mem used_percent=100,available_percent=100",
    "swap used_percent=100"
  ],
  "verbose_mode": false
}"#;

/// Rescales metric fields by configured factors, then turns the effective
/// CPU usage field into a percentage of the latest known CPU capacity.
#[derive(Debug)]
pub struct Multiplier {
    options: Options,
    table: FactorTable,
    cpu: CpuPercentage,
    diagnostics: Diagnostics,
}

impl Multiplier {
    pub fn new(options: Options) -> Self {
        let mut diagnostics = Diagnostics::new();
        let table = FactorTable::build(&options.config, &mut diagnostics);

        Self {
            options,
            table,
            cpu: CpuPercentage::new(),
            diagnostics,
        }
    }

    pub fn factor_table(&self) -> &FactorTable {
        &self.table
    }

    pub fn cpu(&self) -> &CpuPercentage {
        &self.cpu
    }
}

impl Processor for Multiplier {
    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn sample_config(&self) -> &'static str {
        SAMPLE_CONFIG
    }

    fn apply(&mut self, mut batch: Vec<Metric>) -> Vec<Metric> {
        self.diagnostics.clear();

        for metric in batch.iter_mut() {
            // Readings come from the metric as it arrived, before any rescale.
            self.cpu.observe(metric, &mut self.diagnostics);

            let factors = match self.table.factors(metric.name()) {
                Some(factors) => factors,
                None => continue,
            };

            if let Some(rescaled) = rescale(
                metric,
                factors,
                self.options.verbose_mode,
                &mut self.diagnostics,
            ) {
                *metric = rescaled;
            }
        }

        self.cpu.rewrite(&mut batch, &mut self.diagnostics);

        batch
    }

    fn drain_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain()
    }
}
