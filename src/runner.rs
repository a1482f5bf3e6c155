use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::input::{Decoder, LineReader};
use crate::model::Metric;
use crate::output::{Encoder, Writer};
use crate::processor::Processor;

// Reader    == stdin                ->  lines
// Decoder   == line                 ->  Metric
// Processor == Vec<Metric> (batch)  ->  Vec<Metric>
// Encoder   == Metric               ->  bytes
// Writer    == bytes                ->  stdout

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub lines: usize,
    pub metrics: usize,
    pub skipped: usize,
    pub diagnostics: usize,
}

pub struct Runner {
    reader: Box<dyn LineReader>,
    decoder: Box<dyn Decoder>,
    processor: Box<dyn Processor>,
    encoder: Box<dyn Encoder>,
    writer: Box<dyn Writer>,
    batch_size: usize,
}

impl Runner {
    pub fn new(
        reader: Box<dyn LineReader>,
        decoder: Box<dyn Decoder>,
        processor: Box<dyn Processor>,
        encoder: Box<dyn Encoder>,
        writer: Box<dyn Writer>,
        batch_size: usize,
    ) -> Self {
        Self {
            reader,
            decoder,
            processor,
            encoder,
            writer,
            batch_size: batch_size.max(1),
        }
    }

    pub fn run(&mut self) -> Result<Summary> {
        let mut summary = Summary::default();
        let mut batch = Vec::with_capacity(self.batch_size);

        // Diagnostics left from building the processor.
        summary.diagnostics += self.processor.drain_diagnostics().len();

        let mut buf = Vec::new();
        loop {
            let line_no = match self.reader.next_line(&mut buf) {
                Err(e) => return Err(Error::from(("reader failed", e)).at_line(summary.lines + 1)),
                Ok(None) => break, // EOF
                Ok(Some(line_no)) => line_no,
            };

            summary.lines = line_no;

            match self.decoder.decode(&buf) {
                Ok(Some(metric)) => batch.push(metric),
                Ok(None) => continue,
                Err(err) => {
                    warn!(
                        "decoding failed, {}. Line: {}",
                        err.at_line(line_no),
                        String::from_utf8_lossy(&buf),
                    );
                    summary.skipped += 1;
                    continue;
                }
            }

            if batch.len() >= self.batch_size {
                let full = std::mem::replace(&mut batch, Vec::with_capacity(self.batch_size));
                self.process(full, &mut summary)?;
            }
        }

        if !batch.is_empty() {
            self.process(batch, &mut summary)?;
        }

        self.writer.flush().map_err(|e| ("writer failed", e))?;

        Ok(summary)
    }

    fn process(&mut self, batch: Vec<Metric>, summary: &mut Summary) -> Result<()> {
        debug!("processing a batch of {} metrics", batch.len());

        let batch = self.processor.apply(batch);
        summary.diagnostics += self.processor.drain_diagnostics().len();

        for metric in &batch {
            let buf = self.encoder.encode(metric)?;
            self.writer.write(&buf).map_err(|e| ("writer failed", e))?;
        }
        summary.metrics += batch.len();

        Ok(())
    }
}
