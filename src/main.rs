use std::io::{self, BufReader, BufWriter};

use structopt::StructOpt;
use tracing::info;

use multiplier::cliopt::{self, CliOpt};
use multiplier::input::{LineProtocolDecoder, NumberedLines};
use multiplier::output::LineWriter;
use multiplier::processor::{Multiplier, Processor};
use multiplier::runner::Runner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();
    let options = opt.options()?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cliopt::log_level(&options))
        .init();

    let processor = Multiplier::new(options);
    if opt.sample_config {
        println!("{}", processor.sample_config());
        return Ok(());
    }

    let mut runner = Runner::new(
        Box::new(NumberedLines::new(BufReader::new(io::stdin()))),
        Box::new(LineProtocolDecoder::new()),
        Box::new(processor),
        opt.encoder(),
        Box::new(LineWriter::new(BufWriter::new(io::stdout()))),
        opt.batch_size,
    );

    let summary = runner.run()?;
    info!(
        "{} lines read, {} metrics written, {} lines skipped, {} diagnostics",
        summary.lines, summary.metrics, summary.skipped, summary.diagnostics
    );

    Ok(())
}
