use std::path::PathBuf;

use structopt::StructOpt;
use tracing::Level;

use crate::error::{Error, Result};
use crate::output::{Encoder, JsonEncoder, LineProtocolEncoder};
use crate::processor::Options;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "multiplier",
    about = "Rescale line protocol metrics read from stdin by per-field factors"
)]
pub struct CliOpt {
    /// JSON options file, see --sample-config.
    #[structopt(long = "config", short = "c", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Factor line, e.g. "mem used_percent=100". Applied after the config file lines.
    #[structopt(long = "factor", short = "f", number_of_values = 1)]
    pub factors: Vec<String>,

    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,

    #[structopt(
        long = "encode",
        short = "e",
        default_value = "line",
        possible_values = &["line", "json"]
    )]
    pub encode: String,

    #[structopt(
        long = "batch-size",
        short = "b",
        default_value = "1000",
        parse(try_from_str = parse_batch_size)
    )]
    pub batch_size: usize,

    /// Print a sample options file and exit.
    #[structopt(long = "sample-config")]
    pub sample_config: bool,
}

impl CliOpt {
    pub fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_file(path)?,
            None => Options::default(),
        };
        options.config.extend(self.factors.iter().cloned());
        options.verbose_mode |= self.verbose;
        Ok(options)
    }

    pub fn encoder(&self) -> Box<dyn Encoder> {
        match self.encode.as_str() {
            "json" => Box::new(JsonEncoder::new()),
            _ => Box::new(LineProtocolEncoder::new()),
        }
    }
}

/// Changed values are traced at INFO, so verbose mode needs that level on.
pub fn log_level(options: &Options) -> Level {
    if options.verbose_mode {
        Level::INFO
    } else {
        Level::WARN
    }
}

fn parse_batch_size(s: &str) -> Result<usize> {
    match s.parse::<usize>() {
        Ok(0) => Err(Error::new("batch size must be positive")),
        Ok(n) => Ok(n),
        Err(e) => Err(("batch size parsing failed", e).into()),
    }
}
