use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    /// Factor lines in the line protocol, e.g. `mem used_percent=100`.
    pub config: Vec<String>,

    /// Log every value the stage changes.
    pub verbose_mode: bool,
}

impl Options {
    pub fn new(config: Vec<String>, verbose_mode: bool) -> Self {
        Self {
            config,
            verbose_mode,
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| ("options decoding failed", e).into())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).map_err(|e| ("cannot read options file", e))?;
        Self::from_json(&s)
    }
}
