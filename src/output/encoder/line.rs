use std::fmt::Write;

use super::Encoder;
use crate::error::Result;
use crate::model::{FieldValue, Metric};

const MEASUREMENT_ESCAPES: &[char] = &[',', ' ', '\\'];

const KEY_ESCAPES: &[char] = &[',', '=', ' ', '\\'];

/// Encodes metrics back into the line protocol `parse_line` reads.
pub struct LineProtocolEncoder {}

impl LineProtocolEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LineProtocolEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for LineProtocolEncoder {
    fn encode(&self, metric: &Metric) -> Result<Vec<u8>> {
        let mut line = escape(metric.name(), MEASUREMENT_ESCAPES);

        for (key, value) in metric.tags() {
            line.push(',');
            line.push_str(&escape(key, KEY_ESCAPES));
            line.push('=');
            line.push_str(&escape(value, KEY_ESCAPES));
        }

        let mut sep = ' ';
        for (key, value) in metric.fields() {
            line.push(sep);
            line.push_str(&escape(key, KEY_ESCAPES));
            line.push('=');
            write_value(&mut line, value).map_err(|e| ("line encoding failed", e))?;
            sep = ',';
        }

        write!(line, " {}", metric.timestamp()).map_err(|e| ("line encoding failed", e))?;
        Ok(line.into_bytes())
    }
}

fn write_value(out: &mut String, value: &FieldValue) -> std::fmt::Result {
    match value {
        FieldValue::I32(v) => write!(out, "{}i", v),
        FieldValue::I64(v) => write!(out, "{}i", v),
        FieldValue::U32(v) => write!(out, "{}u", v),
        FieldValue::U64(v) => write!(out, "{}u", v),
        FieldValue::F32(v) => write!(out, "{}", v),
        FieldValue::F64(v) => write!(out, "{}", v),
        FieldValue::Bool(v) => write!(out, "{}", v),
        FieldValue::Str(v) => write!(out, "\"{}\"", escape(v, &['"', '\\'])),
    }
}

fn escape(s: &str, specials: &[char]) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if specials.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
