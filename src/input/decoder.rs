use std::str;

use crate::error::Result;
use crate::model::{Metric, Timestamp, TimestampTrait};
use crate::parser::parse_line;

pub trait Decoder {
    /// Returns `Ok(None)` for lines that carry no metric, e.g. blank lines
    /// and comments.
    fn decode(&self, buf: &[u8]) -> Result<Option<Metric>>;
}

pub struct LineProtocolDecoder {
    default_timestamp: Option<Timestamp>,
}

impl LineProtocolDecoder {
    /// Lines without a timestamp get the current time.
    pub fn new() -> Self {
        Self {
            default_timestamp: None,
        }
    }

    /// Lines without a timestamp get `ts`.
    pub fn with_default_timestamp(ts: Timestamp) -> Self {
        Self {
            default_timestamp: Some(ts),
        }
    }
}

impl Default for LineProtocolDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineProtocolDecoder {
    fn decode(&self, buf: &[u8]) -> Result<Option<Metric>> {
        let line = str::from_utf8(buf).map_err(|e| ("line is not valid UTF-8", e))?;
        let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            return Ok(None);
        }

        let ts = self
            .default_timestamp
            .unwrap_or_else(<Timestamp as TimestampTrait>::now);
        parse_line(line, ts).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;

    #[test]
    fn test_decode() -> Result<()> {
        let decoder = LineProtocolDecoder::with_default_timestamp(42);

        let m = decoder.decode(b"mem used=1i\r\n")?.unwrap();
        assert_eq!(m.name(), "mem");
        assert_eq!(m.field("used"), Some(&FieldValue::I64(1)));
        assert_eq!(m.timestamp(), 42);

        let m = decoder.decode(b"mem used=1i 7\n")?.unwrap();
        assert_eq!(m.timestamp(), 7);
        Ok(())
    }

    #[test]
    fn test_decode_skips_blank_and_comments() -> Result<()> {
        let decoder = LineProtocolDecoder::new();
        let tests: [&[u8]; 4] = [b"\n", b"   \n", b"# mem used=1\n", b""];
        for input in &tests {
            assert!(decoder.decode(input)?.is_none());
        }
        Ok(())
    }

    #[test]
    fn test_decode_invalid() {
        let decoder = LineProtocolDecoder::new();
        assert!(decoder.decode(b"mem\n").is_err());
        assert!(decoder.decode(b"mem used=\xff\n").is_err());
    }

    #[test]
    fn test_decode_uses_current_time() -> Result<()> {
        let before = <Timestamp as TimestampTrait>::now();
        let m = LineProtocolDecoder::new().decode(b"mem used=1")?.unwrap();
        assert!(m.timestamp() >= before);
        Ok(())
    }
}
