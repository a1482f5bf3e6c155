use serde::Serialize;

use super::Encoder;
use crate::error::Result;
use crate::model::{Fields, Metric, MetricKind, Tags, TimestampTrait};

// {
//   "name": "mem",
//   "tags": {"host": "esx1"},
//   "fields": {"used_percent": 5000, "state": "busy"},
//   "timestamp": 1622104500000000000,
//   "time": "2021-05-27T08:35:00Z",
//   "kind": "gauge"
// }
#[derive(Serialize)]
struct JsonMetric<'a> {
    name: &'a str,
    tags: &'a Tags,
    fields: &'a Fields,
    timestamp: i64,
    time: String,
    kind: MetricKind,
}

impl<'a> JsonMetric<'a> {
    fn new(metric: &'a Metric) -> Self {
        Self {
            name: metric.name(),
            tags: metric.tags(),
            fields: metric.fields(),
            timestamp: metric.timestamp(),
            time: metric.timestamp().to_string_rfc3339(),
            kind: metric.kind(),
        }
    }
}

pub struct JsonEncoder {}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, metric: &Metric) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&JsonMetric::new(metric))
            .map_err(|e| ("JSON serialization failed", e))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;

    #[test]
    fn test_encode() -> Result<()> {
        let mut tags = Tags::new();
        tags.insert("host".into(), "esx1".into());
        let mut fields = Fields::new();
        fields.insert("used_percent".into(), FieldValue::I64(5000));
        fields.insert("state".into(), FieldValue::from("busy"));
        fields.insert("ratio".into(), FieldValue::F64(0.5));

        let metric = Metric::new(
            "mem",
            tags,
            fields,
            1_622_104_500_000_000_000,
            MetricKind::Gauge,
        )?;

        let actual = String::from_utf8(JsonEncoder::new().encode(&metric)?).unwrap();
        assert_eq!(
            actual,
            concat!(
                r#"{"name":"mem","tags":{"host":"esx1"},"#,
                r#""fields":{"ratio":0.5,"state":"busy","used_percent":5000},"#,
                r#""timestamp":1622104500000000000,"time":"2021-05-27T08:35:00Z","kind":"gauge"}"#
            )
        );
        Ok(())
    }
}
