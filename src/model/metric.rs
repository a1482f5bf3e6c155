use std::collections::BTreeMap;

use serde::Serialize;

use super::timestamp::Timestamp;
use super::value::FieldValue;
use super::{FieldName, MetricName};
use crate::error::{Error, Result};

pub type Tags = BTreeMap<String, String>;

pub type Fields = BTreeMap<FieldName, FieldValue>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Untyped,
    Counter,
    Gauge,
    Summary,
    Histogram,
}

impl Default for MetricKind {
    fn default() -> Self {
        MetricKind::Untyped
    }
}

/// One telemetry record. Immutable once built: a processor that wants to
/// change a field constructs a replacement with `Metric::new`.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    name: MetricName,
    tags: Tags,
    fields: Fields,
    timestamp: Timestamp,
    kind: MetricKind,
}

impl Metric {
    pub fn new<N>(
        name: N,
        tags: Tags,
        fields: Fields,
        timestamp: Timestamp,
        kind: MetricKind,
    ) -> Result<Self>
    where
        N: Into<MetricName>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::new("metric name cannot be empty"));
        }
        if fields.is_empty() {
            return Err(format!("metric '{}' cannot be made without any fields", name).into());
        }
        if tags.keys().any(|k| k.is_empty()) {
            return Err(format!("metric '{}' has an empty tag key", name).into());
        }
        for (field, value) in &fields {
            if field.is_empty() {
                return Err(format!("metric '{}' has an empty field key", name).into());
            }
            if !value.is_finite() {
                return Err(format!(
                    "metric '{}' field '{}' is not a finite number: {}",
                    name, field, value
                )
                .into());
            }
        }

        Ok(Self {
            name,
            tags,
            fields,
            timestamp,
            kind,
        })
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    #[inline]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Builds a copy of this metric with `fields` in place of the current ones.
    pub fn with_fields(&self, fields: Fields) -> Result<Self> {
        Self::new(
            self.name.clone(),
            self.tags.clone(),
            fields,
            self.timestamp,
            self.kind,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_new_valid() {
        let mut tags = Tags::new();
        tags.insert("host".into(), "a".into());

        let m = Metric::new(
            "mem",
            tags.clone(),
            fields(&[("used_percent", FieldValue::F64(12.5))]),
            42,
            MetricKind::Gauge,
        )
        .unwrap();

        assert_eq!(m.name(), "mem");
        assert_eq!(m.tags(), &tags);
        assert_eq!(m.field("used_percent"), Some(&FieldValue::F64(12.5)));
        assert_eq!(m.timestamp(), 42);
        assert_eq!(m.kind(), MetricKind::Gauge);
    }

    #[test]
    fn test_new_invalid() {
        let mut empty_tag = Tags::new();
        empty_tag.insert("".into(), "x".into());

        let tests = [
            ("", Tags::new(), fields(&[("f", FieldValue::I64(1))])),
            ("mem", Tags::new(), Fields::new()),
            ("mem", empty_tag, fields(&[("f", FieldValue::I64(1))])),
            ("mem", Tags::new(), fields(&[("", FieldValue::I64(1))])),
            ("mem", Tags::new(), fields(&[("f", FieldValue::F64(f64::NAN))])),
            ("mem", Tags::new(), fields(&[("f", FieldValue::F32(f32::INFINITY))])),
        ];

        for (name, tags, fields) in tests.iter().cloned() {
            let res = Metric::new(name, tags, fields, 0, MetricKind::Untyped);
            assert!(res.is_err(), "expected error but found {:?}", res);
        }
    }

    #[test]
    fn test_with_fields_keeps_identity_parts() {
        let m = Metric::new(
            "cpu",
            Tags::new(),
            fields(&[("usage", FieldValue::I32(1))]),
            7,
            MetricKind::Counter,
        )
        .unwrap();

        let n = m.with_fields(fields(&[("usage", FieldValue::I32(2))])).unwrap();
        assert_eq!(n.name(), m.name());
        assert_eq!(n.timestamp(), 7);
        assert_eq!(n.kind(), MetricKind::Counter);
        assert_eq!(n.field("usage"), Some(&FieldValue::I32(2)));
    }
}
