use tracing::info;

use super::diagnostic::{Diagnostic, Diagnostics};
use super::factor::Factors;
use crate::model::{Fields, Metric};

/// Builds a copy of `metric` with every field listed in `factors` multiplied
/// by its factor. Other fields, and fields that aren't numbers, are copied as is.
///
/// Returns `None` if the copy can't be constructed; the caller should keep
/// the original metric then.
pub fn rescale(
    metric: &Metric,
    factors: &Factors,
    verbose: bool,
    diags: &mut Diagnostics,
) -> Option<Metric> {
    let mut fields = Fields::new();

    for (name, value) in metric.fields() {
        let factor = match factors.get(name) {
            Some(&factor) => factor,
            None => {
                fields.insert(name.clone(), value.clone());
                continue;
            }
        };

        let scaled = match value.multiply(factor) {
            Some(scaled) => scaled,
            None => {
                diags.report(Diagnostic::UnsupportedValue {
                    metric: metric.name().clone(),
                    field: name.clone(),
                    factor,
                    value: value.clone(),
                });
                value.clone()
            }
        };

        if verbose && scaled != *value {
            info!(
                "multiplier: [{}.{}] {} * {} => {}",
                metric.name(),
                name,
                value,
                factor,
                scaled
            );
        }

        fields.insert(name.clone(), scaled);
    }

    match metric.with_fields(fields) {
        Ok(m) => Some(m),
        Err(err) => {
            diags.report(Diagnostic::RebuildFailed {
                metric: metric.name().clone(),
                error: err.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::model::{FieldValue, MetricKind, Tags};

    fn metric(name: &str, pairs: &[(&str, FieldValue)]) -> Metric {
        let mut tags = Tags::new();
        tags.insert("host".into(), "a".into());
        let fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Metric::new(name, tags, fields, 1_000, MetricKind::Gauge).unwrap()
    }

    fn factors(pairs: &[(&str, f64)]) -> Factors {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_rescale_matching_fields_only() {
        use FieldValue::*;

        let mut diags = Diagnostics::new();
        let m = metric(
            "mem",
            &[("used_percent", I64(50)), ("available_percent", F64(0.25)), ("total", U64(8))],
        );

        let out = rescale(
            &m,
            &factors(&[("used_percent", 100.0), ("available_percent", 100.0)]),
            true,
            &mut diags,
        )
        .unwrap();

        assert_eq!(out.field("used_percent"), Some(&I64(5000)));
        assert_eq!(out.field("available_percent"), Some(&F64(25.0)));
        assert_eq!(out.field("total"), Some(&U64(8)));
        assert_eq!(out.name(), m.name());
        assert_eq!(out.tags(), m.tags());
        assert_eq!(out.timestamp(), m.timestamp());
        assert_eq!(out.kind(), m.kind());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_rescale_unsupported_value() {
        let mut diags = Diagnostics::new();
        let m = metric("mem", &[("state", FieldValue::from("busy")), ("used", FieldValue::I32(3))]);

        let out = rescale(
            &m,
            &factors(&[("state", 100.0), ("used", 2.0)]),
            false,
            &mut diags,
        )
        .unwrap();

        assert_eq!(out.field("state"), Some(&FieldValue::from("busy")));
        assert_eq!(out.field("used"), Some(&FieldValue::I32(6)));
        assert_eq!(
            diags.drain(),
            vec![Diagnostic::UnsupportedValue {
                metric: "mem".into(),
                field: "state".into(),
                factor: 100.0,
                value: FieldValue::from("busy"),
            }]
        );
    }

    #[test]
    fn test_rescale_rebuild_failure() {
        let mut diags = Diagnostics::new();
        let m = metric("mem", &[("used", FieldValue::F64(1e300))]);

        let out = rescale(&m, &factors(&[("used", 1e300)]), false, &mut diags);

        assert!(out.is_none());
        match diags.drain().as_slice() {
            [Diagnostic::RebuildFailed { metric, .. }] => assert_eq!(metric, "mem"),
            other => panic!("unexpected diagnostics {:?}", other),
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn traced(verbose: bool) -> Vec<String> {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();

        let m = metric(
            "mem",
            &[
                ("used_percent", FieldValue::I64(50)),
                ("ratio", FieldValue::F64(1.0)),
                ("state", FieldValue::from("busy")),
            ],
        );
        let f = factors(&[("used_percent", 100.0), ("ratio", 1.0), ("state", 2.0)]);

        tracing::subscriber::with_default(subscriber, || {
            rescale(&m, &f, verbose, &mut Diagnostics::new()).unwrap();
        });

        let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        out.lines()
            .filter(|l| l.contains(" => "))
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_rescale_verbose_trace() {
        #[rustfmt::skip]
        let tests = [
            (true, vec!["[mem.used_percent] 50 * 100 => 5000"]),
            (false, vec![]),
        ];

        for (verbose, expected) in &tests {
            let lines = traced(*verbose);
            assert_eq!(lines.len(), expected.len(), "verbose={}: {:?}", verbose, lines);
            for (line, want) in lines.iter().zip(expected) {
                assert!(line.contains(want), "{:?} lacks {:?}", line, want);
            }
        }
    }
}
