use chrono::prelude::*;

// Unix timestamp in nanoseconds.
pub type Timestamp = i64;

pub trait TimestampTrait {
    fn now() -> Self;
    fn to_string_rfc3339(&self) -> String;
}

impl TimestampTrait for Timestamp {
    fn now() -> Self {
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    }

    fn to_string_rfc3339(&self) -> String {
        Utc.timestamp_nanos(*self)
            .to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_rfc3339() {
        let tests = [
            (0, "1970-01-01T00:00:00Z"),
            (1_622_104_500_000_000_000, "2021-05-27T08:35:00Z"),
            (1_622_104_500_123_000_000, "2021-05-27T08:35:00.123Z"),
        ];

        for (ts, expected) in &tests {
            assert_eq!(ts.to_string_rfc3339(), *expected, "while formatting {}", ts);
        }
    }

    #[test]
    fn test_now_is_after_2021() {
        assert!(<Timestamp as TimestampTrait>::now() > 1_622_104_500_000_000_000);
    }
}
