use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine<'a> {
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    level: LogLevel,
    event: &'a str,
    details: Value,
}

/// Writes one JSON log line to stderr.
pub fn emit_log(level: LogLevel, event: &str, details: Value) {
    match format_log_line(level, event, details) {
        Ok(line) => eprintln!("{line}"),
        Err(error) => eprintln!("[log] failed to serialize event {event}: {error}"),
    }
}

pub fn format_log_line(
    level: LogLevel,
    event: &str,
    details: Value,
) -> Result<String, serde_json::Error> {
    let line = StructuredLogLine {
        timestamp_ms: Utc::now().timestamp_millis().max(0) as u64,
        level,
        event,
        details,
    };
    serde_json::to_string(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn log_line_carries_level_event_and_details() {
        let text = format_log_line(LogLevel::Warn, "restore_failed", json!({ "scope": "main" }))
            .expect("log line should serialize");
        let value: Value = serde_json::from_str(&text).expect("log line is json");
        assert_eq!(value["level"], "warn");
        assert_eq!(value["event"], "restore_failed");
        assert_eq!(value["details"]["scope"], "main");
        assert!(value["timestampMs"].as_u64().is_some_and(|ms| ms > 0));
    }
}
