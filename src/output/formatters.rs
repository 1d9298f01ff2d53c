use anyhow::Result;
use serde_json::Value;

use crate::utils::format_timestamp;

/// Pretty-printed payload, unchanged
pub fn format_as_json(payload: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(payload)?)
}

/// Flatten a `json3` timed-text document into one line per caption event.
///
/// Events without text (window setup, line breaks) are skipped.
pub fn format_as_text(payload: &Value, include_timestamps: bool) -> String {
    let Some(events) = payload["events"].as_array() else {
        return String::new();
    };

    events
        .iter()
        .filter_map(|event| {
            let text: String = event["segs"]
                .as_array()?
                .iter()
                .filter_map(|seg| seg["utf8"].as_str())
                .collect();
            let text = text.replace('\n', " ");
            let text = text.trim();

            if text.is_empty() {
                return None;
            }

            if include_timestamps {
                let start = event["tStartMs"].as_u64().unwrap_or(0);
                Some(format!("[{}] {}", format_timestamp(start), text))
            } else {
                Some(text.to_string())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 200000, "id": 1, "wpWinPosId": 1},
                {"tStartMs": 1200, "dDurationMs": 2000, "segs": [{"utf8": "Hello"}, {"utf8": " there"}]},
                {"tStartMs": 3200, "dDurationMs": 10, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 61500, "dDurationMs": 1800, "segs": [{"utf8": "second\nline"}]}
            ]
        })
    }

    #[test]
    fn test_format_as_text() {
        assert_eq!(format_as_text(&sample(), false), "Hello there\nsecond line");
    }

    #[test]
    fn test_format_as_text_with_timestamps() {
        assert_eq!(
            format_as_text(&sample(), true),
            "[00:01.200] Hello there\n[01:01.500] second line"
        );
    }

    #[test]
    fn test_format_as_text_without_events() {
        assert_eq!(format_as_text(&json!({"foo": 1}), true), "");
    }

    #[test]
    fn test_format_as_json_keeps_payload() {
        let rendered = format_as_json(&sample()).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, sample());
    }
}
