use url::Url;

/// Hide the password of a URL so it can be logged.
///
/// Input that does not parse as a URL is returned unchanged.
pub fn redact_url_credentials(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    if parsed.password().is_some() && parsed.set_password(Some("****")).is_err() {
        return raw.to_string();
    }

    parsed.to_string()
}

/// Format a millisecond offset as `HH:MM:SS.mmm`, dropping the hours when zero
pub fn format_timestamp(millis: u64) -> String {
    let total_seconds = millis / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    let ms = millis % 1000;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, secs, ms)
    }
}
