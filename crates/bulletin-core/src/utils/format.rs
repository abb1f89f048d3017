/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Single-line preview of post or comment content
pub fn preview(content: &str, max_len: usize) -> String {
    let flattened = content.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_string(&flattened, max_len)
}

/// Format a backend timestamp as `YYYY.MM.DD`
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%Y.%m.%d").to_string()
    } else if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f") {
        // Local date-times without an offset
        dt.format("%Y.%m.%d").to_string()
    } else if date.len() >= 10 && date.is_char_boundary(10) {
        date[..10].replace('-', ".")
    } else {
        date.to_string()
    }
}
