//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Human readable span of hours: `5h`, `1d 03h`, `12d 00h`.
pub fn hours2readable(hours: i64) -> String {
    let sign = if hours < 0 { "-" } else { "" };
    let h = hours.abs();
    if h < 24 {
        format!("{}{}h", sign, h)
    } else {
        format!("{}{}d {:02}h", sign, h / 24, h % 24)
    }
}

/// `1 row`, `3 rows`.
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}
