//! Terminal formatting helpers and the confirmation prompt. Pure output;
//! nothing here affects control flow beyond the prompt's answer.

use std::io::{self, BufRead, Write};

use chrono::{DateTime, FixedOffset};

pub const BANNER_WIDTH: usize = 80;

pub fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

pub fn rule() -> String {
    "-".repeat(BANNER_WIDTH)
}

/// ISO-8601 timestamp to `YYYY-MM-DD HH:MM:SS +ZZZZ`; unparseable input
/// is shown as-is.
pub fn format_datetime(iso: &str) -> String {
    match DateTime::<FixedOffset>::parse_from_rfc3339(iso) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Human-readable byte size (B through TB, one decimal).
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

/// Truncates for display, appending an ellipsis when text was cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

/// Prompts `Continue? [y/N]` on the given reader. Only `y`/`yes`
/// (case-insensitive) confirm; anything else, including EOF, cancels.
pub fn confirm(input: &mut impl BufRead) -> io::Result<bool> {
    print!("Continue? [y/N]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
