//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Keep the tail of long payloads: `"... <last length chars>"`.
pub fn right_ellipsis(s: &str, length: usize) -> String {
    let count = s.chars().count();
    if count < length.saturating_sub(1) {
        return s.to_string();
    }
    let tail: String = s.chars().skip(count.saturating_sub(length)).collect();
    format!("... {tail}")
}

/// Pad to `width` terminal columns, ignoring ANSI escapes.
pub fn pad_visible(s: &str, width: usize) -> String {
    let visible = UnicodeWidthStr::width(strip_ansi(s).as_str());
    format!("{s}{}", " ".repeat(width.saturating_sub(visible)))
}

pub fn strip_ansi(s: &str) -> String {
    use std::sync::LazyLock;
    static ANSI: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern")
    });
    ANSI.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_payload_is_untouched() {
        assert_eq!(right_ellipsis("abc", 10), "abc");
    }

    #[test]
    fn long_payload_keeps_tail() {
        assert_eq!(right_ellipsis("0123456789abcdef", 4), "... cdef");
    }

    #[test]
    fn padding_ignores_colour_codes() {
        let coloured = format!("{}ok{}", "\x1b[32m", "\x1b[0m");
        let padded = pad_visible(&coloured, 4);
        assert_eq!(strip_ansi(&padded), "ok  ");
    }
}
