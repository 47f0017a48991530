//! Text Measurement
//!
//! Display widths of text in terminal cells, via `unicode-width`:
//! ASCII is 1 cell, CJK and most emoji 2, control and combining marks 0.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of one char in cells.
pub fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// Display width of a string in cells.
pub fn string_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

/// Width in cells of the first `chars` chars of `text`.
///
/// Used to place the caret, which is tracked in chars.
pub fn width_of_prefix(text: &str, chars: usize) -> u16 {
    text.chars()
        .take(chars)
        .fold(0u16, |acc, c| acc.saturating_add(char_width(c)))
}

/// The chars of `text` from char index `skip`, cut to fit `width` cells.
pub fn visible_slice(text: &str, skip: usize, width: u16) -> String {
    let mut out = String::new();
    let mut used = 0u16;
    for c in text.chars().skip(skip) {
        let w = char_width(c);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out
}

/// Truncate text to fit within `width` cells, ending in an ellipsis when cut.
pub fn truncate_text(text: &str, width: u16) -> String {
    if width == 0 {
        return String::new();
    }
    if string_width(text) <= width {
        return text.to_string();
    }

    let mut result = visible_slice(text, 0, width.saturating_sub(1));
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width_ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("a b c"), 5);
    }

    #[test]
    fn test_string_width_wide() {
        assert_eq!(string_width("日本"), 4);
        assert_eq!(char_width('é'), 1);
    }

    #[test]
    fn test_width_of_prefix() {
        assert_eq!(width_of_prefix("日本語", 2), 4);
        assert_eq!(width_of_prefix("abc", 10), 3);
    }

    #[test]
    fn test_visible_slice() {
        assert_eq!(visible_slice("hello world", 6, 3), "wor");
        assert_eq!(visible_slice("日本語", 0, 3), "日");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 6), "hello…");
        assert_eq!(truncate_text("", 5), "");
        assert_eq!(truncate_text("hello", 5), "hello");
        assert_eq!(truncate_text("hello", 4), "hel…");
    }
}
