//! Text editing - caret movement and single-line edits.
//!
//! Pure functions over `(value, caret)`; the controller owns where the
//! caret lives and writes changed values back through the form. Caret
//! positions are counted in chars, not bytes.

use crate::form::InputKind;
use crate::state::keyboard::KeyboardEvent;

/// What a key did to an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// Not an editing key.
    Unhandled,
    /// Key consumed without changing anything (e.g. filtered character).
    Ignored,
    /// Only the caret moved.
    Moved(usize),
    /// The value changed.
    Changed { value: String, caret: usize },
}

// =============================================================================
// Word Boundary Helpers
// =============================================================================

/// Start of the word before `pos`. Words are runs of alphanumerics.
pub fn find_word_start(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut i = pos.min(chars.len());

    while i > 0 && !chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    while i > 0 && chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    i
}

/// End of the word after `pos`.
pub fn find_word_end(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut i = pos.min(len);

    while i < len && !chars[i].is_alphanumeric() {
        i += 1;
    }
    while i < len && chars[i].is_alphanumeric() {
        i += 1;
    }
    i
}

// =============================================================================
// Edits
// =============================================================================

fn splice(text: &str, range: std::ops::Range<usize>, insert: &str) -> String {
    let mut out: String = text.chars().take(range.start).collect();
    out.push_str(insert);
    out.extend(text.chars().skip(range.end));
    out
}

/// Insert `ch` at `caret`, honouring the input kind's filter and length cap.
pub fn insert_char(value: &str, caret: usize, kind: InputKind, ch: char) -> EditResult {
    if !kind.accepts(ch) {
        return EditResult::Ignored;
    }
    let len = value.chars().count();
    if kind.max_length().is_some_and(|max| len >= max) {
        return EditResult::Ignored;
    }
    let caret = caret.min(len);
    EditResult::Changed {
        value: splice(value, caret..caret, ch.encode_utf8(&mut [0; 4])),
        caret: caret + 1,
    }
}

/// Apply an editing key to `value`.
pub fn apply_key(value: &str, caret: usize, kind: InputKind, event: &KeyboardEvent) -> EditResult {
    let len = value.chars().count();
    let pos = caret.min(len);
    let ctrl = event.modifiers.ctrl;

    if event.is_ctrl('u') {
        return if value.is_empty() {
            EditResult::Ignored
        } else {
            EditResult::Changed { value: String::new(), caret: 0 }
        };
    }

    match event.key.as_str() {
        "ArrowLeft" if ctrl => EditResult::Moved(find_word_start(value, pos)),
        "ArrowRight" if ctrl => EditResult::Moved(find_word_end(value, pos)),
        "ArrowLeft" => EditResult::Moved(pos.saturating_sub(1)),
        "ArrowRight" => EditResult::Moved((pos + 1).min(len)),
        "Home" => EditResult::Moved(0),
        "End" => EditResult::Moved(len),
        "Backspace" if pos == 0 => EditResult::Ignored,
        "Backspace" => {
            let start = if ctrl { find_word_start(value, pos) } else { pos - 1 };
            EditResult::Changed {
                value: splice(value, start..pos, ""),
                caret: start,
            }
        }
        "Delete" if pos >= len => EditResult::Ignored,
        "Delete" => {
            let end = if ctrl { find_word_end(value, pos) } else { pos + 1 };
            EditResult::Changed {
                value: splice(value, pos..end, ""),
                caret: pos,
            }
        }
        _ => match event.typed_char() {
            Some(ch) => insert_char(value, pos, kind, ch),
            None => EditResult::Unhandled,
        },
    }
}

// =============================================================================
// Scroll Offset Helpers
// =============================================================================

/// Adjust a horizontal scroll offset so the caret stays inside
/// `visible_width` columns.
pub fn ensure_cursor_visible(cursor_pos: usize, scroll_offset: usize, visible_width: usize) -> usize {
    if visible_width == 0 {
        return cursor_pos;
    }
    if cursor_pos < scroll_offset {
        cursor_pos
    } else if cursor_pos >= scroll_offset + visible_width {
        cursor_pos + 1 - visible_width
    } else {
        scroll_offset
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keyboard::Modifiers;

    fn key(k: &str) -> KeyboardEvent {
        KeyboardEvent::new(k)
    }

    fn ctrl(k: &str) -> KeyboardEvent {
        KeyboardEvent::with_modifiers(k, Modifiers::ctrl())
    }

    fn changed(value: &str, caret: usize) -> EditResult {
        EditResult::Changed { value: value.to_string(), caret }
    }

    #[test]
    fn test_find_word_start_basic() {
        assert_eq!(find_word_start("hello world", 11), 6);
        assert_eq!(find_word_start("hello world", 6), 0);
        assert_eq!(find_word_start("hello world", 0), 0);
        assert_eq!(find_word_start("ada@example.com", 15), 12);
    }

    #[test]
    fn test_find_word_end_basic() {
        assert_eq!(find_word_end("hello world", 0), 5);
        assert_eq!(find_word_end("hello world", 5), 11);
        assert_eq!(find_word_end("hello", 99), 5);
    }

    #[test]
    fn test_insert_in_middle() {
        assert_eq!(apply_key("Aa", 1, InputKind::Text, &key("d")), changed("Ada", 2));
    }

    #[test]
    fn test_insert_unicode() {
        assert_eq!(apply_key("Zoë", 3, InputKind::Text, &key("!")), changed("Zoë!", 4));
        assert_eq!(apply_key("oë", 1, InputKind::Text, &key("é")), changed("oéë", 2));
    }

    #[test]
    fn test_number_filter_on_typing() {
        assert_eq!(apply_key("1", 1, InputKind::Number, &key("x")), EditResult::Ignored);
        assert_eq!(apply_key("1", 1, InputKind::Number, &key("5")), changed("15", 2));
    }

    #[test]
    fn test_date_max_length() {
        let full = "1815-12-10";
        assert_eq!(apply_key(full, 10, InputKind::Date, &key("1")), EditResult::Ignored);
        assert_eq!(apply_key("1815", 4, InputKind::Date, &key("-")), changed("1815-", 5));
        assert_eq!(apply_key("1815", 4, InputKind::Date, &key("/")), EditResult::Ignored);
    }

    #[test]
    fn test_backspace_and_delete() {
        assert_eq!(apply_key("abc", 2, InputKind::Text, &key("Backspace")), changed("ac", 1));
        assert_eq!(apply_key("abc", 0, InputKind::Text, &key("Backspace")), EditResult::Ignored);
        assert_eq!(apply_key("abc", 1, InputKind::Text, &key("Delete")), changed("ac", 1));
        assert_eq!(apply_key("abc", 3, InputKind::Text, &key("Delete")), EditResult::Ignored);
    }

    #[test]
    fn test_word_deletion() {
        assert_eq!(
            apply_key("Ada Lovelace", 12, InputKind::Text, &ctrl("Backspace")),
            changed("Ada ", 4)
        );
        assert_eq!(
            apply_key("Ada Lovelace", 0, InputKind::Text, &ctrl("Delete")),
            changed(" Lovelace", 0)
        );
    }

    #[test]
    fn test_caret_movement() {
        assert_eq!(apply_key("abc", 1, InputKind::Text, &key("ArrowLeft")), EditResult::Moved(0));
        assert_eq!(apply_key("abc", 0, InputKind::Text, &key("ArrowLeft")), EditResult::Moved(0));
        assert_eq!(apply_key("abc", 3, InputKind::Text, &key("ArrowRight")), EditResult::Moved(3));
        assert_eq!(apply_key("abc", 1, InputKind::Text, &key("Home")), EditResult::Moved(0));
        assert_eq!(apply_key("abc", 1, InputKind::Text, &key("End")), EditResult::Moved(3));
        assert_eq!(
            apply_key("one two", 0, InputKind::Text, &ctrl("ArrowRight")),
            EditResult::Moved(3)
        );
    }

    #[test]
    fn test_clear_line() {
        assert_eq!(apply_key("abc", 2, InputKind::Text, &ctrl("u")), changed("", 0));
        assert_eq!(apply_key("", 0, InputKind::Text, &ctrl("u")), EditResult::Ignored);
    }

    #[test]
    fn test_caret_clamped_to_value() {
        assert_eq!(apply_key("ab", 9, InputKind::Text, &key("c")), changed("abc", 3));
    }

    #[test]
    fn test_unhandled_keys() {
        assert_eq!(apply_key("a", 0, InputKind::Text, &key("Tab")), EditResult::Unhandled);
        assert_eq!(apply_key("a", 0, InputKind::Text, &ctrl("c")), EditResult::Unhandled);
    }

    #[test]
    fn test_ensure_cursor_visible() {
        assert_eq!(ensure_cursor_visible(5, 0, 10), 0);
        assert_eq!(ensure_cursor_visible(12, 0, 10), 3);
        assert_eq!(ensure_cursor_visible(2, 5, 10), 2);
    }
}
