//! Small text helpers for the TUI.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to at most `width` terminal columns, ending with an
/// ellipsis if anything was cut. Wide characters (CJK, emoji) count as two
/// columns and are never split.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let budget = width - 1; // room for the ellipsis
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
