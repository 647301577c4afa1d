//! Width-aware helpers for text that may contain escape sequences.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::style::RESET;

/// CSI sequences, OSC sequences (BEL or ST terminated) and two-byte escapes.
static ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]")
        .expect("escape pattern is valid")
});

/// Remove every escape sequence from `s`.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if s.contains('\x1b') {
        ESCAPE.replace_all(s, "")
    } else {
        Cow::Borrowed(s)
    }
}

/// Display width in terminal cells, ignoring escape sequences.
/// Wide characters (CJK, most emoji) count as two cells.
pub fn display_width(s: &str) -> usize {
    strip_ansi(s).width()
}

/// Cut `s` to at most `max` cells, ending with `marker` when anything was
/// removed.  Escape sequences are copied through without counting, and a
/// reset is appended if any were seen so styling can't leak.
pub fn truncate_cells(s: &str, max: usize, marker: &str) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    let marker_width = marker.width();
    let (budget, marker) = if marker_width <= max {
        (max - marker_width, marker)
    } else {
        (max, "")
    };

    let mut out = String::with_capacity(s.len());
    let mut used = 0;
    let mut styled = false;
    let mut last = 0;
    let mut cut = false;

    'outer: for m in ESCAPE.find_iter(s) {
        for ch in s[last..m.start()].chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                cut = true;
                break 'outer;
            }
            used += w;
            out.push(ch);
        }
        out.push_str(m.as_str());
        styled = true;
        last = m.end();
    }
    if !cut {
        for ch in s[last..].chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            out.push(ch);
        }
    }

    out.push_str(marker);
    if styled {
        out.push_str(RESET);
    }
    out
}
