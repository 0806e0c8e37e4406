//! Fixed-width label formatting.
//!
//! Status-bar slots such as task-list entries expect text of a constant
//! width so the bar does not shift as window titles change.  A label longer
//! than the slot is cut and terminated with [`SUFFIX_MARKER`]; a shorter one
//! is padded on the right with spaces.
//!
//! Widths are measured in `char`s (Unicode scalar values), not bytes, so
//! multi-byte titles are never split inside a code point.
//!
//! ```
//! use tilerc::label::{format_label, DEFAULT_LABEL_WIDTH};
//!
//! let out = format_label("Mozilla Firefox - Issue Tracker", DEFAULT_LABEL_WIDTH).unwrap();
//! assert_eq!(out, "Mozilla Firefox - Issue Tra...");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Appended to labels that had to be cut.
pub const SUFFIX_MARKER: &str = "...";

/// Width used by the task list unless configured otherwise.
pub const DEFAULT_LABEL_WIDTH: usize = 30;

/// Widest slot accepted.  No bar is this wide; the cap keeps padding
/// allocations bounded.
pub const MAX_LABEL_WIDTH: usize = u16::MAX as usize;

/// Length of [`SUFFIX_MARKER`] in chars.  Also the smallest usable width.
const MARKER_LEN: usize = 3;

/// Error from formatting a label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("label width {0} is smaller than the suffix marker (3 chars)")]
    WidthTooSmall(usize),
    #[error("label width {0} exceeds the maximum of {max}", max = MAX_LABEL_WIDTH)]
    WidthTooLarge(usize),
}

/// Truncate or pad `text` to exactly `width` chars.
///
/// Returns [`LabelError::WidthTooSmall`] when `width` cannot hold the
/// suffix marker.
pub fn format_label(text: &str, width: usize) -> Result<String, LabelError> {
    Ok(LabelWidth::new(width)?.format(text))
}

/// A label width that is known to fit the suffix marker.
///
/// Deserializes from a plain integer and rejects values below 3 or above
/// [`MAX_LABEL_WIDTH`], so a
/// widget holding a `LabelWidth` can format infallibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct LabelWidth(usize);

impl LabelWidth {
    /// Validate `width`.
    pub fn new(width: usize) -> Result<Self, LabelError> {
        if width < MARKER_LEN {
            return Err(LabelError::WidthTooSmall(width));
        }
        if width > MAX_LABEL_WIDTH {
            return Err(LabelError::WidthTooLarge(width));
        }
        Ok(Self(width))
    }

    /// The width in chars.
    pub fn get(self) -> usize {
        self.0
    }

    /// Truncate or pad `text` to exactly this width.
    pub fn format(self, text: &str) -> String {
        let width = self.0;
        let len = text.chars().count();

        if len > width {
            let mut out: String = text.chars().take(width - MARKER_LEN).collect();
            out.push_str(SUFFIX_MARKER);
            out
        } else {
            let mut out = String::with_capacity(text.len() + (width - len));
            out.push_str(text);
            out.extend(std::iter::repeat(' ').take(width - len));
            out
        }
    }
}

impl Default for LabelWidth {
    fn default() -> Self {
        Self(DEFAULT_LABEL_WIDTH)
    }
}

impl TryFrom<usize> for LabelWidth {
    type Error = LabelError;

    fn try_from(width: usize) -> Result<Self, LabelError> {
        Self::new(width)
    }
}

impl From<LabelWidth> for usize {
    fn from(w: LabelWidth) -> usize {
        w.0
    }
}

impl fmt::Display for LabelWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn short_text_is_padded() {
        let out = format_label("vim", DEFAULT_LABEL_WIDTH).unwrap();
        assert_eq!(chars(&out), 30);
        assert!(out.starts_with("vim"));
        assert_eq!(&out[3..], " ".repeat(27));
    }

    #[test]
    fn empty_text_is_all_spaces() {
        assert_eq!(format_label("", 30).unwrap(), " ".repeat(30));
    }

    #[test]
    fn exact_width_is_unchanged() {
        assert_eq!(format_label("abc", 3).unwrap(), "abc");
        let title = "x".repeat(30);
        assert_eq!(format_label(&title, 30).unwrap(), title);
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        assert_eq!(format_label("abcdefghij", 5).unwrap(), "ab...");
        assert_eq!(
            format_label("Mozilla Firefox - Issue Tracker", 30).unwrap(),
            "Mozilla Firefox - Issue Tra..."
        );
    }

    #[test]
    fn width_three_keeps_only_marker() {
        assert_eq!(format_label("abcd", 3).unwrap(), "...");
    }

    #[test]
    fn output_length_matches_width() {
        let inputs = ["", "a", "hello world", "Mozilla Firefox - Issue Tracker"];
        for w in 3..40 {
            for text in inputs {
                let out = format_label(text, w).unwrap();
                assert_eq!(chars(&out), w, "text {:?} width {}", text, w);
            }
        }
    }

    #[test]
    fn reformatting_is_a_no_op() {
        for w in [3, 5, 12, 30] {
            let once = format_label("Mozilla Firefox - Issue Tracker", w).unwrap();
            let twice = format_label(&once, w).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn multibyte_titles_are_cut_on_char_boundaries() {
        let out = format_label("日本語のウィンドウタイトル", 8).unwrap();
        assert_eq!(out, "日本語のウ...");
        assert_eq!(chars(&out), 8);

        let padded = format_label("ñandú", 7).unwrap();
        assert_eq!(padded, "ñandú  ");
    }

    #[test]
    fn width_below_marker_is_rejected() {
        for w in 0..3 {
            assert_eq!(format_label("abc", w), Err(LabelError::WidthTooSmall(w)));
        }
        assert!(LabelWidth::new(2).is_err());
    }

    #[test]
    fn huge_width_is_rejected() {
        assert_eq!(
            format_label("x", usize::MAX),
            Err(LabelError::WidthTooLarge(usize::MAX))
        );
        assert_eq!(chars(&format_label("x", MAX_LABEL_WIDTH).unwrap()), MAX_LABEL_WIDTH);
        assert!(serde_json::from_str::<LabelWidth>("70000").is_err());
    }

    #[test]
    fn label_width_deserializes_with_validation() {
        let w: LabelWidth = serde_json::from_str("12").unwrap();
        assert_eq!(w.get(), 12);
        assert!(serde_json::from_str::<LabelWidth>("2").is_err());
        assert_eq!(serde_json::to_string(&w).unwrap(), "12");
    }

    #[test]
    fn default_label_width_is_thirty() {
        assert_eq!(LabelWidth::default().get(), DEFAULT_LABEL_WIDTH);
    }
}
