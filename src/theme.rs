//! Colour palette shared by layouts and bar widgets.

use serde::{Deserialize, Serialize};

/// A named set of colours.
///
/// `colors` is indexed by widgets and layouts (e.g. the focused border is
/// `colors[2]`), so the default palette always has nine entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub colors: Vec<String>,
    pub background: String,
    pub foreground: String,
    pub workspace: String,
    pub chord: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::moonfly()
    }
}

impl Palette {
    /// The moonfly dark theme.
    pub fn moonfly() -> Self {
        let colors = [
            "#323437", // black
            "#ff5454", // red
            "#8cc85f", // green
            "#e3c78a", // yellow
            "#80a0ff", // blue
            "#cf87e8", // purple
            "#79dac8", // cyan
            "#de935f", // orange
            "#949494", // grey
        ];
        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            background: "#080808".into(),
            foreground: "#bdbdbd".into(),
            workspace: "#36c692".into(),
            chord: "#e3c78a".into(),
        }
    }

    /// Colour at `index`, or the foreground colour when out of range.
    pub fn color(&self, index: usize) -> &str {
        self.colors
            .get(index)
            .map(String::as_str)
            .unwrap_or(&self.foreground)
    }

    /// Every `(field, value)` pair whose value is not a valid hex colour.
    pub fn invalid_colors(&self) -> Vec<(String, String)> {
        let named = [
            ("background", &self.background),
            ("foreground", &self.foreground),
            ("workspace", &self.workspace),
            ("chord", &self.chord),
        ];
        let indexed = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("colors[{}]", i), c));

        named
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .chain(indexed)
            .filter(|(_, v)| !is_hex_color(v))
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
