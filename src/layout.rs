//! Layouts, layout theme and floating window rules.

use crate::theme::Palette;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tiling algorithms the framework provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Columns,
    MonadTall,
    MonadWide,
    Floating,
    RatioTile,
    Max,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutKind::Columns => "columns",
            LayoutKind::MonadTall => "monadtall",
            LayoutKind::MonadWide => "monadwide",
            LayoutKind::Floating => "floating",
            LayoutKind::RatioTile => "ratiotile",
            LayoutKind::Max => "max",
        };
        f.write_str(name)
    }
}

/// Border and gap settings shared by every tiling layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTheme {
    pub margin: u32,
    pub border_width: u32,
    pub border_focus: String,
    pub border_normal: String,
}

impl LayoutTheme {
    /// 5px gaps, 1px borders, focused border in `colors[2]`.
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            margin: 5,
            border_width: 1,
            border_focus: palette.color(2).to_string(),
            border_normal: palette.background.clone(),
        }
    }
}

/// One entry of the layout cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub kind: LayoutKind,
    #[serde(flatten)]
    pub theme: LayoutTheme,
}

/// Columns, then monad-wide.
pub fn default_layouts(palette: &Palette) -> Vec<Layout> {
    let theme = LayoutTheme::from_palette(palette);
    [LayoutKind::Columns, LayoutKind::MonadWide]
        .into_iter()
        .map(|kind| Layout {
            kind,
            theme: theme.clone(),
        })
        .collect()
}

/// X11 window properties a [`Match`] can test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowProps {
    /// `WM_CLASS` entries (instance and class).
    pub wm_class: Vec<String>,
    pub title: String,
    /// `_NET_WM_WINDOW_TYPE`, lowercased without prefix (`"dialog"`).
    pub wm_type: String,
}

/// A window rule.  Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Match {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wm_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wm_type: Option<String>,
}

impl Match {
    pub fn wm_class(class: &str) -> Self {
        Self {
            wm_class: Some(class.into()),
            ..Self::default()
        }
    }

    pub fn title(title: &str) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn wm_type(wm_type: &str) -> Self {
        Self {
            wm_type: Some(wm_type.into()),
            ..Self::default()
        }
    }

    /// A rule with no fields set.  Would match every window.
    pub fn is_empty(&self) -> bool {
        self.wm_class.is_none() && self.title.is_none() && self.wm_type.is_none()
    }

    pub fn matches(&self, window: &WindowProps) -> bool {
        if self.is_empty() {
            return false;
        }
        let class_ok = self
            .wm_class
            .as_ref()
            .map_or(true, |c| window.wm_class.iter().any(|w| w == c));
        let title_ok = self.title.as_ref().map_or(true, |t| *t == window.title);
        let type_ok = self.wm_type.as_ref().map_or(true, |t| *t == window.wm_type);
        class_ok && title_ok && type_ok
    }
}

/// Rules the framework floats by default: transient window types and a few
/// well-known progress / confirmation dialogs.
pub fn default_float_rules() -> Vec<Match> {
    let types = ["utility", "notification", "toolbar", "splash", "dialog"];
    let classes = [
        "file_progress",
        "confirm",
        "dialog",
        "download",
        "error",
        "notification",
        "splash",
        "toolbar",
    ];
    types
        .into_iter()
        .map(Match::wm_type)
        .chain(classes.into_iter().map(Match::wm_class))
        .collect()
}

/// Floating layout: framework defaults plus personal rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingConfig {
    pub float_rules: Vec<Match>,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        let mut float_rules = default_float_rules();
        float_rules.extend(
            ["confirmreset", "makebranch", "maketag", "ssh-askpass"]
                .into_iter()
                .map(Match::wm_class),
        );
        float_rules.extend(
            ["branchdialog", "pinentry", "Lxappearance", "galculator"]
                .into_iter()
                .map(Match::title),
        );
        Self { float_rules }
    }
}

impl FloatingConfig {
    /// Whether `window` should start floating.
    pub fn should_float(&self, window: &WindowProps) -> bool {
        self.float_rules.iter().any(|r| r.matches(window))
    }
}
