//! Status bar and screens.
//!
//! The bar is a list of [`Widget`]s.  Most widgets are opaque parameter
//! bags forwarded to the framework; the [`TaskList`] is the exception: it
//! formats window titles itself, using [`LabelWidth`] so every entry
//! occupies the same slot width.

use crate::label::LabelWidth;
use crate::theme::Palette;
use log::debug;
use serde::{Deserialize, Serialize};

/// Bar font unless `general.font` says otherwise.
pub const DEFAULT_FONT: &str = "JetBrainsMono NF";
pub const DEFAULT_FONTSIZE: u32 = 10;
/// Task list and systray icon size.
pub const DEFAULT_ICONSIZE: u32 = 16;

/// Font settings applied to every widget that does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetDefaults {
    pub font: String,
    pub fontsize: u32,
    pub padding: u32,
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_FONT, DEFAULT_FONTSIZE)
    }
}

impl WidgetDefaults {
    pub fn new(font: &str, fontsize: u32) -> Self {
        Self {
            font: font.to_string(),
            fontsize,
            padding: 3,
        }
    }
}

/// How a window is currently shown, as far as the task list cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Floating,
    Maximized,
    Minimized,
}

/// Window list entry widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskList {
    pub icon_size: u32,
    pub fontsize: u32,
    pub padding: u32,
    pub highlight_method: String,
    /// Fixed width of every title slot.
    pub label_width: LabelWidth,
    pub urgent_alert_method: String,
    pub urgent_border: String,
    pub rounded: bool,
    pub txt_floating: String,
    pub txt_maximized: String,
    pub txt_minimized: String,
}

impl Default for TaskList {
    fn default() -> Self {
        Self {
            icon_size: DEFAULT_ICONSIZE,
            fontsize: DEFAULT_FONTSIZE,
            padding: 4,
            highlight_method: "block".into(),
            label_width: LabelWidth::default(),
            urgent_alert_method: "border".into(),
            urgent_border: Palette::moonfly().color(1).to_string(),
            rounded: true,
            txt_floating: "🗗 ".into(),
            txt_maximized: "🗖 ".into(),
            txt_minimized: "🗕 ".into(),
        }
    }
}

impl TaskList {
    /// Text shown for one window: state marker, then the fixed-width title.
    pub fn entry_text(&self, title: &str, state: WindowState) -> String {
        let marker: &str = match state {
            WindowState::Normal => "",
            WindowState::Floating => &self.txt_floating,
            WindowState::Maximized => &self.txt_maximized,
            WindowState::Minimized => &self.txt_minimized,
        };
        format!("{}{}", marker, self.label_width.format(title))
    }
}

/// One element of the bar.
///
/// Tagged by `"widget"` on the wire, e.g. `{"widget": "sep", "linewidth": 0,
/// "padding": 10}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    CurrentLayoutIcon {
        scale: f64,
        foreground: String,
        background: String,
        padding: u32,
    },
    Sep {
        linewidth: u32,
        padding: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        foreground: Option<String>,
    },
    GroupBox {
        active: String,
        inactive: String,
        hide_unused: bool,
        rounded: bool,
        highlight_method: String,
        disable_drag: bool,
        use_mouse_wheel: bool,
        foreground: String,
        background: String,
    },
    TaskList(TaskList),
    OpenWeather {
        /// Falls back to `OPENWEATHER_API_KEY` when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        app_key: Option<String>,
        cityid: String,
        format: String,
        metric: bool,
        foreground: String,
    },
    Systray {
        background: String,
        icon_size: u32,
    },
    Cpu {
        update_interval: f64,
        format: String,
        foreground: String,
        padding: u32,
    },
    ThermalZone {
        format: String,
        fgcolor_normal: String,
        foreground: String,
        padding: u32,
    },
    NvidiaSensors {
        format: String,
        foreground: String,
    },
    Clock {
        format: String,
        foreground: String,
    },
    Volume {
        fontsize: u32,
        foreground: String,
        emoji: bool,
        emoji_list: Vec<String>,
        padding: u32,
    },
    TextBox {
        text: String,
        fontsize: u32,
        foreground: String,
    },
    QuickExit,
}

/// Environment variable consulted for the weather widget's key.
pub const WEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";

impl Widget {
    /// Short name used in listings and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Widget::CurrentLayoutIcon { .. } => "current_layout_icon",
            Widget::Sep { .. } => "sep",
            Widget::GroupBox { .. } => "group_box",
            Widget::TaskList(_) => "task_list",
            Widget::OpenWeather { .. } => "open_weather",
            Widget::Systray { .. } => "systray",
            Widget::Cpu { .. } => "cpu",
            Widget::ThermalZone { .. } => "thermal_zone",
            Widget::NvidiaSensors { .. } => "nvidia_sensors",
            Widget::Clock { .. } => "clock",
            Widget::Volume { .. } => "volume",
            Widget::TextBox { .. } => "text_box",
            Widget::QuickExit => "quick_exit",
        }
    }

    /// Every colour this widget declares.
    pub fn colors(&self) -> Vec<&str> {
        match self {
            Widget::CurrentLayoutIcon {
                foreground,
                background,
                ..
            } => vec![foreground.as_str(), background.as_str()],
            Widget::Sep { foreground, .. } => foreground.iter().map(String::as_str).collect(),
            Widget::GroupBox {
                active,
                inactive,
                foreground,
                background,
                ..
            } => vec![
                active.as_str(),
                inactive.as_str(),
                foreground.as_str(),
                background.as_str(),
            ],
            Widget::TaskList(t) => vec![t.urgent_border.as_str()],
            Widget::OpenWeather { foreground, .. }
            | Widget::Cpu { foreground, .. }
            | Widget::NvidiaSensors { foreground, .. }
            | Widget::Clock { foreground, .. }
            | Widget::Volume { foreground, .. }
            | Widget::TextBox { foreground, .. } => vec![foreground.as_str()],
            Widget::ThermalZone {
                fgcolor_normal,
                foreground,
                ..
            } => vec![fgcolor_normal.as_str(), foreground.as_str()],
            Widget::Systray { background, .. } => vec![background.as_str()],
            Widget::QuickExit => vec![],
        }
    }

    /// Fill in the weather key from the environment if the config left it
    /// empty.  Other widgets are unchanged.
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Like [`Widget::resolve_secrets`], reading variables through `lookup`.
    pub fn resolve_secrets_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Widget::OpenWeather { app_key, .. } = self {
            if app_key.is_none() {
                *app_key = lookup(WEATHER_KEY_ENV).filter(|k| !k.is_empty());
                if app_key.is_some() {
                    debug!("weather API key taken from {}", WEATHER_KEY_ENV);
                }
            }
        }
    }
}

/// A bar docked to one screen edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub widgets: Vec<Widget>,
    pub size: u32,
    pub background: String,
    pub margin: u32,
    pub opacity: f64,
    /// Top, right, bottom, left.
    pub border_width: [u32; 4],
}

impl Bar {
    pub fn task_list(&self) -> Option<&TaskList> {
        self.widgets.iter().find_map(|w| match w {
            Widget::TaskList(t) => Some(t),
            _ => None,
        })
    }
}

/// A physical screen and its bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Screen {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Bar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Bar>,
}

impl Screen {
    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.top.iter().chain(self.bottom.iter())
    }

    pub fn bars_mut(&mut self) -> impl Iterator<Item = &mut Bar> {
        self.top.iter_mut().chain(self.bottom.iter_mut())
    }
}

fn sep() -> Widget {
    Widget::Sep {
        linewidth: 0,
        padding: 10,
        foreground: None,
    }
}

/// The full widget list, left to right.
///
/// Sizes follow `fonts` and `icon_size`; the volume icons are drawn four
/// points larger than the text.
pub fn default_widgets(palette: &Palette, fonts: &WidgetDefaults, icon_size: u32) -> Vec<Widget> {
    let fg = palette.foreground.clone();
    let bg = palette.background.clone();
    let task_list = TaskList {
        icon_size,
        fontsize: fonts.fontsize,
        urgent_border: palette.color(1).to_string(),
        ..TaskList::default()
    };

    vec![
        Widget::CurrentLayoutIcon {
            scale: 0.6,
            foreground: palette.color(6).to_string(),
            background: palette.color(6).to_string(),
            padding: 5,
        },
        sep(),
        Widget::GroupBox {
            active: palette.color(2).to_string(),
            inactive: fg.clone(),
            hide_unused: true,
            rounded: true,
            highlight_method: "block".into(),
            disable_drag: true,
            use_mouse_wheel: false,
            foreground: fg.clone(),
            background: bg.clone(),
        },
        sep(),
        Widget::TaskList(task_list),
        Widget::OpenWeather {
            app_key: None,
            cityid: "1277333".into(),
            format: "{icon} {location_city} {main_temp}°".into(),
            metric: true,
            foreground: fg.clone(),
        },
        sep(),
        Widget::Systray {
            background: bg,
            icon_size,
        },
        sep(),
        Widget::Cpu {
            update_interval: 1.0,
            format: "\u{f2db}  {load_percent}%".into(),
            foreground: fg.clone(),
            padding: 5,
        },
        sep(),
        Widget::ThermalZone {
            format: "󰏈  {temp}°C".into(),
            fgcolor_normal: fg.clone(),
            foreground: fg.clone(),
            padding: 5,
        },
        sep(),
        Widget::NvidiaSensors {
            format: "\u{f4bc}  {temp}°C".into(),
            foreground: fg.clone(),
        },
        sep(),
        Widget::Clock {
            format: "\u{f017}  %I:%M %p".into(),
            foreground: fg.clone(),
        },
        sep(),
        Widget::Volume {
            fontsize: fonts.fontsize + 4,
            foreground: fg,
            emoji: true,
            emoji_list: ["󰝟", "\u{f026}", "\u{f027}", "\u{f028}"].iter().map(|s| s.to_string()).collect(),
            padding: 5,
        },
        sep(),
        Widget::Sep {
            linewidth: 1,
            padding: 10,
            foreground: Some(palette.color(5).to_string()),
        },
        sep(),
        Widget::QuickExit,
    ]
}

/// One screen with a translucent top bar.
pub fn default_screens(palette: &Palette, fonts: &WidgetDefaults, icon_size: u32) -> Vec<Screen> {
    vec![Screen {
        top: Some(Bar {
            widgets: default_widgets(palette, fonts, icon_size),
            size: 30,
            background: palette.background.clone(),
            margin: 5,
            opacity: 0.8,
            border_width: [0, 0, 0, 0],
        }),
        bottom: None,
    }]
}
