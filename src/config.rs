//! Top-level configuration.
//!
//! The configuration is loaded from a JSON file (`--config <path>`, or
//! `$XDG_CONFIG_HOME/tilerc/config.json`).  Every section is optional: a
//! minimal `{}` file is valid and yields the compiled-in personal setup.
//! A section that *is* present replaces the default wholesale; lists are
//! not merged.  Sections left out are rebuilt from the loaded `general`
//! and `palette`, so `{"general": {"modifier": "mod1"}}` moves every
//! default binding to `mod1`.
//!
//! # Example
//!
//! ```json
//! {
//!   "general": { "terminal": "alacritty" },
//!   "groups": [{ "name": "web" }, { "name": "code" }],
//!   "behavior": { "follow_mouse_focus": false }
//! }
//! ```
//!
//! Spawn commands may use `{terminal}`, `{browser}`, `{launcher}` and
//! `{lofi}`; they are expanded from [`General`] by
//! [`Config::resolved_keys`], so changing the terminal in `general` is
//! enough to retarget every key that launches it.

use crate::action::{Action, Direction};
use crate::bar::{
    default_screens, Screen, TaskList, Widget, WidgetDefaults, DEFAULT_FONT, DEFAULT_FONTSIZE,
    DEFAULT_ICONSIZE,
};
use crate::groups::{default_groups, default_scratchpad, group_keys, Group, ScratchPad};
use crate::hooks::{expand_home, Autostart};
use crate::keys::{find_conflicts, Binding, Conflict, Key, KeyChord, Modifier};
use crate::layout::{default_layouts, FloatingConfig, Layout};
use crate::mouse::{default_mouse, MouseBinding};
use crate::theme::{is_hex_color, Palette};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

/// Programs and fonts used throughout the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    /// Modifier for group and scratchpad keys.
    pub modifier: Modifier,
    pub terminal: String,
    pub browser: String,
    pub launcher: String,
    /// Script started by the media chord.  `~` is expanded.
    pub lofi: String,
    pub font: String,
    pub fontsize: u32,
    pub iconsize: u32,
}

impl Default for General {
    fn default() -> Self {
        Self {
            modifier: Modifier::Mod4,
            terminal: "kitty".into(),
            browser: "thorium-browser".into(),
            launcher: "rofi drun -show drun -config ~/.config/rofi/rofidmenu.rasi".into(),
            lofi: "~/.config/qtile/scripts/lofi.sh".into(),
            font: DEFAULT_FONT.into(),
            fontsize: DEFAULT_FONTSIZE,
            iconsize: DEFAULT_ICONSIZE,
        }
    }
}

impl General {
    /// Widget font settings derived from `font` and `fontsize`.
    pub fn widget_defaults(&self) -> WidgetDefaults {
        WidgetDefaults::new(&self.font, self.fontsize)
    }

    /// Value of a spawn placeholder, `None` if the name is unknown.
    fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "terminal" => Some(self.terminal.clone()),
            "browser" => Some(self.browser.clone()),
            "launcher" => Some(self.launcher.clone()),
            "lofi" => Some(expand_home(&self.lofi).to_string_lossy().into_owned()),
            _ => None,
        }
    }

    /// Expand every `{name}` in `cmd`.
    ///
    /// Braces that do not enclose a lowercase identifier (e.g. `awk '{print}'`
    /// with a space, or a lone `{`) are left alone.  Returns the first
    /// unknown placeholder name as the error.
    pub fn expand(&self, cmd: &str) -> Result<String, String> {
        let mut out = String::with_capacity(cmd.len());
        let mut rest = cmd;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}');
            let name = close.map(|c| &after[..c]);
            match name {
                Some(n) if is_placeholder_name(n) => {
                    let value = self.placeholder(n).ok_or_else(|| n.to_string())?;
                    out.push_str(&value);
                    rest = &after[n.len() + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

/// What the framework does when a window asks to be activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusOnActivation {
    /// Focus if the window is on the current group, otherwise mark urgent.
    Smart,
    Focus,
    Urgent,
    Never,
}

/// Global window-manager flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Behavior {
    pub follow_mouse_focus: bool,
    pub bring_front_click: bool,
    pub floats_kept_above: bool,
    pub cursor_warp: bool,
    pub auto_fullscreen: bool,
    pub focus_on_window_activation: FocusOnActivation,
    pub reconfigure_screens: bool,
    /// Let applications (games) minimise themselves on focus loss.
    pub auto_minimize: bool,
    /// Name reported to clients.  `"LG3D"` keeps Java toolkits happy.
    pub wmname: String,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            follow_mouse_focus: true,
            bring_front_click: false,
            floats_kept_above: true,
            cursor_warp: false,
            auto_fullscreen: true,
            focus_on_window_activation: FocusOnActivation::Smart,
            reconfigure_screens: true,
            auto_minimize: true,
            wmname: "LG3D".into(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    pub general: General,
    pub palette: Palette,
    /// Hand-written bindings.  Group and scratchpad keys are derived and
    /// appended by [`Config::resolved_keys`].
    pub keys: Vec<Binding>,
    pub groups: Vec<Group>,
    pub scratchpads: Vec<ScratchPad>,
    pub layouts: Vec<Layout>,
    pub floating: FloatingConfig,
    pub mouse: Vec<MouseBinding>,
    pub widget_defaults: WidgetDefaults,
    pub screens: Vec<Screen>,
    pub behavior: Behavior,
    pub autostart: Autostart,
}

impl Default for Config {
    fn default() -> Self {
        Self::derived(General::default(), Palette::default())
    }
}

impl Config {
    /// Every section built from `general` and `palette`.
    pub fn derived(general: General, palette: Palette) -> Self {
        Self {
            keys: default_keys(general.modifier),
            groups: default_groups(),
            scratchpads: vec![default_scratchpad()],
            layouts: default_layouts(&palette),
            floating: FloatingConfig::default(),
            mouse: default_mouse(general.modifier),
            widget_defaults: general.widget_defaults(),
            screens: default_screens(&palette, &general.widget_defaults(), general.iconsize),
            behavior: Behavior::default(),
            autostart: Autostart::default(),
            general,
            palette,
        }
    }
}

/// On-disk form of [`Config`]: sections the file leaves out are `None`.
#[derive(Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    general: General,
    palette: Palette,
    keys: Option<Vec<Binding>>,
    groups: Option<Vec<Group>>,
    scratchpads: Option<Vec<ScratchPad>>,
    layouts: Option<Vec<Layout>>,
    floating: Option<FloatingConfig>,
    mouse: Option<Vec<MouseBinding>>,
    widget_defaults: Option<WidgetDefaults>,
    screens: Option<Vec<Screen>>,
    behavior: Option<Behavior>,
    autostart: Option<Autostart>,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let d = Config::derived(file.general, file.palette);
        Config {
            keys: file.keys.unwrap_or(d.keys),
            groups: file.groups.unwrap_or(d.groups),
            scratchpads: file.scratchpads.unwrap_or(d.scratchpads),
            layouts: file.layouts.unwrap_or(d.layouts),
            floating: file.floating.unwrap_or(d.floating),
            mouse: file.mouse.unwrap_or(d.mouse),
            widget_defaults: file.widget_defaults.unwrap_or(d.widget_defaults),
            screens: file.screens.unwrap_or(d.screens),
            behavior: file.behavior.unwrap_or(d.behavior),
            autostart: file.autostart.unwrap_or(d.autostart),
            general: d.general,
            palette: d.palette,
        }
    }
}

/// Window navigation, layout control, launchers and two chords.
pub fn default_keys(m: Modifier) -> Vec<Binding> {
    use Direction::*;
    use Modifier::{Control, Shift};

    let mut keys = Vec::new();
    for (key, dir) in [("h", Left), ("l", Right), ("j", Down), ("k", Up)] {
        keys.push(Key::new(&[m], key, Action::Focus(dir), &format!("Move focus {}", dir)));
        keys.push(Key::new(
            &[m, Shift],
            key,
            Action::Shuffle(dir),
            &format!("Move window {}", dir),
        ));
        keys.push(Key::new(
            &[m, Control],
            key,
            Action::Grow(dir),
            &format!("Grow window {}", dir),
        ));
    }

    let spawn = |cmd: &str| Action::Spawn(cmd.to_string());
    keys.extend([
        Key::new(&[m], "space", Action::FocusNext, "Move window focus to other window"),
        Key::new(&[m], "n", Action::Normalize, "Reset all window sizes"),
        Key::new(
            &[m, Shift],
            "Return",
            Action::ToggleSplit,
            "Toggle split and unsplit sides of stack",
        ),
        Key::new(&[m], "Return", spawn("{terminal}"), "Launch terminal"),
        Key::new(&[m], "Tab", Action::NextLayout, "Toggle between layouts"),
        Key::new(&[m, Shift], "w", Action::KillWindow, "Kill focused window"),
        Key::new(&[m, Shift], "f", Action::ToggleFullscreen, "Toggle fullscreen"),
        Key::new(&[m, Shift], "t", Action::ToggleFloating, "Toggle floating window"),
        Key::new(&[m], "b", Action::HideShowBar, "Toggle bar"),
        Key::new(&[m, Shift], "r", Action::ResetLayout, "Reset layout"),
        Key::new(&[m, Shift], "s", spawn("flameshot gui"), "Screenshot"),
        Key::new(&[m, Control], "r", Action::ReloadConfig, "Reload the config"),
        Key::new(&[m, Control], "q", Action::Shutdown, "Shutdown"),
        Key::new(&[m], "d", spawn("{launcher}"), "Spawn Launcher"),
    ]);

    let mut bindings: Vec<Binding> = keys.into_iter().map(Binding::Key).collect();

    bindings.push(
        KeyChord::new(
            &[m],
            "f",
            vec![
                Key::new(&[], "b", spawn("jumpapp {browser}"), "Jump to Browser"),
                Key::new(&[], "q", spawn("jumpapp qutebrowser"), "Jump to Qutebrowser"),
                Key::new(&[], "n", spawn("jumpapp logseq"), "Jump to LogSeq"),
                Key::new(&[], "m", spawn("jumpapp mpv"), "Jump to MPV"),
                Key::new(&[], "c", spawn("jumpapp code"), "Jump to VS Code"),
            ],
            "Find Applications",
        )
        .into(),
    );
    bindings.push(
        KeyChord::new(
            &[m],
            "p",
            vec![
                Key::new(&[], "n", spawn("playerctl next"), "Play Next"),
                Key::new(
                    &[],
                    "p",
                    spawn("playerctl --all-players play-pause"),
                    "Toggle Play Pause",
                ),
                Key::new(&[], "b", spawn("playerctl previous"), "Play Previous"),
                Key::new(&[], "l", spawn("{lofi}"), "Run Lofi Music"),
            ],
            "Media Controls",
        )
        .into(),
    );
    bindings
}

/// How serious a [`Problem`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration is usable but something will not work.
    Warning,
    Error,
}

/// One finding from [`Config::check`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Problem {
    #[error("{0}")]
    Conflict(Conflict),
    #[error("{combo}: unknown placeholder {{{name}}}")]
    UnknownPlaceholder { combo: String, name: String },
    #[error("{combo}: unknown group {group:?}")]
    UnknownGroup { combo: String, group: String },
    #[error("{combo}: unknown scratchpad {scratchpad:?}")]
    UnknownScratchpad { combo: String, scratchpad: String },
    #[error("{combo}: scratchpad {scratchpad:?} has no drop-down {dropdown:?}")]
    UnknownDropdown {
        combo: String,
        scratchpad: String,
        dropdown: String,
    },
    #[error("drop-down {scratchpad}/{dropdown}: {} outside [0, 1]", .fields.join(", "))]
    DropdownGeometry {
        scratchpad: String,
        dropdown: String,
        fields: Vec<&'static str>,
    },
    #[error("{location}: invalid colour {value:?}")]
    InvalidColor { location: String, value: String },
    #[error("no layouts configured")]
    NoLayouts,
    #[error("group name {0:?} is used more than once")]
    DuplicateGroup(String),
    #[error("weather widget has no API key (set {})", crate::bar::WEATHER_KEY_ENV)]
    MissingWeatherKey,
}

impl Problem {
    pub fn severity(&self) -> Severity {
        match self {
            Problem::MissingWeatherKey => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&contents, path)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    /// A file that exists and cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents, path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError(format!("failed to read {}: {}", path.display(), e))),
        }
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// The task list of the first bar that has one, else the default.
    pub fn task_list(&self) -> TaskList {
        self.screens
            .iter()
            .flat_map(Screen::bars)
            .find_map(|b| b.task_list())
            .cloned()
            .unwrap_or_default()
    }

    /// Pretty JSON of the whole configuration.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError(format!("failed to serialize: {}", e)))
    }

    /// Fill secrets (the weather key) from the environment where the file
    /// left them unset.
    pub fn resolve_secrets(&mut self) {
        for screen in &mut self.screens {
            for bar in screen.bars_mut() {
                for w in &mut bar.widgets {
                    w.resolve_secrets();
                }
            }
        }
    }

    /// The complete key map: hand-written keys, then group keys, then
    /// scratchpad toggles, with spawn placeholders expanded.
    pub fn resolved_keys(&self) -> Result<Vec<Binding>, Problem> {
        let mut problems = Vec::new();
        let keys = self.expand_bindings(&mut problems);
        match problems.into_iter().next() {
            Some(p) => Err(p),
            None => Ok(keys),
        }
    }

    fn all_bindings(&self) -> Vec<Binding> {
        let mut all = self.keys.clone();
        all.extend(group_keys(&self.groups, self.general.modifier));
        for sp in &self.scratchpads {
            all.extend(sp.keys(self.general.modifier));
        }
        all
    }

    fn expand_bindings(&self, problems: &mut Vec<Problem>) -> Vec<Binding> {
        let mut expand_key = |k: &Key, chord: Option<&KeyChord>| -> Key {
            let mut k = k.clone();
            let expanded = k.action.spawn_command().map(|cmd| self.general.expand(cmd));
            match expanded {
                Some(Ok(cmd)) => k.action = Action::Spawn(cmd),
                Some(Err(name)) => problems.push(Problem::UnknownPlaceholder {
                    combo: combo_label(chord, &k),
                    name,
                }),
                None => {}
            }
            k
        };

        self.all_bindings()
            .into_iter()
            .map(|b| match b {
                Binding::Key(k) => Binding::Key(expand_key(&k, None)),
                Binding::Chord(c) => {
                    let submappings = c.submappings.iter().map(|k| expand_key(k, Some(&c))).collect();
                    Binding::Chord(KeyChord { submappings, ..c })
                }
            })
            .collect()
    }

    /// Validate the configuration and return every problem found.
    ///
    /// An empty list means the configuration is consistent.  Problems are
    /// ordered by section: keys, groups, scratchpads, layouts, colours, bar.
    pub fn check(&self) -> Vec<Problem> {
        let mut problems = Vec::new();
        let bindings = self.expand_bindings(&mut problems);

        problems.extend(find_conflicts(&bindings).into_iter().map(Problem::Conflict));
        self.check_references(&bindings, &mut problems);

        let mut seen = HashSet::new();
        let names = self
            .groups
            .iter()
            .map(|g| &g.name)
            .chain(self.scratchpads.iter().map(|s| &s.name));
        for name in names {
            if !seen.insert(name) {
                problems.push(Problem::DuplicateGroup(name.clone()));
            }
        }

        for sp in &self.scratchpads {
            for d in &sp.dropdowns {
                let fields = d.geometry.out_of_range();
                if !fields.is_empty() {
                    problems.push(Problem::DropdownGeometry {
                        scratchpad: sp.name.clone(),
                        dropdown: d.name.clone(),
                        fields,
                    });
                }
            }
        }

        if self.layouts.is_empty() {
            problems.push(Problem::NoLayouts);
        }

        self.check_colors(&mut problems);

        let weather_without_key = self
            .screens
            .iter()
            .flat_map(Screen::bars)
            .flat_map(|b| &b.widgets)
            .any(|w| matches!(w, Widget::OpenWeather { app_key: None, .. }));
        if weather_without_key {
            problems.push(Problem::MissingWeatherKey);
        }

        debug!("check found {} problem(s)", problems.len());
        problems
    }

    fn check_references(&self, bindings: &[Binding], problems: &mut Vec<Problem>) {
        let group_names: HashSet<&str> = self
            .groups
            .iter()
            .map(|g| g.name.as_str())
            .chain(self.scratchpads.iter().map(|s| s.name.as_str()))
            .collect();

        for b in bindings {
            let combo = b.combo().to_string();
            for action in b.actions() {
                if let Some(group) = action.group_ref() {
                    if !group_names.contains(group) {
                        problems.push(Problem::UnknownGroup {
                            combo: combo.clone(),
                            group: group.to_string(),
                        });
                    }
                }
                if let Action::DropdownToggle {
                    scratchpad,
                    dropdown,
                } = action
                {
                    match self.scratchpads.iter().find(|s| &s.name == scratchpad) {
                        None => problems.push(Problem::UnknownScratchpad {
                            combo: combo.clone(),
                            scratchpad: scratchpad.clone(),
                        }),
                        Some(sp) if sp.dropdown(dropdown).is_none() => {
                            problems.push(Problem::UnknownDropdown {
                                combo: combo.clone(),
                                scratchpad: scratchpad.clone(),
                                dropdown: dropdown.clone(),
                            })
                        }
                        Some(_) => {}
                    }
                }
            }
        }
    }

    fn check_colors(&self, problems: &mut Vec<Problem>) {
        let mut push = |location: String, value: &str| {
            if !is_hex_color(value) {
                problems.push(Problem::InvalidColor {
                    location,
                    value: value.to_string(),
                });
            }
        };

        for (field, value) in self.palette.invalid_colors() {
            push(format!("palette.{}", field), &value);
        }
        for (i, l) in self.layouts.iter().enumerate() {
            push(format!("layouts[{}].border_focus", i), &l.theme.border_focus);
            push(format!("layouts[{}].border_normal", i), &l.theme.border_normal);
        }
        for (s, screen) in self.screens.iter().enumerate() {
            for bar in screen.bars() {
                push(format!("screens[{}].bar.background", s), &bar.background);
                for w in &bar.widgets {
                    for c in w.colors() {
                        push(format!("screens[{}].{}", s, w.name()), c);
                    }
                }
            }
        }
    }
}

fn combo_label(chord: Option<&KeyChord>, key: &Key) -> String {
    match chord {
        Some(c) => format!("{} {}", c.combo(), key.combo()),
        None => key.combo().to_string(),
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::DropDownGeometry;

    fn with_weather_key(mut cfg: Config) -> Config {
        for screen in &mut cfg.screens {
            for bar in screen.bars_mut() {
                for w in &mut bar.widgets {
                    if let Widget::OpenWeather { app_key, .. } = w {
                        *app_key = Some("test-key".into());
                    }
                }
            }
        }
        cfg
    }

    fn spawn_of(bindings: &[Binding], combo: &str) -> Option<String> {
        bindings.iter().find_map(|b| match b {
            Binding::Key(k) if k.combo().to_string() == combo => {
                k.action.spawn_command().map(str::to_string)
            }
            _ => None,
        })
    }

    #[test]
    fn default_config_is_clean() {
        let cfg = with_weather_key(Config::default());
        let problems = cfg.check();
        assert!(problems.is_empty(), "unexpected problems: {:?}", problems);
    }

    #[test]
    fn default_config_only_warns_about_weather_key() {
        let problems = Config::default().check();
        assert_eq!(problems, vec![Problem::MissingWeatherKey]);
        assert_eq!(problems[0].severity(), Severity::Warning);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn deserialize_partial_general() {
        let json = r#"{ "general": { "terminal": "alacritty" } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.general.terminal, "alacritty");
        assert_eq!(cfg.general.browser, General::default().browser);
        assert_eq!(cfg.keys, Config::default().keys);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "behavior": {}, "future_section": { "key": 42 } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.behavior.wmname, "LG3D");
    }

    #[test]
    fn modifier_drives_every_default_binding() {
        let json = r#"{ "general": { "modifier": "mod1" } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        let keys = cfg.resolved_keys().unwrap();
        for b in &keys {
            let combo = b.combo();
            assert!(combo.modifiers.contains(&Modifier::Mod1), "{}", combo);
            assert!(!combo.modifiers.contains(&Modifier::Mod4), "{}", combo);
        }
        assert_eq!(keys[0].combo().to_string(), "mod1+h");
        for m in &cfg.mouse {
            assert_eq!(m.combo().modifiers.iter().collect::<Vec<_>>(), vec![&Modifier::Mod1]);
        }
    }

    #[test]
    fn explicit_sections_are_kept_as_written() {
        let json = r#"{
            "general": { "modifier": "mod1" },
            "mouse": [{ "kind": "click", "modifiers": ["mod4"], "button": "Button2", "action": "BringToFront" }]
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.mouse.len(), 1);
        assert_eq!(cfg.mouse[0].combo().to_string(), "mod4+Button2");
    }

    #[test]
    fn fonts_and_palette_flow_into_derived_sections() {
        let json = r##"{
            "general": { "font": "Iosevka", "fontsize": 12, "iconsize": 20 },
            "palette": { "background": "#101010" }
        }"##;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.widget_defaults, WidgetDefaults::new("Iosevka", 12));
        assert_eq!(cfg.task_list().icon_size, 20);
        assert_eq!(cfg.task_list().fontsize, 12);
        assert_eq!(cfg.layouts[0].theme.border_normal, "#101010");
        assert_eq!(cfg.screens[0].top.as_ref().unwrap().background, "#101010");
    }

    #[test]
    fn dump_leaves_out_environment_secrets() {
        let cfg = Config::default();
        assert!(!cfg.to_json().unwrap().contains("app_key"));

        let resolved = with_weather_key(cfg);
        assert!(resolved.to_json().unwrap().contains("\"app_key\": \"test-key\""));
    }

    #[test]
    fn json_roundtrip_of_defaults() {
        let cfg = Config::default();
        let json = cfg.to_json().unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn terminal_placeholder_follows_general() {
        let mut cfg = Config::default();
        cfg.general.terminal = "alacritty".into();
        let keys = cfg.resolved_keys().unwrap();
        assert_eq!(spawn_of(&keys, "mod4+Return").as_deref(), Some("alacritty"));
        assert_eq!(
            spawn_of(&keys, "mod4+d").as_deref(),
            Some("rofi drun -show drun -config ~/.config/rofi/rofidmenu.rasi")
        );
    }

    #[test]
    fn placeholders_expand_inside_chords() {
        let keys = Config::default().resolved_keys().unwrap();
        let chord = keys
            .iter()
            .find_map(|b| match b {
                Binding::Chord(c) if c.key == "f" => Some(c),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            chord.submappings[0].action,
            Action::Spawn("jumpapp thorium-browser".into())
        );
    }

    #[test]
    fn resolved_keys_include_groups_and_scratchpads() {
        let cfg = Config::default();
        let keys = cfg.resolved_keys().unwrap();
        let expected = cfg.keys.len() + 2 * cfg.groups.len() + 4;
        assert_eq!(keys.len(), expected);
        assert!(keys.iter().any(|b| b.combo().to_string() == "mod4+shift+9"));
        assert!(keys.iter().any(|b| b.combo().to_string() == "mod4+m"));
    }

    #[test]
    fn expand_leaves_non_placeholders() {
        let g = General::default();
        assert_eq!(g.expand("awk '{ print $1 }'").unwrap(), "awk '{ print $1 }'");
        assert_eq!(g.expand("echo {").unwrap(), "echo {");
        assert_eq!(g.expand("{terminal} -e {browser}").unwrap(), "kitty -e thorium-browser");
        assert_eq!(g.expand("{editor}"), Err("editor".to_string()));
    }

    #[test]
    fn unknown_placeholder_reported() {
        let mut cfg = with_weather_key(Config::default());
        cfg.keys.push(Binding::Key(Key::new(
            &[Modifier::Mod4],
            "e",
            Action::Spawn("{editor}".into()),
            "",
        )));
        assert_eq!(
            cfg.check(),
            vec![Problem::UnknownPlaceholder {
                combo: "mod4+e".into(),
                name: "editor".into()
            }]
        );
        assert!(cfg.resolved_keys().is_err());
    }

    #[test]
    fn duplicate_binding_reported() {
        let mut cfg = with_weather_key(Config::default());
        // mod4+t is already the scratchpad terminal toggle.
        cfg.keys.push(Binding::Key(Key::new(
            &[Modifier::Mod4],
            "t",
            Action::NextLayout,
            "",
        )));
        let problems = cfg.check();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].to_string(), "mod4+t is bound 2 times");
    }

    #[test]
    fn references_to_missing_groups_and_dropdowns() {
        let mut cfg = with_weather_key(Config::default());
        cfg.groups.truncate(8);
        cfg.keys.push(Binding::Key(Key::new(
            &[Modifier::Mod1],
            "x",
            Action::DropdownToggle {
                scratchpad: "scratchpad".into(),
                dropdown: "htop".into(),
            },
            "",
        )));
        cfg.keys.push(Binding::Key(Key::new(
            &[Modifier::Mod1],
            "y",
            Action::DropdownToggle {
                scratchpad: "other".into(),
                dropdown: "term".into(),
            },
            "",
        )));
        cfg.keys.push(Binding::Key(Key::new(
            &[Modifier::Mod1],
            "9",
            Action::GroupToScreen("9".into()),
            "",
        )));
        let problems = cfg.check();
        assert!(problems.contains(&Problem::UnknownDropdown {
            combo: "mod1+x".into(),
            scratchpad: "scratchpad".into(),
            dropdown: "htop".into(),
        }));
        assert!(problems.contains(&Problem::UnknownScratchpad {
            combo: "mod1+y".into(),
            scratchpad: "other".into(),
        }));
        assert!(problems.contains(&Problem::UnknownGroup {
            combo: "mod1+9".into(),
            group: "9".into(),
        }));
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn bad_geometry_and_colors_reported() {
        let mut cfg = with_weather_key(Config::default());
        cfg.scratchpads[0].dropdowns[0].geometry = DropDownGeometry {
            x: 1.5,
            ..DropDownGeometry::STANDARD
        };
        cfg.layouts[0].theme.border_focus = "green".into();
        let problems = cfg.check();
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].to_string(), "drop-down scratchpad/term: x outside [0, 1]");
        assert_eq!(
            problems[1],
            Problem::InvalidColor {
                location: "layouts[0].border_focus".into(),
                value: "green".into()
            }
        );
    }

    #[test]
    fn empty_layouts_and_duplicate_groups() {
        let mut cfg = with_weather_key(Config::default());
        cfg.layouts.clear();
        cfg.groups.push(Group::new("scratchpad"));
        let problems = cfg.check();
        assert!(problems.contains(&Problem::NoLayouts));
        assert!(problems.contains(&Problem::DuplicateGroup("scratchpad".into())));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/tilerc.json")).unwrap_err();
        assert!(err.to_string().starts_with("config error: failed to read"));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("tilerc-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "groups": [{ "name": "web" }] }"#).unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.groups, vec![Group::new("web")]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load_or_default(Path::new("/nonexistent/tilerc.json")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn broken_file_is_not_replaced_by_defaults() {
        let path = std::env::temp_dir().join(format!("tilerc-broken-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "groups": 5 }"#).unwrap();
        let err = Config::load_or_default(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn task_list_comes_from_first_bar() {
        let mut cfg = Config::default();
        assert_eq!(cfg.task_list(), TaskList::default());
        cfg.screens.clear();
        assert_eq!(cfg.task_list(), TaskList::default());
    }

    #[test]
    fn load_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("tilerc-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "groups": 5 }"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
        std::fs::remove_file(&path).unwrap();
    }
}
