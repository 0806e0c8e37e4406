//! Actions a key or mouse binding can trigger.
//!
//! This module defines the vocabulary that every binding shares:
//! [`Action`] names one lazy command the window manager should run, and
//! [`Direction`] is its most common argument.
//!
//! Actions are plain data.  Executing them is the framework's job; this
//! crate only declares, validates and prints them.  The `Display`
//! implementation renders each action in lazy-call form
//! (`layout.left()`, `group["3"].toscreen()`, …) for key listings.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Direction for focus, shuffle and grow commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Parse a direction string (case-insensitive; accepts "left", "Left", " UP ").
pub fn parse_direction(s: &str) -> Option<Direction> {
    match s.trim().to_lowercase().as_str() {
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_direction(&s).ok_or_else(|| DeError::custom(format!("invalid direction: {:?}", s)))
    }
}

/// Every command a binding can hand to the window manager.
///
/// On the wire actions use serde's external tagging, e.g.
/// `"NextLayout"`, `{"Focus":"left"}` or
/// `{"WindowToGroup":{"group":"3","switch_group":true}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Move focus to the neighbouring window.
    Focus(Direction),
    /// Cycle focus to the next window in the layout.
    FocusNext,
    /// Swap the focused window with its neighbour.
    Shuffle(Direction),
    /// Grow the focused window.  Shrinks it when already at the screen edge.
    Grow(Direction),
    /// Reset all window sizes.
    Normalize,
    /// Toggle between split and unsplit sides of the stack.
    ToggleSplit,
    /// Reset the layout to its initial state.
    ResetLayout,
    /// Switch to the next layout in the list.
    NextLayout,

    /// Run a shell command.  May contain `{terminal}`-style placeholders,
    /// expanded by [`Config::resolved_keys`](crate::config::Config::resolved_keys).
    Spawn(String),

    KillWindow,
    ToggleFullscreen,
    ToggleFloating,
    HideShowBar,
    ReloadConfig,
    Shutdown,

    /// Show `group` on the current screen.
    GroupToScreen(String),
    /// Send the focused window to `group`, optionally following it.
    WindowToGroup { group: String, switch_group: bool },
    /// Show or hide a drop-down of a scratchpad.
    DropdownToggle { scratchpad: String, dropdown: String },

    //  Mouse-driven floating window actions

    SetPositionFloating,
    SetSizeFloating,
    GetPosition,
    GetSize,
    BringToFront,
}

impl Action {
    /// The spawn command, if this action runs one.
    pub fn spawn_command(&self) -> Option<&str> {
        match self {
            Action::Spawn(cmd) => Some(cmd),
            _ => None,
        }
    }

    /// The group this action refers to, if any.
    pub fn group_ref(&self) -> Option<&str> {
        match self {
            Action::GroupToScreen(g) => Some(g),
            Action::WindowToGroup { group, .. } => Some(group),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Focus(d) => write!(f, "layout.{}()", d),
            Action::FocusNext => write!(f, "layout.next()"),
            Action::Shuffle(d) => write!(f, "layout.shuffle_{}()", d),
            Action::Grow(d) => write!(f, "layout.grow_{}()", d),
            Action::Normalize => write!(f, "layout.normalize()"),
            Action::ToggleSplit => write!(f, "layout.toggle_split()"),
            Action::ResetLayout => write!(f, "layout.reset()"),
            Action::NextLayout => write!(f, "next_layout()"),
            Action::Spawn(cmd) => write!(f, "spawn({:?})", cmd),
            Action::KillWindow => write!(f, "window.kill()"),
            Action::ToggleFullscreen => write!(f, "window.toggle_fullscreen()"),
            Action::ToggleFloating => write!(f, "window.toggle_floating()"),
            Action::HideShowBar => write!(f, "hide_show_bar()"),
            Action::ReloadConfig => write!(f, "reload_config()"),
            Action::Shutdown => write!(f, "shutdown()"),
            Action::GroupToScreen(g) => write!(f, "group[{:?}].toscreen()", g),
            Action::WindowToGroup { group, switch_group } => write!(
                f,
                "window.togroup({:?}, switch_group={})",
                group, switch_group
            ),
            Action::DropdownToggle {
                scratchpad,
                dropdown,
            } => write!(f, "group[{:?}].dropdown_toggle({:?})", scratchpad, dropdown),
            Action::SetPositionFloating => write!(f, "window.set_position_floating()"),
            Action::SetSizeFloating => write!(f, "window.set_size_floating()"),
            Action::GetPosition => write!(f, "window.get_position()"),
            Action::GetSize => write!(f, "window.get_size()"),
            Action::BringToFront => write!(f, "window.bring_to_front()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn direction_parse_is_case_insensitive() {
        assert_eq!(parse_direction("Left"), Some(Direction::Left));
        assert_eq!(parse_direction(" UP "), Some(Direction::Up));
        assert_eq!(parse_direction("sideways"), None);
    }

    #[test]
    fn action_display_lazy_form() {
        assert_eq!(Action::Focus(Direction::Left).to_string(), "layout.left()");
        assert_eq!(
            Action::Shuffle(Direction::Down).to_string(),
            "layout.shuffle_down()"
        );
        assert_eq!(Action::GroupToScreen("3".into()).to_string(), "group[\"3\"].toscreen()");
        assert_eq!(
            Action::DropdownToggle {
                scratchpad: "scratchpad".into(),
                dropdown: "term".into()
            }
            .to_string(),
            "group[\"scratchpad\"].dropdown_toggle(\"term\")"
        );
    }

    #[test]
    fn action_json_wire_format() {
        let a: Action = serde_json::from_str(r#"{"Grow":"right"}"#).unwrap();
        assert_eq!(a, Action::Grow(Direction::Right));

        let a: Action = serde_json::from_str(r#""NextLayout""#).unwrap();
        assert_eq!(a, Action::NextLayout);

        let a: Action =
            serde_json::from_str(r#"{"WindowToGroup":{"group":"4","switch_group":true}}"#).unwrap();
        assert_eq!(a.group_ref(), Some("4"));
    }

    #[test]
    fn invalid_direction_rejected() {
        assert!(serde_json::from_str::<Action>(r#"{"Focus":"north"}"#).is_err());
    }

    #[test]
    fn spawn_command_accessor() {
        assert_eq!(Action::Spawn("kitty".into()).spawn_command(), Some("kitty"));
        assert_eq!(Action::Shutdown.spawn_command(), None);
    }
}
