//! Workspace groups and scratchpads.
//!
//! Every [`Group`] gets two derived bindings (switch to it, send the focused
//! window to it) and every [`ScratchPad`] toggle gets one.  Those bindings
//! are generated here rather than written out by hand so renaming a group
//! keeps its keys in sync.

use crate::action::Action;
use crate::keys::{Binding, Key, Modifier};
use serde::{Deserialize, Serialize};

/// A named workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Groups `"1"` through `"9"`.
pub fn default_groups() -> Vec<Group> {
    "123456789".chars().map(|c| Group::new(c)).collect()
}

/// `mod+<name>` shows the group, `mod+shift+<name>` moves the focused
/// window there and follows it.
pub fn group_keys(groups: &[Group], modifier: Modifier) -> Vec<Binding> {
    groups
        .iter()
        .flat_map(|g| {
            [
                Key::new(
                    &[modifier],
                    &g.name,
                    Action::GroupToScreen(g.name.clone()),
                    &format!("Switch to group {}", g.name),
                ),
                Key::new(
                    &[modifier, Modifier::Shift],
                    &g.name,
                    Action::WindowToGroup {
                        group: g.name.clone(),
                        switch_group: true,
                    },
                    &format!("Switch to & move focused window to group {}", g.name),
                ),
            ]
        })
        .map(Binding::Key)
        .collect()
}

/// Position and size of a drop-down, as fractions of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropDownGeometry {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

impl DropDownGeometry {
    /// Half the screen, offset 20% from the top-left corner.
    pub const STANDARD: Self = Self {
        width: 0.5,
        height: 0.5,
        x: 0.2,
        y: 0.2,
        opacity: 1.0,
    };

    /// 80% of the screen, centred.
    pub const LARGE: Self = Self {
        width: 0.8,
        height: 0.8,
        x: 0.1,
        y: 0.1,
        opacity: 1.0,
    };

    /// Names of the fields that fall outside `[0, 1]`.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        [
            ("width", self.width),
            ("height", self.height),
            ("x", self.x),
            ("y", self.y),
            ("opacity", self.opacity),
        ]
        .into_iter()
        .filter(|(_, v)| !(0.0..=1.0).contains(v))
        .map(|(k, _)| k)
        .collect()
    }
}

impl Default for DropDownGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A hidden window spawned on first toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropDown {
    pub name: String,
    pub cmd: String,
    #[serde(flatten)]
    pub geometry: DropDownGeometry,
}

impl DropDown {
    pub fn new(name: &str, cmd: &str, geometry: DropDownGeometry) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            geometry,
        }
    }
}

/// `mod+<key>` toggles drop-down `dropdown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    pub key: String,
    pub dropdown: String,
}

/// A special group holding drop-downs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScratchPad {
    pub name: String,
    pub dropdowns: Vec<DropDown>,
    #[serde(default)]
    pub toggles: Vec<Toggle>,
}

impl ScratchPad {
    pub fn dropdown(&self, name: &str) -> Option<&DropDown> {
        self.dropdowns.iter().find(|d| d.name == name)
    }

    /// One key per toggle.
    pub fn keys(&self, modifier: Modifier) -> Vec<Binding> {
        self.toggles
            .iter()
            .map(|t| {
                Binding::Key(Key::new(
                    &[modifier],
                    &t.key,
                    Action::DropdownToggle {
                        scratchpad: self.name.clone(),
                        dropdown: t.dropdown.clone(),
                    },
                    &format!("Toggle {}", t.dropdown),
                ))
            })
            .collect()
    }
}

/// Terminal, file manager, mixer, calculator and a large music player.
pub fn default_scratchpad() -> ScratchPad {
    let std = DropDownGeometry::STANDARD;
    ScratchPad {
        name: "scratchpad".into(),
        dropdowns: vec![
            DropDown::new("term", "kitty --class=scratch", std),
            DropDown::new("ranger", "kitty --class=ranger -e ranger", std),
            DropDown::new("volume", "kitty --class=volume -e pulsemixer", std),
            DropDown::new("calculator", "galculator", std),
            DropDown::new("music", "youtube-music", DropDownGeometry::LARGE),
        ],
        toggles: [("t", "term"), ("v", "volume"), ("c", "calculator"), ("m", "music")]
            .into_iter()
            .map(|(key, dropdown)| Toggle {
                key: key.into(),
                dropdown: dropdown.into(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_default_groups() {
        let names: Vec<String> = default_groups().into_iter().map(|g| g.name).collect();
        assert_eq!(names, ["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn two_keys_per_group() {
        let keys = group_keys(&[Group::new("3")], Modifier::Mod4);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].combo().to_string(), "mod4+3");
        assert_eq!(keys[0].desc(), "Switch to group 3");
        assert_eq!(keys[1].combo().to_string(), "mod4+shift+3");
        match &keys[1] {
            Binding::Key(k) => assert_eq!(
                k.action,
                Action::WindowToGroup {
                    group: "3".into(),
                    switch_group: true
                }
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn scratchpad_toggle_keys() {
        let sp = default_scratchpad();
        let keys = sp.keys(Modifier::Mod4);
        let combos: Vec<String> = keys.iter().map(|k| k.combo().to_string()).collect();
        assert_eq!(combos, ["mod4+t", "mod4+v", "mod4+c", "mod4+m"]);
        assert_eq!(sp.dropdown("music").map(|d| d.geometry), Some(DropDownGeometry::LARGE));
        assert!(sp.dropdown("ranger").is_some());
        assert!(sp.dropdown("nope").is_none());
    }

    #[test]
    fn geometry_range() {
        assert!(DropDownGeometry::STANDARD.out_of_range().is_empty());
        let g = DropDownGeometry {
            width: 1.2,
            opacity: -0.1,
            ..DropDownGeometry::STANDARD
        };
        assert_eq!(g.out_of_range(), ["width", "opacity"]);
    }

    #[test]
    fn dropdown_geometry_defaults_in_json() {
        let d: DropDown = serde_json::from_str(r#"{"name": "top", "cmd": "htop"}"#).unwrap();
        assert_eq!(d.geometry, DropDownGeometry::STANDARD);

        let d: DropDown = serde_json::from_str(
            r#"{"name": "top", "cmd": "htop", "width": 0.9, "height": 0.9, "x": 0.05, "y": 0.05, "opacity": 0.8}"#,
        )
        .unwrap();
        assert_eq!(d.geometry.width, 0.9);
    }
}
