//! Mouse bindings for floating windows.

use crate::action::Action;
use crate::keys::{KeyCombo, Modifier};
use serde::{Deserialize, Serialize};

/// A mouse button binding.
///
/// `Drag` runs `start` when the button goes down and `action` on every
/// motion event; `Click` runs `action` once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MouseBinding {
    Drag {
        modifiers: Vec<Modifier>,
        button: String,
        action: Action,
        start: Option<Action>,
    },
    Click {
        modifiers: Vec<Modifier>,
        button: String,
        action: Action,
    },
}

impl MouseBinding {
    pub fn combo(&self) -> KeyCombo {
        match self {
            MouseBinding::Drag {
                modifiers, button, ..
            }
            | MouseBinding::Click {
                modifiers, button, ..
            } => KeyCombo::new(modifiers.iter().copied(), button.clone()),
        }
    }
}

/// Move with mod+Button1, resize with mod+Button3, raise with mod+Button2.
pub fn default_mouse(modifier: Modifier) -> Vec<MouseBinding> {
    vec![
        MouseBinding::Drag {
            modifiers: vec![modifier],
            button: "Button1".into(),
            action: Action::SetPositionFloating,
            start: Some(Action::GetPosition),
        },
        MouseBinding::Drag {
            modifiers: vec![modifier],
            button: "Button3".into(),
            action: Action::SetSizeFloating,
            start: Some(Action::GetSize),
        },
        MouseBinding::Click {
            modifiers: vec![modifier],
            button: "Button2".into(),
            action: Action::BringToFront,
        },
    ]
}
