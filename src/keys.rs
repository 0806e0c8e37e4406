//! Key bindings and key chords.
//!
//! A [`Binding`] is either a plain [`Key`] that triggers one [`Action`], or a
//! [`KeyChord`] that enters a sub-map: after the chord's combo is pressed,
//! the next key is looked up among its `submappings` only.
//!
//! Combos are written `mod4+shift+h` in listings and accepted in that form
//! by [`KeyCombo::from_str`].  Modifier order does not matter.

use crate::action::Action;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// A keyboard modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Usually Super / the Windows key.
    #[serde(alias = "super")]
    Mod4,
    #[serde(alias = "ctrl")]
    Control,
    /// Usually Alt.
    #[serde(alias = "alt")]
    Mod1,
    Shift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Mod4 => write!(f, "mod4"),
            Modifier::Control => write!(f, "control"),
            Modifier::Mod1 => write!(f, "mod1"),
            Modifier::Shift => write!(f, "shift"),
        }
    }
}

/// Error from parsing a modifier or key combo.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown modifier: {0:?}")]
    UnknownModifier(String),
    #[error("key combo {0:?} has no key")]
    MissingKey(String),
}

impl FromStr for Modifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s.trim().to_lowercase().as_str() {
            "mod4" | "super" => Ok(Modifier::Mod4),
            "control" | "ctrl" => Ok(Modifier::Control),
            "mod1" | "alt" => Ok(Modifier::Mod1),
            "shift" => Ok(Modifier::Shift),
            _ => Err(ParseError::UnknownModifier(s.to_string())),
        }
    }
}

/// A set of modifiers plus a key name.
///
/// Two combos are equal when they hold the same modifiers (in any order)
/// and the same key name.  Key names are case-sensitive (`"Return"`,
/// `"h"`), matching keysym names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCombo {
    pub modifiers: BTreeSet<Modifier>,
    pub key: String,
}

impl KeyCombo {
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: impl Into<String>) -> Self {
        Self {
            modifiers: modifiers.into_iter().collect(),
            key: key.into(),
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modifiers {
            write!(f, "{}+", m)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyCombo {
    type Err = ParseError;

    /// Parse `mod4+shift+h`.  The last `+`-separated part is the key.
    fn from_str(s: &str) -> Result<Self, ParseError> {
        let mut parts: Vec<&str> = s.trim().split('+').map(str::trim).collect();
        let key = match parts.pop() {
            Some(k) if !k.is_empty() => k,
            _ => return Err(ParseError::MissingKey(s.to_string())),
        };
        let modifiers = parts
            .into_iter()
            .map(Modifier::from_str)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self {
            modifiers,
            key: key.to_string(),
        })
    }
}

/// A single key binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub modifiers: Vec<Modifier>,
    pub key: String,
    pub action: Action,
    #[serde(default)]
    pub desc: String,
}

impl Key {
    pub fn new(modifiers: &[Modifier], key: &str, action: Action, desc: &str) -> Self {
        Self {
            modifiers: modifiers.to_vec(),
            key: key.to_string(),
            action,
            desc: desc.to_string(),
        }
    }

    pub fn combo(&self) -> KeyCombo {
        KeyCombo::new(self.modifiers.iter().copied(), self.key.clone())
    }
}

/// A key that opens a sub-map of further bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyChord {
    pub modifiers: Vec<Modifier>,
    pub key: String,
    pub submappings: Vec<Key>,
    #[serde(default)]
    pub desc: String,
}

impl KeyChord {
    pub fn new(modifiers: &[Modifier], key: &str, submappings: Vec<Key>, desc: &str) -> Self {
        Self {
            modifiers: modifiers.to_vec(),
            key: key.to_string(),
            submappings,
            desc: desc.to_string(),
        }
    }

    pub fn combo(&self) -> KeyCombo {
        KeyCombo::new(self.modifiers.iter().copied(), self.key.clone())
    }
}

/// One entry in the key map.
///
/// Untagged on the wire: an object with `action` is a [`Key`], one with
/// `submappings` is a [`KeyChord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Binding {
    Key(Key),
    Chord(KeyChord),
}

impl Binding {
    pub fn combo(&self) -> KeyCombo {
        match self {
            Binding::Key(k) => k.combo(),
            Binding::Chord(c) => c.combo(),
        }
    }

    pub fn desc(&self) -> &str {
        match self {
            Binding::Key(k) => &k.desc,
            Binding::Chord(c) => &c.desc,
        }
    }

    /// Every action reachable from this binding, chords included.
    pub fn actions(&self) -> Vec<&Action> {
        match self {
            Binding::Key(k) => vec![&k.action],
            Binding::Chord(c) => c.submappings.iter().map(|k| &k.action).collect(),
        }
    }
}

impl From<Key> for Binding {
    fn from(k: Key) -> Self {
        Binding::Key(k)
    }
}

impl From<KeyChord> for Binding {
    fn from(c: KeyChord) -> Self {
        Binding::Chord(c)
    }
}

/// A combo bound more than once at the same level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Combo of the enclosing chord, `None` at the top level.
    pub chord: Option<KeyCombo>,
    pub combo: KeyCombo,
    /// How many bindings share the combo.
    pub count: usize,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.chord {
            Some(chord) => write!(f, "{} is bound {} times inside chord {}", self.combo, self.count, chord),
            None => write!(f, "{} is bound {} times", self.combo, self.count),
        }
    }
}

/// Find every combo bound more than once.
///
/// The top level and each chord's sub-map are separate namespaces:
/// `b` inside one chord does not clash with `b` inside another.
pub fn find_conflicts(bindings: &[Binding]) -> Vec<Conflict> {
    let mut conflicts = duplicates(bindings.iter().map(Binding::combo), None);
    for b in bindings {
        if let Binding::Chord(chord) = b {
            conflicts.extend(duplicates(
                chord.submappings.iter().map(Key::combo),
                Some(chord.combo()),
            ));
        }
    }
    conflicts
}

fn duplicates(combos: impl Iterator<Item = KeyCombo>, chord: Option<KeyCombo>) -> Vec<Conflict> {
    let mut counts: HashMap<KeyCombo, usize> = HashMap::new();
    for c in combos {
        *counts.entry(c).or_default() += 1;
    }
    let mut out: Vec<Conflict> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(combo, count)| Conflict {
            chord: chord.clone(),
            combo,
            count,
        })
        .collect();
    out.sort_by(|a, b| a.combo.cmp(&b.combo));
    out
}
