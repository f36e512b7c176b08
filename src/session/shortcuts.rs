use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::config::SnapmarkConfig;
use crate::draw_toolbar::KeyEventKey;

/// A key plus modifiers, written as `"ctrl+shift+z"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyChord {
    /// Lowercase key name, e.g. `"z"` or `"escape"`
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub logo: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into().to_lowercase(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

impl FromStr for KeyChord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chord = KeyChord::default();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "" => bail!("Empty key in chord {:?}", s),
                "ctrl" | "control" => chord.ctrl = true,
                "shift" => chord.shift = true,
                "alt" => chord.alt = true,
                "super" | "logo" | "meta" => chord.logo = true,
                other => {
                    if key.is_some() {
                        bail!("More than one key in chord {:?}", s);
                    }
                    key = Some(other.to_string());
                }
            }
        }

        match key {
            Some(key) => {
                chord.key = key;
                Ok(chord)
            }
            None => bail!("No key in chord {:?}", s),
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        if self.logo {
            write!(f, "super+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Chord to button bindings resolved from the config
#[derive(Debug, Clone, Default)]
pub struct Shortcuts {
    bindings: Vec<(KeyChord, KeyEventKey)>,
}

impl Shortcuts {
    pub fn from_config(config: &SnapmarkConfig) -> Self {
        let mut bindings = Vec::new();
        for key in KeyEventKey::ALL {
            let binding = config.hotkey(key);
            match binding.parse::<KeyChord>() {
                Ok(chord) => bindings.push((chord, key)),
                Err(err) => log::warn!("Ignoring hotkey for {:?}: {}", key, err),
            }
        }
        Self { bindings }
    }

    pub fn lookup(&self, chord: &KeyChord) -> Option<KeyEventKey> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == chord)
            .map(|(_, key)| *key)
    }
}

/// Resolve a chord to the toolbar button it triggers, if key events are live
pub fn handle_key_event(
    shortcuts: &Shortcuts,
    chord: &KeyChord,
    key_events_enabled: bool,
) -> Option<KeyEventKey> {
    if !key_events_enabled {
        return None;
    }
    shortcuts.lookup(chord)
}
