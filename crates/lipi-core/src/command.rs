//! User-triggerable commands and the key chords bound to them.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ToggleBold,
    ToggleItalic,
    ToggleCodeBlock,
    ToggleTransliteration,
}

/// A key chord such as `ctrl+b`. `key` is a DOM key value, lowercased
/// for letters; `space` is stored as `" "`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
    pub key: String,
}

impl Shortcut {
    pub fn parse(chord: &str) -> Option<Self> {
        let mut shortcut = Shortcut {
            ctrl: false,
            alt: false,
            meta: false,
            shift: false,
            key: String::new(),
        };
        let mut parts: Vec<&str> = chord.split('+').collect();
        // "ctrl++" binds the plus key.
        if chord.ends_with("++") {
            parts.truncate(parts.len().saturating_sub(2));
            parts.push("+");
        }
        let (key, modifiers) = parts.split_last()?;
        for m in modifiers {
            match m.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => shortcut.ctrl = true,
                "alt" | "option" => shortcut.alt = true,
                "meta" | "cmd" => shortcut.meta = true,
                "shift" => shortcut.shift = true,
                _ => return None,
            }
        }
        shortcut.key = normalize_key(key);
        if shortcut.key.is_empty() {
            return None;
        }
        Some(shortcut)
    }

    pub fn matches(&self, key: &str, ctrl: bool, alt: bool, meta: bool, shift: bool) -> bool {
        self.ctrl == ctrl
            && self.alt == alt
            && self.meta == meta
            && self.shift == shift
            && self.key == normalize_key(key)
    }
}

fn normalize_key(key: &str) -> String {
    if key.eq_ignore_ascii_case("space") {
        " ".to_string()
    } else if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}
