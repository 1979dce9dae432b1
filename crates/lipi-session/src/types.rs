use lipi_core::command::Command;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        meta: false,
        shift: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl, Alt or Meta held: the key is a chord, not text.
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// A key-down event from the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character (Shift may be held).
    Text { text: String },
    Space,
    Enter,
    Tab,
    Backspace,
    ForwardDelete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    /// Shift, Alt, Control or Meta pressed on its own.
    ModifierOnly,
    /// Any key pressed while Ctrl, Alt or Meta is held.
    ModifiedKey { key: String, modifiers: Modifiers },
    /// Other named, non-printable keys (F1, Insert, ...).
    Other { key: String },
}

impl KeyEvent {
    pub fn text(text: &str) -> Self {
        Self::Text {
            text: text.to_string(),
        }
    }

    /// The event a plain keystroke producing `c` would generate.
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Self::Space,
            '\n' | '\r' => Self::Enter,
            '\t' => Self::Tab,
            '\u{8}' => Self::Backspace,
            '\u{7f}' => Self::ForwardDelete,
            '\u{1b}' => Self::Escape,
            _ => Self::Text {
                text: c.to_string(),
            },
        }
    }

    /// Classify a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str, modifiers: Modifiers) -> Self {
        match key {
            "Shift" | "Alt" | "AltGraph" | "Control" | "Meta" | "CapsLock" => {
                return Self::ModifierOnly
            }
            _ => {}
        }
        if modifiers.is_chord() {
            return Self::ModifiedKey {
                key: key.to_string(),
                modifiers,
            };
        }
        match key {
            " " | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" => Self::ForwardDelete,
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            _ if key.chars().count() == 1 => Self::text(key),
            _ => Self::Other {
                key: key.to_string(),
            },
        }
    }

    /// Everything except printable text ends the current word.
    pub fn is_boundary(&self) -> bool {
        !matches!(self, Self::Text { .. })
    }
}

/// Response from `handle_key`, returned to the host surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyResponse {
    /// The host must suppress the key's default behaviour.
    pub consumed: bool,
    /// The document was mutated.
    pub changed: bool,
    /// Shortcut command that was run, if any.
    pub command: Option<Command>,
}

impl KeyResponse {
    pub(crate) fn not_consumed() -> Self {
        Self::default()
    }

    pub(crate) fn consumed(changed: bool) -> Self {
        Self {
            consumed: true,
            changed,
            command: None,
        }
    }
}
