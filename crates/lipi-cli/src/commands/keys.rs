//! Keystroke notation for the `type` command.
//!
//! Plain characters are typed as-is (`' '` is Space, `\n` is Enter).
//! Named keys and chords go in braces: `{enter}`, `{bs}`, `{left}`,
//! `{ctrl+b}`. `{{` types a literal `{`.

use lipi_session::{KeyEvent, Modifiers};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeysError {
    #[error("unclosed '{{' at char {0}")]
    Unclosed(usize),
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
}

pub fn parse_keys(input: &str) -> Result<Vec<KeyEvent>, KeysError> {
    let mut events = Vec::new();
    let mut chars = input.chars().enumerate().peekable();
    while let Some((pos, c)) = chars.next() {
        if c != '{' {
            events.push(KeyEvent::from_char(c));
            continue;
        }
        if let Some((_, '{')) = chars.peek() {
            chars.next();
            events.push(KeyEvent::text("{"));
            continue;
        }
        let mut name = String::new();
        let mut closed = false;
        for (_, c) in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            name.push(c);
        }
        if !closed {
            return Err(KeysError::Unclosed(pos));
        }
        events.push(named_key(&name)?);
    }
    Ok(events)
}

fn named_key(name: &str) -> Result<KeyEvent, KeysError> {
    let unknown = || KeysError::UnknownKey(name.to_string());
    let mut parts: Vec<&str> = name.split('+').collect();
    if name.ends_with("++") {
        parts.truncate(parts.len().saturating_sub(2));
        parts.push("+");
    }
    let (key, mods) = parts.split_last().ok_or_else(unknown)?;
    let mut modifiers = Modifiers::NONE;
    for m in mods {
        match m.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.ctrl = true,
            "alt" | "option" => modifiers.alt = true,
            "meta" | "cmd" => modifiers.meta = true,
            "shift" => modifiers.shift = true,
            _ => return Err(unknown()),
        }
    }
    let dom = match key.to_ascii_lowercase().as_str() {
        "space" => " ",
        "enter" | "return" => "Enter",
        "tab" => "Tab",
        "bs" | "backspace" => "Backspace",
        "del" | "delete" => "Delete",
        "esc" | "escape" => "Escape",
        "left" => "ArrowLeft",
        "right" => "ArrowRight",
        "up" => "ArrowUp",
        "down" => "ArrowDown",
        "home" => "Home",
        "end" => "End",
        "pageup" => "PageUp",
        "pagedown" => "PageDown",
        "shift" => "Shift",
        _ if key.chars().count() == 1 => *key,
        _ => return Err(unknown()),
    };
    Ok(KeyEvent::from_dom(dom, modifiers))
}
