//! Keyboard key normalization, chords, and virtual key codes.

use serde_json::{Value, json};

/// Modifier bitmask values used by `Input.dispatchKeyEvent`.
const MODIFIER_ALT: i32 = 1;
const MODIFIER_CONTROL: i32 = 2;
const MODIFIER_META: i32 = 4;
const MODIFIER_SHIFT: i32 = 8;

/// Normalize a single key token, case-insensitively. Unknown tokens pass
/// through unchanged.
pub fn normalize_key(token: &str) -> String {
    match token.to_lowercase().as_str() {
        "enter" => "Enter",
        "tab" => "Tab",
        "escape" | "esc" => "Escape",
        "ctrl" | "control" => "Control",
        "alt" => "Alt",
        "shift" => "Shift",
        "meta" => "Meta",
        "space" => " ",
        "backspace" => "Backspace",
        "delete" => "Delete",
        "arrowup" => "ArrowUp",
        "arrowdown" => "ArrowDown",
        "arrowleft" => "ArrowLeft",
        "arrowright" => "ArrowRight",
        _ => return token.to_string(),
    }
    .to_string()
}

/// Bitmask contribution of a modifier key name, if it is one.
pub fn modifier_bit(key: &str) -> Option<i32> {
    match key {
        "Alt" => Some(MODIFIER_ALT),
        "Control" => Some(MODIFIER_CONTROL),
        "Meta" => Some(MODIFIER_META),
        "Shift" => Some(MODIFIER_SHIFT),
        _ => None,
    }
}

/// The select-all chord modifier for this platform.
pub fn platform_command_modifier() -> i32 {
    if cfg!(target_os = "macos") {
        MODIFIER_META
    } else {
        MODIFIER_CONTROL
    }
}

/// Windows virtual key code for a named key, or the uppercase ASCII value
/// for a single printable character.
pub fn virtual_key_code(key: &str) -> Option<i32> {
    let code = match key {
        "Enter" => 13,
        "Tab" => 9,
        "Escape" => 27,
        "Backspace" => 8,
        "Delete" => 46,
        " " => 32,
        "ArrowUp" => 38,
        "ArrowDown" => 40,
        "ArrowLeft" => 37,
        "ArrowRight" => 39,
        "Control" => 17,
        "Alt" => 18,
        "Shift" => 16,
        "Meta" => 91,
        _ => {
            let mut chars = key.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            return Some(ch.to_ascii_uppercase() as i32);
        }
    };
    Some(code)
}

/// A parsed key input: zero or more modifiers plus the main key, all
/// normalized token by token.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyChord {
    pub modifiers: Vec<String>,
    pub key: String,
}

impl KeyChord {
    /// Parse a `+`-joined combination like `ctrl+a` or a single key.
    pub fn parse(input: &str) -> Self {
        let mut tokens: Vec<String> = input.split('+').map(normalize_key).collect();
        let key = tokens.pop().unwrap_or_default();
        Self { modifiers: tokens, key }
    }

    /// Combined bitmask of the chord's modifiers.
    pub fn bitmask(&self) -> i32 {
        self.modifiers
            .iter()
            .filter_map(|m| modifier_bit(m))
            .fold(0, |acc, bit| acc | bit)
    }
}

/// Base `Input.dispatchKeyEvent` params for a key: name, code, and virtual
/// key codes for named keys; text payload for printable characters.
pub fn key_event_params(key: &str) -> Value {
    if let Some(code) = named_key_code(key) {
        json!({
            "key": key,
            "code": key,
            "windowsVirtualKeyCode": code,
            "nativeVirtualKeyCode": code,
        })
    } else {
        let code = if key.chars().count() == 1 {
            format!("Key{}", key.to_uppercase())
        } else {
            key.to_string()
        };
        json!({
            "key": key,
            "code": code,
            "text": key,
            "unmodifiedText": key,
            "windowsVirtualKeyCode": virtual_key_code(key).unwrap_or(0),
        })
    }
}

fn named_key_code(key: &str) -> Option<i32> {
    match key {
        "Enter" | "Tab" | "Escape" | "Backspace" | "Delete" | " " | "ArrowUp" | "ArrowDown"
        | "ArrowLeft" | "ArrowRight" | "Control" | "Alt" | "Shift" | "Meta" => {
            virtual_key_code(key)
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
