//! Keyboard shortcuts as an alternate input source.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Next,
    Previous,
    TogglePause,
    ToggleMute,
    Like,
}

impl KeyCommand {
    /// Maps a DOM-style `KeyboardEvent.key` value. Letters are
    /// case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "PageDown" => return Some(KeyCommand::Next),
            "ArrowUp" | "PageUp" => return Some(KeyCommand::Previous),
            " " | "Spacebar" => return Some(KeyCommand::TogglePause),
            _ => {}
        }
        let mut chars = key.chars();
        let (Some(letter), None) = (chars.next(), chars.next()) else {
            return None;
        };
        match letter.to_ascii_lowercase() {
            'j' => Some(KeyCommand::Next),
            'k' => Some(KeyCommand::Previous),
            'p' => Some(KeyCommand::TogglePause),
            'm' => Some(KeyCommand::ToggleMute),
            'l' => Some(KeyCommand::Like),
            _ => None,
        }
    }
}
