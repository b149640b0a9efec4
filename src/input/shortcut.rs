use crate::tool::state::{Tone, ToolKind};

/// Keyboard-triggered actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Cmd/Ctrl+S.
    Save,
    /// Cmd/Ctrl+O.
    Open,
    /// Cmd/Ctrl+Z.
    Undo,
    /// `b` (pencil) or `e` (eraser).
    Tool(ToolKind),
    /// `1`, `2`, `3`.
    Tone(Tone),
    /// `c`, after confirmation.
    Clear,
    /// `[`.
    Narrow,
    /// `]`.
    Widen,
}

impl Shortcut {
    /// Map a key name plus "command modifier held" (Cmd on macOS, Ctrl elsewhere).
    ///
    /// Letters are case-insensitive. Plain keys do not fire while the modifier is held, so
    /// Ctrl+C stays free for the host.
    pub fn from_key(key: &str, command: bool) -> Option<Self> {
        let key = key.to_lowercase();
        if command {
            return match key.as_str() {
                "s" => Some(Self::Save),
                "o" => Some(Self::Open),
                "z" => Some(Self::Undo),
                _ => None,
            };
        }
        match key.as_str() {
            "b" => Some(Self::Tool(ToolKind::Pencil)),
            "e" => Some(Self::Tool(ToolKind::Eraser)),
            "c" => Some(Self::Clear),
            "1" => Some(Self::Tone(Tone::Dark)),
            "2" => Some(Self::Tone(Tone::Medium)),
            "3" => Some(Self::Tone(Tone::Light)),
            "[" => Some(Self::Narrow),
            "]" => Some(Self::Widen),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/shortcut.rs"]
mod tests;
