// src/view_lib/command.rs

use winit::keyboard::KeyCode;

/// Everything the user can ask for, from the keyboard or the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SeedTriangle,
    AddRandomVertex,
    BeginVertexSelection,
    CancelSelection,
    ToggleDisplayMode,
    ResetView,
    ZoomIn,
    ZoomOut,
    /// Hide vertices whose display index exceeds the bound; `None` shows all.
    ShowUpTo(Option<usize>),
}

impl Command {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyS => Some(Command::SeedTriangle),
            KeyCode::KeyR => Some(Command::AddRandomVertex),
            KeyCode::KeyA => Some(Command::BeginVertexSelection),
            KeyCode::KeyT => Some(Command::ToggleDisplayMode),
            KeyCode::KeyC => Some(Command::ResetView),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(Command::ZoomIn),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(Command::ZoomOut),
            KeyCode::Escape => Some(Command::CancelSelection),
            _ => None,
        }
    }

    /// Button caption; the key in parentheses.
    pub fn label(&self) -> &'static str {
        match self {
            Command::SeedTriangle => "Start (S)",
            Command::AddRandomVertex => "Random Vertex (R)",
            Command::BeginVertexSelection => "Add Vertex (A)",
            Command::CancelSelection => "Cancel (Esc)",
            Command::ToggleDisplayMode => "Toggle Index/Color (T)",
            Command::ResetView => "Center (C)",
            Command::ZoomIn => "Zoom In (+)",
            Command::ZoomOut => "Zoom Out (-)",
            Command::ShowUpTo(_) => "Go to vertex",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_keys_map_to_commands() {
        assert_eq!(Command::from_key(KeyCode::KeyS), Some(Command::SeedTriangle));
        assert_eq!(Command::from_key(KeyCode::KeyR), Some(Command::AddRandomVertex));
        assert_eq!(Command::from_key(KeyCode::KeyA), Some(Command::BeginVertexSelection));
        assert_eq!(Command::from_key(KeyCode::KeyT), Some(Command::ToggleDisplayMode));
        assert_eq!(Command::from_key(KeyCode::KeyC), Some(Command::ResetView));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(Command::from_key(KeyCode::KeyQ), None);
        assert_eq!(Command::from_key(KeyCode::Space), None);
    }
}
