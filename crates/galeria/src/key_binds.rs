use crate::message::{LightboxMessage, Message};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Prev,
    Next,
    CloseModal,
}

impl KeyAction {
    pub fn message(self) -> Message {
        match self {
            KeyAction::Prev => Message::Lightbox(LightboxMessage::Prev),
            KeyAction::Next => Message::Lightbox(LightboxMessage::Next),
            KeyAction::CloseModal => Message::Lightbox(LightboxMessage::Close),
        }
    }
}

/// Bindings keyed by `KeyboardEvent.key`. They only apply while the lightbox is open.
pub fn init_key_binds() -> HashMap<&'static str, KeyAction> {
    let mut binds = HashMap::new();

    binds.insert("Escape", KeyAction::CloseModal);
    binds.insert("ArrowLeft", KeyAction::Prev);
    binds.insert("ArrowRight", KeyAction::Next);

    binds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds() {
        let binds = init_key_binds();
        assert_eq!(binds.len(), 3);
        assert_eq!(binds.get("Escape"), Some(&KeyAction::CloseModal));
        assert_eq!(binds.get("ArrowLeft"), Some(&KeyAction::Prev));
        assert_eq!(binds.get("ArrowRight"), Some(&KeyAction::Next));
        assert_eq!(binds.get("Enter"), None);
    }

    #[test]
    fn test_actions_map_to_lightbox_messages() {
        assert_eq!(
            KeyAction::CloseModal.message(),
            Message::Lightbox(LightboxMessage::Close)
        );
        assert_eq!(
            KeyAction::Next.message(),
            Message::Lightbox(LightboxMessage::Next)
        );
    }
}
