//! The "chai chat" companion panel.
//!
//! The terminal only knows that the chat should open; what the companion
//! says comes from a [`ChatResponder`]. The bundled responder works offline.

use termfolio_core::{CHAT_REPLY, InputState};

/// Opening line shown the first time the panel opens
pub const CHAT_GREETING: &str = "Hey! I'm chai chat. Pour yourself a cup and ask me anything.";

/// Produces the companion's answer to a visitor message
pub trait ChatResponder {
    fn reply(&mut self, message: &str) -> String;
}

/// Replies without any network access
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineResponder;

impl ChatResponder for OfflineResponder {
    fn reply(&mut self, _: &str) -> String {
        CHAT_REPLY.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    Visitor,
    Companion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ChatPanel {
    open: bool,
    messages: Vec<ChatMessage>,
    pub input: InputState,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the panel; the greeting is added once per session
    pub fn open(&mut self) {
        self.open = true;
        if self.messages.is_empty() {
            self.messages.push(ChatMessage { role: ChatRole::Companion, text: CHAT_GREETING.to_string() });
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send the composed message; blank input is ignored
    pub fn send(&mut self, responder: &mut dyn ChatResponder) -> bool {
        let message = self.input.take();
        let message = message.trim();
        if message.is_empty() {
            return false;
        }

        let reply = responder.reply(message);
        tracing::debug!(len = message.len(), "chat message sent");
        self.messages.push(ChatMessage { role: ChatRole::Visitor, text: message.to_string() });
        self.messages.push(ChatMessage { role: ChatRole::Companion, text: reply });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl ChatResponder for Echo {
        fn reply(&mut self, message: &str) -> String {
            format!("echo: {}", message)
        }
    }

    #[test]
    fn test_open_greets_once() {
        let mut panel = ChatPanel::new();
        assert!(!panel.is_open());

        panel.open();
        panel.close();
        panel.open();

        assert!(panel.is_open());
        assert_eq!(panel.messages().len(), 1);
        assert_eq!(panel.messages()[0].role, ChatRole::Companion);
    }

    #[test]
    fn test_offline_responder_says_hi() {
        let mut panel = ChatPanel::new();
        panel.open();
        panel.input.set("what do you study?");

        assert!(panel.send(&mut OfflineResponder));
        let messages = panel.messages();
        assert_eq!(messages[1], ChatMessage { role: ChatRole::Visitor, text: "what do you study?".to_string() });
        assert_eq!(messages[2], ChatMessage { role: ChatRole::Companion, text: "hi".to_string() });
        assert_eq!(panel.input.buffer, "");
    }

    #[test]
    fn test_blank_message_ignored() {
        let mut panel = ChatPanel::new();
        panel.input.set("   ");
        assert!(!panel.send(&mut Echo));
        assert!(panel.messages().is_empty());
    }

    #[test]
    fn test_custom_responder() {
        let mut panel = ChatPanel::new();
        panel.input.set("ping");
        panel.send(&mut Echo);
        assert_eq!(panel.messages()[1].text, "echo: ping");
    }
}
