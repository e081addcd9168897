use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Shown in place of a reply whenever a chat request fails.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "InfraPilot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    /// Wall-clock time the message was created, as `HH:MM`
    pub time: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::at(text, Sender::User, Local::now())
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::at(text, Sender::Bot, Local::now())
    }

    pub fn fallback() -> Self {
        Self::bot(FALLBACK_REPLY)
    }

    pub fn at(text: impl Into<String>, sender: Sender, now: DateTime<Local>) -> Self {
        Self {
            text: text.into(),
            sender,
            time: now.format("%H:%M").to_string(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
