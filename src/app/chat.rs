use crate::api::BackendApi;
use crate::models::ChatMessage;
use std::fmt::Display;

/// State of the chat session: history, the input line, and whether a reply
/// is outstanding.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub loading: bool,
    /// Lines scrolled back from the newest message (0 = pinned to bottom)
    pub scroll_from_bottom: u16,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// First half of a send. Appends the user message, clears the input and
    /// marks the session as loading. Returns the text to post, or None when
    /// the text is blank or there is no authenticated client.
    pub fn begin_send(&mut self, text: &str, authenticated: bool) -> Option<String> {
        if !authenticated || text.trim().is_empty() {
            return None;
        }

        let text = text.to_string();
        self.messages.push(ChatMessage::user(text.clone()));
        self.input.clear();
        self.loading = true;
        self.scroll_from_bottom = 0;
        Some(text)
    }

    /// Second half of a send. Appends the reply, or the fallback message on
    /// any failure, then clears the loading flag.
    pub fn finish_send<E: Display>(&mut self, outcome: Result<String, E>) {
        let message = match outcome {
            Ok(reply) => ChatMessage::bot(reply),
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                ChatMessage::fallback()
            }
        };
        self.messages.push(message);
        self.loading = false;
        self.scroll_from_bottom = 0;
    }

    /// Full send against `api`, awaiting the reply inline. Returns whether a
    /// request was made.
    pub async fn send_message(&mut self, text: &str, api: Option<&dyn BackendApi>) -> bool {
        let Some(api) = api else {
            return false;
        };
        let Some(text) = self.begin_send(text, true) else {
            return false;
        };

        let outcome = api.chat_post(&text).await.map(|reply| reply.response);
        self.finish_send(outcome);
        true
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }
}
