use crate::app::{Action, AppState, InputMode, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::EventHandler;

/// Printable character without Ctrl/Alt held
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

impl EventHandler {
    pub(super) fn handle_key_event(&self, key: KeyEvent, state: &AppState) -> Action {
        if state.ui.input_mode == InputMode::Help {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::F(1) => Action::ExitMode,
                _ => Action::Tick,
            };
        }

        if let Some(action) = self.keybindings.global_action(&key).and_then(Action::from_name) {
            return action;
        }

        match state.screen() {
            Screen::Loading => Action::Tick,
            Screen::Login => match key.code {
                KeyCode::Enter => Action::SubmitToken,
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Esc => Action::InputClear,
                _ => typed_char(&key).map(Action::InputChar).unwrap_or(Action::Tick),
            },
            Screen::Chat => {
                // The open panel captures its own keys before the chat input
                if state.notifications.panel_open {
                    if let Some(action) = self.keybindings.panel_action(&key).and_then(Action::from_name) {
                        return action;
                    }
                }

                match key.code {
                    KeyCode::Enter => Action::SubmitMessage,
                    KeyCode::Backspace => Action::InputBackspace,
                    KeyCode::Esc => Action::InputClear,
                    _ => typed_char(&key).map(Action::InputChar).unwrap_or(Action::Tick),
                }
            }
        }
    }
}
