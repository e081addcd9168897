use crate::app::{Action, AppState, InputMode, Screen};
use anyhow::Result;

/// Single-line input: newlines from a paste become spaces
fn flatten(data: &str) -> String {
    data.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

pub fn handle_input_action(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::EnterHelpMode => {
            state.ui.input_mode = InputMode::Help;
        }
        Action::ExitMode => {
            state.ui.input_mode = InputMode::Normal;
        }
        Action::InputChar(c) => match state.screen() {
            Screen::Login => state.ui.token_buffer.push(c),
            Screen::Chat => state.chat.input.push(c),
            Screen::Loading => {}
        },
        Action::InputBackspace => match state.screen() {
            Screen::Login => {
                state.ui.token_buffer.pop();
            }
            Screen::Chat => {
                state.chat.input.pop();
            }
            Screen::Loading => {}
        },
        Action::InputClear => match state.screen() {
            Screen::Login => state.ui.token_buffer.clear(),
            Screen::Chat => state.chat.input.clear(),
            Screen::Loading => {}
        },
        Action::Paste(data) => match state.screen() {
            // Tokens never contain whitespace
            Screen::Login => state
                .ui
                .token_buffer
                .extend(data.chars().filter(|c| !c.is_whitespace())),
            Screen::Chat => state.chat.input.push_str(&flatten(&data)),
            Screen::Loading => {}
        },
        _ => {}
    }
    Ok(())
}
