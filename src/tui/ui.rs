use crate::app::{AppState, InputMode, Screen};
use crate::config::keybindings::KeybindingConfig;
use crate::config::AppConfig;
use crate::tui::components::{
    chat_pane, help_popup, input_bar, login_screen, notification_panel, status_bar,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn draw(frame: &mut Frame, state: &AppState, config: &AppConfig, keybindings: &KeybindingConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());
    let main_area = chunks[0];
    let status_area = chunks[1];

    match state.screen() {
        Screen::Loading => login_screen::render_loading(frame, main_area, state),
        Screen::Login => login_screen::render(frame, main_area, state, &config.identity),
        Screen::Chat => {
            let chat_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(3),    // Messages
                    Constraint::Length(3), // Input
                ])
                .split(main_area);

            chat_pane::render(frame, chat_chunks[0], state);
            input_bar::render(frame, chat_chunks[1], state);

            if state.notifications.panel_open {
                notification_panel::render(frame, main_area, state);
            }
        }
    }

    status_bar::render(frame, status_area, state, keybindings);

    if state.ui.input_mode == InputMode::Help {
        help_popup::render(frame, keybindings);
    }
}
