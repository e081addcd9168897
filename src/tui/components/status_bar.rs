use crate::app::{AppState, InputMode, Screen};
use crate::config::keybindings::KeybindingConfig;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn mode_badge(label: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", label),
        Style::default().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD),
    )
}

fn hint(keybindings: &KeybindingConfig, action: &str, label: &str) -> Vec<Span<'static>> {
    match keybindings.key_for(action) {
        Some(key) => vec![
            Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {}  ", label), Style::default().fg(Color::Gray)),
        ],
        None => Vec::new(),
    }
}

/// Bell with the unviewed count, lit while anything is unacknowledged
fn bell(state: &AppState) -> Vec<Span<'static>> {
    let notifications = &state.notifications;
    let mut spans = Vec::new();
    if notifications.is_fetching() {
        spans.push(Span::styled("⟳ ", Style::default().fg(Color::DarkGray)));
    }
    if notifications.has_unviewed() {
        spans.push(Span::styled(
            format!("🔔 {} ", notifications.unviewed_count()),
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled("🔕 ", Style::default().fg(Color::DarkGray)));
    }
    spans
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, keybindings: &KeybindingConfig) {
    let (mut left, mut right) = match (state.ui.input_mode, state.screen()) {
        (InputMode::Help, _) => (
            vec![mode_badge("HELP", Color::Yellow)],
            vec![Span::styled("Press Esc to close", Style::default().fg(Color::Gray))],
        ),
        (_, Screen::Loading) => (
            vec![mode_badge("STARTING", Color::DarkGray)],
            hint(keybindings, "Quit", "quit"),
        ),
        (_, Screen::Login) => (
            vec![mode_badge("SIGN IN", Color::Magenta)],
            [hint(keybindings, "EnterHelpMode", "help"), hint(keybindings, "Quit", "quit")].concat(),
        ),
        (_, Screen::Chat) if state.notifications.panel_open => (
            vec![mode_badge("DEPLOYMENTS", Color::Yellow)],
            [
                hint(keybindings, "SelectNextResource", "next"),
                hint(keybindings, "ToggleCredentials", "credentials"),
                hint(keybindings, "DismissNotifications", "mark read"),
            ]
            .concat(),
        ),
        (_, Screen::Chat) => (
            vec![mode_badge("CHAT", Color::Green)],
            [
                hint(keybindings, "ToggleNotifications", "notifications"),
                hint(keybindings, "EnterHelpMode", "help"),
            ]
            .concat(),
        ),
    };

    if let Some(email) = state.auth.email() {
        left.push(Span::styled(format!(" {}", email), Style::default().fg(Color::White)));
    }
    if let Some(message) = &state.ui.status_message {
        left.push(Span::styled(format!("  {}", message), Style::default().fg(Color::Gray)));
    }
    if state.screen() == Screen::Chat {
        right.extend(bell(state));
    }

    let left_len: usize = left.iter().map(|s| s.width()).sum();
    let right_len: usize = right.iter().map(|s| s.width()).sum();
    let padding = (area.width as usize).saturating_sub(left_len + right_len + 1);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(right);
    spans.push(Span::raw(" "));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
