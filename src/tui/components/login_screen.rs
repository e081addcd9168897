use crate::app::AppState;
use crate::auth;
use crate::config::IdentityConfig;
use crate::tui::utils::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Token preview that never shows more than the first few characters
fn masked_token(token: &str) -> String {
    let len = token.chars().count();
    if len == 0 {
        return String::new();
    }
    let head: String = token.chars().take(6).collect();
    format!("{}… ({} chars)", head, len)
}

pub fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = centered_rect(50, 20, area);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!("Checking session{}", state.typing_dots()),
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, identity: &IdentityConfig) {
    let area = centered_rect(70, 60, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "InfraPilot",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(error) = state.auth.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    match auth::signin_url(identity) {
        Ok(url) => {
            lines.push(Line::from("Sign in with your browser:"));
            lines.push(Line::from(Span::styled(
                url.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            )));
        }
        Err(e) => {
            lines.push(Line::from(Span::styled(
                format!("Sign-in is not configured: {}", e),
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Then paste your ID token and press Enter."));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Token: ", Style::default().fg(Color::DarkGray)),
        Span::styled(masked_token(&state.ui.token_buffer), Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::Cyan)),
    ]));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Sign in ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
    frame.render_widget(paragraph, area);
}
