use crate::app::AppState;
use crate::models::{ChatMessage, Sender};
use crate::tui::utils::{scroll_top, wrap_text};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Sender::Bot => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}

/// Rendered rows for one message: a sender header followed by wrapped text
fn message_lines(message: &ChatMessage, width: usize, show_timestamps: bool) -> Vec<Line<'static>> {
    let mut header = vec![Span::styled(message.sender.display_name(), sender_style(message.sender))];
    if show_timestamps {
        header.push(Span::styled(format!("  {}", message.time), Style::default().fg(Color::DarkGray)));
    }

    let text_style = match message.sender {
        Sender::User => Style::default().fg(Color::White),
        Sender::Bot => Style::default().fg(Color::Gray),
    };

    let mut lines = vec![Line::from(header)];
    lines.extend(
        wrap_text(&message.text, width.saturating_sub(2))
            .into_iter()
            .map(|row| Line::from(Span::styled(format!("  {}", row), text_style))),
    );
    lines.push(Line::from(""));
    lines
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = match state.chat.scroll_from_bottom {
        0 => " InfraPilot ".to_string(),
        n => format!(" InfraPilot (scrolled {} lines) ", n),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.chat.messages.is_empty() && !state.chat.loading {
        render_welcome(frame, inner);
        return;
    }

    let width = inner.width as usize;
    let mut lines: Vec<Line> = state
        .chat
        .messages
        .iter()
        .flat_map(|m| message_lines(m, width, state.ui.show_timestamps))
        .collect();

    if state.chat.loading {
        lines.push(Line::from(vec![
            Span::styled(Sender::Bot.display_name(), sender_style(Sender::Bot)),
            Span::styled(
                format!(" is typing{}", state.typing_dots()),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    let top = scroll_top(
        lines.len(),
        inner.height as usize,
        state.chat.scroll_from_bottom as usize,
    );
    let paragraph = Paragraph::new(lines).scroll((top.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, inner);
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to InfraPilot",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Describe the infrastructure you need and I'll provision it.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "Try: \"Create a Postgres database for the orders service\"",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let top_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let area = Rect {
        y: area.y + top_pad,
        height: area.height.saturating_sub(top_pad),
        ..area
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
