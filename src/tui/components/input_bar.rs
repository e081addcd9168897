use crate::app::AppState;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let loading = state.chat.loading;
    let (title, border) = if loading {
        (" Waiting for reply ", Color::DarkGray)
    } else {
        (" Message (Enter to send) ", Color::Cyan)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    // Keep the tail of long input in view
    let prompt = "> ";
    let room = (inner.width as usize).saturating_sub(prompt.len() + 1);
    let chars: Vec<char> = state.chat.input.chars().collect();
    let visible: String = chars[chars.len().saturating_sub(room)..].iter().collect();

    let text_style = if loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Cyan)),
        Span::styled(visible.clone(), text_style),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    if !loading && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (prompt.len() + visible.chars().count()) as u16;
        frame.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y));
    }
}
