use crate::config::keybindings::{KeyCombo, KeybindingConfig};
use crate::tui::utils::centered_rect;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashMap;

fn describe(action: &str) -> &str {
    match action {
        "Quit" => "Quit",
        "ToggleNotifications" => "Show/hide deployment notifications",
        "DismissNotifications" => "Mark all as read and close",
        "SelectNextResource" => "Next resource",
        "SelectPrevResource" => "Previous resource",
        "ToggleCredentials" => "Show/hide database credentials",
        "SignOut" => "Sign out",
        "EnterHelpMode" => "This help",
        "ScrollUp" => "Scroll chat up",
        "ScrollDown" => "Scroll chat down",
        "ScrollToBottom" => "Jump to newest message",
        other => other,
    }
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn entry(keys: String, description: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}

/// One row per action, keys joined and sorted for a stable layout
fn binding_lines(bindings: &HashMap<KeyCombo, String>) -> Vec<Line<'static>> {
    let mut by_action: HashMap<&str, Vec<String>> = HashMap::new();
    for (combo, action) in bindings {
        by_action.entry(action.as_str()).or_default().push(combo.display());
    }

    let mut rows: Vec<(&str, Vec<String>)> = by_action.into_iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    rows.into_iter()
        .map(|(action, mut keys)| {
            keys.sort();
            entry(keys.join(", "), describe(action).to_string())
        })
        .collect()
}

pub fn render(frame: &mut Frame, keybindings: &KeybindingConfig) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let mut help_text = vec![
        Line::from(Span::styled(
            "InfraPilot - DevOps assistant",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Chat"),
        entry("Enter".to_string(), "Send message".to_string()),
        entry("Esc".to_string(), "Clear input".to_string()),
        Line::from(""),
        heading("Anywhere"),
    ];
    help_text.extend(binding_lines(&keybindings.global));
    help_text.push(Line::from(""));
    help_text.push(heading("Notification panel"));
    help_text.extend(binding_lines(&keybindings.panel));

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_lines_group_keys_by_action() {
        let config = KeybindingConfig::default();
        let lines = binding_lines(&config.global);
        let quit: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .filter(|l| l.ends_with("Quit"))
            .collect();
        assert_eq!(quit.len(), 1);
        assert!(quit[0].contains("Ctrl-c, Ctrl-q"));
    }
}
