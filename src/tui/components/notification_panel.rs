use crate::app::AppState;
use crate::models::{CredentialView, Deployment, DetailLine};
use crate::tui::utils::side_panel_rect;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MASK: &str = "••••••••";

fn detail_line(detail: DetailLine) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(Color::DarkGray);
    match detail {
        DetailLine::Field { label, value } => vec![Line::from(vec![
            Span::styled(format!("    {}: ", label), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
        ])],
        DetailLine::Link { label, value } => vec![Line::from(vec![
            Span::styled(format!("    {}: ", label), label_style),
            Span::styled(
                value,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            ),
        ])],
        DetailLine::Credentials(CredentialView::Hidden) => vec![Line::from(vec![
            Span::styled("    Credentials: ", label_style),
            Span::styled(MASK, Style::default().fg(Color::DarkGray)),
        ])],
        DetailLine::Credentials(CredentialView::Revealed { username, password }) => {
            let value = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
            vec![
                Line::from(vec![
                    Span::styled("    Username: ", label_style),
                    Span::styled(value(username), Style::default().fg(Color::Yellow)),
                ]),
                Line::from(vec![
                    Span::styled("    Password: ", label_style),
                    Span::styled(value(password), Style::default().fg(Color::Yellow)),
                ]),
            ]
        }
    }
}

/// Panel body and the row of the selected resource header
fn panel_lines(state: &AppState) -> (Vec<Line<'static>>, usize) {
    let notifications = &state.notifications;
    let mut lines = Vec::new();
    let mut selected_row = 0;

    if notifications.is_fetching() {
        lines.push(Line::from(Span::styled(
            format!("Loading{}", state.typing_dots()),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let unviewed: Vec<&Deployment> = notifications.unviewed();
    if unviewed.is_empty() {
        lines.push(Line::from(Span::styled(
            "No new deployments",
            Style::default().fg(Color::DarkGray),
        )));
        return (lines, selected_row);
    }

    let mut resource_idx = 0;
    for deployment in unviewed {
        lines.push(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                deployment.session_id.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", deployment.display_timestamp()),
            Style::default().fg(Color::DarkGray),
        )));

        for resource in &deployment.resources {
            let selected = resource_idx == notifications.selected;
            if selected {
                selected_row = lines.len();
            }
            let marker = if selected { "› " } else { "  " };
            let header_style = if selected {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{} {} · {}", resource.kind().icon(), resource.type_label(), resource.deployment_id),
                    header_style,
                ),
            ]));

            let revealed = notifications.is_revealed(&deployment.session_id, &resource.deployment_id);
            lines.extend(resource.detail_lines(revealed).into_iter().flat_map(detail_line));
            resource_idx += 1;
        }
        lines.push(Line::from(""));
    }

    (lines, selected_row)
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = side_panel_rect(40, 36, area);
    frame.render_widget(Clear, area);

    let count = state.notifications.unviewed_count();
    let block = Block::default()
        .title(format!(" Deployments ({}) ", count))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner_height = block.inner(area).height as usize;

    let (lines, selected_row) = panel_lines(state);
    // Keep the selected resource on screen with a little context below it
    let scroll = (selected_row + 4).saturating_sub(inner_height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resource;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn state_with(deployments: Vec<Deployment>) -> AppState {
        let mut state = AppState::new();
        state.notifications.apply_poll::<String>(1, Ok(deployments));
        state
    }

    fn rds() -> Deployment {
        Deployment {
            session_id: "sess-1".to_string(),
            timestamp: "not a date".to_string(),
            resources: vec![Resource {
                deployment_id: "db-1".to_string(),
                resource_type: "rds".to_string(),
                resource_name: "orders".to_string(),
                value: Some("secret-arn".to_string()),
                is_sensitive: true,
                endpoint: Some("orders.rds.internal".to_string()),
                username: Some("admin".to_string()),
                password: Some("hunter2".to_string()),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_empty_panel() {
        let (lines, _) = panel_lines(&AppState::new());
        assert_eq!(text(&lines), vec!["No new deployments"]);
    }

    #[test]
    fn test_credentials_hidden_until_revealed() {
        let mut state = state_with(vec![rds()]);
        let rendered = text(&panel_lines(&state).0).join("\n");
        assert!(rendered.contains("sess-1"));
        assert!(rendered.contains("not a date"));
        assert!(rendered.contains("RDS · db-1"));
        assert!(rendered.contains("Endpoint: orders.rds.internal"));
        assert!(rendered.contains(MASK));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("secret-arn"));

        state.notifications.toggle_reveal_selected();
        let rendered = text(&panel_lines(&state).0).join("\n");
        assert!(rendered.contains("Username: admin"));
        assert!(rendered.contains("Password: hunter2"));
    }

    #[test]
    fn test_acknowledged_deployments_not_listed() {
        let mut state = state_with(vec![rds()]);
        state.notifications.dismiss_panel();
        let (lines, _) = panel_lines(&state);
        assert_eq!(text(&lines), vec!["No new deployments"]);
    }

    #[test]
    fn test_selected_row_tracks_cursor() {
        let mut second = rds();
        second.session_id = "sess-2".to_string();
        let mut state = state_with(vec![rds(), second]);

        let (_, first_row) = panel_lines(&state);
        state.notifications.select_next();
        let (lines, second_row) = panel_lines(&state);
        assert!(second_row > first_row);
        assert!(text(&lines)[second_row].starts_with("› "));
    }
}
