use crate::app::{Action, AppState, Screen, Services};
use anyhow::Result;

pub fn handle_notification_action(state: &mut AppState, action: Action, services: &Services) -> Result<()> {
    let signed_in = state.screen() == Screen::Chat;

    match action {
        Action::ToggleNotifications if signed_in => state.notifications.toggle_panel(),
        Action::DismissNotifications if state.notifications.panel_open => {
            state.notifications.dismiss_panel();
        }
        Action::SelectNextResource => state.notifications.select_next(),
        Action::SelectPrevResource => state.notifications.select_prev(),
        Action::ToggleCredentials => state.notifications.toggle_reveal_selected(),

        // Results from a previous connection belong to the previous user
        Action::PollStarted { generation, seq } if signed_in && services.is_current(generation) => {
            state.notifications.poll_started(seq);
        }
        Action::DeploymentsPolled {
            generation,
            seq,
            outcome,
        } if signed_in && services.is_current(generation) => {
            state.notifications.apply_poll(seq, outcome);
        }
        Action::PollStarted { generation, seq } | Action::DeploymentsPolled { generation, seq, .. } => {
            tracing::debug!(generation, seq, "ignoring poll result from a previous session");
        }
        _ => {}
    }
    Ok(())
}
