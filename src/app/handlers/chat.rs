use crate::app::{Action, AppState, Services};
use anyhow::Result;
use tokio::sync::mpsc;

/// Lines moved per scroll step
const SCROLL_STEP: u16 = 5;

pub fn handle_chat_action(
    state: &mut AppState,
    action: Action,
    services: &Services,
    action_tx: &mpsc::UnboundedSender<Action>,
) -> Result<()> {
    match action {
        Action::SubmitMessage => {
            // The input is disabled until the outstanding reply lands
            if state.chat.loading {
                return Ok(());
            }

            let Some(api) = services.api() else {
                return Ok(());
            };
            let input = state.chat.input.clone();
            let Some(text) = state.chat.begin_send(&input, true) else {
                return Ok(());
            };

            let generation = services.generation();
            let tx = action_tx.clone();
            tokio::spawn(async move {
                let outcome = api
                    .chat_post(&text)
                    .await
                    .map(|reply| reply.response)
                    .map_err(|e| e.to_string());
                let _ = tx.send(Action::ChatReplied { generation, outcome });
            });
        }
        Action::ChatReplied { generation, outcome } => {
            // Replies to a request sent before sign-out never reach the next session
            if services.is_current(generation) {
                state.chat.finish_send(outcome);
            } else {
                tracing::debug!(generation, "dropping chat reply from a previous session");
            }
        }
        Action::ScrollUp => state.chat.scroll_up(SCROLL_STEP),
        Action::ScrollDown => state.chat.scroll_down(SCROLL_STEP),
        Action::ScrollToBottom => state.chat.scroll_from_bottom = 0,
        _ => {}
    }
    Ok(())
}
