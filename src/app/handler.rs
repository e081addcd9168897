use crate::app::{Action, AppState, Services};
use anyhow::Result;
use tokio::sync::mpsc;

use super::handlers::chat::handle_chat_action;
use super::handlers::input::handle_input_action;
use super::handlers::notifications::handle_notification_action;
use super::handlers::session::handle_session_action;

pub fn process_action(
    state: &mut AppState,
    action: Action,
    services: &mut Services,
    action_tx: &mpsc::UnboundedSender<Action>,
) -> Result<()> {
    match action {
        Action::Quit => {
            state.system.should_quit = true;
        }
        Action::Tick => {
            state.tick_animation();
        }
        Action::Resize(w, h) => {
            state.system.terminal_size = (w, h);
        }

        Action::EnterHelpMode
        | Action::ExitMode
        | Action::InputChar(_)
        | Action::InputBackspace
        | Action::InputClear
        | Action::Paste(_) => handle_input_action(state, action)?,

        Action::SubmitMessage
        | Action::ChatReplied { .. }
        | Action::ScrollUp
        | Action::ScrollDown
        | Action::ScrollToBottom => handle_chat_action(state, action, services, action_tx)?,

        Action::ToggleNotifications
        | Action::DismissNotifications
        | Action::SelectNextResource
        | Action::SelectPrevResource
        | Action::ToggleCredentials
        | Action::PollStarted { .. }
        | Action::DeploymentsPolled { .. } => handle_notification_action(state, action, services)?,

        Action::AuthResolved(_) | Action::SubmitToken | Action::SignOut => {
            handle_session_action(state, action, services, action_tx)?
        }
    }

    Ok(())
}
