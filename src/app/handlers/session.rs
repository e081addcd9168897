use crate::app::{Action, AppState, Services};
use crate::auth::{self, AuthSession};
use anyhow::Result;
use tokio::sync::mpsc;

pub fn handle_session_action(
    state: &mut AppState,
    action: Action,
    services: &mut Services,
    action_tx: &mpsc::UnboundedSender<Action>,
) -> Result<()> {
    match action {
        Action::AuthResolved(session) => {
            apply_session(state, session, services, action_tx);
        }
        Action::SubmitToken => {
            let token = std::mem::take(&mut state.ui.token_buffer);
            if token.trim().is_empty() {
                return Ok(());
            }
            let session = AuthSession::from_token(&token, &services.config.identity);
            apply_session(state, session, services, action_tx);
        }
        Action::SignOut => {
            if !state.auth.is_authenticated() {
                return Ok(());
            }
            tracing::info!(email = ?state.auth.email(), "signing out");
            services.disconnect();
            state.auth.sign_out();
            state.clear_session();
            state.ui.status_message = Some(match auth::logout_url(&services.config.identity) {
                Ok(url) => format!("Signed out. End the browser session at {}", url),
                Err(_) => "Signed out".to_string(),
            });
        }
        _ => {}
    }
    Ok(())
}

/// Install `session` and, when it is signed in, connect the backend client
/// and start polling.
fn apply_session(
    state: &mut AppState,
    session: AuthSession,
    services: &mut Services,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    services.disconnect();

    if !session.is_authenticated() {
        if let Some(error) = session.error() {
            tracing::warn!(error, "authentication failed");
        }
        state.auth = session;
        return;
    }

    match services.connect(&session, action_tx) {
        Ok(()) => {
            tracing::info!(email = ?session.email(), "signed in");
            state.ui.status_message = session.email().map(|email| format!("Signed in as {}", email));
            state.auth = session;
        }
        Err(e) => {
            tracing::error!(error = %e, "could not create API client");
            state.auth = AuthSession::failed(format!("Could not connect to the API: {}", e));
        }
    }
}
