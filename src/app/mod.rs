mod action;
mod chat;
mod handler;
mod handlers;
mod notifications;
mod poller;
mod runtime;
mod services;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::Action;
pub use chat::ChatState;
pub use handler::process_action;
pub use runtime::run_tui;
pub use services::Services;
pub use state::{AppState, InputMode, Screen};
