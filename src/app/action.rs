use crate::auth::AuthSession;
use crate::models::Deployment;

#[derive(Debug, Clone)]
pub enum Action {
    // Chat input
    InputChar(char),
    InputBackspace,
    InputClear,
    Paste(String),
    SubmitMessage,
    ChatReplied {
        generation: u64,
        outcome: Result<String, String>, // reply text or error description
    },

    // Chat history scrolling
    ScrollUp,
    ScrollDown,
    ScrollToBottom,

    // Notification panel
    ToggleNotifications,   // Bell: show/hide without acknowledging
    DismissNotifications,  // Close button: acknowledge everything shown
    SelectNextResource,
    SelectPrevResource,
    ToggleCredentials,

    // Deployment polling
    PollStarted {
        generation: u64,
        seq: u64,
    },
    DeploymentsPolled {
        generation: u64,
        seq: u64,
        outcome: Result<Vec<Deployment>, String>,
    },

    // Auth
    AuthResolved(AuthSession),
    SubmitToken,
    SignOut,

    // UI modes
    EnterHelpMode,
    ExitMode,

    // App control
    Quit,
    Tick,
    Resize(u16, u16),
}

impl Action {
    /// Resolve a keybinding action name. Only parameterless actions can be bound.
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "InputClear" => Action::InputClear,
            "SubmitMessage" => Action::SubmitMessage,
            "ScrollUp" => Action::ScrollUp,
            "ScrollDown" => Action::ScrollDown,
            "ScrollToBottom" => Action::ScrollToBottom,
            "ToggleNotifications" => Action::ToggleNotifications,
            "DismissNotifications" => Action::DismissNotifications,
            "SelectNextResource" => Action::SelectNextResource,
            "SelectPrevResource" => Action::SelectPrevResource,
            "ToggleCredentials" => Action::ToggleCredentials,
            "SignOut" => Action::SignOut,
            "EnterHelpMode" => Action::EnterHelpMode,
            "ExitMode" => Action::ExitMode,
            "Quit" => Action::Quit,
            _ => return None,
        };
        Some(action)
    }
}
