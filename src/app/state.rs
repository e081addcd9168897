use crate::auth::AuthSession;
use crate::config::AppConfig;

use super::chat::ChatState;
use super::notifications::NotificationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Help,
}

/// Which full-screen view the auth status calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Chat,
}

pub struct UIState {
    pub input_mode: InputMode,
    /// Token typed or pasted on the login screen
    pub token_buffer: String,
    pub status_message: Option<String>,
    pub show_timestamps: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            input_mode: InputMode::Normal,
            token_buffer: String::new(),
            status_message: None,
            show_timestamps: true,
        }
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SystemState {
    pub terminal_size: (u16, u16),
    pub animation_frame: u64,
    pub should_quit: bool,
}

impl SystemState {
    pub fn new() -> Self {
        Self {
            terminal_size: (80, 24),
            animation_frame: 0,
            should_quit: false,
        }
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AppState {
    pub auth: AuthSession,
    pub chat: ChatState,
    pub notifications: NotificationState,
    pub ui: UIState,
    pub system: SystemState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            auth: AuthSession::loading(),
            chat: ChatState::new(),
            notifications: NotificationState::new(),
            ui: UIState::new(),
            system: SystemState::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut state = Self::new();
        state.ui.show_timestamps = config.ui.show_timestamps;
        state
    }

    pub fn screen(&self) -> Screen {
        if self.auth.is_loading() {
            Screen::Loading
        } else if self.auth.is_authenticated() {
            Screen::Chat
        } else {
            Screen::Login
        }
    }

    pub fn tick_animation(&mut self) {
        self.system.animation_frame = self.system.animation_frame.wrapping_add(1);
    }

    /// Dots for the typing indicator, cycling every few frames
    pub fn typing_dots(&self) -> &'static str {
        match (self.system.animation_frame / 4) % 4 {
            0 => "",
            1 => ".",
            2 => "..",
            _ => "...",
        }
    }

    /// Drop everything tied to the signed-in user
    pub fn clear_session(&mut self) {
        self.chat = ChatState::new();
        self.notifications.reset();
        self.ui.token_buffer.clear();
        self.ui.input_mode = InputMode::Normal;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
