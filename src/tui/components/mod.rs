pub mod chat_pane;
pub mod help_popup;
pub mod input_bar;
pub mod login_screen;
pub mod notification_panel;
pub mod status_bar;
