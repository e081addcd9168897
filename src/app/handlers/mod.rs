pub mod chat;
pub mod input;
pub mod notifications;
pub mod session;
