mod deployment;
mod message;

pub use deployment::{CredentialView, Deployment, DetailLine, Resource, ResourceKind};
pub use message::{ChatMessage, Sender, FALLBACK_REPLY};
