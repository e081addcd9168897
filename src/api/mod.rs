//! Authenticated HTTP access to the InfraPilot backend.

mod client;
mod error;
mod types;

pub use client::{ApiClient, BackendApi};
pub use error::{ApiError, ApiResult};
pub use types::{ChatReply, DeploymentsPayload};
