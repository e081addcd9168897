use crate::models::Deployment;
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`. The message text is sent as typed.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Body of `GET /get`. A payload without `deployments` fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentsPayload {
    pub deployments: Vec<Deployment>,
}
