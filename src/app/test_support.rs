use crate::api::{ApiError, ApiResult, BackendApi, ChatReply, DeploymentsPayload};
use crate::models::Deployment;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory backend that records how often each endpoint was hit.
pub struct FakeBackend {
    reply: Option<String>,
    deployments: Option<Vec<Deployment>>,
    chat_calls: AtomicUsize,
    deployment_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            deployments: Some(Vec::new()),
            chat_calls: AtomicUsize::new(0),
            deployment_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_deployments(deployments: Vec<Deployment>) -> Self {
        Self {
            reply: Some("ok".to_string()),
            deployments: Some(deployments),
            chat_calls: AtomicUsize::new(0),
            deployment_calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails with a 500
    pub fn failing() -> Self {
        Self {
            reply: None,
            deployments: None,
            chat_calls: AtomicUsize::new(0),
            deployment_calls: AtomicUsize::new(0),
        }
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn deployment_calls(&self) -> usize {
        self.deployment_calls.load(Ordering::SeqCst)
    }
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        body: "internal error".to_string(),
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn chat_post(&self, message: &str) -> ApiResult<ChatReply> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(reply) if !message.is_empty() => Ok(ChatReply {
                response: reply.clone(),
            }),
            _ => Err(server_error()),
        }
    }

    async fn get_deployments(&self) -> ApiResult<DeploymentsPayload> {
        self.deployment_calls.fetch_add(1, Ordering::SeqCst);
        self.deployments
            .clone()
            .map(|deployments| DeploymentsPayload { deployments })
            .ok_or_else(server_error)
    }
}
