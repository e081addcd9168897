use super::error::{ApiError, ApiResult};
use super::types::{ChatReply, ChatRequest, DeploymentsPayload};
use crate::auth::AuthSession;
use crate::config::AppConfig;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

/// The two backend operations the client depends on.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn chat_post(&self, message: &str) -> ApiResult<ChatReply>;
    async fn get_deployments(&self) -> ApiResult<DeploymentsPayload>;
}

/// reqwest-backed client. Every request carries the session's ID token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    chat_url: Url,
    deployments_url: Url,
    authorization: String,
}

impl ApiClient {
    /// Fails with `Unauthenticated` when the session holds no token.
    pub fn new(config: &AppConfig, session: &AuthSession) -> ApiResult<Self> {
        let token = session.id_token().ok_or(ApiError::Unauthenticated)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let authorization = match config.api.auth_scheme.as_deref().map(str::trim) {
            Some(scheme) if !scheme.is_empty() => format!("{} {}", scheme, token),
            _ => token.to_string(),
        };

        Ok(Self {
            http,
            chat_url: endpoint(&config.api.base_url, &config.api.chat_path)?,
            deployments_url: endpoint(&config.api.base_url, &config.api.deployments_path)?,
            authorization,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Join a stage URL and a path without dropping the stage segment
fn endpoint(base_url: &str, path: &str) -> ApiResult<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim().trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

#[async_trait]
impl BackendApi for ApiClient {
    async fn chat_post(&self, message: &str) -> ApiResult<ChatReply> {
        tracing::debug!(url = %self.chat_url, len = message.len(), "posting chat message");
        let response = self
            .http
            .post(self.chat_url.clone())
            .header(AUTHORIZATION, &self.authorization)
            .json(&ChatRequest { message })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_deployments(&self) -> ApiResult<DeploymentsPayload> {
        tracing::debug!(url = %self.deployments_url, "fetching deployments");
        let response = self
            .http
            .get(self.deployments_url.clone())
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Self::decode(response).await
    }
}
