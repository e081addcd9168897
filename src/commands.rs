use crate::api::{ApiClient, BackendApi};
use crate::app::ChatState;
use crate::auth;
use crate::config::AppConfig;
use crate::models::{CredentialView, Deployment, DetailLine};
use anyhow::{bail, Context, Result};
use std::fmt::Write as _;

async fn connect(config: &AppConfig, token: Option<String>) -> Result<ApiClient> {
    let session = auth::resolve_session(token, config.token_path().as_deref(), &config.identity).await;
    if !session.is_authenticated() {
        let reason = session.error().unwrap_or("no ID token found").to_string();
        bail!("not signed in: {} (pass --token or set INFRAPILOT_ID_TOKEN)", reason);
    }
    ApiClient::new(config, &session).context("could not create API client")
}

/// One chat exchange. Prints the reply, or the fallback text on failure.
pub async fn send(config: &AppConfig, token: Option<String>, message: &str) -> Result<()> {
    let client = connect(config, token).await?;
    let mut chat = ChatState::new();
    if !chat.send_message(message, Some(&client)).await {
        bail!("message is empty");
    }
    if let Some(reply) = chat.messages.last() {
        println!("{}", reply.text);
    }
    Ok(())
}

/// Fetch once and print every deployment. Credentials are never shown.
pub async fn deployments(config: &AppConfig, token: Option<String>) -> Result<()> {
    let client = connect(config, token).await?;
    let payload = client
        .get_deployments()
        .await
        .context("could not fetch deployments")?;

    if payload.deployments.is_empty() {
        println!("No deployments");
        return Ok(());
    }
    print!("{}", format_deployments(&payload.deployments));
    Ok(())
}

pub fn login_url(config: &AppConfig) -> Result<()> {
    println!("{}", auth::signin_url(&config.identity)?);
    Ok(())
}

pub fn logout_url(config: &AppConfig) -> Result<()> {
    println!("{}", auth::logout_url(&config.identity)?);
    Ok(())
}

fn format_deployments(deployments: &[Deployment]) -> String {
    let mut out = String::new();
    for deployment in deployments {
        let _ = writeln!(out, "{}  {}", deployment.session_id, deployment.display_timestamp());
        for resource in &deployment.resources {
            let _ = writeln!(
                out,
                "  {} {} ({})",
                resource.kind().icon(),
                resource.type_label(),
                resource.deployment_id
            );
            for line in resource.detail_lines(false) {
                match line {
                    DetailLine::Field { label, value } | DetailLine::Link { label, value } => {
                        let _ = writeln!(out, "    {}: {}", label, value);
                    }
                    DetailLine::Credentials(CredentialView::Hidden) => {
                        let _ = writeln!(out, "    Credentials: hidden");
                    }
                    DetailLine::Credentials(CredentialView::Revealed { .. }) => {}
                }
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_deployments_hides_secrets() {
        let deployments: Vec<Deployment> = serde_json::from_value(json!([{
            "session_id": "sess-9",
            "timestamp": "yesterday",
            "resources": [
                {
                    "deployment_id": "db-1",
                    "type": "RDS",
                    "resource_name": "orders",
                    "value": "arn:secret",
                    "is_sensitive": true,
                    "endpoint": "orders.internal",
                    "username": "admin",
                    "password": "hunter2"
                },
                {
                    "deployment_id": "vm-1",
                    "type": "ec2",
                    "resource_name": "bastion",
                    "value": "t3.micro",
                    "ip_address": "10.0.0.5"
                }
            ]
        }]))
        .unwrap();

        let out = format_deployments(&deployments);
        assert!(out.starts_with("sess-9  yesterday\n"));
        assert!(out.contains("RDS (db-1)"));
        assert!(out.contains("    Endpoint: orders.internal"));
        assert!(out.contains("    Credentials: hidden"));
        assert!(out.contains("    Value: t3.micro"));
        assert!(out.contains("    IP Address: 10.0.0.5"));
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("arn:secret"));
    }

    #[tokio::test]
    async fn test_commands_require_token() {
        let mut config = AppConfig::default();
        let dir = tempfile::tempdir().unwrap();
        config.identity.token_file = Some(dir.path().join("missing-token"));

        let err = deployments(&config, None).await.unwrap_err();
        assert!(err.to_string().starts_with("not signed in"));
    }
}
