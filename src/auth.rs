//! Identity session handling.
//!
//! The identity provider's protocol (authorization code exchange, refresh)
//! happens outside this client. What arrives here is an already-issued ID
//! token; we decode its claims for display and expiry checks, and build the
//! hosted-UI URLs the user needs to sign in and out.

use crate::config::IdentityConfig;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token is not a JWT")]
    MalformedToken,
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token claims are not valid JSON: {0}")]
    Claims(#[from] serde_json::Error),
    #[error("identity setting `{0}` is not configured")]
    MissingSetting(&'static str),
    #[error("invalid identity URL: {0}")]
    Url(#[from] url::ParseError),
}

/// The subset of ID token claims the client uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default, rename = "cognito:username")]
    pub username: Option<String>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }
}

/// Decode the payload segment of a JWT. The signature is not checked; the
/// backend verifies tokens on every request.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AuthError> {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
        _ => return Err(AuthError::MalformedToken),
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// Token source not read yet
    Loading,
    SignedOut,
    SignedIn(TokenClaims),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    status: AuthStatus,
    id_token: Option<String>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::loading()
    }
}

impl AuthSession {
    pub fn loading() -> Self {
        Self {
            status: AuthStatus::Loading,
            id_token: None,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            status: AuthStatus::SignedOut,
            id_token: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Failed(message.into()),
            id_token: None,
        }
    }

    pub fn from_token(token: &str, identity: &IdentityConfig) -> Self {
        Self::from_token_at(token, identity, Utc::now())
    }

    /// Accepts the token when its claims decode, it has not expired at
    /// `now`, and (if an authority is configured) it was issued by it.
    pub fn from_token_at(token: &str, identity: &IdentityConfig, now: DateTime<Utc>) -> Self {
        let token = token.trim();
        if token.is_empty() {
            return Self::signed_out();
        }

        let claims = match decode_claims(token) {
            Ok(claims) => claims,
            Err(e) => return Self::failed(format!("Invalid ID token: {}", e)),
        };

        if let Some(expires_at) = claims.expires_at() {
            if expires_at <= now {
                return Self::failed(format!(
                    "Session expired at {}. Sign in again.",
                    expires_at.format("%Y-%m-%d %H:%M UTC")
                ));
            }
        }

        let authority = identity.authority.trim_end_matches('/');
        if !authority.is_empty() {
            let issuer = claims.iss.as_deref().unwrap_or("").trim_end_matches('/');
            if issuer != authority {
                return Self::failed(format!("Token was issued by `{}`, expected `{}`", issuer, authority));
            }
        }

        Self {
            status: AuthStatus::SignedIn(claims),
            id_token: Some(token.to_string()),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, AuthStatus::SignedIn(_))
    }

    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            AuthStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn id_token(&self) -> Option<&str> {
        if self.is_authenticated() {
            self.id_token.as_deref()
        } else {
            None
        }
    }

    pub fn email(&self) -> Option<&str> {
        match &self.status {
            AuthStatus::SignedIn(claims) => claims.email.as_deref().or(claims.username.as_deref()),
            _ => None,
        }
    }

    pub fn sign_out(&mut self) {
        *self = Self::signed_out();
    }
}

/// Work out the session at startup: an explicit token wins, then the token file.
pub async fn resolve_session(
    token: Option<String>,
    token_file: Option<&Path>,
    identity: &IdentityConfig,
) -> AuthSession {
    if let Some(token) = token {
        return AuthSession::from_token(&token, identity);
    }

    let Some(path) = token_file else {
        return AuthSession::signed_out();
    };
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => AuthSession::from_token(&contents, identity),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AuthSession::signed_out(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read token file");
            AuthSession::failed(format!("Could not read {}: {}", path.display(), e))
        }
    }
}

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, AuthError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AuthError::MissingSetting(name))
    } else {
        Ok(value)
    }
}

/// Hosted-UI authorize URL the user opens to sign in.
pub fn signin_url(identity: &IdentityConfig) -> Result<Url, AuthError> {
    let domain = required(&identity.domain, "domain")?;
    let client_id = required(&identity.client_id, "client_id")?;
    let redirect_uri = required(&identity.redirect_uri, "redirect_uri")?;

    let mut url = Url::parse(&format!("{}/oauth2/authorize", domain.trim_end_matches('/')))?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("response_type", &identity.response_type)
        .append_pair("scope", &identity.scope)
        .append_pair("redirect_uri", redirect_uri);
    Ok(url)
}

/// Hosted-UI logout URL that ends the provider session.
pub fn logout_url(identity: &IdentityConfig) -> Result<Url, AuthError> {
    let domain = required(&identity.domain, "domain")?;
    let client_id = required(&identity.client_id, "client_id")?;
    let logout_uri = if identity.post_logout_redirect_uri.trim().is_empty() {
        required(&identity.redirect_uri, "post_logout_redirect_uri")?
    } else {
        identity.post_logout_redirect_uri.trim()
    };

    let mut url = Url::parse(&format!("{}/logout", domain.trim_end_matches('/')))?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("logout_uri", logout_uri);
    Ok(url)
}

#[cfg(test)]
pub(crate) fn make_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}
