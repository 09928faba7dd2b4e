use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{IdentityProfile, IdentityProvider};
use crate::config::GoogleConfig;
use crate::error::AppError;

const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    name: Option<String>,
}

/// Google OAuth 2.0 authorization-code flow.
pub struct GoogleIdentityProvider {
    client: Client,
    config: GoogleConfig,
}

impl GoogleIdentityProvider {
    pub fn new(config: GoogleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Identity(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, AppError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Unauthorized(format!("Google token exchange {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Identity(format!("Failed to parse token response: {}", e)))?;

        Ok(token.access_token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, AppError> {
        let response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Identity(format!("Google userinfo returned {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(format!("Failed to parse userinfo: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self, state: &str) -> Result<String, AppError> {
        let url = Url::parse_with_params(
            AUTHORIZATION_ENDPOINT,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .map_err(|e| AppError::Identity(format!("invalid authorization url: {}", e)))?;

        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, AppError> {
        let access_token = self.fetch_access_token(code).await?;
        let info = self.fetch_user_info(&access_token).await?;

        let email = info
            .email
            .filter(|_| info.email_verified)
            .ok_or_else(|| AppError::Unauthorized("Google account has no verified email".to_string()))?;

        tracing::debug!("Google profile resolved for {}", email);

        Ok(IdentityProfile {
            display_name: info.name.unwrap_or_default(),
            email,
        })
    }
}
