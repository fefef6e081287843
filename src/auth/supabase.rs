use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use url::Url;

use super::{AuthError, IdentityProvider};
use crate::config::AuthConfig;

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: Option<String>,
}

/// Exchanges access tokens for user ids via the Supabase Auth `/user` endpoint
pub struct SupabaseProvider {
    http: Client,
    user_url: Url,
    service_key: String,
}

impl SupabaseProvider {
    /// `Ok(None)` when the provider URL or key is not configured
    pub fn from_config(config: &AuthConfig) -> Result<Option<Self>, AuthError> {
        let (Some(base_url), Some(service_key)) =
            (&config.supabase_url, &config.supabase_service_role_key)
        else {
            return Ok(None);
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()?;

        Ok(Some(Self {
            http,
            user_url: user_endpoint(base_url)?,
            service_key: service_key.clone(),
        }))
    }
}

fn user_endpoint(base_url: &str) -> Result<Url, AuthError> {
    let mut base =
        Url::parse(base_url).map_err(|e| AuthError::InvalidProviderUrl(format!("{}: {}", base_url, e)))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("auth/v1/user")
        .map_err(|e| AuthError::InvalidProviderUrl(e.to_string()))
}

#[async_trait]
impl IdentityProvider for SupabaseProvider {
    async fn resolve(&self, token: &str) -> Result<String, AuthError> {
        let response = self
            .http
            .get(self.user_url.clone())
            .header("apikey", &self.service_key)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Rejected(status.as_u16()));
        }

        let user: SupabaseUser = response.json().await?;
        user.id
            .filter(|id| !id.is_empty())
            .ok_or(AuthError::MissingUser)
    }
}
