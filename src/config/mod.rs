use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE_NAME: &str = "edusign";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub mongodb_url: String,
    pub database_name: String,
    pub server_selection_timeout_ms: u64,
    pub seed_on_startup: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<String>,
    /// Credentials that always resolve to `demo_user_id`
    pub demo_tokens: Vec<String>,
    pub demo_user_id: String,
    /// Resolve to the demo identity when the provider rejects or is unreachable
    pub permissive_fallback: bool,
    /// Accept unrecognized credentials as a hashed placeholder identity
    pub allow_placeholder_identities: bool,
    pub provider_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub min_age: u32,
    pub max_age: u32,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (the process
    /// environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Database overrides
        if let Some(v) = non_empty("MONGODB_URL") {
            self.database.mongodb_url = v;
        }
        if let Some(v) = non_empty("DATABASE_NAME") {
            self.database.database_name = v;
        }
        if let Some(v) = lookup("MONGODB_SERVER_SELECTION_TIMEOUT_MS") {
            self.database.server_selection_timeout_ms = parse_number(
                "MONGODB_SERVER_SELECTION_TIMEOUT_MS",
                &v,
                self.database.server_selection_timeout_ms,
            );
        }
        if let Some(v) = lookup("SEED_ON_STARTUP") {
            self.database.seed_on_startup =
                parse_flag("SEED_ON_STARTUP", &v, self.database.seed_on_startup);
        }

        // Auth overrides
        self.auth.supabase_url = non_empty("SUPABASE_URL");
        self.auth.supabase_service_role_key = non_empty("SUPABASE_SERVICE_ROLE_KEY");
        if let Some(v) = non_empty("AUTH_DEMO_TOKENS") {
            self.auth.demo_tokens = split_list(&v);
        }
        if let Some(v) = non_empty("AUTH_DEMO_USER_ID") {
            self.auth.demo_user_id = v;
        }
        if let Some(v) = lookup("AUTH_PERMISSIVE_FALLBACK") {
            self.auth.permissive_fallback =
                parse_flag("AUTH_PERMISSIVE_FALLBACK", &v, self.auth.permissive_fallback);
        }
        if let Some(v) = lookup("AUTH_ALLOW_PLACEHOLDER_IDENTITIES") {
            self.auth.allow_placeholder_identities = parse_flag(
                "AUTH_ALLOW_PLACEHOLDER_IDENTITIES",
                &v,
                self.auth.allow_placeholder_identities,
            );
        }
        if let Some(v) = lookup("AUTH_PROVIDER_TIMEOUT_SECS") {
            self.auth.provider_timeout_secs =
                parse_number("AUTH_PROVIDER_TIMEOUT_SECS", &v, self.auth.provider_timeout_secs);
        }

        // API overrides
        if let Some(v) = lookup("API_PORT").or_else(|| lookup("PORT")) {
            self.api.port = parse_number("API_PORT", &v, self.api.port);
        }
        if let Some(v) = lookup("API_MIN_AGE") {
            self.api.min_age = parse_number("API_MIN_AGE", &v, self.api.min_age);
        }
        if let Some(v) = lookup("API_MAX_AGE") {
            self.api.max_age = parse_number("API_MAX_AGE", &v, self.api.max_age);
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging =
                parse_flag("API_ENABLE_REQUEST_LOGGING", &v, self.api.enable_request_logging);
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors =
                parse_flag("SECURITY_ENABLE_CORS", &v, self.security.enable_cors);
        }
        if let Some(v) = non_empty("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                mongodb_url: DEFAULT_MONGODB_URL.to_string(),
                database_name: DEFAULT_DATABASE_NAME.to_string(),
                server_selection_timeout_ms: 2_000,
                seed_on_startup: true,
            },
            auth: AuthConfig {
                supabase_url: None,
                supabase_service_role_key: None,
                demo_tokens: vec!["demo-token".to_string(), "fallback".to_string()],
                demo_user_id: "demo-user-id".to_string(),
                permissive_fallback: true,
                allow_placeholder_identities: true,
                provider_timeout_secs: 10,
            },
            api: ApiConfig {
                port: 8000,
                min_age: 2,
                max_age: 120,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "https://your-frontend-domain.com".to_string(),
                ],
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.database.server_selection_timeout_ms = 5_000;
        config.auth.permissive_fallback = false;
        config.auth.allow_placeholder_identities = true;
        config.security.cors_origins = vec!["https://staging.example.com".to_string()];
        config
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                mongodb_url: DEFAULT_MONGODB_URL.to_string(),
                database_name: DEFAULT_DATABASE_NAME.to_string(),
                server_selection_timeout_ms: 5_000,
                seed_on_startup: false,
            },
            auth: AuthConfig {
                supabase_url: None,
                supabase_service_role_key: None,
                demo_tokens: Vec::new(),
                demo_user_id: "demo-user-id".to_string(),
                permissive_fallback: false,
                allow_placeholder_identities: false,
                provider_timeout_secs: 5,
            },
            api: ApiConfig {
                port: 8000,
                min_age: 2,
                max_age: 120,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }

    /// Log which settings are present without printing secrets
    pub fn log_summary(&self) {
        let presence = |value: &Option<String>| if value.is_some() { "set" } else { "not set" };

        tracing::info!(environment = ?self.environment, "configuration loaded");
        tracing::info!(
            supabase_url = presence(&self.auth.supabase_url),
            supabase_service_role_key = presence(&self.auth.supabase_service_role_key),
            mongodb_url = %self.database.redacted_url(),
            database_name = %self.database.database_name,
            "environment check"
        );
        if !self.auth.provider_configured() {
            tracing::warn!("Supabase credentials not found - token verification is local only");
        }
    }
}

impl AuthConfig {
    pub fn provider_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_service_role_key.is_some()
    }
}

impl DatabaseConfig {
    /// Connection URL with any password masked, safe to log or report
    pub fn redacted_url(&self) -> String {
        match url::Url::parse(&self.mongodb_url) {
            Ok(mut url) if url.password().is_some() => {
                let _ = url.set_password(Some("***"));
                url.to_string()
            }
            Ok(_) => self.mongodb_url.clone(),
            Err(_) => "<invalid url>".to_string(),
        }
    }
}

fn parse_number<T>(key: &str, raw: &str, current: T) -> T
where
    T: FromStr + Display,
{
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a number, keeping {}", key, raw, current);
            current
        }
    }
}

fn parse_flag(key: &str, raw: &str, current: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => {
            tracing::warn!("Ignoring {}={:?}: not a boolean, keeping {}", key, raw, current);
            current
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
