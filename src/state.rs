use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::database::{CourseStore, MongoCourseStore};
use crate::services::CourseService;

/// Process-wide dependencies, built once at startup and shared by every
/// request. Nothing in here is mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Option<Arc<dyn CourseStore>>,
    pub verifier: Arc<TokenVerifier>,
    pub courses: Arc<CourseService>,
    /// Whether the store answered a ping during startup
    pub store_connected_at_startup: bool,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Option<Arc<dyn CourseStore>>,
        verifier: TokenVerifier,
        store_connected_at_startup: bool,
    ) -> Self {
        let courses = CourseService::new(store.clone(), &config.api);
        Self {
            config: Arc::new(config),
            store,
            verifier: Arc::new(verifier),
            courses: Arc::new(courses),
            store_connected_at_startup,
        }
    }

    /// Connect to MongoDB and the auth provider. Failures degrade features
    /// and are logged; they never abort startup.
    pub async fn initialize(config: AppConfig) -> Self {
        let store: Option<Arc<dyn CourseStore>> =
            match MongoCourseStore::connect(&config.database).await {
                Ok(store) => Some(Arc::new(store) as Arc<dyn CourseStore>),
                Err(e) => {
                    warn!("Failed to create MongoDB client: {}", e);
                    None
                }
            };

        let connected = match &store {
            Some(store) => match store.ping().await {
                Ok(()) => {
                    info!("MongoDB connected successfully");
                    true
                }
                Err(e) => {
                    warn!("Failed to connect to MongoDB: {}", e);
                    false
                }
            },
            None => false,
        };

        let verifier = TokenVerifier::from_config(&config.auth);
        if verifier.has_provider() {
            info!("Supabase client initialized successfully");
        }

        Self::new(config, store, verifier, connected)
    }

    pub async fn shutdown(&self) {
        if let Some(store) = &self.store {
            store.close().await;
        }
    }
}
