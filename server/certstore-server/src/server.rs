use certificate_engine::ValidationPolicy;
use database_layer::{CertificateRepository, InMemoryStore, UserRepository};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main CertStore server state
#[derive(Clone)]
pub struct CertStoreServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Validation policy shared by every request
    pub policy: Arc<ValidationPolicy>,
    /// User storage
    pub users: Arc<dyn UserRepository>,
    /// Certificate storage
    pub certificates: Arc<dyn CertificateRepository>,
    started_at: Instant,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "CertStore".to_string(),
            request_timeout: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl CertStoreServer {
    /// Create a server backed by a fresh in-memory store
    pub fn new(config: ServerConfig, policy: ValidationPolicy) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::with_repositories(config, Arc::new(policy), store.clone(), store)
    }

    /// Create a server over existing repositories
    pub fn with_repositories(
        config: ServerConfig,
        policy: Arc<ValidationPolicy>,
        users: Arc<dyn UserRepository>,
        certificates: Arc<dyn CertificateRepository>,
    ) -> Self {
        Self {
            config,
            policy,
            users,
            certificates,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the server state was created
    pub fn uptime(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
