//! Test helpers for integration tests
//!
//! Provides an in-memory engagement repository, service context wiring, and
//! a test gateway that runs the real server against PostgreSQL.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use verse_common::{AppConfig, AppSettings, DatabaseConfig, Environment, IdConfig, ServerConfig};
use verse_core::entities::{Comment, EngagementRecord, Reply};
use verse_core::traits::{EngagementRepository, RepoResult};
use verse_core::value_objects::{EngagementId, PoemId};
use verse_core::{DomainError, EngagementIdGenerator};
use verse_gateway::{create_app, create_gateway_state};
use verse_service::{ServiceContext, ServiceContextBuilder};

// ============================================================================
// In-memory repository
// ============================================================================

/// In-memory engagement repository
///
/// Each method holds the map lock for its whole critical section, mirroring
/// the per-document atomicity the PostgreSQL store gets from row locking.
#[derive(Default)]
pub struct MemoryEngagementRepository {
    records: Mutex<HashMap<PoemId, EngagementRecord>>,
}

impl MemoryEngagementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a record directly, bypassing the repository trait
    pub fn record(&self, poem_id: &PoemId) -> Option<EngagementRecord> {
        self.records.lock().get(poem_id).cloned()
    }
}

#[async_trait]
impl EngagementRepository for MemoryEngagementRepository {
    async fn fetch_all(&self) -> RepoResult<HashMap<PoemId, EngagementRecord>> {
        Ok(self.records.lock().clone())
    }

    async fn increment_likes(&self, poem_id: &PoemId) -> RepoResult<EngagementRecord> {
        let mut records = self.records.lock();
        let record = records.entry(poem_id.clone()).or_default();
        record.likes += 1;
        Ok(record.clone())
    }

    async fn append_comment(
        &self,
        poem_id: &PoemId,
        comment: &Comment,
    ) -> RepoResult<EngagementRecord> {
        let mut records = self.records.lock();
        let record = records.entry(poem_id.clone()).or_default();
        record.comments.push(comment.clone());
        Ok(record.clone())
    }

    async fn append_reply(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        reply: &Reply,
    ) -> RepoResult<EngagementRecord> {
        let mut records = self.records.lock();
        let record = records
            .get_mut(poem_id)
            .ok_or_else(|| comment_not_found(poem_id, comment_id))?;

        let comment = record
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| comment_not_found(poem_id, comment_id))?;

        comment.replies.push(reply.clone());
        Ok(record.clone())
    }

    async fn bump_reaction(
        &self,
        poem_id: &PoemId,
        comment_id: EngagementId,
        emoji: &str,
    ) -> RepoResult<EngagementRecord> {
        let mut records = self.records.lock();
        let record = records
            .get_mut(poem_id)
            .ok_or_else(|| comment_not_found(poem_id, comment_id))?;

        let comment = record
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| comment_not_found(poem_id, comment_id))?;

        *comment.reactions.entry(emoji.to_string()).or_insert(0) += 1;
        Ok(record.clone())
    }
}

fn comment_not_found(poem_id: &PoemId, comment_id: EngagementId) -> DomainError {
    DomainError::CommentNotFound {
        poem: poem_id.clone(),
        comment: comment_id,
    }
}

/// Build a service context over a fresh in-memory repository
pub fn memory_context() -> (Arc<ServiceContext>, Arc<MemoryEngagementRepository>) {
    let repo = Arc::new(MemoryEngagementRepository::new());
    let ctx = ServiceContextBuilder::new()
        .engagement_repo(repo.clone())
        .id_generator(Arc::new(EngagementIdGenerator::new(1)))
        .build()
        .expect("context build");
    (Arc::new(ctx), repo)
}

// ============================================================================
// Test gateway (requires PostgreSQL)
// ============================================================================

/// Check whether the end-to-end test environment is available
///
/// Gateway round-trip tests need a running PostgreSQL instance reachable via
/// DATABASE_URL; without it they return early and pass vacuously.
pub async fn check_test_env() -> bool {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping: DATABASE_URL not set");
        return false;
    }
    true
}

/// Test gateway instance that manages lifecycle
pub struct TestGateway {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestGateway {
    /// Start a gateway on an ephemeral port against the configured database
    pub async fn start() -> Result<Self> {
        let config = test_config()?;

        let state = create_gateway_state(config)
            .await
            .map_err(|e| anyhow::anyhow!("gateway state: {e}"))?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for the server to start accepting
        tokio::time::sleep(Duration::from_millis(50)).await;

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// WebSocket URL of the gateway endpoint
    pub fn ws_url(&self) -> String {
        format!("ws://{}/gateway", self.addr)
    }

    /// HTTP URL of a path on the test server
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

fn test_config() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();

    Ok(AppConfig {
        app: AppSettings {
            name: "verse-server-test".to_string(),
            env: Environment::Development,
        },
        gateway: ServerConfig {
            host: "127.0.0.1".to_string(),
            // The test listener binds its own ephemeral port
            port: 0,
        },
        database: DatabaseConfig {
            url: std::env::var("DATABASE_URL")?,
            max_connections: 5,
            min_connections: 1,
        },
        ids: IdConfig { worker_id: 99 },
    })
}
