//! Service context - dependency container for services
//!
//! Holds the engagement repository and the id generator needed by services.
//! The repository encapsulates its own connection pool, so the context stays
//! constructible against any `EngagementRepository` implementation.

use std::sync::Arc;

use verse_core::traits::EngagementRepository;
use verse_core::EngagementIdGenerator;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    engagement_repo: Arc<dyn EngagementRepository>,
    id_generator: Arc<EngagementIdGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        engagement_repo: Arc<dyn EngagementRepository>,
        id_generator: Arc<EngagementIdGenerator>,
    ) -> Self {
        Self {
            engagement_repo,
            id_generator,
        }
    }

    /// Get the engagement repository
    pub fn engagement_repo(&self) -> &dyn EngagementRepository {
        self.engagement_repo.as_ref()
    }

    /// Get the engagement id generator
    pub fn id_generator(&self) -> &EngagementIdGenerator {
        self.id_generator.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("id_worker", &self.id_generator.worker_id())
            .finish()
    }
}

/// Builder for [`ServiceContext`]
#[derive(Default)]
pub struct ServiceContextBuilder {
    engagement_repo: Option<Arc<dyn EngagementRepository>>,
    id_generator: Option<Arc<EngagementIdGenerator>>,
}

impl ServiceContextBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engagement repository
    #[must_use]
    pub fn engagement_repo(mut self, repo: Arc<dyn EngagementRepository>) -> Self {
        self.engagement_repo = Some(repo);
        self
    }

    /// Set the engagement id generator
    #[must_use]
    pub fn id_generator(mut self, generator: Arc<EngagementIdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Build the service context
    ///
    /// # Errors
    /// Returns an error if a required dependency was not provided
    pub fn build(self) -> Result<ServiceContext, ContextBuildError> {
        Ok(ServiceContext {
            engagement_repo: self
                .engagement_repo
                .ok_or(ContextBuildError::Missing("engagement_repo"))?,
            id_generator: self
                .id_generator
                .unwrap_or_else(|| Arc::new(EngagementIdGenerator::default())),
        })
    }
}

/// Error building a [`ServiceContext`]
#[derive(Debug, thiserror::Error)]
pub enum ContextBuildError {
    #[error("Missing required dependency: {0}")]
    Missing(&'static str),
}
