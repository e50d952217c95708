//! GitHub repository publisher for pipeforge.
//!
//! Implements the [`RepositoryPublisher`] trait by committing the generated
//! file through the repository contents API.

use octocrab::Octocrab;
use pipeforge_ci::publish::{
    PublishError, PublishOutcome, PublishRequest, PublishResult, PublishStatus,
    RepositoryPublisher, RepositoryRef,
};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

/// Environment variable the token is read from
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Configuration for the GitHub publisher.
#[derive(Debug, Clone)]
pub struct GitHubPublishConfig {
    /// GitHub token for authentication
    pub token: String,
}

impl GitHubPublishConfig {
    /// Creates a new configuration.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Creates configuration from `GITHUB_TOKEN`.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty())
            .map(Self::new)
    }
}

/// GitHub contents publisher.
///
/// Creates the file when it is missing, otherwise replaces it using the
/// current blob SHA.
pub struct GitHubContentPublisher {
    config: GitHubPublishConfig,
}

impl GitHubContentPublisher {
    /// Creates a new publisher.
    #[must_use]
    pub const fn new(config: GitHubPublishConfig) -> Self {
        Self { config }
    }

    /// Creates an authenticated Octocrab client.
    fn client(&self) -> PublishResult<Octocrab> {
        if self.config.token.is_empty() {
            return Err(PublishError::Authentication(format!(
                "no token provided; set {TOKEN_ENV}"
            )));
        }
        Octocrab::builder()
            .personal_token(self.config.token.clone())
            .build()
            .map_err(|e| PublishError::Authentication(e.to_string()))
    }

    /// Finds the blob SHA of an existing file.
    async fn existing_sha(
        client: &Octocrab,
        repository: &RepositoryRef,
        path: &str,
    ) -> PublishResult<Option<String>> {
        let repos = client.repos(&repository.owner, &repository.name);

        match repos.get_content().path(path).send().await {
            Ok(contents) => Ok(contents.items.into_iter().next().map(|item| item.sha)),
            Err(octocrab::Error::GitHub { source, .. })
                if is_missing_file(source.status_code.as_u16()) =>
            {
                Ok(None)
            }
            Err(e) => Err(PublishError::remote(e.to_string())),
        }
    }
}

/// Whether a contents API status means the file does not exist yet
const fn is_missing_file(status: u16) -> bool {
    status == 404
}

impl RepositoryPublisher for GitHubContentPublisher {
    fn name(&self) -> &'static str {
        "github"
    }

    fn publish<'a>(
        &'a self,
        request: &'a PublishRequest,
    ) -> Pin<Box<dyn Future<Output = PublishResult<PublishOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let repository = &request.repository;

            if request.dry_run {
                info!(
                    repository = %repository,
                    path = %request.path,
                    bytes = request.content.len(),
                    "Would commit pipeline file"
                );
                return Ok(PublishOutcome::new(PublishStatus::DryRun, request));
            }

            let client = self.client()?;
            let repos = client.repos(&repository.owner, &repository.name);

            let status = if let Some(sha) =
                Self::existing_sha(&client, repository, &request.path).await?
            {
                debug!(sha = %sha, path = %request.path, "Found existing file");
                repos
                    .update_file(
                        &request.path,
                        PublishStatus::Updated.commit_message(),
                        &request.content,
                        sha,
                    )
                    .send()
                    .await
                    .map_err(|e| PublishError::remote(e.to_string()))?;
                PublishStatus::Updated
            } else {
                debug!(path = %request.path, "Creating new file");
                repos
                    .create_file(
                        &request.path,
                        PublishStatus::Created.commit_message(),
                        &request.content,
                    )
                    .send()
                    .await
                    .map_err(|e| PublishError::remote(e.to_string()))?;
                PublishStatus::Created
            };

            let outcome = PublishOutcome::new(status, request);
            info!(url = %outcome.url, status = ?status, "Published pipeline file");
            Ok(outcome)
        })
    }
}
