//! Repository publishing interface.
//!
//! Generated configuration can be committed straight into a hosted
//! repository. The hosting-specific client lives in the provider crates and
//! implements [`RepositoryPublisher`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Commit message used when the file did not exist yet
pub const CREATE_MESSAGE: &str = "Add CI/CD pipeline via PipeForge";

/// Commit message used when an existing file is replaced
pub const UPDATE_MESSAGE: &str = "Update CI/CD pipeline via PipeForge";

/// Error type for publishing operations
#[derive(Debug, Error)]
pub enum PublishError {
    /// Repository reference was not `owner/name`
    #[error("Invalid repository '{0}': expected 'owner/name'")]
    InvalidRepository(String),

    /// No usable credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The hosting API rejected the request
    #[error("Remote error: {message}")]
    Remote {
        /// Message reported by the remote
        message: String,
    },
}

impl PublishError {
    /// Create a remote error
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }
}

/// Result type for publishing operations
pub type PublishResult<T> = Result<T, PublishError>;

/// An `owner/name` repository reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Account or organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepositoryRef {
    /// Parse `owner/name`.
    ///
    /// # Errors
    /// Returns [`PublishError::InvalidRepository`] unless the reference has
    /// exactly two non-empty segments.
    pub fn parse(repository: &str) -> PublishResult<Self> {
        let invalid = || PublishError::InvalidRepository(repository.to_string());
        let (owner, name) = repository.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Browser URL of a file on the default branch
    #[must_use]
    pub fn blob_url(&self, path: &str) -> String {
        format!("https://github.com/{self}/blob/HEAD/{path}")
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A file to commit
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Target repository
    pub repository: RepositoryRef,
    /// Path of the file inside the repository
    pub path: String,
    /// File contents
    pub content: String,
    /// Log what would happen without calling the remote
    pub dry_run: bool,
}

impl PublishRequest {
    /// Create a request
    #[must_use]
    pub fn new(repository: RepositoryRef, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            repository,
            path: path.into(),
            content: content.into(),
            dry_run: false,
        }
    }

    /// Toggle dry-run mode
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What a publish did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// The file was new
    Created,
    /// An existing file was replaced
    Updated,
    /// Nothing was sent
    DryRun,
}

impl PublishStatus {
    /// Commit message for this status
    #[must_use]
    pub const fn commit_message(self) -> &'static str {
        match self {
            Self::Updated => UPDATE_MESSAGE,
            Self::Created | Self::DryRun => CREATE_MESSAGE,
        }
    }

    /// Short message for the user
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Created => "Pipeline created!",
            Self::Updated => "Pipeline updated!",
            Self::DryRun => "Dry run: nothing was pushed",
        }
    }
}

/// Outcome of a publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// What happened
    pub status: PublishStatus,
    /// Repository the file went to
    pub repository: RepositoryRef,
    /// Path of the file
    pub path: String,
    /// Browser URL of the file
    pub url: String,
}

impl PublishOutcome {
    /// Build the outcome for a request
    #[must_use]
    pub fn new(status: PublishStatus, request: &PublishRequest) -> Self {
        Self {
            status,
            repository: request.repository.clone(),
            url: request.repository.blob_url(&request.path),
            path: request.path.clone(),
        }
    }

    /// Short message for the user
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.status.summary()
    }
}

/// Trait for hosting backends that commit generated files.
///
/// Implementations look up the current file to decide between create and
/// update, and must not contact the remote when the request is a dry run.
pub trait RepositoryPublisher: Send + Sync {
    /// Returns the backend name (e.g., "github")
    fn name(&self) -> &'static str;

    /// Create or update the file described by `request`
    fn publish<'a>(
        &'a self,
        request: &'a PublishRequest,
    ) -> Pin<Box<dyn Future<Output = PublishResult<PublishOutcome>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository() {
        let repo = RepositoryRef::parse("acme/web").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "web");
        assert_eq!(repo.to_string(), "acme/web");
    }

    #[test]
    fn test_parse_repository_rejects_malformed() {
        for bad in ["", "acme", "/web", "acme/", "acme/web/extra"] {
            assert!(
                matches!(
                    RepositoryRef::parse(bad),
                    Err(PublishError::InvalidRepository(_))
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_blob_url() {
        let repo = RepositoryRef::parse("acme/web").unwrap();
        assert_eq!(
            repo.blob_url(".github/workflows/ci.yml"),
            "https://github.com/acme/web/blob/HEAD/.github/workflows/ci.yml"
        );
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(PublishStatus::Created.commit_message(), CREATE_MESSAGE);
        assert_eq!(PublishStatus::Updated.commit_message(), UPDATE_MESSAGE);
        assert_eq!(PublishStatus::Created.summary(), "Pipeline created!");
        assert_eq!(PublishStatus::Updated.summary(), "Pipeline updated!");
    }

    #[test]
    fn test_outcome_from_request() {
        let request = PublishRequest::new(
            RepositoryRef::parse("acme/web").unwrap(),
            ".gitlab-ci.yml",
            "stages:\n",
        )
        .with_dry_run(true);

        let outcome = PublishOutcome::new(PublishStatus::DryRun, &request);
        assert_eq!(outcome.path, ".gitlab-ci.yml");
        assert_eq!(
            outcome.url,
            "https://github.com/acme/web/blob/HEAD/.gitlab-ci.yml"
        );
        assert_eq!(outcome.message(), "Dry run: nothing was pushed");
    }
}
