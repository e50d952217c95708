//! `pipeforge push`

use super::{load_graph, report_warnings};
use crate::cli::CliError;
use crate::settings::Settings;
use pipeforge_ci::{Format, PublishRequest, PublishStatus, RepositoryPublisher, RepositoryRef};
use pipeforge_github::{GitHubContentPublisher, GitHubPublishConfig};
use std::fmt::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Arguments for [`execute`]
#[derive(Debug, Clone)]
pub struct PushArgs<'a> {
    /// Graph document
    pub graph: &'a Path,
    /// `owner/name`, falling back to `[publish] repository`
    pub repo: Option<&'a str>,
    /// Target CI system
    pub format: Format,
    /// Path override, falling back to `[output]` and then the format default
    pub path: Option<&'a str>,
    /// Skip the network call
    pub dry_run: bool,
}

/// Generate configuration and commit it to a GitHub repository.
///
/// # Errors
/// Returns a configuration error when no valid repository is given or the
/// graph cannot be loaded, and a publish error when GitHub rejects the commit.
#[instrument(name = "push", skip_all, fields(format = %args.format, dry_run = args.dry_run))]
pub async fn execute(args: PushArgs<'_>, settings: &Settings) -> Result<String, CliError> {
    let request = build_request(&args, settings)?;
    let publisher =
        GitHubContentPublisher::new(GitHubPublishConfig::new(settings.publish.token().unwrap_or_default()));
    info!(
        backend = publisher.name(),
        repository = %request.repository,
        path = %request.path,
        "Publishing pipeline"
    );

    let outcome = publisher.publish(&request).await?;

    let mut out = String::new();
    if outcome.status == PublishStatus::DryRun {
        let _ = writeln!(
            out,
            "Would write {} to {}:\n",
            outcome.path, outcome.repository
        );
        out.push_str(&request.content);
        if !request.content.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{}", outcome.message());
    let _ = writeln!(out, "{}", outcome.url);
    Ok(out)
}

fn build_request(args: &PushArgs<'_>, settings: &Settings) -> Result<PublishRequest, CliError> {
    let repository = args
        .repo
        .or(settings.publish.repository.as_deref())
        .ok_or_else(|| {
            CliError::config_with_help(
                "No repository given",
                "Pass --repo owner/name or set `repository` under [publish] in pipeforge.toml",
            )
        })?;
    let repository = RepositoryRef::parse(repository)?;

    let graph = load_graph(args.graph)?;
    report_warnings(&graph);
    let content = crate::generate(&graph, args.format);
    let path = args
        .path
        .unwrap_or_else(|| settings.output.path(args.format))
        .to_string();

    Ok(PublishRequest::new(repository, path, content).with_dry_run(args.dry_run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn template_file(dir: &Path) -> PathBuf {
        let path = dir.join("graph.json");
        let graph = pipeforge_core::templates::template("nodejs").unwrap();
        std::fs::write(&path, pipeforge_core::document::to_json(&graph).unwrap()).unwrap();
        path
    }

    fn args(graph: &Path) -> PushArgs<'_> {
        PushArgs {
            graph,
            repo: Some("acme/web"),
            format: Format::Github,
            path: None,
            dry_run: true,
        }
    }

    #[tokio::test]
    async fn test_dry_run_prints_content() {
        let dir = tempfile::tempdir().unwrap();
        let graph = template_file(dir.path());

        let out = execute(args(&graph), &Settings::default()).await.unwrap();
        assert!(out.starts_with("Would write .github/workflows/ci.yml to acme/web:\n\nname: "));
        assert!(out.ends_with(
            "Dry run: nothing was pushed\nhttps://github.com/acme/web/blob/HEAD/.github/workflows/ci.yml\n"
        ));
    }

    #[test]
    fn test_repository_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let graph = template_file(dir.path());
        let mut settings = Settings::default();
        settings.publish.repository = Some("acme/api".to_string());
        settings.output.gitlab = Some("ci/gitlab.yml".to_string());

        let request = build_request(
            &PushArgs {
                repo: None,
                format: Format::Gitlab,
                ..args(&graph)
            },
            &settings,
        )
        .unwrap();
        assert_eq!(request.repository.to_string(), "acme/api");
        assert_eq!(request.path, "ci/gitlab.yml");
        assert!(request.dry_run);
    }

    #[test]
    fn test_path_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let graph = template_file(dir.path());
        let request = build_request(
            &PushArgs {
                path: Some("pipelines/main.yml"),
                ..args(&graph)
            },
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(request.path, "pipelines/main.yml");
    }

    #[test]
    fn test_missing_repository() {
        let dir = tempfile::tempdir().unwrap();
        let graph = template_file(dir.path());
        let err = build_request(
            &PushArgs {
                repo: None,
                ..args(&graph)
            },
            &Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_invalid_repository() {
        let dir = tempfile::tempdir().unwrap();
        let graph = template_file(dir.path());
        let err = build_request(
            &PushArgs {
                repo: Some("just-a-name"),
                ..args(&graph)
            },
            &Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}
