//! The remote action: pack a repository by URL or shorthand.

use anyhow::{Result, bail};
use tracing::info;

use baler_config::options::{OutputFormat, RawOptions, ResolvedConfig};
use baler_core::{PackEngine, PackRequest};

use crate::actions::PackOutcome;
use crate::report;

/// Pack the remote repository named by `spec`.
///
/// Shorthand is expanded before the engine sees it, so the engine only
/// ever receives full URLs. Whether the expanded URL names a real,
/// reachable repository is the engine's call.
pub async fn run_remote_action(
    spec: &str,
    opts: &RawOptions,
    engine: &dyn PackEngine,
) -> Result<PackOutcome> {
    let url = normalize_remote_spec(spec)?;
    let config = ResolvedConfig::from_raw(opts);
    let request = PackRequest::remote(url.clone(), OutputFormat::default(), config.clone());

    info!(%url, "packing remote repository");
    let pack_result = engine.pack(&request).await?;
    report::print_summary(&config, &pack_result);

    Ok(PackOutcome {
        config,
        pack_result,
    })
}

/// Expand a remote specifier into a full repository URL.
///
/// Full `http://`, `https://`, and `git@` specifiers pass through
/// verbatim. A bare `owner/repo` pair expands to its GitHub URL.
/// Anything else is rejected here, before the engine is involved.
fn normalize_remote_spec(spec: &str) -> Result<String> {
    if spec.starts_with("http://") || spec.starts_with("https://") || spec.starts_with("git@") {
        return Ok(spec.to_string());
    }

    let segments: Vec<&str> = spec.split('/').collect();
    match segments.as_slice() {
        [owner, repo] if is_name_segment(owner) && is_name_segment(repo) => {
            Ok(format!("https://github.com/{owner}/{repo}"))
        }
        _ => bail!("invalid remote repository {spec:?} (expected a URL or owner/repo)"),
    }
}

fn is_name_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use baler_core::PackTarget;
    use baler_test_utils::engines::StubEngine;
    use pretty_assertions::assert_eq;

    // ── Specifier normalization ───────────────────────────────────────

    #[test]
    fn test_full_urls_pass_through_verbatim() {
        for spec in [
            "https://github.com/acme/widgets",
            "https://gitlab.com/acme/widgets.git",
            "http://git.internal/acme/widgets",
            "git@github.com:acme/widgets.git",
        ] {
            assert_eq!(normalize_remote_spec(spec).unwrap(), spec);
        }
    }

    #[test]
    fn test_shorthand_expands_to_github() {
        assert_eq!(
            normalize_remote_spec("acme/widgets").unwrap(),
            "https://github.com/acme/widgets"
        );
        assert_eq!(
            normalize_remote_spec("a-b_c.d/repo-1").unwrap(),
            "https://github.com/a-b_c.d/repo-1"
        );
    }

    #[test]
    fn test_extra_path_segments_are_rejected() {
        assert!(normalize_remote_spec("acme/widgets/extra").is_err());
    }

    #[test]
    fn test_empty_segments_are_rejected() {
        for spec in ["acme/", "/widgets", "/", "acme"] {
            assert!(normalize_remote_spec(spec).is_err(), "accepted {spec:?}");
        }
    }

    #[test]
    fn test_segments_with_odd_characters_are_rejected() {
        assert!(normalize_remote_spec("acme/wid gets").is_err());
        assert!(normalize_remote_spec("acme/widgets?x=1").is_err());
    }

    // ── Action ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_remote_action_sends_the_expanded_url() {
        let engine = StubEngine::new();

        let outcome = run_remote_action("acme/widgets", &RawOptions::default(), &engine)
            .await
            .unwrap();
        assert_eq!(outcome.pack_result.total_files, 2);

        let seen = engine.requests();
        assert_eq!(
            seen[0].target,
            PackTarget::Remote {
                url: "https://github.com/acme/widgets".to_string()
            }
        );
        assert_eq!(seen[0].client_ip, None);
    }

    #[tokio::test]
    async fn test_invalid_specifier_never_reaches_the_engine() {
        let engine = StubEngine::new();

        let err = run_remote_action("not a repo", &RawOptions::default(), &engine)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid remote repository"));
        assert_eq!(engine.call_count(), 0);
    }
}
