//! Log output for replays.

use std::env;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Directives used when `RUST_LOG` is unset: replay progress at `info`,
/// every workflow transition at `debug`.
const DEFAULT_DIRECTIVES: &str = "info,bikeroutes_workflow=debug";

/// Installs the global subscriber.
///
/// `RUST_LOG` replaces [`DEFAULT_DIRECTIVES`] entirely:
///
/// ```bash
/// RUST_LOG=warn bikeroutes-cli --paths drawn.json
/// RUST_LOG=bikeroutes_cli=info,bikeroutes_reqwest=trace bikeroutes-cli --paths drawn.json
/// ```
pub(super) fn init_tracing() -> anyhow::Result<()> {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = replay_filter(directives.as_deref())?;

    tracing_subscriber::registry()
        .with(replay_layer())
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

/// Parses `directives`, falling back to [`DEFAULT_DIRECTIVES`] when they
/// are absent or blank.
fn replay_filter(directives: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directives = directives
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVES);

    EnvFilter::try_new(directives)
        .map_err(|e| anyhow::anyhow!("Invalid log directives '{directives}': {e}"))
}

/// Compact single-line output; the target shows which workflow step logged.
fn replay_layer() -> impl Layer<Registry> {
    fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .without_time()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_enable_workflow_debug() {
        let filter = replay_filter(None).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("bikeroutes_workflow=debug"));
        assert!(rendered.contains("info"));
    }

    #[test]
    fn test_blank_directives_use_default() {
        let filter = replay_filter(Some("  ")).unwrap();
        assert!(filter.to_string().contains("bikeroutes_workflow=debug"));
    }

    #[test]
    fn test_explicit_directives_replace_default() {
        let filter = replay_filter(Some("warn")).unwrap();
        assert!(!filter.to_string().contains("bikeroutes_workflow"));
    }

    #[test]
    fn test_invalid_directives_are_rejected() {
        assert!(replay_filter(Some("bikeroutes_workflow=loud")).is_err());
    }
}
