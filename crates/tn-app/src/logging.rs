//! Structured logging setup for front ends.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the computed filter.
pub const LOG_ENV: &str = "TRANSITNET_LOG";

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` or `TRANSITNET_LOG` win when set; otherwise `verbose` selects
/// debug output for the workspace crates and warnings only when off.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    ["tn_core", "tn_graph", "tn_registry", "tn_store", "tn_reports", "tn_app", "tn_cli"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        let quiet = default_directives(false);
        assert!(quiet.contains("tn_graph=warn"));
        let loud = default_directives(true);
        assert!(loud.contains("tn_app=debug"));
        assert!(loud.parse::<EnvFilter>().is_ok());
    }
}
