//! Stderr logging via tracing-subscriber.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: -v/-q, then config `log_level`, then "warn".
/// RUST_LOG, when set, wins over all of these in [init_logging].
pub fn filter_directive(verbose: bool, quiet: bool, config_level: Option<&str>) -> String {
    if verbose {
        "debug".to_string()
    } else if quiet {
        "error".to_string()
    } else {
        config_level
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string()
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_logging(directive: &str) -> Result<(), String> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(env) if !env.trim().is_empty() => EnvFilter::try_new(env),
        _ => EnvFilter::try_new(directive),
    }
    .map_err(|e| format!("Invalid log filter: {}", e))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_and_quiet_override_config() {
        assert_eq!(filter_directive(true, false, Some("error")), "debug");
        assert_eq!(filter_directive(false, true, Some("debug")), "error");
    }

    #[test]
    fn config_level_then_default() {
        assert_eq!(filter_directive(false, false, Some("info")), "info");
        assert_eq!(filter_directive(false, false, Some("  ")), "warn");
        assert_eq!(filter_directive(false, false, None), "warn");
    }
}
