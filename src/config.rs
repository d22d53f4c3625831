//! Optional config file loading. Search order: ./novelpages.toml, then
//! $XDG_CONFIG_HOME/novelpages/config.toml (or ~/.config/novelpages/config.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// HTTP User-Agent header.
    pub user_agent: Option<String>,
    /// Delay in seconds between requests.
    pub request_delay_secs: Option<u64>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Directory for `-o` paths that are relative. Paths are relative to CWD.
    pub output_dir: Option<PathBuf>,
    /// Log filter used when RUST_LOG and -v/-q are absent (e.g. "info", "novelpages=debug").
    pub log_level: Option<String>,
    /// Site key used when --site is omitted.
    pub default_site: Option<String>,
}

/// Search order: (1) ./novelpages.toml, (2) $XDG_CONFIG_HOME/novelpages/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("novelpages.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("novelpages").join("config.toml"));
    }
    for path in &paths {
        if let Some(config) = load_config_from(path)? {
            return Ok(Some(config));
        }
    }
    Ok(None)
}

/// Load one config file. Ok(None) if it does not exist.
pub fn load_config_from(path: &Path) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    let config: Config =
        toml::from_str(&s).map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(Some(config))
}
