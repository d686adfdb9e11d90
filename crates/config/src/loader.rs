use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    Error, Result,
    env_subst::substitute_env,
    schema::{ScribeConfig, StoreBackend},
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["scribe.toml", "scribe.yaml", "scribe.yml", "scribe.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<ScribeConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./scribe.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/scribe/scribe.{toml,yaml,yml,json}` (user-global)
///
/// Returns `ScribeConfig::default()` if no config file is found or it fails
/// to parse.
pub fn discover_and_load() -> ScribeConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    ScribeConfig::default()
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILENAMES.iter().map(PathBuf::from);
    let global = config_dir()
        .into_iter()
        .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name)));

    local.chain(global).find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/scribe/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "scribe").map(|d| d.config_dir().to_path_buf())
}

/// Apply `SCRIBE_BIND`, `SCRIBE_PORT`, `SCRIBE_STORE` and
/// `SCRIBE_DATABASE_URL` from the process environment.
pub fn apply_env_overrides(config: &mut ScribeConfig) -> Result<()> {
    apply_env_overrides_with(config, |name| std::env::var(name).ok())
}

/// Like [`apply_env_overrides`], reading variables through `lookup`.
pub fn apply_env_overrides_with(
    config: &mut ScribeConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(bind) = lookup("SCRIBE_BIND") {
        config.server.bind = bind;
    }
    if let Some(port) = lookup("SCRIBE_PORT") {
        config.server.port = port.trim().parse().map_err(|_| Error::InvalidOverride {
            key: "SCRIBE_PORT",
            value: port.clone(),
        })?;
    }
    if let Some(backend) = lookup("SCRIBE_STORE") {
        config.store.backend =
            backend
                .parse::<StoreBackend>()
                .map_err(|_| Error::InvalidOverride {
                    key: "SCRIBE_STORE",
                    value: backend.clone(),
                })?;
    }
    if let Some(url) = lookup("SCRIBE_DATABASE_URL") {
        config.store.database_url = url;
    }
    Ok(())
}

pub(crate) fn parse_config(raw: &str, path: &Path) -> Result<ScribeConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => Err(Error::UnsupportedFormat { ext: ext.into() }),
    }
}
