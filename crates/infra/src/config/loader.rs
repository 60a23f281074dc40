//! Configuration loader
//!
//! Configuration comes from the environment when `PAYTRACK_DB_PATH` is set,
//! otherwise from the first config file found on disk.
//!
//! | Variable | Field |
//! |---|---|
//! | `PAYTRACK_DB_PATH` (required) | `database.path` |
//! | `PAYTRACK_DB_POOL_SIZE` | `database.pool_size` |
//! | `PAYTRACK_HOST` | `server.host` |
//! | `PAYTRACK_PORT` | `server.port` |
//! | `PAYTRACK_API_PREFIX` | `server.api_prefix` |
//! | `PAYTRACK_CORS_ORIGINS` (comma-separated) | `server.cors_allowed_origins` |
//! | `PAYTRACK_NOTIFICATION_HORIZON_DAYS` | `notifications.horizon_days` |
//!
//! Files named `config` or `paytrack` with a `.json` or `.toml` extension are
//! looked up in the working directory, its two parents, and the directory of
//! the running executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use paytrack_domain::{Config, PaytrackError, Result};

const ENV_DB_PATH: &str = "PAYTRACK_DB_PATH";
const FILE_STEMS: [&str; 2] = ["config", "paytrack"];

/// Serialization format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") | None => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => {
                Err(PaytrackError::Config(format!("unsupported config format '.{other}'")))
            }
        }
    }

    fn parse(self, contents: &str) -> Result<Config> {
        match self {
            Self::Json => serde_json::from_str(contents)
                .map_err(|e| PaytrackError::Config(format!("Invalid JSON config: {e}"))),
            Self::Toml => toml::from_str(contents)
                .map_err(|e| PaytrackError::Config(format!("Invalid TOML config: {e}"))),
        }
    }
}

/// Environment first, then a probed config file.
///
/// `Ok(None)` means neither source exists, leaving the caller to choose
/// defaults. A source that exists but cannot be parsed is an error.
pub fn load() -> Result<Option<Config>> {
    if std::env::var_os(ENV_DB_PATH).is_some() {
        let config = load_from_env()?;
        tracing::info!(source = "env", "configuration loaded");
        return Ok(Some(config));
    }

    tracing::debug!("{ENV_DB_PATH} unset, looking for a config file");
    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)).map(Some),
        None => Ok(None),
    }
}

/// Build a config from `PAYTRACK_*` variables.
///
/// Unset optional variables keep their defaults; a set but unparsable value
/// is an error rather than silently ignored.
pub fn load_from_env() -> Result<Config> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Read a config file, or the first probed one when `path` is `None`.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => probe_config_paths().ok_or_else(|| {
            PaytrackError::Config("no config file found and PAYTRACK_DB_PATH is unset".into())
        })?,
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        PaytrackError::Config(format!("cannot read config file {}: {e}", path.display()))
    })?;

    let config = ConfigFormat::from_path(&path)?.parse(&contents)?;
    tracing::info!(source = %path.display(), "configuration loaded");
    Ok(config)
}

/// First existing config file in the search locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let exe_dir = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf));

    let mut dirs = Vec::new();
    if let Some(cwd) = cwd {
        dirs.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }
    dirs.extend(exe_dir);

    dirs.into_iter().flat_map(candidates_in).find(|path| path.is_file())
}

fn candidates_in(dir: PathBuf) -> impl Iterator<Item = PathBuf> {
    FILE_STEMS
        .into_iter()
        .flat_map(move |stem| ["json", "toml"].map(|ext| dir.join(format!("{stem}.{ext}"))))
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut config = Config::default();

    config.database.path = lookup(ENV_DB_PATH).ok_or_else(|| {
        PaytrackError::Config(format!("Missing required environment variable: {ENV_DB_PATH}"))
    })?;

    override_parsed(&lookup, "PAYTRACK_DB_POOL_SIZE", &mut config.database.pool_size)?;
    override_parsed(&lookup, "PAYTRACK_PORT", &mut config.server.port)?;
    override_parsed(
        &lookup,
        "PAYTRACK_NOTIFICATION_HORIZON_DAYS",
        &mut config.notifications.horizon_days,
    )?;

    if let Some(host) = lookup("PAYTRACK_HOST") {
        config.server.host = host;
    }
    if let Some(prefix) = lookup("PAYTRACK_API_PREFIX") {
        config.server.api_prefix = prefix;
    }
    if let Some(origins) = lookup("PAYTRACK_CORS_ORIGINS") {
        config.server.cors_allowed_origins = split_origins(&origins);
    }

    Ok(config)
}

fn override_parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|e| PaytrackError::Config(format!("Invalid value for {key}: {e}")))?;
    }
    Ok(())
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
