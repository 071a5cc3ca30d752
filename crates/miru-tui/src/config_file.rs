use std::path::{Path, PathBuf};

use serde::Deserialize;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    pub database: Option<DatabaseConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub order: Option<String>,
}

impl ConfigFile {
    pub fn database_path(&self) -> Option<&str> {
        self.database.as_ref()?.path.as_deref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.display.as_ref()?.theme.as_deref()
    }

    pub fn order(&self) -> Option<&str> {
        self.display.as_ref()?.order.as_deref()
    }
}

/// Platform config directory path: `<config_dir>/miru/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("miru").join("config.toml"))
}

/// Load config by cascading CWD `.miru.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".miru.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let pick = |o: Option<&str>, b: Option<&str>| o.or(b).map(str::to_string);
    ConfigFile {
        database: Some(DatabaseConfig {
            path: pick(overlay.database_path(), base.database_path()),
        }),
        display: Some(DisplayConfig {
            theme: pick(overlay.theme(), base.theme()),
            order: pick(overlay.order(), base.order()),
        }),
    }
}

/// `~/.miru.db`, or a relative `.miru.db` when there is no home directory.
pub fn default_database_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".miru.db"))
        .unwrap_or_else(|| PathBuf::from(".miru.db"))
}

/// Expand a leading `~` and make the path absolute against the working
/// directory.
pub fn resolve_path(raw: &str) -> std::io::Result<PathBuf> {
    let expanded = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) if rest.is_empty() => home,
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(raw),
        },
        _ => PathBuf::from(raw),
    };
    std::path::absolute(expanded)
}
