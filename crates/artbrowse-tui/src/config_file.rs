use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::model::settings::Settings;
use crate::theme::ThemeName;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

/// Platform config directory path: `<config_dir>/artbrowse/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("artbrowse").join("config.toml"))
}

/// Load config by cascading CWD `.artbrowse.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".artbrowse.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match read_config(path) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

/// Read a config file the user pointed at explicitly; any failure is an error.
pub fn read_config(path: &Path) -> anyhow::Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api: Some(ApiConfig {
            endpoint: overlay
                .api
                .as_ref()
                .and_then(|a| a.endpoint.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.endpoint.clone())),
            timeout_secs: overlay
                .api
                .as_ref()
                .and_then(|a| a.timeout_secs)
                .or_else(|| base.api.as_ref().and_then(|a| a.timeout_secs)),
            user_agent: overlay
                .api
                .as_ref()
                .and_then(|a| a.user_agent.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.user_agent.clone())),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
            fps: overlay
                .display
                .as_ref()
                .and_then(|d| d.fps)
                .or_else(|| base.display.as_ref().and_then(|d| d.fps)),
        }),
    }
}

/// Apply the values present in a `ConfigFile` onto `Settings`.
/// Only sets values that are `Some` (and non-empty) in the file.
pub fn apply_to_settings(file_cfg: &ConfigFile, settings: &mut Settings) {
    if let Some(api) = &file_cfg.api {
        if let Some(ref endpoint) = api.endpoint
            && !endpoint.is_empty()
        {
            settings.endpoint = endpoint.clone();
        }
        if let Some(v) = api.timeout_secs {
            settings.timeout_secs = v.max(1);
        }
        if let Some(ref ua) = api.user_agent
            && !ua.is_empty()
        {
            settings.user_agent = Some(ua.clone());
        }
    }
    if let Some(disp) = &file_cfg.display {
        if let Some(ref theme) = disp.theme
            && !theme.is_empty()
        {
            match ThemeName::parse(theme) {
                Some(name) => settings.theme = name,
                None => tracing::warn!(theme = %theme, "unknown theme in config, keeping default"),
            }
        }
        if let Some(fps) = disp.fps {
            settings.fps = fps.clamp(1, 120);
        }
    }
}
