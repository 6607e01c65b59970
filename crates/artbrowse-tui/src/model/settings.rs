use std::time::Duration;

use artbrowse_core::{Config, DEFAULT_ENDPOINT};

use crate::theme::ThemeName;

/// Resolved runtime settings (defaults < config file < env < CLI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// `None` keeps the core default user agent.
    pub user_agent: Option<String>,
    pub theme: ThemeName,
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
            user_agent: None,
            theme: ThemeName::default(),
            fps: 10,
        }
    }
}

impl Settings {
    /// Connection settings for the core crate.
    pub fn core_config(&self) -> Config {
        let mut config = Config {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..Config::default()
        };
        if let Some(ref ua) = self.user_agent {
            config.user_agent = ua.clone();
        }
        config
    }

    /// Redraw/tick interval derived from `fps`.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.clamp(1, 120) as u64)
    }
}
