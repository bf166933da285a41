use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

pub const CONFIG_VERSION: u64 = 1;
const APP_DIR: &str = "galeria";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Which WhatsApp endpoint the contact form opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LinkTarget {
    /// Decide from the user agent
    #[default]
    Auto,
    Mobile,
    Desktop,
}

/// Site config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Entrance delay added per item position, in milliseconds
    pub stagger_step_ms: u64,
    /// How long the lightbox image stays faded out before the swap
    pub fade_delay_ms: u64,
    /// Wait between opening the hero video modal and starting playback
    pub video_play_delay_ms: u64,
    /// Fraction of an element that must be on screen before it is revealed
    pub reveal_threshold: f64,
    /// Bottom margin subtracted from the viewport for reveal checks
    pub reveal_bottom_margin_px: f64,
    /// WhatsApp number with country code, no `+` or spaces
    pub whatsapp_number: String,
    pub link_target: LinkTarget,
    /// Local date-time the countdown runs to
    pub countdown_target: String,
    pub feed_url: String,
    pub feed_fallback_image: String,
    pub words_per_minute: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            stagger_step_ms: 50,
            fade_delay_ms: 200,
            video_play_delay_ms: 300,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
            whatsapp_number: "593981037979".to_string(),
            link_target: LinkTarget::default(),
            countdown_target: "2026-02-15T09:00:00".to_string(),
            feed_url: "http://escuelaven7as.local/wp-json/wp/v2/posts?per_page=3&_embed"
                .to_string(),
            feed_fallback_image: "assets/hero/1.jpg".to_string(),
            words_per_minute: 200,
        }
    }
}

impl SiteConfig {
    pub fn stagger_step(&self) -> Duration {
        Duration::from_millis(self.stagger_step_ms)
    }

    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }

    pub fn video_play_delay(&self) -> Duration {
        Duration::from_millis(self.video_play_delay_ms)
    }

    /// Loads the config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Loads from the user config directory, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let loaded = config_path().and_then(|path| Self::load_from(&path));
        match loaded {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("failed to load config: {err}");
                Self::default()
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| {
            dir.join(APP_DIR)
                .join(format!("v{CONFIG_VERSION}"))
                .join(CONFIG_FILE)
        })
        .ok_or(ConfigError::NoConfigDir)
}
