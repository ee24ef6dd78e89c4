use crate::animation::Easing;
use crate::drag::DragConfig;
use crate::error::ensure_within;
use crate::menu::{self, MenuConfig};
use crate::overlay::OverlayConfig;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TRIGGER_SIZE: f64 = 56.0;
pub const DEFAULT_ITEM_SIZE: f64 = 48.0;
pub const DEFAULT_ANGLE_DEGREES: f64 = 90.0;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuSection {
    pub radius: f64,
    /// Span of the fan in degrees.
    pub angle: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "duration_ms")]
    pub duration: Duration,
}

impl Default for MenuSection {
    fn default() -> Self {
        Self {
            radius: menu::DEFAULT_RADIUS,
            angle: DEFAULT_ANGLE_DEGREES,
            duration: menu::DEFAULT_DURATION,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TriggerSection {
    pub size: f64,
    pub hidden_width_ratio: f64,
    pub active_alpha: f64,
    pub inactive_alpha: f64,
    pub click_slop: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "click_timeout_ms")]
    pub click_timeout: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "snap_duration_ms")]
    pub snap_duration: Duration,
    pub snap_easing: Easing,
}

impl Default for TriggerSection {
    fn default() -> Self {
        let drag = DragConfig::default();
        Self {
            size: DEFAULT_TRIGGER_SIZE,
            hidden_width_ratio: drag.hidden_width_ratio,
            active_alpha: drag.pressed_alpha,
            inactive_alpha: drag.unpressed_alpha,
            click_slop: drag.click_slop,
            click_timeout: drag.click_timeout,
            snap_duration: drag.snap_duration,
            snap_easing: drag.snap_easing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemConfig {
    pub label: String,
    #[serde(default = "default_item_size")]
    pub size: f64,
}

fn default_item_size() -> f64 {
    DEFAULT_ITEM_SIZE
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuSection,
    #[serde(default)]
    pub trigger: TriggerSection,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Config {
    /// Checks every value and converts to the runtime configuration.
    pub fn overlay(&self) -> crate::Result<OverlayConfig> {
        let overlay = OverlayConfig {
            menu: MenuConfig {
                radius: ensure_within("menu.radius", self.menu.radius, 0.0, f64::MAX)?,
                arc_angle: ensure_within("menu.angle", self.menu.angle, 0.0, 360.0)?.to_radians(),
                animation_duration: self.menu.duration,
            },
            drag: DragConfig {
                hidden_width_ratio: self.trigger.hidden_width_ratio,
                pressed_alpha: self.trigger.active_alpha,
                unpressed_alpha: self.trigger.inactive_alpha,
                click_slop: self.trigger.click_slop,
                click_timeout: self.trigger.click_timeout,
                snap_duration: self.trigger.snap_duration,
                snap_easing: self.trigger.snap_easing,
            },
        };
        overlay.validate()?;
        ensure_within("trigger.size", self.trigger.size, 1.0, f64::MAX)?;
        for item in &self.items {
            ensure_within("items.size", item.size, 1.0, f64::MAX)?;
        }
        Ok(overlay)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Invalid(#[from] crate::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcmenu", "arcmenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("ARCMENU")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.overlay()?;
    Ok(config)
}

/// Falls back to the bundled defaults when the file is missing or broken.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Using default configuration: {}", e);
            default_config()
        }
    }
}

pub fn default_config() -> Config {
    Config {
        items: (1..=3)
            .map(|i| ItemConfig {
                label: i.to_string(),
                size: DEFAULT_ITEM_SIZE,
            })
            .collect(),
        ..Config::default()
    }
}

/// Seeds the config file with the bundled defaults on first run.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    write_default_config_to(&path)?;
    Ok(path)
}

/// Returns `false`, leaving the file alone, when `path` already exists.
pub fn write_default_config_to(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    log::info!("Wrote default configuration to {}", path.display());
    Ok(true)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::info!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
