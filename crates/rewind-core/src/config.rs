use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::rewind::RewindInputs;
use crate::time::parse_clock_strict;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Inputs shown when the widget opens, and the accepted duration range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Finish time shown at startup ("HH:MM")
    #[serde(default = "default_end_time")]
    pub default_end_time: String,
    /// Duration in minutes shown at startup
    #[serde(default = "default_duration")]
    pub default_duration: i64,
    /// Smallest duration the inputs accept
    #[serde(default = "default_min_duration")]
    pub min_duration: i64,
    /// Largest duration the inputs accept
    #[serde(default = "default_max_duration")]
    pub max_duration: i64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_end_time: default_end_time(),
            default_duration: default_duration(),
            min_duration: default_min_duration(),
            max_duration: default_max_duration(),
        }
    }
}

impl WidgetConfig {
    /// Clamp a duration into `[min_duration, max_duration]`
    pub fn clamp_duration(&self, minutes: i64) -> i64 {
        minutes.clamp(self.min_duration, self.max_duration)
    }

    /// Interpret typed duration text; unparsable text counts as zero
    /// before clamping, so it lands on the minimum
    pub fn parse_duration_input(&self, text: &str) -> i64 {
        self.clamp_duration(text.trim().parse().unwrap_or(0))
    }

    /// Inputs the controller starts with
    pub fn initial_inputs(&self) -> RewindInputs {
        RewindInputs::new(
            self.default_end_time.clone(),
            self.clamp_duration(self.default_duration),
        )
    }
}

/// Highest frame rate honoured; faster requests are capped
pub const MAX_ANIMATION_FPS: u32 = 1000;

/// Interval between frames at `fps`, never shorter than one millisecond
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_millis(1000 / fps.clamp(1, MAX_ANIMATION_FPS) as u64)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Length of the rewind playback in milliseconds
    #[serde(default = "default_rewind_ms")]
    pub rewind_ms: u64,
    /// Frame rate while a rewind is playing
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Event poll interval while nothing is playing, in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rewind_ms: default_rewind_ms(),
            animation_fps: default_animation_fps(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl AnimationConfig {
    /// Rewind length as Duration
    #[inline]
    pub fn rewind_window(&self) -> Duration {
        Duration::from_millis(self.rewind_ms)
    }

    /// Frame interval while animating
    #[inline]
    pub fn frame_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            frame_interval(self.animation_fps)
        }
    }

    /// Poll interval while idle
    #[inline]
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name ("gruvbox-dark", "nord", "dracula")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either `theme = "nord"` or `theme = { name = "nord", colors = { ... } }`
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "colors" => {
                            colors = Some(map.next_value()?);
                        }
                        _ => {
                            // Ignore unknown fields
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Primary background
    pub bg0: Option<String>,
    /// Panel background
    pub bg1: Option<String>,
    /// Status bar background
    pub bg2: Option<String>,
    /// Primary foreground
    pub fg0: Option<String>,
    /// Dimmed foreground
    pub fg1: Option<String>,
    /// Focused borders and titles
    pub accent: Option<String>,
    /// Focused input field background
    pub selection: Option<String>,
    /// Hour hand
    pub hour_hand: Option<String>,
    /// Minute hand
    pub minute_hand: Option<String>,
    /// Progress gauge
    pub progress: Option<String>,
    /// Borrow step highlight
    pub borrow: Option<String>,
    /// Final answer highlight
    pub answer: Option<String>,
    /// Error messages
    pub error: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "K" (Shift+k), "<C-r>" (Ctrl+r), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Play the rewind
    #[serde(default = "default_key_start")]
    pub start: String,
    /// Stop and return to the finish time
    #[serde(default = "default_key_reset")]
    pub reset: String,
    /// Focus the next input field
    #[serde(default = "default_key_next_field")]
    pub next_field: String,
    /// Focus the previous input field
    #[serde(default = "default_key_prev_field")]
    pub prev_field: String,
    /// Increase the focused field by one step
    #[serde(default = "default_key_increase")]
    pub increase: String,
    /// Decrease the focused field by one step
    #[serde(default = "default_key_decrease")]
    pub decrease: String,
    /// Increase the focused field by a large step
    #[serde(default = "default_key_increase_more")]
    pub increase_more: String,
    /// Decrease the focused field by a large step
    #[serde(default = "default_key_decrease_more")]
    pub decrease_more: String,
    /// Type a new value into the focused field
    #[serde(default = "default_key_edit")]
    pub edit: String,
    /// Show key help
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            start: default_key_start(),
            reset: default_key_reset(),
            next_field: default_key_next_field(),
            prev_field: default_key_prev_field(),
            increase: default_key_increase(),
            decrease: default_key_decrease(),
            increase_more: default_key_increase_more(),
            decrease_more: default_key_decrease_more(),
            edit: default_key_edit(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_start() -> String { "s".to_string() }
fn default_key_reset() -> String { "r".to_string() }
fn default_key_next_field() -> String { "<Tab>".to_string() }
fn default_key_prev_field() -> String { "<S-Tab>".to_string() }
fn default_key_increase() -> String { "k".to_string() }
fn default_key_decrease() -> String { "j".to_string() }
fn default_key_increase_more() -> String { "K".to_string() }
fn default_key_decrease_more() -> String { "J".to_string() }
fn default_key_edit() -> String { "<CR>".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rewind")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_end_time() -> String {
    "09:24".to_string()
}

fn default_duration() -> i64 {
    34
}

fn default_min_duration() -> i64 {
    1
}

fn default_max_duration() -> i64 {
    180
}

fn default_rewind_ms() -> u64 {
    3000
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Reject settings the widget cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let widget = &self.widget;
        if widget.min_duration < 1 {
            return Err(crate::Error::Config(format!(
                "widget.min_duration must be at least 1, got {}",
                widget.min_duration
            )));
        }
        if widget.min_duration > widget.max_duration {
            return Err(crate::Error::Config(format!(
                "widget.min_duration ({}) is larger than widget.max_duration ({})",
                widget.min_duration, widget.max_duration
            )));
        }
        if widget.max_duration >= crate::time::MINUTES_PER_DAY {
            return Err(crate::Error::Config(format!(
                "widget.max_duration must be less than a day, got {}",
                widget.max_duration
            )));
        }
        parse_clock_strict(&widget.default_end_time)
            .map_err(|e| crate::Error::Config(format!("widget.default_end_time: {}", e)))?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/rewind/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("rewind")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("rewind.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.widget.default_end_time, "09:24");
        assert_eq!(config.widget.default_duration, 34);
        assert_eq!(config.widget.min_duration, 1);
        assert_eq!(config.widget.max_duration, 180);
        assert_eq!(config.animation.rewind_ms, 3000);
        assert_eq!(config.animation.animation_fps, 60);
        assert_eq!(config.ui.theme.name, "gruvbox-dark");
        assert_eq!(config.keymap.start, "s");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [widget]
            default_duration = 90

            [animation]
            rewind_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(config.widget.default_duration, 90);
        assert_eq!(config.widget.default_end_time, "09:24");
        assert_eq!(config.animation.rewind_window(), Duration::from_millis(1500));
        assert_eq!(config.animation.animation_fps, 60);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_theme_as_string() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "nord");
        assert!(config.ui.theme.colors.accent.is_none());
    }

    #[test]
    fn test_theme_as_table() {
        let config = AppConfig::from_toml(
            r##"
            [ui.theme]
            name = "dracula"
            colors = { hour_hand = "#ff0000" }
            "##,
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "dracula");
        assert_eq!(config.ui.theme.colors.hour_hand.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml("[widget\n"),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.widget.default_end_time = "10:50".to_string();
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.widget.default_end_time, "10:50");
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        config.widget.min_duration = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.widget.min_duration = 50;
        config.widget.max_duration = 10;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.widget.max_duration = 1440;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.widget.default_end_time = "25:00".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_duration() {
        let widget = WidgetConfig::default();
        assert_eq!(widget.clamp_duration(0), 1);
        assert_eq!(widget.clamp_duration(-5), 1);
        assert_eq!(widget.clamp_duration(34), 34);
        assert_eq!(widget.clamp_duration(500), 180);
    }

    #[test]
    fn test_parse_duration_input() {
        let widget = WidgetConfig::default();
        assert_eq!(widget.parse_duration_input("45"), 45);
        assert_eq!(widget.parse_duration_input(" 7 "), 7);
        assert_eq!(widget.parse_duration_input(""), 1);
        assert_eq!(widget.parse_duration_input("abc"), 1);
        assert_eq!(widget.parse_duration_input("999"), 180);
    }

    #[test]
    fn test_initial_inputs() {
        let inputs = WidgetConfig::default().initial_inputs();
        assert_eq!(inputs, RewindInputs::new("09:24", 34));
    }

    #[test]
    fn test_frame_duration() {
        let mut animation = AnimationConfig::default();
        assert_eq!(animation.frame_duration(), Duration::from_millis(16));
        animation.animation_fps = 0;
        assert_eq!(animation.frame_duration(), Duration::from_millis(16));
        animation.animation_fps = 30;
        assert_eq!(animation.frame_duration(), Duration::from_millis(33));
        animation.animation_fps = 5000;
        assert_eq!(animation.frame_duration(), Duration::from_millis(1));
        animation.animation_fps = u32::MAX;
        assert!(!animation.frame_duration().is_zero());
    }

    #[test]
    fn test_frame_interval_bounds() {
        assert_eq!(frame_interval(0), Duration::from_secs(1));
        assert_eq!(frame_interval(1), Duration::from_secs(1));
        assert_eq!(frame_interval(MAX_ANIMATION_FPS), Duration::from_millis(1));
        assert_eq!(frame_interval(MAX_ANIMATION_FPS + 1), Duration::from_millis(1));
        assert_eq!(frame_interval(u32::MAX), Duration::from_millis(1));
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("rewind-config-does-not-exist.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.widget.default_duration, 34);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("rewind-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.widget.default_duration = 77;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.widget.default_duration, 77);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
