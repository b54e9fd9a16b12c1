//! User settings and preferences
//!
//! Persisted separately from the dashboard database in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    Light,
    Dark,
    /// Follow the browser's `prefers-color-scheme`
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" | "auto" => Some(Theme::System),
            _ => None,
        }
    }

    /// Resolve against the browser preference
    pub fn is_dark(&self, prefers_dark: bool) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => prefers_dark,
        }
    }
}

/// Widget shown when a new tab opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DashboardView {
    #[default]
    Projects,
    QuickTodo,
    Writer,
    Games,
}

/// Dashboard settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub default_view: DashboardView,

    // === Game ===
    /// Sound effects in arcade games
    pub game_sound: bool,
    /// Show the in-game HUD (score, lives, quantum timer)
    pub show_hud: bool,
    /// Persist and show the Quantum Dino leaderboard
    pub keep_highscores: bool,

    // === Accessibility ===
    /// Reduced motion (no starfield drift, no hit flashes)
    pub reduced_motion: bool,

    /// Toast duration override in ms (0 = default)
    pub toast_duration_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            default_view: DashboardView::Projects,

            game_sound: true,
            show_hud: true,
            keep_highscores: true,

            reduced_motion: false,

            toast_duration_ms: 0,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dashboard_settings";

    /// Effective toast duration
    pub fn toast_duration_ms(&self) -> f64 {
        if self.toast_duration_ms == 0 {
            crate::notify::DEFAULT_DURATION_MS
        } else {
            f64::from(self.toast_duration_ms)
        }
    }

    /// Starfield and flash effects (respects reduced_motion)
    pub fn effective_animations(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from LocalStorage, defaults if absent
    pub fn load() -> Self {
        match storage::load_json(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        storage::save_json(Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("DARK"), Some(Theme::Dark));
        assert_eq!(Theme::parse("auto"), Some(Theme::System));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
    }

    #[test]
    fn test_system_theme_follows_browser() {
        assert!(Theme::System.is_dark(true));
        assert!(!Theme::System.is_dark(false));
        assert!(Theme::Dark.is_dark(false));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"Dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.game_sound);
        assert_eq!(settings.toast_duration_ms(), 3000.0);
    }

    #[test]
    fn test_native_load_is_default() {
        let settings = Settings::load();
        assert_eq!(settings.default_view, DashboardView::Projects);
    }
}
