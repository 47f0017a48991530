//! Application configuration.
//!
//! Compiled defaults only; there are no config files or flags. Embedders
//! and tests adjust a config with the `with_*` builders.

use std::time::Duration;

use crate::error::AppError;
use crate::form::ValidationMode;
use crate::theme::{Theme, get_preset};

/// Host settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Name of a theme preset.
    pub theme: String,
    pub validation_mode: ValidationMode,
    /// How long one input poll waits before the loop re-checks.
    pub poll_interval: Duration,
    /// Capture the mouse (click to focus, wheel to scroll).
    pub mouse: bool,
    /// Widest the form column grows, in cells.
    pub max_width: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: "terminal".to_string(),
            validation_mode: ValidationMode::OnChange,
            poll_interval: Duration::from_millis(16),
            mouse: true,
            max_width: 80,
        }
    }
}

impl AppConfig {
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }

    /// Look up the configured theme preset.
    pub fn resolve_theme(&self) -> Result<Theme, AppError> {
        get_preset(&self.theme).ok_or_else(|| AppError::UnknownTheme(self.theme.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.theme, "terminal");
        assert_eq!(config.validation_mode, ValidationMode::OnChange);
        assert_eq!(config.poll_interval, Duration::from_millis(16));
        assert!(config.mouse);
        assert_eq!(config.max_width, 80);
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::default()
            .with_theme("nord")
            .with_validation_mode(ValidationMode::OnSubmit)
            .with_mouse(false)
            .with_max_width(60);
        assert_eq!(config.resolve_theme().unwrap().name, "nord");
        assert_eq!(config.validation_mode, ValidationMode::OnSubmit);
        assert!(!config.mouse);
        assert_eq!(config.max_width, 60);
    }

    #[test]
    fn test_unknown_theme() {
        let err = AppConfig::default().with_theme("neon").resolve_theme().unwrap_err();
        assert_eq!(err.to_string(), "unknown theme preset 'neon'");
    }
}
