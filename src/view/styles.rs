//! Role and chrome styling configuration.

use crate::model::Role;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== MessageStyles =====

/// Styling for message roles and widget chrome.
#[derive(Debug, Clone)]
pub struct MessageStyles {
    user_style: Style,
    assistant_style: Style,
    muted_style: Style,
    accent_style: Style,
}

impl MessageStyles {
    /// Default color scheme (user cyan, assistant green).
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Create styles honoring the given color configuration.
    ///
    /// With colors disabled, every style falls back to the terminal default.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                user_style: Style::default().fg(Color::Cyan),
                assistant_style: Style::default().fg(Color::Green),
                muted_style: Style::default().fg(Color::DarkGray),
                accent_style: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                user_style: Style::default(),
                assistant_style: Style::default(),
                muted_style: Style::default(),
                accent_style: Style::default().add_modifier(Modifier::BOLD),
            }
        }
    }

    /// Style for a message role.
    pub fn style_for_role(&self, role: Role) -> Style {
        match role {
            Role::User => self.user_style,
            Role::Assistant => self.assistant_style,
        }
    }

    /// Dimmed style for hints and secondary chrome.
    pub fn muted(&self) -> Style {
        self.muted_style
    }

    /// Emphasized style for the header and shortcut labels.
    pub fn accent(&self) -> Style {
        self.accent_style
    }
}

impl Default for MessageStyles {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(no_color_env)]
    fn no_color_flag_disables_role_colors() {
        std::env::remove_var("NO_COLOR");
        let styles = MessageStyles::with_color_config(ColorConfig::from_env_and_args(true));
        assert_eq!(styles.style_for_role(Role::User), Style::default());
        assert_eq!(styles.style_for_role(Role::Assistant), Style::default());
    }

    #[test]
    #[serial(no_color_env)]
    fn no_color_env_var_disables_colors() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(!config.colors_enabled());
    }

    #[test]
    #[serial(no_color_env)]
    fn roles_get_distinct_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let styles = MessageStyles::with_color_config(ColorConfig::from_env_and_args(false));
        assert_ne!(
            styles.style_for_role(Role::User),
            styles.style_for_role(Role::Assistant)
        );
    }
}
