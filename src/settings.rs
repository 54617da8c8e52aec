use crate::theme::Theme;

/// What to show when nothing has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultTheme {
    /// Apply this theme on the first initialization (without persisting it).
    Explicit(Theme),
    /// Keep whatever the document markup already says.
    Document,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub storage_key: String,
    /// Class on `<body>` whose presence means the light theme.
    pub light_marker: String,
    pub default_theme: DefaultTheme,
    /// Language assumed when `<html>` has no `lang`.
    pub fallback_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            light_marker: "light-theme".to_string(),
            default_theme: DefaultTheme::Document,
            fallback_language: "ar".to_string(),
        }
    }
}
