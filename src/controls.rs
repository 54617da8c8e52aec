use maud::{Markup, html};

pub const CONTAINER_ID: &str = "settingsControls";
pub const THEME_BUTTON_ID: &str = "themeToggleBtn";
pub const LANG_BUTTON_ID: &str = "langToggleBtn";

/// Preferred anchor first, then the broader navigation root.
pub const ANCHORS: [&str; 2] = ["nav .nav-actions", "nav"];

const CONTAINER_STYLE: &str =
    "display: inline-flex; gap: 10px; margin-left: 15px; align-items: center;";
const BUTTON_STYLE: &str = "padding: 8px 12px; border-radius: 50%; font-size: 1.2rem;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleTheme,
    ToggleLanguage,
}

impl Action {
    pub fn as_attr(self) -> &'static str {
        match self {
            Action::ToggleTheme => "toggle-theme",
            Action::ToggleLanguage => "toggle-language",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "toggle-theme" => Some(Action::ToggleTheme),
            "toggle-language" => Some(Action::ToggleLanguage),
            _ => None,
        }
    }
}

/// The theme button starts empty; the controller fills in its glyph.
pub fn render_controls() -> Markup {
    html! {
        div id=(CONTAINER_ID) style=(CONTAINER_STYLE) {
            button type="button" id=(THEME_BUTTON_ID) class="btn btn-ghost"
                data-action=(Action::ToggleTheme.as_attr()) style=(BUTTON_STYLE) {}
            button type="button" id=(LANG_BUTTON_ID) class="btn btn-ghost"
                data-action=(Action::ToggleLanguage.as_attr()) style=(BUTTON_STYLE)
                title="Change Language" { "🌐" }
        }
    }
}
