#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Icon and tooltip for the action the theme button performs next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordance {
    pub glyph: &'static str,
    pub title: &'static str,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a persisted value. Anything other than `light`/`dark` is `None`.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn affordance(self) -> Affordance {
        match self {
            Theme::Light => Affordance {
                glyph: "🌙",
                title: "Switch to Dark Mode",
            },
            Theme::Dark => Affordance {
                glyph: "☀️",
                title: "Switch to Light Mode",
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
