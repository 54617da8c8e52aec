use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::controls::{LANG_BUTTON_ID, THEME_BUTTON_ID};
use crate::settings::DefaultTheme;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DefaultThemeArg {
    Light,
    Dark,
    /// Keep the theme the page markup already declares.
    Document,
}

impl From<DefaultThemeArg> for DefaultTheme {
    fn from(arg: DefaultThemeArg) -> Self {
        match arg {
            DefaultThemeArg::Light => DefaultTheme::Explicit(Theme::Light),
            DefaultThemeArg::Dark => DefaultTheme::Explicit(Theme::Dark),
            DefaultThemeArg::Document => DefaultTheme::Document,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Control {
    /// The theme toggle button.
    Theme,
    /// The language toggle button.
    Language,
}

impl Control {
    /// Id of the injected button this control stands for.
    pub fn element_id(self) -> &'static str {
        match self {
            Control::Theme => THEME_BUTTON_ID,
            Control::Language => LANG_BUTTON_ID,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// HTML page to prepare.
    #[arg(long)]
    pub page: PathBuf,

    /// Where to write the resulting page. Defaults to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// JSON file holding persisted preferences, shared across runs.
    #[arg(long, default_value = "preferences.json")]
    pub store: PathBuf,

    /// Origin the page is served from; preferences are partitioned by origin.
    #[arg(long, default_value = "http://localhost/")]
    pub origin: Url,

    /// Behave as if the host disabled local storage.
    #[arg(long)]
    pub no_storage: bool,

    /// Theme applied when nothing has been persisted yet. `document` keeps the page's markup.
    #[arg(long, value_enum, default_value = "document")]
    pub default_theme: DefaultThemeArg,

    /// Controls to click after the page is ready, in order. May be repeated.
    #[arg(long, value_enum)]
    pub click: Vec<Control>,
}
