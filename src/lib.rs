mod cli;
mod controller;
mod controls;
mod document;
mod page;
mod settings;
mod storage;
mod theme;

use std::io::Write as _;

use anyhow::Context as _;

pub use cli::{Args as CliArgs, Control, DefaultThemeArg};
pub use controller::{LANGUAGE_NOTICE, PreferenceController};
pub use controls::{Action, LANG_BUTTON_ID, THEME_BUTTON_ID};
pub use document::{ControlSurface, Notifier, Presentation, StderrNotifier};
pub use page::HtmlPage;
pub use settings::{DefaultTheme, Settings};
pub use storage::{DisabledStore, FileStore, MemoryStore, PreferenceStore};
pub use theme::{Affordance, Theme};

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let page = HtmlPage::load(&args.page)?;
    let store = open_store(&args);

    let settings = Settings {
        default_theme: args.default_theme.into(),
        ..Settings::default()
    };
    let mut controller =
        PreferenceController::new(settings, store, page.clone(), page.clone(), StderrNotifier);

    controller.initialize();
    for control in &args.click {
        let id = control.element_id();
        if !controller.click(id) {
            tracing::warn!(%id, "nothing to click; control is not on the page");
        }
    }
    tracing::info!(theme = %controller.current_theme(), "page prepared");

    let html = page.to_html()?;
    match &args.out {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create {}", parent.display()))?;
                }
            }
            std::fs::write(out_path, html)
                .with_context(|| format!("write {}", out_path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes()).context("write stdout")?;
            stdout.flush().context("flush stdout")?;
        }
    }

    Ok(())
}

fn open_store(args: &CliArgs) -> Box<dyn PreferenceStore> {
    if args.no_storage {
        return Box::new(DisabledStore);
    }
    match FileStore::open(&args.store, &args.origin) {
        Ok(store) => {
            tracing::debug!(path = %args.store.display(), origin = store.origin(), "opened store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "preference storage unavailable");
            Box::new(DisabledStore)
        }
    }
}
