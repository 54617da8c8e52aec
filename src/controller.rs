use crate::controls::{self, Action};
use crate::document::{ControlSurface, Notifier, Presentation};
use crate::settings::{DefaultTheme, Settings};
use crate::storage::PreferenceStore;
use crate::theme::Theme;

pub const LANGUAGE_NOTICE: &str = "English version coming soon! / النسخة الإنجليزية قادمة قريباً";

/// Keeps the presentation marker, the persisted theme and the theme button in agreement.
///
/// The controller is the only writer of all three.
pub struct PreferenceController<S, P, C, N> {
    settings: Settings,
    store: S,
    presentation: P,
    controls: C,
    notifier: N,
    default_applied: bool,
}

impl<S, P, C, N> PreferenceController<S, P, C, N>
where
    S: PreferenceStore,
    P: Presentation,
    C: ControlSurface,
    N: Notifier,
{
    pub fn new(settings: Settings, store: S, presentation: P, controls: C, notifier: N) -> Self {
        Self {
            settings,
            store,
            presentation,
            controls,
            notifier,
            default_applied: false,
        }
    }

    /// Safe to call on every "ready" signal.
    pub fn initialize(&mut self) {
        tracing::debug!("initializing page settings");
        self.apply_persisted();
        self.ensure_controls_injected();
        self.refresh_display();
    }

    pub fn apply_persisted(&mut self) {
        match self.persisted_theme() {
            Some(theme) => self.set_theme(theme),
            // Applied at most once, so a re-init never undoes an unpersisted toggle.
            None => match self.settings.default_theme {
                DefaultTheme::Explicit(theme) if !self.default_applied => {
                    self.set_theme(theme);
                    self.default_applied = true;
                }
                DefaultTheme::Explicit(_) | DefaultTheme::Document => {}
            },
        }
    }

    pub fn current_theme(&self) -> Theme {
        if self.presentation.has_marker(&self.settings.light_marker) {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current_theme().toggled();
        self.set_theme(next);
        if let Err(e) = self.store.set(&self.settings.storage_key, next.as_str()) {
            tracing::warn!(error = %e, theme = %next, "could not persist theme");
        }
        self.refresh_display();
        tracing::info!(theme = %next, "theme toggled");
        next
    }

    pub fn refresh_display(&mut self) {
        let affordance = self.current_theme().affordance();
        if !self
            .controls
            .set_label(controls::THEME_BUTTON_ID, affordance.glyph, affordance.title)
        {
            tracing::debug!("theme button not present; nothing to refresh");
        }
    }

    /// Returns `true` only when the controls were inserted by this call.
    pub fn ensure_controls_injected(&mut self) -> bool {
        if self.controls.has_element(controls::THEME_BUTTON_ID) {
            return false;
        }

        let markup = controls::render_controls().into_string();
        match self.controls.prepend_to_anchor(&controls::ANCHORS, &markup) {
            Ok(Some(anchor)) => {
                tracing::debug!(%anchor, "injected settings controls");
                true
            }
            Ok(None) => {
                tracing::debug!("no navigation anchor; skipping controls");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to inject settings controls");
                false
            }
        }
    }

    /// Placeholder until an English version exists.
    pub fn toggle_language(&mut self) {
        let language = self
            .presentation
            .language()
            .unwrap_or_else(|| self.settings.fallback_language.clone());
        if language == "ar" {
            self.notifier.notify(LANGUAGE_NOTICE);
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::ToggleTheme => {
                self.toggle();
            }
            Action::ToggleLanguage => self.toggle_language(),
        }
    }

    /// Dispatches whatever action the element with `id` carries.
    pub fn click(&mut self, id: &str) -> bool {
        match self.controls.action_of(id).as_deref().and_then(Action::from_attr) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => {
                tracing::debug!(%id, "element has no known action");
                false
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn persisted_theme(&self) -> Option<Theme> {
        let key = &self.settings.storage_key;
        let stored = match self.store.get(key) {
            Ok(stored) => stored?,
            Err(e) => {
                tracing::warn!(error = %e, "preference storage unavailable; using default");
                return None;
            }
        };
        let theme = Theme::from_stored(&stored);
        if theme.is_none() {
            tracing::warn!(value = %stored, "ignoring unknown stored theme");
        }
        theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.presentation
            .set_marker(&self.settings.light_marker, theme == Theme::Light);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::storage::{DisabledStore, MemoryStore};

    #[derive(Default)]
    struct FakePresentation {
        light: bool,
        lang: Option<String>,
    }

    impl FakePresentation {
        /// Markup that ships with the light marker already set.
        fn light_markup() -> Self {
            Self {
                light: true,
                lang: None,
            }
        }
    }

    impl Presentation for FakePresentation {
        fn has_marker(&self, marker: &str) -> bool {
            marker == "light-theme" && self.light
        }

        fn set_marker(&mut self, _marker: &str, present: bool) {
            self.light = present;
        }

        fn language(&self) -> Option<String> {
            self.lang.clone()
        }
    }

    struct FakeControls {
        has_anchor: bool,
        injections: usize,
        labels: HashMap<String, (String, String)>,
    }

    impl FakeControls {
        fn with_anchor() -> Self {
            Self {
                has_anchor: true,
                injections: 0,
                labels: HashMap::new(),
            }
        }

        fn theme_label(&self) -> Option<&(String, String)> {
            self.labels.get(controls::THEME_BUTTON_ID)
        }
    }

    impl ControlSurface for FakeControls {
        fn has_element(&self, id: &str) -> bool {
            self.injections > 0 && (id == controls::THEME_BUTTON_ID || id == controls::LANG_BUTTON_ID)
        }

        fn prepend_to_anchor(
            &mut self,
            _anchors: &[&str],
            _markup: &str,
        ) -> anyhow::Result<Option<String>> {
            if !self.has_anchor {
                return Ok(None);
            }
            self.injections += 1;
            Ok(Some("nav".to_string()))
        }

        fn set_label(&mut self, id: &str, text: &str, title: &str) -> bool {
            if !self.has_element(id) {
                return false;
            }
            self.labels
                .insert(id.to_string(), (text.to_string(), title.to_string()));
            true
        }

        fn action_of(&self, id: &str) -> Option<String> {
            match id {
                controls::THEME_BUTTON_ID => Some(Action::ToggleTheme.as_attr().to_string()),
                controls::LANG_BUTTON_ID => Some(Action::ToggleLanguage.as_attr().to_string()),
                _ => None,
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    type TestController<S> =
        PreferenceController<S, FakePresentation, FakeControls, RecordingNotifier>;

    fn controller<S: PreferenceStore>(store: S) -> TestController<S> {
        PreferenceController::new(
            Settings::default(),
            store,
            FakePresentation::light_markup(),
            FakeControls::with_anchor(),
            RecordingNotifier::default(),
        )
    }

    #[test]
    fn initialize_resolves_persisted_value() {
        let cases = [
            (Some("dark"), Theme::Dark),
            (Some("light"), Theme::Light),
            (None, Theme::Light),
            (Some("purple"), Theme::Light),
        ];
        for (stored, expected) in cases {
            let store = match stored {
                Some(v) => MemoryStore::with_entry("theme", v),
                None => MemoryStore::new(),
            };
            let mut c = controller(store);
            c.initialize();
            assert_eq!(c.current_theme(), expected, "stored {stored:?}");
        }
    }

    #[test]
    fn initialize_never_writes_a_default() {
        let mut c = controller(MemoryStore::new());
        c.initialize();
        assert_eq!(c.store().get("theme").unwrap(), None);
    }

    #[test]
    fn initialize_twice_keeps_state_and_controls() {
        let mut c = controller(MemoryStore::with_entry("theme", "dark"));
        c.initialize();
        c.initialize();
        assert_eq!(c.current_theme(), Theme::Dark);
        assert_eq!(c.controls().injections, 1);
    }

    #[test]
    fn empty_store_keeps_dark_markup_by_default() {
        let mut c = PreferenceController::new(
            Settings::default(),
            MemoryStore::new(),
            FakePresentation::default(),
            FakeControls::with_anchor(),
            RecordingNotifier::default(),
        );
        c.initialize();
        assert_eq!(c.current_theme(), Theme::Dark);
    }

    #[test]
    fn explicit_default_overrides_markup_once() {
        let settings = Settings {
            default_theme: DefaultTheme::Explicit(Theme::Light),
            ..Settings::default()
        };
        let mut c = PreferenceController::new(
            settings,
            DisabledStore,
            FakePresentation::default(),
            FakeControls::with_anchor(),
            RecordingNotifier::default(),
        );
        c.initialize();
        assert_eq!(c.current_theme(), Theme::Light);

        c.toggle();
        c.initialize();
        assert_eq!(c.current_theme(), Theme::Dark);
    }

    #[test]
    fn reinitialize_keeps_unpersisted_toggle() {
        let mut c = controller(DisabledStore);
        c.initialize();
        assert_eq!(c.toggle(), Theme::Dark);
        c.initialize();
        assert_eq!(c.current_theme(), Theme::Dark);
        assert_eq!(
            c.controls().theme_label(),
            Some(&("☀️".to_string(), "Switch to Light Mode".to_string()))
        );
    }

    #[test]
    fn toggle_twice_restores_state_and_persists_it() {
        let mut c = controller(MemoryStore::new());
        c.initialize();
        let start = c.current_theme();

        assert_eq!(c.toggle(), start.toggled());
        assert_eq!(
            c.store().get("theme").unwrap().as_deref(),
            Some(start.toggled().as_str())
        );

        assert_eq!(c.toggle(), start);
        assert_eq!(c.current_theme(), start);
        assert_eq!(c.store().get("theme").unwrap().as_deref(), Some(start.as_str()));
    }

    #[test]
    fn display_offers_the_opposite_theme() {
        let mut c = controller(MemoryStore::new());
        c.initialize();
        assert_eq!(
            c.controls().theme_label(),
            Some(&("🌙".to_string(), "Switch to Dark Mode".to_string()))
        );
        c.toggle();
        assert_eq!(
            c.controls().theme_label(),
            Some(&("☀️".to_string(), "Switch to Light Mode".to_string()))
        );
    }

    #[test]
    fn unavailable_storage_still_toggles_presentation() {
        let mut c = controller(DisabledStore);
        c.initialize();
        assert_eq!(c.current_theme(), Theme::Light);
        assert_eq!(c.toggle(), Theme::Dark);
        assert_eq!(c.current_theme(), Theme::Dark);
    }

    #[test]
    fn injection_happens_once() {
        let mut c = controller(MemoryStore::new());
        assert!(c.ensure_controls_injected());
        assert!(!c.ensure_controls_injected());
        assert_eq!(c.controls().injections, 1);
    }

    #[test]
    fn missing_anchor_is_silently_skipped() {
        let mut c = PreferenceController::new(
            Settings::default(),
            MemoryStore::new(),
            FakePresentation::light_markup(),
            FakeControls {
                has_anchor: false,
                injections: 0,
                labels: HashMap::new(),
            },
            RecordingNotifier::default(),
        );
        c.initialize();
        assert!(!c.ensure_controls_injected());
        assert_eq!(c.controls().theme_label(), None);
        assert_eq!(c.toggle(), Theme::Dark);
    }

    #[test]
    fn language_stub_notices_only_for_arabic() {
        let mut c = controller(MemoryStore::new());
        c.presentation.lang = Some("ar".to_string());
        c.toggle_language();
        assert_eq!(c.notifier().messages, vec![LANGUAGE_NOTICE.to_string()]);

        let mut c = controller(MemoryStore::new());
        c.presentation.lang = Some("en".to_string());
        c.toggle_language();
        c.presentation.lang = Some(" ".to_string());
        c.toggle_language();
        assert!(c.notifier().messages.is_empty());
        assert_eq!(c.store().get("theme").unwrap(), None);
    }

    #[test]
    fn language_stub_assumes_fallback_when_unset() {
        let mut c = controller(MemoryStore::new());
        c.toggle_language();
        assert_eq!(c.notifier().messages.len(), 1);
    }

    #[test]
    fn click_dispatches_the_button_action() {
        let mut c = controller(MemoryStore::new());
        c.initialize();
        assert!(c.click(controls::THEME_BUTTON_ID));
        assert_eq!(c.current_theme(), Theme::Dark);
        assert!(c.click(controls::LANG_BUTTON_ID));
        assert_eq!(c.notifier().messages.len(), 1);
        assert!(!c.click("unknown"));
    }
}
