//! Seams between the controller and the page it drives.

/// Root-level document state that stylesheets key off.
pub trait Presentation {
    fn has_marker(&self, marker: &str) -> bool;
    fn set_marker(&mut self, marker: &str, present: bool);
    /// Declared document language, `None` when unset or empty.
    fn language(&self) -> Option<String>;
}

/// Where the controls live.
pub trait ControlSurface {
    fn has_element(&self, id: &str) -> bool;

    /// Inserts `markup` as the first child of the first matching anchor.
    ///
    /// Returns the selector that matched, or `None` when no anchor exists.
    fn prepend_to_anchor(&mut self, anchors: &[&str], markup: &str)
    -> anyhow::Result<Option<String>>;

    /// Replaces the text and tooltip of an element. Returns `false` if it is missing.
    fn set_label(&mut self, id: &str, text: &str, title: &str) -> bool;

    /// Value of `data-action` on an element.
    fn action_of(&self, id: &str) -> Option<String>;
}

/// Blocking notice shown to the user.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Prints notices to stderr, the CLI stand-in for a modal alert.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        tracing::info!(%message, "notice");
        eprintln!("{message}");
    }
}
