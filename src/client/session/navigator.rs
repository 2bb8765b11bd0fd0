use std::sync::Mutex;

/// Top-level views the session can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
}

/// Host-provided navigation
pub trait Navigator: Send + Sync {
    /// Replace the current view
    fn redirect(&self, view: View);

    /// Go to `view` discarding all in-memory view state, not just switch screens
    fn reset_to(&self, view: View);
}

/// One navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Redirect(View),
    Reset(View),
}

/// Records navigation requests instead of performing them
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn history(&self) -> Vec<Navigation> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    fn record(&self, navigation: Navigation) {
        if let Ok(mut history) = self.history.lock() {
            history.push(navigation);
        }
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, view: View) {
        self.record(Navigation::Redirect(view));
    }

    fn reset_to(&self, view: View) {
        self.record(Navigation::Reset(view));
    }
}
