//! Rendering seam between the refresh logic and whatever displays it.

use std::sync::Mutex;

use crate::model::DisplayState;

/// Shows one display state at a time. A newly rendered state supersedes the
/// previous one; how the old one is retired is up to the implementation.
pub trait Renderer: Send + Sync {
    fn render(&self, state: &DisplayState);
}

/// Keeps every rendered state in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    states: Mutex<Vec<DisplayState>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<DisplayState> {
        self.states.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// The state currently visible, if anything was rendered yet.
    pub fn last(&self) -> Option<DisplayState> {
        self.states.lock().ok().and_then(|s| s.last().cloned())
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, state: &DisplayState) {
        if let Ok(mut states) = self.states.lock() {
            states.push(state.clone());
        }
    }
}
