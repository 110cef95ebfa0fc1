use crate::foundation::core::RunId;

/// Visibility inputs of one demo instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LifecycleSignal {
    /// The instance is the selected slide of its host.
    pub is_active_slide: bool,
    /// The host is scrolled into view.
    pub is_in_viewport: bool,
}

impl LifecycleSignal {
    /// Signal with both inputs set.
    pub fn new(is_active_slide: bool, is_in_viewport: bool) -> Self {
        Self {
            is_active_slide,
            is_in_viewport,
        }
    }

    /// Whether a run should be live.
    pub fn should_play(self) -> bool {
        self.is_active_slide && self.is_in_viewport
    }
}

/// Effect of a signal update on the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A new run was started.
    Started(RunId),
    /// The live run was cancelled and the display reset.
    Stopped,
    /// `should_play` did not change.
    Unchanged,
}
