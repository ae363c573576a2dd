//! State written by the host page and read by the frame loop.
//!
//! The loop is started once per mount and never restarted; setters here only
//! record the latest values and the next frame picks them up.

#[derive(Clone, Debug, Default)]
pub struct HostProps {
    revealed: bool,
    disabled: bool,
    prompt_text: String,
    prompt_revision: u64,
}

impl HostProps {
    pub fn new(revealed: bool, prompt_text: impl Into<String>) -> Self {
        Self {
            revealed,
            disabled: false,
            prompt_text: prompt_text.into(),
            prompt_revision: 0,
        }
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn set_revealed(&mut self, revealed: bool) {
        self.revealed = revealed;
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn prompt_revision(&self) -> u64 {
        self.prompt_revision
    }

    /// Returns true when the text actually changed.
    pub fn set_prompt_text(&mut self, text: &str) -> bool {
        if self.prompt_text == text {
            return false;
        }
        self.prompt_text.clear();
        self.prompt_text.push_str(text);
        self.prompt_revision += 1;
        true
    }
}

/// Tracks which prompt revision the prompt texture currently shows.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptSync {
    drawn: Option<u64>,
}

impl PromptSync {
    pub fn needs_redraw(&self, props: &HostProps) -> bool {
        self.drawn != Some(props.prompt_revision())
    }

    pub fn mark_drawn(&mut self, revision: u64) {
        self.drawn = Some(revision);
    }
}

/// Press recognition: a press completes when the pointer that went down on
/// the surface is released on it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PressTracker {
    active_pointer: Option<i32>,
}

impl PressTracker {
    pub fn pointer_down(&mut self, pointer_id: i32, disabled: bool) {
        if disabled {
            self.active_pointer = None;
            return;
        }
        self.active_pointer = Some(pointer_id);
    }

    /// Returns true when this release completes a press.
    pub fn pointer_up(&mut self, pointer_id: i32, disabled: bool) -> bool {
        let was = self.active_pointer.take();
        !disabled && was == Some(pointer_id)
    }

    pub fn cancel(&mut self) {
        self.active_pointer = None;
    }

    pub fn is_pressing(&self) -> bool {
        self.active_pointer.is_some()
    }
}

/// Keyboard activation mirrors a native button.
#[inline]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}
