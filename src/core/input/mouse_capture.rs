//=========================================================================
// Mouse Capture State
//=========================================================================
//
// Invariant: captured ⇒ cursor hidden.
//
// Capturing hides the cursor. Releasing restores visibility. Visibility
// requests while captured are ignored.
//
//=========================================================================

/// Cursor capture and visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseCaptureState {
    captured: bool,
    cursor_visible: bool,
}

impl MouseCaptureState {
    pub fn new() -> Self {
        Self {
            captured: false,
            cursor_visible: true,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Enables or disables capture; returns `true` if the state changed.
    pub fn set_captured(&mut self, captured: bool) -> bool {
        if self.captured == captured {
            return false;
        }
        self.captured = captured;
        self.cursor_visible = !captured;
        true
    }

    /// Shows or hides the cursor; returns `true` if visibility changed.
    pub fn set_cursor_visible(&mut self, visible: bool) -> bool {
        if self.captured && visible {
            return false;
        }
        let changed = self.cursor_visible != visible;
        self.cursor_visible = visible;
        changed
    }
}

impl Default for MouseCaptureState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
