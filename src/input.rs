use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Escape was pressed: move on to the next exercise.
    Escape,
    /// The window was closed: stop running exercises.
    WindowClosed,
}

/// Per-exercise input state; only tracks the close flag.
#[derive(Debug, Default)]
pub struct FrameInput {
    close: Option<CloseReason>,
}

impl FrameInput {
    /// `repeat` marks OS auto-repeat; only a fresh press counts.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        if key == KeyCode::Escape && pressed && !repeat {
            self.request_close(CloseReason::Escape);
        }
    }

    pub fn handle_close_requested(&mut self) {
        self.request_close(CloseReason::WindowClosed);
    }

    // A window close outranks an escape seen in the same frame.
    fn request_close(&mut self, reason: CloseReason) {
        if self.close != Some(CloseReason::WindowClosed) {
            self.close = Some(reason);
        }
    }

    pub fn should_close(&self) -> bool {
        self.close.is_some()
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close
    }

}
