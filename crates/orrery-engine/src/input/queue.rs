/// Input events the scene understands.
/// Pointer coordinates are viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A press ended at (x, y). Becomes a click if the pointer barely moved.
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The cursor left the viewport; hover is cleared.
    PointerLeave,
    /// Wheel scroll; positive zooms out.
    Wheel { delta: f32 },
    /// Rotation-speed control, expected in `[0, 1]`.
    SetRotationSpeed { value: f64 },
    /// Turn camera auto-rotation on or off.
    ToggleAutoRotate,
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    /// Events that change settings rather than interact with the scene.
    /// These are applied before the clock advances.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            InputEvent::SetRotationSpeed { .. } | InputEvent::ToggleAutoRotate | InputEvent::Resize { .. }
        )
    }
}

/// A queue of input events.
/// The host pushes events between frames; the scheduler drains them each tick.
/// Once closed, pushes are dropped.
pub struct InputQueue {
    events: Vec<InputEvent>,
    closed: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            closed: false,
        }
    }

    /// Push a new input event. Returns false if the queue is closed.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if self.closed {
            return false;
        }
        self.events.push(event);
        true
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop accepting events and drop anything pending.
    pub fn close(&mut self) {
        self.closed = true;
        self.events.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
