use crate::{
    DrawContext, HitTestResult, KeyEvent, MouseButton, Point2, ScrollDelta, Vec2, Window, WindowId,
};

/// Receives the paint and input events of a single window.
///
/// All methods have no-op defaults, so implementors only override the event
/// categories they care about.
pub trait WindowListener: 'static {
    // paint

    fn draw(&mut self, _window_id: WindowId, _window: &Window, _cx: DrawContext<'_>) {}

    // scale

    /// The DPI scale of the window changed. `window.scale_factor` already
    /// holds the new value, if the host reported one.
    fn dpi_scale_changed(&mut self, _window_id: WindowId, _window: &Window) {}

    // chrome

    /// Classifies `loc` for window-chrome decisions.
    ///
    /// Called on every pointer movement over the window, so this must be
    /// cheap and must not have side effects.
    fn nc_hit_test(&self, _window_id: WindowId, _window: &Window, _loc: Point2) -> HitTestResult {
        HitTestResult::Client
    }

    // keyboard

    /// Returns `true` if the event was consumed.
    fn key_down(&mut self, _window_id: WindowId, _window: &Window, _event: &KeyEvent) -> bool {
        false
    }

    /// Returns `true` if the event was consumed.
    fn key_up(&mut self, _window_id: WindowId, _window: &Window, _event: &KeyEvent) -> bool {
        false
    }

    // pointer

    /// The pointer moved while no button is pressed.
    fn mouse_motion(&mut self, _window_id: WindowId, _window: &Window, _loc: Point2) {}

    /// The pointer left the window while no button is pressed.
    fn mouse_leave(&mut self, _window_id: WindowId, _window: &Window) {}

    /// A button was pressed while no other button was. The returned listener
    /// receives every pointer event until all buttons are released again.
    ///
    /// The initial press is delivered to the returned listener through
    /// [`MouseDragListener::mouse_down`] right after this call.
    fn mouse_drag(
        &mut self,
        _window_id: WindowId,
        _window: &Window,
        _loc: Point2,
        _button: MouseButton,
    ) -> Box<dyn MouseDragListener> {
        Box::new(())
    }

    // scroll

    /// A discrete scroll step (a mouse wheel notch).
    fn scroll_motion(
        &mut self,
        _window_id: WindowId,
        _window: &Window,
        _loc: Point2,
        _delta: &ScrollDelta,
    ) {
    }

    /// A continuous scroll gesture (a trackpad swipe) started. The returned
    /// listener receives the gesture's motion until it ends.
    fn scroll_gesture(
        &mut self,
        _window_id: WindowId,
        _window: &Window,
        _loc: Point2,
    ) -> Box<dyn ScrollListener> {
        Box::new(())
    }
}

/// Receives the pointer events of a drag session.
///
/// Dropped without [`Self::cancel`] when the last button is released.
pub trait MouseDragListener {
    fn mouse_motion(&mut self, _loc: Point2) {}
    fn mouse_down(&mut self, _loc: Point2, _button: MouseButton) {}
    fn mouse_up(&mut self, _loc: Point2, _button: MouseButton) {}
    /// The session was aborted, e.g. because its window closed.
    fn cancel(&mut self) {}
}

/// Receives the motion of a scroll gesture.
pub trait ScrollListener {
    /// `velocity` is in units of `delta` per second.
    fn motion(&mut self, _delta: &ScrollDelta, _velocity: Vec2) {}
    /// The fingers were lifted while the content was still moving. Followed
    /// by [`Self::end`]; the listener may keep scrolling with the velocity of
    /// the last [`Self::motion`].
    fn start_momentum_phase(&mut self) {}
    fn end(&mut self) {}
    fn cancel(&mut self) {}
}

impl MouseDragListener for () {}
impl ScrollListener for () {}

impl WindowListener for () {}
