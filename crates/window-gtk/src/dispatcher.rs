use std::fmt;

use tracing::{debug, info, trace, warn};
use wndbridge_window::{
    DrawContext, HitTestResult, KeyEvent, MouseButton, MouseDragListener, Point2, ScrollDelta,
    ScrollListener, Timestamp, Vec2, Window, WindowDescriptor, WindowId, WindowListener, Windows,
    WindowsMirror,
};

use crate::{
    Error, Result,
    handle::{HandleTable, RawWindowHandle},
    host::WidgetHost,
};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// A smooth scroll event arriving later than this (in milliseconds)
    /// after the previous one starts a new scroll gesture.
    pub scroll_gesture_timeout: u32,
    /// Factor applied to smooth scroll deltas to get pixels.
    pub smooth_scroll_scale: f32,
}

impl DispatchConfig {
    pub const DEFAULT_SCROLL_GESTURE_TIMEOUT: u32 = 150;

    #[inline]
    pub const fn new() -> Self {
        Self {
            scroll_gesture_timeout: Self::DEFAULT_SCROLL_GESTURE_TIMEOUT,
            smooth_scroll_scale: 1.0,
        }
    }
}

impl Default for DispatchConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

struct ScrollGesture {
    listener: Box<dyn ScrollListener>,
    last_time: Timestamp,
    velocity: Vec2,
}

#[derive(Default)]
struct InputState {
    /// Bit `n` is set while native button `n` is held.
    pressed_buttons: u32,
    drag: Option<Box<dyn MouseDragListener>>,
    scroll: Option<ScrollGesture>,
}

struct WindowSlot {
    listener: Box<dyn WindowListener>,
    input: InputState,
}

/// Routes native widget events to the listeners of live windows.
pub struct WidgetDispatcher {
    windows: Windows,
    handles: HandleTable,
    slots: WindowsMirror<WindowSlot>,
    config: DispatchConfig,
    host: Option<Box<dyn WidgetHost>>,
}

fn button_mask(button: MouseButton) -> Option<u32> {
    match button.to_native() {
        n @ 1..=31 => Some(1 << n),
        _ => None,
    }
}

impl WidgetDispatcher {
    #[inline]
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::new())
    }

    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            windows: Windows::new(),
            handles: HandleTable::new(),
            slots: WindowsMirror::new(),
            config,
            host: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn set_host(&mut self, host: impl WidgetHost + 'static) {
        self.host = Some(Box::new(host));
    }

    #[inline]
    pub fn windows(&self) -> &Windows {
        &self.windows
    }

    #[inline]
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    pub fn create_window(
        &mut self,
        descriptor: WindowDescriptor,
        listener: impl WindowListener,
    ) -> WindowId {
        let id = self.windows.create(descriptor);
        let handle = self.handles.insert(id);
        self.slots.insert(
            id,
            WindowSlot {
                listener: Box::new(listener),
                input: InputState::default(),
            },
        );
        info!({ ?id, handle }, "new window");
        id
    }

    /// The handle the native widget of `id` passes to the entry points.
    #[inline]
    pub fn handle(&self, id: WindowId) -> Option<RawWindowHandle> {
        self.handles.get(id)
    }

    /// Maps a handle received from a native widget back to its window.
    #[inline]
    pub fn resolve(&self, handle: RawWindowHandle) -> Result<WindowId> {
        self.handles.resolve(handle)
    }

    /// Returns windows created since the last call, so their native widgets
    /// can be set up.
    #[inline]
    pub fn pop_next_created_window(&mut self) -> Option<(WindowId, &mut Window)> {
        self.windows.pop_next_created_window()
    }

    /// Closes a window, cancelling any drag session or scroll gesture that
    /// is still active.
    pub fn close_window(&mut self, id: WindowId) -> Result<()> {
        let mut slot = self.slots.remove(id).ok_or(Error::UnknownWindow(id))?;
        self.handles.remove(id);
        self.windows.close(id);
        if let Some(mut drag) = slot.input.drag.take() {
            debug!({ ?id }, "cancelling drag session");
            drag.cancel();
        }
        if let Some(mut gesture) = slot.input.scroll.take() {
            debug!({ ?id }, "cancelling scroll gesture");
            gesture.listener.cancel();
        }
        info!({ ?id }, "window closed");
        Ok(())
    }

    fn lookup(&mut self, id: WindowId) -> Result<(&Window, &mut WindowSlot)> {
        let window = self.windows.get(id).ok_or(Error::UnknownWindow(id))?;
        let slot = self.slots.get_mut(id).ok_or(Error::UnknownWindow(id))?;
        Ok((window, slot))
    }

    pub fn draw(&mut self, id: WindowId, cx: DrawContext<'_>) -> Result<()> {
        let (window, slot) = self.lookup(id)?;
        trace!({ ?id }, "draw");
        slot.listener.draw(id, window, cx);
        Ok(())
    }

    pub fn dpi_scale_changed(&mut self, id: WindowId) -> Result<()> {
        let window = self.windows.get_mut(id).ok_or(Error::UnknownWindow(id))?;
        if let Some(host) = &self.host {
            match host.scale_factor(id) {
                Some(scale_factor) if scale_factor.is_finite() && scale_factor > 0.0 => {
                    debug!({ ?id, scale_factor }, "scale factor changed");
                    window.scale_factor = scale_factor;
                }
                Some(scale_factor) => {
                    warn!({ ?id, scale_factor }, "ignoring invalid scale factor");
                }
                None => {
                    debug!({ ?id }, "widget reports no scale factor");
                }
            }
        }
        let (window, slot) = self.lookup(id)?;
        slot.listener.dpi_scale_changed(id, window);
        Ok(())
    }

    pub fn nc_hit_test(&self, id: WindowId, loc: Point2) -> Result<HitTestResult> {
        let window = self.windows.get(id).ok_or(Error::UnknownWindow(id))?;
        let slot = self.slots.get(id).ok_or(Error::UnknownWindow(id))?;
        Ok(slot.listener.nc_hit_test(id, window, loc))
    }

    pub fn key_press(&mut self, id: WindowId, event: &KeyEvent) -> Result<bool> {
        let (window, slot) = self.lookup(id)?;
        let handled = slot.listener.key_down(id, window, event);
        trace!({ ?id, keyval = event.keyval, handled }, "key press");
        Ok(handled)
    }

    pub fn key_release(&mut self, id: WindowId, event: &KeyEvent) -> Result<bool> {
        let (window, slot) = self.lookup(id)?;
        let handled = slot.listener.key_up(id, window, event);
        trace!({ ?id, keyval = event.keyval, handled }, "key release");
        Ok(handled)
    }

    /// A pointer button was pressed or released.
    ///
    /// The first press opens a drag session on the window's listener; the
    /// session receives all button and motion events until the last button
    /// is released, and is dropped after its final `mouse_up`.
    pub fn button(
        &mut self,
        id: WindowId,
        loc: Point2,
        pressed: bool,
        button: MouseButton,
    ) -> Result<()> {
        let (window, WindowSlot { listener, input }) = self.lookup(id)?;
        let Some(mask) = button_mask(button) else {
            warn!({ ?id, ?button }, "ignoring event of untracked mouse button");
            return Ok(());
        };

        if pressed {
            if input.pressed_buttons & mask != 0 {
                trace!({ ?id, ?button }, "button already pressed");
                return Ok(());
            }
            let drag = input.drag.get_or_insert_with(|| {
                debug!({ ?id, ?button }, "drag session started");
                listener.mouse_drag(id, window, loc, button)
            });
            input.pressed_buttons |= mask;
            drag.mouse_down(loc, button);
        } else {
            if input.pressed_buttons & mask == 0 {
                trace!({ ?id, ?button }, "release of a button that is not pressed");
                return Ok(());
            }
            input.pressed_buttons &= !mask;
            if input.pressed_buttons == 0 {
                if let Some(mut drag) = input.drag.take() {
                    debug!({ ?id }, "drag session ended");
                    drag.mouse_up(loc, button);
                }
            } else if let Some(drag) = &mut input.drag {
                drag.mouse_up(loc, button);
            }
        }
        Ok(())
    }

    pub fn motion(&mut self, id: WindowId, loc: Point2) -> Result<()> {
        let (window, WindowSlot { listener, input }) = self.lookup(id)?;
        match &mut input.drag {
            Some(drag) => drag.mouse_motion(loc),
            None => listener.mouse_motion(id, window, loc),
        }
        Ok(())
    }

    pub fn leave(&mut self, id: WindowId) -> Result<()> {
        let (window, WindowSlot { listener, input }) = self.lookup(id)?;
        if input.drag.is_some() {
            // the drag session keeps the pointer grab
            trace!({ ?id }, "leave during drag session");
        } else {
            listener.mouse_leave(id, window);
        }
        Ok(())
    }

    /// A scroll wheel step. `native_delta` uses the toolkit's orientation
    /// (positive `y` is down).
    pub fn discrete_scroll(&mut self, id: WindowId, loc: Point2, native_delta: Vec2) -> Result<()> {
        let (window, WindowSlot { listener, input }) = self.lookup(id)?;
        if let Some(mut gesture) = input.scroll.take() {
            debug!({ ?id }, "scroll gesture interrupted by discrete scroll");
            gesture.listener.cancel();
        }
        let delta = ScrollDelta::lines(-native_delta);
        listener.scroll_motion(id, window, loc, &delta);
        Ok(())
    }

    pub fn smooth_scroll(
        &mut self,
        id: WindowId,
        loc: Point2,
        native_delta: Vec2,
        time: Timestamp,
    ) -> Result<()> {
        let DispatchConfig {
            scroll_gesture_timeout,
            smooth_scroll_scale,
        } = self.config;
        let (window, WindowSlot { listener, input }) = self.lookup(id)?;
        let delta = ScrollDelta::pixels(-native_delta * smooth_scroll_scale);

        if let Some(mut stale) = input
            .scroll
            .take_if(|gesture| time.millis_since(gesture.last_time) > scroll_gesture_timeout)
        {
            debug!({ ?id }, "scroll gesture timed out");
            stale.listener.end();
        }

        // the gesture stays stored while `motion` runs
        let gesture = input.scroll.get_or_insert_with(|| {
            debug!({ ?id }, "scroll gesture started");
            ScrollGesture {
                listener: listener.scroll_gesture(id, window, loc),
                last_time: time,
                velocity: Vec2::ZERO,
            }
        });
        let elapsed = time.secs_since(gesture.last_time);
        let velocity = if elapsed > 0.0 {
            delta.delta / elapsed
        } else {
            Vec2::ZERO
        };
        gesture.last_time = time;
        gesture.velocity = velocity;
        gesture.listener.motion(&delta, velocity);
        Ok(())
    }

    /// The fingers were lifted from the touchpad.
    ///
    /// A gesture that was still moving enters its momentum phase before it
    /// ends. A stop arriving after the gesture timeout ends it without one.
    pub fn smooth_scroll_stop(&mut self, id: WindowId, time: Timestamp) -> Result<()> {
        let timeout = self.config.scroll_gesture_timeout;
        let (_window, slot) = self.lookup(id)?;
        match slot.input.scroll.take() {
            Some(mut gesture) => {
                let elapsed = time.millis_since(gesture.last_time);
                let momentum = gesture.velocity != Vec2::ZERO && elapsed <= timeout;
                debug!({ ?id, elapsed, momentum }, "scroll gesture ended");
                if momentum {
                    gesture.listener.start_momentum_phase();
                }
                gesture.listener.end();
            }
            None => trace!({ ?id }, "scroll stop without gesture"),
        }
        Ok(())
    }
}

impl fmt::Debug for WidgetDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetDispatcher")
            .field("windows", &self.windows)
            .field("handles", &self.handles)
            .field("config", &self.config)
            .field("has_host", &self.host.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for WidgetDispatcher {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
