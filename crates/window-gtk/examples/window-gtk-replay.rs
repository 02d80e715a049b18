//! Feeds a scripted sequence of widget events through the C entry points and
//! logs what the window listener receives.
//!
//! Run with `RUST_LOG=trace` to also see the dispatcher's own logging.

use std::error::Error;

use tracing::*;
use wndbridge_window::{
    HitTestResult, MouseButton, MouseDragListener, Point2, ScrollDelta, ScrollListener, Vec2,
    Window, WindowDescriptor, WindowId, WindowListener,
};
use wndbridge_window_gtk::{WidgetDispatcher, ffi::*};

struct LoggingListener;
struct LoggingDrag;
struct LoggingGesture;

impl WindowListener for LoggingListener {
    fn nc_hit_test(&self, _window_id: WindowId, _window: &Window, loc: Point2) -> HitTestResult {
        if loc.y < 30.0 {
            HitTestResult::Grab
        } else {
            HitTestResult::Client
        }
    }

    fn mouse_motion(&mut self, window_id: WindowId, _window: &Window, loc: Point2) {
        info!({ ?window_id, %loc }, "mouse motion");
    }

    fn mouse_leave(&mut self, window_id: WindowId, _window: &Window) {
        info!({ ?window_id }, "mouse leave");
    }

    fn mouse_drag(
        &mut self,
        window_id: WindowId,
        _window: &Window,
        loc: Point2,
        button: MouseButton,
    ) -> Box<dyn MouseDragListener> {
        info!({ ?window_id, %loc, ?button }, "drag started");
        Box::new(LoggingDrag)
    }

    fn scroll_motion(
        &mut self,
        window_id: WindowId,
        _window: &Window,
        _loc: Point2,
        delta: &ScrollDelta,
    ) {
        info!({ ?window_id, ?delta }, "scroll");
    }

    fn scroll_gesture(
        &mut self,
        window_id: WindowId,
        _window: &Window,
        _loc: Point2,
    ) -> Box<dyn ScrollListener> {
        info!({ ?window_id }, "scroll gesture started");
        Box::new(LoggingGesture)
    }
}

impl MouseDragListener for LoggingDrag {
    fn mouse_motion(&mut self, loc: Point2) {
        info!({ %loc }, "drag motion");
    }
    fn mouse_up(&mut self, loc: Point2, button: MouseButton) {
        info!({ %loc, ?button }, "drag button released");
    }
}

impl ScrollListener for LoggingGesture {
    fn motion(&mut self, delta: &ScrollDelta, velocity: Vec2) {
        info!({ ?delta, %velocity }, "scroll gesture motion");
    }
    fn start_momentum_phase(&mut self) {
        info!("scroll gesture momentum");
    }
    fn end(&mut self) {
        info!("scroll gesture ended");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    wndbridge_window_gtk::init_tracing_subscriber_defaults();

    let mut dispatcher = WidgetDispatcher::new();
    let id = dispatcher.create_window(WindowDescriptor::default(), LoggingListener);
    let wnd = dispatcher.handle(id).ok_or("the window has no handle")?;
    install(dispatcher)?;

    let hit = wndbridge_wnd_widget_nc_hit_test_handler(wnd, 100.0, 10.0);
    info!(hit, "hit test of the title bar");

    wndbridge_wnd_widget_motion_handler(wnd, 10.0, 40.0);
    wndbridge_wnd_widget_button_handler(wnd, 10.0, 40.0, 1, 1);
    wndbridge_wnd_widget_motion_handler(wnd, 30.0, 60.0);
    wndbridge_wnd_widget_button_handler(wnd, 30.0, 60.0, 0, 1);
    wndbridge_wnd_widget_leave_handler(wnd);

    wndbridge_wnd_widget_discrete_scroll_handler(wnd, 30.0, 60.0, 0.0, 1.0);
    for (step, time) in (1000..1080).step_by(16).enumerate() {
        let delta_y = 4.0 / (step as f32 + 1.0);
        wndbridge_wnd_widget_smooth_scroll_handler(wnd, 30.0, 60.0, 0.0, delta_y, time);
    }
    wndbridge_wnd_widget_smooth_scroll_stop_handler(wnd, 1100);

    with_dispatcher(|dispatcher| dispatcher.close_window(id))??;
    // ignored: the window is gone
    wndbridge_wnd_widget_motion_handler(wnd, 0.0, 0.0);

    uninstall()?;
    Ok(())
}
