//! The entry points called by the native widget.
//!
//! Every entry point resolves the window handle through the
//! [`WidgetDispatcher`] installed on the calling thread and forwards the
//! event. Failures never cross the boundary: they are logged, and the entry
//! point returns a neutral value (`0`: "client area" for hit tests, "not
//! handled" for key events).

use std::{
    cell::RefCell,
    ffi::{c_int, c_void},
    panic::{self, AssertUnwindSafe},
    ptr::NonNull,
};

use tracing::{debug, error, warn};
use wndbridge_window::{DrawContext, HitTestResult, MouseButton, Point2, Timestamp, Vec2, WindowId};

use crate::{
    Error, Result, WidgetDispatcher,
    handle::RawWindowHandle,
    sys::{GdkEventKey, cairo_t},
};

thread_local!(static CURRENT: RefCell<Option<WidgetDispatcher>> = const { RefCell::new(None) });

/// The dispatcher could not be installed; it is handed back unchanged.
#[derive(thiserror::Error, Debug)]
#[error("cannot install the widget dispatcher: {error}")]
pub struct InstallError {
    pub error: Error,
    pub dispatcher: WidgetDispatcher,
}

/// Installs `dispatcher` for the calling (main) thread and returns the
/// previously installed one.
pub fn install(dispatcher: WidgetDispatcher) -> Result<Option<WidgetDispatcher>, InstallError> {
    CURRENT.with(|current| match current.try_borrow_mut() {
        Ok(mut current) => Ok(current.replace(dispatcher)),
        Err(_) => Err(InstallError {
            error: Error::Reentrant,
            dispatcher,
        }),
    })
}

pub fn uninstall() -> Result<Option<WidgetDispatcher>> {
    CURRENT.with(|current| {
        let mut current = current.try_borrow_mut().map_err(|_| Error::Reentrant)?;
        Ok(current.take())
    })
}

/// Runs `f` with the dispatcher of the calling thread.
///
/// Fails with [`Error::Reentrant`] when called from inside a listener.
pub fn with_dispatcher<R>(f: impl FnOnce(&mut WidgetDispatcher) -> R) -> Result<R> {
    CURRENT.with(|current| {
        let mut current = current.try_borrow_mut().map_err(|_| Error::Reentrant)?;
        let dispatcher = current.as_mut().ok_or(Error::NotInstalled)?;
        Ok(f(dispatcher))
    })
}

fn dispatch<R>(
    entry: &'static str,
    raw: RawWindowHandle,
    fallback: R,
    f: impl FnOnce(&mut WidgetDispatcher, WindowId) -> Result<R>,
) -> R {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        with_dispatcher(|dispatcher| {
            let id = dispatcher.resolve(raw)?;
            f(dispatcher, id)
        })?
    }));
    match result {
        Ok(Ok(value)) => value,
        Ok(Err(err @ (Error::UnknownHandle(_) | Error::UnknownWindow(_)))) => {
            // the widget may still emit signals while it is being destroyed
            debug!({ entry, handle = raw }, "dropping event: {err}");
            fallback
        }
        Ok(Err(err)) => {
            warn!({ entry, handle = raw }, "dropping event: {err}");
            fallback
        }
        Err(_) => {
            error!({ entry, handle = raw }, "listener panicked");
            fallback
        }
    }
}

/// # Safety
/// `cr` must be null or a cairo context valid for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wndbridge_wnd_widget_draw_handler(
    wnd_ptr: RawWindowHandle,
    cr: *mut cairo_t,
) {
    dispatch("draw", wnd_ptr, (), |dispatcher, id| {
        let cr = NonNull::new(cr.cast::<c_void>()).ok_or(Error::NullPointer("cr"))?;
        // SAFETY: guaranteed by the caller; the context does not outlive the call
        let cx = unsafe { DrawContext::from_raw(cr) };
        dispatcher.draw(id, cx)
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wndbridge_wnd_widget_dpi_scale_changed_handler(wnd_ptr: RawWindowHandle) {
    dispatch("dpi_scale_changed", wnd_ptr, (), |dispatcher, id| {
        dispatcher.dpi_scale_changed(id)
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wndbridge_wnd_widget_nc_hit_test_handler(
    wnd_ptr: RawWindowHandle,
    x: f32,
    y: f32,
) -> c_int {
    dispatch(
        "nc_hit_test",
        wnd_ptr,
        HitTestResult::Client,
        |dispatcher, id| dispatcher.nc_hit_test(id, Point2::new(x, y)),
    )
    .code()
}

/// # Safety
/// `event` must be null or point to a valid `GdkEventKey`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wndbridge_wnd_widget_key_press_handler(
    wnd_ptr: RawWindowHandle,
    event: *mut GdkEventKey,
) -> c_int {
    // SAFETY: guaranteed by the caller
    let event = unsafe { event.as_ref() };
    let handled = dispatch("key_press", wnd_ptr, false, |dispatcher, id| {
        let event = event.ok_or(Error::NullPointer("event"))?;
        dispatcher.key_press(id, &event.to_key_event())
    });
    c_int::from(handled)
}

/// # Safety
/// `event` must be null or point to a valid `GdkEventKey`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wndbridge_wnd_widget_key_release_handler(
    wnd_ptr: RawWindowHandle,
    event: *mut GdkEventKey,
) -> c_int {
    // SAFETY: guaranteed by the caller
    let event = unsafe { event.as_ref() };
    let handled = dispatch("key_release", wnd_ptr, false, |dispatcher, id| {
        let event = event.ok_or(Error::NullPointer("event"))?;
        dispatcher.key_release(id, &event.to_key_event())
    });
    c_int::from(handled)
}

#[unsafe(no_mangle)]
pub extern "C" fn wndbridge_wnd_widget_button_handler(
    wnd_ptr: RawWindowHandle,
    x: f32,
    y: f32,
    is_pressed: c_int,
    button: c_int,
) {
    // out-of-range numbers map to button 0, which is never tracked
    let button = u8::try_from(button)
        .map(MouseButton::from_native)
        .unwrap_or(MouseButton::Other(0));
    dispatch("button", wnd_ptr, (), |dispatcher, id| {
        dispatcher.button(id, Point2::new(x, y), is_pressed != 0, button)
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wndbridge_wnd_widget_motion_handler(wnd_ptr: RawWindowHandle, x: f32, y: f32) {
    dispatch("motion", wnd_ptr, (), |dispatcher, id| {
        dispatcher.motion(id, Point2::new(x, y))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wndbridge_wnd_widget_leave_handler(wnd_ptr: RawWindowHandle) {
    dispatch("leave", wnd_ptr, (), |dispatcher, id| dispatcher.leave(id))
}

#[unsafe(no_mangle)]
pub extern "C" fn wndbridge_wnd_widget_discrete_scroll_handler(
    wnd_ptr: RawWindowHandle,
    x: f32,
    y: f32,
    delta_x: f32,
    delta_y: f32,
) {
    dispatch("discrete_scroll", wnd_ptr, (), |dispatcher, id| {
        dispatcher.discrete_scroll(id, Point2::new(x, y), Vec2::new(delta_x, delta_y))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wndbridge_wnd_widget_smooth_scroll_handler(
    wnd_ptr: RawWindowHandle,
    x: f32,
    y: f32,
    delta_x: f32,
    delta_y: f32,
    time: u32,
) {
    dispatch("smooth_scroll", wnd_ptr, (), |dispatcher, id| {
        dispatcher.smooth_scroll(
            id,
            Point2::new(x, y),
            Vec2::new(delta_x, delta_y),
            Timestamp(time),
        )
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wndbridge_wnd_widget_smooth_scroll_stop_handler(
    wnd_ptr: RawWindowHandle,
    time: u32,
) {
    dispatch("smooth_scroll_stop", wnd_ptr, (), |dispatcher, id| {
        dispatcher.smooth_scroll_stop(id, Timestamp(time))
    })
}
