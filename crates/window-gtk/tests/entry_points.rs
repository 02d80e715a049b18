use std::{
    cell::{Cell, RefCell},
    ptr,
    rc::Rc,
};

use tracing_subscriber::EnvFilter;
use wndbridge_window::{
    DrawContext, HitTestResult, KeyEvent, MouseButton, MouseDragListener, Point2, ScrollDelta,
    ScrollListener, Vec2, Window, WindowDescriptor, WindowId, WindowListener,
};
use wndbridge_window_gtk::{
    DispatchConfig, Error, WidgetDispatcher,
    ffi::*,
    sys::{GdkEventKey, cairo_t},
};

type Log = Rc<RefCell<Vec<String>>>;

struct Listener(Log);
struct Drag(Log);
struct Gesture(Log);

/// Calls back into the entry points while handling a key press.
struct Reentering {
    log: Log,
    handle: Rc<Cell<usize>>,
}

struct Panicking;

impl WindowListener for Listener {
    fn draw(&mut self, _window_id: WindowId, _window: &Window, cx: DrawContext<'_>) {
        self.0.borrow_mut().push(format!("draw {:?}", cx.as_ptr()));
    }
    fn dpi_scale_changed(&mut self, _window_id: WindowId, window: &Window) {
        self.0
            .borrow_mut()
            .push(format!("dpi {}", window.scale_factor));
    }
    fn nc_hit_test(&self, _window_id: WindowId, window: &Window, loc: Point2) -> HitTestResult {
        let width = window.size.x as f32;
        if loc.x >= width - 4.0 {
            HitTestResult::EdgeE
        } else if loc.y < 24.0 {
            HitTestResult::Grab
        } else {
            HitTestResult::Client
        }
    }
    fn key_down(&mut self, _window_id: WindowId, _window: &Window, event: &KeyEvent) -> bool {
        self.0.borrow_mut().push(format!("key_down {:#x}", event.keyval));
        event.keyval == 0x61
    }
    fn key_up(&mut self, _window_id: WindowId, _window: &Window, event: &KeyEvent) -> bool {
        self.0.borrow_mut().push(format!("key_up {:#x}", event.keyval));
        false
    }
    fn mouse_motion(&mut self, _window_id: WindowId, _window: &Window, loc: Point2) {
        self.0.borrow_mut().push(format!("motion {} {}", loc.x, loc.y));
        // re-entering the dispatcher from a listener is rejected
        if with_dispatcher(|_| ()) == Err(Error::Reentrant) {
            self.0.borrow_mut().push("reentrant".to_owned());
        }
    }
    fn mouse_leave(&mut self, _window_id: WindowId, _window: &Window) {
        self.0.borrow_mut().push("leave".to_owned());
    }
    fn mouse_drag(
        &mut self,
        _window_id: WindowId,
        _window: &Window,
        _loc: Point2,
        button: MouseButton,
    ) -> Box<dyn MouseDragListener> {
        self.0.borrow_mut().push(format!("drag {button:?}"));
        Box::new(Drag(self.0.clone()))
    }
    fn scroll_motion(
        &mut self,
        _window_id: WindowId,
        _window: &Window,
        _loc: Point2,
        delta: &ScrollDelta,
    ) {
        self.0.borrow_mut().push(format!(
            "scroll {} {} {}",
            delta.delta.x, delta.delta.y, delta.precise
        ));
    }
    fn scroll_gesture(
        &mut self,
        _window_id: WindowId,
        _window: &Window,
        _loc: Point2,
    ) -> Box<dyn ScrollListener> {
        self.0.borrow_mut().push("gesture".to_owned());
        Box::new(Gesture(self.0.clone()))
    }
}

impl MouseDragListener for Drag {
    fn mouse_motion(&mut self, loc: Point2) {
        self.0
            .borrow_mut()
            .push(format!("drag_motion {} {}", loc.x, loc.y));
    }
    fn mouse_down(&mut self, _loc: Point2, button: MouseButton) {
        self.0.borrow_mut().push(format!("down {button:?}"));
    }
    fn mouse_up(&mut self, _loc: Point2, button: MouseButton) {
        self.0.borrow_mut().push(format!("up {button:?}"));
    }
}

impl ScrollListener for Gesture {
    fn motion(&mut self, delta: &ScrollDelta, _velocity: Vec2) {
        self.0
            .borrow_mut()
            .push(format!("gesture_motion {} {}", delta.delta.x, delta.delta.y));
    }
    fn end(&mut self) {
        self.0.borrow_mut().push("gesture_end".to_owned());
    }
}

impl WindowListener for Reentering {
    fn nc_hit_test(&self, _window_id: WindowId, _window: &Window, _loc: Point2) -> HitTestResult {
        HitTestResult::Grab
    }
    fn key_down(&mut self, _window_id: WindowId, _window: &Window, _event: &KeyEvent) -> bool {
        let hit = wndbridge_wnd_widget_nc_hit_test_handler(self.handle.get(), 1.0, 1.0);
        self.log.borrow_mut().push(format!("nested hit test {hit}"));

        let mut event = key_event(0x62);
        let handled =
            unsafe { wndbridge_wnd_widget_key_release_handler(self.handle.get(), &mut event) };
        self.log
            .borrow_mut()
            .push(format!("nested key release {handled}"));

        let config = DispatchConfig {
            scroll_gesture_timeout: 7,
            ..DispatchConfig::default()
        };
        if let Err(err) = install(WidgetDispatcher::with_config(config)) {
            self.log.borrow_mut().push(format!(
                "install rejected {:?} {}",
                err.error,
                err.dispatcher.config().scroll_gesture_timeout
            ));
        }
        true
    }
    fn key_up(&mut self, _window_id: WindowId, _window: &Window, _event: &KeyEvent) -> bool {
        self.log.borrow_mut().push("key_up".to_owned());
        true
    }
}

impl WindowListener for Panicking {
    fn nc_hit_test(&self, _window_id: WindowId, _window: &Window, _loc: Point2) -> HitTestResult {
        panic!("hit test failed");
    }
    fn key_down(&mut self, _window_id: WindowId, _window: &Window, _event: &KeyEvent) -> bool {
        panic!("key press failed");
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("trace"))
        .try_init();
}

fn setup() -> (usize, Log) {
    init_tracing();
    let log = Log::default();
    let mut dispatcher = WidgetDispatcher::new();
    let id = dispatcher.create_window(
        WindowDescriptor {
            size: [200, 100].into(),
            ..WindowDescriptor::new()
        },
        Listener(log.clone()),
    );
    dispatcher.set_host(|_id: WindowId| Some(1.5_f32));
    let wnd = dispatcher.handle(id).unwrap();
    install(dispatcher).unwrap();
    (wnd, log)
}

fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

fn key_event(keyval: u32) -> GdkEventKey {
    GdkEventKey {
        type_: 8,
        window: ptr::null_mut(),
        send_event: 0,
        time: 1,
        state: 0,
        keyval,
        length: 0,
        string: ptr::null_mut(),
        hardware_keycode: 38,
        group: 0,
        is_modifier: 0,
    }
}

#[test]
fn test_pointer_and_scroll_sequence() {
    let (wnd, log) = setup();

    wndbridge_wnd_widget_motion_handler(wnd, 5.0, 6.0);
    wndbridge_wnd_widget_button_handler(wnd, 5.0, 6.0, 1, 1);
    wndbridge_wnd_widget_motion_handler(wnd, 7.0, 8.0);
    wndbridge_wnd_widget_leave_handler(wnd);
    wndbridge_wnd_widget_button_handler(wnd, 7.0, 8.0, 0, 1);
    wndbridge_wnd_widget_leave_handler(wnd);
    wndbridge_wnd_widget_discrete_scroll_handler(wnd, 1.0, 1.0, 0.0, 1.0);
    wndbridge_wnd_widget_smooth_scroll_handler(wnd, 1.0, 1.0, 0.5, 0.0, 100);
    wndbridge_wnd_widget_smooth_scroll_stop_handler(wnd, 110);

    assert_eq!(
        vec![
            "motion 5 6",
            "reentrant",
            "drag Left",
            "down Left",
            "drag_motion 7 8",
            "up Left",
            "leave",
            "scroll -0 -1 false",
            "gesture",
            "gesture_motion -0.5 -0",
            "gesture_end",
        ],
        take(&log)
    );
    uninstall().unwrap();
}

#[test]
fn test_hit_test_and_keys() {
    let (wnd, log) = setup();

    assert_eq!(
        HitTestResult::Grab.code(),
        wndbridge_wnd_widget_nc_hit_test_handler(wnd, 50.0, 10.0)
    );
    assert_eq!(
        HitTestResult::EdgeE.code(),
        wndbridge_wnd_widget_nc_hit_test_handler(wnd, 198.0, 50.0)
    );
    assert_eq!(0, wndbridge_wnd_widget_nc_hit_test_handler(wnd, 50.0, 50.0));

    let mut a = key_event(0x61);
    let mut b = key_event(0x62);
    unsafe {
        assert_eq!(1, wndbridge_wnd_widget_key_press_handler(wnd, &mut a));
        assert_eq!(0, wndbridge_wnd_widget_key_press_handler(wnd, &mut b));
        assert_eq!(0, wndbridge_wnd_widget_key_release_handler(wnd, &mut a));
        assert_eq!(
            0,
            wndbridge_wnd_widget_key_press_handler(wnd, ptr::null_mut())
        );
    }
    assert_eq!(
        vec!["key_down 0x61", "key_down 0x62", "key_up 0x61"],
        take(&log)
    );
    uninstall().unwrap();
}

#[test]
fn test_draw_and_dpi() {
    let (wnd, log) = setup();

    let mut fake_context = 0u64;
    let cr = ptr::addr_of_mut!(fake_context).cast::<cairo_t>();
    unsafe {
        wndbridge_wnd_widget_draw_handler(wnd, cr);
        wndbridge_wnd_widget_draw_handler(wnd, ptr::null_mut());
    }
    wndbridge_wnd_widget_dpi_scale_changed_handler(wnd);

    assert_eq!(
        vec![format!("draw {:?}", cr.cast::<std::ffi::c_void>()), "dpi 1.5".to_owned()],
        take(&log)
    );
    uninstall().unwrap();
}

#[test]
fn test_invalid_handles_return_neutral_values() {
    let (wnd, log) = setup();

    assert_eq!(0, wndbridge_wnd_widget_nc_hit_test_handler(0, 1.0, 1.0));
    let mut event = key_event(0x61);
    assert_eq!(0, unsafe {
        wndbridge_wnd_widget_key_press_handler(0, &mut event)
    });

    let id = with_dispatcher(|dispatcher| dispatcher.resolve(wnd))
        .unwrap()
        .unwrap();
    with_dispatcher(|dispatcher| dispatcher.close_window(id))
        .unwrap()
        .unwrap();
    wndbridge_wnd_widget_motion_handler(wnd, 1.0, 1.0);
    assert_eq!(0, wndbridge_wnd_widget_nc_hit_test_handler(wnd, 1.0, 10.0));
    assert_eq!(0, unsafe {
        wndbridge_wnd_widget_key_press_handler(wnd, &mut event)
    });
    assert!(take(&log).is_empty());

    let dispatcher = uninstall().unwrap();
    assert!(dispatcher.is_some());
    assert_eq!(Err(Error::NotInstalled), with_dispatcher(|_| ()));
    assert_eq!(0, unsafe {
        wndbridge_wnd_widget_key_press_handler(wnd, &mut event)
    });
}

#[test]
fn test_install_replaces_previous_dispatcher() {
    uninstall().unwrap();
    assert!(install(WidgetDispatcher::new()).unwrap().is_none());
    assert!(install(WidgetDispatcher::new()).unwrap().is_some());
    assert!(uninstall().unwrap().is_some());
    assert!(uninstall().unwrap().is_none());
}

#[test]
fn test_panicking_listener_returns_neutral_values() {
    init_tracing();
    let mut dispatcher = WidgetDispatcher::new();
    let id = dispatcher.create_window(WindowDescriptor::new(), Panicking);
    let wnd = dispatcher.handle(id).unwrap();
    install(dispatcher).unwrap();

    assert_eq!(0, wndbridge_wnd_widget_nc_hit_test_handler(wnd, 1.0, 1.0));
    let mut event = key_event(0x61);
    assert_eq!(0, unsafe {
        wndbridge_wnd_widget_key_press_handler(wnd, &mut event)
    });

    // the dispatcher stays usable after a listener unwound
    assert_eq!(Ok(true), with_dispatcher(|dispatcher| dispatcher.window(id).is_some()));
    assert_eq!(0, wndbridge_wnd_widget_nc_hit_test_handler(wnd, 1.0, 1.0));
    uninstall().unwrap();
}

#[test]
fn test_reentrant_entry_points_return_neutral_values() {
    init_tracing();
    let log = Log::default();
    let handle = Rc::new(Cell::new(0));
    let mut dispatcher = WidgetDispatcher::new();
    let id = dispatcher.create_window(
        WindowDescriptor::new(),
        Reentering {
            log: log.clone(),
            handle: handle.clone(),
        },
    );
    let wnd = dispatcher.handle(id).unwrap();
    handle.set(wnd);
    install(dispatcher).unwrap();

    assert_eq!(
        HitTestResult::Grab.code(),
        wndbridge_wnd_widget_nc_hit_test_handler(wnd, 1.0, 1.0)
    );
    let mut event = key_event(0x61);
    assert_eq!(1, unsafe {
        wndbridge_wnd_widget_key_press_handler(wnd, &mut event)
    });
    assert_eq!(
        vec![
            "nested hit test 0",
            "nested key release 0",
            "install rejected Reentrant 7",
        ],
        take(&log)
    );

    // the installed dispatcher was not replaced
    let dispatcher = uninstall().unwrap().unwrap();
    assert_eq!(
        DispatchConfig::DEFAULT_SCROLL_GESTURE_TIMEOUT,
        dispatcher.config().scroll_gesture_timeout
    );
    assert_eq!(Ok(id), dispatcher.resolve(wnd));
}
