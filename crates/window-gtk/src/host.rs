use wndbridge_window::WindowId;

/// Queries the dispatcher sends back to the native side.
pub trait WidgetHost {
    /// The current scale factor of the widget backing `window_id`, or `None`
    /// if the widget is not realized.
    fn scale_factor(&self, window_id: WindowId) -> Option<f32>;
}

impl<F> WidgetHost for F
where
    F: Fn(WindowId) -> Option<f32>,
{
    #[inline]
    fn scale_factor(&self, window_id: WindowId) -> Option<f32> {
        self(window_id)
    }
}
