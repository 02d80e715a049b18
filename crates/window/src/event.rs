use std::{ffi::c_void, marker::PhantomData, ptr::NonNull};

use bitflags::bitflags;

use crate::Vec2;

/// Classification of a point inside a window for window-chrome decisions.
///
/// The discriminant is the code handed back to the native toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum HitTestResult {
    /// Regular content; the application handles the pointer itself.
    #[default]
    Client = 0,
    /// Dragging moves the window (a title bar).
    Grab = 1,
    EdgeN = 2,
    EdgeNE = 3,
    EdgeE = 4,
    EdgeSE = 5,
    EdgeS = 6,
    EdgeSW = 7,
    EdgeW = 8,
    EdgeNW = 9,
}

impl HitTestResult {
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns `true` if the point lies on a resize border.
    #[inline]
    pub const fn is_edge(self) -> bool {
        !matches!(self, Self::Client | Self::Grab)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
    Other(u8),
}

impl MouseButton {
    /// Converts a native (X11-style, 1-based) button number.
    pub const fn from_native(button: u8) -> Self {
        match button {
            1 => Self::Left,
            2 => Self::Middle,
            3 => Self::Right,
            8 => Self::Back,
            9 => Self::Forward,
            other => Self::Other(other),
        }
    }

    pub const fn to_native(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
            Self::Back => 8,
            Self::Forward => 9,
            Self::Other(other) => other,
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ModifierKeys: u32 {
        const SHIFT = 1;
        const CAPS_LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        const ALT = 1 << 3;
        const SUPER = 1 << 26;
        const HYPER = 1 << 27;
        const META = 1 << 28;
    }
}

impl ModifierKeys {
    /// Extracts the modifier keys from a native modifier state mask.
    ///
    /// Pointer-button and other unrelated bits are dropped.
    #[inline]
    pub const fn from_native(state: u32) -> Self {
        Self::from_bits_truncate(state)
    }
}

/// Timestamp of the native event clock, in milliseconds.
///
/// The clock wraps around; use [`Timestamp::millis_since`] to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timestamp(pub u32);

impl Timestamp {
    /// Milliseconds elapsed from `earlier` to `self`.
    #[inline]
    pub const fn millis_since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    #[inline]
    pub fn secs_since(self, earlier: Self) -> f32 {
        self.millis_since(earlier) as f32 / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Symbolic key value (keysym).
    pub keyval: u32,
    /// Hardware scan code.
    pub keycode: u16,
    pub modifiers: ModifierKeys,
    /// The key itself is a modifier key.
    pub is_modifier: bool,
    pub time: Timestamp,
}

/// A scroll amount.
///
/// Positive `y` scrolls toward the top of the content, positive `x` toward
/// the left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub delta: Vec2,
    /// `true` if `delta` is in pixels, `false` if it counts lines.
    pub precise: bool,
}

impl ScrollDelta {
    #[inline]
    pub const fn lines(delta: Vec2) -> Self {
        Self {
            delta,
            precise: false,
        }
    }

    #[inline]
    pub const fn pixels(delta: Vec2) -> Self {
        Self {
            delta,
            precise: true,
        }
    }
}

/// The native drawing context of a paint request.
///
/// Only valid for the duration of the draw callback it was passed to.
#[derive(Debug)]
pub struct DrawContext<'a> {
    raw: NonNull<c_void>,
    _marker: PhantomData<&'a mut c_void>,
}

impl DrawContext<'_> {
    /// # Safety
    /// `raw` must point to a drawing context that stays valid for the
    /// lifetime chosen by the caller.
    #[inline]
    pub unsafe fn from_raw(raw: NonNull<c_void>) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut c_void {
        self.raw.as_ptr()
    }
}
