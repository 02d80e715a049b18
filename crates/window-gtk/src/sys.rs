//! Native types passed through the widget entry points.
#![allow(non_camel_case_types)]

use std::{
    ffi::{c_char, c_int, c_void},
    marker::{PhantomData, PhantomPinned},
};

use wndbridge_window::{KeyEvent, ModifierKeys, Timestamp};

/// A cairo drawing context. Never dereferenced on this side.
#[repr(C)]
pub struct cairo_t {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Mirror of GDK 3's `GdkEventKey`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GdkEventKey {
    pub type_: c_int,
    pub window: *mut c_void,
    pub send_event: i8,
    pub time: u32,
    pub state: u32,
    pub keyval: u32,
    pub length: c_int,
    pub string: *mut c_char,
    pub hardware_keycode: u16,
    pub group: u8,
    /// `guint is_modifier : 1`, packed into the byte after `group`.
    pub is_modifier: u8,
}

impl GdkEventKey {
    /// The bit of [`Self::is_modifier`] holding the bitfield. C compilers
    /// allocate bitfields from the most significant bit on big-endian targets.
    pub const IS_MODIFIER_BIT: u8 = if cfg!(target_endian = "big") {
        0x80
    } else {
        0x01
    };

    pub fn to_key_event(&self) -> KeyEvent {
        KeyEvent {
            keyval: self.keyval,
            keycode: self.hardware_keycode,
            modifiers: ModifierKeys::from_native(self.state),
            is_modifier: self.is_modifier & Self::IS_MODIFIER_BIT != 0,
            time: Timestamp(self.time),
        }
    }
}
