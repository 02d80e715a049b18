//! The `size_t` handles the native widgets store to refer to their window.

use std::collections::HashMap;

use wndbridge_window::{WindowId, WindowsMirror};

use crate::{Error, Result};

/// The window handle as seen by the native widget (`size_t`).
pub type RawWindowHandle = usize;

/// Assigns every live window a small non-zero handle.
///
/// Handles are allocated from a counter and not reused until the counter
/// wraps, so a handle kept by a destroyed widget does not resolve to a newer
/// window.
#[derive(Debug)]
pub struct HandleTable {
    next: RawWindowHandle,
    windows: HashMap<RawWindowHandle, WindowId>,
    handles: WindowsMirror<RawWindowHandle>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self {
            next: 1,
            windows: HashMap::new(),
            handles: WindowsMirror::new(),
        }
    }

    pub fn insert(&mut self, id: WindowId) -> RawWindowHandle {
        if let Some(&raw) = self.handles.get(id) {
            return raw;
        }
        let raw = loop {
            let candidate = self.next;
            self.next = self.next.checked_add(1).unwrap_or(1);
            if !self.windows.contains_key(&candidate) {
                break candidate;
            }
        };
        self.windows.insert(raw, id);
        self.handles.insert(id, raw);
        raw
    }

    pub fn remove(&mut self, id: WindowId) -> Option<RawWindowHandle> {
        let raw = self.handles.remove(id)?;
        self.windows.remove(&raw);
        Some(raw)
    }

    #[inline]
    pub fn get(&self, id: WindowId) -> Option<RawWindowHandle> {
        self.handles.get(id).copied()
    }

    pub fn resolve(&self, raw: RawWindowHandle) -> Result<WindowId> {
        if raw == 0 {
            return Err(Error::InvalidHandle(raw));
        }
        self.windows
            .get(&raw)
            .copied()
            .ok_or(Error::UnknownHandle(raw))
    }
}

impl Default for HandleTable {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
