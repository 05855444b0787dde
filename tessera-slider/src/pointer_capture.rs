//! # Pointer Capture
//!
//! While a handle is being dragged the slider must keep receiving moves and
//! the final release even after the pointer leaves its bounds. The
//! presentation layer therefore routes window-level pointer events for a
//! captured pointer to the slider that owns the capture.
//!
//! ## Overview
//!
//! - **Process-wide**: captures live in one registry shared by every slider
//! - **Scoped**: a [`PointerCapture`] is acquired when a drag session starts
//!   and the registry entry is removed when the handle is dropped, whichever
//!   way the session ends
//! - **Exclusive**: a pointer can be captured by at most one slider
//!
//! ## Usage
//!
//! ```
//! use tessera_slider::{
//!     SliderId,
//!     pointer_capture::{PointerCapture, PointerId, capture_owner},
//! };
//!
//! let owner = SliderId::next();
//! let capture = PointerCapture::acquire(PointerId(7), owner).expect("pointer is free");
//! assert_eq!(capture_owner(PointerId(7)), Some(owner));
//!
//! drop(capture);
//! assert_eq!(capture_owner(PointerId(7)), None);
//! ```

use std::sync::OnceLock;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use slotmap::{SlotMap, new_key_type};
use tracing::trace;

use crate::slider::SliderId;

/// Identifier the event source assigns to a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

new_key_type! {
    struct CaptureKey;
}

#[derive(Debug)]
struct CaptureEntry {
    pointer_id: PointerId,
    owner: SliderId,
}

#[derive(Default)]
struct CaptureState {
    captures: SlotMap<CaptureKey, CaptureEntry>,
}

static CAPTURE_STATE: OnceLock<RwLock<CaptureState>> = OnceLock::new();

fn read_capture_state() -> RwLockReadGuard<'static, CaptureState> {
    CAPTURE_STATE
        .get_or_init(|| RwLock::new(CaptureState::default()))
        .read()
}

fn write_capture_state() -> RwLockWriteGuard<'static, CaptureState> {
    CAPTURE_STATE
        .get_or_init(|| RwLock::new(CaptureState::default()))
        .write()
}

/// A live pointer capture. The registry entry is removed on drop.
#[derive(Debug)]
pub struct PointerCapture {
    key: CaptureKey,
    pointer_id: PointerId,
    owner: SliderId,
}

impl PointerCapture {
    /// Captures `pointer_id` for `owner`.
    ///
    /// Returns `None` when the pointer is already captured.
    pub fn acquire(pointer_id: PointerId, owner: SliderId) -> Option<Self> {
        let mut state = write_capture_state();
        if state
            .captures
            .values()
            .any(|entry| entry.pointer_id == pointer_id)
        {
            return None;
        }
        let key = state.captures.insert(CaptureEntry { pointer_id, owner });
        trace!(?pointer_id, ?owner, "pointer captured");
        Some(Self {
            key,
            pointer_id,
            owner,
        })
    }

    /// The captured pointer.
    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// The slider holding the capture.
    pub fn owner(&self) -> SliderId {
        self.owner
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        write_capture_state().captures.remove(self.key);
        trace!(pointer_id = ?self.pointer_id, owner = ?self.owner, "pointer capture released");
    }
}

/// The slider currently capturing `pointer_id`, if any.
pub fn capture_owner(pointer_id: PointerId) -> Option<SliderId> {
    read_capture_state()
        .captures
        .values()
        .find(|entry| entry.pointer_id == pointer_id)
        .map(|entry| entry.owner)
}

/// Whether `pointer_id` is captured by any slider.
pub fn is_captured(pointer_id: PointerId) -> bool {
    capture_owner(pointer_id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Pointer ids are unique per test because the registry is shared across
    // the test threads.

    #[test]
    fn test_capture_released_on_drop() {
        let owner = SliderId::next();
        let capture = PointerCapture::acquire(PointerId(1001), owner).expect("pointer is free");
        assert!(is_captured(PointerId(1001)));
        assert_eq!(capture.owner(), owner);
        drop(capture);
        assert!(!is_captured(PointerId(1001)));
    }

    #[test]
    fn test_capture_is_exclusive() {
        let first = SliderId::next();
        let second = SliderId::next();
        let capture = PointerCapture::acquire(PointerId(1002), first).expect("pointer is free");
        assert!(PointerCapture::acquire(PointerId(1002), second).is_none());
        assert_eq!(capture_owner(PointerId(1002)), Some(first));

        drop(capture);
        let recaptured = PointerCapture::acquire(PointerId(1002), second).expect("pointer is free");
        assert_eq!(capture_owner(PointerId(1002)), Some(second));
        assert_eq!(recaptured.pointer_id(), PointerId(1002));
    }

    #[test]
    fn test_distinct_pointers_capture_independently() {
        let owner = SliderId::next();
        let a = PointerCapture::acquire(PointerId(1003), owner).expect("pointer is free");
        let b = PointerCapture::acquire(PointerId(1004), owner).expect("pointer is free");
        drop(a);
        assert!(!is_captured(PointerId(1003)));
        assert!(is_captured(PointerId(1004)));
        drop(b);
    }
}
