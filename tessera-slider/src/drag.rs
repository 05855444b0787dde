//! Pointer drag sessions.
//!
//! [`DragController`] is a two-state machine, `Idle` and `Dragging(handle)`.
//! A press on a handle (or on the track, for range sliders) opens a session,
//! captures the pointer and commits the value under the pointer. Moves from
//! the same pointer recompute and commit. Release or cancel closes the
//! session; the capture is dropped together with the session.
//!
//! Everything a handler needs is passed in through [`DragContext`], so no
//! value is captured across events.

use std::mem;

use tracing::{debug, trace};

use crate::{
    controlled_state::ControlledState,
    pointer_capture::{PointerCapture, PointerId},
    slider::{SliderId, SliderValue, TrackGeometry},
};

/// One endpoint marker of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The only handle of a single-value slider.
    Single,
    /// Lower handle of a range slider.
    Start,
    /// Upper handle of a range slider.
    End,
}

impl Handle {
    /// Tag used by the presentation contract.
    pub fn as_str(self) -> &'static str {
        match self {
            Handle::Single => "single",
            Handle::Start => "start",
            Handle::End => "end",
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// A specific handle.
    Handle(Handle),
    /// The bare track.
    Track,
}

impl PressTarget {
    /// Parses the presentation tags `"single"`, `"start"`, `"end"` and
    /// `"track"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "single" => Some(PressTarget::Handle(Handle::Single)),
            "start" => Some(PressTarget::Handle(Handle::Start)),
            "end" => Some(PressTarget::Handle(Handle::End)),
            "track" => Some(PressTarget::Track),
            _ => None,
        }
    }
}

/// Raw pointer input forwarded by the presentation layer.
///
/// `x` is in the same coordinate space as the slider's
/// [`TrackGeometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer went down on a handle or on the track.
    Pressed {
        /// Pointer that went down.
        pointer_id: PointerId,
        /// What the press landed on.
        target: PressTarget,
        /// Press position.
        x: f32,
    },
    /// Pointer moved, anywhere in the window.
    Moved {
        /// Pointer that moved.
        pointer_id: PointerId,
        /// New position.
        x: f32,
    },
    /// Pointer was released.
    Released {
        /// Pointer that was released.
        pointer_id: PointerId,
    },
    /// The platform cancelled the pointer stream.
    Cancelled {
        /// Pointer that was cancelled.
        pointer_id: PointerId,
    },
}

impl PointerEvent {
    /// Pointer the event belongs to.
    pub fn pointer_id(&self) -> PointerId {
        match *self {
            PointerEvent::Pressed { pointer_id, .. }
            | PointerEvent::Moved { pointer_id, .. }
            | PointerEvent::Released { pointer_id }
            | PointerEvent::Cancelled { pointer_id } => pointer_id,
        }
    }
}

/// A live press-to-release interaction.
///
/// Holds the pointer capture, so dropping the session releases it.
#[derive(Debug)]
pub struct DragSession {
    handle: Handle,
    pointer_id: PointerId,
    _capture: PointerCapture,
}

impl DragSession {
    /// Handle being dragged.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Pointer driving the session.
    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Mutable context handed to every drag handler.
#[derive(Debug)]
pub struct DragContext<'a, V> {
    /// Sole mutation path for the value.
    pub state: &'a mut ControlledState<V>,
    /// Current track geometry in pointer coordinates.
    pub geometry: TrackGeometry,
    /// Disabled sliders ignore all pointer input.
    pub disabled: bool,
}

impl<V: SliderValue> DragContext<'_, V> {
    fn candidate_at(&self, x: f32) -> f32 {
        self.geometry.value_at(x, self.state.domain())
    }
}

/// Drag state machine for one slider instance.
#[derive(Debug)]
pub struct DragController {
    owner: SliderId,
    state: DragState,
}

impl DragController {
    /// Creates an idle controller whose captures are attributed to `owner`.
    pub fn new(owner: SliderId) -> Self {
        Self {
            owner,
            state: DragState::Idle,
        }
    }

    /// Whether a session is running.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The handle of the running session, if any.
    pub fn active_handle(&self) -> Option<Handle> {
        self.session().map(DragSession::handle)
    }

    /// The running session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Handles a pointer-down. Returns the value committed from the press
    /// position when a session was started, `None` when the press was
    /// ignored.
    #[tracing::instrument(level = "trace", skip(self, cx))]
    pub fn press<V: SliderValue>(
        &mut self,
        cx: &mut DragContext<'_, V>,
        pointer_id: PointerId,
        target: PressTarget,
        x: f32,
    ) -> Option<V> {
        if cx.disabled {
            debug!(?pointer_id, "slider disabled; press ignored");
            return None;
        }
        if let Some(session) = self.session() {
            debug!(
                ?pointer_id,
                active = ?session.pointer_id,
                "session already running; press ignored"
            );
            return None;
        }

        let candidate = cx.candidate_at(x);
        let Some((handle, next)) = cx.state.current_value().resolve_press(target, candidate) else {
            debug!(?target, variant = ?V::VARIANT, "press target does not belong to this slider");
            return None;
        };
        let Some(capture) = PointerCapture::acquire(pointer_id, self.owner) else {
            debug!(?pointer_id, "pointer captured elsewhere; press ignored");
            return None;
        };

        let committed = cx.state.commit(next);
        debug!(?pointer_id, ?handle, value = ?committed, "drag session started");
        self.state = DragState::Dragging(DragSession {
            handle,
            pointer_id,
            _capture: capture,
        });
        Some(committed)
    }

    /// Handles a pointer move. Returns the committed value, or `None` when
    /// the move does not belong to the running session.
    pub fn move_to<V: SliderValue>(
        &mut self,
        cx: &mut DragContext<'_, V>,
        pointer_id: PointerId,
        x: f32,
    ) -> Option<V> {
        let session = self.session()?;
        if session.pointer_id != pointer_id || cx.disabled {
            return None;
        }
        let handle = session.handle;
        let candidate = cx.candidate_at(x);
        let next = cx.state.current_value().with_handle(handle, candidate);
        let committed = cx.state.commit(next);
        trace!(?pointer_id, ?handle, x, value = ?committed, "drag move committed");
        Some(committed)
    }

    /// Ends the session on pointer release. Returns the handle that was
    /// being dragged.
    pub fn release(&mut self, pointer_id: PointerId) -> Option<Handle> {
        self.finish(pointer_id, "released")
    }

    /// Ends the session on pointer cancel without committing.
    pub fn cancel(&mut self, pointer_id: PointerId) -> Option<Handle> {
        self.finish(pointer_id, "cancelled")
    }

    /// Drops whatever session is running, regardless of pointer.
    pub fn abort(&mut self) -> Option<Handle> {
        let DragState::Dragging(session) = mem::take(&mut self.state) else {
            return None;
        };
        debug!(pointer_id = ?session.pointer_id, handle = ?session.handle, "drag session aborted");
        Some(session.handle)
    }

    fn finish(&mut self, pointer_id: PointerId, reason: &'static str) -> Option<Handle> {
        if self.session()?.pointer_id != pointer_id {
            return None;
        }
        let DragState::Dragging(session) = mem::take(&mut self.state) else {
            return None;
        };
        debug!(?pointer_id, handle = ?session.handle, reason, "drag session ended");
        Some(session.handle)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{
        pointer_capture::is_captured, prop::CallbackWith, range_policy::RangeValue,
        value_model::Domain,
    };

    // Track from x = 0 to x = 100 maps one pixel to one unit in 0..=100.
    const GEOMETRY: TrackGeometry = TrackGeometry::new(0.0, 100.0);

    fn counting_state<V: SliderValue>(
        domain: Domain,
        default_value: Option<V>,
    ) -> (ControlledState<V>, Arc<AtomicUsize>) {
        let commits = Arc::new(AtomicUsize::new(0));
        let on_change = CallbackWith::new({
            let commits = commits.clone();
            move |_| {
                commits.fetch_add(1, Ordering::SeqCst);
            }
        });
        (
            ControlledState::new(domain, None, default_value, on_change),
            commits,
        )
    }

    #[test]
    fn test_press_move_release_single() {
        let (mut state, commits) = counting_state::<f32>(Domain::default(), None);
        let mut drag = DragController::new(SliderId::next());
        let pointer = PointerId(2001);
        let mut cx = DragContext {
            state: &mut state,
            geometry: GEOMETRY,
            disabled: false,
        };

        assert_eq!(
            drag.press(&mut cx, pointer, PressTarget::Handle(Handle::Single), 12.0),
            Some(12.0)
        );
        assert_eq!(drag.active_handle(), Some(Handle::Single));
        assert!(is_captured(pointer));
        assert_eq!(cx.state.current_value(), 12.0);

        assert_eq!(drag.move_to(&mut cx, pointer, 30.0), Some(30.0));
        assert_eq!(drag.move_to(&mut cx, pointer, 31.0), Some(31.0));
        assert_eq!(drag.release(pointer), Some(Handle::Single));
        assert!(!drag.is_dragging());
        assert!(!is_captured(pointer));
        assert_eq!(commits.load(Ordering::SeqCst), 3);

        // Moves after release are not part of any session.
        assert_eq!(drag.move_to(&mut cx, pointer, 80.0), None);
        assert_eq!(cx.state.current_value(), 31.0);
    }

    #[test]
    fn test_cancel_releases_capture_without_commit() {
        let (mut state, commits) = counting_state::<f32>(Domain::default(), None);
        let mut drag = DragController::new(SliderId::next());
        let pointer = PointerId(2002);
        let mut cx = DragContext {
            state: &mut state,
            geometry: GEOMETRY,
            disabled: false,
        };

        assert_eq!(drag.press(&mut cx, pointer, PressTarget::Track, 40.0), Some(40.0));
        drag.move_to(&mut cx, pointer, 45.0);
        assert_eq!(drag.cancel(pointer), Some(Handle::Single));
        assert!(!is_captured(pointer));
        assert_eq!(commits.load(Ordering::SeqCst), 2);
        assert_eq!(cx.state.current_value(), 45.0);
    }

    #[test]
    fn test_second_press_does_not_start_another_session() {
        let (mut state, _) = counting_state::<RangeValue>(Domain::default(), None);
        let mut drag = DragController::new(SliderId::next());
        let mut cx = DragContext {
            state: &mut state,
            geometry: GEOMETRY,
            disabled: false,
        };

        assert_eq!(
            drag.press(&mut cx, PointerId(2003), PressTarget::Handle(Handle::End), 90.0),
            Some(RangeValue::new(0.0, 90.0))
        );
        assert_eq!(
            drag.press(&mut cx, PointerId(2004), PressTarget::Handle(Handle::Start), 5.0),
            None
        );
        assert!(!is_captured(PointerId(2004)));
        assert_eq!(drag.active_handle(), Some(Handle::End));

        // Moves and releases from the second pointer are ignored.
        assert_eq!(drag.move_to(&mut cx, PointerId(2004), 10.0), None);
        assert_eq!(drag.release(PointerId(2004)), None);
        assert!(drag.is_dragging());
        assert_eq!(drag.release(PointerId(2003)), Some(Handle::End));
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let (mut state, commits) = counting_state::<f32>(Domain::default(), Some(30.0));
        let mut drag = DragController::new(SliderId::next());
        let pointer = PointerId(2005);
        let mut cx = DragContext {
            state: &mut state,
            geometry: GEOMETRY,
            disabled: true,
        };

        assert_eq!(drag.press(&mut cx, pointer, PressTarget::Track, 70.0), None);
        assert_eq!(drag.move_to(&mut cx, pointer, 80.0), None);
        assert_eq!(drag.release(pointer), None);
        assert!(!is_captured(pointer));
        assert_eq!(commits.load(Ordering::SeqCst), 0);
        assert_eq!(cx.state.current_value(), 30.0);
    }

    #[test]
    fn test_mismatched_handle_is_ignored() {
        let (mut state, commits) = counting_state::<f32>(Domain::default(), None);
        let mut drag = DragController::new(SliderId::next());
        let mut cx = DragContext {
            state: &mut state,
            geometry: GEOMETRY,
            disabled: false,
        };
        assert_eq!(
            drag.press(&mut cx, PointerId(2006), PressTarget::Handle(Handle::Start), 10.0),
            None
        );
        assert_eq!(commits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dropping_controller_releases_capture() {
        let (mut state, _) = counting_state::<f32>(Domain::default(), None);
        let mut drag = DragController::new(SliderId::next());
        let pointer = PointerId(2007);
        let mut cx = DragContext {
            state: &mut state,
            geometry: GEOMETRY,
            disabled: false,
        };
        assert!(drag.press(&mut cx, pointer, PressTarget::Track, 50.0).is_some());
        assert!(is_captured(pointer));
        drop(drag);
        assert!(!is_captured(pointer));
    }

    #[test]
    fn test_press_target_tags() {
        assert_eq!(PressTarget::from_tag("track"), Some(PressTarget::Track));
        assert_eq!(
            PressTarget::from_tag("end"),
            Some(PressTarget::Handle(Handle::End))
        );
        assert_eq!(PressTarget::from_tag("middle"), None);
        assert_eq!(Handle::Start.as_str(), "start");
    }
}
