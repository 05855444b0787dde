use tracing::{debug, trace};

use crate::drag::Handle;

use super::{Slider, SliderValue};

/// Fraction of the span moved per key press when the slider has no step.
const UNSTEPPED_KEY_FRACTION: f32 = 0.01;

/// Steps moved by [`SliderKey::PageUp`] and [`SliderKey::PageDown`] unless
/// overridden by `SliderArgs::page_steps`.
pub const DEFAULT_PAGE_STEPS: u32 = 10;

/// Keyboard commands a focused handle responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKey {
    /// One step toward the maximum.
    Increment,
    /// One step toward the minimum.
    Decrement,
    /// One page toward the maximum.
    PageUp,
    /// One page toward the minimum.
    PageDown,
    /// Jump to the lowest reachable value.
    Home,
    /// Jump to the highest reachable value.
    End,
}

impl SliderKey {
    /// Maps a DOM-style key name.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowRight" | "ArrowUp" => Some(SliderKey::Increment),
            "ArrowLeft" | "ArrowDown" => Some(SliderKey::Decrement),
            "PageUp" => Some(SliderKey::PageUp),
            "PageDown" => Some(SliderKey::PageDown),
            "Home" => Some(SliderKey::Home),
            "End" => Some(SliderKey::End),
            _ => None,
        }
    }
}

impl<V: SliderValue> Slider<V> {
    /// Distance moved by one increment.
    fn key_step(&self) -> f32 {
        let domain = self.domain();
        if domain.is_stepped() {
            domain.step()
        } else {
            domain.span() * UNSTEPPED_KEY_FRACTION
        }
    }

    /// Applies a keyboard command to `handle`. Returns the committed value,
    /// or `None` when the key was ignored or did not move the handle.
    pub fn key(&mut self, handle: Handle, key: SliderKey) -> Option<V> {
        if self.disabled {
            debug!(id = ?self.id, ?key, "slider disabled; key ignored");
            return None;
        }
        let current = self.value().handle_value(handle)?;
        let (lo, hi) = self.value().handle_bounds(handle, self.domain());
        let step = self.key_step();
        let page = step * self.page_steps.max(1) as f32;
        let raw = match key {
            SliderKey::Increment => current + step,
            SliderKey::Decrement => current - step,
            SliderKey::PageUp => current + page,
            SliderKey::PageDown => current - page,
            SliderKey::Home => lo,
            SliderKey::End => hi,
        };
        trace!(id = ?self.id, ?handle, ?key, raw, "key applied");
        self.commit_handle(handle, raw)
    }

    /// Snaps `raw`, moves `handle` there under the ordering rules and
    /// commits when the value changes.
    pub(super) fn commit_handle(&mut self, handle: Handle, raw: f32) -> Option<V> {
        let current = self.value();
        let next = current
            .with_handle(handle, self.domain().snap(raw))
            .constrain(self.domain());
        if next == current {
            return None;
        }
        let committed = self.state.commit(next);
        if self.drag.is_dragging() {
            self.session_value = Some(committed);
        }
        Some(committed)
    }
}
