//! A headless slider for selecting a value or a range of values.
//!
//! ## Usage
//!
//! Build a [`Slider`] from [`SliderArgs`], report the track geometry after
//! layout, forward pointer and keyboard input, and render from
//! [`Slider::presentation`]. The value type picks the variant: `f32` for a
//! single handle, [`RangeValue`] for a start/end pair.
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    controlled_state::{ControlledState, Ownership},
    drag::{DragContext, DragController, Handle, PointerEvent, PressTarget},
    error::SliderError,
    prop::CallbackWith,
    range_policy::{RangeValue, move_end, move_start, order_pair, route_track_click},
    value_model::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP, Domain},
};

pub use accessibility::HandleControl;
pub use keyboard::{DEFAULT_PAGE_STEPS, SliderKey};
pub use layout::TrackGeometry;

mod accessibility;
mod keyboard;
mod layout;

/// Stop indicators are not reported past this many.
const MAX_TICKS: usize = 1000;

/// Process-unique identity of a slider instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliderId(u64);

impl SliderId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Number of handles a slider has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderVariant {
    /// One handle selecting a scalar.
    Single,
    /// Two handles selecting an ordered pair.
    Double,
}

/// Value types a [`Slider`] can hold.
///
/// Implemented for `f32` (single variant) and [`RangeValue`] (double
/// variant). Every method is pure; the slider decides when to commit.
pub trait SliderValue: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Variant this value type represents.
    const VARIANT: SliderVariant;
    /// Handles, in track order.
    const HANDLES: &'static [Handle];

    /// Value used when neither a value nor a default was supplied.
    fn initial(domain: &Domain) -> Self;

    /// Clamps into the domain and restores any ordering invariant.
    fn constrain(self, domain: &Domain) -> Self;

    /// Position of `handle`, or `None` when the handle does not belong to
    /// this variant.
    fn handle_value(self, handle: Handle) -> Option<f32>;

    /// Moves `handle` to `candidate`, respecting sibling handles.
    fn with_handle(self, handle: Handle, candidate: f32) -> Self;

    /// Picks the handle a press on `target` drags and the value it produces.
    fn resolve_press(self, target: PressTarget, candidate: f32) -> Option<(Handle, Self)>;

    /// Range `handle` may move in without crossing a sibling.
    fn handle_bounds(self, handle: Handle, domain: &Domain) -> (f32, f32);

    /// Start and end percents of the filled part of the track.
    fn fill(self, domain: &Domain) -> (f32, f32);
}

impl SliderValue for f32 {
    const VARIANT: SliderVariant = SliderVariant::Single;
    const HANDLES: &'static [Handle] = &[Handle::Single];

    fn initial(domain: &Domain) -> Self {
        domain.min()
    }

    fn constrain(self, domain: &Domain) -> Self {
        domain.clamp(self)
    }

    fn handle_value(self, handle: Handle) -> Option<f32> {
        (handle == Handle::Single).then_some(self)
    }

    fn with_handle(self, handle: Handle, candidate: f32) -> Self {
        match handle {
            Handle::Single => candidate,
            Handle::Start | Handle::End => self,
        }
    }

    fn resolve_press(self, target: PressTarget, candidate: f32) -> Option<(Handle, Self)> {
        match target {
            PressTarget::Handle(Handle::Single) | PressTarget::Track => {
                Some((Handle::Single, candidate))
            }
            PressTarget::Handle(Handle::Start | Handle::End) => None,
        }
    }

    fn handle_bounds(self, _handle: Handle, domain: &Domain) -> (f32, f32) {
        (domain.min(), domain.max())
    }

    fn fill(self, domain: &Domain) -> (f32, f32) {
        (0.0, domain.percent(self))
    }
}

impl SliderValue for RangeValue {
    const VARIANT: SliderVariant = SliderVariant::Double;
    const HANDLES: &'static [Handle] = &[Handle::Start, Handle::End];

    fn initial(domain: &Domain) -> Self {
        RangeValue {
            start: domain.min(),
            end: domain.max(),
        }
    }

    fn constrain(self, domain: &Domain) -> Self {
        let (start, end) = order_pair(domain.clamp(self.start), domain.clamp(self.end));
        RangeValue { start, end }
    }

    fn handle_value(self, handle: Handle) -> Option<f32> {
        match handle {
            Handle::Start => Some(self.start),
            Handle::End => Some(self.end),
            Handle::Single => None,
        }
    }

    fn with_handle(self, handle: Handle, candidate: f32) -> Self {
        match handle {
            Handle::Start => RangeValue {
                start: move_start(candidate, self.end),
                ..self
            },
            Handle::End => RangeValue {
                end: move_end(candidate, self.start),
                ..self
            },
            Handle::Single => self,
        }
    }

    fn resolve_press(self, target: PressTarget, candidate: f32) -> Option<(Handle, Self)> {
        match target {
            PressTarget::Track => Some(route_track_click(candidate, self)),
            PressTarget::Handle(handle @ (Handle::Start | Handle::End)) => {
                Some((handle, self.with_handle(handle, candidate)))
            }
            PressTarget::Handle(Handle::Single) => None,
        }
    }

    fn handle_bounds(self, handle: Handle, domain: &Domain) -> (f32, f32) {
        match handle {
            Handle::Start => (domain.min(), self.end),
            Handle::End => (self.start, domain.max()),
            Handle::Single => (domain.min(), domain.max()),
        }
    }

    fn fill(self, domain: &Domain) -> (f32, f32) {
        (domain.percent(self.start), domain.percent(self.end))
    }
}

/// Arguments for a [`Slider`].
#[derive(Debug, PartialEq, Clone, Setters)]
pub struct SliderArgs<V> {
    /// Lower bound of the domain.
    pub min: f32,
    /// Upper bound of the domain.
    pub max: f32,
    /// Snapping increment. Zero or less disables snapping.
    pub step: f32,
    /// Caller-owned value. Supplying it makes the slider controlled; keep it
    /// current with [`Slider::sync_external`].
    #[setters(strip_option)]
    pub value: Option<V>,
    /// Starting value of an uncontrolled slider.
    #[setters(strip_option)]
    pub default_value: Option<V>,
    /// Called with every committed value.
    #[setters(skip)]
    pub on_change: CallbackWith<V>,
    /// Called once when a drag session ends.
    #[setters(skip)]
    pub on_change_finished: CallbackWith<V>,
    /// Disable interaction.
    pub disabled: bool,
    /// Renders a handle value for labels and assistive technologies. Defaults
    /// to a rounded percentage of the domain.
    #[setters(skip)]
    pub format_value: Option<CallbackWith<f32, String>>,
    /// Optional accessibility label read by assistive technologies.
    #[setters(strip_option, into)]
    pub accessibility_label: Option<String>,
    /// Optional accessibility description.
    #[setters(strip_option, into)]
    pub accessibility_description: Option<String>,
    /// Steps moved by page keys.
    pub page_steps: u32,
}

impl<V: SliderValue> SliderArgs<V> {
    /// Sets the on_change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the on_change handler using a shared callback.
    pub fn on_change_shared(mut self, on_change: impl Into<CallbackWith<V>>) -> Self {
        self.on_change = on_change.into();
        self
    }

    /// Sets the handler called when a drag session ends.
    pub fn on_change_finished<F>(mut self, on_change_finished: F) -> Self
    where
        F: Fn(V) + Send + Sync + 'static,
    {
        self.on_change_finished = CallbackWith::new(on_change_finished);
        self
    }

    /// Sets the value formatter.
    pub fn format_value<F>(mut self, format_value: F) -> Self
    where
        F: Fn(f32) -> String + Send + Sync + 'static,
    {
        self.format_value = Some(CallbackWith::new(format_value));
        self
    }
}

impl<V: SliderValue> Default for SliderArgs<V> {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            value: None,
            default_value: None,
            on_change: CallbackWith::noop(),
            on_change_finished: CallbackWith::noop(),
            disabled: false,
            format_value: None,
            accessibility_label: None,
            accessibility_description: None,
            page_steps: DEFAULT_PAGE_STEPS,
        }
    }
}

/// Render data for one handle.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlePresentation {
    /// Which handle this is.
    pub handle: Handle,
    /// Domain value of the handle.
    pub value: f32,
    /// Position along the track, `0..=100`.
    pub percent: f32,
    /// Formatted value for the tooltip or label.
    pub label: String,
}

/// Everything the presentation layer needs to draw a slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderPresentation<V> {
    /// Displayed value.
    pub value: V,
    /// Handles in track order.
    pub handles: SmallVec<[HandlePresentation; 2]>,
    /// Start and end percents of the filled segment.
    pub fill: (f32, f32),
    /// Whether input is ignored.
    pub disabled: bool,
    /// Handle being dragged, if any.
    pub active_handle: Option<Handle>,
}

/// Slider engine: value ownership, drag sessions and keyboard input for one
/// slider instance.
#[derive(Debug)]
pub struct Slider<V: SliderValue> {
    id: SliderId,
    state: ControlledState<V>,
    drag: DragController,
    geometry: TrackGeometry,
    disabled: bool,
    page_steps: u32,
    format_value: Option<CallbackWith<f32, String>>,
    on_change_finished: CallbackWith<V>,
    // Last value the running drag session committed.
    session_value: Option<V>,
    accessibility_label: Option<String>,
    accessibility_description: Option<String>,
}

/// A slider with one handle.
pub type SingleSlider = Slider<f32>;
/// A slider with start and end handles.
pub type RangeSlider = Slider<RangeValue>;

impl<V: SliderValue> Slider<V> {
    /// Creates a slider.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError`] when `min`, `max` or `step` do not form a
    /// valid domain.
    pub fn new(args: &SliderArgs<V>) -> Result<Self, SliderError> {
        let domain = Domain::new(args.min, args.max, args.step)?;
        let id = SliderId::next();
        let drag = DragController::new(id);
        let state = ControlledState::new(
            domain,
            args.value,
            args.default_value,
            args.on_change.clone(),
        );
        debug!(
            ?id,
            variant = ?V::VARIANT,
            ownership = ?state.ownership(),
            value = ?state.current_value(),
            "slider created"
        );
        Ok(Self {
            id,
            state,
            drag,
            geometry: TrackGeometry::default(),
            disabled: args.disabled,
            page_steps: args.page_steps,
            format_value: args.format_value.clone(),
            on_change_finished: args.on_change_finished.clone(),
            session_value: None,
            accessibility_label: args.accessibility_label.clone(),
            accessibility_description: args.accessibility_description.clone(),
        })
    }

    /// Identity used for pointer captures.
    pub fn id(&self) -> SliderId {
        self.id
    }

    /// Number of handles.
    pub fn variant(&self) -> SliderVariant {
        V::VARIANT
    }

    /// Domain fixed at construction.
    pub fn domain(&self) -> &Domain {
        self.state.domain()
    }

    /// Whether the caller or the slider owns the value.
    pub fn ownership(&self) -> Ownership {
        self.state.ownership()
    }

    /// Displayed value.
    pub fn value(&self) -> V {
        self.state.current_value()
    }

    /// Whether input is ignored.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables input. Disabling ends a running drag session
    /// without a finished notification.
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled
            && let Some(handle) = self.drag.abort()
        {
            debug!(id = ?self.id, ?handle, "slider disabled mid-drag");
            self.session_value = None;
        }
        self.disabled = disabled;
    }

    /// Whether a drag session is running.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Handle being dragged, if any.
    pub fn active_handle(&self) -> Option<Handle> {
        self.drag.active_handle()
    }

    /// Last reported track geometry.
    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    /// Reports the track geometry measured by the presentation layer.
    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    /// Feeds the caller's current value into a controlled slider. Returns
    /// `false` for uncontrolled sliders, which ignore it.
    pub fn sync_external(&mut self, value: V) -> bool {
        self.state.sync_external(value)
    }

    /// Handles one pointer event. Returns the value committed by it, if any.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<V> {
        match event {
            PointerEvent::Pressed {
                pointer_id,
                target,
                x,
            } => {
                let mut cx = DragContext {
                    state: &mut self.state,
                    geometry: self.geometry,
                    disabled: self.disabled,
                };
                let committed = self.drag.press(&mut cx, pointer_id, target, x);
                if committed.is_some() {
                    self.session_value = committed;
                }
                committed
            }
            PointerEvent::Moved { pointer_id, x } => {
                let mut cx = DragContext {
                    state: &mut self.state,
                    geometry: self.geometry,
                    disabled: self.disabled,
                };
                let committed = self.drag.move_to(&mut cx, pointer_id, x);
                if committed.is_some() {
                    self.session_value = committed;
                }
                committed
            }
            PointerEvent::Released { pointer_id } => {
                if self.drag.release(pointer_id).is_some() {
                    self.finish_session();
                }
                None
            }
            PointerEvent::Cancelled { pointer_id } => {
                if self.drag.cancel(pointer_id).is_some() {
                    self.finish_session();
                }
                None
            }
        }
    }

    /// Reports the last value the ended session committed. A controlled
    /// slider may not have been synced to it yet.
    fn finish_session(&mut self) {
        let value = self
            .session_value
            .take()
            .unwrap_or_else(|| self.state.current_value());
        self.on_change_finished.call(value);
    }

    /// Formats a handle value with the configured formatter.
    pub fn format(&self, value: f32) -> String {
        match &self.format_value {
            Some(format_value) => format_value.call(value),
            None => format!("{}%", self.domain().percent(value).round()),
        }
    }

    /// Snapshot for the presentation layer.
    pub fn presentation(&self) -> SliderPresentation<V> {
        let value = self.value();
        let domain = self.domain();
        let handles = V::HANDLES
            .iter()
            .filter_map(|&handle| {
                let handle_value = value.handle_value(handle)?;
                Some(HandlePresentation {
                    handle,
                    value: handle_value,
                    percent: domain.percent(handle_value),
                    label: self.format(handle_value),
                })
            })
            .collect();
        SliderPresentation {
            value,
            handles,
            fill: value.fill(domain),
            disabled: self.disabled,
            active_handle: self.active_handle(),
        }
    }

    /// Percent positions of the step grid, for stop indicators. Empty when
    /// the slider is unstepped or the grid is too dense to draw.
    pub fn tick_percents(&self) -> Vec<f32> {
        let domain = self.domain();
        match domain.step_count() {
            Some(count) if count > 0 && count <= MAX_TICKS => (0..=count)
                .map(|i| {
                    let value = (i as f32).mul_add(domain.step(), domain.min());
                    domain.percent(value.min(domain.max()))
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
