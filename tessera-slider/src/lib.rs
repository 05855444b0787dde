//! Headless slider engine for tessera-ui.
//!
//! Owns everything a slider does except drawing it: the value domain and
//! step grid, drag sessions driven by pointer events, ordering of the two
//! handles of a range slider, and the controlled/uncontrolled value contract.
//! A presentation layer reports track geometry, forwards input and renders
//! from [`Slider::presentation`].
//!
//! # Example
//!
//! ```
//! use tessera_slider::{
//!     Handle, PointerEvent, PressTarget, RangeSlider, RangeValue, SliderArgs, TrackGeometry,
//!     pointer_capture::PointerId,
//! };
//!
//! let mut slider = RangeSlider::new(
//!     &SliderArgs::default()
//!         .step(5.0)
//!         .default_value(RangeValue::new(20.0, 80.0))
//!         .on_change(|range: RangeValue| println!("{} - {}", range.start, range.end)),
//! )?;
//! slider.set_geometry(TrackGeometry::new(0.0, 200.0));
//!
//! let pointer_id = PointerId(1);
//! slider.handle_pointer_event(PointerEvent::Pressed {
//!     pointer_id,
//!     target: PressTarget::Handle(Handle::End),
//!     x: 160.0,
//! });
//! slider.handle_pointer_event(PointerEvent::Moved { pointer_id, x: 121.0 });
//! slider.handle_pointer_event(PointerEvent::Released { pointer_id });
//!
//! assert_eq!(slider.value(), RangeValue::new(20.0, 60.0));
//! # Ok::<(), tessera_slider::SliderError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod controlled_state;
pub mod drag;
pub mod error;
pub mod pointer_capture;
pub mod prop;
pub mod range_policy;
pub mod slider;
pub mod value_model;

pub use crate::{
    controlled_state::{ControlledState, Ownership},
    drag::{DragController, Handle, PointerEvent, PressTarget},
    error::SliderError,
    prop::CallbackWith,
    range_policy::RangeValue,
    slider::{
        HandleControl, HandlePresentation, RangeSlider, SingleSlider, Slider, SliderArgs, SliderId,
        SliderKey, SliderPresentation, SliderValue, SliderVariant, TrackGeometry,
    },
    value_model::Domain,
};
