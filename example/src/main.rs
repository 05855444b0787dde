//! Drives a single and a range slider through scripted pointer and keyboard
//! input and logs every commit. Set `RUST_LOG=tessera_slider=trace` to see the
//! engine's own spans.

use std::error::Error;

use tessera_slider::{
    Handle, PointerEvent, PressTarget, RangeSlider, RangeValue, SingleSlider, SliderArgs,
    SliderKey, TrackGeometry, pointer_capture::PointerId,
};
use tracing::info;

const TRACK_X: f32 = 24.0;
const TRACK_WIDTH: f32 = 320.0;
const HANDLE_WIDTH: f32 = 16.0;
const HANDLE_GAP: f32 = 4.0;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,tessera_slider=debug") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

fn drag(pointer_id: PointerId, target: PressTarget, path: &[f32]) -> Vec<PointerEvent> {
    let Some((&first, rest)) = path.split_first() else {
        return Vec::new();
    };
    let mut events = vec![PointerEvent::Pressed {
        pointer_id,
        target,
        x: first,
    }];
    events.extend(rest.iter().map(|&x| PointerEvent::Moved { pointer_id, x }));
    events.push(PointerEvent::Released { pointer_id });
    events
}

fn volume_demo(geometry: TrackGeometry) -> Result<(), Box<dyn Error>> {
    let mut volume = SingleSlider::new(
        &SliderArgs::default()
            .step(5.0)
            .default_value(40.0)
            .accessibility_label("Volume")
            .on_change(|value: f32| info!(value, "volume changed"))
            .on_change_finished(|value: f32| info!(value, "volume settled")),
    )?;
    volume.set_geometry(geometry);

    let start = volume.geometry().x_for_value(volume.value(), volume.domain());
    let path = [start, start + 40.0, start + 95.0, TRACK_X + TRACK_WIDTH + 50.0];
    for event in drag(PointerId(1), PressTarget::Handle(Handle::Single), &path) {
        volume.handle_pointer_event(event);
    }

    volume.key(Handle::Single, SliderKey::PageDown);
    for control in volume.handle_controls() {
        info!(key = control.key(), value_text = %control.value_text, "accessibility");
    }
    info!(presentation = ?volume.presentation(), "volume slider");
    Ok(())
}

fn price_demo(geometry: TrackGeometry) -> Result<(), Box<dyn Error>> {
    let mut committed = RangeValue::new(200.0, 800.0);
    let mut price = RangeSlider::new(
        &SliderArgs::default()
            .min(0.0)
            .max(1000.0)
            .step(50.0)
            .value(committed)
            .accessibility_description("Price filter")
            .format_value(|value| format!("${value:.0}"))
            .on_change(|range: RangeValue| info!(?range, "price requested")),
    )?;
    price.set_geometry(geometry);

    // A controlled slider shows what the caller feeds back, so every commit
    // is echoed through sync_external.
    let track_click = geometry.x_for_value(100.0, price.domain());
    let end = geometry.x_for_value(committed.end, price.domain());
    let scripts = [
        drag(PointerId(2), PressTarget::Track, &[track_click]),
        drag(PointerId(3), PressTarget::Handle(Handle::End), &[end, track_click]),
    ];
    for event in scripts.into_iter().flatten() {
        if let Some(range) = price.handle_pointer_event(event) {
            committed = range;
            price.sync_external(committed);
        }
    }

    if let Some(range) = price.key(Handle::End, SliderKey::End) {
        price.sync_external(range);
    }
    let presentation = price.presentation();
    for handle in &presentation.handles {
        info!(handle = handle.handle.as_str(), label = %handle.label, percent = handle.percent, "price handle");
    }
    info!(
        variant = ?price.variant(),
        width = presentation.value.len(),
        collapsed = presentation.value.is_empty(),
        ticks = price.tick_percents().len(),
        fill = ?presentation.fill,
        "price slider"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let geometry = TrackGeometry::from_component(TRACK_X, TRACK_WIDTH, HANDLE_WIDTH, HANDLE_GAP);
    volume_demo(geometry)?;
    price_demo(geometry)?;
    Ok(())
}
