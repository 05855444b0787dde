use accesskit::{Action, ActionData, Node, Role};
use smallvec::SmallVec;
use tracing::debug;

use crate::drag::Handle;

use super::{Slider, SliderKey, SliderValue};

/// Assistive-technology view of one handle.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleControl {
    /// Handle described by this control.
    pub handle: Handle,
    /// Lowest value the handle can currently take.
    pub min: f32,
    /// Highest value the handle can currently take.
    pub max: f32,
    /// Increment, or `None` when the slider is unstepped.
    pub step: Option<f32>,
    /// Current value.
    pub value: f32,
    /// Formatted value read out instead of the raw number.
    pub value_text: String,
    /// Label shared by all handles of the slider.
    pub label: Option<String>,
    /// Description; range handles always say which end they are.
    pub description: Option<String>,
    /// Whether the control rejects input.
    pub disabled: bool,
}

impl HandleControl {
    /// Stable key identifying this control in an accessibility tree.
    pub fn key(&self) -> &'static str {
        match self.handle {
            Handle::Single => "slider_thumb",
            Handle::Start => "range_slider_start_thumb",
            Handle::End => "range_slider_end_thumb",
        }
    }

    /// Builds the AccessKit node for this control.
    pub fn to_accesskit_node(&self) -> Node {
        let mut node = Node::new(Role::Slider);
        if let Some(label) = &self.label {
            node.set_label(label.clone());
        }
        if let Some(description) = &self.description {
            node.set_description(description.clone());
        }
        node.set_value(self.value_text.clone());
        node.set_numeric_value(self.value as f64);
        node.set_min_numeric_value(self.min as f64);
        node.set_max_numeric_value(self.max as f64);
        if let Some(step) = self.step {
            node.set_numeric_value_step(step as f64);
        }
        if self.disabled {
            node.set_disabled();
        } else {
            node.add_action(Action::Focus);
            node.add_action(Action::Increment);
            node.add_action(Action::Decrement);
            node.add_action(Action::SetValue);
        }
        node
    }
}

fn handle_description(handle: Handle, description: Option<&str>) -> Option<String> {
    let fallback = match handle {
        Handle::Single => return description.map(str::to_owned),
        Handle::Start => "range start",
        Handle::End => "range end",
    };
    Some(
        description
            .map(|d| format!("{d} ({fallback})"))
            .unwrap_or_else(|| fallback.to_string()),
    )
}

impl<V: SliderValue> Slider<V> {
    /// One control per handle, in track order.
    pub fn handle_controls(&self) -> SmallVec<[HandleControl; 2]> {
        let value = self.value();
        let domain = self.domain();
        V::HANDLES
            .iter()
            .filter_map(|&handle| {
                let handle_value = value.handle_value(handle)?;
                let (min, max) = value.handle_bounds(handle, domain);
                Some(HandleControl {
                    handle,
                    min,
                    max,
                    step: domain.is_stepped().then(|| domain.step()),
                    value: handle_value,
                    value_text: self.format(handle_value),
                    label: self.accessibility_label.clone(),
                    description: handle_description(
                        handle,
                        self.accessibility_description.as_deref(),
                    ),
                    disabled: self.disabled,
                })
            })
            .collect()
    }

    /// Performs an assistive-technology action on `handle`. Returns the
    /// committed value, if any.
    pub fn accessibility_action(
        &mut self,
        handle: Handle,
        action: Action,
        data: Option<&ActionData>,
    ) -> Option<V> {
        if self.disabled {
            debug!(id = ?self.id, ?action, "slider disabled; accessibility action ignored");
            return None;
        }
        match action {
            Action::Increment => self.key(handle, SliderKey::Increment),
            Action::Decrement => self.key(handle, SliderKey::Decrement),
            Action::SetValue => match data {
                Some(ActionData::NumericValue(value)) => {
                    self.value().handle_value(handle)?;
                    self.commit_handle(handle, *value as f32)
                }
                _ => {
                    debug!(?data, "set value without a numeric payload");
                    None
                }
            },
            _ => None,
        }
    }
}
