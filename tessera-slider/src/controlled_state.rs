//! Ownership of the authoritative slider value.
//!
//! A slider is either *controlled*, when the caller supplied a value and keeps
//! it up to date, or *uncontrolled*, when the slider keeps its own copy. The
//! choice is made once in [`ControlledState::new`] and never re-evaluated.
//!
//! [`ControlledState::commit`] is the only way a value changes. It constrains
//! the candidate to the domain, stores it when the slider owns the value, and
//! always forwards the final value to the change callback.

use tracing::{debug, warn};

use crate::{prop::CallbackWith, slider::SliderValue, value_model::Domain};

/// Who holds the authoritative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The caller owns the value and feeds it back through
    /// [`ControlledState::sync_external`].
    Controlled,
    /// The slider owns the value.
    Uncontrolled,
}

#[derive(Debug, Clone, Copy)]
enum Store<V> {
    Controlled { external: V },
    Uncontrolled { internal: V },
}

/// Value store plus change notification for one slider instance.
#[derive(Debug)]
pub struct ControlledState<V> {
    domain: Domain,
    store: Store<V>,
    on_change: CallbackWith<V>,
}

impl<V: SliderValue> ControlledState<V> {
    /// Creates the store.
    ///
    /// Supplying `value` makes the state controlled. Otherwise it starts from
    /// `default_value`, or from the variant's initial value when that is
    /// absent too.
    pub fn new(
        domain: Domain,
        value: Option<V>,
        default_value: Option<V>,
        on_change: CallbackWith<V>,
    ) -> Self {
        let store = match value {
            Some(external) => Store::Controlled {
                external: external.constrain(&domain),
            },
            None => Store::Uncontrolled {
                internal: default_value
                    .map(|v| v.constrain(&domain))
                    .unwrap_or_else(|| V::initial(&domain)),
            },
        };
        Self {
            domain,
            store,
            on_change,
        }
    }

    /// Domain every committed value is constrained to.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Ownership mode chosen at construction.
    pub fn ownership(&self) -> Ownership {
        match self.store {
            Store::Controlled { .. } => Ownership::Controlled,
            Store::Uncontrolled { .. } => Ownership::Uncontrolled,
        }
    }

    /// The value to display: the caller's value when controlled, otherwise
    /// the internal one.
    pub fn current_value(&self) -> V {
        match self.store {
            Store::Controlled { external } => external,
            Store::Uncontrolled { internal } => internal,
        }
    }

    /// Constrains `raw` to the domain, stores it when uncontrolled and
    /// notifies the change callback. Returns the committed value.
    pub fn commit(&mut self, raw: V) -> V {
        let value = raw.constrain(&self.domain);
        if let Store::Uncontrolled { internal } = &mut self.store {
            *internal = value;
        }
        self.on_change.call(value);
        value
    }

    /// Accepts a new caller-supplied value for a controlled slider.
    ///
    /// Uncontrolled sliders keep their own value; the call is ignored and
    /// `false` is returned.
    pub fn sync_external(&mut self, value: V) -> bool {
        match &mut self.store {
            Store::Controlled { external } => {
                *external = value.constrain(&self.domain);
                debug!(value = ?external, "external slider value synced");
                true
            }
            Store::Uncontrolled { .. } => {
                warn!(
                    value = ?value,
                    "ignoring external value for an uncontrolled slider; ownership is fixed at construction"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::range_policy::RangeValue;

    fn recorder<V: Send + 'static>() -> (CallbackWith<V>, Arc<Mutex<Vec<V>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let callback = CallbackWith::new({
            let log = log.clone();
            move |v| log.lock().push(v)
        });
        (callback, log)
    }

    #[test]
    fn test_uncontrolled_commit_updates_store_and_notifies() {
        let (on_change, log) = recorder::<f32>();
        let mut state = ControlledState::new(Domain::default(), None, Some(30.0), on_change);
        assert_eq!(state.ownership(), Ownership::Uncontrolled);
        assert_eq!(state.current_value(), 30.0);

        assert_eq!(state.commit(55.0), 55.0);
        assert_eq!(state.current_value(), 55.0);
        assert_eq!(*log.lock(), vec![55.0]);
    }

    #[test]
    fn test_controlled_commit_only_notifies() {
        let (on_change, log) = recorder::<f32>();
        let mut state = ControlledState::new(Domain::default(), Some(10.0), None, on_change);
        assert_eq!(state.ownership(), Ownership::Controlled);

        state.commit(70.0);
        assert_eq!(state.current_value(), 10.0);
        assert_eq!(*log.lock(), vec![70.0]);

        assert!(state.sync_external(70.0));
        assert_eq!(state.current_value(), 70.0);
    }

    #[test]
    fn test_commit_clamps_single_value() {
        let (on_change, log) = recorder::<f32>();
        let mut state = ControlledState::new(Domain::default(), None, None, on_change);
        assert_eq!(state.current_value(), 0.0);
        assert_eq!(state.commit(140.0), 100.0);
        assert_eq!(state.commit(-3.0), 0.0);
        assert_eq!(*log.lock(), vec![100.0, 0.0]);
    }

    #[test]
    fn test_range_defaults_and_ordering() {
        let domain = Domain::new(-10.0, 10.0, 1.0).expect("valid domain");
        let (on_change, log) = recorder::<RangeValue>();
        let mut state = ControlledState::new(domain, None, None, on_change);
        assert_eq!(state.current_value(), RangeValue::new(-10.0, 10.0));

        let committed = state.commit(RangeValue {
            start: 25.0,
            end: -40.0,
        });
        assert!(committed.start <= committed.end);
        assert_eq!(committed, RangeValue::new(-10.0, 10.0));
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn test_uncontrolled_ignores_external_value() {
        let (on_change, log) = recorder::<f32>();
        let mut state = ControlledState::new(Domain::default(), None, Some(40.0), on_change);
        assert!(!state.sync_external(90.0));
        assert_eq!(state.current_value(), 40.0);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_controlled_value_is_constrained_for_display() {
        let (on_change, _) = recorder::<f32>();
        let state = ControlledState::new(Domain::default(), Some(250.0), None, on_change);
        assert_eq!(state.current_value(), 100.0);
    }
}
