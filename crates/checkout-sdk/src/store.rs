//! # Default Checkout Store
//!
//! In-memory [`CheckoutStore`]. Applying an action produces a new state
//! snapshot (copy-on-write), so selectors handed out earlier keep observing
//! the state they were created from.

use checkout_core::{CheckoutAction, CheckoutSelectors, CheckoutState, CheckoutStore};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

#[derive(Debug, Default)]
pub struct DefaultCheckoutStore {
    state: RefCell<Rc<CheckoutState>>,
}

impl DefaultCheckoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state
    pub fn with_state(state: CheckoutState) -> Self {
        Self {
            state: RefCell::new(Rc::new(state)),
        }
    }
}

impl CheckoutStore for DefaultCheckoutStore {
    fn selectors(&self) -> CheckoutSelectors {
        CheckoutSelectors::new(Rc::clone(&self.state.borrow()))
    }

    fn apply(&self, action: CheckoutAction) {
        trace!(action = action.action_type(), "reducing");
        let mut state = self.state.borrow_mut();
        Rc::make_mut(&mut state).reduce(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{
        CheckoutError, FrozenCheckoutStoreSelector, FrozenErrorSelector, FrozenStatusSelector,
        ThunkAction,
    };

    #[test]
    fn test_snapshots_are_isolated() {
        let store = DefaultCheckoutStore::new();
        let before = store.selectors();

        store.apply(CheckoutAction::LoadCheckoutRequested);
        let during = store.selectors();

        assert!(!before.state().is_loading_checkout());
        assert!(during.state().is_loading_checkout());
        assert!(!before.same_snapshot(&during));
    }

    #[test]
    fn test_selectors_share_snapshot_until_next_action() {
        let store = DefaultCheckoutStore::new();

        assert!(store.selectors().same_snapshot(&store.selectors()));
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_recorded() {
        let store = DefaultCheckoutStore::new();
        let err = CheckoutError::Network("connection reset".into());

        let result = store
            .dispatch(ThunkAction::from_actions(
                "updateAddress",
                vec![
                    CheckoutAction::CreateConsignmentsRequested,
                    CheckoutAction::CreateConsignmentsFailed(err.clone()),
                ],
            ))
            .await;

        assert_eq!(result.unwrap_err(), err);
        let selectors = store.selectors();
        assert!(!selectors.state().is_creating_consignments());
        assert_eq!(selectors.state().create_consignments_error().as_deref(), Some(&err));
        assert!(selectors.state().consignments().is_empty());
    }
}
