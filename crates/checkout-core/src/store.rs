//! # Checkout Store
//!
//! Redux-style state for a checkout: actions, the reducer, selectors and the
//! dispatch capability.
//!
//! Selectors are only ever handed out through a [`FreezeProxy`], so every
//! checkout, consignment or address a caller reads is a frozen copy and the
//! store's own state cannot be changed from outside.
//!
//! ```text
//! ThunkAction ──run(selectors)──► Requested ──► Succeeded | Failed
//!                                     │               │
//!                                     └── reduce ─────┘──► new CheckoutState
//! ```

use crate::address::Address;
use crate::checkout::{Cart, Checkout, Customer};
use crate::consignment::{Consignment, ShippingOption};
use crate::error::{CheckoutError, CheckoutResult};
use crate::freeze::{create_freeze_proxy, FreezeProxy};
use async_trait::async_trait;
use futures::stream::{self, LocalBoxStream, StreamExt};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

// =============================================================================
// Actions
// =============================================================================

/// Actions understood by the checkout reducer
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutAction {
    LoadCheckoutRequested,
    LoadCheckoutSucceeded(Checkout),
    LoadCheckoutFailed(CheckoutError),

    CreateConsignmentsRequested,
    CreateConsignmentsSucceeded(Checkout),
    CreateConsignmentsFailed(CheckoutError),

    UpdateConsignmentRequested,
    UpdateConsignmentSucceeded(Checkout),
    UpdateConsignmentFailed(CheckoutError),

    UpdateShippingOptionRequested,
    UpdateShippingOptionSucceeded(Checkout),
    UpdateShippingOptionFailed(CheckoutError),
}

impl CheckoutAction {
    /// Stable action type name (for logging)
    pub fn action_type(&self) -> &'static str {
        match self {
            CheckoutAction::LoadCheckoutRequested => "LOAD_CHECKOUT_REQUESTED",
            CheckoutAction::LoadCheckoutSucceeded(_) => "LOAD_CHECKOUT_SUCCEEDED",
            CheckoutAction::LoadCheckoutFailed(_) => "LOAD_CHECKOUT_FAILED",
            CheckoutAction::CreateConsignmentsRequested => "CREATE_CONSIGNMENTS_REQUESTED",
            CheckoutAction::CreateConsignmentsSucceeded(_) => "CREATE_CONSIGNMENTS_SUCCEEDED",
            CheckoutAction::CreateConsignmentsFailed(_) => "CREATE_CONSIGNMENTS_FAILED",
            CheckoutAction::UpdateConsignmentRequested => "UPDATE_CONSIGNMENT_REQUESTED",
            CheckoutAction::UpdateConsignmentSucceeded(_) => "UPDATE_CONSIGNMENT_SUCCEEDED",
            CheckoutAction::UpdateConsignmentFailed(_) => "UPDATE_CONSIGNMENT_FAILED",
            CheckoutAction::UpdateShippingOptionRequested => "UPDATE_SHIPPING_OPTION_REQUESTED",
            CheckoutAction::UpdateShippingOptionSucceeded(_) => "UPDATE_SHIPPING_OPTION_SUCCEEDED",
            CheckoutAction::UpdateShippingOptionFailed(_) => "UPDATE_SHIPPING_OPTION_FAILED",
        }
    }

    /// The error carried by a failure action
    pub fn error(&self) -> Option<&CheckoutError> {
        match self {
            CheckoutAction::LoadCheckoutFailed(err)
            | CheckoutAction::CreateConsignmentsFailed(err)
            | CheckoutAction::UpdateConsignmentFailed(err)
            | CheckoutAction::UpdateShippingOptionFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// A deferred action: given a snapshot of the current selectors, produce the
/// stream of actions to apply (typically Requested, then Succeeded or Failed).
pub struct ThunkAction {
    name: &'static str,
    run: Box<dyn FnOnce(CheckoutSelectors) -> ActionStream>,
}

/// Stream of actions emitted by a [`ThunkAction`]
pub type ActionStream = LocalBoxStream<'static, CheckoutAction>;

impl ThunkAction {
    pub fn new(
        name: &'static str,
        run: impl FnOnce(CheckoutSelectors) -> ActionStream + 'static,
    ) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }

    /// A thunk that emits a fixed list of actions
    pub fn from_actions(name: &'static str, actions: Vec<CheckoutAction>) -> Self {
        Self::new(name, move |_| stream::iter(actions).boxed_local())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(self, selectors: CheckoutSelectors) -> ActionStream {
        (self.run)(selectors)
    }
}

impl fmt::Debug for ThunkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThunkAction").field("name", &self.name).finish()
    }
}

// =============================================================================
// State
// =============================================================================

/// In-flight request flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Statuses {
    loading_checkout: bool,
    creating_consignments: bool,
    updating_consignment: bool,
    updating_shipping_option: bool,
}

/// Last failure per request kind
#[derive(Debug, Clone, Default, PartialEq)]
struct Errors {
    load_checkout: Option<CheckoutError>,
    create_consignments: Option<CheckoutError>,
    update_consignment: Option<CheckoutError>,
    update_shipping_option: Option<CheckoutError>,
}

/// Checkout state. Only changed through [`CheckoutState::reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutState {
    checkout: Option<Checkout>,
    statuses: Statuses,
    errors: Errors,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action
    pub fn reduce(&mut self, action: CheckoutAction) {
        use CheckoutAction::*;

        match action {
            LoadCheckoutRequested => {
                self.statuses.loading_checkout = true;
                self.errors.load_checkout = None;
            }
            LoadCheckoutSucceeded(checkout) => {
                self.statuses.loading_checkout = false;
                self.checkout = Some(checkout);
            }
            LoadCheckoutFailed(err) => {
                self.statuses.loading_checkout = false;
                self.errors.load_checkout = Some(err);
            }

            CreateConsignmentsRequested => {
                self.statuses.creating_consignments = true;
                self.errors.create_consignments = None;
            }
            CreateConsignmentsSucceeded(checkout) => {
                self.statuses.creating_consignments = false;
                self.checkout = Some(checkout);
            }
            CreateConsignmentsFailed(err) => {
                self.statuses.creating_consignments = false;
                self.errors.create_consignments = Some(err);
            }

            UpdateConsignmentRequested => {
                self.statuses.updating_consignment = true;
                self.errors.update_consignment = None;
            }
            UpdateConsignmentSucceeded(checkout) => {
                self.statuses.updating_consignment = false;
                self.checkout = Some(checkout);
            }
            UpdateConsignmentFailed(err) => {
                self.statuses.updating_consignment = false;
                self.errors.update_consignment = Some(err);
            }

            UpdateShippingOptionRequested => {
                self.statuses.updating_shipping_option = true;
                self.errors.update_shipping_option = None;
            }
            UpdateShippingOptionSucceeded(checkout) => {
                self.statuses.updating_shipping_option = false;
                self.checkout = Some(checkout);
            }
            UpdateShippingOptionFailed(err) => {
                self.statuses.updating_shipping_option = false;
                self.errors.update_shipping_option = Some(err);
            }
        }
    }

    fn primary_consignment(&self) -> Option<&Consignment> {
        self.checkout.as_ref().and_then(Checkout::primary_consignment)
    }
}

// =============================================================================
// Selectors
// =============================================================================

/// Read access to checkout data
pub trait CheckoutStoreSelector {
    fn checkout(&self) -> Option<Checkout>;
    fn cart(&self) -> Option<Cart>;
    fn customer(&self) -> Option<Customer>;
    fn billing_address(&self) -> Option<Address>;
    fn consignments(&self) -> Vec<Consignment>;
    fn consignment(&self, id: &str) -> Option<Consignment>;
    fn shipping_address(&self) -> Option<Address>;
    fn shipping_options(&self) -> Vec<ShippingOption>;
    fn selected_shipping_option(&self) -> Option<ShippingOption>;
}

/// Read access to request statuses
pub trait StatusSelector {
    fn is_loading_checkout(&self) -> bool;
    fn is_creating_consignments(&self) -> bool;
    fn is_updating_consignment(&self) -> bool;
    fn is_updating_shipping_option(&self) -> bool;

    /// True while any request is in flight
    fn is_pending(&self) -> bool {
        self.is_loading_checkout()
            || self.is_creating_consignments()
            || self.is_updating_consignment()
            || self.is_updating_shipping_option()
    }
}

/// Read access to request errors
pub trait ErrorSelector {
    fn load_checkout_error(&self) -> Option<CheckoutError>;
    fn create_consignments_error(&self) -> Option<CheckoutError>;
    fn update_consignment_error(&self) -> Option<CheckoutError>;
    fn update_shipping_option_error(&self) -> Option<CheckoutError>;
}

impl CheckoutStoreSelector for CheckoutState {
    fn checkout(&self) -> Option<Checkout> {
        self.checkout.clone()
    }

    fn cart(&self) -> Option<Cart> {
        self.checkout.as_ref().map(|c| c.cart.clone())
    }

    fn customer(&self) -> Option<Customer> {
        self.checkout.as_ref().and_then(|c| c.customer.clone())
    }

    fn billing_address(&self) -> Option<Address> {
        self.checkout.as_ref().and_then(|c| c.billing_address.clone())
    }

    fn consignments(&self) -> Vec<Consignment> {
        self.checkout
            .as_ref()
            .map(|c| c.consignments.clone())
            .unwrap_or_default()
    }

    fn consignment(&self, id: &str) -> Option<Consignment> {
        self.checkout
            .as_ref()
            .and_then(|c| c.consignments.iter().find(|con| con.id == id).cloned())
    }

    fn shipping_address(&self) -> Option<Address> {
        self.primary_consignment().map(|c| c.shipping_address.clone())
    }

    fn shipping_options(&self) -> Vec<ShippingOption> {
        self.primary_consignment()
            .map(|c| c.available_shipping_options.clone())
            .unwrap_or_default()
    }

    fn selected_shipping_option(&self) -> Option<ShippingOption> {
        self.primary_consignment()
            .and_then(|c| c.selected_shipping_option.clone())
    }
}

impl StatusSelector for CheckoutState {
    fn is_loading_checkout(&self) -> bool {
        self.statuses.loading_checkout
    }

    fn is_creating_consignments(&self) -> bool {
        self.statuses.creating_consignments
    }

    fn is_updating_consignment(&self) -> bool {
        self.statuses.updating_consignment
    }

    fn is_updating_shipping_option(&self) -> bool {
        self.statuses.updating_shipping_option
    }
}

impl ErrorSelector for CheckoutState {
    fn load_checkout_error(&self) -> Option<CheckoutError> {
        self.errors.load_checkout.clone()
    }

    fn create_consignments_error(&self) -> Option<CheckoutError> {
        self.errors.create_consignments.clone()
    }

    fn update_consignment_error(&self) -> Option<CheckoutError> {
        self.errors.update_consignment.clone()
    }

    fn update_shipping_option_error(&self) -> Option<CheckoutError> {
        self.errors.update_shipping_option.clone()
    }
}

crate::freeze_proxy! {
    /// Frozen face of [`CheckoutStoreSelector`]
    pub trait FrozenCheckoutStoreSelector for CheckoutStoreSelector {
        fn checkout(&self) -> Option<Checkout>;
        fn cart(&self) -> Option<Cart>;
        fn customer(&self) -> Option<Customer>;
        fn billing_address(&self) -> Option<Address>;
        fn consignments(&self) -> Vec<Consignment>;
        fn consignment(&self, id: &str) -> Option<Consignment>;
        fn shipping_address(&self) -> Option<Address>;
        fn shipping_options(&self) -> Vec<ShippingOption>;
        fn selected_shipping_option(&self) -> Option<ShippingOption>;
    }
}

crate::freeze_proxy! {
    /// Frozen face of [`StatusSelector`]
    pub trait FrozenStatusSelector for StatusSelector {
        fn is_loading_checkout(&self) -> bool;
        fn is_creating_consignments(&self) -> bool;
        fn is_updating_consignment(&self) -> bool;
        fn is_updating_shipping_option(&self) -> bool;
        fn is_pending(&self) -> bool;
    }
}

crate::freeze_proxy! {
    /// Frozen face of [`ErrorSelector`]
    pub trait FrozenErrorSelector for ErrorSelector {
        fn load_checkout_error(&self) -> Option<CheckoutError>;
        fn create_consignments_error(&self) -> Option<CheckoutError>;
        fn update_consignment_error(&self) -> Option<CheckoutError>;
        fn update_shipping_option_error(&self) -> Option<CheckoutError>;
    }
}

/// Snapshot of the store handed to callers.
///
/// Holding a `CheckoutSelectors` keeps that snapshot alive; later dispatches
/// produce new snapshots and never change this one.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSelectors {
    state: Rc<CheckoutState>,
}

impl CheckoutSelectors {
    pub fn new(state: Rc<CheckoutState>) -> Self {
        Self { state }
    }

    /// Frozen view over the snapshot. Bring `FrozenCheckoutStoreSelector`,
    /// `FrozenStatusSelector` and `FrozenErrorSelector` into scope to read it.
    pub fn state(&self) -> FreezeProxy<'_, CheckoutState> {
        create_freeze_proxy(self.state.as_ref())
    }

    /// True if both selectors observe the same snapshot
    pub fn same_snapshot(&self, other: &CheckoutSelectors) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

// =============================================================================
// Store
// =============================================================================

/// Capability that owns checkout state and applies actions to it.
#[async_trait(?Send)]
pub trait CheckoutStore {
    /// Selectors over the current state
    fn selectors(&self) -> CheckoutSelectors;

    /// Apply a single action
    fn apply(&self, action: CheckoutAction);

    /// Run a thunk, applying each emitted action in order.
    ///
    /// Resolves with the selectors after the last action, or rejects with the
    /// error of the first failure action (which is still applied).
    async fn dispatch(&self, thunk: ThunkAction) -> CheckoutResult<CheckoutSelectors> {
        let name = thunk.name();
        let mut actions = thunk.run(self.selectors());

        while let Some(action) = actions.next().await {
            debug!(thunk = name, action = action.action_type(), "Applying action");
            let failure = action.error().cloned();
            self.apply(action);

            if let Some(err) = failure {
                warn!(thunk = name, error = %err, "Action failed");
                return Err(err);
            }
        }

        Ok(self.selectors())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freeze::{DeepFrozen, Frozen};
    use std::cell::RefCell;

    fn checkout() -> Checkout {
        serde_json::from_value(serde_json::json!({
            "id": "checkout-1",
            "cart": { "id": "checkout-1", "lineItems": { "physicalItems": [
                { "id": "item-1", "productId": 1, "name": "Mug", "quantity": 2 }
            ] } },
            "consignments": [{
                "id": "con-1",
                "shippingAddress": { "city": "Austin", "countryCode": "US" },
                "lineItemIds": ["item-1"],
                "availableShippingOptions": [
                    { "id": "opt-1", "description": "Ground", "cost": 5 }
                ],
                "selectedShippingOption": { "id": "opt-1", "description": "Ground", "cost": 5 }
            }]
        }))
        .unwrap()
    }

    #[derive(Default)]
    struct TestStore {
        state: RefCell<Rc<CheckoutState>>,
    }

    #[async_trait(?Send)]
    impl CheckoutStore for TestStore {
        fn selectors(&self) -> CheckoutSelectors {
            CheckoutSelectors::new(Rc::clone(&self.state.borrow()))
        }

        fn apply(&self, action: CheckoutAction) {
            let mut state = self.state.borrow_mut();
            Rc::make_mut(&mut state).reduce(action);
        }
    }

    fn assert_frozen<T: DeepFrozen>(_: &T) {}

    #[test]
    fn test_reducer_tracks_request_lifecycle() {
        let mut state = CheckoutState::new();

        state.reduce(CheckoutAction::LoadCheckoutRequested);
        assert!(state.is_loading_checkout());
        assert!(state.is_pending());

        state.reduce(CheckoutAction::LoadCheckoutSucceeded(checkout()));
        assert!(!state.is_loading_checkout());
        assert_eq!(state.checkout().unwrap().id, "checkout-1");

        state.reduce(CheckoutAction::UpdateConsignmentFailed(CheckoutError::Network(
            "reset".into(),
        )));
        assert_eq!(
            state.update_consignment_error(),
            Some(CheckoutError::Network("reset".into()))
        );

        state.reduce(CheckoutAction::UpdateConsignmentRequested);
        assert!(state.update_consignment_error().is_none());
        assert!(state.is_updating_consignment());
    }

    #[test]
    fn test_selectors_are_frozen() {
        let mut state = CheckoutState::new();
        state.reduce(CheckoutAction::LoadCheckoutSucceeded(checkout()));
        let selectors = CheckoutSelectors::new(Rc::new(state));

        let view = selectors.state();
        let checkout: Frozen<Checkout> = view.checkout().unwrap();
        let consignments = view.consignments();
        let address = view.shipping_address().unwrap();

        assert_frozen(&checkout);
        assert_frozen(&consignments);
        assert_frozen(&address);
        assert_eq!(consignments[0].id, "con-1");
        assert_eq!(address.city, "Austin");
        assert_eq!(view.selected_shipping_option().unwrap().id, "opt-1");
        assert_eq!(view.shipping_options().len(), 1);
        assert_eq!(view.consignment("con-1").unwrap().line_item_ids, vec!["item-1"]);
        assert!(view.consignment("con-2").is_none());

        // Primitive results pass straight through
        assert!(!view.is_pending());
        assert!(view.load_checkout_error().is_none());
    }

    #[tokio::test]
    async fn test_dispatch_applies_actions_in_order() {
        let store = TestStore::default();
        let before = store.selectors();

        let selectors = store
            .dispatch(ThunkAction::from_actions(
                "loadCheckout",
                vec![
                    CheckoutAction::LoadCheckoutRequested,
                    CheckoutAction::LoadCheckoutSucceeded(checkout()),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(selectors.state().checkout().unwrap().id, "checkout-1");
        assert!(!selectors.state().is_loading_checkout());
        // Earlier snapshots are unaffected
        assert!(before.state().checkout().is_none());
        assert!(!before.same_snapshot(&selectors));
    }

    #[tokio::test]
    async fn test_dispatch_rejects_with_failure_action() {
        let store = TestStore::default();
        let err = CheckoutError::RequestFailed {
            status: 500,
            message: "boom".into(),
        };

        let result = store
            .dispatch(ThunkAction::from_actions(
                "loadCheckout",
                vec![
                    CheckoutAction::LoadCheckoutRequested,
                    CheckoutAction::LoadCheckoutFailed(err.clone()),
                    CheckoutAction::LoadCheckoutSucceeded(checkout()),
                ],
            ))
            .await;

        assert_eq!(result.unwrap_err(), err);
        let view = store.selectors();
        assert_eq!(view.state().load_checkout_error().as_deref(), Some(&err));
        assert!(view.state().checkout().is_none());
    }
}
