//! The navigation runtime: the back-stack controller, host-backed
//! navigators, deep-link task-stack building, and saved-state persistence
//! on top of the `duonav-common` model.

pub mod controller;
pub mod deep_link_builder;
pub mod entry;
pub mod host;
pub mod intent;
pub mod logging;
pub mod navigators;
pub mod saved_state;

pub use controller::{NavController, OnDestinationChangedListener};
pub use deep_link_builder::NavDeepLinkBuilder;
pub use entry::{NavBackStackEntry, ScopeStore};
pub use host::{NavHost, OverlayHost, PaneHost, PaneTransaction, TaskHost};
pub use intent::{IntentFlags, LaunchIntent, TaskIntent};
pub use navigators::{
    OverlayNavigator, PaneNavigator, TaskNavigator, OVERLAY_NAVIGATOR_NAME, PANE_NAVIGATOR_NAME,
    TASK_NAVIGATOR_NAME,
};
pub use saved_state::{SavedEntryState, SavedNavState};
