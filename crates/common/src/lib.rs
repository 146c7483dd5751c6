//! Shared navigation model: destinations, graphs, deep links, and the
//! navigator protocol used by `duonav-runtime`'s controller.

pub mod error;
pub mod lifecycle;
pub mod model;
pub mod navigator;

pub use error::{NavError, Result};
pub use lifecycle::{LifecycleEvent, LifecycleState};
pub use model::{
    ActionId, Bundle, DeepLinkMatch, DeepLinkRequest, DestinationId, LaunchScreen, NavAction,
    NavArgument, NavDeepLink, NavDestination, NavOptions, NavOptionsBuilder, NavType, NavValue,
};
pub use navigator::{
    GraphNavigator, Navigator, NavigatorExtras, NavigatorProvider, GRAPH_NAVIGATOR_NAME,
};
