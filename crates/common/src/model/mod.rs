//! The destination graph data model: nodes, edges (actions), deep links,
//! and the typed argument bundles that travel with a navigation.

mod action;
mod argument;
mod bundle;
mod deep_link;
mod destination;
mod graph;
mod options;

pub use action::NavAction;
pub use argument::{NavArgument, NavType};
pub use bundle::{Bundle, NavValue};
pub use deep_link::{DeepLinkMatch, DeepLinkRequest, NavDeepLink};
pub use destination::{ActionId, DestinationId, NavDestination};
pub use options::{LaunchScreen, NavOptions, NavOptionsBuilder};

/// Format a destination id the way errors and logs refer to it.
pub(crate) fn display_name(id: DestinationId) -> String {
    format!("0x{id:x}")
}
