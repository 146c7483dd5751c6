//! The navigator protocol. Each destination type is backed by a navigator
//! that knows how to show it and how to reverse that work, while the
//! controller owns the combined back stack.

mod graph;
mod provider;

pub use graph::{GraphNavigator, GRAPH_NAVIGATOR_NAME};
pub use provider::NavigatorProvider;

use std::rc::Rc;

use crate::error::Result;
use crate::model::{Bundle, NavDestination, NavOptions};

/// Opaque per-call extras a host can thread through to its navigator.
pub trait NavigatorExtras {}

pub trait Navigator {
    /// The name destinations use to select this navigator.
    fn name(&self) -> &str;

    /// Construct an unconfigured destination owned by this navigator.
    fn create_destination(&self) -> Rc<NavDestination>;

    /// Navigate to `destination`. Returns the destination a back stack entry
    /// should be created for, or `None` when the navigation was handled
    /// without adding to the back stack (launched externally, or a
    /// single-top reuse of the current top).
    fn navigate(
        &self,
        destination: &Rc<NavDestination>,
        args: Option<Bundle>,
        options: Option<&NavOptions>,
        extras: Option<&dyn NavigatorExtras>,
    ) -> Result<Option<Rc<NavDestination>>>;

    /// Attempt to reverse the most recent `navigate`. Returns false when
    /// there is nothing to pop or the host cannot honor it right now.
    fn pop_back_stack(&self, with_transition: bool) -> bool;

    /// Floating destinations (overlays) are layered above the previous
    /// destination rather than replacing it.
    fn is_floating(&self) -> bool {
        false
    }

    /// Snapshot navigator-private state for later [`Navigator::on_restore_state`].
    fn on_save_state(&self) -> Option<Bundle> {
        None
    }

    fn on_restore_state(&self, _saved_state: &Bundle) {}
}
