//! Host-backed navigators for the three destination families: panes
//! (screen-filling content), overlays (floating windows), and cross-task
//! launches.

mod overlay;
mod pane;
mod task;

pub use overlay::{OverlayNavigator, OVERLAY_NAVIGATOR_NAME};
pub use pane::{PaneNavigator, PANE_NAVIGATOR_NAME};
pub use task::{TaskNavigator, TASK_NAVIGATOR_NAME};

use duonav_common::{LaunchScreen, NavDestination, NavOptions};

/// The launch screen a transition should target: the per-call option wins
/// unless it is `Default`, in which case the destination's own setting
/// applies.
fn effective_launch_screen(
    destination: &NavDestination,
    options: Option<&NavOptions>,
) -> LaunchScreen {
    match options.map(|o| o.launch_screen()) {
        Some(LaunchScreen::Default) | None => destination.launch_screen(),
        Some(screen) => screen,
    }
}
