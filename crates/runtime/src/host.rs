//! Collaborator traits implemented by the embedding host. The controller and
//! navigators never touch windows or panes directly; everything presentation
//! side goes through these seams, which also keeps the state machine fully
//! testable with in-memory doubles.

use duonav_common::{Bundle, DestinationId, LaunchScreen};

use crate::intent::{LaunchIntent, TaskIntent};

/// The overall hosting window.
pub trait NavHost {
    /// The intent this host was launched with, consulted once per controller
    /// for automatic deep-link handling.
    fn launch_intent(&self) -> Option<LaunchIntent>;

    /// Start a synthetic task stack, bottom first.
    fn start_task_stack(&self, stack: &[LaunchIntent]);

    /// Finish the hosting window.
    fn finish(&self);
}

/// One pane transaction handed to a [`PaneHost`]. The fold state decides how
/// `launch_screen` maps onto physical panes; that mapping lives entirely on
/// the host side.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneTransaction {
    pub destination_id: DestinationId,
    pub component: String,
    pub args: Option<Bundle>,
    pub launch_screen: LaunchScreen,
    pub with_transition: bool,
}

/// Pane-transaction collaborator for the pane navigator.
pub trait PaneHost {
    /// Once the host has saved its state it can no longer accept
    /// transactions; navigators must decline instead of queueing.
    fn is_state_saved(&self) -> bool;

    fn push(&self, transaction: PaneTransaction);

    /// Replace the current top pane without growing the host's stack.
    fn replace_top(&self, transaction: PaneTransaction);

    fn pop(&self, with_transition: bool);
}

/// Floating-window collaborator for the overlay navigator.
pub trait OverlayHost {
    fn is_state_saved(&self) -> bool;

    fn show(&self, component: &str, args: Option<&Bundle>);

    fn dismiss(&self);
}

/// Cross-task collaborator for the task navigator.
pub trait TaskHost {
    fn start_task(&self, intent: TaskIntent);

    fn finish(&self);
}
