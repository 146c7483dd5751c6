use serde::{Deserialize, Serialize};

use crate::model::destination::DestinationId;

/// Which physical pane a destination should open on when the device exposes
/// two. `Default` defers to the destination's own declaration, and finally to
/// the host's current layout policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchScreen {
    #[default]
    Default,
    Start,
    End,
    Both,
}

/// Options attached to a single navigation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavOptions {
    single_top: bool,
    pop_up_to: Option<DestinationId>,
    pop_up_to_inclusive: bool,
    launch_screen: LaunchScreen,
}

impl NavOptions {
    pub fn builder() -> NavOptionsBuilder {
        NavOptionsBuilder::default()
    }

    /// Whether an instance already on top of the stack should be reused
    /// (arguments replaced in place) instead of pushing a duplicate.
    pub fn should_launch_single_top(&self) -> bool {
        self.single_top
    }

    /// The destination to pop the stack to before navigating, if any.
    pub fn pop_up_to(&self) -> Option<DestinationId> {
        self.pop_up_to
    }

    pub fn is_pop_up_to_inclusive(&self) -> bool {
        self.pop_up_to_inclusive
    }

    pub fn launch_screen(&self) -> LaunchScreen {
        self.launch_screen
    }
}

#[derive(Debug, Default)]
pub struct NavOptionsBuilder {
    single_top: bool,
    pop_up_to: Option<DestinationId>,
    pop_up_to_inclusive: bool,
    launch_screen: LaunchScreen,
}

impl NavOptionsBuilder {
    pub fn launch_single_top(mut self, single_top: bool) -> Self {
        self.single_top = single_top;
        self
    }

    pub fn pop_up_to(mut self, destination_id: DestinationId, inclusive: bool) -> Self {
        self.pop_up_to = Some(destination_id);
        self.pop_up_to_inclusive = inclusive;
        self
    }

    pub fn launch_screen(mut self, launch_screen: LaunchScreen) -> Self {
        self.launch_screen = launch_screen;
        self
    }

    pub fn build(self) -> NavOptions {
        NavOptions {
            single_top: self.single_top,
            pop_up_to: self.pop_up_to,
            pop_up_to_inclusive: self.pop_up_to_inclusive,
            launch_screen: self.launch_screen,
        }
    }
}
