use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use duonav_common::{
    Bundle, DestinationId, NavDestination, NavError, NavOptions, Navigator, NavigatorExtras,
    Result,
};

use crate::host::{PaneHost, PaneTransaction};
use crate::navigators::effective_launch_screen;

pub const PANE_NAVIGATOR_NAME: &str = "pane";

const KEY_BACK_STACK_IDS: &str = "duonav-pane:navigator:backStackIds";

/// Navigator for screen-filling pane destinations. Keeps a private stack of
/// destination ids mirroring the transactions it has handed to the host, and
/// declines any work once the host reports saved state.
pub struct PaneNavigator {
    host: Rc<dyn PaneHost>,
    back_stack: RefCell<Vec<DestinationId>>,
}

impl PaneNavigator {
    pub fn new(host: Rc<dyn PaneHost>) -> Self {
        Self {
            host,
            back_stack: RefCell::new(Vec::new()),
        }
    }
}

impl Navigator for PaneNavigator {
    fn name(&self) -> &str {
        PANE_NAVIGATOR_NAME
    }

    fn create_destination(&self) -> Rc<NavDestination> {
        NavDestination::new(PANE_NAVIGATOR_NAME)
    }

    fn navigate(
        &self,
        destination: &Rc<NavDestination>,
        args: Option<Bundle>,
        options: Option<&NavOptions>,
        _extras: Option<&dyn NavigatorExtras>,
    ) -> Result<Option<Rc<NavDestination>>> {
        if self.host.is_state_saved() {
            info!(
                destination = %destination.display_id(),
                "ignoring navigate() call: pane host has already saved its state"
            );
            return Ok(None);
        }
        let component = destination.component().ok_or_else(|| {
            NavError::invalid_state(format!(
                "pane destination {destination} does not have a component set"
            ))
        })?;
        let dest_id = destination.id();
        let mut back_stack = self.back_stack.borrow_mut();
        let single_top_replacement = options.is_some_and(|o| o.should_launch_single_top())
            && back_stack.last() == Some(&dest_id);
        let transaction = PaneTransaction {
            destination_id: dest_id,
            component,
            args,
            launch_screen: effective_launch_screen(destination, options),
            with_transition: true,
        };
        if single_top_replacement {
            self.host.replace_top(transaction);
            Ok(None)
        } else {
            self.host.push(transaction);
            back_stack.push(dest_id);
            Ok(Some(destination.clone()))
        }
    }

    fn pop_back_stack(&self, with_transition: bool) -> bool {
        let mut back_stack = self.back_stack.borrow_mut();
        if back_stack.is_empty() {
            return false;
        }
        if self.host.is_state_saved() {
            info!("ignoring pop_back_stack() call: pane host has already saved its state");
            return false;
        }
        self.host.pop(with_transition);
        back_stack.pop();
        true
    }

    fn on_save_state(&self) -> Option<Bundle> {
        let back_stack = self.back_stack.borrow();
        if back_stack.is_empty() {
            return None;
        }
        let ids = back_stack
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let mut bundle = Bundle::new();
        bundle.put_str(KEY_BACK_STACK_IDS, ids);
        Some(bundle)
    }

    fn on_restore_state(&self, saved_state: &Bundle) {
        let Some(ids) = saved_state.get_str(KEY_BACK_STACK_IDS) else {
            return;
        };
        let mut back_stack = self.back_stack.borrow_mut();
        back_stack.clear();
        back_stack.extend(ids.split(',').filter_map(|id| id.parse::<DestinationId>().ok()));
    }
}
