use std::cell::Cell;
use std::rc::Rc;

use tracing::info;

use duonav_common::{
    Bundle, NavDestination, NavError, NavOptions, Navigator, NavigatorExtras, Result,
};

use crate::host::OverlayHost;

pub const OVERLAY_NAVIGATOR_NAME: &str = "overlay";

const KEY_OVERLAY_COUNT: &str = "duonav-overlay:navigator:count";

/// Navigator for floating overlay destinations. Overlays stack on top of
/// whatever is beneath them, so this navigator is tagged floating and only
/// tracks how many overlays it is currently showing.
pub struct OverlayNavigator {
    host: Rc<dyn OverlayHost>,
    count: Cell<i64>,
}

impl OverlayNavigator {
    pub fn new(host: Rc<dyn OverlayHost>) -> Self {
        Self {
            host,
            count: Cell::new(0),
        }
    }
}

impl Navigator for OverlayNavigator {
    fn name(&self) -> &str {
        OVERLAY_NAVIGATOR_NAME
    }

    fn create_destination(&self) -> Rc<NavDestination> {
        NavDestination::new(OVERLAY_NAVIGATOR_NAME)
    }

    fn is_floating(&self) -> bool {
        true
    }

    fn navigate(
        &self,
        destination: &Rc<NavDestination>,
        args: Option<Bundle>,
        _options: Option<&NavOptions>,
        _extras: Option<&dyn NavigatorExtras>,
    ) -> Result<Option<Rc<NavDestination>>> {
        if self.host.is_state_saved() {
            info!(
                destination = %destination.display_id(),
                "ignoring navigate() call: overlay host has already saved its state"
            );
            return Ok(None);
        }
        let component = destination.component().ok_or_else(|| {
            NavError::invalid_state(format!(
                "overlay destination {destination} does not have a component set"
            ))
        })?;
        self.host.show(&component, args.as_ref());
        self.count.set(self.count.get() + 1);
        Ok(Some(destination.clone()))
    }

    fn pop_back_stack(&self, _with_transition: bool) -> bool {
        if self.count.get() == 0 {
            return false;
        }
        if self.host.is_state_saved() {
            info!("ignoring pop_back_stack() call: overlay host has already saved its state");
            return false;
        }
        self.host.dismiss();
        self.count.set(self.count.get() - 1);
        true
    }

    fn on_save_state(&self) -> Option<Bundle> {
        if self.count.get() == 0 {
            return None;
        }
        let mut bundle = Bundle::new();
        bundle.put_int(KEY_OVERLAY_COUNT, self.count.get());
        Some(bundle)
    }

    fn on_restore_state(&self, saved_state: &Bundle) {
        if let Some(count) = saved_state.get_int(KEY_OVERLAY_COUNT) {
            self.count.set(count);
        }
    }
}
