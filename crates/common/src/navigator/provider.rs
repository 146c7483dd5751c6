use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::error::{NavError, Result};
use crate::navigator::Navigator;

/// Registry mapping navigator names to navigator instances. Destinations
/// carry the name of the navigator that owns them; the controller resolves
/// names through the provider at navigation time.
#[derive(Default)]
pub struct NavigatorProvider {
    navigators: RefCell<HashMap<String, Rc<dyn Navigator>>>,
}

impl NavigatorProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `navigator` under its own name, returning the navigator it
    /// replaced, if any.
    pub fn add_navigator(&self, navigator: Rc<dyn Navigator>) -> Result<Option<Rc<dyn Navigator>>> {
        let name = navigator.name().to_owned();
        if name.is_empty() {
            return Err(NavError::invalid_argument(
                "navigator must have a non-empty name",
            ));
        }
        debug!(name = %name, "registering navigator");
        Ok(self.navigators.borrow_mut().insert(name, navigator))
    }

    /// Look up a navigator by name. Registration must happen before any
    /// destination using the name is navigated to.
    pub fn get_navigator(&self, name: &str) -> Result<Rc<dyn Navigator>> {
        self.navigators.borrow().get(name).cloned().ok_or_else(|| {
            NavError::invalid_state(format!(
                "could not find navigator with name \"{name}\"; you must call add_navigator() before using it"
            ))
        })
    }

    /// Registered names paired with their navigators, for state save and
    /// restore keyed by name.
    pub fn navigators(&self) -> Vec<(String, Rc<dyn Navigator>)> {
        self.navigators
            .borrow()
            .iter()
            .map(|(name, nav)| (name.clone(), nav.clone()))
            .collect()
    }
}
