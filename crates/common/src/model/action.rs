use crate::model::bundle::Bundle;
use crate::model::destination::DestinationId;
use crate::model::options::NavOptions;

/// An edge in the navigation graph: a level of indirection between calling
/// code and a concrete destination, so the same action id can lead somewhere
/// different depending on the current destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavAction {
    destination_id: DestinationId,
    nav_options: Option<NavOptions>,
    default_arguments: Option<Bundle>,
}

impl NavAction {
    pub fn new(destination_id: DestinationId) -> Self {
        NavAction { destination_id, nav_options: None, default_arguments: None }
    }

    pub fn with_options(mut self, nav_options: NavOptions) -> Self {
        self.nav_options = Some(nav_options);
        self
    }

    pub fn with_default_arguments(mut self, args: Bundle) -> Self {
        self.default_arguments = Some(args);
        self
    }

    pub fn destination_id(&self) -> DestinationId {
        self.destination_id
    }

    pub fn nav_options(&self) -> Option<&NavOptions> {
        self.nav_options.as_ref()
    }

    pub fn default_arguments(&self) -> Option<&Bundle> {
        self.default_arguments.as_ref()
    }
}
