use std::rc::{Rc, Weak};

use crate::error::{NavError, Result};
use crate::model::{Bundle, NavDestination, NavOptions};
use crate::navigator::{Navigator, NavigatorExtras, NavigatorProvider};

pub const GRAPH_NAVIGATOR_NAME: &str = "navigation";

/// Navigator for graph destinations. Navigating to a graph forwards to its
/// start destination, resolved through the shared provider.
pub struct GraphNavigator {
    provider: Weak<NavigatorProvider>,
}

impl GraphNavigator {
    pub fn new(provider: &Rc<NavigatorProvider>) -> Self {
        Self {
            provider: Rc::downgrade(provider),
        }
    }

    fn provider(&self) -> Result<Rc<NavigatorProvider>> {
        self.provider
            .upgrade()
            .ok_or_else(|| NavError::invalid_state("navigator provider is no longer available"))
    }
}

impl Navigator for GraphNavigator {
    fn name(&self) -> &str {
        GRAPH_NAVIGATOR_NAME
    }

    fn create_destination(&self) -> Rc<NavDestination> {
        NavDestination::new_graph(GRAPH_NAVIGATOR_NAME)
    }

    fn navigate(
        &self,
        destination: &Rc<NavDestination>,
        args: Option<Bundle>,
        options: Option<&NavOptions>,
        extras: Option<&dyn NavigatorExtras>,
    ) -> Result<Option<Rc<NavDestination>>> {
        let start_id = destination.start_destination();
        if start_id == 0 {
            return Err(NavError::invalid_state(format!(
                "no start destination defined via set_start_destination() for {destination}"
            )));
        }
        let start = destination.find_node_scoped(start_id).ok_or_else(|| {
            NavError::invalid_argument(format!(
                "navigation destination {} is not a direct child of this graph ({destination})",
                crate::model::display_name(start_id)
            ))
        })?;
        let navigator = self.provider()?.get_navigator(start.navigator_name())?;
        navigator.navigate(&start, args, options, extras)
    }

    fn pop_back_stack(&self, _with_transition: bool) -> bool {
        // Graph entries hold no navigator-side state of their own.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct RecordingNavigator {
        navigations: Cell<u32>,
    }

    impl Navigator for RecordingNavigator {
        fn name(&self) -> &str {
            "pane"
        }

        fn create_destination(&self) -> Rc<NavDestination> {
            NavDestination::new("pane")
        }

        fn navigate(
            &self,
            destination: &Rc<NavDestination>,
            _args: Option<Bundle>,
            _options: Option<&NavOptions>,
            _extras: Option<&dyn NavigatorExtras>,
        ) -> Result<Option<Rc<NavDestination>>> {
            self.navigations.set(self.navigations.get() + 1);
            Ok(Some(destination.clone()))
        }

        fn pop_back_stack(&self, _with_transition: bool) -> bool {
            true
        }
    }

    fn provider_with_pane() -> (Rc<NavigatorProvider>, Rc<RecordingNavigator>) {
        let provider = Rc::new(NavigatorProvider::new());
        let pane = Rc::new(RecordingNavigator {
            navigations: Cell::new(0),
        });
        provider.add_navigator(pane.clone()).unwrap();
        (provider, pane)
    }

    #[test]
    fn navigate_forwards_to_start_destination() {
        let (provider, pane) = provider_with_pane();
        let graph_nav = GraphNavigator::new(&provider);
        let graph = graph_nav.create_destination();
        graph.set_id(1);
        let home = pane.create_destination();
        home.set_id(2);
        graph.add_destination(home.clone()).unwrap();
        graph.set_start_destination(2).unwrap();

        let resolved = graph_nav.navigate(&graph, None, None, None).unwrap();
        assert!(Rc::ptr_eq(&resolved.unwrap(), &home));
        assert_eq!(pane.navigations.get(), 1);
    }

    #[test]
    fn missing_start_destination_is_an_error() {
        let (provider, _pane) = provider_with_pane();
        let graph_nav = GraphNavigator::new(&provider);
        let graph = graph_nav.create_destination();
        graph.set_id(1);
        let err = graph_nav.navigate(&graph, None, None, None).unwrap_err();
        assert!(matches!(err, NavError::InvalidState(_)));
    }

    #[test]
    fn start_destination_must_be_a_direct_child() {
        let (provider, pane) = provider_with_pane();
        let graph_nav = GraphNavigator::new(&provider);
        let root = graph_nav.create_destination();
        root.set_id(1);
        let nested = graph_nav.create_destination();
        nested.set_id(2);
        let leaf = pane.create_destination();
        leaf.set_id(3);
        root.add_destination(leaf).unwrap();
        root.add_destination(nested.clone()).unwrap();
        // 3 resolves through the parent, but it is not nested's own child.
        nested.set_start_destination(3).unwrap();

        let err = graph_nav.navigate(&nested, None, None, None).unwrap_err();
        assert!(matches!(err, NavError::InvalidArgument(_)));
    }
}
