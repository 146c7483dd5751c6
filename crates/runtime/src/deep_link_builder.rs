//! Builds synthetic task stacks for deep links, so an external entry point
//! can land on a deep destination with a sensible back stack behind it.

use std::rc::Rc;

use duonav_common::{Bundle, DestinationId, NavDestination, NavError, Result};

use crate::controller::NavController;
use crate::intent::{IntentFlags, LaunchIntent};

/// Fluent builder for deep-link launch intents. Configure the graph, one or
/// more destinations, and optional global arguments, then call
/// [`create_task_stack`](Self::create_task_stack).
#[derive(Default)]
pub struct NavDeepLinkBuilder {
    component: Option<String>,
    graph: Option<Rc<NavDestination>>,
    destinations: Vec<DestinationId>,
    arguments: Option<Bundle>,
}

impl NavDeepLinkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a live controller, adopting its graph.
    pub fn from_controller(controller: &NavController) -> Self {
        Self {
            component: None,
            graph: controller.try_graph().cloned(),
            destinations: Vec::new(),
            arguments: None,
        }
    }

    /// The host component the built intents should target.
    pub fn set_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn set_graph(mut self, graph: Rc<NavDestination>) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Replace the destination chain with a single destination.
    pub fn set_destination(mut self, destination_id: DestinationId) -> Self {
        self.destinations.clear();
        self.destinations.push(destination_id);
        self
    }

    /// Append a destination to the chain. Each destination contributes only
    /// the minimal path from the previous one.
    pub fn add_destination(mut self, destination_id: DestinationId) -> Self {
        self.destinations.push(destination_id);
        self
    }

    pub fn set_arguments(mut self, arguments: Bundle) -> Self {
        self.arguments = Some(arguments);
        self
    }

    fn resolve_ids(&self) -> Result<Vec<DestinationId>> {
        let graph = self
            .graph
            .as_ref()
            .ok_or_else(|| NavError::invalid_state("you must call set_graph() before building"))?;
        let mut ids = Vec::new();
        let mut previous: Option<Rc<NavDestination>> = None;
        for &dest_id in &self.destinations {
            let destination = find_in_graph(graph, dest_id).ok_or_else(|| {
                NavError::invalid_argument(format!(
                    "navigation destination 0x{dest_id:x} cannot be found in the navigation graph {graph}"
                ))
            })?;
            ids.extend(destination.build_deep_link_ids(previous.as_ref()));
            previous = Some(destination);
        }
        Ok(ids)
    }

    /// Build the launch-intent stack for this deep link, bottom first.
    pub fn create_task_stack(&self) -> Result<Vec<LaunchIntent>> {
        if self.destinations.is_empty() {
            return Err(NavError::invalid_state(
                "you must call set_destination() or add_destination() before building",
            ));
        }
        let ids = self.resolve_ids()?;
        let mut intent = match &self.component {
            Some(component) => LaunchIntent::new().with_action(format!("launch:{component}")),
            None => LaunchIntent::new(),
        };
        intent.add_flags(IntentFlags::NEW_TASK | IntentFlags::CLEAR_TASK);
        intent.set_deep_link(ids, self.arguments.clone());
        Ok(vec![intent])
    }

    /// A stable request code derived from the configured arguments and
    /// destination chain, for hosts that need to dedupe pending launches.
    pub fn request_code(&self) -> i32 {
        let mut code: i32 = 0;
        if let Some(arguments) = &self.arguments {
            for (key, value) in arguments.iter() {
                let mut entry_hash: i32 = 0;
                for byte in key.bytes().chain(format!("{value:?}").bytes()) {
                    entry_hash = entry_hash.wrapping_mul(31).wrapping_add(byte as i32);
                }
                code = code.wrapping_mul(31).wrapping_add(entry_hash);
            }
        }
        for &dest_id in &self.destinations {
            code = code.wrapping_mul(31).wrapping_add(dest_id as i32);
        }
        code
    }
}

/// Depth-first search for `id` anywhere under `graph`, the graph itself
/// included.
fn find_in_graph(graph: &Rc<NavDestination>, id: DestinationId) -> Option<Rc<NavDestination>> {
    if graph.id() == id {
        return Some(graph.clone());
    }
    let mut pending = graph.children();
    while let Some(node) = pending.pop() {
        if node.id() == id {
            return Some(node);
        }
        pending.extend(node.children());
    }
    None
}
