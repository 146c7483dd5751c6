//! The navigation controller: owns the back stack, resolves ids, actions,
//! and deep links to destinations, delegates transitions to navigators, and
//! keeps every entry's lifecycle consistent with its stack position.

use std::collections::VecDeque;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use duonav_common::{
    Bundle, DeepLinkRequest, DestinationId, GraphNavigator, LifecycleEvent, LifecycleState,
    NavDestination, NavError, NavOptions, Navigator, NavigatorExtras, NavigatorProvider, Result,
};

use crate::deep_link_builder::NavDeepLinkBuilder;
use crate::entry::NavBackStackEntry;
use crate::host::NavHost;
use crate::intent::{IntentFlags, LaunchIntent};
use crate::saved_state::{SavedEntryState, SavedNavState};

/// Called after every committed structural change with the new current
/// destination and the arguments it was reached with.
pub type OnDestinationChangedListener = dyn Fn(&Rc<NavDestination>, Option<&Bundle>);

pub struct NavController {
    provider: Rc<NavigatorProvider>,
    graph: Option<Rc<NavDestination>>,
    back_stack: VecDeque<Rc<NavBackStackEntry>>,
    listeners: Vec<Rc<OnDestinationChangedListener>>,
    host: Option<Rc<dyn NavHost>>,
    host_lifecycle: LifecycleState,
    deep_link_handled: bool,
    navigator_state_to_restore: Option<(Vec<String>, IndexMap<String, Bundle>)>,
    back_stack_to_restore: Option<Vec<SavedEntryState>>,
}

impl NavController {
    pub fn new(host: Option<Rc<dyn NavHost>>) -> Self {
        let provider = Rc::new(NavigatorProvider::new());
        // The graph navigator's name is a non-empty constant, so this
        // registration cannot fail.
        let _ = provider.add_navigator(Rc::new(GraphNavigator::new(&provider)));
        NavController {
            provider,
            graph: None,
            back_stack: VecDeque::new(),
            listeners: Vec::new(),
            host,
            host_lifecycle: LifecycleState::Resumed,
            deep_link_handled: false,
            navigator_state_to_restore: None,
            back_stack_to_restore: None,
        }
    }

    pub fn navigator_provider(&self) -> &Rc<NavigatorProvider> {
        &self.provider
    }

    /// Swap in a different provider. Only legal while the back stack is
    /// empty; entries already on the stack were created by the old one.
    pub fn set_navigator_provider(&mut self, provider: Rc<NavigatorProvider>) -> Result<()> {
        if !self.back_stack.is_empty() {
            return Err(NavError::invalid_state(
                "navigator provider must be set before the back stack is non-empty",
            ));
        }
        let _ = provider.add_navigator(Rc::new(GraphNavigator::new(&provider)));
        self.provider = provider;
        Ok(())
    }

    /// The current navigation graph.
    pub fn graph(&self) -> Result<&Rc<NavDestination>> {
        self.graph
            .as_ref()
            .ok_or_else(|| NavError::invalid_state("you must call set_graph() before calling graph()"))
    }

    pub(crate) fn try_graph(&self) -> Option<&Rc<NavDestination>> {
        self.graph.as_ref()
    }

    /// Set (or replace) the navigation graph. A previously set graph is
    /// popped off the stack first. If restore state is pending it is applied
    /// against the new graph; otherwise an empty controller navigates to the
    /// graph's start destination, after giving the host's launch intent one
    /// chance to deep link.
    pub fn set_graph(&mut self, graph: Rc<NavDestination>, start_args: Option<Bundle>) -> Result<()> {
        if !graph.is_graph() {
            return Err(NavError::invalid_argument(format!(
                "cannot set {graph} as the navigation graph: not a graph"
            )));
        }
        if let Some(old_graph) = self.graph.take() {
            self.pop_back_stack_internal(true, old_graph.id(), true);
        }
        self.graph = Some(graph);
        self.on_graph_created(start_args)
    }

    fn on_graph_created(&mut self, start_args: Option<Bundle>) -> Result<()> {
        if let Some((names, states)) = self.navigator_state_to_restore.take() {
            for name in names {
                let navigator = self.provider.get_navigator(&name)?;
                if let Some(bundle) = states.get(&name) {
                    navigator.on_restore_state(bundle);
                }
            }
        }
        if let Some(saved_stack) = self.back_stack_to_restore.take() {
            for state in saved_stack {
                let node = self.find_destination(state.destination_id).ok_or_else(|| {
                    NavError::invalid_state(format!(
                        "unknown destination during restore: 0x{:x}; the current \
                         destination graph may have changed",
                        state.destination_id
                    ))
                })?;
                let entry = NavBackStackEntry::with_identity(
                    state.id,
                    node,
                    state.arguments,
                    self.host_lifecycle,
                    state.saved_state,
                );
                self.back_stack.push_back(entry);
            }
        }
        match self.graph.clone() {
            Some(graph) if self.back_stack.is_empty() => {
                let launch_intent = if self.deep_link_handled {
                    None
                } else {
                    self.host.as_ref().and_then(|host| host.launch_intent())
                };
                let deep_linked = match launch_intent {
                    Some(intent) => self.handle_deep_link(&intent)?,
                    None => false,
                };
                if !deep_linked {
                    // Navigate to the first destination in the graph.
                    self.navigate_inner(graph, start_args, None, None)?;
                }
            }
            _ => {
                self.dispatch_on_destination_changed(true);
            }
        }
        Ok(())
    }

    /// Forward a hosting-window lifecycle event to the controller and every
    /// entry on the back stack.
    pub fn handle_lifecycle_event(&mut self, event: LifecycleEvent) {
        self.host_lifecycle = event.target_state();
        for entry in &self.back_stack {
            entry.handle_host_event(event);
        }
    }

    pub fn add_on_destination_changed_listener(
        &mut self,
        listener: Rc<OnDestinationChangedListener>,
    ) {
        if let Some(entry) = self.back_stack.back() {
            let args = entry.arguments();
            (*listener)(entry.destination(), args.as_ref());
        }
        self.listeners.push(listener);
    }

    pub fn remove_on_destination_changed_listener(
        &mut self,
        listener: &Rc<OnDestinationChangedListener>,
    ) {
        self.listeners.retain(|existing| !Rc::ptr_eq(existing, listener));
    }

    /// The destination on top of the back stack.
    pub fn current_destination(&self) -> Option<Rc<NavDestination>> {
        self.current_back_stack_entry()
            .map(|entry| entry.destination().clone())
    }

    pub fn current_back_stack_entry(&self) -> Option<Rc<NavBackStackEntry>> {
        self.back_stack.back().cloned()
    }

    /// The previous visible entry, skipping graph entries.
    pub fn previous_back_stack_entry(&self) -> Option<Rc<NavBackStackEntry>> {
        self.back_stack
            .iter()
            .rev()
            .skip(1)
            .find(|entry| !entry.destination().is_graph())
            .cloned()
    }

    /// The topmost entry for a destination id.
    pub fn back_stack_entry(&self, destination_id: DestinationId) -> Result<Rc<NavBackStackEntry>> {
        self.back_stack
            .iter()
            .rev()
            .find(|entry| entry.destination().id() == destination_id)
            .cloned()
            .ok_or_else(|| {
                NavError::invalid_argument(format!(
                    "no destination with id 0x{destination_id:x} is on the back stack; \
                     the current destination is {:?}",
                    self.current_destination()
                ))
            })
    }

    /// The entry whose scope is shared by everything inside the graph with
    /// the given id. Fails unless that graph is on the back stack.
    pub fn scope_owner(&self, graph_id: DestinationId) -> Result<Rc<NavBackStackEntry>> {
        let entry = self.back_stack_entry(graph_id)?;
        if !entry.destination().is_graph() {
            return Err(NavError::invalid_argument(format!(
                "no graph with id 0x{graph_id:x} is on the back stack"
            )));
        }
        Ok(entry)
    }

    /// Entries from bottom (root graph) to top.
    pub fn back_stack_entries(&self) -> impl Iterator<Item = &Rc<NavBackStackEntry>> {
        self.back_stack.iter()
    }

    pub(crate) fn find_destination(&self, destination_id: DestinationId) -> Option<Rc<NavDestination>> {
        let graph = self.graph.as_ref()?;
        if graph.id() == destination_id {
            return Some(graph.clone());
        }
        let current_node = match self.back_stack.back() {
            Some(entry) => entry.destination().clone(),
            None => graph.clone(),
        };
        let current_graph = if current_node.is_graph() {
            current_node
        } else {
            current_node.parent()?
        };
        current_graph.find_node(destination_id)
    }

    /// Navigate to an action or destination id. An id declared as an action
    /// on the current destination is resolved through that action; an id
    /// the current destination does not know is retried one level up the
    /// back stack at a time before failing.
    pub fn navigate(
        &mut self,
        res_id: u32,
        args: Option<Bundle>,
        options: Option<NavOptions>,
        extras: Option<&dyn NavigatorExtras>,
    ) -> Result<()> {
        let current_node = match self.back_stack.back() {
            Some(entry) => entry.destination().clone(),
            None => self
                .graph
                .clone()
                .ok_or_else(|| NavError::invalid_state("no current navigation node"))?,
        };
        if res_id == 0 {
            // A zero id is only meaningful as a pure pop.
            return match options.as_ref().and_then(|o| o.pop_up_to()) {
                Some(pop_up_to) => {
                    let inclusive = options.as_ref().is_some_and(|o| o.is_pop_up_to_inclusive());
                    self.pop_back_stack_to(true, pop_up_to, inclusive);
                    Ok(())
                }
                None => Err(NavError::invalid_argument(
                    "destination id 0 can only be used in conjunction with a valid pop_up_to",
                )),
            };
        }
        let action = current_node.action(res_id);
        if action.is_none()
            && self.find_destination(res_id).is_none()
            && self.previous_back_stack_entry().is_some()
        {
            // The id is neither an action nor a destination reachable from
            // here. Drop back one level without notifying listeners and
            // retry against the new top.
            if let Some(current) = self.current_destination() {
                self.pop_back_stack_internal(false, current.id(), true);
            }
            return self.navigate(res_id, args, options, extras);
        }
        let mut dest_id = res_id;
        let mut options = options;
        let mut combined_args: Option<Bundle> = None;
        if let Some(action) = &action {
            if options.is_none() {
                options = action.nav_options().cloned();
            }
            dest_id = action.destination_id();
            if let Some(defaults) = action.default_arguments() {
                combined_args = Some(defaults.clone());
            }
        }
        if let Some(args) = args {
            combined_args
                .get_or_insert_with(Bundle::new)
                .put_all(&args);
        }
        // An action may resolve to destination 0, making it a pure pop
        // described by its own options.
        if dest_id == 0 {
            if let Some(pop_up_to) = options.as_ref().and_then(|o| o.pop_up_to()) {
                let inclusive = options.as_ref().is_some_and(|o| o.is_pop_up_to_inclusive());
                self.pop_back_stack_to(true, pop_up_to, inclusive);
                return Ok(());
            }
        }
        let node = self.find_destination(dest_id).ok_or_else(|| {
            if action.is_some() {
                NavError::invalid_argument(format!(
                    "navigation destination 0x{dest_id:x} referenced from action \
                     0x{res_id:x} cannot be found from the current destination {current_node}"
                ))
            } else {
                NavError::invalid_argument(format!(
                    "navigation action/destination 0x{dest_id:x} cannot be found \
                     from the current destination {current_node}"
                ))
            }
        })?;
        self.navigate_inner(node, combined_args, options.as_ref(), extras)
    }

    /// Navigate to whatever destination in the graph best matches a
    /// deep-link request issued from inside the app.
    pub fn navigate_to_request(
        &mut self,
        request: &DeepLinkRequest,
        options: Option<&NavOptions>,
        extras: Option<&dyn NavigatorExtras>,
    ) -> Result<()> {
        let graph = self.graph()?.clone();
        let deep_link_match = graph.match_deep_link(request).ok_or_else(|| {
            NavError::invalid_argument(format!(
                "navigation destination that matches request {request:?} cannot be \
                 found in the navigation graph {graph}"
            ))
        })?;
        let destination = deep_link_match.destination().clone();
        let args = destination.add_in_default_args(deep_link_match.matching_args())?;
        self.navigate_inner(destination, args, options, extras)
    }

    fn navigate_inner(
        &mut self,
        node: Rc<NavDestination>,
        args: Option<Bundle>,
        options: Option<&NavOptions>,
        extras: Option<&dyn NavigatorExtras>,
    ) -> Result<()> {
        let mut popped = false;
        if let Some(pop_up_to) = options.and_then(|o| o.pop_up_to()) {
            let inclusive = options.is_some_and(|o| o.is_pop_up_to_inclusive());
            popped = self.pop_back_stack_internal(true, pop_up_to, inclusive);
        }
        let navigator = self.provider.get_navigator(node.navigator_name())?;
        let final_args = node.add_in_default_args(args.as_ref())?;
        let new_dest = navigator.navigate(&node, final_args.clone(), options, extras)?;
        let mut launch_single_top = false;
        if let Some(new_dest) = &new_dest {
            if !self.is_floating(new_dest) {
                // The new destination replaces anything floating above the
                // stack before it lands.
                while let Some(top) = self.back_stack.back().map(|e| e.destination().clone()) {
                    if !self.is_floating(&top) || !self.pop_back_stack_internal(true, top.id(), true)
                    {
                        break;
                    }
                }
            }
            // Navigating to a graph always creates fresh entries for the
            // graph chain, popping any orphaned copy already on top.
            let mut hierarchy: VecDeque<Rc<NavBackStackEntry>> = VecDeque::new();
            if node.is_graph() {
                let mut destination = Some(new_dest.clone());
                while let Some(current) = destination {
                    let parent = current.parent();
                    if let Some(parent) = &parent {
                        hierarchy.push_front(NavBackStackEntry::new(
                            parent.clone(),
                            final_args.clone(),
                            self.host_lifecycle,
                        ));
                        if self
                            .back_stack
                            .back()
                            .is_some_and(|top| Rc::ptr_eq(top.destination(), parent))
                        {
                            self.pop_back_stack_internal(true, parent.id(), true);
                        }
                    }
                    destination = match parent {
                        Some(parent) if !Rc::ptr_eq(&parent, &node) => Some(parent),
                        _ => None,
                    };
                }
            }
            // Synthesize entries for every ancestor graph between the new
            // destination and the nearest one already reachable.
            let mut destination = match hierarchy.front() {
                Some(entry) => Some(entry.destination().clone()),
                None => Some(new_dest.clone()),
            };
            while let Some(current) = destination {
                if self.find_destination(current.id()).is_some() {
                    break;
                }
                let parent = current.parent();
                if let Some(parent) = &parent {
                    hierarchy.push_front(NavBackStackEntry::new(
                        parent.clone(),
                        final_args.clone(),
                        self.host_lifecycle,
                    ));
                }
                destination = parent;
            }
            let overlapping = match hierarchy.back() {
                Some(entry) => entry.destination().clone(),
                None => new_dest.clone(),
            };
            // Pop graphs on top that do not connect to the new destination.
            while let Some(top) = self.back_stack.back().map(|e| e.destination().clone()) {
                if !top.is_graph()
                    || top.find_node_scoped(overlapping.id()).is_some()
                    || !self.pop_back_stack_internal(true, top.id(), true)
                {
                    break;
                }
            }
            self.back_stack.append(&mut hierarchy);
            // The root graph entry is always at the bottom of the stack.
            let root_missing = match (self.back_stack.front(), &self.graph) {
                (Some(bottom), Some(graph)) => !Rc::ptr_eq(bottom.destination(), graph),
                (None, Some(_)) => true,
                _ => false,
            };
            if root_missing {
                if let Some(graph) = self.graph.clone() {
                    self.back_stack.push_front(NavBackStackEntry::new(
                        graph,
                        final_args.clone(),
                        self.host_lifecycle,
                    ));
                }
            }
            let entry_args = new_dest.add_in_default_args(final_args.as_ref())?;
            debug!(destination = %new_dest.display_id(), "pushing back stack entry");
            self.back_stack.push_back(NavBackStackEntry::new(
                new_dest.clone(),
                entry_args,
                self.host_lifecycle,
            ));
        } else if options.is_some_and(|o| o.should_launch_single_top()) {
            launch_single_top = true;
            if let Some(top) = self.back_stack.back() {
                top.replace_arguments(final_args);
            }
        }
        if popped || new_dest.is_some() || launch_single_top {
            self.dispatch_on_destination_changed(true);
        }
        Ok(())
    }

    /// Pop the top destination off the back stack.
    pub fn pop_back_stack(&mut self, with_transition: bool) -> bool {
        match self.current_destination() {
            Some(destination) => self.pop_back_stack_to(with_transition, destination.id(), true),
            // Nothing to pop if the back stack is empty.
            None => false,
        }
    }

    /// Pop the back stack to a specific destination.
    pub fn pop_back_stack_to(
        &mut self,
        with_transition: bool,
        destination_id: DestinationId,
        inclusive: bool,
    ) -> bool {
        let popped = self.pop_back_stack_internal(with_transition, destination_id, inclusive);
        popped && self.dispatch_on_destination_changed(with_transition)
    }

    /// Pop without dispatching the destination-changed notification.
    fn pop_back_stack_internal(
        &mut self,
        with_transition: bool,
        destination_id: DestinationId,
        inclusive: bool,
    ) -> bool {
        if self.back_stack.is_empty() {
            return false;
        }
        let mut pop_operations: Vec<Rc<dyn Navigator>> = Vec::new();
        let mut found_destination = false;
        for entry in self.back_stack.iter().rev() {
            let destination = entry.destination();
            let Ok(navigator) = self.provider.get_navigator(destination.navigator_name()) else {
                // Entries only come from registered navigators.
                return false;
            };
            if inclusive || destination.id() != destination_id {
                pop_operations.push(navigator);
            }
            if destination.id() == destination_id {
                found_destination = true;
                break;
            }
        }
        if !found_destination {
            // Better to ignore the pop than accidentally pop the whole stack.
            info!(
                destination = %format_args!("0x{destination_id:x}"),
                "ignoring pop_back_stack to destination as it was not found on the current back stack"
            );
            return false;
        }
        let mut popped = false;
        for navigator in pop_operations {
            if !navigator.pop_back_stack(with_transition) {
                // The pop did not complete successfully, so stop immediately.
                break;
            }
            if let Some(entry) = self.back_stack.pop_back() {
                entry.set_max_lifecycle(LifecycleState::Destroyed);
            }
            popped = true;
        }
        popped
    }

    /// Navigate up one level, or hand back to the parent task when the
    /// current destination was deep linked into from outside.
    pub fn navigate_up(&mut self, with_transition: bool) -> Result<bool> {
        if self.destination_count_on_back_stack() != 1 {
            return Ok(self.pop_back_stack(with_transition));
        }
        // Only one real destination: the app was entered here directly, so
        // up means synthesizing the parent task stack.
        let Some(current) = self.current_destination() else {
            return Ok(false);
        };
        let mut dest_id = current.id();
        let mut parent = current.parent();
        while let Some(parent_graph) = parent {
            if parent_graph.start_destination() != dest_id {
                let mut args = Bundle::new();
                if let Some(intent) = self.host.as_ref().and_then(|host| host.launch_intent()) {
                    if let Some(request) = intent.to_deep_link_request() {
                        if let Some(graph) = &self.graph {
                            if let Some(matching) = graph.match_deep_link(&request) {
                                let destination_args = matching
                                    .destination()
                                    .add_in_default_args(matching.matching_args())?;
                                if let Some(destination_args) = destination_args {
                                    args.put_all(&destination_args);
                                }
                            }
                        }
                    }
                }
                let stack = NavDeepLinkBuilder::from_controller(self)
                    .set_destination(parent_graph.id())
                    .set_arguments(args)
                    .create_task_stack()?;
                let Some(host) = &self.host else {
                    warn!("cannot navigate up to a parent task without a host");
                    return Ok(false);
                };
                host.start_task_stack(&stack);
                host.finish();
                return Ok(true);
            }
            dest_id = parent_graph.id();
            parent = parent_graph.parent();
        }
        // Already at the start destination, there is no up.
        Ok(false)
    }

    fn destination_count_on_back_stack(&self) -> usize {
        self.back_stack
            .iter()
            .filter(|entry| !entry.destination().is_graph())
            .count()
    }

    /// Apply a deep link carried by a launch intent. Returns false (after
    /// logging) when the intent holds no deep link or its id chain does not
    /// fully resolve against the graph.
    pub fn handle_deep_link(&mut self, intent: &LaunchIntent) -> Result<bool> {
        let graph = match &self.graph {
            Some(graph) => graph.clone(),
            None => return Ok(false),
        };
        let mut global_args = Bundle::new();
        if let Some(extras) = intent.deep_link_extras() {
            global_args.put_all(extras);
        }
        let mut deep_link: Vec<DestinationId> =
            intent.deep_link_ids().map(<[_]>::to_vec).unwrap_or_default();
        if deep_link.is_empty() {
            if let Some(request) = intent.to_deep_link_request() {
                if let Some(matching) = graph.match_deep_link(&request) {
                    let destination = matching.destination().clone();
                    deep_link = destination.build_deep_link_ids(None);
                    if let Some(args) =
                        destination.add_in_default_args(matching.matching_args())?
                    {
                        global_args.put_all(&args);
                    }
                }
            }
        }
        if deep_link.is_empty() {
            return Ok(false);
        }
        if let Some(invalid) = self.find_invalid_destination_in_deep_link(&deep_link) {
            info!(
                destination = %invalid,
                "could not find destination in the navigation graph, ignoring the deep link"
            );
            return Ok(false);
        }
        let flags = intent.flags();
        if flags.contains(IntentFlags::NEW_TASK) && !flags.contains(IntentFlags::CLEAR_TASK) {
            // Started in a new task with unknown task state: restart the
            // whole task so the synthetic back stack is predictable.
            let mut restart = intent.clone();
            restart.add_flags(IntentFlags::CLEAR_TASK);
            match &self.host {
                Some(host) => {
                    host.start_task_stack(&[restart]);
                    host.finish();
                }
                None => warn!("cannot restart the task for a NEW_TASK deep link without a host"),
            }
            return Ok(true);
        }
        if flags.contains(IntentFlags::NEW_TASK) {
            // Our own task was cleared: replay the chain from the root.
            if !self.back_stack.is_empty() {
                self.pop_back_stack_internal(true, graph.id(), true);
            }
            for &destination_id in &deep_link {
                let node = self.find_destination(destination_id).ok_or_else(|| {
                    NavError::invalid_state(format!(
                        "deep linking failed: destination 0x{destination_id:x} cannot be \
                         found from the current destination {:?}",
                        self.current_destination()
                    ))
                })?;
                self.navigate_inner(node, Some(global_args.clone()), None, None)?;
            }
            return Ok(true);
        }
        // We're in another app's task: visit the intermediate graphs and
        // navigate to the final destination over a cleared stack.
        let mut cursor = graph.clone();
        for (index, &destination_id) in deep_link.iter().enumerate() {
            let node = if index == 0 {
                graph.clone()
            } else {
                cursor.find_node(destination_id).ok_or_else(|| {
                    NavError::invalid_state(format!(
                        "deep linking failed: destination 0x{destination_id:x} cannot be \
                         found in graph {cursor}"
                    ))
                })?
            };
            if index != deep_link.len() - 1 {
                if node.is_graph() {
                    cursor = node;
                    // Descend while the start destination is itself a graph.
                    while let Some(start) = cursor.find_node_scoped(cursor.start_destination()) {
                        if !start.is_graph() {
                            break;
                        }
                        cursor = start;
                    }
                }
            } else {
                let options = NavOptions::builder().pop_up_to(graph.id(), true).build();
                self.navigate_inner(node, Some(global_args.clone()), Some(&options), None)?;
            }
        }
        self.deep_link_handled = true;
        Ok(true)
    }

    /// Walk the id chain the way deep linking would, returning the display
    /// name of the first id that does not resolve.
    fn find_invalid_destination_in_deep_link(
        &self,
        deep_link: &[DestinationId],
    ) -> Option<String> {
        let graph = self.graph.as_ref()?;
        let mut cursor = graph.clone();
        for (index, &destination_id) in deep_link.iter().enumerate() {
            let node = if index == 0 {
                (graph.id() == destination_id).then(|| graph.clone())
            } else {
                cursor.find_node(destination_id)
            };
            let Some(node) = node else {
                return Some(format!("0x{destination_id:x}"));
            };
            if index != deep_link.len() - 1 && node.is_graph() {
                cursor = node;
                while let Some(start) = cursor.find_node_scoped(cursor.start_destination()) {
                    if !start.is_graph() {
                        break;
                    }
                    cursor = start;
                }
            }
        }
        None
    }

    fn is_floating(&self, destination: &NavDestination) -> bool {
        self.provider
            .get_navigator(destination.navigator_name())
            .map(|navigator| navigator.is_floating())
            .unwrap_or(false)
    }

    /// Recompute every entry's lifecycle from its stack position and notify
    /// listeners. Returns false when the stack emptied out.
    fn dispatch_on_destination_changed(&mut self, with_transition: bool) -> bool {
        // A plain graph never stays on top of the stack.
        while let Some(top) = self.back_stack.back().map(|e| e.destination().clone()) {
            if !top.is_graph() || !self.pop_back_stack_internal(with_transition, top.id(), true) {
                break;
            }
        }
        let Some(top_entry) = self.back_stack.back().cloned() else {
            return false;
        };

        // Determine the resumed destination and, when it floats, the
        // non-floating destination beneath it that stays started.
        let mut next_resumed = Some(top_entry.destination().clone());
        let mut next_started: Option<Rc<NavDestination>> = None;
        if self.is_floating(top_entry.destination()) {
            next_started = self
                .back_stack
                .iter()
                .rev()
                .map(|entry| entry.destination().clone())
                .find(|destination| !destination.is_graph() && !self.is_floating(destination));
        }
        // Downward transitions apply immediately so children settle before
        // their parent graphs; upward transitions are deferred to a second
        // bottom-up pass so parents come up before their children.
        let mut upward: Vec<(Rc<NavBackStackEntry>, LifecycleState)> = Vec::new();
        for entry in self.back_stack.iter().rev() {
            let current_max = entry.max_lifecycle();
            let destination = entry.destination();
            if next_resumed
                .as_ref()
                .is_some_and(|next| next.id() == destination.id())
            {
                if current_max != LifecycleState::Resumed {
                    upward.push((entry.clone(), LifecycleState::Resumed));
                }
                next_resumed = next_resumed.and_then(|next| next.parent());
            } else if next_started
                .as_ref()
                .is_some_and(|next| next.id() == destination.id())
            {
                if current_max == LifecycleState::Resumed {
                    entry.set_max_lifecycle(LifecycleState::Started);
                } else if current_max != LifecycleState::Started {
                    upward.push((entry.clone(), LifecycleState::Started));
                }
                next_started = next_started.and_then(|next| next.parent());
            } else {
                entry.set_max_lifecycle(LifecycleState::Created);
            }
        }
        for entry in &self.back_stack {
            match upward
                .iter()
                .find(|(deferred, _)| Rc::ptr_eq(deferred, entry))
            {
                Some((_, state)) => entry.set_max_lifecycle(*state),
                None => entry.update_state(),
            }
        }

        let listeners = self.listeners.clone();
        let args = top_entry.arguments();
        for listener in &listeners {
            (**listener)(top_entry.destination(), args.as_ref());
        }
        true
    }

    /// Snapshot everything needed to reconstruct this controller.
    pub fn save_state(&self) -> SavedNavState {
        let mut navigator_names = Vec::new();
        let mut navigator_state = IndexMap::new();
        for (name, navigator) in self.provider.navigators() {
            if let Some(bundle) = navigator.on_save_state() {
                navigator_names.push(name.clone());
                navigator_state.insert(name, bundle);
            }
        }
        let back_stack = self
            .back_stack
            .iter()
            .map(|entry| SavedEntryState {
                destination_id: entry.destination().id(),
                arguments: entry.arguments().clone(),
                id: entry.id().to_owned(),
                saved_state: entry.saved_state(),
            })
            .collect();
        SavedNavState {
            navigator_state,
            navigator_names,
            back_stack,
            deep_link_handled: self.deep_link_handled,
        }
    }

    /// Stage previously saved state. Must be called before `set_graph`; the
    /// staged state is applied against the graph when it arrives.
    pub fn restore_state(&mut self, state: SavedNavState) {
        self.deep_link_handled = state.deep_link_handled;
        self.navigator_state_to_restore =
            Some((state.navigator_names, state.navigator_state));
        self.back_stack_to_restore = if state.back_stack.is_empty() {
            None
        } else {
            Some(state.back_stack)
        };
    }
}
