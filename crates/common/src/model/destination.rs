use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::error::{NavError, Result};
use crate::model::action::NavAction;
use crate::model::argument::NavArgument;
use crate::model::bundle::Bundle;
use crate::model::deep_link::{DeepLinkMatch, DeepLinkRequest, NavDeepLink};
use crate::model::display_name;
use crate::model::options::LaunchScreen;

/// Stable integer id of a destination. 0 is reserved and always invalid.
pub type DestinationId = u32;

/// Id of an action declared on a destination. 0 is reserved and always
/// invalid.
pub type ActionId = u32;

/// One node within a navigation graph.
///
/// Each destination is associated by name with the [`Navigator`] that knows
/// how to reach it. A destination that contains other destinations is a
/// graph; graph-ness is carried by the embedded [`GraphBody`] rather than a
/// subtype, and [`NavDestination::as_graph`] is the downcast.
///
/// Destinations are shared (`Rc`) because back-stack entries reference them
/// without owning them; ownership flows strictly graph to children, and the
/// parent link is a weak back-reference.
///
/// [`Navigator`]: crate::navigator::Navigator
pub struct NavDestination {
    navigator_name: String,
    id: Cell<DestinationId>,
    label: RefCell<Option<String>>,
    parent: RefCell<Weak<NavDestination>>,
    arguments: RefCell<IndexMap<String, NavArgument>>,
    deep_links: RefCell<Vec<NavDeepLink>>,
    actions: RefCell<HashMap<ActionId, NavAction>>,
    launch_screen: Cell<LaunchScreen>,
    component: RefCell<Option<String>>,
    data_pattern: RefCell<Option<String>>,
    pub(crate) graph: Option<GraphBody>,
}

/// The collection half of a graph destination: children ordered by id plus
/// the designated start destination.
pub(crate) struct GraphBody {
    pub(crate) nodes: RefCell<BTreeMap<DestinationId, Rc<NavDestination>>>,
    pub(crate) start_destination: Cell<DestinationId>,
}

impl NavDestination {
    /// Destinations should normally be created through their navigator's
    /// `create_destination`.
    pub fn new(navigator_name: impl Into<String>) -> Rc<Self> {
        Rc::new(NavDestination {
            navigator_name: navigator_name.into(),
            id: Cell::new(0),
            label: RefCell::new(None),
            parent: RefCell::new(Weak::new()),
            arguments: RefCell::new(IndexMap::new()),
            deep_links: RefCell::new(Vec::new()),
            actions: RefCell::new(HashMap::new()),
            launch_screen: Cell::new(LaunchScreen::Default),
            component: RefCell::new(None),
            data_pattern: RefCell::new(None),
            graph: None,
        })
    }

    /// Create a graph destination: a destination that holds children and a
    /// start-destination pointer.
    pub fn new_graph(navigator_name: impl Into<String>) -> Rc<Self> {
        let mut dest = NavDestination {
            navigator_name: navigator_name.into(),
            id: Cell::new(0),
            label: RefCell::new(None),
            parent: RefCell::new(Weak::new()),
            arguments: RefCell::new(IndexMap::new()),
            deep_links: RefCell::new(Vec::new()),
            actions: RefCell::new(HashMap::new()),
            launch_screen: Cell::new(LaunchScreen::Default),
            component: RefCell::new(None),
            data_pattern: RefCell::new(None),
            graph: None,
        };
        dest.graph = Some(GraphBody {
            nodes: RefCell::new(BTreeMap::new()),
            start_destination: Cell::new(0),
        });
        Rc::new(dest)
    }

    pub fn navigator_name(&self) -> &str {
        &self.navigator_name
    }

    pub fn id(&self) -> DestinationId {
        self.id.get()
    }

    pub fn set_id(&self, id: DestinationId) {
        self.id.set(id);
    }

    pub fn label(&self) -> Option<String> {
        self.label.borrow().clone()
    }

    pub fn set_label(&self, label: Option<String>) {
        *self.label.borrow_mut() = label;
    }

    pub fn launch_screen(&self) -> LaunchScreen {
        self.launch_screen.get()
    }

    pub fn set_launch_screen(&self, launch_screen: LaunchScreen) {
        self.launch_screen.set(launch_screen);
    }

    /// The host-side component (pane, overlay, or task target) this
    /// destination instantiates. Required by the pane/overlay/task
    /// navigators.
    pub fn component(&self) -> Option<String> {
        self.component.borrow().clone()
    }

    pub fn set_component(&self, component: impl Into<String>) {
        *self.component.borrow_mut() = Some(component.into());
    }

    /// URI template filled in from the argument bundle by the task
    /// navigator.
    pub fn data_pattern(&self) -> Option<String> {
        self.data_pattern.borrow().clone()
    }

    pub fn set_data_pattern(&self, pattern: impl Into<String>) {
        *self.data_pattern.borrow_mut() = Some(pattern.into());
    }

    /// The graph that contains this destination, set when it is added to
    /// one.
    pub fn parent(&self) -> Option<Rc<NavDestination>> {
        self.parent.borrow().upgrade()
    }

    pub(crate) fn set_parent(&self, parent: Option<&Rc<NavDestination>>) {
        *self.parent.borrow_mut() = match parent {
            Some(parent) => Rc::downgrade(parent),
            None => Weak::new(),
        };
    }

    pub fn is_graph(&self) -> bool {
        self.graph.is_some()
    }

    pub(crate) fn graph_body(&self) -> Result<&GraphBody> {
        self.graph.as_ref().ok_or_else(|| {
            NavError::invalid_state(format!("destination {self} is not a graph"))
        })
    }

    pub fn add_argument(&self, name: impl Into<String>, argument: NavArgument) {
        self.arguments.borrow_mut().insert(name.into(), argument);
    }

    pub fn remove_argument(&self, name: &str) {
        self.arguments.borrow_mut().shift_remove(name);
    }

    pub fn argument(&self, name: &str) -> Option<NavArgument> {
        self.arguments.borrow().get(name).cloned()
    }

    pub fn add_deep_link(&self, deep_link: NavDeepLink) {
        self.deep_links.borrow_mut().push(deep_link);
    }

    /// Whether [`match_deep_link`](Self::match_deep_link) would find a match
    /// for this request on this destination (or, for graphs, any child).
    pub fn has_deep_link(self: &Rc<Self>, request: &DeepLinkRequest) -> bool {
        self.match_deep_link(request).is_some()
    }

    /// Find the best deep-link match for `request` on this destination and,
    /// for graphs, recursively on every child. Matches are ranked by
    /// [`DeepLinkMatch::cmp_specificity`].
    pub fn match_deep_link(self: &Rc<Self>, request: &DeepLinkRequest) -> Option<DeepLinkMatch> {
        let mut best = self.match_own_deep_links(request);
        if let Some(body) = &self.graph {
            let children: Vec<_> = body.nodes.borrow().values().cloned().collect();
            for child in children {
                if let Some(child_match) = child.match_deep_link(request) {
                    let better = match &best {
                        Some(current) => {
                            child_match.cmp_specificity(current) == std::cmp::Ordering::Greater
                        }
                        None => true,
                    };
                    if better {
                        best = Some(child_match);
                    }
                }
            }
        }
        best
    }

    fn match_own_deep_links(self: &Rc<Self>, request: &DeepLinkRequest) -> Option<DeepLinkMatch> {
        let mut best: Option<DeepLinkMatch> = None;
        let arguments = self.arguments.borrow();
        for link in self.deep_links.borrow().iter() {
            let matching_args = request
                .uri()
                .and_then(|uri| link.matching_arguments(uri, &arguments));
            let matching_action =
                request.action().is_some() && request.action() == link.action();
            let mime_level = request.mime_type().and_then(|m| link.mime_type_match_rating(m));
            if matching_args.is_none() && !matching_action && mime_level.is_none() {
                continue;
            }
            let candidate = DeepLinkMatch::new(
                self.clone(),
                matching_args,
                link.is_exact(),
                matching_action,
                mime_level.unwrap_or(-1),
            );
            let better = match &best {
                Some(current) => candidate.cmp_specificity(current) == std::cmp::Ordering::Greater,
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }
        best
    }

    /// Declare an action on this destination.
    pub fn put_action(&self, action_id: ActionId, action: NavAction) -> Result<()> {
        if action_id == 0 {
            return Err(NavError::invalid_argument("cannot have an action with id 0"));
        }
        self.actions.borrow_mut().insert(action_id, action);
        Ok(())
    }

    pub fn remove_action(&self, action_id: ActionId) {
        self.actions.borrow_mut().remove(&action_id);
    }

    /// Look up an action, walking up through parent graphs when this
    /// destination does not declare it.
    pub fn action(&self, action_id: ActionId) -> Option<NavAction> {
        if let Some(action) = self.actions.borrow().get(&action_id) {
            return Some(action.clone());
        }
        self.parent().and_then(|parent| parent.action(action_id))
    }

    /// Combine this destination's declared argument defaults with `args`,
    /// explicit values taking precedence. Fails when an explicit value has a
    /// type other than the declared one.
    pub fn add_in_default_args(&self, args: Option<&Bundle>) -> Result<Option<Bundle>> {
        let arguments = self.arguments.borrow();
        if args.is_none() && arguments.is_empty() {
            return Ok(None);
        }
        let mut combined = Bundle::new();
        for (name, argument) in arguments.iter() {
            argument.put_default_value(name, &mut combined);
        }
        if let Some(args) = args {
            combined.put_all(args);
            for (name, argument) in arguments.iter() {
                if !argument.verify(name, &combined) {
                    return Err(NavError::invalid_argument(format!(
                        "wrong argument type for '{name}' in argument bundle: {} expected",
                        argument.ty().name()
                    )));
                }
            }
        }
        Ok(Some(combined))
    }

    /// The chain of ids to walk from the root down to this destination,
    /// omitting any graph whose start destination is the next link (entering
    /// the graph already implies entering that child). When `previous` is
    /// given and already shares a hierarchy with this destination, only the
    /// minimal additional path is produced.
    pub fn build_deep_link_ids(
        self: &Rc<Self>,
        previous: Option<&Rc<NavDestination>>,
    ) -> Vec<DestinationId> {
        let mut hierarchy: Vec<DestinationId> = Vec::new();
        let mut current = self.clone();
        loop {
            let parent = current.parent();
            let reachable_from_previous = previous
                .and_then(|prev| prev.parent())
                .and_then(|prev_parent| prev_parent.find_node(current.id()))
                .is_some_and(|found| Rc::ptr_eq(&found, &current));
            if reachable_from_previous {
                hierarchy.insert(0, current.id());
                break;
            }
            let implied_by_parent = parent
                .as_ref()
                .is_some_and(|p| p.start_destination() == current.id());
            if !implied_by_parent {
                hierarchy.insert(0, current.id());
            }
            match parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        hierarchy
    }

    pub fn display_id(&self) -> String {
        display_name(self.id())
    }
}

impl fmt::Display for NavDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_graph() { "graph" } else { "destination" };
        write!(f, "{kind}({})", self.display_id())?;
        if let Some(label) = self.label.borrow().as_deref() {
            write!(f, " label={label}")?;
        }
        if let Some(body) = &self.graph {
            write!(f, " startDestination={}", display_name(body.start_destination.get()))?;
        }
        Ok(())
    }
}

impl fmt::Debug for NavDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
