//! Shared fixtures: recording host doubles and a canonical test graph.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use duonav_common::{Bundle, DestinationId, NavDeepLink, NavDestination};
use duonav_runtime::{
    LaunchIntent, NavController, OverlayHost, OverlayNavigator, PaneHost, PaneNavigator,
    PaneTransaction, TaskHost, TaskIntent, TaskNavigator,
};

#[derive(Default)]
pub struct RecordingNavHost {
    pub launch_intent: RefCell<Option<LaunchIntent>>,
    pub started_stacks: RefCell<Vec<Vec<LaunchIntent>>>,
    pub finishes: Cell<u32>,
}

impl duonav_runtime::NavHost for RecordingNavHost {
    fn launch_intent(&self) -> Option<LaunchIntent> {
        self.launch_intent.borrow().clone()
    }

    fn start_task_stack(&self, stack: &[LaunchIntent]) {
        self.started_stacks.borrow_mut().push(stack.to_vec());
    }

    fn finish(&self) {
        self.finishes.set(self.finishes.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingPaneHost {
    pub state_saved: Cell<bool>,
    pub pushes: RefCell<Vec<PaneTransaction>>,
    pub replacements: RefCell<Vec<PaneTransaction>>,
    pub pops: Cell<u32>,
}

impl PaneHost for RecordingPaneHost {
    fn is_state_saved(&self) -> bool {
        self.state_saved.get()
    }

    fn push(&self, transaction: PaneTransaction) {
        self.pushes.borrow_mut().push(transaction);
    }

    fn replace_top(&self, transaction: PaneTransaction) {
        self.replacements.borrow_mut().push(transaction);
    }

    fn pop(&self, _with_transition: bool) {
        self.pops.set(self.pops.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingOverlayHost {
    pub state_saved: Cell<bool>,
    pub shown: RefCell<Vec<String>>,
    pub dismissals: Cell<u32>,
}

impl OverlayHost for RecordingOverlayHost {
    fn is_state_saved(&self) -> bool {
        self.state_saved.get()
    }

    fn show(&self, component: &str, _args: Option<&Bundle>) {
        self.shown.borrow_mut().push(component.to_owned());
    }

    fn dismiss(&self) {
        self.dismissals.set(self.dismissals.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingTaskHost {
    pub started: RefCell<Vec<TaskIntent>>,
    pub finishes: Cell<u32>,
}

impl TaskHost for RecordingTaskHost {
    fn start_task(&self, intent: TaskIntent) {
        self.started.borrow_mut().push(intent);
    }

    fn finish(&self) {
        self.finishes.set(self.finishes.get() + 1);
    }
}

pub struct TestEnv {
    pub controller: NavController,
    pub nav_host: Rc<RecordingNavHost>,
    pub pane_host: Rc<RecordingPaneHost>,
    pub overlay_host: Rc<RecordingOverlayHost>,
    pub task_host: Rc<RecordingTaskHost>,
}

pub fn test_env() -> TestEnv {
    let nav_host = Rc::new(RecordingNavHost::default());
    let pane_host = Rc::new(RecordingPaneHost::default());
    let overlay_host = Rc::new(RecordingOverlayHost::default());
    let task_host = Rc::new(RecordingTaskHost::default());
    let controller = NavController::new(Some(nav_host.clone()));
    let provider = controller.navigator_provider();
    provider
        .add_navigator(Rc::new(PaneNavigator::new(pane_host.clone())))
        .unwrap();
    provider
        .add_navigator(Rc::new(OverlayNavigator::new(overlay_host.clone())))
        .unwrap();
    provider
        .add_navigator(Rc::new(TaskNavigator::new(task_host.clone())))
        .unwrap();
    TestEnv {
        controller,
        nav_host,
        pane_host,
        overlay_host,
        task_host,
    }
}

pub fn pane(id: DestinationId, component: &str) -> Rc<NavDestination> {
    let dest = NavDestination::new("pane");
    dest.set_id(id);
    dest.set_component(component);
    dest
}

pub fn overlay(id: DestinationId, component: &str) -> Rc<NavDestination> {
    let dest = NavDestination::new("overlay");
    dest.set_id(id);
    dest.set_component(component);
    dest
}

/// The canonical test graph:
///
/// ```text
/// root(1) [start=2]
/// ├── home(2)
/// ├── detail(3)          deep link "example.com/{id}"
/// ├── sheet(4)           overlay
/// ├── promo(5)           deep link "example.com/.*"
/// └── account(20) [start=21]
///     ├── profile(21)
///     └── settings(22)
/// ```
pub fn sample_graph() -> Rc<NavDestination> {
    let root = NavDestination::new_graph("navigation");
    root.set_id(1);

    let home = pane(2, "app.HomePane");
    let detail = pane(3, "app.DetailPane");
    detail.add_deep_link(NavDeepLink::from_uri_pattern("example.com/{id}").unwrap());
    let sheet = overlay(4, "app.FilterSheet");
    let promo = pane(5, "app.PromoPane");
    promo.add_deep_link(NavDeepLink::from_uri_pattern("example.com/.*").unwrap());

    let account = NavDestination::new_graph("navigation");
    account.set_id(20);
    let profile = pane(21, "app.ProfilePane");
    let settings = pane(22, "app.SettingsPane");
    account.add_destination(profile).unwrap();
    account.add_destination(settings).unwrap();
    account.set_start_destination(21).unwrap();

    root.add_destination(home).unwrap();
    root.add_destination(detail).unwrap();
    root.add_destination(sheet).unwrap();
    root.add_destination(promo).unwrap();
    root.add_destination(account).unwrap();
    root.set_start_destination(2).unwrap();
    root
}

pub fn stack_ids(controller: &NavController) -> Vec<DestinationId> {
    controller
        .back_stack_entries()
        .map(|entry| entry.destination().id())
        .collect()
}

pub fn stack_identities(controller: &NavController) -> Vec<String> {
    controller
        .back_stack_entries()
        .map(|entry| entry.id().to_owned())
        .collect()
}
