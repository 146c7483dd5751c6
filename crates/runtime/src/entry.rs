//! One activation record per visited destination.

use std::any::Any;
use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use duonav_common::{Bundle, LifecycleEvent, LifecycleState, NavDestination};

/// String-keyed store for state scoped to a back-stack entry, cleared when
/// the entry is destroyed. Graph entries double as shared scopes for every
/// destination inside the graph.
#[derive(Default)]
pub struct ScopeStore {
    values: RefCell<HashMap<String, Rc<dyn Any>>>,
}

impl ScopeStore {
    pub fn put(&self, key: impl Into<String>, value: Rc<dyn Any>) {
        self.values.borrow_mut().insert(key.into(), value);
    }

    pub fn get<T: 'static>(&self, key: &str) -> Option<Rc<T>> {
        self.values
            .borrow()
            .get(key)
            .cloned()
            .and_then(|value| value.downcast::<T>().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    pub(crate) fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}

/// A destination on the back stack together with the arguments it was
/// reached with, its lifecycle bookkeeping, and its entry-local scope.
///
/// The effective lifecycle state is the lower of the hosting window's state
/// and the cap the controller assigns from the entry's stack position.
/// `Destroyed` is terminal.
pub struct NavBackStackEntry {
    id: String,
    destination: Rc<NavDestination>,
    arguments: RefCell<Option<Bundle>>,
    saved_state: RefCell<Option<Bundle>>,
    host_lifecycle: Cell<LifecycleState>,
    max_lifecycle: Cell<LifecycleState>,
    state: Cell<LifecycleState>,
    scope: ScopeStore,
}

impl NavBackStackEntry {
    pub(crate) fn new(
        destination: Rc<NavDestination>,
        arguments: Option<Bundle>,
        host_lifecycle: LifecycleState,
    ) -> Rc<Self> {
        Self::with_identity(
            Uuid::new_v4().to_string(),
            destination,
            arguments,
            host_lifecycle,
            None,
        )
    }

    pub(crate) fn with_identity(
        id: String,
        destination: Rc<NavDestination>,
        arguments: Option<Bundle>,
        host_lifecycle: LifecycleState,
        saved_state: Option<Bundle>,
    ) -> Rc<Self> {
        let entry = Rc::new(NavBackStackEntry {
            id,
            destination,
            arguments: RefCell::new(arguments),
            saved_state: RefCell::new(saved_state),
            host_lifecycle: Cell::new(host_lifecycle),
            max_lifecycle: Cell::new(LifecycleState::Resumed),
            state: Cell::new(LifecycleState::Initialized),
            scope: ScopeStore::default(),
        });
        entry.update_state();
        entry
    }

    /// Stable identity token, preserved across save and restore.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn destination(&self) -> &Rc<NavDestination> {
        &self.destination
    }

    pub fn arguments(&self) -> Ref<'_, Option<Bundle>> {
        self.arguments.borrow()
    }

    pub(crate) fn replace_arguments(&self, arguments: Option<Bundle>) {
        *self.arguments.borrow_mut() = arguments;
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.state.get()
    }

    pub fn max_lifecycle(&self) -> LifecycleState {
        self.max_lifecycle.get()
    }

    pub fn scope(&self) -> &ScopeStore {
        &self.scope
    }

    pub(crate) fn saved_state(&self) -> Option<Bundle> {
        self.saved_state.borrow().clone()
    }

    /// Forward a hosting-window lifecycle event to this entry.
    pub(crate) fn handle_host_event(&self, event: LifecycleEvent) {
        self.host_lifecycle.set(event.target_state());
        self.update_state();
    }

    /// Cap this entry's lifecycle from its stack position. `Destroyed` also
    /// drops the entry's scope.
    pub(crate) fn set_max_lifecycle(&self, max: LifecycleState) {
        self.max_lifecycle.set(max);
        self.update_state();
    }

    pub(crate) fn update_state(&self) {
        if self.state.get() == LifecycleState::Destroyed {
            return;
        }
        let next = if self.max_lifecycle.get() == LifecycleState::Destroyed {
            LifecycleState::Destroyed
        } else {
            self.host_lifecycle.get().min(self.max_lifecycle.get())
        };
        self.state.set(next);
        if next == LifecycleState::Destroyed {
            self.scope.clear();
        }
    }
}
