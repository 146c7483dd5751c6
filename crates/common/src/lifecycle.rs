use serde::{Deserialize, Serialize};

/// Ordered lifecycle states for a back-stack entry. An entry only ever moves
/// forward through `Initialized -> Created -> Started -> Resumed`, and can be
/// forced to the terminal `Destroyed` state from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleState {
    Destroyed,
    Initialized,
    Created,
    Started,
    Resumed,
}

impl LifecycleState {
    /// Whether an entry in this state is at least created (visible to the
    /// host in some form).
    pub fn is_at_least(self, other: LifecycleState) -> bool {
        self >= other
    }
}

/// Host lifecycle events forwarded to the controller, which propagates them
/// to every entry on the back stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

impl LifecycleEvent {
    /// The state the host is in after this event.
    pub fn target_state(self) -> LifecycleState {
        match self {
            LifecycleEvent::Create | LifecycleEvent::Stop => LifecycleState::Created,
            LifecycleEvent::Start | LifecycleEvent::Pause => LifecycleState::Started,
            LifecycleEvent::Resume => LifecycleState::Resumed,
            LifecycleEvent::Destroy => LifecycleState::Destroyed,
        }
    }
}
