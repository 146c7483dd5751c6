//! Persisted controller state. Key names match the original library's saved
//! bundles so state written by existing installs keeps restoring.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use duonav_common::{Bundle, DestinationId, NavError, Result};

/// One persisted back-stack entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEntryState {
    #[serde(rename = "destinationId")]
    pub destination_id: DestinationId,
    #[serde(rename = "args")]
    pub arguments: Option<Bundle>,
    #[serde(rename = "uuid")]
    pub id: String,
    #[serde(rename = "savedState")]
    pub saved_state: Option<Bundle>,
}

/// Everything a controller persists: per-navigator bundles keyed by
/// navigator name, the ordered back stack, and the deep-link-consumed flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedNavState {
    #[serde(rename = "android-support-nav:controller:navigatorState")]
    pub navigator_state: IndexMap<String, Bundle>,
    #[serde(rename = "android-support-nav:controller:navigatorState:names")]
    pub navigator_names: Vec<String>,
    #[serde(rename = "android-support-nav:controller:backStack")]
    pub back_stack: Vec<SavedEntryState>,
    #[serde(rename = "android-support-nav:controller:deepLinkHandled")]
    pub deep_link_handled: bool,
}

impl SavedNavState {
    pub fn is_empty(&self) -> bool {
        self.navigator_names.is_empty() && self.back_stack.is_empty() && !self.deep_link_handled
    }
}

pub fn encode(state: &SavedNavState) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(state)
        .map_err(|e| NavError::invalid_state(format!("failed to encode navigation state: {e}")))
}

pub fn decode(bytes: &[u8]) -> Result<SavedNavState> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| NavError::invalid_state(format!("failed to decode navigation state: {e}")))
}
