//! Launch requests exchanged with the host. A [`LaunchIntent`] describes how
//! the hosting window was (or should be) started; a [`TaskIntent`] is the
//! outbound request the task navigator hands to its host.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use duonav_common::{Bundle, DeepLinkRequest, DestinationId};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct IntentFlags: u32 {
        /// Start the target in its own task.
        const NEW_TASK = 1 << 0;
        /// Clear the target task before starting into it.
        const CLEAR_TASK = 1 << 1;
    }
}

/// How the hosting window was launched. Carries either an explicit deep-link
/// id chain (produced by [`crate::NavDeepLinkBuilder`]) or a bare URI to be
/// matched against the graph's deep-link patterns, or neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchIntent {
    action: Option<String>,
    uri: Option<String>,
    mime_type: Option<String>,
    flags: IntentFlags,
    #[serde(rename = "android-support-nav:controller:deepLinkIds")]
    deep_link_ids: Option<Vec<DestinationId>>,
    #[serde(rename = "android-support-nav:controller:deepLinkExtras")]
    deep_link_extras: Option<Bundle>,
}

impl LaunchIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_flags(mut self, flags: IntentFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn add_flags(&mut self, flags: IntentFlags) {
        self.flags |= flags;
    }

    pub fn set_deep_link(&mut self, ids: Vec<DestinationId>, extras: Option<Bundle>) {
        self.deep_link_ids = Some(ids);
        self.deep_link_extras = extras;
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn flags(&self) -> IntentFlags {
        self.flags
    }

    pub fn deep_link_ids(&self) -> Option<&[DestinationId]> {
        self.deep_link_ids.as_deref()
    }

    pub fn deep_link_extras(&self) -> Option<&Bundle> {
        self.deep_link_extras.as_ref()
    }

    /// The intent viewed as a deep-link request. `None` when the intent
    /// carries nothing matchable, or when its action/mime type is malformed.
    pub fn to_deep_link_request(&self) -> Option<DeepLinkRequest> {
        if self.uri.is_none() && self.action.is_none() && self.mime_type.is_none() {
            return None;
        }
        DeepLinkRequest::new(self.uri.clone(), self.action.clone(), self.mime_type.clone()).ok()
    }
}

/// An outbound cross-task launch: the component to start, an optional data
/// URI produced by filling the destination's data pattern, and the argument
/// bundle that travels along.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskIntent {
    pub component: String,
    pub data: Option<String>,
    pub args: Option<Bundle>,
    pub flags: IntentFlags,
}
