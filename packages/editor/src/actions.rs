//! # Editor Actions
//!
//! The closed set of operations the host can dispatch. On the wire an action
//! is `{"type": "ADD_ELEMENT", "payload": {...}}`.

use funnel_model::{Element, ElementType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::lenient_elements;
use crate::drop_target::DropPosition;
use crate::state::Device;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Append an element to a container
    AddElement {
        container_id: String,
        #[serde(rename = "elementDetails")]
        element: Element,
    },

    /// Replace an element's fields (matched by id)
    UpdateElement {
        #[serde(rename = "elementDetails")]
        element: Element,
    },

    /// Remove an element and its subtree (matched by id)
    DeleteElement {
        #[serde(rename = "elementDetails")]
        element: Element,
    },

    /// Select an element, or clear the selection with `None`
    #[serde(rename = "CHANGE_CLICKED_ELEMENT")]
    ChangeSelectedElement {
        #[serde(default, rename = "elementDetails")]
        element: Option<Element>,
    },

    ChangeDevice {
        device: Device,
    },

    TogglePreviewMode,

    /// Set live mode to the given value, or flip it
    ToggleLiveMode(Option<LiveMode>),

    Redo,

    Undo,

    /// Replace the whole document and start a fresh history
    LoadData {
        #[serde(default, deserialize_with = "lenient_elements")]
        elements: Vec<Element>,
        #[serde(default)]
        with_live: bool,
    },

    #[serde(rename = "SET_FUNNELPAGE_ID")]
    SetFunnelPageId {
        funnel_page_id: String,
    },

    SetDraggingComponent {
        component_type: ElementType,
    },

    ClearDraggingComponent,

    SetDropTarget {
        drop_target_id: String,
        drop_position: DropPosition,
    },

    ClearDropTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveMode {
    pub value: bool,
}

/// Every wire tag, in declaration order.
pub const ACTION_TAGS: [&str; 15] = [
    "ADD_ELEMENT",
    "UPDATE_ELEMENT",
    "DELETE_ELEMENT",
    "CHANGE_CLICKED_ELEMENT",
    "CHANGE_DEVICE",
    "TOGGLE_PREVIEW_MODE",
    "TOGGLE_LIVE_MODE",
    "REDO",
    "UNDO",
    "LOAD_DATA",
    "SET_FUNNELPAGE_ID",
    "SET_DRAGGING_COMPONENT",
    "CLEAR_DRAGGING_COMPONENT",
    "SET_DROP_TARGET",
    "CLEAR_DROP_TARGET",
];

impl Action {
    /// Parse an action sent by the host.
    ///
    /// Returns `Ok(None)` when the `type` tag is not one this editor knows;
    /// those actions are ignored. A known tag with a malformed payload is an
    /// error, except `LOAD_DATA`, which always loads something.
    pub fn from_json(raw: &str) -> Result<Option<Action>, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        let tag = value.get("type").and_then(Value::as_str);

        match tag {
            Some("LOAD_DATA") => Ok(Some(load_data(value.get("payload")))),
            Some(tag) if is_known_tag(tag) => serde_json::from_value(value).map(Some),
            _ => Ok(None),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Action::AddElement { .. } => "ADD_ELEMENT",
            Action::UpdateElement { .. } => "UPDATE_ELEMENT",
            Action::DeleteElement { .. } => "DELETE_ELEMENT",
            Action::ChangeSelectedElement { .. } => "CHANGE_CLICKED_ELEMENT",
            Action::ChangeDevice { .. } => "CHANGE_DEVICE",
            Action::TogglePreviewMode => "TOGGLE_PREVIEW_MODE",
            Action::ToggleLiveMode(_) => "TOGGLE_LIVE_MODE",
            Action::Redo => "REDO",
            Action::Undo => "UNDO",
            Action::LoadData { .. } => "LOAD_DATA",
            Action::SetFunnelPageId { .. } => "SET_FUNNELPAGE_ID",
            Action::SetDraggingComponent { .. } => "SET_DRAGGING_COMPONENT",
            Action::ClearDraggingComponent => "CLEAR_DRAGGING_COMPONENT",
            Action::SetDropTarget { .. } => "SET_DROP_TARGET",
            Action::ClearDropTarget => "CLEAR_DROP_TARGET",
        }
    }

    /// Whether applying this action pushes a history snapshot.
    pub fn records_history(&self) -> bool {
        matches!(
            self,
            Action::AddElement { .. }
                | Action::UpdateElement { .. }
                | Action::DeleteElement { .. }
                | Action::ChangeSelectedElement { .. }
                | Action::SetFunnelPageId { .. }
        )
    }
}

fn is_known_tag(tag: &str) -> bool {
    ACTION_TAGS.contains(&tag)
}

/// `LoadData` from whatever payload arrived. Missing or malformed fields
/// become an empty element list and `withLive: false`.
fn load_data(payload: Option<&Value>) -> Action {
    let elements = payload
        .and_then(|payload| payload.get("elements"))
        .cloned()
        .map(|elements| lenient_elements(elements).unwrap_or_default())
        .unwrap_or_default();
    let with_live = payload
        .and_then(|payload| payload.get("withLive"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Action::LoadData { elements, with_live }
}
