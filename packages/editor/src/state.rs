//! Editor state: the document plus the UI state around it.

use funnel_common::{contains_element, find_element};
use funnel_model::{empty_document, Element, ElementType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::drop_target::DropPosition;
use crate::history::History;

/// Viewport the page is previewed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Desktop => "Desktop",
            Device::Tablet => "Tablet",
            Device::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Desktop" => Ok(Device::Desktop),
            "Tablet" => Ok(Device::Tablet),
            "Mobile" => Ok(Device::Mobile),
            other => Err(format!("Unknown device: {other}")),
        }
    }
}

/// Current document and UI state of one editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    pub live_mode: bool,
    pub elements: Vec<Element>,
    pub selected_element: Element,
    pub device: Device,
    pub preview_mode: bool,
    pub funnel_page_id: String,
    pub dragging_component: Option<ElementType>,
    pub drop_target_id: Option<String>,
    pub drop_position: Option<DropPosition>,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            live_mode: false,
            elements: empty_document(),
            selected_element: Element::none(),
            device: Device::Desktop,
            preview_mode: false,
            funnel_page_id: String::new(),
            dragging_component: None,
            drop_target_id: None,
            drop_position: None,
        }
    }
}

impl Editor {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            selected_element: self.selected_element.clone(),
            funnel_page_id: self.funnel_page_id.clone(),
        }
    }

    /// Bring back the recorded part of a snapshot. Viewport, modes and drag
    /// state stay as they are, except a drop indicator whose target is gone.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.elements = snapshot.elements.clone();
        self.selected_element = snapshot.selected_element.clone();
        self.funnel_page_id = snapshot.funnel_page_id.clone();

        let target_gone = self
            .drop_target_id
            .as_deref()
            .is_some_and(|id| !contains_element(&self.elements, id));
        if target_gone {
            self.clear_drop_target();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_element = Element::none();
    }

    pub fn clear_drop_target(&mut self) {
        self.drop_target_id = None;
        self.drop_position = None;
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        find_element(&self.elements, id)
    }
}

/// The history-relevant portion of [`Editor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub elements: Vec<Element>,
    pub selected_element: Element,
    pub funnel_page_id: String,
}

/// Editor plus its undo/redo history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorState {
    pub editor: Editor,
    pub history: History,
}

impl EditorState {
    pub fn new(history_limit: usize) -> Self {
        let editor = Editor::default();
        let history = History::new(editor.snapshot(), history_limit);
        Self { editor, history }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(0)
    }
}
