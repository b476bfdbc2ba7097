//! # Edit Session
//!
//! One editor session: owns the editor state for a single page from mount to
//! teardown and is handed to whatever drives it (toolbar, canvas, bindings).
//!
//! A session is inert until its document is loaded: every action other than
//! `LoadData` is ignored before that.

use funnel_model::{empty_document, Element, IdSource, UuidIds};

use crate::document::{parse_document, serialize_document, PageStore};
use crate::drop_target::{DropGeometry, DropIndicator};
use crate::factory::{DataTransfer, ElementFactory};
use crate::state::{Device, Editor, EditorState};
use crate::styles::update_element_styles;
use crate::{Action, EditorConfig, EditorError, MutationError};

pub struct EditSession<I: IdSource = UuidIds> {
    state: EditorState,
    initialized: bool,
    factory: ElementFactory<I>,
    drop_indicator: DropIndicator,
}

impl EditSession<UuidIds> {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_ids(config, UuidIds)
    }
}

impl<I: IdSource> EditSession<I> {
    pub fn with_ids(config: &EditorConfig, ids: I) -> Self {
        Self {
            state: EditorState::new(config.history_limit),
            initialized: false,
            factory: ElementFactory::with_ids(ids),
            drop_indicator: DropIndicator::new(config.drop.clone()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn editor(&self) -> &Editor {
        &self.state.editor
    }

    pub fn elements(&self) -> &[Element] {
        &self.state.editor.elements
    }

    pub fn selected_element(&self) -> &Element {
        &self.state.editor.selected_element
    }

    /// Apply an action.
    ///
    /// Returns `Ok(false)` when the action was ignored because the session
    /// has not been loaded yet. A rejected action leaves the state untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<bool, EditorError> {
        if !self.initialized && !matches!(action, Action::LoadData { .. }) {
            tracing::debug!("Ignoring {} before the page is loaded", action.tag());
            return Ok(false);
        }

        tracing::debug!("Dispatching {}", action.tag());
        if let Err(e) = self.state.apply(&action) {
            tracing::warn!("Rejected {}: {}", action.tag(), e);
            return Err(e.into());
        }

        if matches!(action, Action::LoadData { .. }) {
            self.initialized = true;
        }
        Ok(true)
    }

    /// Apply an action sent as JSON. Unknown action types are ignored.
    pub fn dispatch_json(&mut self, raw: &str) -> Result<bool, EditorError> {
        match Action::from_json(raw)? {
            Some(action) => self.dispatch(action),
            None => {
                tracing::debug!("Ignoring unknown action: {}", raw);
                Ok(false)
            }
        }
    }

    /// Load a page from its stored form. Malformed content loads as an empty page.
    pub fn hydrate(&mut self, raw: Option<&str>, with_live: bool) -> Result<(), EditorError> {
        let elements = raw.map(parse_document).unwrap_or_else(empty_document);
        self.dispatch(Action::LoadData { elements, with_live })?;
        Ok(())
    }

    /// Fetch `page_id` from the store and load it.
    pub fn mount(&mut self, store: &dyn PageStore, page_id: &str, with_live: bool) -> Result<(), EditorError> {
        let raw = store.load_page(page_id)?;
        self.hydrate(raw.as_deref(), with_live)?;
        self.dispatch(Action::SetFunnelPageId {
            funnel_page_id: page_id.to_string(),
        })?;

        tracing::info!(
            "Mounted page {} ({} elements)",
            page_id,
            funnel_common::count_elements(self.elements())
        );
        Ok(())
    }

    /// Write the current tree back to the store under the session's page id.
    pub fn save(&self, store: &mut dyn PageStore) -> Result<(), EditorError> {
        let page_id = &self.state.editor.funnel_page_id;
        if page_id.is_empty() {
            return Err(EditorError::NoPage);
        }
        store.save_page(page_id, self.serialize()?)
    }

    pub fn serialize(&self) -> Result<String, EditorError> {
        serialize_document(self.elements())
    }

    /// End the session, handing back the final tree.
    pub fn end(self) -> Vec<Element> {
        tracing::info!("Ending session for page {:?}", self.state.editor.funnel_page_id);
        self.state.editor.elements
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.dispatch(Action::Undo)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.dispatch(Action::Redo)
    }

    pub fn can_undo(&self) -> bool {
        self.state.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.history.can_redo()
    }

    pub fn device(&self) -> Device {
        self.state.editor.device
    }

    pub fn set_device(&mut self, device: Device) -> Result<bool, EditorError> {
        self.dispatch(Action::ChangeDevice { device })
    }

    pub fn preview_mode(&self) -> bool {
        self.state.editor.preview_mode
    }

    pub fn set_preview_mode(&mut self, preview_mode: bool) -> Result<bool, EditorError> {
        if self.preview_mode() == preview_mode {
            return Ok(self.initialized);
        }
        self.dispatch(Action::TogglePreviewMode)
    }

    pub fn live_mode(&self) -> bool {
        self.state.editor.live_mode
    }

    /// Set one style property on an element, recorded like any other update.
    pub fn set_style(&mut self, element_id: &str, property: &str, value: &str) -> Result<bool, EditorError> {
        let element = self
            .state
            .editor
            .find(element_id)
            .ok_or_else(|| MutationError::NodeNotFound(element_id.to_string()))?;
        let element = update_element_styles(element, property, value);
        self.dispatch(Action::UpdateElement { element })
    }

    /// Drag started from the palette.
    pub fn drag_start(&mut self, transfer: &dyn DataTransfer) -> Result<bool, EditorError> {
        let component_type = transfer
            .get_data(crate::factory::COMPONENT_TYPE_KEY)
            .and_then(|tag| tag.parse().ok());
        match component_type {
            Some(component_type) => self.dispatch(Action::SetDraggingComponent { component_type }),
            None => Ok(false),
        }
    }

    pub fn drag_enter(&mut self, target_id: &str, now_ms: u64) -> Result<bool, EditorError> {
        let action = self.drop_indicator.enter(target_id, now_ms);
        self.dispatch(action)
    }

    pub fn drag_over(&mut self, target_id: &str, geometry: DropGeometry, now_ms: u64) -> Result<bool, EditorError> {
        match self.drop_indicator.pointer_move(target_id, geometry, now_ms) {
            Some(action) => self.dispatch(action),
            None => Ok(false),
        }
    }

    /// Timer callback so a pending position commits without further pointer input.
    pub fn drag_tick(&mut self, now_ms: u64) -> Result<bool, EditorError> {
        match self.drop_indicator.tick(now_ms) {
            Some(action) => self.dispatch(action),
            None => Ok(false),
        }
    }

    pub fn drag_leave(&mut self) -> Result<bool, EditorError> {
        match self.drop_indicator.leave() {
            Some(action) => self.dispatch(action),
            None => Ok(false),
        }
    }

    /// Drop onto `container_id`: create the dragged component and insert it.
    ///
    /// The drag indicators are cleared whether or not anything was inserted.
    pub fn drop_component(&mut self, container_id: &str, transfer: &dyn DataTransfer) -> Result<bool, EditorError> {
        let action = self.factory.drop_action(container_id, transfer);

        self.drag_leave()?;
        if self.state.editor.drop_target_id.is_some() {
            self.dispatch(Action::ClearDropTarget)?;
        }
        if self.state.editor.dragging_component.is_some() {
            self.dispatch(Action::ClearDraggingComponent)?;
        }

        match action {
            Some(action) => self.dispatch(action),
            None => Ok(false),
        }
    }
}
