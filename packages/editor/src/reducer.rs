//! # Reducer
//!
//! Routes each [`Action`] to the tree mutations or UI fields it touches and
//! records history for the actions that change the document, the selection
//! or the page id.
//!
//! Every fallible step runs before anything is written, so an `Err` leaves
//! the state exactly as it was.

use funnel_common::{find_element, validate_document};
use funnel_model::{empty_document, Element};

use crate::actions::Action;
use crate::mutations::{delete_element, insert_element, update_element, ElementPatch, MutationError};
use crate::state::{Editor, EditorState};

impl EditorState {
    /// Apply `action` in place.
    pub fn apply(&mut self, action: &Action) -> Result<(), MutationError> {
        match action {
            Action::AddElement { container_id, element } => {
                let elements = insert_element(&self.editor.elements, container_id, element.clone())?;
                self.editor.elements = elements;
            }

            Action::UpdateElement { element } => {
                let elements = update_element(
                    &self.editor.elements,
                    &element.id,
                    &ElementPatch::from(element.clone()),
                )?;
                let selected = if self.editor.selected_element.id == element.id {
                    find_element(&elements, &element.id).cloned()
                } else {
                    None
                };
                self.editor.elements = elements;
                self.editor.selected_element = selected.unwrap_or_else(Element::none);
            }

            Action::DeleteElement { element } => {
                let elements = delete_element(&self.editor.elements, &element.id)?;
                self.editor.elements = elements;
                let selection_gone = !self.editor.selected_element.is_none()
                    && find_element(&self.editor.elements, &self.editor.selected_element.id).is_none();
                if selection_gone {
                    self.editor.clear_selection();
                }
            }

            Action::ChangeSelectedElement { element } => {
                let selected = match element {
                    Some(element) if !element.is_none() => find_element(&self.editor.elements, &element.id)
                        .cloned()
                        .ok_or_else(|| MutationError::NodeNotFound(element.id.clone()))?,
                    _ => Element::none(),
                };
                self.editor.selected_element = selected;
            }

            Action::ChangeDevice { device } => self.editor.device = *device,

            Action::TogglePreviewMode => self.editor.preview_mode = !self.editor.preview_mode,

            Action::ToggleLiveMode(value) => {
                self.editor.live_mode = match value {
                    Some(live) => live.value,
                    None => !self.editor.live_mode,
                };
            }

            Action::Redo => {
                if let Some(snapshot) = self.history.redo() {
                    self.editor.restore(snapshot);
                }
            }

            Action::Undo => {
                if let Some(snapshot) = self.history.undo() {
                    self.editor.restore(snapshot);
                }
            }

            Action::LoadData { elements, with_live } => {
                let elements = match validate_document(elements) {
                    Ok(()) => elements.clone(),
                    Err(e) => {
                        tracing::warn!("LoadData: {}, starting from an empty page", e);
                        empty_document()
                    }
                };
                self.editor = Editor {
                    elements,
                    live_mode: *with_live,
                    ..Editor::default()
                };
                self.history.reset(self.editor.snapshot());
            }

            Action::SetFunnelPageId { funnel_page_id } => {
                self.editor.funnel_page_id = funnel_page_id.clone();
            }

            Action::SetDraggingComponent { component_type } => {
                self.editor.dragging_component = Some(*component_type);
            }

            Action::ClearDraggingComponent => self.editor.dragging_component = None,

            Action::SetDropTarget {
                drop_target_id,
                drop_position,
            } => {
                self.editor.drop_target_id = Some(drop_target_id.clone());
                self.editor.drop_position = Some(*drop_position);
            }

            Action::ClearDropTarget => self.editor.clear_drop_target(),
        }

        if action.records_history() {
            self.history.record(self.editor.snapshot());
        }
        Ok(())
    }
}

/// Pure form of [`EditorState::apply`]: the input state is never modified.
pub fn reduce(state: &EditorState, action: &Action) -> Result<EditorState, MutationError> {
    let mut next = state.clone();
    next.apply(action)?;
    Ok(next)
}
