//! # Funnel Editor
//!
//! Core page editing engine for the funnel builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: drag/drop and edit gestures → Action  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Element factory (drag data → element)    │
//! │  - Drop indicator (throttle + debounce)     │
//! │  - Reducer (Action → tree mutations)        │
//! │  - History (linear undo/redo)               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: re-render from EditorState            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: selection and indicators only point into it
//! 2. **Whole-action atomicity**: a rejected action changes nothing
//! 3. **Document-focused history**: viewport and drag cosmetics are not undone
//! 4. **No ambient state**: each session owns its state explicitly
//!
//! ## Usage
//!
//! ```rust,ignore
//! use funnel_editor::{Action, EditSession, EditorConfig, MemoryPageStore};
//!
//! let mut store = MemoryPageStore::new();
//! let mut session = EditSession::new(&EditorConfig::default());
//!
//! session.mount(&store, "page-1", false)?;
//! session.drop_component("__body", &drag_data)?;
//! session.undo()?;
//! session.save(&mut store)?;
//! ```

mod actions;
mod config;
mod document;
mod drop_target;
mod errors;
mod factory;
mod history;
mod mutations;
mod reducer;
mod session;
mod state;
mod styles;

pub use actions::{Action, LiveMode, ACTION_TAGS};
pub use config::{DropConfig, EditorConfig, DEFAULT_CONFIG_NAME, MAX_MARGIN_FRACTION};
pub use document::{lenient_elements, parse_document, serialize_document, MemoryPageStore, PageStore};
pub use drop_target::{resolve_drop_position, DropGeometry, DropIndicator, DropPosition};
pub use errors::EditorError;
pub use factory::{default_styles, DataTransfer, ElementFactory, COMPONENT_TYPE_KEY, DEFAULT_VIDEO_SRC};
pub use history::History;
pub use mutations::{delete_element, insert_element, update_element, ElementPatch, MutationError};
pub use reducer::reduce;
pub use session::EditSession;
pub use state::{Device, Editor, EditorState, Snapshot};
pub use styles::update_element_styles;

// Re-export model types for convenience
pub use funnel_common::{collect_ids, count_elements, descendant_count, find_element};
pub use funnel_model::{
    empty_document, Element, ElementContent, ElementType, IdSource, LeafContent, SequentialIds, Styles, UuidIds,
    BODY_ID,
};
