use std::collections::HashMap;

use funnel_editor::{DropGeometry, EditSession, EditorConfig, EditorError, COMPONENT_TYPE_KEY};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(e: EditorError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Browser timestamps arrive as fractional milliseconds.
fn millis(now_ms: f64) -> u64 {
    now_ms.max(0.0) as u64
}

fn transfer(component_type: &str) -> HashMap<String, String> {
    HashMap::from([(COMPONENT_TYPE_KEY.to_string(), component_type.to_string())])
}

/// One editing session, owned by the host page
#[wasm_bindgen]
pub struct EditorHandle {
    session: EditSession,
}

impl EditorHandle {
    fn create(config_json: Option<&str>) -> Result<Self, EditorError> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(json)?,
            None => EditorConfig::default(),
        };
        Ok(Self {
            session: EditSession::new(&config),
        })
    }

    fn state_string(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(self.session.state())?)
    }
}

#[wasm_bindgen]
impl EditorHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<EditorHandle, JsValue> {
        Self::create(config_json.as_deref()).map_err(to_js)
    }

    /// Load the stored page document, or an empty page when there is none.
    pub fn load(&mut self, json: Option<String>, with_live: bool) -> Result<(), JsValue> {
        self.session.hydrate(json.as_deref(), with_live).map_err(to_js)
    }

    /// Apply a `{type, payload}` action. Returns false when it was ignored.
    pub fn dispatch(&mut self, action_json: &str) -> Result<bool, JsValue> {
        self.session.dispatch_json(action_json).map_err(to_js)
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.session.undo().map_err(to_js)
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.session.redo().map_err(to_js)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    /// Editor state and history as JSON
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.state_string().map_err(to_js)
    }

    /// The element tree in its stored form
    #[wasm_bindgen(js_name = documentJson)]
    pub fn document_json(&self) -> Result<String, JsValue> {
        self.session.serialize().map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn device(&self) -> String {
        self.session.device().to_string()
    }

    #[wasm_bindgen(js_name = setDevice)]
    pub fn set_device(&mut self, device: &str) -> Result<(), JsValue> {
        let device = device.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.session.set_device(device).map_err(to_js)?;
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = previewMode)]
    pub fn preview_mode(&self) -> bool {
        self.session.preview_mode()
    }

    #[wasm_bindgen(js_name = setPreviewMode)]
    pub fn set_preview_mode(&mut self, preview_mode: bool) -> Result<(), JsValue> {
        self.session.set_preview_mode(preview_mode).map_err(to_js)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, component_type: &str) -> Result<bool, JsValue> {
        self.session.drag_start(&transfer(component_type)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = dragEnter)]
    pub fn drag_enter(&mut self, target_id: &str, now_ms: f64) -> Result<bool, JsValue> {
        self.session.drag_enter(target_id, millis(now_ms)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(
        &mut self,
        target_id: &str,
        offset_y: f64,
        height: f64,
        is_empty: bool,
        now_ms: f64,
    ) -> Result<bool, JsValue> {
        let geometry = DropGeometry {
            offset_y,
            height,
            is_empty,
        };
        self.session
            .drag_over(target_id, geometry, millis(now_ms))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = dragTick)]
    pub fn drag_tick(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        self.session.drag_tick(millis(now_ms)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = dragLeave)]
    pub fn drag_leave(&mut self) -> Result<bool, JsValue> {
        self.session.drag_leave().map_err(to_js)
    }

    /// Drop a palette component into `container_id`.
    #[wasm_bindgen(js_name = dropComponent)]
    pub fn drop_component(&mut self, container_id: &str, component_type: &str) -> Result<bool, JsValue> {
        self.session
            .drop_component(container_id, &transfer(component_type))
            .map_err(to_js)
    }
}
