use lunch_map::error::SlotError;
use lunch_map::session_store::KeyValueSlot;
use wasm_bindgen::JsValue;

use crate::rust_error;
use crate::web_document::web_window;
use crate::web_error_handling::{JsResult, describe_js_error};


// `window.localStorage`: per-origin, survives reloads.
pub struct LocalStorageSlot {
    storage: web_sys::Storage,
}

impl LocalStorageSlot {
    pub fn new() -> JsResult<Self> {
        let storage = web_window()?
            .local_storage()?
            .ok_or_else(|| rust_error!("localStorage is not available"))?;
        Ok(LocalStorageSlot { storage })
    }
}

fn slot_error(err: JsValue) -> SlotError { SlotError(describe_js_error(&err)) }

impl KeyValueSlot for LocalStorageSlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        self.storage.get_item(key).map_err(slot_error)
    }
    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.storage.set_item(key, value).map_err(slot_error)
    }
    fn remove(&self, key: &str) -> Result<(), SlotError> {
        self.storage.remove_item(key).map_err(slot_error)
    }
}
