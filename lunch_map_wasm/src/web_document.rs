use wasm_bindgen::JsCast;

use crate::rust_error;
use crate::web_error_handling::JsResult;


pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn get_element_by_id(&self, element_id: &str) -> Option<web_sys::Element> {
        self.0.get_element_by_id(element_id)
    }
    pub fn get_existing_element_by_id(&self, element_id: &str) -> JsResult<web_sys::Element> {
        self.0
            .get_element_by_id(element_id)
            .ok_or_else(|| rust_error!("Cannot find element \"{}\"", element_id))
    }
    pub fn get_existing_html_element_by_id(
        &self, element_id: &str,
    ) -> JsResult<web_sys::HtmlElement> {
        self.get_existing_element_by_id(element_id)?
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| rust_error!("Element \"{}\" is not an HTML element", element_id))
    }

    // Value of an `<input>` or `<select>`. Missing controls read as empty, the same as an
    // untouched one.
    pub fn control_value(&self, element_id: &str) -> String {
        let Some(element) = self.get_element_by_id(element_id) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    pub fn create_element(&self, local_name: &str) -> JsResult<web_sys::Element> {
        self.0.create_element(local_name)
    }
}

pub fn web_window() -> JsResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| rust_error!("No global window"))
}

pub fn web_document() -> JsResult<WebDocument> {
    let document = web_window()?.document().ok_or_else(|| rust_error!("No document"))?;
    Ok(WebDocument(document))
}
