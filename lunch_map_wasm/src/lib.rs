// Browser front-end. The page loads Mapbox GL JS and this module, then calls
// `WebClient::start()` once the DOM is ready.

extern crate console_error_panic_hook;
extern crate wasm_bindgen;

extern crate lunch_map;

pub mod local_storage_slot;
mod mapbox;
mod web_document;
mod web_element_ext;
pub mod web_error_handling;
mod web_ui;

use std::future::Future;
use std::rc::Rc;

use log::info;
use lunch_map::client::ClientState;
use lunch_map::config::ClientConfig;
use lunch_map::http::ReqwestTransport;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::local_storage_slot::LocalStorageSlot;
use crate::mapbox::MapboxWidget;
use crate::web_document::web_document;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::JsResult;
use crate::web_ui::*;

pub use crate::web_error_handling::{RustError, last_panic, set_panic_hook};


#[wasm_bindgen]
pub struct WebClient {
    state: Rc<ClientState>,
}

#[wasm_bindgen]
impl WebClient {
    // `config_json` is an optional JSON-serialized `ClientConfig`; missing fields take defaults.
    pub fn new_client(config_json: Option<String>) -> JsResult<WebClient> {
        // Already initialized if the page creates more than one client.
        _ = console_log::init_with_level(log::Level::Info);
        let config = match config_json {
            Some(json) => serde_json::from_str::<ClientConfig>(&json)
                .map_err(|err| rust_error!("Invalid client config: {}", err))?,
            None => ClientConfig::default(),
        };
        let state = ClientState::new(
            &config,
            Box::new(ReqwestTransport::new()),
            Box::new(LocalStorageSlot::new()?),
            Box::new(MapboxWidget::new()),
            Rc::new(WebUi),
        )
        .map_err(|err| rust_error!("{}", err))?;
        Ok(WebClient { state: Rc::new(state) })
    }

    // Creates the client, wires the page controls and kicks off the initial load.
    pub fn start(config_json: Option<String>) -> JsResult<WebClient> {
        set_panic_hook();
        let client = WebClient::new_client(config_json)?;
        client.install_event_handlers()?;
        client.init();
        info!("Client started");
        Ok(client)
    }

    pub fn init(&self) { self.spawn(|state| async move { state.init().await }); }

    pub fn login(&self) -> JsResult<()> {
        let document = web_document()?;
        let username = document.control_value(USERNAME_ID);
        let password = document.control_value(PASSWORD_ID);
        self.spawn(|state| async move {
            let _ = state.login(&username, &password).await;
        });
        Ok(())
    }

    pub fn register(&self) -> JsResult<()> {
        let document = web_document()?;
        let username = document.control_value(USERNAME_ID);
        let password = document.control_value(PASSWORD_ID);
        self.spawn(|state| async move {
            let _ = state.register(&username, &password, None).await;
        });
        Ok(())
    }

    pub fn logout(&self) { self.state.logout(); }

    pub fn refresh(&self) {
        self.spawn(|state| async move {
            let _ = state.refresh_restaurants().await;
        });
    }

    pub fn show_menu(&self, restaurant_id: String) {
        self.spawn(|state| async move {
            let _ = state.show_menu(&restaurant_id).await;
        });
    }

    pub fn is_logged_in(&self) -> bool { self.state.session().is_logged_in() }
    pub fn marker_count(&self) -> usize { self.state.marker_count() }

    pub fn install_event_handlers(&self) -> JsResult<()> {
        let document = web_document()?;
        let on = |element_id: &str, event_type: &str, handler: fn(&WebClient) -> JsResult<()>| {
            let client = self.clone_handle();
            document.get_existing_element_by_id(element_id)?.add_event_listener_and_forget(
                event_type,
                move |_: web_sys::Event| handler(&client),
            )
        };
        on(LOGIN_BUTTON_ID, "click", WebClient::login)?;
        on(REGISTER_BUTTON_ID, "click", WebClient::register)?;
        on(LOGOUT_BUTTON_ID, "click", |client| Ok(client.logout()))?;
        on(FILTER_CITY_ID, "input", |client| Ok(client.refresh()))?;
        on(FILTER_COMPANY_ID, "change", |client| Ok(client.refresh()))?;

        let client = self.clone_handle();
        document.get_existing_element_by_id(RESTAURANT_LIST_ID)?.add_event_listener_and_forget(
            "click",
            move |event: web_sys::Event| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                else {
                    return Ok(());
                };
                let Some(item) = target.closest(&format!(".{RESTAURANT_ITEM_CLASS}"))? else {
                    return Ok(());
                };
                if let Some(id) = item.get_attribute(RESTAURANT_ID_ATTR) {
                    client.show_menu(id);
                }
                Ok(())
            },
        )?;
        Ok(())
    }
}

impl WebClient {
    fn clone_handle(&self) -> WebClient { WebClient { state: Rc::clone(&self.state) } }

    // Runs an operation on the browser event loop. Operations are not cancellable and may
    // overlap with each other.
    fn spawn<F, Fut>(&self, f: F)
    where
        F: FnOnce(Rc<ClientState>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(f(Rc::clone(&self.state)));
    }
}
