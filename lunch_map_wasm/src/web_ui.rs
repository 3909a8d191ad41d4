use log::error;
use lunch_map::menu::{MenuContent, MenuType};
use lunch_map::restaurant_filter::RestaurantFilter;
use lunch_map::session::Session;
use lunch_map::ui::{ClientUi, RestaurantRow};

use crate::web_document::{web_document, web_window};
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::{JsResult, describe_js_error};


pub const AUTH_ID: &str = "auth";
pub const PROFILE_ID: &str = "profile";
pub const USER_INFO_ID: &str = "user-info";
pub const USERNAME_ID: &str = "username";
pub const PASSWORD_ID: &str = "password";
pub const LOGIN_BUTTON_ID: &str = "login-btn";
pub const REGISTER_BUTTON_ID: &str = "register-btn";
pub const LOGOUT_BUTTON_ID: &str = "logout-btn";
pub const RESTAURANT_LIST_ID: &str = "restaurant-list";
pub const MENU_TYPE_ID: &str = "menu-type";
pub const FILTER_CITY_ID: &str = "filter-city";
pub const FILTER_COMPANY_ID: &str = "filter-company";

pub const RESTAURANT_ITEM_CLASS: &str = "restaurant-item";
pub const RESTAURANT_ID_ATTR: &str = "data-id";


// DOM-backed presentation. Failures to touch the DOM are logged; there is nobody to report them to.
pub struct WebUi;

fn log_js_error(result: JsResult<()>) {
    if let Err(err) = result {
        error!("{}", describe_js_error(&err));
    }
}

fn render_session(session: &Session) -> JsResult<()> {
    let document = web_document()?;
    document.get_existing_element_by_id(AUTH_ID)?.set_displayed(!session.is_logged_in())?;
    document.get_existing_element_by_id(PROFILE_ID)?.set_displayed(session.is_logged_in())?;
    document
        .get_existing_html_element_by_id(USER_INFO_ID)?
        .set_inner_text(&session.user_info_text());
    Ok(())
}

fn make_restaurant_item(row: &RestaurantRow) -> JsResult<web_sys::Element> {
    let item = web_document()?
        .create_element("div")?
        .with_classes([RESTAURANT_ITEM_CLASS])?
        .with_attribute(RESTAURANT_ID_ATTR, &row.id)?;
    item.append_new_element("strong")?.set_text_content(Some(&row.name));
    item.append_new_element("br")?;
    let item = item.append_text(&row.address_line)?;
    if row.favourite {
        item.append_new_element("span")?.with_classes(["favourite"])?.set_text_content(Some(" ⭐"));
    }
    Ok(item)
}

fn render_restaurants(rows: &[RestaurantRow]) -> JsResult<()> {
    let list = web_document()?.get_existing_element_by_id(RESTAURANT_LIST_ID)?;
    let items = rows.iter().map(make_restaurant_item).collect::<JsResult<Vec<_>>>()?;
    list.set_children(items)
}

fn render_restaurants_error() -> JsResult<()> {
    let document = web_document()?;
    let list = document.get_existing_element_by_id(RESTAURANT_LIST_ID)?;
    let placeholder = document.create_element("p")?.with_text_content("Error loading restaurants 😢");
    list.set_children([placeholder])
}

impl ClientUi for WebUi {
    fn filter(&self) -> RestaurantFilter {
        let Ok(document) = web_document() else {
            return RestaurantFilter::default();
        };
        RestaurantFilter::new(
            document.control_value(FILTER_CITY_ID),
            document.control_value(FILTER_COMPANY_ID),
        )
    }

    fn menu_type(&self) -> MenuType {
        web_document()
            .map(|document| MenuType::from_selector(&document.control_value(MENU_TYPE_ID)))
            .unwrap_or_default()
    }

    fn alert(&self, message: &str) {
        log_js_error(web_window().and_then(|window| window.alert_with_message(message)));
    }

    fn prompt(&self, message: &str) -> Option<String> {
        match web_window().and_then(|window| window.prompt_with_message(message)) {
            Ok(answer) => answer,
            Err(err) => {
                error!("{}", describe_js_error(&err));
                None
            }
        }
    }

    fn render_session(&self, session: &Session) { log_js_error(render_session(session)); }
    fn render_restaurants(&self, rows: &[RestaurantRow]) { log_js_error(render_restaurants(rows)); }
    fn render_restaurants_error(&self) { log_js_error(render_restaurants_error()); }

    fn show_menu(&self, menu: &MenuContent) { self.alert(&menu.to_display_text()); }
}
