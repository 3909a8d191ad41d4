use crate::menu::{MenuContent, MenuType};
use crate::model::Restaurant;
use crate::restaurant_filter::RestaurantFilter;
use crate::session::Session;


pub const NO_TOKEN_MESSAGE: &str = "Login failed: no token received";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub const REGISTERED_MESSAGE: &str = "User created! Please log in.";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";
pub const NO_MENU_MESSAGE: &str = "No menu available";
pub const EMAIL_PROMPT: &str = "Enter your email";


// One line of the restaurant list, ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestaurantRow {
    pub id: String,
    pub name: String,
    pub address_line: String,
    pub favourite: bool,
}

impl RestaurantRow {
    pub fn new(restaurant: &Restaurant, favourite_id: Option<&str>) -> Self {
        RestaurantRow {
            id: restaurant.id.clone(),
            name: restaurant.name.clone(),
            address_line: restaurant.address_line(),
            favourite: favourite_id == Some(restaurant.id.as_str()),
        }
    }
}

// Everything the client needs from its presentation layer: current input values and
// rendering/notification primitives. `alert` and `prompt` may block.
pub trait ClientUi {
    fn filter(&self) -> RestaurantFilter;
    fn menu_type(&self) -> MenuType;

    fn alert(&self, message: &str);
    fn prompt(&self, message: &str) -> Option<String>;

    fn render_session(&self, session: &Session);
    fn render_restaurants(&self, rows: &[RestaurantRow]);
    // Replaces the list with a static error placeholder.
    fn render_restaurants_error(&self);
    fn show_menu(&self, menu: &MenuContent);
}
