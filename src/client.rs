use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};

use crate::api::ApiGateway;
use crate::config::{ClientConfig, Endpoints};
use crate::error::{ApiError, LoginError};
use crate::http::{HttpTransport, RequestOptions};
use crate::map_view::{MapView, MapWidget};
use crate::menu::{MenuContent, MenuType};
use crate::model::{
    DailyMenu, LoginRequest, LoginResponse, RegisterRequest, RestaurantListing, User, WeeklyMenu,
};
use crate::session::Session;
use crate::session_store::{KeyValueSlot, SessionStore};
use crate::ui::{self, ClientUi, RestaurantRow};


// Application state shared by all views: session, gateway, map and the presentation layer.
//
// Every operation takes `&self`. The client is single-threaded and event-driven; operations may
// interleave at `.await` points (e.g. two overlapping refreshes), so no `RefCell` borrow is ever
// held across an `.await`. Overlapping operations are not coordinated: whichever response arrives
// last renders last.
pub struct ClientState {
    session: Rc<SessionStore>,
    api: ApiGateway,
    endpoints: Endpoints,
    map: RefCell<MapView>,
    ui: Rc<dyn ClientUi>,
}

impl ClientState {
    pub fn new(
        config: &ClientConfig, transport: Box<dyn HttpTransport>, slot: Box<dyn KeyValueSlot>,
        map_widget: Box<dyn MapWidget>, ui: Rc<dyn ClientUi>,
    ) -> Result<Self, ApiError> {
        let endpoints = Endpoints::new(config)?;
        let session = Rc::new(SessionStore::load(slot, &config.token_key));
        let api = ApiGateway::new(transport, Rc::clone(&session));
        let map = RefCell::new(MapView::new(map_widget, config.map.clone()));
        Ok(ClientState { session, api, endpoints, map, ui })
    }

    pub fn session_store(&self) -> &SessionStore { &self.session }
    pub fn session(&self) -> Session { Session::from_user(self.session.current_user()) }
    pub fn map_created(&self) -> bool { self.map.borrow().is_created() }
    pub fn marker_count(&self) -> usize { self.map.borrow().marker_count() }

    // Startup: restore the profile for a persisted token, then render everything.
    pub async fn init(&self) {
        self.load_current_user().await;
        self.render_session();
        // Failure is already rendered as the list placeholder.
        let _ = self.refresh_restaurants().await;
    }

    pub fn render_session(&self) { self.ui.render_session(&self.session()); }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), LoginError> {
        let response = match self.request_login(username, password).await {
            Ok(response) => response,
            Err(err) => {
                error!("Login failed: {err}");
                self.ui.alert(ui::LOGIN_FAILED_MESSAGE);
                return Err(err.into());
            }
        };
        let Some(token) = response.token.filter(|t| !t.is_empty()) else {
            warn!("Login response contains no token: {:?}", response.message);
            self.ui.alert(ui::NO_TOKEN_MESSAGE);
            return Err(LoginError::NoToken);
        };
        if let Err(err) = self.session.set(&token) {
            warn!("{err}");
        }
        info!("Logged in as {username}");
        self.load_current_user().await;
        self.render_session();
        let _ = self.refresh_restaurants().await;
        Ok(())
    }

    async fn request_login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let options = RequestOptions::post_json(&LoginRequest { username, password })?;
        self.api.call(self.endpoints.login(), options).await
    }

    // Prompts for the email if the caller doesn't have one. Nothing is kept on failure.
    pub async fn register(
        &self, username: &str, password: &str, email: Option<&str>,
    ) -> Result<(), ApiError> {
        let email = match email {
            Some(email) => email.to_owned(),
            None => self.ui.prompt(ui::EMAIL_PROMPT).unwrap_or_default(),
        };
        let result = async {
            let options = RequestOptions::post_json(&RegisterRequest {
                username,
                password,
                email: &email,
            })?;
            self.api.call::<serde_json::Value>(self.endpoints.users(), options).await
        }
        .await;
        match result {
            Ok(_) => {
                info!("Registered user {username}");
                self.ui.alert(ui::REGISTERED_MESSAGE);
                Ok(())
            }
            Err(err) => {
                error!("Registration failed: {err}");
                self.ui.alert(ui::REGISTRATION_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    // Synchronous and local: no request is sent to the service.
    pub fn logout(&self) {
        if let Err(err) = self.session.clear() {
            warn!("{err}");
        }
        info!("Logged out");
        self.render_session();
    }

    // Best effort: on failure the previous profile (usually none) is kept.
    pub async fn load_current_user(&self) {
        if !self.session.has_token() {
            return;
        }
        match self.api.call::<User>(self.endpoints.current_user(), RequestOptions::get()).await {
            Ok(user) => self.session.set_current_user(user),
            Err(err) => warn!("Failed to load current user: {err}"),
        }
    }

    // Fetches, filters and renders the restaurant list and map markers. On failure the list is
    // replaced by an error placeholder and the map keeps whatever it showed before.
    //
    // Returns the number of restaurants shown.
    pub async fn refresh_restaurants(&self) -> Result<usize, ApiError> {
        let listing = match self
            .api
            .call::<RestaurantListing>(self.endpoints.restaurants(), RequestOptions::get())
            .await
        {
            Ok(listing) => listing,
            Err(err) => {
                error!("Error loading restaurants: {err}");
                self.ui.render_restaurants_error();
                return Err(err);
            }
        };
        let restaurants = self.ui.filter().apply(listing.restaurants);
        let favourite = self.session.favourite_restaurant();
        let rows: Vec<_> = restaurants
            .iter()
            .map(|r| RestaurantRow::new(r, favourite.as_deref()))
            .collect();
        self.ui.render_restaurants(&rows);
        self.map.borrow_mut().show_restaurants(&restaurants);
        info!("Showing {} restaurants", restaurants.len());
        Ok(restaurants.len())
    }

    pub async fn show_menu(&self, restaurant_id: &str) -> Result<MenuContent, ApiError> {
        match self.fetch_menu(restaurant_id, self.ui.menu_type()).await {
            Ok(menu) => {
                self.ui.show_menu(&menu);
                Ok(menu)
            }
            Err(err) => {
                error!("Failed to load menu for {restaurant_id}: {err}");
                self.ui.alert(ui::NO_MENU_MESSAGE);
                Err(err)
            }
        }
    }

    pub async fn fetch_menu(
        &self, restaurant_id: &str, menu_type: MenuType,
    ) -> Result<MenuContent, ApiError> {
        Ok(match menu_type {
            MenuType::Day => {
                let url = self.endpoints.daily_menu(restaurant_id);
                let menu: DailyMenu = self.api.call(url, RequestOptions::get()).await?;
                MenuContent::Daily(menu.courses)
            }
            MenuType::Week => {
                let url = self.endpoints.weekly_menu(restaurant_id);
                let menu: WeeklyMenu = self.api.call(url, RequestOptions::get()).await?;
                MenuContent::Weekly(menu.days)
            }
        })
    }
}
