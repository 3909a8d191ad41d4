use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;
use crate::model::GeoPoint;


pub const DEFAULT_API_BASE: &str = "https://media1.edu.metropolia.fi/restaurant/api/v1";
pub const DEFAULT_TOKEN_KEY: &str = "token";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    // Mapbox public token. Empty means "whatever the page has already configured".
    pub access_token: String,
    // DOM id of the element the map is mounted into.
    pub container: String,
    pub style: String,
    pub center: GeoPoint,
    pub zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            access_token: String::new(),
            container: "map".to_owned(),
            style: "mapbox://styles/mapbox/streets-v11".to_owned(),
            center: GeoPoint::new(24.94, 60.17), // Helsinki
            zoom: 12.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    pub menu_language: String,
    pub token_key: String,
    pub map: MapOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base: DEFAULT_API_BASE.to_owned(),
            menu_language: "fi".to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            map: MapOptions::default(),
        }
    }
}

// Endpoint URLs of the remote service. Path segments are appended one by one, so ids coming from
// the service are percent-encoded rather than spliced into the path.
#[derive(Clone, Debug)]
pub struct Endpoints {
    base: Url,
    language: String,
}

impl Endpoints {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.api_base)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", config.api_base)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{} cannot be a base", config.api_base)));
        }
        Ok(Endpoints { base, language: config.menu_language.clone() })
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn login(&self) -> Url { self.join(&["auth", "login"]) }
    pub fn users(&self) -> Url { self.join(&["users"]) }
    pub fn current_user(&self) -> Url { self.join(&["users", "token"]) }
    pub fn restaurants(&self) -> Url { self.join(&["restaurants"]) }
    pub fn daily_menu(&self, restaurant_id: &str) -> Url {
        self.join(&["restaurants", "daily", restaurant_id, &self.language])
    }
    pub fn weekly_menu(&self, restaurant_id: &str) -> Url {
        self.join(&["restaurants", "weekly", restaurant_id, &self.language])
    }
}
