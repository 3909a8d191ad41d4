use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};


// Geographic point in (longitude, latitude) order, as used by GeoJSON and the map widget.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self { GeoPoint { lon, lat } }

    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

// Some records carry `null` where a string is expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// GeoJSON-like location object: `{ "type": "Point", "coordinates": [lon, lat] }`.
// Coordinates may be missing or malformed; such a location is not placed on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
}

impl Location {
    pub fn point(lon: f64, lat: f64) -> Self {
        Location {
            kind: "Point".to_owned(),
            coordinates: Some(vec![lon, lat]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Restaurant {
    // Returns the marker position, if the restaurant has a usable one.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        match self.location.as_ref()?.coordinates.as_deref()? {
            &[lon, lat] => Some(GeoPoint::new(lon, lat)).filter(GeoPoint::is_valid),
            _ => None,
        }
    }

    pub fn address_line(&self) -> String {
        format!(
            "{}, {}",
            self.address.as_deref().unwrap_or(""),
            self.city.as_deref().unwrap_or("")
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestaurantListing {
    pub restaurants: Vec<Restaurant>,
}

// Diet tags come either as one comma-separated string ("G, L") or as a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Diets {
    Text(String),
    List(Vec<String>),
}

// Fields beyond the known ones are kept in `extra` so that the menu can be shown as it came.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diets: Option<Diets>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyMenu {
    pub courses: Vec<Course>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMenuDay {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMenu {
    pub days: Vec<WeeklyMenuDay>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(
        rename = "favouriteRestaurant",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub favourite_restaurant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

// The service omits `token` on some failures that still come with a success status,
// hence everything is optional here.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
}
