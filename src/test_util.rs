// Test doubles for the client's collaborators. Kept in the library (rather than under "tests")
// so that front-end crates can reuse them.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;

use crate::config::MapOptions;
use crate::error::{ApiError, MapError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::map_view::{MapWidget, MarkerId};
use crate::menu::{MenuContent, MenuType};
use crate::model::{GeoPoint, Location, Restaurant};
use crate::restaurant_filter::RestaurantFilter;
use crate::session::Session;
use crate::ui::{ClientUi, RestaurantRow};


pub fn restaurant(id: &str, city: &str, company: &str) -> Restaurant {
    Restaurant {
        id: id.to_owned(),
        name: format!("Restaurant {id}"),
        address: None,
        city: Some(city.to_owned()),
        company: company.to_owned(),
        location: None,
    }
}

pub fn restaurant_at(id: &str, city: &str, company: &str, lon: f64, lat: f64) -> Restaurant {
    Restaurant {
        location: Some(Location::point(lon, lat)),
        ..restaurant(id, city, company)
    }
}

// Replays canned responses keyed by URL path and records every request it gets.
// Responses for the same path are consumed in order; the last one is then repeated.
// Unknown paths fail with a transport error.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Rc<RefCell<HashMap<String, VecDeque<Result<HttpResponse, ApiError>>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self { Self::default() }

    pub fn respond(&self, path: &str, status: u16, body: impl ToString) {
        self.push(path, Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn respond_json(&self, path: &str, body: serde_json::Value) {
        self.respond(path, 200, body);
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.push(path, Err(ApiError::Transport(message.to_owned())));
    }

    fn push(&self, path: &str, response: Result<HttpResponse, ApiError>) {
        self.responses.borrow_mut().entry(path.to_owned()).or_default().push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> { self.requests.borrow().clone() }

    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests.borrow().iter().filter(|r| r.url.path() == path).cloned().collect()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.path().to_owned()).collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request.url.path().to_owned();
        self.requests.borrow_mut().push(request);
        let mut responses = self.responses.borrow_mut();
        let Some(queue) = responses.get_mut(&path) else {
            return Err(ApiError::Transport(format!("no mock response for {path}")));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedMarker {
    pub id: MarkerId,
    pub point: GeoPoint,
    pub label: String,
}

#[derive(Default)]
pub struct MapRecord {
    pub unavailable: bool,
    pub creation_attempts: usize,
    pub maps_created: usize,
    pub markers: Vec<PlacedMarker>,
    pub removed: Vec<MarkerId>,
    next_id: MarkerId,
}

// Map widget that remembers what is currently on the "screen".
#[derive(Clone, Default)]
pub struct RecordingMap {
    record: Rc<RefCell<MapRecord>>,
}

impl RecordingMap {
    pub fn new() -> Self { Self::default() }

    // While unavailable, map creation fails the way it does before the map library has loaded.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.record.borrow_mut().unavailable = unavailable;
    }

    pub fn creation_attempts(&self) -> usize { self.record.borrow().creation_attempts }
    pub fn maps_created(&self) -> usize { self.record.borrow().maps_created }
    pub fn markers(&self) -> Vec<PlacedMarker> { self.record.borrow().markers.clone() }
    pub fn labels(&self) -> Vec<String> {
        self.record.borrow().markers.iter().map(|m| m.label.clone()).collect()
    }
    pub fn removed_count(&self) -> usize { self.record.borrow().removed.len() }
}

impl MapWidget for RecordingMap {
    fn create_map(&mut self, _options: &MapOptions) -> Result<(), MapError> {
        let mut record = self.record.borrow_mut();
        record.creation_attempts += 1;
        if record.unavailable {
            return Err(MapError("map library is not loaded".to_owned()));
        }
        record.maps_created += 1;
        Ok(())
    }

    fn add_marker(&mut self, point: GeoPoint, label: &str) -> Result<MarkerId, MapError> {
        let mut record = self.record.borrow_mut();
        if record.maps_created == 0 {
            return Err(MapError("no map".to_owned()));
        }
        let id = record.next_id;
        record.next_id += 1;
        record.markers.push(PlacedMarker { id, point, label: label.to_owned() });
        Ok(id)
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        let mut record = self.record.borrow_mut();
        record.markers.retain(|m| m.id != marker);
        record.removed.push(marker);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Alert(String),
    Prompt(String),
    Session(Session),
    Restaurants(Vec<RestaurantRow>),
    RestaurantsError,
    Menu(MenuContent),
}

// Presentation layer that records everything it was asked to show. Input values are set
// directly by the test.
#[derive(Default)]
pub struct RecordingUi {
    pub filter: RefCell<RestaurantFilter>,
    pub menu_type: RefCell<MenuType>,
    pub prompt_answer: RefCell<Option<String>>,
    events: RefCell<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn new() -> Rc<Self> { Rc::new(Self::default()) }

    pub fn set_filter(&self, filter: RestaurantFilter) { *self.filter.borrow_mut() = filter; }
    pub fn set_menu_type(&self, menu_type: MenuType) { *self.menu_type.borrow_mut() = menu_type; }
    pub fn set_prompt_answer(&self, answer: Option<&str>) {
        *self.prompt_answer.borrow_mut() = answer.map(str::to_owned);
    }

    pub fn events(&self) -> Vec<UiEvent> { self.events.borrow().clone() }
    pub fn take_events(&self) -> Vec<UiEvent> { std::mem::take(&mut *self.events.borrow_mut()) }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_rows(&self) -> Option<Vec<RestaurantRow>> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            UiEvent::Restaurants(rows) => Some(rows.clone()),
            _ => None,
        })
    }

    pub fn last_session(&self) -> Option<Session> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            UiEvent::Session(session) => Some(session.clone()),
            _ => None,
        })
    }

    fn record(&self, event: UiEvent) { self.events.borrow_mut().push(event); }
}

impl ClientUi for RecordingUi {
    fn filter(&self) -> RestaurantFilter { self.filter.borrow().clone() }
    fn menu_type(&self) -> MenuType { *self.menu_type.borrow() }

    fn alert(&self, message: &str) { self.record(UiEvent::Alert(message.to_owned())); }
    fn prompt(&self, message: &str) -> Option<String> {
        self.record(UiEvent::Prompt(message.to_owned()));
        self.prompt_answer.borrow().clone()
    }

    fn render_session(&self, session: &Session) { self.record(UiEvent::Session(session.clone())); }
    fn render_restaurants(&self, rows: &[RestaurantRow]) {
        self.record(UiEvent::Restaurants(rows.to_vec()));
    }
    fn render_restaurants_error(&self) { self.record(UiEvent::RestaurantsError); }
    fn show_menu(&self, menu: &MenuContent) { self.record(UiEvent::Menu(menu.clone())); }
}
