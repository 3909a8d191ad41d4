// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::rc::Rc;

use lunch_map::client::ClientState;
use lunch_map::config::ClientConfig;
use lunch_map::session_store::MemorySlot;
use lunch_map::test_util::{MockTransport, RecordingMap, RecordingUi};
use serde_json::json;


pub const API: &str = "/restaurant/api/v1";

#[allow(dead_code)]
pub fn path(suffix: &str) -> String { format!("{API}{suffix}") }

pub struct TestClient {
    pub client: ClientState,
    pub transport: MockTransport,
    pub slot: Rc<MemorySlot>,
    pub map: RecordingMap,
    pub ui: Rc<RecordingUi>,
}

impl TestClient {
    pub fn new() -> Self { Self::with_slot(MemorySlot::new()) }

    // Simulates a reload with a token left in storage by a previous session.
    #[allow(dead_code)]
    pub fn with_token(token: &str) -> Self { Self::with_slot(MemorySlot::with_entry("token", token)) }

    fn with_slot(slot: MemorySlot) -> Self {
        let transport = MockTransport::new();
        let slot = Rc::new(slot);
        let map = RecordingMap::new();
        let ui = RecordingUi::new();
        let client = ClientState::new(
            &ClientConfig::default(),
            Box::new(transport.clone()),
            Box::new(Rc::clone(&slot)),
            Box::new(map.clone()),
            ui.clone(),
        )
        .unwrap();
        TestClient { client, transport, slot, map, ui }
    }
}

#[allow(dead_code)]
pub fn user_json(id: &str, username: &str, favourite: Option<&str>) -> serde_json::Value {
    let mut user = json!({ "_id": id, "username": username, "email": format!("{username}@example.com") });
    if let Some(favourite) = favourite {
        user["favouriteRestaurant"] = json!(favourite);
    }
    user
}

#[allow(dead_code)]
pub fn listing_json(restaurants: serde_json::Value) -> serde_json::Value {
    json!({ "restaurants": restaurants })
}
