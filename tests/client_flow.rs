// Improvement potential. Cover overlapping refreshes once there is a way to hold a mock response
//   until the test releases it.

mod common;

use common::*;
use lunch_map::error::LoginError;
use lunch_map::menu::{MenuContent, MenuType};
use lunch_map::model::{Course, GeoPoint, WeeklyMenuDay};
use lunch_map::restaurant_filter::RestaurantFilter;
use lunch_map::session::Session;
use lunch_map::session_store::KeyValueSlot;
use lunch_map::test_util::UiEvent;
use lunch_map::ui::{self, RestaurantRow};
use pretty_assertions::assert_eq;
use serde_json::json;


fn two_restaurants() -> serde_json::Value {
    listing_json(json!([
        {
            "_id": "1", "name": "Kasarmi", "address": "Kasarmikatu 1", "city": "Helsinki",
            "company": "X", "location": { "type": "Point", "coordinates": [24.95, 60.16] }
        },
        {
            "_id": "2", "name": "Tapiola", "city": "Espoo", "company": "Y",
            "location": { "type": "Point", "coordinates": [24.80, 60.17] }
        },
    ]))
}

fn row_ids(rows: &[RestaurantRow]) -> Vec<&str> { rows.iter().map(|r| r.id.as_str()).collect() }


// Auth flow

#[async_std::test]
async fn login_persists_token_and_fetches_profile() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/auth/login"), json!({ "token": "T1" }));
    t.transport.respond_json(&path("/users/token"), user_json("u1", "a", None));
    t.transport.respond_json(&path("/restaurants"), listing_json(json!([])));

    t.client.login("a", "b").await.unwrap();

    assert_eq!(t.slot.get("token").unwrap(), Some("T1".to_owned()));
    assert_eq!(t.client.session_store().get(), Some("T1".to_owned()));

    let login = &t.transport.requests_to(&path("/auth/login"))[0];
    assert_eq!(login.body.as_deref(), Some(r#"{"username":"a","password":"b"}"#));
    assert_eq!(login.headers.get("Authorization"), None);

    let profile = &t.transport.requests_to(&path("/users/token"))[0];
    assert_eq!(profile.headers.get("Authorization"), Some("Bearer T1"));

    assert_eq!(
        t.transport.paths(),
        vec![path("/auth/login"), path("/users/token"), path("/restaurants")]
    );
    assert_eq!(t.client.session().user_name(), Some("a"));
    assert_eq!(t.ui.last_session().unwrap().user_info_text(), "Logged in as a");
    assert!(t.ui.alerts().is_empty());
}

#[async_std::test]
async fn login_without_token_changes_nothing() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/auth/login"), json!({ "message": "whatever" }));

    let result = t.client.login("a", "b").await;

    assert_eq!(result, Err(LoginError::NoToken));
    assert_eq!(t.slot.get("token").unwrap(), None);
    assert_eq!(t.client.session_store().get(), None);
    assert_eq!(t.transport.paths(), vec![path("/auth/login")]);
    assert_eq!(t.ui.events(), vec![UiEvent::Alert(ui::NO_TOKEN_MESSAGE.to_owned())]);
}

#[async_std::test]
async fn login_with_empty_token_is_rejected() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/auth/login"), json!({ "token": "" }));
    assert_eq!(t.client.login("a", "b").await, Err(LoginError::NoToken));
    assert_eq!(t.client.session_store().get(), None);
}

#[async_std::test]
async fn login_rejected_by_service() {
    let t = TestClient::new();
    t.transport.respond(&path("/auth/login"), 401, "Incorrect username/password");

    let result = t.client.login("a", "wrong").await;

    assert!(matches!(result, Err(LoginError::Api(_))));
    assert_eq!(t.client.session_store().get(), None);
    assert_eq!(t.ui.events(), vec![UiEvent::Alert(ui::LOGIN_FAILED_MESSAGE.to_owned())]);
}

#[async_std::test]
async fn login_survives_profile_failure() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/auth/login"), json!({ "token": "T1" }));
    t.transport.respond(&path("/users/token"), 500, "oops");
    t.transport.respond_json(&path("/restaurants"), listing_json(json!([])));

    t.client.login("a", "b").await.unwrap();

    assert_eq!(t.client.session_store().get(), Some("T1".to_owned()));
    assert_eq!(t.client.session(), Session::LoggedOut);
    assert!(t.ui.alerts().is_empty());
    assert_eq!(t.transport.requests_to(&path("/restaurants")).len(), 1);
}

#[async_std::test]
async fn logout_clears_session_and_is_idempotent() {
    let t = TestClient::with_token("T1");
    t.transport.respond_json(&path("/users/token"), user_json("u1", "a", None));
    t.client.load_current_user().await;
    assert!(t.client.session().is_logged_in());
    let requests_before = t.transport.requests().len();

    t.client.logout();
    assert_eq!(t.client.session_store().get(), None);
    assert_eq!(t.slot.get("token").unwrap(), None);
    assert_eq!(t.ui.last_session(), Some(Session::LoggedOut));

    t.ui.take_events();
    t.client.logout();
    assert_eq!(t.ui.events(), vec![UiEvent::Session(Session::LoggedOut)]);
    assert_eq!(t.transport.requests().len(), requests_before);
}

#[async_std::test]
async fn load_current_user_without_token_is_noop() {
    let t = TestClient::new();
    t.client.load_current_user().await;
    assert!(t.transport.requests().is_empty());
    assert_eq!(t.client.session(), Session::LoggedOut);
}

#[async_std::test]
async fn register_with_prompted_email() {
    let t = TestClient::new();
    t.ui.set_prompt_answer(Some("a@example.com"));
    t.transport.respond_json(&path("/users"), json!({ "message": "user created" }));

    t.client.register("a", "b", None).await.unwrap();

    let request = &t.transport.requests_to(&path("/users"))[0];
    assert_eq!(
        request.body.as_deref(),
        Some(r#"{"username":"a","password":"b","email":"a@example.com"}"#)
    );
    assert_eq!(
        t.ui.events(),
        vec![
            UiEvent::Prompt(ui::EMAIL_PROMPT.to_owned()),
            UiEvent::Alert(ui::REGISTERED_MESSAGE.to_owned()),
        ]
    );
    assert_eq!(t.client.session_store().get(), None);
}

#[async_std::test]
async fn register_with_given_email_does_not_prompt() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/users"), json!({}));
    t.client.register("a", "b", Some("a@example.com")).await.unwrap();
    assert_eq!(t.ui.events(), vec![UiEvent::Alert(ui::REGISTERED_MESSAGE.to_owned())]);
}

#[async_std::test]
async fn register_failure() {
    let t = TestClient::new();
    t.ui.set_prompt_answer(None);
    t.transport.respond(&path("/users"), 400, "username taken");

    assert!(t.client.register("a", "b", None).await.is_err());

    let request = &t.transport.requests_to(&path("/users"))[0];
    assert_eq!(request.body.as_deref(), Some(r#"{"username":"a","password":"b","email":""}"#));
    assert_eq!(t.ui.alerts(), vec![ui::REGISTRATION_FAILED_MESSAGE.to_owned()]);
}

#[async_std::test]
async fn init_restores_persisted_session() {
    let t = TestClient::with_token("T0");
    t.transport.respond_json(&path("/users/token"), user_json("u1", "a", Some("2")));
    t.transport.respond_json(&path("/restaurants"), two_restaurants());

    t.client.init().await;

    assert_eq!(t.transport.paths(), vec![path("/users/token"), path("/restaurants")]);
    assert_eq!(t.ui.last_session().unwrap().user_name(), Some("a"));
    let rows = t.ui.last_rows().unwrap();
    assert_eq!(rows.iter().map(|r| r.favourite).collect::<Vec<_>>(), vec![false, true]);
}

#[async_std::test]
async fn init_without_token_renders_logged_out() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/restaurants"), two_restaurants());

    t.client.init().await;

    assert_eq!(t.transport.paths(), vec![path("/restaurants")]);
    assert_eq!(t.ui.last_session(), Some(Session::LoggedOut));
    assert_eq!(t.ui.last_session().unwrap().user_info_text(), "");
}


// Restaurant list and map

#[async_std::test]
async fn refresh_filters_by_city() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/restaurants"), two_restaurants());
    t.ui.set_filter(RestaurantFilter::new("hel", ""));

    assert_eq!(t.client.refresh_restaurants().await, Ok(1));

    let rows = t.ui.last_rows().unwrap();
    assert_eq!(row_ids(&rows), vec!["1"]);
    assert_eq!(
        rows[0],
        RestaurantRow {
            id: "1".to_owned(),
            name: "Kasarmi".to_owned(),
            address_line: "Kasarmikatu 1, Helsinki".to_owned(),
            favourite: false,
        }
    );
    assert_eq!(t.map.labels(), vec!["Kasarmi".to_owned()]);
    assert_eq!(t.map.markers()[0].point, GeoPoint::new(24.95, 60.16));
}

#[async_std::test]
async fn refresh_filters_by_company() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/restaurants"), two_restaurants());
    t.ui.set_filter(RestaurantFilter::new("", "Y"));
    t.client.refresh_restaurants().await.unwrap();
    assert_eq!(row_ids(&t.ui.last_rows().unwrap()), vec!["2"]);
}

#[async_std::test]
async fn markers_only_for_located_restaurants() {
    let t = TestClient::new();
    t.transport.respond_json(
        &path("/restaurants"),
        listing_json(json!([
            { "_id": "1", "name": "A", "company": "X", "location": { "type": "Point", "coordinates": [24.9, 60.1] } },
            { "_id": "2", "name": "B", "company": "X" },
            { "_id": "3", "name": "C", "company": "X", "location": { "type": "Point", "coordinates": [25.0, 60.2] } },
        ])),
    );

    assert_eq!(t.client.refresh_restaurants().await, Ok(3));

    assert_eq!(t.ui.last_rows().unwrap().len(), 3);
    assert_eq!(t.map.labels(), vec!["A".to_owned(), "C".to_owned()]);
    assert_eq!(t.client.marker_count(), 2);
}

#[async_std::test]
async fn refresh_replaces_markers_and_creates_map_once() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/restaurants"), two_restaurants());

    t.client.refresh_restaurants().await.unwrap();
    assert_eq!(t.map.markers().len(), 2);

    t.ui.set_filter(RestaurantFilter::new("espoo", ""));
    t.client.refresh_restaurants().await.unwrap();

    assert_eq!(t.map.maps_created(), 1);
    assert_eq!(t.map.labels(), vec!["Tapiola".to_owned()]);
    assert_eq!(t.map.removed_count(), 2);
    assert_eq!(t.client.marker_count(), 1);
}

#[async_std::test]
async fn failed_refresh_shows_placeholder_and_keeps_map() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/restaurants"), two_restaurants());
    t.transport.respond(&path("/restaurants"), 503, "maintenance");

    t.client.refresh_restaurants().await.unwrap();
    t.ui.take_events();
    assert!(t.client.refresh_restaurants().await.is_err());

    assert_eq!(t.ui.events(), vec![UiEvent::RestaurantsError]);
    assert_eq!(t.map.maps_created(), 1);
    assert_eq!(t.map.markers().len(), 2);
    assert_eq!(t.client.marker_count(), 2);
}

#[async_std::test]
async fn failed_first_refresh_does_not_create_map() {
    let t = TestClient::new();
    t.transport.fail(&path("/restaurants"), "offline");
    assert!(t.client.refresh_restaurants().await.is_err());
    assert!(!t.client.map_created());
    assert_eq!(t.map.maps_created(), 0);
    assert_eq!(t.ui.events(), vec![UiEvent::RestaurantsError]);
}

#[async_std::test]
async fn malformed_location_still_lists_restaurant() {
    let t = TestClient::new();
    t.transport.respond_json(
        &path("/restaurants"),
        listing_json(json!([
            { "_id": "1", "name": "A", "city": "Helsinki", "company": "X", "location": { "type": "Point", "coordinates": [24.9, 60.1] } },
            { "_id": "2", "name": "B", "city": "Espoo", "company": null, "location": { "type": "Point" } },
        ])),
    );

    assert_eq!(t.client.refresh_restaurants().await, Ok(2));

    assert_eq!(row_ids(&t.ui.last_rows().unwrap()), vec!["1", "2"]);
    assert_eq!(t.map.labels(), vec!["A".to_owned()]);
    assert_eq!(t.client.marker_count(), 1);
}

#[async_std::test]
async fn map_creation_is_retried_until_it_succeeds() {
    let t = TestClient::new();
    t.transport.respond_json(&path("/restaurants"), two_restaurants());
    t.map.set_unavailable(true);

    assert_eq!(t.client.refresh_restaurants().await, Ok(2));
    assert_eq!(row_ids(&t.ui.last_rows().unwrap()), vec!["1", "2"]);
    assert!(!t.client.map_created());
    assert_eq!(t.client.marker_count(), 0);
    assert!(t.map.markers().is_empty());

    t.map.set_unavailable(false);
    t.client.refresh_restaurants().await.unwrap();
    assert!(t.client.map_created());
    assert_eq!(t.map.creation_attempts(), 2);
    assert_eq!(t.map.maps_created(), 1);
    assert_eq!(t.client.marker_count(), 2);

    t.client.refresh_restaurants().await.unwrap();
    assert_eq!(t.map.creation_attempts(), 2);
}

#[async_std::test]
async fn favourite_restaurant_is_marked() {
    let t = TestClient::with_token("T1");
    t.transport.respond_json(&path("/users/token"), user_json("u1", "a", Some("1")));
    t.transport.respond_json(&path("/restaurants"), two_restaurants());
    t.client.load_current_user().await;

    t.client.refresh_restaurants().await.unwrap();

    let rows = t.ui.last_rows().unwrap();
    assert_eq!(rows.iter().map(|r| r.favourite).collect::<Vec<_>>(), vec![true, false]);
    assert_eq!(
        t.transport.requests_to(&path("/restaurants"))[0].headers.get("Authorization"),
        Some("Bearer T1")
    );
}


// Menu view

#[async_std::test]
async fn daily_menu() {
    let t = TestClient::new();
    t.ui.set_menu_type(MenuType::Day);
    t.transport.respond_json(&path("/restaurants/daily/r1/fi"), json!({ "courses": [{ "name": "Soup" }] }));

    let menu = t.client.show_menu("r1").await.unwrap();

    let expected = MenuContent::Daily(vec![Course {
        name: "Soup".to_owned(),
        ..Default::default()
    }]);
    assert_eq!(menu, expected);
    assert_eq!(t.ui.events(), vec![UiEvent::Menu(expected)]);
}

#[async_std::test]
async fn weekly_menu_is_default() {
    let t = TestClient::new();
    t.transport.respond_json(
        &path("/restaurants/weekly/r1/fi"),
        json!({ "days": [{ "date": "Maanantai", "courses": [{ "name": "Soup", "price": "2.70" }] }] }),
    );

    let menu = t.client.show_menu("r1").await.unwrap();

    assert_eq!(
        menu,
        MenuContent::Weekly(vec![WeeklyMenuDay {
            date: "Maanantai".to_owned(),
            courses: vec![Course {
                name: "Soup".to_owned(),
                price: Some("2.70".to_owned()),
                ..Default::default()
            }],
            ..Default::default()
        }])
    );
    assert_eq!(t.transport.paths(), vec![path("/restaurants/weekly/r1/fi")]);
}

#[async_std::test]
async fn menu_transport_failure() {
    let t = TestClient::new();
    t.ui.set_menu_type(MenuType::Day);
    t.transport.fail(&path("/restaurants/daily/r1/fi"), "offline");

    assert!(t.client.show_menu("r1").await.is_err());

    assert_eq!(t.ui.events(), vec![UiEvent::Alert(ui::NO_MENU_MESSAGE.to_owned())]);
    assert_eq!(t.transport.requests().len(), 1);
}

#[async_std::test]
async fn menu_missing_from_response() {
    let t = TestClient::new();
    t.ui.set_menu_type(MenuType::Day);
    t.transport.respond_json(&path("/restaurants/daily/r1/fi"), json!({ "message": "no menu" }));
    assert!(t.client.show_menu("r1").await.is_err());
    assert_eq!(t.ui.alerts(), vec![ui::NO_MENU_MESSAGE.to_owned()]);
}

#[async_std::test]
async fn menu_shown_as_received() {
    let t = TestClient::new();
    t.ui.set_menu_type(MenuType::Day);
    t.transport.respond_json(
        &path("/restaurants/daily/r1/fi"),
        json!({ "courses": [{ "name": "Soup", "diets": ["G", "L"], "allergens": "milk" }] }),
    );

    let menu = t.client.show_menu("r1").await.unwrap();

    assert!(t.ui.alerts().is_empty());
    let text = menu.to_display_text();
    assert!(text.contains(r#""allergens": "milk""#), "{text}");
    assert!(text.contains(r#""G""#), "{text}");
}
