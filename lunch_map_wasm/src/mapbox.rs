// Bindings for the Mapbox GL JS global (`mapboxgl`), loaded by the page via a <script> tag.

use std::collections::HashMap;

use js_sys::{Array, Object, Reflect};
use lunch_map::config::MapOptions;
use lunch_map::error::MapError;
use lunch_map::map_view::{MapWidget, MarkerId};
use lunch_map::model::GeoPoint;
use wasm_bindgen::prelude::*;

use crate::rust_error;
use crate::web_document::web_document;
use crate::web_error_handling::{JsResult, describe_js_error};


#[wasm_bindgen(js_namespace = mapboxgl)]
extern "C" {
    #[wasm_bindgen(js_name = Map)]
    type MapboxMap;
    #[wasm_bindgen(constructor, js_class = "Map", catch)]
    fn new(options: &Object) -> Result<MapboxMap, JsValue>;

    #[wasm_bindgen(js_name = Marker)]
    type MapboxMarker;
    #[wasm_bindgen(constructor, js_class = "Marker")]
    fn new() -> MapboxMarker;
    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &MapboxMarker, lng_lat: &Array) -> MapboxMarker;
    #[wasm_bindgen(method, js_name = setPopup)]
    fn set_popup(this: &MapboxMarker, popup: &MapboxPopup) -> MapboxMarker;
    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &MapboxMarker, map: &MapboxMap) -> MapboxMarker;
    #[wasm_bindgen(method)]
    fn remove(this: &MapboxMarker) -> MapboxMarker;

    #[wasm_bindgen(js_name = Popup)]
    type MapboxPopup;
    #[wasm_bindgen(constructor, js_class = "Popup")]
    fn new() -> MapboxPopup;
    #[wasm_bindgen(method, js_name = setText)]
    fn set_text(this: &MapboxPopup, text: &str) -> MapboxPopup;
}

fn lng_lat(point: GeoPoint) -> Array {
    Array::of2(&JsValue::from_f64(point.lon), &JsValue::from_f64(point.lat))
}

fn set_access_token(token: &str) -> JsResult<()> {
    let mapboxgl = Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))?;
    if mapboxgl.is_undefined() {
        return Err(rust_error!("mapboxgl is not loaded"));
    }
    Reflect::set(&mapboxgl, &JsValue::from_str("accessToken"), &JsValue::from_str(token))?;
    Ok(())
}

fn map_options_object(options: &MapOptions) -> JsResult<Object> {
    let container = web_document()?.get_existing_element_by_id(&options.container)?;
    let object = Object::new();
    Reflect::set(&object, &"container".into(), &container)?;
    Reflect::set(&object, &"style".into(), &JsValue::from_str(&options.style))?;
    Reflect::set(&object, &"center".into(), &lng_lat(options.center))?;
    Reflect::set(&object, &"zoom".into(), &JsValue::from_f64(options.zoom))?;
    Ok(object)
}

// Creation fails while the Mapbox script is not loaded or the container is missing. The caller
// retries on the next refresh.
#[derive(Default)]
pub struct MapboxWidget {
    map: Option<MapboxMap>,
    markers: HashMap<MarkerId, MapboxMarker>,
    next_id: MarkerId,
}

impl MapboxWidget {
    pub fn new() -> Self { Self::default() }

    fn try_create_map(&mut self, options: &MapOptions) -> JsResult<()> {
        if !options.access_token.is_empty() {
            set_access_token(&options.access_token)?;
        }
        self.map = Some(MapboxMap::new(&map_options_object(options)?)?);
        Ok(())
    }
}

impl MapWidget for MapboxWidget {
    fn create_map(&mut self, options: &MapOptions) -> Result<(), MapError> {
        self.try_create_map(options).map_err(|err| MapError(describe_js_error(&err)))
    }

    fn add_marker(&mut self, point: GeoPoint, label: &str) -> Result<MarkerId, MapError> {
        let Some(map) = &self.map else {
            return Err(MapError("map is not created".to_owned()));
        };
        let marker = MapboxMarker::new()
            .set_lng_lat(&lng_lat(point))
            .set_popup(&MapboxPopup::new().set_text(label))
            .add_to(map);
        let id = self.next_id;
        self.next_id += 1;
        self.markers.insert(id, marker);
        Ok(id)
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        if let Some(marker) = self.markers.remove(&marker) {
            marker.remove();
        }
    }
}
