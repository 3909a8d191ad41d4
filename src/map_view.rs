use log::{debug, warn};

use crate::config::MapOptions;
use crate::error::MapError;
use crate::model::{GeoPoint, Restaurant};


pub type MarkerId = usize;

// Capability interface over a concrete map widget (Mapbox GL in the browser, a text listing in
// the console client, a recorder in tests).
pub trait MapWidget {
    // Retried on later refreshes until it succeeds, then never called again.
    fn create_map(&mut self, options: &MapOptions) -> Result<(), MapError>;
    // Places a marker with a text popup. The returned id is later passed to `remove_marker`.
    fn add_marker(&mut self, point: GeoPoint, label: &str) -> Result<MarkerId, MapError>;
    fn remove_marker(&mut self, marker: MarkerId);
}

// Keeps track of what has been placed on the widget: the map is created lazily on the first
// successful refresh and never recreated once it exists; markers are fully replaced on every
// refresh. If creation fails, no markers are placed and creation is retried on the next refresh.
pub struct MapView {
    widget: Box<dyn MapWidget>,
    options: MapOptions,
    created: bool,
    markers: Vec<MarkerId>,
}

impl MapView {
    pub fn new(widget: Box<dyn MapWidget>, options: MapOptions) -> Self {
        MapView {
            widget,
            options,
            created: false,
            markers: vec![],
        }
    }

    pub fn is_created(&self) -> bool { self.created }
    pub fn marker_count(&self) -> usize { self.markers.len() }

    pub fn ensure_map(&mut self) -> Result<(), MapError> {
        if !self.created {
            debug!("Creating map in #{}", self.options.container);
            self.widget.create_map(&self.options)?;
            self.created = true;
        }
        Ok(())
    }

    pub fn clear_markers(&mut self) {
        for marker in self.markers.drain(..) {
            self.widget.remove_marker(marker);
        }
    }

    // Replaces all markers with one marker per restaurant that has a location.
    pub fn show_restaurants(&mut self, restaurants: &[Restaurant]) {
        if let Err(err) = self.ensure_map() {
            warn!("{err}");
            return;
        }
        self.clear_markers();
        for restaurant in restaurants {
            let Some(point) = restaurant.geo_point() else {
                continue;
            };
            match self.widget.add_marker(point, &restaurant.name) {
                Ok(marker) => self.markers.push(marker),
                Err(err) => warn!("Cannot place marker for {}: {err}", restaurant.id),
            }
        }
    }
}
