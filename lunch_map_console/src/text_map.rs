use console::Style;
use log::info;

use lunch_map::config::MapOptions;
use lunch_map::error::MapError;
use lunch_map::map_view::{MapWidget, MarkerId};
use lunch_map::model::GeoPoint;


// Stand-in for a map widget: prints markers as they are placed.
pub struct TextMap {
    next_id: MarkerId,
    verbose: bool,
}

impl TextMap {
    pub fn new(verbose: bool) -> Self { TextMap { next_id: 0, verbose } }
}

impl MapWidget for TextMap {
    fn create_map(&mut self, options: &MapOptions) -> Result<(), MapError> {
        info!(
            "Map centered at ({:.4}, {:.4}), zoom {}",
            options.center.lon, options.center.lat, options.zoom
        );
        Ok(())
    }

    fn add_marker(&mut self, point: GeoPoint, label: &str) -> Result<MarkerId, MapError> {
        let id = self.next_id;
        self.next_id += 1;
        if self.verbose {
            println!(
                "{} {label} ({:.5}, {:.5})",
                Style::new().red().apply_to("📍"),
                point.lat,
                point.lon
            );
        }
        Ok(id)
    }

    fn remove_marker(&mut self, _marker: MarkerId) {}
}
