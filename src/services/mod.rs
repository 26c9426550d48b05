pub mod client;
pub mod geocoder;
pub mod search;

use crate::core::geo::LatLng;
use crate::core::viewport::ViewState;
use crate::Result;

// Re-exports for convenience
pub use client::HttpMapService;
pub use geocoder::Toponym;
pub use search::Organization;

/// The three remote operations the viewer depends on.
pub trait MapService {
    /// Render the map image (PNG bytes) for the current view.
    fn fetch_map(&self, view: &ViewState) -> Result<Vec<u8>>;

    /// Resolve free text, or a `"lng,lat"` pair, to the best matching place.
    fn geocode(&self, query: &str) -> Result<Toponym>;

    /// Find the nearest organization around `near`, if there is one.
    fn find_organization(&self, near: LatLng) -> Result<Option<Organization>>;
}
