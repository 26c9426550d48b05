use crate::constants::{
    DEFAULT_CENTER, DEFAULT_SPAN, MAP_IMAGE_SIZE, MAP_MARGIN_PX, MARKER_STYLE, MAX_CENTER_LAT,
    MAX_CENTER_LNG, MAX_SPAN, MIN_CENTER_LAT, MIN_CENTER_LNG, MIN_SPAN,
};
use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Map rendering style requested from the static map renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OverlayKind {
    #[default]
    Schematic,
    Satellite,
    Hybrid,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 3] = [Self::Schematic, Self::Satellite, Self::Hybrid];

    /// Value of the `l` query parameter
    pub fn layer_code(&self) -> &'static str {
        match self {
            Self::Schematic => "map",
            Self::Satellite => "sat",
            Self::Hybrid => "sat,skl",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Schematic => "Schematic",
            Self::Satellite => "Satellite",
            Self::Hybrid => "Hybrid",
        }
    }
}

/// A marker drawn by the map renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub position: LatLng,
    pub style: String,
}

impl MapMarker {
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            style: MARKER_STYLE.to_string(),
        }
    }

    /// Value of the `pt` query parameter: `"lng,lat,style"`
    pub fn to_query(&self) -> String {
        format!("{},{}", self.position.to_query(), self.style)
    }
}

/// Axis of a keyboard pan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Sign of a keyboard pan along its axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Placement of the rendered map image inside the window, used to interpret clicks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl ImageFrame {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }
}

impl Default for ImageFrame {
    fn default() -> Self {
        Self::new(
            MAP_IMAGE_SIZE.0 as f64,
            MAP_IMAGE_SIZE.1 as f64,
            MAP_MARGIN_PX,
        )
    }
}

/// Current view of the map: what to request from the renderer and what the
/// last search resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// Angular width and height of the visible area in degrees
    pub span: f64,
    pub overlay: OverlayKind,
    pub marker: Option<MapMarker>,
    pub postal_code: Option<String>,
    pub address: Option<String>,
}

impl ViewState {
    /// Creates a view centred on `center` with the given span, clamped to the allowed range
    pub fn new(center: LatLng, span: f64) -> Self {
        Self {
            center,
            span: span.clamp(MIN_SPAN, MAX_SPAN),
            overlay: OverlayKind::default(),
            marker: None,
            postal_code: None,
            address: None,
        }
    }

    /// Zoom control step up (PageUp): doubles the span.
    ///
    /// Returns `false` without touching the state when the span is already
    /// at its maximum.
    pub fn zoom_in(&mut self) -> bool {
        if self.span >= MAX_SPAN {
            return false;
        }
        self.span = (self.span * 2.0).min(MAX_SPAN);
        true
    }

    /// Zoom control step down (PageDown): halves the span.
    ///
    /// Returns `false` without touching the state when the span is already
    /// at its minimum.
    pub fn zoom_out(&mut self) -> bool {
        if self.span <= MIN_SPAN {
            return false;
        }
        self.span = (self.span / 2.0).max(MIN_SPAN);
        true
    }

    /// Moves the center by one span along `axis`.
    ///
    /// Returns whether the map needs to be fetched again. A step that runs
    /// into the pan limits leaves the center on the limit and returns `false`.
    /// Below the lower limit the center is held at 1.0, not at
    /// `min(span, 1.0)`, so the center never leaves [1, 85] x [1, 179].
    pub fn pan_by(&mut self, axis: Axis, direction: Direction) -> bool {
        let step = self.span;
        let (value, min, max) = match axis {
            Axis::Latitude => (&mut self.center.lat, MIN_CENTER_LAT, MAX_CENTER_LAT),
            Axis::Longitude => (&mut self.center.lng, MIN_CENTER_LNG, MAX_CENTER_LNG),
        };

        match direction {
            Direction::Increase => {
                *value += step;
                if *value > max {
                    *value = max;
                    return false;
                }
            }
            Direction::Decrease => {
                *value -= step;
                if *value < min {
                    *value = min;
                    return false;
                }
            }
        }
        true
    }

    /// Switches the rendering style. Always requires a refetch.
    pub fn set_overlay_kind(&mut self, kind: OverlayKind) -> bool {
        self.overlay = kind;
        true
    }

    /// Centres the view on a place found by a text or coordinate search.
    ///
    /// An empty `postal_code` means the geocoder had none for this place.
    pub fn place_marker_at_resolved_location(
        &mut self,
        position: LatLng,
        address: impl Into<String>,
        postal_code: impl Into<String>,
    ) {
        self.center = position;
        self.span = DEFAULT_SPAN;
        self.marker = Some(MapMarker::new(position));
        self.address = Some(address.into());
        self.postal_code = Some(postal_code.into());
    }

    /// Marks a clicked point without moving the view
    pub fn place_marker_at_clicked_location(&mut self, position: LatLng, address: impl Into<String>) {
        self.marker = Some(MapMarker::new(position));
        self.address = Some(address.into());
        self.postal_code = None;
    }

    /// Marks an organization found near the view center.
    ///
    /// The caller is responsible for checking that the organization lies
    /// within [`ORGANIZATION_MAX_DISTANCE_M`](crate::constants::ORGANIZATION_MAX_DISTANCE_M)
    /// of the center.
    pub fn place_organization_marker(&mut self, position: LatLng, name: &str, address: &str) {
        self.marker = Some(MapMarker::new(position));
        self.postal_code = None;
        self.address = Some(format!("{name}\n{address}"));
    }

    /// Drops the marker and everything the last search resolved
    pub fn reset_search(&mut self) {
        self.marker = None;
        self.postal_code = None;
        self.address = None;
    }

    /// Converts a click position into a coordinate.
    ///
    /// `pixel` is relative to the window, so the frame margin is removed
    /// first. Returns `None` for clicks outside the image.
    ///
    /// The image is treated as a linear projection of a `span × span` degree
    /// square around the center. That is only an approximation and only
    /// holds up because the span stays small.
    pub fn pixel_to_coordinate(&self, pixel: Point, frame: &ImageFrame) -> Option<LatLng> {
        let local = pixel.subtract(&Point::new(frame.margin, frame.margin));
        if !(0.0..=frame.width).contains(&local.x) || !(0.0..=frame.height).contains(&local.y) {
            return None;
        }

        let half = self.span / 2.0;
        let lng = self.center.lng - half + self.span / frame.width * local.x;
        let lat = self.center.lat - half + self.span / frame.height * local.y;
        Some(LatLng::from_lng_lat(lng, lat))
    }

    /// Query parameters for the static map renderer
    pub fn static_map_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("ll", self.center.to_query()),
            ("l", self.overlay.layer_code().to_string()),
            ("spn", format!("{},{}", self.span, self.span)),
            ("size", format!("{},{}", MAP_IMAGE_SIZE.0, MAP_IMAGE_SIZE.1)),
        ];
        if let Some(marker) = &self.marker {
            params.push(("pt", marker.to_query()));
        }
        params
    }

    /// Text for the address box, with the postal code appended in
    /// parentheses when requested and known.
    pub fn address_text(&self, show_postal_code: bool) -> String {
        let address = self.address.as_deref().unwrap_or_default();
        match self.postal_code.as_deref() {
            Some(code) if show_postal_code && !code.is_empty() => format!("{address} ({code})"),
            _ => address.to_string(),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(
            LatLng::from_lng_lat(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            DEFAULT_SPAN,
        )
    }
}
