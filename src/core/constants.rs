//! Core constants of the viewer: view limits, the rendered image geometry and
//! the defaults the session starts from.
//! Keeping them in a single place makes it easier to tweak app-wide magic numbers.

/// Smallest allowed span in degrees (most zoomed in).
pub const MIN_SPAN: f64 = 0.002;

/// Largest allowed span in degrees (most zoomed out).
pub const MAX_SPAN: f64 = 89.0;

/// Span used at startup and after a place search resolves.
pub const DEFAULT_SPAN: f64 = 0.003;

/// Startup center as (longitude, latitude).
pub const DEFAULT_CENTER: (f64, f64) = (30.312363709126018, 59.94157564755226);

/// Longitude range the center may be panned within.
pub const MIN_CENTER_LNG: f64 = 1.0;
pub const MAX_CENTER_LNG: f64 = 179.0;

/// Latitude range the center may be panned within.
pub const MIN_CENTER_LAT: f64 = 1.0;
pub const MAX_CENTER_LAT: f64 = 85.0;

/// Size of the static map image requested from the renderer, in pixels.
pub const MAP_IMAGE_SIZE: (u32, u32) = (600, 450);

/// Border between the window edge and the map image, in pixels.
pub const MAP_MARGIN_PX: f64 = 10.0;

/// Marker icon identifier understood by the map renderer.
pub const MARKER_STYLE: &str = "pm2rdm";

/// Metres per degree of latitude (no ellipsoid correction).
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// How close an organization must be to the view center to be shown.
pub const ORGANIZATION_MAX_DISTANCE_M: f64 = 50.0;
