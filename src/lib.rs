//! # mapview
//!
//! Core of a static-map viewer: the viewport model that decides what map
//! image to request, the input model that turns keyboard and mouse events
//! into view changes, and blocking clients for the static map, geocoder and
//! organization search endpoints.

pub mod core;
pub mod input;
pub mod prelude;
pub mod services;
pub mod session;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::ServiceConfig,
    geo::{ground_distance_meters, LatLng, Point},
    viewport::{Axis, Direction, ImageFrame, MapMarker, OverlayKind, ViewState},
};

pub use crate::input::{events::InputEvent, handler::InputHandler};

pub use crate::services::{HttpMapService, MapService, Organization, Toponym};

pub use crate::session::MapSession;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request failed: {status}. Reason: {reason}, {url}")]
    RequestFailed {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Nothing found for {0:?}")]
    NotFound(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
