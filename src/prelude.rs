//! Prelude module for common mapview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapview::prelude::*;`

pub use crate::core::{
    config::ServiceConfig,
    geo::{ground_distance_meters, LatLng, Point},
    viewport::{Axis, Direction, ImageFrame, MapMarker, OverlayKind, ViewState},
};

pub use crate::input::{
    events::{InputEvent, KeyCode, MouseButton},
    handler::{Action, InputHandler},
};

pub use crate::services::{HttpMapService, MapService, Organization, Toponym};

pub use crate::session::MapSession;

pub use crate::{Error as MapError, Result};
