use crate::{
    core::{
        geo::LatLng,
        viewport::{Axis, Direction, ImageFrame, ViewState},
    },
    input::events::{InputEvent, KeyCode, MouseButton},
};

/// What the session has to do after an event has been applied to the view
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Nothing changed
    None,
    /// The view changed, request a new map image
    Refetch,
    /// Resolve free text to a place and centre on it
    Geocode(String),
    /// Resolve a clicked coordinate to an address
    ReverseGeocode(LatLng),
    /// Look for an organization near a clicked coordinate
    FindOrganization(LatLng),
    /// Only the address display changed
    RefreshAddress,
}

/// Applies input events to a [`ViewState`]
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    frame: ImageFrame,
    show_postal_code: bool,
}

impl InputHandler {
    pub fn new(frame: ImageFrame) -> Self {
        Self {
            frame,
            show_postal_code: false,
        }
    }

    pub fn show_postal_code(&self) -> bool {
        self.show_postal_code
    }

    /// Handle an input event and return the follow-up work
    pub fn handle(&mut self, view: &mut ViewState, event: &InputEvent) -> Action {
        match event {
            InputEvent::KeyPress { key } => Self::handle_key(view, *key),
            InputEvent::Click { position, button } => {
                let Some(coordinate) = view.pixel_to_coordinate(*position, &self.frame) else {
                    log::debug!("click at {:?} is outside the map image", position);
                    return Action::None;
                };
                match button {
                    MouseButton::Left => Action::ReverseGeocode(coordinate),
                    MouseButton::Right => Action::FindOrganization(coordinate),
                    MouseButton::Middle => Action::None,
                }
            }
            InputEvent::Search { query } => {
                let query = query.trim();
                if query.is_empty() {
                    Action::None
                } else {
                    Action::Geocode(query.to_string())
                }
            }
            InputEvent::SelectOverlay { kind } => refetch_if(view.set_overlay_kind(*kind)),
            InputEvent::ResetSearch => {
                view.reset_search();
                Action::Refetch
            }
            InputEvent::TogglePostalCode { enabled } => {
                self.show_postal_code = *enabled;
                Action::RefreshAddress
            }
        }
    }

    fn handle_key(view: &mut ViewState, key: KeyCode) -> Action {
        let changed = match key {
            KeyCode::PageUp => view.zoom_in(),
            KeyCode::PageDown => view.zoom_out(),
            KeyCode::W => view.pan_by(Axis::Latitude, Direction::Increase),
            KeyCode::S => view.pan_by(Axis::Latitude, Direction::Decrease),
            KeyCode::D => view.pan_by(Axis::Longitude, Direction::Increase),
            KeyCode::A => view.pan_by(Axis::Longitude, Direction::Decrease),
            KeyCode::Other(_) => false,
        };
        refetch_if(changed)
    }
}

fn refetch_if(changed: bool) -> Action {
    if changed {
        Action::Refetch
    } else {
        Action::None
    }
}
