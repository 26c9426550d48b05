//! A viewer session: one view, one service, one request at a time
//!
//! [`MapSession`] feeds input events through the [`InputHandler`], runs the
//! remote lookups they call for and folds the results back into the view.
//! Failures never abort the session; they are kept as a message for the
//! shell to show and the previous image stays on screen.

use crate::{
    constants::ORGANIZATION_MAX_DISTANCE_M,
    core::{
        geo::{ground_distance_meters, LatLng},
        viewport::{ImageFrame, ViewState},
    },
    input::{
        events::InputEvent,
        handler::{Action, InputHandler},
    },
    services::MapService,
    MapError,
};

pub struct MapSession<S: MapService> {
    service: S,
    view: ViewState,
    input: InputHandler,
    image: Option<Vec<u8>>,
    /// Bumped on every successfully fetched image
    image_revision: u64,
    last_error: Option<String>,
}

impl<S: MapService> MapSession<S> {
    /// Starts a session on the default view and fetches its first image
    pub fn new(service: S) -> Self {
        Self::with_view(service, ViewState::default(), ImageFrame::default())
    }

    pub fn with_view(service: S, view: ViewState, frame: ImageFrame) -> Self {
        let mut session = Self {
            service,
            view,
            input: InputHandler::new(frame),
            image: None,
            image_revision: 0,
            last_error: None,
        };
        session.refresh_map();
        session
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Latest map image, if any request has succeeded yet
    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    pub fn image_revision(&self) -> u64 {
        self.image_revision
    }

    pub fn show_postal_code(&self) -> bool {
        self.input.show_postal_code()
    }

    /// Text for the address box
    pub fn address_text(&self) -> String {
        self.view.address_text(self.input.show_postal_code())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Apply an input event and run whatever requests it calls for.
    ///
    /// Returns the action the event resolved to.
    pub fn handle(&mut self, event: &InputEvent) -> Action {
        let action = self.input.handle(&mut self.view, event);
        log::debug!("{:?} -> {:?}", event, action);

        match &action {
            Action::None | Action::RefreshAddress => {}
            Action::Refetch => {
                self.refresh_map();
            }
            Action::Geocode(query) => self.search_place(query),
            Action::ReverseGeocode(coordinate) => self.search_clicked(*coordinate),
            Action::FindOrganization(coordinate) => self.search_organization(*coordinate),
        }
        action
    }

    /// Requests the image for the current view; keeps the old one on failure
    pub fn refresh_map(&mut self) -> bool {
        match self.service.fetch_map(&self.view) {
            Ok(bytes) => {
                self.image = Some(bytes);
                self.image_revision += 1;
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn search_place(&mut self, query: &str) {
        match self.service.geocode(query) {
            Ok(toponym) => {
                self.view.place_marker_at_resolved_location(
                    toponym.position,
                    toponym.address,
                    toponym.postal_code,
                );
                self.refresh_map();
            }
            Err(e) => self.report(e),
        }
    }

    fn search_clicked(&mut self, coordinate: LatLng) {
        match self.service.geocode(&coordinate.to_query()) {
            Ok(toponym) => {
                self.view
                    .place_marker_at_clicked_location(coordinate, toponym.address);
                self.refresh_map();
            }
            Err(e) => self.report(e),
        }
    }

    fn search_organization(&mut self, coordinate: LatLng) {
        let organization = match self.service.find_organization(coordinate) {
            Ok(Some(organization)) => organization,
            Ok(None) => {
                log::info!("no organization near {}", coordinate);
                return;
            }
            Err(e) => {
                self.report(e);
                return;
            }
        };

        let distance = ground_distance_meters(&self.view.center, &organization.position);
        if distance > ORGANIZATION_MAX_DISTANCE_M {
            log::info!(
                "{} is {:.0} m from the center, not showing it",
                organization.name,
                distance
            );
            return;
        }

        self.view.place_organization_marker(
            organization.position,
            &organization.name,
            &organization.address,
        );
        self.refresh_map();
    }

    fn report(&mut self, error: MapError) {
        log::error!("{}", error);
        self.last_error = Some(error.to_string());
    }
}
