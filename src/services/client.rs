use super::geocoder::{geocoder_params, parse_toponym, Toponym};
use super::search::{parse_organization, search_params, Organization};
use super::MapService;
use crate::core::config::ServiceConfig;
use crate::core::geo::LatLng;
use crate::core::viewport::ViewState;
use crate::{MapError, Result};
use reqwest::blocking::{Client, Response};

/// [`MapService`] backed by a blocking HTTP client.
///
/// Requests run one at a time on the calling thread.
pub struct HttpMapService {
    client: Client,
    config: ServiceConfig,
}

impl HttpMapService {
    /// Build the client once; TLS and the connection pool are reused for
    /// every request after that.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<Response> {
        log::debug!("GET {} ({} params)", url, params.len());
        let resp = self.client.get(url).query(params).send()?;

        let status = resp.status();
        if !status.is_success() {
            let err = MapError::RequestFailed {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: resp.url().to_string(),
            };
            log::warn!("{}", err);
            return Err(err);
        }
        Ok(resp)
    }
}

impl MapService for HttpMapService {
    fn fetch_map(&self, view: &ViewState) -> Result<Vec<u8>> {
        let resp = self.get(&self.config.static_map_url, &view.static_map_params())?;
        let bytes = resp.bytes()?;
        log::debug!("map image: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    fn geocode(&self, query: &str) -> Result<Toponym> {
        let resp = self.get(
            &self.config.geocoder_url,
            &geocoder_params(&self.config, query),
        )?;
        let toponym = parse_toponym(query, &resp.text()?)?;
        log::info!("{:?} resolved to {} at {}", query, toponym.address, toponym.position);
        Ok(toponym)
    }

    fn find_organization(&self, near: LatLng) -> Result<Option<Organization>> {
        let resp = self.get(&self.config.search_url, &search_params(&self.config, near))?;
        parse_organization(&resp.text()?)
    }
}
