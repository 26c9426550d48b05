//! Organization search request parameters and response decoding

use crate::core::config::ServiceConfig;
use crate::core::geo::LatLng;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Nearest organization returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub address: String,
    pub position: LatLng,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SearchFeature {
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(rename = "CompanyMetaData")]
    company: CompanyMetaData,
}

#[derive(Debug, Deserialize)]
struct CompanyMetaData {
    name: String,
    address: String,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    /// `[lng, lat]`
    coordinates: [f64; 2],
}

/// Query parameters for a single-result business search around `near`
pub fn search_params(config: &ServiceConfig, near: LatLng) -> Vec<(&'static str, String)> {
    vec![
        ("apikey", config.search_api_key.clone()),
        ("text", config.search_text.clone()),
        ("lang", config.search_lang.clone()),
        ("ll", near.to_query()),
        ("type", "biz".to_string()),
        ("results", "1".to_string()),
        ("rspn", "1".to_string()),
    ]
}

/// Takes the first organization out of a search response.
///
/// An empty result list, or a first feature that lacks a name, address or
/// coordinates, yields `None`. Only a body that is not a search response at
/// all is an error.
pub fn parse_organization(body: &str) -> Result<Option<Organization>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let Some(feature) = response.features.into_iter().next() else {
        return Ok(None);
    };

    match serde_json::from_value::<SearchFeature>(feature) {
        Ok(feature) => {
            let [lng, lat] = feature.geometry.coordinates;
            Ok(Some(Organization {
                name: feature.properties.company.name,
                address: feature.properties.company.address,
                position: LatLng::from_lng_lat(lng, lat),
            }))
        }
        Err(e) => {
            log::warn!("ignoring malformed search result: {}", e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHARMACY: &str = r#"{
        "type": "FeatureCollection",
        "properties": {"ResponseMetaData": {"SearchRequest": {"request": "pharmacy", "results": 1}}},
        "features": [{
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [30.3125, 59.9415]},
            "properties": {
                "name": "Pharmacy 36.6",
                "CompanyMetaData": {
                    "id": "1",
                    "name": "Pharmacy 36.6",
                    "address": "Saint Petersburg, Nevsky Prospekt, 2"
                }
            }
        }]
    }"#;

    #[test]
    fn test_parse_organization() {
        let org = parse_organization(PHARMACY).unwrap().unwrap();
        assert_eq!(org.name, "Pharmacy 36.6");
        assert_eq!(org.address, "Saint Petersburg, Nevsky Prospekt, 2");
        assert_eq!(org.position, LatLng::from_lng_lat(30.3125, 59.9415));
    }

    #[test]
    fn test_no_features() {
        assert_eq!(parse_organization(r#"{"features": []}"#).unwrap(), None);
        assert_eq!(parse_organization(r#"{"type": "FeatureCollection"}"#).unwrap(), None);
    }

    #[test]
    fn test_malformed_feature_is_ignored() {
        let body = r#"{"features": [{"geometry": {"coordinates": [30.0, 60.0]}, "properties": {}}]}"#;
        assert_eq!(parse_organization(body).unwrap(), None);
    }

    #[test]
    fn test_not_json() {
        assert!(parse_organization("Forbidden").is_err());
    }

    #[test]
    fn test_search_params() {
        let config = ServiceConfig::default().with_api_keys("geo", "org");
        let params = search_params(&config, LatLng::from_lng_lat(30.5, 60.25));
        assert!(params.contains(&("apikey", "org".to_string())));
        assert!(params.contains(&("text", "аптека".to_string())));
        assert!(params.contains(&("ll", "30.5,60.25".to_string())));
        assert!(params.contains(&("type", "biz".to_string())));
        assert!(params.contains(&("results", "1".to_string())));
    }
}
