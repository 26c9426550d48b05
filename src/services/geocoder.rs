//! Geocoder request parameters and response decoding

use crate::core::config::ServiceConfig;
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// A place resolved by the geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toponym {
    /// Full human-readable address
    pub address: String,
    pub position: LatLng,
    /// Empty when the geocoder has no postal code for the place
    pub postal_code: String,
}

#[derive(Debug, Deserialize)]
struct GeocoderResponse {
    response: GeocoderBody,
}

#[derive(Debug, Deserialize)]
struct GeocoderBody {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    members: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "metaDataProperty")]
    meta: MetaDataProperty,
    #[serde(rename = "Point")]
    point: GeoPoint,
}

#[derive(Debug, Deserialize)]
struct MetaDataProperty {
    #[serde(rename = "GeocoderMetaData")]
    geocoder: GeocoderMetaData,
}

#[derive(Debug, Deserialize)]
struct GeocoderMetaData {
    text: String,
    #[serde(rename = "Address", default)]
    address: Option<GeocoderAddress>,
}

#[derive(Debug, Deserialize)]
struct GeocoderAddress {
    #[serde(default)]
    postal_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    pos: String,
}

/// Query parameters for a geocoder lookup of free text or a `"lng,lat"` pair
pub fn geocoder_params(config: &ServiceConfig, query: &str) -> Vec<(&'static str, String)> {
    vec![
        ("apikey", config.geocoder_api_key.clone()),
        ("format", "json".to_string()),
        ("geocode", query.to_string()),
    ]
}

/// Takes the first toponym out of a geocoder JSON response.
///
/// A missing postal code is not an error; it comes back as an empty string.
pub fn parse_toponym(query: &str, body: &str) -> Result<Toponym> {
    let response: GeocoderResponse = serde_json::from_str(body)?;
    let member = response
        .response
        .collection
        .members
        .into_iter()
        .next()
        .ok_or_else(|| MapError::NotFound(query.to_string()))?;

    let GeoObject { meta, point } = member.geo_object;
    let position = LatLng::parse_pos(&point.pos)?;
    let postal_code = meta
        .geocoder
        .address
        .and_then(|address| address.postal_code)
        .unwrap_or_default();

    Ok(Toponym {
        address: meta.geocoder.text,
        position,
        postal_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALACE_SQUARE: &str = r#"{
        "response": {
            "GeoObjectCollection": {
                "metaDataProperty": {"GeocoderResponseMetaData": {"request": "Palace Square", "found": "1"}},
                "featureMember": [{
                    "GeoObject": {
                        "metaDataProperty": {
                            "GeocoderMetaData": {
                                "kind": "street",
                                "text": "Russia, Saint Petersburg, Palace Square",
                                "Address": {"country_code": "RU", "postal_code": "191186"}
                            }
                        },
                        "name": "Palace Square",
                        "Point": {"pos": "30.315868 59.939095"}
                    }
                }]
            }
        }
    }"#;

    #[test]
    fn test_parse_toponym() {
        let toponym = parse_toponym("Palace Square", PALACE_SQUARE).unwrap();
        assert_eq!(toponym.address, "Russia, Saint Petersburg, Palace Square");
        assert_eq!(toponym.position, LatLng::from_lng_lat(30.315868, 59.939095));
        assert_eq!(toponym.postal_code, "191186");
    }

    #[test]
    fn test_missing_postal_code_is_empty() {
        let body = r#"{"response": {"GeoObjectCollection": {"featureMember": [
            {"GeoObject": {
                "metaDataProperty": {"GeocoderMetaData": {"text": "Russia, Leningrad Oblast", "Address": {"country_code": "RU"}}},
                "Point": {"pos": "31.0 60.0"}
            }}
        ]}}}"#;
        let toponym = parse_toponym("oblast", body).unwrap();
        assert_eq!(toponym.postal_code, "");

        let body = r#"{"response": {"GeoObjectCollection": {"featureMember": [
            {"GeoObject": {
                "metaDataProperty": {"GeocoderMetaData": {"text": "Somewhere"}},
                "Point": {"pos": "31.0 60.0"}
            }}
        ]}}}"#;
        assert_eq!(parse_toponym("somewhere", body).unwrap().postal_code, "");
    }

    #[test]
    fn test_nothing_found() {
        let body = r#"{"response": {"GeoObjectCollection": {"featureMember": []}}}"#;
        match parse_toponym("Atlantis", body) {
            Err(MapError::NotFound(query)) => assert_eq!(query, "Atlantis"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_malformed_response() {
        assert!(matches!(
            parse_toponym("x", "{\"response\": {}}"),
            Err(MapError::Serialization(_))
        ));
        assert!(matches!(parse_toponym("x", "<html>"), Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_geocoder_params() {
        let config = ServiceConfig::default().with_api_keys("geo", "org");
        let params = geocoder_params(&config, "30.3,59.9");
        assert_eq!(
            params,
            vec![
                ("apikey", "geo".to_string()),
                ("format", "json".to_string()),
                ("geocode", "30.3,59.9".to_string()),
            ]
        );
    }
}
