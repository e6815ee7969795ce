//! Wire format for the world-marker endpoint and its flattening.
//!
//! The backend wraps a GeoJSON-like feature list in an envelope:
//!
//! ```json
//! {
//!   "data": {
//!     "features": [
//!       {
//!         "geometry": { "coordinates": [2.35, 48.85] },
//!         "properties": { "_id": "fr-01", "nation": "France", "count": 12034 }
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Everything downstream works with the flat [`MarkerFeature`] shape; the
//! envelope never leaves this module.

use serde::Deserialize;

use crate::api;

/// Endpoint path for the world marker collection.
const MARKERS_PATH: &str = "map/world/geojson";

/// One fetched map marker, flattened from the wire envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerFeature {
    /// Unique within one fetched collection; the stable render key.
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    /// Not required to match any atlas polygon name.
    pub country: String,
    pub count: i64,
}

#[derive(Deserialize)]
struct MarkerEnvelope {
    data: MarkerData,
}

#[derive(Deserialize)]
struct MarkerData {
    features: Vec<WireFeature>,
}

#[derive(Deserialize)]
struct WireFeature {
    geometry: WireGeometry,
    properties: WireProperties,
}

#[derive(Deserialize)]
struct WireGeometry {
    coordinates: [f64; 2],
}

#[derive(Deserialize)]
struct WireProperties {
    #[serde(rename = "_id")]
    id: String,
    nation: String,
    count: i64,
}

/// Result of one marker fetch, handed back from the task pool.
pub struct MarkerFetchResult {
    pub markers: Option<Vec<MarkerFeature>>,
    pub error: Option<String>,
}

impl MarkerFetchResult {
    pub fn ok(markers: Vec<MarkerFeature>) -> Self {
        Self {
            markers: Some(markers),
            error: None,
        }
    }

    pub fn error(msg: String) -> Self {
        Self {
            markers: None,
            error: Some(msg),
        }
    }
}

fn flatten(envelope: MarkerEnvelope) -> Vec<MarkerFeature> {
    envelope
        .data
        .features
        .into_iter()
        .map(|feature| MarkerFeature {
            id: feature.properties.id,
            lon: feature.geometry.coordinates[0],
            lat: feature.geometry.coordinates[1],
            country: feature.properties.nation,
            count: feature.properties.count,
        })
        .collect()
}

/// Fetch and flatten the world marker collection. Blocking; runs on the
/// compute task pool.
pub fn fetch_world_markers(base_url: &str) -> MarkerFetchResult {
    match api::get::<MarkerEnvelope>(base_url, MARKERS_PATH) {
        Ok(envelope) => MarkerFetchResult::ok(flatten(envelope)),
        Err(e) => MarkerFetchResult::error(e),
    }
}
