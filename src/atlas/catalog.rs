use bevy::prelude::*;
use serde::Deserialize;

/// GeoJSON world atlas compiled into the binary.
const BUNDLED_ATLAS: &str = include_str!("../../assets/world-atlas.geojson");

/// One country border shape from the bundled atlas.
///
/// `name` is the join key against the highlight set. The two keyspaces are
/// independent: markers may name countries that have no polygon here.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryPolygon {
    pub name: String,
    /// Outer rings in atlas order. MultiPolygon features contribute one ring
    /// per part. Rings are stored open (no closing duplicate point).
    pub rings: Vec<Vec<[f64; 2]>>,
}

/// The static country-polygon catalog.
///
/// Populated exactly once at startup and never mutated afterwards;
/// `polygons()` returns the identical slice on every call.
#[derive(Resource, Default)]
pub struct WorldAtlas {
    polygons: Vec<CountryPolygon>,
}

impl WorldAtlas {
    pub fn polygons(&self) -> &[CountryPolygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Install the parsed catalog. Called once from the startup loader.
    pub(super) fn replace(&mut self, polygons: Vec<CountryPolygon>) {
        self.polygons = polygons;
    }
}

// Minimal GeoJSON shapes; only the fields the atlas uses.

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct FeatureProperties {
    name: String,
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

/// Drop the GeoJSON closing duplicate point, if present.
fn open_ring(mut ring: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Flatten a feature's geometry into outer rings.
///
/// Interior rings (holes) are dropped: the atlas is a fill/stroke silhouette,
/// not a topological dataset.
fn rings_of(geometry: Geometry) -> Vec<Vec<[f64; 2]>> {
    match geometry {
        Geometry::Polygon(rings) => rings.into_iter().take(1).map(open_ring).collect(),
        Geometry::MultiPolygon(parts) => parts
            .into_iter()
            .filter_map(|rings| rings.into_iter().next())
            .map(open_ring)
            .collect(),
    }
}

/// Parse a GeoJSON FeatureCollection into the catalog shape.
pub(super) fn parse_atlas(geojson: &str) -> Result<Vec<CountryPolygon>, String> {
    let collection: FeatureCollection =
        serde_json::from_str(geojson).map_err(|e| format!("invalid atlas GeoJSON: {}", e))?;

    let polygons: Vec<CountryPolygon> = collection
        .features
        .into_iter()
        .map(|feature| CountryPolygon {
            name: feature.properties.name,
            rings: rings_of(feature.geometry),
        })
        .collect();

    // Duplicate names would make the highlight join ambiguous.
    for (i, polygon) in polygons.iter().enumerate() {
        if polygons[..i].iter().any(|p| p.name == polygon.name) {
            return Err(format!("duplicate country name in atlas: {}", polygon.name));
        }
    }

    Ok(polygons)
}

pub(super) fn parse_bundled_atlas() -> Result<Vec<CountryPolygon>, String> {
    parse_atlas(BUNDLED_ATLAS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_atlas_parses() {
        let polygons = parse_bundled_atlas().unwrap();
        assert!(!polygons.is_empty());
    }

    #[test]
    fn test_bundled_atlas_names_unique() {
        let polygons = parse_bundled_atlas().unwrap();
        for (i, polygon) in polygons.iter().enumerate() {
            assert!(
                !polygons[..i].iter().any(|p| p.name == polygon.name),
                "duplicate name: {}",
                polygon.name
            );
        }
    }

    #[test]
    fn test_bundled_atlas_rings_open_and_nonempty() {
        let polygons = parse_bundled_atlas().unwrap();
        for polygon in &polygons {
            assert!(!polygon.rings.is_empty(), "{} has no rings", polygon.name);
            for ring in &polygon.rings {
                assert!(ring.len() >= 3, "{} has a degenerate ring", polygon.name);
                assert_ne!(ring.first(), ring.last(), "{} ring still closed", polygon.name);
            }
        }
    }

    #[test]
    fn test_multipolygon_flattens_to_multiple_rings() {
        let polygons = parse_bundled_atlas().unwrap();
        let japan = polygons.iter().find(|p| p.name == "Japan").unwrap();
        assert!(japan.rings.len() >= 2);
    }

    #[test]
    fn test_parse_atlas_rejects_duplicates() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "Atlantis" },
                  "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] } },
                { "type": "Feature", "properties": { "name": "Atlantis" },
                  "geometry": { "type": "Polygon", "coordinates": [[[2,2],[3,2],[3,3],[2,2]]] } }
            ]
        }"#;

        let err = parse_atlas(geojson).unwrap_err();
        assert!(err.contains("Atlantis"));
    }

    #[test]
    fn test_parse_atlas_rejects_malformed_json() {
        assert!(parse_atlas("not geojson").is_err());
    }

    #[test]
    fn test_world_atlas_replace_is_queryable() {
        let mut atlas = WorldAtlas::default();
        assert!(atlas.is_empty());

        atlas.replace(vec![CountryPolygon {
            name: "Korea".to_string(),
            rings: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]],
        }]);

        assert_eq!(atlas.polygons().len(), 1);
        assert_eq!(atlas.polygons()[0].name, "Korea");
    }
}
