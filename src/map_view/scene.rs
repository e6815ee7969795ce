//! Pure composition of the visible map scene.
//!
//! Given the atlas, the highlight set, the marker collection, and the
//! projection, build plain plot lists the painter walks. Equal inputs always
//! compose equal scenes; the painter adds nothing of its own, which is what
//! makes rendering idempotent and the fill mapping testable without a UI.

use bevy_egui::egui;

use crate::atlas::{CountryPolygon, HighlightSet};
use crate::markers::MarkerFeature;
use crate::theme;

use super::projection::MapProjection;

/// One polygon ring, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPlot {
    pub name: String,
    pub points: Vec<[f32; 2]>,
    pub fill: egui::Color32,
}

/// One marker glyph, keyed by the marker id.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlot {
    pub id: String,
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapScene {
    pub polygons: Vec<PolygonPlot>,
    pub markers: Vec<MarkerPlot>,
}

/// Fill for a country polygon: exactly two possible colors, decided by
/// highlight membership alone.
pub fn fill_for(name: &str, highlights: &HighlightSet) -> egui::Color32 {
    if highlights.is_highlighted(name) {
        theme::HIGHLIGHT_FILL
    } else {
        theme::DEFAULT_FILL
    }
}

impl MapScene {
    pub fn compose(
        polygons: &[CountryPolygon],
        highlights: &HighlightSet,
        markers: &[MarkerFeature],
        projection: &MapProjection,
    ) -> MapScene {
        let polygon_plots = polygons
            .iter()
            .flat_map(|polygon| {
                let fill = fill_for(&polygon.name, highlights);
                polygon.rings.iter().map(move |ring| PolygonPlot {
                    name: polygon.name.clone(),
                    points: ring
                        .iter()
                        .map(|&[lon, lat]| {
                            let [x, y] = projection.project(lon, lat);
                            [x as f32, y as f32]
                        })
                        .collect(),
                    fill,
                })
            })
            .collect();

        let marker_plots = markers
            .iter()
            .map(|marker| {
                let [x, y] = projection.project(marker.lon, marker.lat);
                MarkerPlot {
                    id: marker.id.clone(),
                    pos: [x as f32, y as f32],
                }
            })
            .collect();

        MapScene {
            polygons: polygon_plots,
            markers: marker_plots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon(name: &str) -> CountryPolygon {
        CountryPolygon {
            name: name.to_string(),
            rings: vec![vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]],
        }
    }

    fn marker(id: &str, lon: f64, lat: f64) -> MarkerFeature {
        MarkerFeature {
            id: id.to_string(),
            lon,
            lat,
            country: "Anywhere".to_string(),
            count: 0,
        }
    }

    #[test]
    fn test_fill_is_two_valued() {
        let highlights = HighlightSet::from_names(&["Korea", "Japan"]);
        assert_eq!(fill_for("Korea", &highlights), theme::HIGHLIGHT_FILL);
        assert_eq!(fill_for("Germany", &highlights), theme::DEFAULT_FILL);
        // Unknown names get the default fill too, no third color.
        assert_eq!(fill_for("", &highlights), theme::DEFAULT_FILL);
    }

    #[test]
    fn test_highlight_scenario_korea_germany() {
        let highlights = HighlightSet::from_names(&["Korea", "Japan"]);
        let polygons = [polygon("Korea"), polygon("Germany")];
        let scene = MapScene::compose(&polygons, &highlights, &[], &MapProjection::default());

        assert_eq!(scene.polygons.len(), 2);
        assert_eq!(scene.polygons[0].name, "Korea");
        assert_eq!(scene.polygons[0].fill, theme::HIGHLIGHT_FILL);
        assert_eq!(scene.polygons[1].name, "Germany");
        assert_eq!(scene.polygons[1].fill, theme::DEFAULT_FILL);
    }

    #[test]
    fn test_empty_markers_renders_polygons_only() {
        let highlights = HighlightSet::from_names(&[]);
        let polygons = [polygon("France")];
        let scene = MapScene::compose(&polygons, &highlights, &[], &MapProjection::default());

        assert_eq!(scene.polygons.len(), 1);
        assert!(scene.markers.is_empty());
    }

    #[test]
    fn test_marker_count_matches_collection_exactly() {
        let highlights = HighlightSet::from_names(&[]);
        let markers = vec![marker("a", 0.0, 0.0), marker("b", 10.0, 10.0), marker("c", 20.0, 20.0)];
        let scene = MapScene::compose(&[], &highlights, &markers, &MapProjection::default());

        assert_eq!(scene.markers.len(), 3);
        let ids: Vec<&str> = scene.markers.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_composition_is_idempotent() {
        let highlights = HighlightSet::from_names(&["Korea"]);
        let polygons = [polygon("Korea"), polygon("Germany")];
        let markers = vec![marker("a", 5.0, 5.0)];
        let projection = MapProjection::default();

        let first = MapScene::compose(&polygons, &highlights, &markers, &projection);
        let second = MapScene::compose(&polygons, &highlights, &markers, &projection);

        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_ring_passes_through() {
        let highlights = HighlightSet::from_names(&[]);
        let degenerate = CountryPolygon {
            name: "Pointland".to_string(),
            rings: vec![vec![]],
        };
        let scene = MapScene::compose(
            &[degenerate],
            &highlights,
            &[],
            &MapProjection::default(),
        );

        // Not special-cased: the empty ring reaches the painter as-is.
        assert_eq!(scene.polygons.len(), 1);
        assert!(scene.polygons[0].points.is_empty());
    }

    #[test]
    fn test_multi_ring_polygon_shares_fill() {
        let highlights = HighlightSet::from_names(&["Japan"]);
        let japan = CountryPolygon {
            name: "Japan".to_string(),
            rings: vec![
                vec![[130.0, 34.0], [140.0, 35.0], [141.0, 40.0]],
                vec![[140.0, 42.0], [145.0, 43.0], [142.0, 45.0]],
            ],
        };
        let scene = MapScene::compose(&[japan], &highlights, &[], &MapProjection::default());

        assert_eq!(scene.polygons.len(), 2);
        assert!(scene.polygons.iter().all(|p| p.fill == theme::HIGHLIGHT_FILL));
    }
}
