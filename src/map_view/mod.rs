//! The world map canvas: paints the composed scene and turns pointer
//! movement into marker interaction messages.
//!
//! Painting walks the [`scene::MapScene`] plot lists; all policy (fills,
//! marker keys, projection) lives in the pure composition step. The canvas
//! never mutates marker or tooltip state directly, it only emits messages.

mod projection;
mod scene;

pub use projection::MapProjection;
pub use scene::{fill_for, MapScene, MarkerPlot, PolygonPlot};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::atlas::{HighlightSet, WorldAtlas};
use crate::constants::{MARKER_HIT_RADIUS, MARKER_PIN_RADIUS};
use crate::interaction::{MarkerClicked, MarkerHovered, MarkerLeft, Route};
use crate::markers::WorldMarkers;
use crate::theme;

/// The marker currently under the pointer, if any. Tracked across frames so
/// enter/leave transitions fire exactly once each.
#[derive(Resource, Default)]
pub(crate) struct HoveredMarker(Option<String>);

/// Scale and offset that fit the projection frame into an available size,
/// preserving aspect ratio and centering the result.
fn fit_frame(frame: [f64; 2], avail: [f32; 2]) -> (f32, [f32; 2]) {
    let frame = [frame[0] as f32, frame[1] as f32];
    let scale = (avail[0] / frame[0]).min(avail[1] / frame[1]);
    let offset = [
        (avail[0] - frame[0] * scale) / 2.0,
        (avail[1] - frame[1] * scale) / 2.0,
    ];
    (scale, offset)
}

/// Find the closest marker within the hit radius of the pointer.
fn marker_under_pointer(
    markers: &[MarkerPlot],
    pointer: egui::Pos2,
    to_screen: impl Fn([f32; 2]) -> egui::Pos2,
    hit_radius: f32,
) -> Option<&MarkerPlot> {
    markers
        .iter()
        .filter_map(|marker| {
            let head = pin_head(to_screen(marker.pos));
            let distance = head.distance(pointer);
            (distance <= hit_radius).then_some((marker, distance))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(marker, _)| marker)
}

/// Center of the pin head for a pin whose tip is at `tip`.
fn pin_head(tip: egui::Pos2) -> egui::Pos2 {
    tip - egui::vec2(0.0, MARKER_PIN_RADIUS * 2.0)
}

fn paint_polygon(painter: &egui::Painter, plot: &PolygonPlot, to_screen: &impl Fn([f32; 2]) -> egui::Pos2) {
    let points: Vec<egui::Pos2> = plot.points.iter().map(|&p| to_screen(p)).collect();
    painter.add(egui::Shape::Path(egui::epaint::PathShape {
        points,
        closed: true,
        fill: plot.fill,
        stroke: egui::epaint::PathStroke::new(1.0, theme::COUNTRY_STROKE),
    }));
}

fn paint_marker(painter: &egui::Painter, tip: egui::Pos2) {
    let head = pin_head(tip);
    // Stem triangle from the head down to the tip, then the head circle.
    painter.add(egui::Shape::convex_polygon(
        vec![
            tip,
            head + egui::vec2(-MARKER_PIN_RADIUS * 0.8, 0.0),
            head + egui::vec2(MARKER_PIN_RADIUS * 0.8, 0.0),
        ],
        theme::MARKER_FILL,
        egui::Stroke::NONE,
    ));
    painter.circle_filled(head, MARKER_PIN_RADIUS, theme::MARKER_FILL);
}

/// Central map canvas: paint polygons and markers, hit-test the pointer,
/// emit interaction messages on transitions.
#[allow(clippy::too_many_arguments)]
pub fn world_map_ui(
    mut contexts: EguiContexts,
    route: Res<Route>,
    atlas: Res<WorldAtlas>,
    highlights: Res<HighlightSet>,
    markers: Res<WorldMarkers>,
    mut hovered: ResMut<HoveredMarker>,
    mut hover_events: MessageWriter<MarkerHovered>,
    mut leave_events: MessageWriter<MarkerLeft>,
    mut click_events: MessageWriter<MarkerClicked>,
) -> Result {
    if !matches!(*route, Route::Map) {
        return Ok(());
    }

    let projection = MapProjection::default();
    let scene = MapScene::compose(
        atlas.polygons(),
        &highlights,
        &markers.markers,
        &projection,
    );

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(theme::OCEAN))
        .show(contexts.ctx_mut()?, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            let (scale, offset) = fit_frame(
                projection.frame_size(),
                [rect.width(), rect.height()],
            );
            let to_screen = |p: [f32; 2]| -> egui::Pos2 {
                rect.min + egui::vec2(offset[0] + p[0] * scale, offset[1] + p[1] * scale)
            };

            for plot in &scene.polygons {
                paint_polygon(&painter, plot, &to_screen);
            }
            for marker in &scene.markers {
                paint_marker(&painter, to_screen(marker.pos));
            }

            if atlas.is_empty() {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "World atlas unavailable",
                    egui::FontId::proportional(14.0),
                    theme::ui::HINT_TEXT,
                );
            }

            if markers.is_fetching {
                painter.text(
                    rect.left_top() + egui::vec2(12.0, 12.0),
                    egui::Align2::LEFT_TOP,
                    "Loading markers...",
                    egui::FontId::proportional(13.0),
                    theme::ui::HINT_TEXT,
                );
            }

            // Hover transitions: one enter per marker entered, one leave per
            // marker left, nothing while resting.
            let under_pointer = response
                .hover_pos()
                .and_then(|pos| {
                    marker_under_pointer(&scene.markers, pos, to_screen, MARKER_HIT_RADIUS)
                })
                .map(|marker| marker.id.clone());

            if under_pointer != hovered.0 {
                if hovered.0.is_some() {
                    leave_events.write(MarkerLeft);
                }
                if let Some(ref id) = under_pointer {
                    hover_events.write(MarkerHovered { id: id.clone() });
                }
                hovered.0 = under_pointer.clone();
            }

            if response.clicked()
                && let Some(id) = under_pointer
            {
                click_events.write(MarkerClicked { id });
            }
        });

    Ok(())
}

pub struct MapViewPlugin;

impl Plugin for MapViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredMarker>()
            .add_systems(EguiPrimaryContextPass, world_map_ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_frame_wide_panel_letterboxes_horizontally() {
        let (scale, offset) = fit_frame([800.0, 600.0], [1600.0, 600.0]);
        assert_eq!(scale, 1.0);
        assert_eq!(offset, [400.0, 0.0]);
    }

    #[test]
    fn test_fit_frame_exact_fit_has_no_offset() {
        let (scale, offset) = fit_frame([800.0, 600.0], [400.0, 300.0]);
        assert_eq!(scale, 0.5);
        assert_eq!(offset, [0.0, 0.0]);
    }

    #[test]
    fn test_marker_under_pointer_picks_closest() {
        let markers = vec![
            MarkerPlot {
                id: "near".to_string(),
                pos: [100.0, 100.0],
            },
            MarkerPlot {
                id: "far".to_string(),
                pos: [104.0, 100.0],
            },
        ];
        let identity = |p: [f32; 2]| egui::pos2(p[0], p[1]);

        let pointer = pin_head(egui::pos2(101.0, 100.0));
        let hit = marker_under_pointer(&markers, pointer, identity, 9.0);
        assert_eq!(hit.map(|m| m.id.as_str()), Some("near"));
    }

    #[test]
    fn test_marker_under_pointer_respects_radius() {
        let markers = vec![MarkerPlot {
            id: "a".to_string(),
            pos: [0.0, 0.0],
        }];
        let identity = |p: [f32; 2]| egui::pos2(p[0], p[1]);

        let far_away = egui::pos2(100.0, 100.0);
        assert!(marker_under_pointer(&markers, far_away, identity, 9.0).is_none());
    }

    #[test]
    fn test_pin_head_sits_above_tip() {
        let tip = egui::pos2(10.0, 20.0);
        let head = pin_head(tip);
        assert_eq!(head.x, tip.x);
        assert!(head.y < tip.y);
    }
}
