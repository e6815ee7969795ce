//! Country detail view, shown for the `/detail?country=...` route.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::atlas::HighlightSet;
use crate::interaction::{NavigateRequest, Route};
use crate::markers::{MarkerFeature, WorldMarkers};
use crate::theme;

/// Look the country up in the marker collection. The marker and atlas
/// keyspaces are independent, so a miss here is an ordinary outcome.
fn marker_for_country<'a>(markers: &'a [MarkerFeature], country: &str) -> Option<&'a MarkerFeature> {
    markers.iter().find(|m| m.country == country)
}

pub fn detail_ui(
    mut contexts: EguiContexts,
    route: Res<Route>,
    markers: Res<WorldMarkers>,
    highlights: Res<HighlightSet>,
    mut navigate: MessageWriter<NavigateRequest>,
) -> Result {
    let Route::Detail { ref country } = *route else {
        return Ok(());
    };

    egui::CentralPanel::default().show(contexts.ctx_mut()?, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(country);

            if highlights.is_highlighted(country) {
                ui.colored_label(theme::ui::FEATURED_BADGE, "Michelin-starred destination");
            }
            ui.add_space(12.0);

            match marker_for_country(&markers.markers, country) {
                Some(marker) => {
                    ui.label(format!("Reported cases: {}", marker.count));
                    ui.weak(format!(
                        "Location: {:.1}, {:.1}",
                        marker.lon, marker.lat
                    ));
                }
                None => {
                    ui.colored_label(theme::ui::HINT_TEXT, "No statistics for this country yet.");
                }
            }

            ui.add_space(24.0);
            if ui.button("Back to map").clicked() {
                navigate.write(NavigateRequest {
                    path: "/".to_string(),
                });
            }
        });
    });

    Ok(())
}
