//! Application chrome around the map canvas: top bar, stats side panel,
//! detail view, hover tooltip, and the registration dialog.

mod detail;
mod register;
mod stats;
mod tooltip;

pub use register::RegisterDialog;
pub use stats::WeeklyStats;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::interaction::Route;
use crate::map_view;
use crate::markers::WorldMarkers;
use crate::theme;

/// Top bar: title, marker fetch errors, sign-up entry point.
fn top_bar_ui(
    mut contexts: EguiContexts,
    route: Res<Route>,
    markers: Res<WorldMarkers>,
    mut register: ResMut<RegisterDialog>,
) -> Result {
    egui::TopBottomPanel::top("top_bar").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            ui.strong("Worldplate");
            ui.weak("travel statistics for starred destinations");

            if matches!(*route, Route::Map)
                && let Some(ref error) = markers.error
            {
                ui.separator();
                ui.colored_label(theme::ui::ERROR_TEXT, error);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Sign up").clicked() {
                    register.is_open = true;
                }
            });
        });
    });

    Ok(())
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeeklyStats>()
            .init_resource::<RegisterDialog>()
            .add_systems(
                Startup,
                stats::start_stats_fetch.after(crate::config::ConfigLoaded),
            )
            .add_systems(Update, (stats::poll_stats_fetch, register::poll_register_task))
            // Panels claim screen space in call order, so the bar and side
            // panel run before the central map canvas, overlays after it.
            .add_systems(
                EguiPrimaryContextPass,
                (top_bar_ui, stats::stats_panel_ui)
                    .chain()
                    .before(map_view::world_map_ui),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (detail::detail_ui, tooltip::tooltip_ui, register::register_dialog_ui)
                    .chain()
                    .after(map_view::world_map_ui),
            );
    }
}
