//! Weekly trend donut chart for the map side panel.
//!
//! Fetches `graphs/covid-weekly` once at startup with the same task-pool
//! pattern the marker fetcher uses, then paints a donut from the returned
//! slices. The panel lives for the whole process, so no generation guard is
//! needed here.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use serde::Deserialize;

use crate::api;
use crate::config::AppConfig;
use crate::constants::DONUT_INNER_RATIO;
use crate::interaction::Route;
use crate::theme;

const STATS_PATH: &str = "graphs/covid-weekly";

/// One slice of the weekly donut.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatSlice {
    pub label: String,
    pub percent: f64,
}

/// Fetched weekly stats.
#[derive(Resource, Default)]
pub struct WeeklyStats {
    pub slices: Vec<StatSlice>,
    pub is_fetching: bool,
    pub error: Option<String>,
}

/// Result of the stats fetch, handed back from the task pool.
pub struct StatsFetchResult {
    pub slices: Option<Vec<StatSlice>>,
    pub error: Option<String>,
}

#[derive(Component)]
pub(crate) struct StatsFetchTask(Task<StatsFetchResult>);

fn fetch_weekly_stats(base_url: &str) -> StatsFetchResult {
    match api::get::<Vec<StatSlice>>(base_url, STATS_PATH) {
        Ok(slices) => StatsFetchResult {
            slices: Some(slices),
            error: None,
        },
        Err(e) => StatsFetchResult {
            slices: None,
            error: Some(e),
        },
    }
}

pub fn start_stats_fetch(
    mut commands: Commands,
    config: Res<AppConfig>,
    mut stats: ResMut<WeeklyStats>,
) {
    stats.is_fetching = true;

    let base_url = config.api_base_url();
    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move { fetch_weekly_stats(&base_url) });

    commands.spawn(StatsFetchTask(task));
}

pub fn poll_stats_fetch(
    mut commands: Commands,
    mut stats: ResMut<WeeklyStats>,
    mut tasks: Query<(Entity, &mut StatsFetchTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            stats.is_fetching = false;
            match (result.slices, result.error) {
                (Some(slices), _) => {
                    info!("Loaded weekly stats with {} slices", slices.len());
                    stats.slices = slices;
                    stats.error = None;
                }
                (None, error) => {
                    warn!(
                        "Weekly stats fetch failed: {}",
                        error.as_deref().unwrap_or("unknown error")
                    );
                    stats.error = error;
                }
            }
            commands.entity(entity).despawn();
        }
    }
}

/// Angular extent of each slice, in radians from the top of the circle.
///
/// Percents are normalized against their own sum, so a payload whose values
/// are fractions or do not add to 100 still fills the whole ring.
pub fn donut_angles(slices: &[StatSlice]) -> Vec<(f32, f32)> {
    let total: f64 = slices.iter().map(|s| s.percent.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let full = std::f32::consts::TAU;
    let mut angle = -std::f32::consts::FRAC_PI_2;
    slices
        .iter()
        .map(|slice| {
            let sweep = (slice.percent.max(0.0) / total) as f32 * full;
            let range = (angle, angle + sweep);
            angle += sweep;
            range
        })
        .collect()
}

/// Vertex loop for an annulus sector between two angles.
fn sector_points(
    center: egui::Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    end: f32,
) -> Vec<egui::Pos2> {
    let steps = (((end - start).abs() * 16.0).ceil() as usize).max(2);
    let at = |radius: f32, angle: f32| center + egui::vec2(angle.cos(), angle.sin()) * radius;

    let mut points = Vec::with_capacity((steps + 1) * 2);
    for i in 0..=steps {
        let angle = start + (end - start) * i as f32 / steps as f32;
        points.push(at(outer, angle));
    }
    for i in (0..=steps).rev() {
        let angle = start + (end - start) * i as f32 / steps as f32;
        points.push(at(inner, angle));
    }
    points
}

fn paint_donut(painter: &egui::Painter, center: egui::Pos2, radius: f32, slices: &[StatSlice]) {
    let inner = radius * DONUT_INNER_RATIO;
    for (i, (start, end)) in donut_angles(slices).into_iter().enumerate() {
        let color = theme::CHART_COLORS[i % theme::CHART_COLORS.len()];
        painter.add(egui::Shape::Path(egui::epaint::PathShape {
            points: sector_points(center, inner, radius, start, end),
            closed: true,
            fill: color,
            stroke: egui::epaint::PathStroke::new(0.0, egui::Color32::TRANSPARENT),
        }));
    }
}

/// Side panel with the weekly donut and its legend.
pub fn stats_panel_ui(
    mut contexts: EguiContexts,
    route: Res<Route>,
    stats: Res<WeeklyStats>,
) -> Result {
    if !matches!(*route, Route::Map) {
        return Ok(());
    }

    egui::SidePanel::left("weekly_stats")
        .default_width(220.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(8.0);
            ui.heading("Can we travel again?");
            ui.weak("Two-week case trend across featured countries");
            ui.add_space(8.0);

            if stats.is_fetching {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
                return;
            }

            if let Some(ref error) = stats.error {
                ui.colored_label(theme::ui::ERROR_TEXT, error);
                return;
            }

            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(ui.available_width(), 180.0), egui::Sense::hover());
            let radius = (rect.width().min(rect.height()) / 2.0) - 8.0;
            paint_donut(ui.painter(), rect.center(), radius, &stats.slices);

            ui.add_space(8.0);
            for (i, slice) in stats.slices.iter().enumerate() {
                let color = theme::CHART_COLORS[i % theme::CHART_COLORS.len()];
                ui.horizontal(|ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(swatch, 2, color);
                    ui.label(format!("{} — {:.0}%", slice.label, slice.percent));
                });
            }
        });

    Ok(())
}
