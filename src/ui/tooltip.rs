//! Floating hover tooltip fed from the tooltip slot.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::interaction::{Route, TooltipSlot};
use crate::theme;

/// Draws the tooltip next to the pointer while the slot has content.
pub fn tooltip_ui(
    mut contexts: EguiContexts,
    route: Res<Route>,
    tooltip: Res<TooltipSlot>,
) -> Result {
    if !matches!(*route, Route::Map) || tooltip.is_empty() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let Some(pointer) = ctx.pointer_latest_pos() else {
        return Ok(());
    };

    egui::Area::new(egui::Id::new("marker_tooltip"))
        .fixed_pos(pointer + egui::vec2(14.0, 12.0))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(theme::ui::TOOLTIP_BACKGROUND)
                .corner_radius(4)
                .inner_margin(egui::Margin::symmetric(8, 5))
                .show(ui, |ui| {
                    ui.colored_label(theme::ui::TOOLTIP_TEXT, tooltip.text());
                });
        });

    Ok(())
}
