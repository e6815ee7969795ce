//! Centralized color theme for the application.
//!
//! This module provides all colors used for map rendering and the UI.
//! Modify values here to change the application's color scheme.

use bevy_egui::egui;

// ============================================================================
// Map Colors
// ============================================================================

/// Fill for countries in the featured set (pale teal)
pub const HIGHLIGHT_FILL: egui::Color32 = egui::Color32::from_rgb(0xCB, 0xF3, 0xF0);

/// Fill for every other country (white)
pub const DEFAULT_FILL: egui::Color32 = egui::Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Country border stroke (light grey)
pub const COUNTRY_STROKE: egui::Color32 = egui::Color32::from_rgb(0xD6, 0xD6, 0xDA);

/// Marker pin fill (teal)
pub const MARKER_FILL: egui::Color32 = egui::Color32::from_rgb(0x2E, 0xC4, 0xB6);

/// Ocean / canvas background behind the polygons
pub const OCEAN: egui::Color32 = egui::Color32::from_rgb(0xF4, 0xF7, 0xFA);

// ============================================================================
// Chart Colors
// ============================================================================

/// Slice palette for the weekly stats donut, cycled per slice
pub const CHART_COLORS: [egui::Color32; 2] = [
    egui::Color32::from_rgb(0x88, 0x84, 0xD8),
    egui::Color32::from_rgb(0xE8, 0xB7, 0x54),
];

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Tooltip background (near-black, slightly translucent)
    pub const TOOLTIP_BACKGROUND: egui::Color32 = egui::Color32::from_rgba_premultiplied(30, 30, 34, 230);

    /// Tooltip text
    pub const TOOLTIP_TEXT: egui::Color32 = egui::Color32::WHITE;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Green for success messages
    pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);

    /// Badge color for featured countries in the detail view
    pub const FEATURED_BADGE: egui::Color32 = egui::Color32::from_rgb(0x2E, 0xC4, 0xB6);
}
