//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Map projection scale (degrees of longitude to viewport pixels)
pub const MAP_SCALE: f64 = 150.0;

/// Map viewbox, matching the upstream data's framing: x, y, width, height
pub const MAP_VIEWBOX: [f64; 4] = [30.0, 60.0, 800.0, 600.0];

/// Hit-test radius around a marker glyph, in viewport pixels
pub const MARKER_HIT_RADIUS: f32 = 9.0;

/// Visual radius of the marker pin head, in viewport pixels
pub const MARKER_PIN_RADIUS: f32 = 5.0;

/// Bound on every network request; a request running longer is a
/// reportable failure, not a hang.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default API base URL (overridable via config.json)
pub const DEFAULT_API_BASE_URL: &str = "https://api.worldplate.dev";

/// Inner radius of the weekly stats donut as a fraction of the outer radius
pub const DONUT_INNER_RATIO: f32 = 0.6;
