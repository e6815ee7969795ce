//! Equirectangular projection into the map's reference frame.
//!
//! The reference frame keeps the upstream framing: a `scale`-sized
//! equirectangular world cropped by the viewbox. The renderer later fits the
//! reference frame into whatever panel rect is available; this module is pure
//! coordinate math.

use crate::constants::{MAP_SCALE, MAP_VIEWBOX};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    scale: f64,
    width: f64,
    height: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self::new(MAP_SCALE, MAP_VIEWBOX)
    }
}

impl MapProjection {
    pub fn new(scale: f64, viewbox: [f64; 4]) -> Self {
        let [offset_x, offset_y, width, height] = viewbox;
        Self {
            scale,
            width,
            height,
            offset_x,
            offset_y,
        }
    }

    /// Size of the reference frame the projection maps into.
    pub fn frame_size(&self) -> [f64; 2] {
        [self.width, self.height]
    }

    /// Project a (longitude, latitude) pair into the reference frame.
    ///
    /// Total and deterministic; out-of-range coordinates project outside the
    /// frame rather than erroring.
    pub fn project(&self, lon: f64, lat: f64) -> [f64; 2] {
        let x = self.width / 2.0 + lon.to_radians() * self.scale - self.offset_x;
        let y = self.height / 2.0 - lat.to_radians() * self.scale - self.offset_y;
        [x, y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_shifted_frame_center() {
        let projection = MapProjection::default();
        let [x, y] = projection.project(0.0, 0.0);
        // Frame center (400, 300) minus the viewbox offset (30, 60).
        assert!((x - 370.0).abs() < 1e-9);
        assert!((y - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_east_is_right_north_is_up() {
        let projection = MapProjection::default();
        let [origin_x, origin_y] = projection.project(0.0, 0.0);
        let [east_x, _] = projection.project(10.0, 0.0);
        let [_, north_y] = projection.project(0.0, 10.0);

        assert!(east_x > origin_x);
        assert!(north_y < origin_y);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let projection = MapProjection::default();
        assert_eq!(projection.project(126.9, 37.5), projection.project(126.9, 37.5));
    }

    #[test]
    fn test_scale_matches_radian_semantics() {
        // One radian of longitude spans exactly `scale` pixels.
        let projection = MapProjection::new(150.0, [0.0, 0.0, 800.0, 600.0]);
        let [x0, _] = projection.project(0.0, 0.0);
        let [x1, _] = projection.project(180.0 / std::f64::consts::PI, 0.0);
        assert!((x1 - x0 - 150.0).abs() < 1e-9);
    }
}
