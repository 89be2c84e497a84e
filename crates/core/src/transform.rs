//! Affine tile transforms
//!
//! Some tilings draw a cell as a distorted regular polygon: the rhombs of the
//! cube tilings are unit squares sheared, scaled, rotated and shifted into
//! place. A [`TileTransform`] holds those parameters. The matrix maps local
//! polygon coordinates (with y flipped to screen orientation) to an offset
//! from the tile anchor:
//!
//! `M = translate · rotate · skew · scale`
//!
//! Pointer coordinates go the other way: subtract the anchor, apply `M⁻¹`,
//! then flip y back into polygon space. Gesture and edge predicates both use
//! this one conversion.

use glam::{DAffine2, DMat2, DVec2};
use serde::Serialize;

/// Per-tile affine parameters (angles in radians)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    pub rotate_th: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for TileTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TileTransform {
    pub const IDENTITY: TileTransform = TileTransform {
        scale_x: 1.0,
        scale_y: 1.0,
        skew_x: 0.0,
        skew_y: 0.0,
        rotate_th: 0.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Composed matrix
    pub fn matrix(&self) -> DAffine2 {
        let skew = DMat2::from_cols(
            DVec2::new(1.0, self.skew_y.tan()),
            DVec2::new(self.skew_x.tan(), 1.0),
        );
        let scale = DMat2::from_diagonal(DVec2::new(self.scale_x, self.scale_y));
        DAffine2::from_translation(DVec2::new(self.translate_x, self.translate_y))
            * DAffine2::from_angle(self.rotate_th)
            * DAffine2::from_mat2(skew * scale)
    }

    /// Screen offset from the anchor of a local polygon point
    pub fn polygon_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.matrix().transform_point2(DVec2::new(x, -y));
        (p.x, p.y)
    }

    /// Local polygon coordinates of a world point on the tile anchored at
    /// `(tile_x, tile_y)`
    pub fn polygon_coords(&self, tile_x: f64, tile_y: f64, x: f64, y: f64) -> (f64, f64) {
        let p = self
            .matrix()
            .inverse()
            .transform_point2(DVec2::new(x - tile_x, y - tile_y));
        (p.x, -p.y)
    }

    /// Both ends of a drag in local polygon coordinates, as `(x1, x2, y1, y2)`
    pub fn polygon_gesture_coords(
        &self,
        tile_x: f64,
        tile_y: f64,
        x1: f64,
        x2: f64,
        y1: f64,
        y2: f64,
    ) -> (f64, f64, f64, f64) {
        let inverse = self.matrix().inverse();
        let down = inverse.transform_point2(DVec2::new(x1 - tile_x, y1 - tile_y));
        let up = inverse.transform_point2(DVec2::new(x2 - tile_x, y2 - tile_y));
        (down.x, up.x, -down.y, -up.y)
    }
}
