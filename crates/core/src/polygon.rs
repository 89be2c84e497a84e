//! Regular polygon tile shapes
//!
//! Every cell of every tiling is drawn as a regular polygon in its own local
//! space: centred on the origin, y pointing up, side `k` facing the angle
//! `angle_offset + 2πk/n`. The direction bit owned by side `k` is
//! `directions[k]`, so a tile state rotates by shifting bits along that list.
//!
//! Positive rotations turn a tile clockwise on screen. Clockwise on screen is
//! towards lower side indices, so side `k` moves to side `k - r`.
//!
//! Renderer outputs (paths, guide dot, edge-mark lines) are in screen
//! orientation (y down) relative to the tile anchor. Tiles with a
//! [`TileTransform`](crate::transform::TileTransform) get it applied on top.

use std::f64::consts::PI;

use arrayvec::ArrayVec;

use crate::types::{Direction, EdgeGesture, EdgeHit, EdgeMark, TileState};

/// Point-to-side distance (in inner radii) that still counts as touching the side
const EDGE_CLOSE_RATIO: f64 = 0.3;

/// Shortest drag (in inner radii) recognised as an edge-mark gesture
const GESTURE_MIN_LENGTH_RATIO: f64 = 0.4;

/// Farthest a gesture midpoint may be from the marked side (in inner radii)
const GESTURE_MAX_OFFSET_RATIO: f64 = 0.4;

/// Guide dot distance from the centre (in inner radii)
const GUIDE_DOT_RATIO: f64 = 0.7;

/// Shape descriptor shared by all cells of one unit kind
#[derive(Debug, Clone, PartialEq)]
pub struct RegularPolygonTile {
    sides: usize,
    angle_offset: f64,
    radius_in: f64,
    radius_out: f64,
    unit_angle: f64,
    directions: ArrayVec<Direction, 8>,
    fully_connected: TileState,
}

impl RegularPolygonTile {
    /// Polygon whose side `k` owns direction bit `1 << k`
    pub fn new(sides: usize, angle_offset: f64, radius_in: f64) -> Self {
        let directions: ArrayVec<Direction, 8> = (0..sides).map(|k| 1u8 << k).collect();
        Self::with_directions(sides, angle_offset, radius_in, &directions)
    }

    /// Polygon with an explicit side-to-direction mapping
    ///
    /// # Panics
    ///
    /// When the number of directions differs from the number of sides, or a
    /// direction is not a single bit.
    pub fn with_directions(
        sides: usize,
        angle_offset: f64,
        radius_in: f64,
        directions: &[Direction],
    ) -> Self {
        assert!((3..=8).contains(&sides), "unsupported polygon with {} sides", sides);
        assert_eq!(
            directions.len(),
            sides,
            "a {}-gon needs {} directions",
            sides,
            sides
        );
        assert!(
            directions.iter().all(|d| d.count_ones() == 1),
            "directions must be single bits: {:?}",
            directions
        );

        let unit_angle = 2.0 * PI / sides as f64;
        Self {
            sides,
            angle_offset,
            radius_in,
            radius_out: radius_in / (PI / sides as f64).cos(),
            unit_angle,
            directions: directions.iter().copied().collect(),
            fully_connected: directions.iter().fold(0, |acc, d| acc | d),
        }
    }

    pub fn sides(&self) -> usize {
        self.sides
    }

    pub fn angle_offset(&self) -> f64 {
        self.angle_offset
    }

    /// Distance from the centre to each side
    pub fn radius_in(&self) -> f64 {
        self.radius_in
    }

    /// Distance from the centre to each vertex
    pub fn radius_out(&self) -> f64 {
        self.radius_out
    }

    /// Directions in side order (counter-clockwise)
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// State with every side connected
    pub fn fully_connected(&self) -> TileState {
        self.fully_connected
    }

    /// Side index owning `direction`
    pub fn side_of(&self, direction: Direction) -> Option<usize> {
        self.directions.iter().position(|&d| d == direction)
    }

    /// Outward normal angle of side `k` (local space, y up)
    pub fn side_angle(&self, side: usize) -> f64 {
        self.angle_offset + self.unit_angle * side as f64
    }

    /// Rotate a tile state by `rotations` clockwise steps
    ///
    /// Bits that are not directions of this shape are kept as they are.
    pub fn rotate(&self, state: TileState, rotations: i32) -> TileState {
        let n = self.sides as i32;
        let mut rotated = state & !self.fully_connected;
        for (k, &direction) in self.directions.iter().enumerate() {
            if state & direction != 0 {
                let target = (k as i32 - rotations).rem_euclid(n) as usize;
                rotated |= self.directions[target];
            }
        }
        rotated
    }

    /// Where each arm of `state` points after `rotations`, in side order
    pub fn get_directions(&self, state: TileState, rotations: i32) -> ArrayVec<Direction, 8> {
        let n = self.sides as i32;
        self.directions
            .iter()
            .enumerate()
            .filter(|(_, &direction)| state & direction != 0)
            .map(|(k, _)| self.directions[(k as i32 - rotations).rem_euclid(n) as usize])
            .collect()
    }

    /// Rendering angle for a number of rotations (radians, clockwise on screen)
    pub fn angle(&self, rotations: i32) -> f64 {
        self.unit_angle * rotations as f64
    }

    /// Containment test in local coordinates (y up); boundary counts as inside
    pub fn is_inside(&self, x: f64, y: f64) -> bool {
        (0..self.sides).all(|k| {
            let a = self.side_angle(k);
            x * a.cos() + y * a.sin() <= self.radius_in + 1e-9
        })
    }

    /// Side whose outward normal best matches the point's direction
    fn nearest_side(&self, x: f64, y: f64) -> (usize, f64) {
        let mut best = (0, f64::NEG_INFINITY);
        for k in 0..self.sides {
            let a = self.side_angle(k);
            let projection = x * a.cos() + y * a.sin();
            if projection > best.1 {
                best = (k, projection);
            }
        }
        best
    }

    /// Nearest side to a local point, and whether the point is close to it
    pub fn is_close_to_edge(&self, x: f64, y: f64) -> EdgeHit {
        let (side, projection) = self.nearest_side(x, y);
        EdgeHit {
            direction: self.directions[side],
            is_close: (self.radius_in - projection).abs() <= EDGE_CLOSE_RATIO * self.radius_in,
        }
    }

    /// Recognise a drag from `(x1, y1)` to `(x2, y2)` as an edge mark
    ///
    /// A drag along a side marks a wall, a drag across a side marks a
    /// connection. Diagonal, short or off-edge drags are not edge marks.
    pub fn detect_edgemark_gesture(
        &self,
        x1: f64,
        x2: f64,
        y1: f64,
        y2: f64,
    ) -> Option<EdgeGesture> {
        let (dx, dy) = (x2 - x1, y2 - y1);
        let length = dx.hypot(dy);
        if length < GESTURE_MIN_LENGTH_RATIO * self.radius_in {
            return None;
        }

        let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
        let (side, projection) = self.nearest_side(mx, my);
        if (self.radius_in - projection).abs() > GESTURE_MAX_OFFSET_RATIO * self.radius_in {
            return None;
        }

        let a = self.side_angle(side);
        let across = ((dx * a.cos() + dy * a.sin()) / length).abs();
        let mark = if across >= (PI / 6.0).cos() {
            EdgeMark::Conn
        } else if across <= (PI / 3.0).cos() {
            EdgeMark::Wall
        } else {
            return None;
        };
        Some(EdgeGesture {
            mark,
            direction: self.directions[side],
        })
    }

    /// Rotations that make the guide arm of `state` face `angle`
    ///
    /// `angle` is measured in local space (counter-clockwise, y up). The
    /// guide arm is the first arm in side order. The result is the rotation
    /// count closest to `old_rotations` that achieves the orientation.
    pub fn click_orient_tile(&self, state: TileState, old_rotations: i32, angle: f64) -> i32 {
        let Some(arm) = self.directions.iter().position(|&d| state & d != 0) else {
            return old_rotations;
        };
        let n = self.sides as i32;
        let target = ((angle - self.angle_offset) / self.unit_angle).round() as i32;
        let delta = (arm as i32 - target - old_rotations).rem_euclid(n);
        if delta > n / 2 {
            old_rotations + delta - n
        } else {
            old_rotations + delta
        }
    }

    /// Vertex between side `k` and side `k + 1` (local space)
    fn vertex(&self, side: usize) -> (f64, f64) {
        let a = self.side_angle(side) + self.unit_angle / 2.0;
        (self.radius_out * a.cos(), self.radius_out * a.sin())
    }

    /// Vertices as screen offsets from the centre
    pub fn screen_vertices(&self) -> ArrayVec<(f64, f64), 8> {
        (0..self.sides)
            .map(|k| {
                let (x, y) = self.vertex(k);
                (x, -y)
            })
            .collect()
    }

    /// Closed SVG outline of the tile
    pub fn contour_path(&self) -> String {
        let mut path = String::new();
        for k in 0..self.sides {
            let (x, y) = self.vertex(k);
            path.push_str(if k == 0 { "M " } else { " L " });
            path.push_str(&format!("{} {}", coord(x), coord(-y)));
        }
        path.push_str(" z");
        path
    }

    /// SVG path with one segment from the centre to each connected side
    pub fn pipes_path(&self, state: TileState) -> String {
        let mut path = String::new();
        for (k, &direction) in self.directions.iter().enumerate() {
            if state & direction == 0 {
                continue;
            }
            let a = self.side_angle(k);
            if !path.is_empty() {
                path.push(' ');
            }
            path.push_str(&format!(
                "M 0 0 L {} {}",
                coord(self.radius_in * a.cos()),
                coord(-self.radius_in * a.sin())
            ));
        }
        path
    }

    /// Screen offset of the orientation guide dot, on the guide arm
    pub fn guide_dot_position(&self, state: TileState) -> (f64, f64) {
        match self.directions.iter().position(|&d| state & d != 0) {
            Some(side) => {
                let a = self.side_angle(side);
                let r = GUIDE_DOT_RATIO * self.radius_in;
                (r * a.cos(), -r * a.sin())
            }
            None => (0.0, 0.0),
        }
    }

    /// Screen endpoints of the side owning `direction`
    ///
    /// # Panics
    ///
    /// When `direction` is not one of this shape's directions.
    pub fn edgemark_line(&self, direction: Direction) -> [(f64, f64); 2] {
        let side = match self.side_of(direction) {
            Some(side) => side,
            None => panic!("direction {} is not a side of this tile", direction),
        };
        let (x1, y1) = self.vertex((side + self.sides - 1) % self.sides);
        let (x2, y2) = self.vertex(side);
        [(x1, -y1), (x2, -y2)]
    }
}

/// Path coordinate with at most five decimals and no negative zero
fn coord(v: f64) -> f64 {
    (v * 1e5).round() / 1e5 + 0.0
}
