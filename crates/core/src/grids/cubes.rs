//! Rhombille tiling addressed by row, column and rhomb
//!
//! The same rhombs as [`CubeGrid`](super::CubeGrid), but without a hexagon
//! grid underneath: a cell is a triple of rhombs at `(row, column)`, index
//! `(row * width + column) * 3 + rhomb`, and every step is computed here.
//!
//! The torus is skewed differently from the hexagon one. Stepping above
//! row 0 re-enters at the last row one column to the right. Stepping below
//! the last row re-enters at row 0 one column to the left when the height
//! is even, in the same column when it is odd.

use log::debug;

use super::cube::{rhomb_at, rhomb_opposite, rhomb_polygon, rhomb_transforms};
use super::hexagon::{HexaGrid, YSTEP};
use super::slot;
use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::tiling::{check_index, clip_view, invalid_direction, tile_key, EmptyCells, Tiling};
use crate::transform::TileTransform;
use crate::types::{
    rhomb, Direction, Extents, GridKind, Neighbour, TileHit, TileState, ViewBox, VisibleTile,
};

const UNITS: usize = 3;
const EDGEMARK_DIRECTIONS: [Direction; 2] = [1, 2];

/// Where a rhomb side leads: column shift for even and odd rows, row shift,
/// and the rhomb reached. A zero move stays within the triple.
#[derive(Debug, Clone, Copy)]
struct Move {
    dx: [i64; 2],
    dr: i64,
    rhomb: usize,
}

const fn mv(dx: [i64; 2], dr: i64, rhomb: usize) -> Move {
    Move { dx, dr, rhomb }
}

const EAST: [i64; 2] = [1, 1];
const WEST: [i64; 2] = [-1, -1];
const RIGHT: [i64; 2] = [0, 1];
const LEFT: [i64; 2] = [-1, 0];
const STAY: [i64; 2] = [0, 0];

/// Moves of each rhomb, by side slot
const MOVES: [[Move; 4]; 3] = [
    [mv(EAST, 0, 2), mv(STAY, 0, 1), mv(STAY, 0, 2), mv(RIGHT, 1, 1)],
    [mv(LEFT, -1, 0), mv(STAY, 0, 2), mv(STAY, 0, 0), mv(RIGHT, -1, 2)],
    [mv(LEFT, 1, 1), mv(STAY, 0, 0), mv(STAY, 0, 1), mv(WEST, 0, 0)],
];

#[derive(Debug, Clone)]
pub struct CubesTiling {
    width: usize,
    height: usize,
    wrap: bool,
    empty: EmptyCells,
    polygon: RegularPolygonTile,
    tile_types: TileTypes,
    transforms: [TileTransform; 3],
    extents: Extents,
}

impl CubesTiling {
    pub fn new(width: usize, height: usize, wrap: bool, tiles: &[TileState]) -> Self {
        assert!(width > 0 && height > 0, "empty {}x{} board", width, height);
        let polygon = rhomb_polygon();
        let tile_types = TileTypes::new(&polygon);
        let pad = if wrap { 1.0 } else { 0.0 };
        let radius_out = 1.0 / 3f64.sqrt();
        let extents = Extents {
            xmin: -0.5 - pad,
            xmax: width as f64 + pad,
            ymin: -radius_out - pad * YSTEP,
            ymax: (height as f64 - 1.0 + pad) * YSTEP + radius_out,
        };
        let empty = EmptyCells::from_tiles(tiles);
        debug!(
            "cubes tiling {}x{} wrap={} holes={}",
            width,
            height,
            wrap,
            empty.len()
        );
        Self {
            width,
            height,
            wrap,
            empty,
            polygon,
            tile_types,
            transforms: rhomb_transforms(),
            extents,
        }
    }

    /// Index of rhomb `rhomb` of an unbounded row/column pair
    pub fn rcb_to_index(&self, r: i64, c: i64, rhomb: usize) -> Option<usize> {
        let (w, h) = (self.width as i64, self.height as i64);
        let (r, c) = if self.wrap {
            let periods = r.div_euclid(h);
            let row = r - periods * h;
            let mut x2 = 2 * c + (r & 1);
            x2 -= periods * if h % 2 == 1 { 1 } else { 2 };
            (row, (x2 - (row & 1)).div_euclid(2).rem_euclid(w))
        } else if (0..h).contains(&r) && (0..w).contains(&c) {
            (r, c)
        } else {
            return None;
        };
        Some((r * w + c) as usize * UNITS + rhomb)
    }

    fn index_to_rc(&self, index: usize) -> (i64, i64) {
        let cell = index / UNITS;
        ((cell / self.width) as i64, (cell % self.width) as i64)
    }
}

impl Tiling for CubesTiling {
    fn kind(&self) -> GridKind {
        GridKind::Cubes
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn wrap(&self) -> bool {
        self.wrap
    }

    fn total(&self) -> usize {
        self.width * self.height * UNITS
    }

    fn directions(&self) -> &[Direction] {
        &rhomb::ALL
    }

    fn opposite(&self, direction: Direction) -> Direction {
        rhomb_opposite(self.kind(), direction)
    }

    fn edgemark_directions(&self) -> &[Direction] {
        &EDGEMARK_DIRECTIONS
    }

    fn extents(&self) -> Extents {
        self.extents
    }

    fn empty_cells(&self) -> &EmptyCells {
        &self.empty
    }

    fn make_empty(&mut self, index: usize) {
        check_index(index, self.total());
        log::trace!("cubes tiling: cell {} made empty", index);
        self.empty.insert(index);
    }

    fn polygon_at(&self, index: usize) -> &RegularPolygonTile {
        check_index(index, self.total());
        &self.polygon
    }

    fn tile_types_at(&self, index: usize) -> &TileTypes {
        check_index(index, self.total());
        &self.tile_types
    }

    fn tile_transform(&self, index: usize) -> TileTransform {
        check_index(index, self.total());
        self.transforms[index % UNITS]
    }

    fn index_to_xy(&self, index: usize) -> (f64, f64) {
        check_index(index, self.total());
        let (r, c) = self.index_to_rc(index);
        HexaGrid::rc_to_xy(r, c)
    }

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit {
        let (r, c) = HexaGrid::nearest_rc(x, y);
        let (x0, y0) = HexaGrid::rc_to_xy(r, c);
        let index = self
            .rcb_to_index(r, c, rhomb_at(x - x0, y - y0))
            .filter(|&index| !self.empty.contains(index));
        TileHit {
            index,
            x: x0,
            y: y0,
        }
    }

    fn find_neighbour(&self, index: usize, direction: Direction) -> Neighbour {
        check_index(index, self.total());
        let Some(side) = slot(direction) else {
            invalid_direction(self.kind(), direction)
        };
        let step = MOVES[index % UNITS][side];
        let (mut r, mut c) = self.index_to_rc(index);
        c += step.dx[(r & 1) as usize];
        r += step.dr;

        let (w, h) = (self.width as i64, self.height as i64);
        if self.wrap {
            if r == -1 {
                r = h - 1;
                c += 1;
            } else if r == h {
                r = 0;
                c -= 1 - h % 2;
            }
            c = c.rem_euclid(w);
        }
        if !(0..h).contains(&r) || !(0..w).contains(&c) {
            return Neighbour::NONE;
        }
        let neighbour = (r * w + c) as usize * UNITS + step.rhomb;
        Neighbour::at(neighbour, self.empty.contains(neighbour))
    }

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile> {
        let Some((xmin, xmax, ymin, ymax)) = clip_view(view, &self.extents, 1.0) else {
            return Vec::new();
        };
        let mut visible = Vec::new();
        for r in ((ymin / YSTEP).ceil() as i64)..=((ymax / YSTEP).floor() as i64) {
            let shift = 0.5 * (r & 1) as f64;
            for c in ((xmin - shift).ceil() as i64)..=((xmax - shift).floor() as i64) {
                let (x, y) = HexaGrid::rc_to_xy(r, c);
                let key = tile_key(x, y);
                for rhomb in 0..UNITS {
                    let Some(index) = self.rcb_to_index(r, c, rhomb) else {
                        continue;
                    };
                    if self.empty.contains(index) {
                        continue;
                    }
                    visible.push(VisibleTile {
                        index,
                        x,
                        y,
                        key: format!("{}_{}", key, rhomb),
                    });
                }
            }
        }
        visible
    }
}
