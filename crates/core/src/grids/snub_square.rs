//! Snub square grid
//!
//! Every cell of a [`SquareGrid`] (pitch `2 cos 15°`) holds six units: two
//! squares tilted by ±15° (units 0 and 3) and four triangles (1, 2, 4, 5).
//! A unit is anchored at its own centre.
//!
//! The requested size is divided by `√6` and rounded to get the base square
//! count, so a board covers about as many cells as a square board of the
//! same size. See [`base_size`].
//!
//! On a non-wrapping board built without explicit tiles, unit 5 of the first
//! cell of the last row hangs off the board and is a hole.

use std::f64::consts::PI;

use log::debug;

use super::square::SquareGrid;
use super::{resolve_step, shapes_bounds, slot, UnitStep};
use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::tiling::{check_index, invalid_direction, EmptyCells, Tiling};
use crate::types::{
    square::{E, N, S, W},
    Direction, Extents, GridKind, Neighbour, TileHit, TileState, ViewBox, VisibleTile,
};

/// Distance between base cell origins
pub const STEP: f64 = 1.931_851_652_578_136_6;

const TRIANGLE_RADIUS_IN: f64 = 0.288_675_134_594_812_9;

const UNITS: usize = 6;
const DIRECTIONS: [Direction; 4] = [E, N, W, S];
const EDGEMARK_DIRECTIONS: [Direction; 2] = [N, W];

/// Adjacency of each unit, by direction slot (E, N, W, S). Steps across
/// cells go to the square neighbour in the same direction.
const UNIT_STEPS: [[UnitStep; 4]; 6] = [
    [
        UnitStep::Local(1),
        UnitStep::Across(N, 5),
        UnitStep::Across(W, 2),
        UnitStep::Local(4),
    ],
    [
        UnitStep::Local(2),
        UnitStep::Across(N, 3),
        UnitStep::Local(0),
        UnitStep::Missing,
    ],
    [
        UnitStep::Across(E, 0),
        UnitStep::Missing,
        UnitStep::Local(1),
        UnitStep::Local(3),
    ],
    [
        UnitStep::Across(E, 5),
        UnitStep::Local(2),
        UnitStep::Local(4),
        UnitStep::Across(S, 1),
    ],
    [
        UnitStep::Local(3),
        UnitStep::Local(0),
        UnitStep::Local(5),
        UnitStep::Missing,
    ],
    [
        UnitStep::Local(4),
        UnitStep::Missing,
        UnitStep::Across(W, 3),
        UnitStep::Across(S, 0),
    ],
];

/// Units that may contain a point, by quadrant of the point relative to the
/// nearest cell origin: `(row shift, column shift, unit)`
const LEFT_ABOVE: &[(i64, i64, usize)] = &[(0, 0, 0), (0, 0, 1), (-1, 0, 5), (-1, 0, 3)];
const LEFT_BELOW: &[(i64, i64, usize)] = &[(0, 0, 4), (0, 0, 5), (0, 0, 0), (0, 0, 3)];
const RIGHT_ABOVE: &[(i64, i64, usize)] =
    &[(0, 0, 1), (0, 0, 2), (0, 1, 0), (-1, 0, 3), (-1, 1, 5)];
const RIGHT_BELOW: &[(i64, i64, usize)] = &[(0, 0, 3), (0, 0, 2), (0, 1, 5), (0, 1, 0)];

/// Base square cells backing a board of the requested size, at least 1x1
///
/// ```
/// use tessera_core::grids::snub_square::base_size;
///
/// assert_eq!(base_size(6, 6), (2, 2));
/// assert_eq!(base_size(1, 10), (1, 4));
/// ```
pub fn base_size(width: usize, height: usize) -> (usize, usize) {
    let scale = |n: usize| ((n as f64 / 6f64.sqrt()).round() as usize).max(1);
    (scale(width), scale(height))
}

#[derive(Debug, Clone)]
pub struct SnubSquareGrid {
    width: usize,
    height: usize,
    squaregrid: SquareGrid,
    empty: EmptyCells,
    polygons: [RegularPolygonTile; 6],
    tile_types: [TileTypes; 6],
    offsets: [(f64, f64); 6],
    extents: Extents,
}

impl SnubSquareGrid {
    pub fn new(width: usize, height: usize, wrap: bool, tiles: &[TileState]) -> Self {
        assert!(width > 0 && height > 0, "empty {}x{} board", width, height);
        let (w, h) = base_size(width, height);
        let squaregrid = SquareGrid::new(w, h, wrap, &[]);
        let polygons = [
            RegularPolygonTile::new(4, PI / 12.0, 0.5),
            RegularPolygonTile::with_directions(3, -PI / 4.0, TRIANGLE_RADIUS_IN, &[E, N, W]),
            RegularPolygonTile::with_directions(3, PI / 12.0, TRIANGLE_RADIUS_IN, &[E, W, S]),
            RegularPolygonTile::new(4, -PI / 12.0, 0.5),
            RegularPolygonTile::with_directions(3, -PI / 12.0, TRIANGLE_RADIUS_IN, &[E, N, W]),
            RegularPolygonTile::with_directions(3, PI / 4.0, TRIANGLE_RADIUS_IN, &[E, W, S]),
        ];
        let tile_types = [
            TileTypes::new(&polygons[0]),
            TileTypes::new(&polygons[1]),
            TileTypes::new(&polygons[2]),
            TileTypes::new(&polygons[3]),
            TileTypes::new(&polygons[4]),
            TileTypes::new(&polygons[5]),
        ];

        // unit centres: direction from the cell origin and distance in outer radii
        let placement = [
            (5.0 * PI / 6.0, 1.0),
            (5.0 * PI / 12.0, 1.0),
            (PI / 12.0, 1.0),
            (-PI / 3.0, 1.0),
            (-3.0 * PI / 4.0, 1.0),
            (-3.0 * PI / 4.0, 2.0),
        ];
        let mut offsets = [(0.0, 0.0); 6];
        for (unit, &(angle, distance)) in placement.iter().enumerate() {
            let r = distance * polygons[unit].radius_out();
            offsets[unit] = (r * angle.cos(), -r * angle.sin());
        }

        let (xmin, xmax, ymin, ymax) = shapes_bounds(polygons.iter().zip(offsets));
        let pad = if wrap { STEP } else { 0.0 };
        let extents = Extents {
            xmin: xmin - pad,
            xmax: (w - 1) as f64 * STEP + xmax + pad,
            ymin: ymin - pad,
            ymax: (h - 1) as f64 * STEP + ymax + pad,
        };

        let mut empty = EmptyCells::from_tiles(tiles);
        if tiles.is_empty() && !wrap {
            empty.insert((w * h - w) * UNITS + 5);
        }
        debug!(
            "snub square grid {}x{} ({}x{} squares) wrap={} holes={}",
            width,
            height,
            w,
            h,
            wrap,
            empty.len()
        );
        Self {
            width,
            height,
            squaregrid,
            empty,
            polygons,
            tile_types,
            offsets,
            extents,
        }
    }

    /// Base square columns
    pub fn base_width(&self) -> usize {
        self.squaregrid.width()
    }

    /// Base square rows
    pub fn base_height(&self) -> usize {
        self.squaregrid.height()
    }

    /// Centre of a unit of an unbounded base cell
    fn unit_xy(&self, r: i64, c: i64, unit: usize) -> (f64, f64) {
        let (dx, dy) = self.offsets[unit];
        (c as f64 * STEP + dx, r as f64 * STEP + dy)
    }

    fn unit_index(&self, r: i64, c: i64, unit: usize) -> Option<usize> {
        self.squaregrid
            .rc_to_index(r, c)
            .map(|cell| cell * UNITS + unit)
            .filter(|&index| !self.empty.contains(index))
    }
}

impl Tiling for SnubSquareGrid {
    fn kind(&self) -> GridKind {
        GridKind::SnubSquare
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn wrap(&self) -> bool {
        self.squaregrid.wrap()
    }

    fn total(&self) -> usize {
        self.squaregrid.total() * UNITS
    }

    fn directions(&self) -> &[Direction] {
        &DIRECTIONS
    }

    fn opposite(&self, direction: Direction) -> Direction {
        self.squaregrid.opposite(direction)
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
        log::trace!("snub square grid: cell {} made empty", index);
        self.empty.insert(index);
    }

    fn polygon_at(&self, index: usize) -> &RegularPolygonTile {
        check_index(index, self.total());
        &self.polygons[index % UNITS]
    }

    fn tile_types_at(&self, index: usize) -> &TileTypes {
        check_index(index, self.total());
        &self.tile_types[index % UNITS]
    }

    fn index_to_xy(&self, index: usize) -> (f64, f64) {
        check_index(index, self.total());
        let (r, c) = self.squaregrid.index_to_rc(index / UNITS);
        self.unit_xy(r, c, index % UNITS)
    }

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit {
        let c0 = (x / STEP).round() as i64;
        let r0 = (y / STEP).round() as i64;
        let candidates = match (x >= c0 as f64 * STEP, y >= r0 as f64 * STEP) {
            (false, false) => LEFT_ABOVE,
            (false, true) => LEFT_BELOW,
            (true, false) => RIGHT_ABOVE,
            (true, true) => RIGHT_BELOW,
        };

        let mut nearest: Option<(f64, i64, i64, usize, f64, f64)> = None;
        for &(dr, dc, unit) in candidates {
            let (r, c) = (r0 + dr, c0 + dc);
            let (ux, uy) = self.unit_xy(r, c, unit);
            if self.polygons[unit].is_inside(x - ux, uy - y) {
                return TileHit {
                    index: self.unit_index(r, c, unit),
                    x: ux,
                    y: uy,
                };
            }
            let distance = (x - ux).hypot(y - uy);
            if nearest.map_or(true, |(best, ..)| distance < best) {
                nearest = Some((distance, r, c, unit, ux, uy));
            }
        }
        match nearest {
            Some((_, r, c, unit, ux, uy)) => TileHit {
                index: self.unit_index(r, c, unit),
                x: ux,
                y: uy,
            },
            None => TileHit {
                index: None,
                x,
                y,
            },
        }
    }

    fn find_neighbour(&self, index: usize, direction: Direction) -> Neighbour {
        check_index(index, self.total());
        let Some(side) = slot(direction) else {
            invalid_direction(self.kind(), direction)
        };
        let step = UNIT_STEPS[index % UNITS][side];
        resolve_step(&self.squaregrid, &self.empty, UNITS, index / UNITS, step)
    }

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile> {
        let square_view = view.scaled(1.0 / STEP, 1.0 / STEP);
        let mut visible = Vec::new();
        for cell in self.squaregrid.visible_tiles(&square_view) {
            let (r, c) = (cell.y as i64, cell.x as i64);
            for unit in 0..UNITS {
                let index = cell.index * UNITS + unit;
                if self.empty.contains(index) {
                    continue;
                }
                let (x, y) = self.unit_xy(r, c, unit);
                visible.push(VisibleTile {
                    index,
                    x,
                    y,
                    key: format!("{}_{}", cell.key, unit),
                });
            }
        }
        visible
    }
}
