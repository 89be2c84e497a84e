//! Elongated triangular grid
//!
//! Rows of squares alternate with rows of triangles. The tiling is cut into
//! vertical triples (up triangle, square, down triangle) laid out like the
//! cells of a [`HexaGrid`] stretched vertically: a hexagon row of the base
//! grid is one row of squares plus the triangles above and below it.
//!
//! A board of height `h` square rows uses `ceil(h / 2) + (h even)` hexagon
//! rows. On a non-wrapping board the up triangles of the first hexagon row
//! and the down triangles of the last are holes; for even heights the
//! squares of the last hexagon row are holes too.

use std::f64::consts::PI;

use log::debug;

use super::hexagon::{HexaGrid, YSTEP as HEX_YSTEP};
use super::{resolve_step, slot, UnitStep};
use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::tiling::{check_index, invalid_direction, EmptyCells, Tiling};
use crate::types::{
    hex,
    square::{E, N, S, W},
    Direction, Extents, GridKind, Neighbour, TileHit, TileState, ViewBox, VisibleTile,
};

/// Vertical distance between hexagon rows: a square plus a triangle height
pub const YSTEP: f64 = HEX_YSTEP + 1.0;

/// Inner radius of a unit triangle
const TRIANGLE_RADIUS_IN: f64 = 0.288_675_134_594_812_9;

const UNITS: usize = 3;
const DIRECTIONS: [Direction; 4] = [E, N, W, S];
const EDGEMARK_DIRECTIONS: [Direction; 2] = [N, W];

/// Adjacency of each unit, by direction slot (E, N, W, S)
const UNIT_STEPS: [[UnitStep; 4]; 3] = [
    // up triangle
    [
        UnitStep::Across(hex::NE, 2),
        UnitStep::Missing,
        UnitStep::Across(hex::NW, 2),
        UnitStep::Local(1),
    ],
    // square
    [
        UnitStep::Across(hex::E, 1),
        UnitStep::Local(0),
        UnitStep::Across(hex::W, 1),
        UnitStep::Local(2),
    ],
    // down triangle
    [
        UnitStep::Across(hex::SE, 0),
        UnitStep::Local(1),
        UnitStep::Across(hex::SW, 0),
        UnitStep::Missing,
    ],
];

/// Vertical offset of each unit centre from its hexagon centre
const UNIT_DY: [f64; 3] = [-0.5 - TRIANGLE_RADIUS_IN, 0.0, 0.5 + TRIANGLE_RADIUS_IN];

#[derive(Debug, Clone)]
pub struct EtratGrid {
    height: usize,
    hexagrid: HexaGrid,
    empty: EmptyCells,
    polygons: [RegularPolygonTile; 3],
    tile_types: [TileTypes; 3],
    extents: Extents,
}

impl EtratGrid {
    pub fn new(width: usize, height: usize, wrap: bool, tiles: &[TileState]) -> Self {
        assert!(width > 0 && height > 0, "empty {}x{} board", width, height);
        let even = height % 2 == 0;
        let hex_height = height.div_ceil(2) + usize::from(even);
        let hexagrid = HexaGrid::new(width, hex_height, wrap, &[]);
        let total = width * hex_height * UNITS;

        let polygons = [
            RegularPolygonTile::with_directions(3, PI / 6.0, TRIANGLE_RADIUS_IN, &[E, W, S]),
            RegularPolygonTile::new(4, 0.0, 0.5),
            RegularPolygonTile::with_directions(3, -PI / 6.0, TRIANGLE_RADIUS_IN, &[E, N, W]),
        ];
        let tile_types = [
            TileTypes::new(&polygons[0]),
            TileTypes::new(&polygons[1]),
            TileTypes::new(&polygons[2]),
        ];

        let mut empty = EmptyCells::from_tiles(tiles);
        if !wrap {
            for i in 0..width {
                empty.insert(i * UNITS);
                empty.insert(total - 1 - i * UNITS);
                if even {
                    empty.insert(total - 2 - i * UNITS);
                }
            }
        }

        let triangle_height = 3.0 * TRIANGLE_RADIUS_IN;
        let last_row = (hex_height - 1) as f64 * YSTEP;
        let extents = if wrap {
            Extents {
                xmin: -1.5,
                xmax: width as f64 + 1.0,
                ymin: -0.5 - triangle_height - YSTEP,
                ymax: last_row + 0.5 + triangle_height + YSTEP,
            }
        } else {
            Extents {
                xmin: -0.5,
                xmax: width as f64,
                ymin: -0.5,
                ymax: last_row + if even { -0.5 } else { 0.5 },
            }
        };

        debug!(
            "etrat grid {}x{} ({} hexagon rows) wrap={} holes={}",
            width,
            height,
            hex_height,
            wrap,
            empty.len()
        );
        Self {
            height,
            hexagrid,
            empty,
            polygons,
            tile_types,
            extents,
        }
    }

    /// Hexagon rows backing the grid
    pub fn hex_height(&self) -> usize {
        self.hexagrid.height()
    }

    /// Centre of the hexagon-row triple at an unbounded row/column pair
    fn triple_xy(r: i64, c: i64) -> (f64, f64) {
        let (x, y) = HexaGrid::rc_to_xy(r, c);
        (x, y * YSTEP / HEX_YSTEP)
    }

    /// Index of a unit at an unbounded hexagon position, unless it is a hole
    fn unit_index(&self, r: i64, c: i64, unit: usize) -> Option<usize> {
        self.hexagrid
            .rc_to_index(r, c)
            .map(|hex_index| hex_index * UNITS + unit)
            .filter(|&index| !self.empty.contains(index))
    }
}

impl Tiling for EtratGrid {
    fn kind(&self) -> GridKind {
        GridKind::Etrat
    }

    fn width(&self) -> usize {
        self.hexagrid.width()
    }

    fn height(&self) -> usize {
        self.height
    }

    fn wrap(&self) -> bool {
        self.hexagrid.wrap()
    }

    fn total(&self) -> usize {
        self.hexagrid.total() * UNITS
    }

    fn directions(&self) -> &[Direction] {
        &DIRECTIONS
    }

    fn opposite(&self, direction: Direction) -> Direction {
        match direction {
            E => W,
            W => E,
            N => S,
            S => N,
            _ => invalid_direction(self.kind(), direction),
        }
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
        log::trace!("etrat grid: cell {} made empty", index);
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
        let (r, c) = self.hexagrid.index_to_rc(index / UNITS);
        let (x, y) = Self::triple_xy(r, c);
        (x, y + UNIT_DY[index % UNITS])
    }

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit {
        let (r0, c0) = HexaGrid::nearest_rc(x, y * HEX_YSTEP / YSTEP);
        let mut nearest: Option<(f64, i64, i64, usize, f64, f64)> = None;
        for dr in [0, -1, 1] {
            for dc in [0, -1, 1] {
                let (r, c) = (r0 + dr, c0 + dc);
                let (tx, ty) = Self::triple_xy(r, c);
                for unit in 0..UNITS {
                    let (ux, uy) = (tx, ty + UNIT_DY[unit]);
                    if self.polygons[unit].is_inside(x - ux, uy - y) {
                        return TileHit {
                            index: self.unit_index(r, c, unit),
                            x: ux,
                            y: uy,
                        };
                    }
                    let distance = (x - ux).hypot(y - uy);
                    if nearest.map_or(true, |best| distance < best.0) {
                        nearest = Some((distance, r, c, unit, ux, uy));
                    }
                }
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
        resolve_step(&self.hexagrid, &self.empty, UNITS, index / UNITS, step)
    }

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile> {
        let hex_view = view.scaled(1.0, HEX_YSTEP / YSTEP);
        let mut visible = Vec::new();
        for hexagon in self.hexagrid.visible_tiles(&hex_view) {
            let y0 = hexagon.y * YSTEP / HEX_YSTEP;
            for unit in 0..UNITS {
                let index = hexagon.index * UNITS + unit;
                if self.empty.contains(index) {
                    continue;
                }
                visible.push(VisibleTile {
                    index,
                    x: hexagon.x,
                    y: y0 + UNIT_DY[unit],
                    key: format!("{}_{}", hexagon.key, unit),
                });
            }
        }
        visible
    }
}
