//! Rhombille ("cube") grid over hexagons
//!
//! Each hexagon of a [`HexaGrid`] is split into three rhombs meeting at its
//! centre, like a cube seen along its diagonal. Rhomb 0 covers the east and
//! south-east hexagon edges, rhomb 1 the north-east and north-west ones,
//! rhomb 2 the west and south-west ones.
//!
//! A rhomb is drawn as a unit square (sides starting at -90°) sheared by
//! 30°, squashed, rotated and moved towards its corner of the hexagon. The
//! anchor of every rhomb is the centre of its hexagon.
//!
//! Rhomb sides carry the labels 1, 2, 4, 8 in counter-clockwise order;
//! 1 faces 8 and 2 faces 4 across a shared edge.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use log::debug;

use super::hexagon::{HexaGrid, YSTEP};
use super::{resolve_step, slot, UnitStep};
use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::tiling::{check_index, invalid_direction, EmptyCells, Tiling};
use crate::transform::TileTransform;
use crate::types::{
    hex, rhomb, Direction, Extents, GridKind, Neighbour, TileHit, TileState, ViewBox, VisibleTile,
};

const UNITS: usize = 3;
const EDGEMARK_DIRECTIONS: [Direction; 2] = [1, 2];

/// Adjacency of each rhomb, by side slot
const RHOMB_STEPS: [[UnitStep; 4]; 3] = [
    [
        UnitStep::Across(hex::E, 2),
        UnitStep::Local(1),
        UnitStep::Local(2),
        UnitStep::Across(hex::SE, 1),
    ],
    [
        UnitStep::Across(hex::NW, 0),
        UnitStep::Local(2),
        UnitStep::Local(0),
        UnitStep::Across(hex::NE, 2),
    ],
    [
        UnitStep::Across(hex::SW, 1),
        UnitStep::Local(0),
        UnitStep::Local(1),
        UnitStep::Across(hex::W, 0),
    ],
];

/// Rotation of each rhomb and the direction of its centre from the hexagon centre
const RHOMB_PLACEMENT: [(f64, f64); 3] = [
    (-FRAC_PI_2, -PI / 6.0),
    (5.0 * PI / 6.0, FRAC_PI_2),
    (PI / 6.0, -5.0 * PI / 6.0),
];

pub(crate) fn rhomb_opposite(kind: GridKind, direction: Direction) -> Direction {
    match direction {
        1 => 8,
        8 => 1,
        2 => 4,
        4 => 2,
        _ => invalid_direction(kind, direction),
    }
}

/// Unit-square shape shared by all rhombs
pub(crate) fn rhomb_polygon() -> RegularPolygonTile {
    RegularPolygonTile::new(4, -FRAC_PI_2, 0.5)
}

/// Affine placements of the three rhombs inside a hexagon
pub(crate) fn rhomb_transforms() -> [TileTransform; 3] {
    let sqrt3 = 3f64.sqrt();
    RHOMB_PLACEMENT.map(|(rotate_th, towards)| TileTransform {
        scale_x: 1.0 / sqrt3,
        scale_y: YSTEP / sqrt3,
        skew_x: PI / 6.0,
        skew_y: 0.0,
        rotate_th,
        translate_x: towards.cos() * sqrt3 / 6.0,
        translate_y: -towards.sin() * sqrt3 / 6.0,
    })
}

/// Rhomb of a hexagon containing a point, from the point's offset to the centre
pub(crate) fn rhomb_at(dx: f64, dy: f64) -> usize {
    let angle = (-dy).atan2(dx);
    (((angle + FRAC_PI_2) * 3.0 / TAU).floor() as i64 + 3).rem_euclid(3) as usize
}

#[derive(Debug, Clone)]
pub struct CubeGrid {
    hexagrid: HexaGrid,
    empty: EmptyCells,
    polygon: RegularPolygonTile,
    tile_types: TileTypes,
    transforms: [TileTransform; 3],
}

impl CubeGrid {
    pub fn new(width: usize, height: usize, wrap: bool, tiles: &[TileState]) -> Self {
        let hexagrid = HexaGrid::new(width, height, wrap, &[]);
        let polygon = rhomb_polygon();
        let tile_types = TileTypes::new(&polygon);
        let empty = EmptyCells::from_tiles(tiles);
        debug!(
            "cube grid {}x{} wrap={} holes={}",
            width,
            height,
            wrap,
            empty.len()
        );
        Self {
            hexagrid,
            empty,
            polygon,
            tile_types,
            transforms: rhomb_transforms(),
        }
    }

    /// The hexagon grid the rhombs are cut from
    pub fn hexagrid(&self) -> &HexaGrid {
        &self.hexagrid
    }
}

impl Tiling for CubeGrid {
    fn kind(&self) -> GridKind {
        GridKind::Cube
    }

    fn width(&self) -> usize {
        self.hexagrid.width()
    }

    fn height(&self) -> usize {
        self.hexagrid.height()
    }

    fn wrap(&self) -> bool {
        self.hexagrid.wrap()
    }

    fn total(&self) -> usize {
        self.hexagrid.total() * UNITS
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
        self.hexagrid.extents()
    }

    fn empty_cells(&self) -> &EmptyCells {
        &self.empty
    }

    fn make_empty(&mut self, index: usize) {
        check_index(index, self.total());
        log::trace!("cube grid: cell {} made empty", index);
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
        self.hexagrid.index_to_xy(index / UNITS)
    }

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit {
        let hit = self.hexagrid.which_tile_at(x, y);
        let rhomb = rhomb_at(x - hit.x, y - hit.y);
        let index = hit
            .index
            .map(|hex_index| hex_index * UNITS + rhomb)
            .filter(|&index| !self.empty.contains(index));
        TileHit { index, ..hit }
    }

    fn find_neighbour(&self, index: usize, direction: Direction) -> Neighbour {
        check_index(index, self.total());
        let Some(side) = slot(direction) else {
            invalid_direction(self.kind(), direction)
        };
        let step = RHOMB_STEPS[index % UNITS][side];
        resolve_step(&self.hexagrid, &self.empty, UNITS, index / UNITS, step)
    }

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile> {
        let mut visible = Vec::new();
        for hexagon in self.hexagrid.visible_tiles(view) {
            for rhomb in 0..UNITS {
                let index = hexagon.index * UNITS + rhomb;
                if self.empty.contains(index) {
                    continue;
                }
                visible.push(VisibleTile {
                    index,
                    x: hexagon.x,
                    y: hexagon.y,
                    key: format!("{}_{}", hexagon.key, rhomb),
                });
            }
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rhomb_interior(grid: &CubeGrid, index: usize) -> (f64, f64) {
        let (x, y) = grid.index_to_xy(index);
        let (dx, dy) = grid.tile_transform(index).polygon_to_screen(0.0, 0.0);
        (x + dx, y + dy)
    }

    #[test]
    fn test_cube_neighbours_with_hole() {
        let mut grid = CubeGrid::new(3, 3, false, &[]);
        grid.make_empty(14);
        assert_eq!(grid.find_neighbour(9, 1), Neighbour::at(14, true));
        assert_eq!(grid.find_neighbour(9, 8), Neighbour::at(22, false));
        assert_eq!(grid.find_neighbour(18, 8), Neighbour::NONE);
    }

    #[test]
    fn test_cube_local_neighbours() {
        let grid = CubeGrid::new(2, 2, false, &[]);
        assert_eq!(grid.find_neighbour(3, 2), Neighbour::at(4, false));
        assert_eq!(grid.find_neighbour(3, 4), Neighbour::at(5, false));
        assert_eq!(grid.find_neighbour(4, 4), Neighbour::at(3, false));
        assert_eq!(grid.find_neighbour(5, 2), Neighbour::at(3, false));
    }

    #[test]
    fn test_cube_wrap() {
        let grid = CubeGrid::new(4, 4, true, &[]);
        assert_eq!(grid.find_neighbour(0, 1), Neighbour::at(5, false));
        assert_eq!(grid.find_neighbour(1, 8), Neighbour::at(38, false));
        assert_eq!(grid.find_neighbour(0, 8), Neighbour::at(13, false));
        assert_eq!(grid.find_neighbour(45, 8), Neighbour::at(1, false));
        assert_eq!(grid.find_neighbour(46, 1), Neighbour::at(33, false));
    }

    #[test]
    fn test_rhomb_interiors() {
        let grid = CubeGrid::new(4, 4, false, &[]);
        let (x, y) = rhomb_interior(&grid, 3);
        assert!((x - 1.25).abs() < 1e-9 && (y - 0.144_337_567_297_406_4).abs() < 1e-9);
        let (x, y) = rhomb_interior(&grid, 4);
        assert!((x - 1.0).abs() < 1e-9 && (y + 0.288_675_134_594_812_9).abs() < 1e-9);
        for index in 0..grid.total() {
            let (x, y) = rhomb_interior(&grid, index);
            assert_eq!(grid.which_tile_at(x, y).index, Some(index));
        }
    }

    #[test]
    fn test_rhomb_at_wedges() {
        assert_eq!(rhomb_at(0.3, 0.1), 0);
        assert_eq!(rhomb_at(0.0, -0.3), 1);
        assert_eq!(rhomb_at(-0.3, 0.1), 2);
    }
}
