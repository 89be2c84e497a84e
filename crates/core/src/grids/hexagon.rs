//! Hexagonal grid
//!
//! Pointy-top hexagons in rows; odd rows are shifted half a cell to the
//! right. Cell `(r, c)` is centred at `(c + (r odd) / 2, r * √3/2)`.
//!
//! # Wrapping
//!
//! Columns wrap modulo the width. Rows wrap modulo the height, but for odd
//! heights one vertical period lands on a row of the other parity, so the
//! period vector is `(1/2, h * √3/2)` rather than `(0, h * √3/2)`. Working in
//! doubled x (`2c + (r odd)`) makes this exact: every full period of rows
//! subtracts one from doubled x when the height is odd.

use log::debug;

use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::tiling::{check_index, clip_view, invalid_direction, tile_key, EmptyCells, Tiling};
use crate::types::{
    hex::{E, NE, NW, SE, SW, W},
    Direction, Extents, GridKind, Neighbour, TileHit, TileState, ViewBox, VisibleTile,
};

/// Vertical distance between row centres
pub const YSTEP: f64 = 0.866_025_403_784_438_6;

/// Hexagon outer radius for an inner radius of 1/2
const RADIUS_OUT: f64 = 0.577_350_269_189_625_8;

const DIRECTIONS: [Direction; 6] = [E, NE, NW, W, SW, SE];
const EDGEMARK_DIRECTIONS: [Direction; 3] = [NE, NW, W];

#[derive(Debug, Clone)]
pub struct HexaGrid {
    width: usize,
    height: usize,
    wrap: bool,
    empty: EmptyCells,
    polygon: RegularPolygonTile,
    tile_types: TileTypes,
    extents: Extents,
}

impl HexaGrid {
    pub fn new(width: usize, height: usize, wrap: bool, tiles: &[TileState]) -> Self {
        assert!(width > 0 && height > 0, "empty {}x{} board", width, height);
        let polygon = RegularPolygonTile::new(6, 0.0, 0.5);
        let tile_types = TileTypes::new(&polygon);
        let pad = if wrap { 1.0 } else { 0.0 };
        let extents = Extents {
            xmin: -0.5 - pad,
            xmax: width as f64 + pad,
            ymin: -RADIUS_OUT - pad * YSTEP,
            ymax: (height as f64 - 1.0 + pad) * YSTEP + RADIUS_OUT,
        };
        let empty = EmptyCells::from_tiles(tiles);
        debug!(
            "hexagonal grid {}x{} wrap={} holes={}",
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
            extents,
        }
    }

    /// Map an unbounded row/column pair onto the board
    pub fn normalize(&self, r: i64, c: i64) -> Option<(i64, i64)> {
        let (w, h) = (self.width as i64, self.height as i64);
        if !self.wrap {
            return ((0..h).contains(&r) && (0..w).contains(&c)).then_some((r, c));
        }
        let periods = r.div_euclid(h);
        let row = r - periods * h;
        let mut x2 = 2 * c + (r & 1);
        if h % 2 == 1 {
            x2 -= periods;
        }
        let col = (x2 - (row & 1)).div_euclid(2).rem_euclid(w);
        Some((row, col))
    }

    pub fn rc_to_index(&self, r: i64, c: i64) -> Option<usize> {
        self.normalize(r, c)
            .map(|(r, c)| (r * self.width as i64 + c) as usize)
    }

    pub fn index_to_rc(&self, index: usize) -> (i64, i64) {
        ((index / self.width) as i64, (index % self.width) as i64)
    }

    /// Centre of an unbounded row/column pair
    pub fn rc_to_xy(r: i64, c: i64) -> (f64, f64) {
        (c as f64 + 0.5 * (r & 1) as f64, r as f64 * YSTEP)
    }

    /// Row/column one step away in `direction`
    pub fn step(r: i64, c: i64, direction: Direction) -> Option<(i64, i64)> {
        let odd = r & 1;
        match direction {
            E => Some((r, c + 1)),
            W => Some((r, c - 1)),
            NE => Some((r - 1, c + odd)),
            NW => Some((r - 1, c - 1 + odd)),
            SE => Some((r + 1, c + odd)),
            SW => Some((r + 1, c - 1 + odd)),
            _ => None,
        }
    }

    /// Unbounded row/column of the hexagon containing a point
    pub fn nearest_rc(x: f64, y: f64) -> (i64, i64) {
        let rr = y / YSTEP;
        let r0 = rr.round() as i64;
        let c0 = (x - 0.5 * (r0 & 1) as f64).round() as i64;
        let (x0, y0) = Self::rc_to_xy(r0, c0);
        let d0 = (x - x0).hypot(y - y0);
        if d0 <= 0.5 {
            return (r0, c0);
        }
        // the point may belong to the adjacent row instead
        let mut r1 = rr.floor() as i64;
        if r1 == r0 {
            r1 = rr.ceil() as i64;
        }
        let c1 = (x - 0.5 * (r1 & 1) as f64).round() as i64;
        let (x1, y1) = Self::rc_to_xy(r1, c1);
        if d0 < (x - x1).hypot(y - y1) {
            (r0, c0)
        } else {
            (r1, c1)
        }
    }
}

impl Tiling for HexaGrid {
    fn kind(&self) -> GridKind {
        GridKind::Hexagonal
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
        self.width * self.height
    }

    fn directions(&self) -> &[Direction] {
        &DIRECTIONS
    }

    fn opposite(&self, direction: Direction) -> Direction {
        match direction {
            E => W,
            W => E,
            NE => SW,
            SW => NE,
            NW => SE,
            SE => NW,
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
        log::trace!("hexagonal grid: cell {} made empty", index);
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

    fn index_to_xy(&self, index: usize) -> (f64, f64) {
        check_index(index, self.total());
        let (r, c) = self.index_to_rc(index);
        Self::rc_to_xy(r, c)
    }

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit {
        let (r, c) = Self::nearest_rc(x, y);
        let (x0, y0) = Self::rc_to_xy(r, c);
        let index = self
            .rc_to_index(r, c)
            .filter(|&index| !self.empty.contains(index));
        TileHit {
            index,
            x: x0,
            y: y0,
        }
    }

    fn find_neighbour(&self, index: usize, direction: Direction) -> Neighbour {
        check_index(index, self.total());
        let (r, c) = self.index_to_rc(index);
        let Some((r, c)) = Self::step(r, c, direction) else {
            invalid_direction(self.kind(), direction)
        };
        match self.rc_to_index(r, c) {
            Some(neighbour) => Neighbour::at(neighbour, self.empty.contains(neighbour)),
            None => Neighbour::NONE,
        }
    }

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile> {
        let Some((xmin, xmax, ymin, ymax)) = clip_view(view, &self.extents, 1.0) else {
            return Vec::new();
        };
        let mut visible = Vec::new();
        for r in ((ymin / YSTEP).ceil() as i64)..=((ymax / YSTEP).floor() as i64) {
            let shift = 0.5 * (r & 1) as f64;
            for c in ((xmin - shift).ceil() as i64)..=((xmax - shift).floor() as i64) {
                let Some(index) = self.rc_to_index(r, c) else {
                    continue;
                };
                if self.empty.contains(index) {
                    continue;
                }
                let (x, y) = Self::rc_to_xy(r, c);
                visible.push(VisibleTile {
                    index,
                    x,
                    y,
                    key: tile_key(x, y),
                });
            }
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_neighbours_with_hole() {
        let grid = HexaGrid::new(3, 3, false, &[1, 1, 1, 1, 0, 1, 1, 1, 1]);
        assert_eq!(grid.find_neighbour(3, E), Neighbour::at(4, true));
        assert_eq!(grid.find_neighbour(3, NE), Neighbour::at(1, false));
        assert_eq!(grid.find_neighbour(3, W), Neighbour::NONE);
    }

    #[test]
    fn test_hex_wrap_odd_height() {
        let grid = HexaGrid::new(4, 3, true, &[]);
        assert_eq!(grid.find_neighbour(0, NE), Neighbour::at(9, false));
        assert_eq!(grid.find_neighbour(0, NW), Neighbour::at(8, false));
        assert_eq!(grid.find_neighbour(0, W), Neighbour::at(3, false));
        assert_eq!(grid.find_neighbour(8, SE), Neighbour::at(0, false));
        assert_eq!(grid.find_neighbour(8, SW), Neighbour::at(3, false));
        assert_eq!(grid.find_neighbour(11, E), Neighbour::at(8, false));
        assert_eq!(grid.rc_to_index(-1, 0), Some(9));
        assert_eq!(grid.rc_to_index(3, 0), Some(0));
        assert_eq!(grid.rc_to_index(-1, -1), Some(8));
    }

    #[test]
    fn test_hex_which_tile_at() {
        let grid = HexaGrid::new(3, 3, false, &[]);
        // centre of row 1, column 1
        let hit = grid.which_tile_at(1.5, YSTEP);
        assert_eq!(hit.index, Some(4));
        assert!((hit.x - 1.5).abs() < 1e-12);
        // near the pointy top of cell 4, above the row boundary
        let hit = grid.which_tile_at(1.5, YSTEP - 0.52);
        assert_eq!(hit.index, Some(4));
        // off the board
        assert_eq!(grid.which_tile_at(-1.0, 0.0).index, None);
    }

    #[test]
    fn test_hex_visible_tiles_skip_holes() {
        let mut grid = HexaGrid::new(2, 2, false, &[]);
        grid.make_empty(3);
        let visible = grid.visible_tiles(&ViewBox::new(-1.0, -1.0, 4.0, 4.0));
        let indices: Vec<usize> = visible.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(visible[2].key, "5_9");
    }
}
