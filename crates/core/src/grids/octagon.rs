//! Octagon-and-square grid
//!
//! Octagons sit on the integer lattice, index `r * width + c`, centre
//! `(c, r)`. The small square between four octagons has index
//! `width * height + r * width + c` and sits at the south-east corner of
//! octagon `(r, c)`, centre `(c + 1/2, r + 1/2)`.
//!
//! Octagons use all eight compass directions; squares only the diagonals.
//! On a non-wrapping board the squares of the last row and of the last
//! column hang off the edge and are padding holes.

use std::f64::consts::PI;

use log::debug;

use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::tiling::{check_index, clip_view, invalid_direction, tile_key, EmptyCells, Tiling};
use crate::types::{
    octagon::{DIAGONALS, E, N, NE, NW, S, SE, SW, W},
    Direction, Extents, GridKind, Neighbour, TileHit, TileState, ViewBox, VisibleTile,
};

const DIRECTIONS: [Direction; 8] = [E, NE, N, NW, W, SW, S, SE];
const EDGEMARK_DIRECTIONS: [Direction; 4] = [NE, N, NW, W];

#[derive(Debug, Clone)]
pub struct OctaGrid {
    width: usize,
    height: usize,
    wrap: bool,
    empty: EmptyCells,
    octagon: RegularPolygonTile,
    square: RegularPolygonTile,
    octagon_types: TileTypes,
    square_types: TileTypes,
    extents: Extents,
}

impl OctaGrid {
    pub fn new(width: usize, height: usize, wrap: bool, tiles: &[TileState]) -> Self {
        assert!(width > 0 && height > 0, "empty {}x{} board", width, height);
        let octagon = RegularPolygonTile::new(8, 0.0, 0.5);
        let square =
            RegularPolygonTile::with_directions(4, PI / 4.0, 0.5 * (PI / 8.0).tan(), &DIAGONALS);
        let octagon_types = TileTypes::new(&octagon);
        let square_types = TileTypes::new(&square);

        let pad = if wrap { 1.0 } else { 0.0 };
        let extents = Extents {
            xmin: -0.5 - pad,
            xmax: width as f64 - 0.5 + pad,
            ymin: -0.5 - pad,
            ymax: height as f64 - 0.5 + pad,
        };

        let mut empty = EmptyCells::from_tiles(tiles);
        if !wrap {
            let cells = width * height;
            for r in 0..height {
                for c in 0..width {
                    if r == height - 1 || c == width - 1 {
                        empty.insert(cells + r * width + c);
                    }
                }
            }
        }
        debug!(
            "octagonal grid {}x{} wrap={} holes={}",
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
            octagon,
            square,
            octagon_types,
            square_types,
            extents,
        }
    }

    fn octagons(&self) -> usize {
        self.width * self.height
    }

    /// Lattice index of an unbounded row/column pair
    fn rc_to_cell(&self, r: i64, c: i64) -> Option<usize> {
        let (w, h) = (self.width as i64, self.height as i64);
        let (r, c) = if self.wrap {
            (r.rem_euclid(h), c.rem_euclid(w))
        } else if (0..h).contains(&r) && (0..w).contains(&c) {
            (r, c)
        } else {
            return None;
        };
        Some((r * w + c) as usize)
    }

    /// Index of the octagon at `(r, c)`
    pub fn octagon_index(&self, r: i64, c: i64) -> Option<usize> {
        self.rc_to_cell(r, c)
    }

    /// Index of the square south-east of octagon `(r, c)`
    pub fn square_index(&self, r: i64, c: i64) -> Option<usize> {
        self.rc_to_cell(r, c).map(|cell| self.octagons() + cell)
    }

    pub fn is_square(&self, index: usize) -> bool {
        index >= self.octagons()
    }

    fn cell_rc(&self, index: usize) -> (i64, i64) {
        let cell = index % self.octagons();
        ((cell / self.width) as i64, (cell % self.width) as i64)
    }
}

impl Tiling for OctaGrid {
    fn kind(&self) -> GridKind {
        GridKind::Octagonal
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
        2 * self.octagons()
    }

    fn directions(&self) -> &[Direction] {
        &DIRECTIONS
    }

    fn opposite(&self, direction: Direction) -> Direction {
        match direction {
            E | NE | N | NW => direction << 4,
            W | SW | S | SE => direction >> 4,
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
        log::trace!("octagonal grid: cell {} made empty", index);
        self.empty.insert(index);
    }

    fn polygon_at(&self, index: usize) -> &RegularPolygonTile {
        check_index(index, self.total());
        if self.is_square(index) {
            &self.square
        } else {
            &self.octagon
        }
    }

    fn tile_types_at(&self, index: usize) -> &TileTypes {
        check_index(index, self.total());
        if self.is_square(index) {
            &self.square_types
        } else {
            &self.octagon_types
        }
    }

    fn index_to_xy(&self, index: usize) -> (f64, f64) {
        check_index(index, self.total());
        let (r, c) = self.cell_rc(index);
        if self.is_square(index) {
            (c as f64 + 0.5, r as f64 + 0.5)
        } else {
            (c as f64, r as f64)
        }
    }

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit {
        let c0 = x.round() as i64;
        let r0 = y.round() as i64;
        let (index, x0, y0) = if self.octagon.is_inside(x - c0 as f64, r0 as f64 - y) {
            (self.octagon_index(r0, c0), c0 as f64, r0 as f64)
        } else {
            // one of the four corner squares around the octagon
            let r = if y < r0 as f64 { r0 - 1 } else { r0 };
            let c = if x < c0 as f64 { c0 - 1 } else { c0 };
            (self.square_index(r, c), c as f64 + 0.5, r as f64 + 0.5)
        };
        TileHit {
            index: index.filter(|&index| !self.empty.contains(index)),
            x: x0,
            y: y0,
        }
    }

    fn find_neighbour(&self, index: usize, direction: Direction) -> Neighbour {
        check_index(index, self.total());
        let (r, c) = self.cell_rc(index);
        let neighbour = if self.is_square(index) {
            match direction {
                NE => self.octagon_index(r, c + 1),
                NW => self.octagon_index(r, c),
                SW => self.octagon_index(r + 1, c),
                SE => self.octagon_index(r + 1, c + 1),
                E | N | W | S => return Neighbour::NONE,
                _ => invalid_direction(self.kind(), direction),
            }
        } else {
            match direction {
                E => self.octagon_index(r, c + 1),
                W => self.octagon_index(r, c - 1),
                N => self.octagon_index(r - 1, c),
                S => self.octagon_index(r + 1, c),
                SE => self.square_index(r, c),
                SW => self.square_index(r, c - 1),
                NE => self.square_index(r - 1, c),
                NW => self.square_index(r - 1, c - 1),
                _ => invalid_direction(self.kind(), direction),
            }
        };
        match neighbour {
            Some(neighbour) => Neighbour::at(neighbour, self.empty.contains(neighbour)),
            None => Neighbour::NONE,
        }
    }

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile> {
        let Some((xmin, xmax, ymin, ymax)) = clip_view(view, &self.extents, 1.0) else {
            return Vec::new();
        };
        let mut visible = Vec::new();
        let mut push = |index: Option<usize>, x: f64, y: f64| {
            if let Some(index) = index.filter(|&index| !self.empty.contains(index)) {
                visible.push(VisibleTile {
                    index,
                    x,
                    y,
                    key: tile_key(x, y),
                });
            }
        };
        for r in (ymin.ceil() as i64)..=(ymax.floor() as i64) {
            for c in (xmin.ceil() as i64)..=(xmax.floor() as i64) {
                push(self.octagon_index(r, c), c as f64, r as f64);
            }
        }
        for r in ((ymin - 0.5).ceil() as i64)..=((ymax - 0.5).floor() as i64) {
            for c in ((xmin - 0.5).ceil() as i64)..=((xmax - 0.5).floor() as i64) {
                push(self.square_index(r, c), c as f64 + 0.5, r as f64 + 0.5);
            }
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octagon_padding_holes() {
        let grid = OctaGrid::new(3, 3, false, &[]);
        assert_eq!(grid.total(), 18);
        assert_eq!(grid.empty_cells().sorted(), vec![11, 14, 15, 16, 17]);
        assert!(OctaGrid::new(3, 3, true, &[]).empty_cells().is_empty());
    }

    #[test]
    fn test_octagon_neighbours() {
        let grid = OctaGrid::new(3, 3, false, &[]);
        assert_eq!(grid.find_neighbour(0, E), Neighbour::at(1, false));
        assert_eq!(grid.find_neighbour(0, SE), Neighbour::at(9, false));
        assert_eq!(grid.find_neighbour(4, NE), Neighbour::at(10, false));
        assert_eq!(grid.find_neighbour(4, NW), Neighbour::at(9, false));
        assert_eq!(grid.find_neighbour(4, SW), Neighbour::at(12, false));
        assert_eq!(grid.find_neighbour(9, SE), Neighbour::at(4, false));
        assert_eq!(grid.find_neighbour(9, NE), Neighbour::at(1, false));
        assert_eq!(grid.find_neighbour(9, NW), Neighbour::at(0, false));
        assert_eq!(grid.find_neighbour(9, SW), Neighbour::at(3, false));
        assert_eq!(grid.find_neighbour(0, NE), Neighbour::NONE);
        assert_eq!(grid.find_neighbour(13, SE), Neighbour::at(8, false));
        // padding square
        assert_eq!(grid.find_neighbour(4, SE), Neighbour::at(13, false));
        assert_eq!(grid.find_neighbour(5, SE), Neighbour::at(14, true));
    }

    #[test]
    fn test_octagon_wrap() {
        let grid = OctaGrid::new(3, 3, true, &[]);
        assert_eq!(grid.find_neighbour(0, NW), Neighbour::at(17, false));
        assert_eq!(grid.find_neighbour(0, W), Neighbour::at(2, false));
        assert_eq!(grid.find_neighbour(17, SE), Neighbour::at(0, false));
    }

    #[test]
    fn test_octagon_square_shapes() {
        let grid = OctaGrid::new(2, 2, true, &[]);
        assert_eq!(grid.fully_connected(0), 255);
        assert_eq!(grid.fully_connected(4), 170);
        assert_eq!(grid.rotate(NE, 1, 4), SE);
        assert_eq!(grid.rotate(E, 2, 0), S);
    }

    #[test]
    fn test_octagon_which_tile_at() {
        let grid = OctaGrid::new(3, 3, false, &[]);
        assert_eq!(grid.which_tile_at(1.1, 0.9).index, Some(4));
        let hit = grid.which_tile_at(0.5, 0.5);
        assert_eq!(hit.index, Some(9));
        assert_eq!((hit.x, hit.y), (0.5, 0.5));
        // square at the corner of the last column is padding
        assert_eq!(grid.which_tile_at(2.5, 0.5).index, None);
    }
}
