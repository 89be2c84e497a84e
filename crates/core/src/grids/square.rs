//! Square grid
//!
//! Cell `(r, c)` has index `r * width + c` and its centre at `(c, r)`.
//! Wrapping boards are plain tori.

use log::debug;

use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::tiling::{check_index, clip_view, invalid_direction, tile_key, EmptyCells, Tiling};
use crate::types::{
    square::{E, N, S, W},
    Direction, Extents, GridKind, Neighbour, TileHit, TileState, ViewBox, VisibleTile,
};

const DIRECTIONS: [Direction; 4] = [E, N, W, S];
const EDGEMARK_DIRECTIONS: [Direction; 2] = [N, W];

#[derive(Debug, Clone)]
pub struct SquareGrid {
    width: usize,
    height: usize,
    wrap: bool,
    empty: EmptyCells,
    polygon: RegularPolygonTile,
    tile_types: TileTypes,
    extents: Extents,
}

impl SquareGrid {
    pub fn new(width: usize, height: usize, wrap: bool, tiles: &[TileState]) -> Self {
        assert!(width > 0 && height > 0, "empty {}x{} board", width, height);
        let polygon = RegularPolygonTile::new(4, 0.0, 0.5);
        let tile_types = TileTypes::new(&polygon);
        let pad = if wrap { 1.0 } else { 0.0 };
        let extents = Extents {
            xmin: -0.5 - pad,
            xmax: width as f64 - 0.5 + pad,
            ymin: -0.5 - pad,
            ymax: height as f64 - 0.5 + pad,
        };
        let empty = EmptyCells::from_tiles(tiles);
        debug!(
            "square grid {}x{} wrap={} holes={}",
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

    /// Index of an unbounded row/column pair, wrapping if the board wraps
    pub fn rc_to_index(&self, r: i64, c: i64) -> Option<usize> {
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

    /// Row and column of a cell
    pub fn index_to_rc(&self, index: usize) -> (i64, i64) {
        ((index / self.width) as i64, (index % self.width) as i64)
    }

    /// Row/column step for a direction
    fn offset(direction: Direction) -> Option<(i64, i64)> {
        match direction {
            E => Some((0, 1)),
            N => Some((-1, 0)),
            W => Some((0, -1)),
            S => Some((1, 0)),
            _ => None,
        }
    }
}

impl Tiling for SquareGrid {
    fn kind(&self) -> GridKind {
        GridKind::Square
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
        log::trace!("square grid: cell {} made empty", index);
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
        (c as f64, r as f64)
    }

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit {
        let c = x.round() as i64;
        let r = y.round() as i64;
        let index = self
            .rc_to_index(r, c)
            .filter(|&index| !self.empty.contains(index));
        TileHit {
            index,
            x: c as f64,
            y: r as f64,
        }
    }

    fn find_neighbour(&self, index: usize, direction: Direction) -> Neighbour {
        check_index(index, self.total());
        let Some((dr, dc)) = Self::offset(direction) else {
            invalid_direction(self.kind(), direction)
        };
        let (r, c) = self.index_to_rc(index);
        match self.rc_to_index(r + dr, c + dc) {
            Some(neighbour) => Neighbour::at(neighbour, self.empty.contains(neighbour)),
            None => Neighbour::NONE,
        }
    }

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile> {
        let Some((xmin, xmax, ymin, ymax)) = clip_view(view, &self.extents, 1.0) else {
            return Vec::new();
        };
        let mut visible = Vec::new();
        for r in (ymin.ceil() as i64)..=(ymax.floor() as i64) {
            for c in (xmin.ceil() as i64)..=(xmax.floor() as i64) {
                let Some(index) = self.rc_to_index(r, c) else {
                    continue;
                };
                if self.empty.contains(index) {
                    continue;
                }
                let (x, y) = (c as f64, r as f64);
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
