//! Runtime-selected tiling
//!
//! [`Grid`] wraps every concrete tiling behind one type so callers can pick
//! the tiling from a [`GridKind`] at runtime and still call the [`Tiling`]
//! operations directly.

use crate::grids::{
    CubeGrid, CubesTiling, EtratGrid, HexaGrid, OctaGrid, SnubSquareGrid, SquareGrid,
};
use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::tiling::{EmptyCells, Tiling};
use crate::transform::TileTransform;
use crate::types::{
    Direction, Extents, GridKind, Neighbour, TileHit, TileState, ViewBox, VisibleTile,
};

#[derive(Debug, Clone)]
pub enum Grid {
    Square(SquareGrid),
    Hexagonal(HexaGrid),
    Octagonal(OctaGrid),
    Cube(CubeGrid),
    Cubes(CubesTiling),
    Etrat(EtratGrid),
    SnubSquare(SnubSquareGrid),
}

/// Forward a call to the wrapped tiling
macro_rules! dispatch {
    ($self:expr, $grid:ident => $call:expr) => {
        match $self {
            Grid::Square($grid) => $call,
            Grid::Hexagonal($grid) => $call,
            Grid::Octagonal($grid) => $call,
            Grid::Cube($grid) => $call,
            Grid::Cubes($grid) => $call,
            Grid::Etrat($grid) => $call,
            Grid::SnubSquare($grid) => $call,
        }
    };
}

impl Grid {
    /// Build a board of the given kind
    ///
    /// `tiles` seeds holes: every `0` entry becomes an empty cell. Panics on
    /// a zero width or height; use [`GridConfig`](crate::GridConfig) for
    /// validated construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::{Grid, Tiling};
    /// use tessera_core::types::{GridKind, Neighbour};
    ///
    /// let grid = Grid::new(GridKind::Square, 3, 3, false, &[]);
    /// assert_eq!(grid.total(), 9);
    /// assert_eq!(grid.find_neighbour(4, 1), Neighbour::at(5, false));
    /// ```
    pub fn new(
        kind: GridKind,
        width: usize,
        height: usize,
        wrap: bool,
        tiles: &[TileState],
    ) -> Self {
        match kind {
            GridKind::Square => Grid::Square(SquareGrid::new(width, height, wrap, tiles)),
            GridKind::Hexagonal => Grid::Hexagonal(HexaGrid::new(width, height, wrap, tiles)),
            GridKind::Octagonal => Grid::Octagonal(OctaGrid::new(width, height, wrap, tiles)),
            GridKind::Cube => Grid::Cube(CubeGrid::new(width, height, wrap, tiles)),
            GridKind::Cubes => Grid::Cubes(CubesTiling::new(width, height, wrap, tiles)),
            GridKind::Etrat => Grid::Etrat(EtratGrid::new(width, height, wrap, tiles)),
            GridKind::SnubSquare => {
                Grid::SnubSquare(SnubSquareGrid::new(width, height, wrap, tiles))
            }
        }
    }

    /// Number of cells each base cell is split into
    ///
    /// Etrat and snub-square boards resize their base grid, so for them
    /// `total()` is not always `width * height * units()`.
    pub fn units(&self) -> usize {
        match self {
            Grid::Square(_) | Grid::Hexagonal(_) => 1,
            Grid::Octagonal(_) => 2,
            Grid::Cube(_) | Grid::Cubes(_) | Grid::Etrat(_) => 3,
            Grid::SnubSquare(_) => 6,
        }
    }

    /// Indices of all cells that are not holes
    pub fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.total()).filter(move |&index| !self.is_empty(index))
    }
}

impl Tiling for Grid {
    fn kind(&self) -> GridKind {
        dispatch!(self, grid => grid.kind())
    }

    fn width(&self) -> usize {
        dispatch!(self, grid => grid.width())
    }

    fn height(&self) -> usize {
        dispatch!(self, grid => grid.height())
    }

    fn wrap(&self) -> bool {
        dispatch!(self, grid => grid.wrap())
    }

    fn total(&self) -> usize {
        dispatch!(self, grid => grid.total())
    }

    fn directions(&self) -> &[Direction] {
        dispatch!(self, grid => grid.directions())
    }

    fn opposite(&self, direction: Direction) -> Direction {
        dispatch!(self, grid => grid.opposite(direction))
    }

    fn edgemark_directions(&self) -> &[Direction] {
        dispatch!(self, grid => grid.edgemark_directions())
    }

    fn extents(&self) -> Extents {
        dispatch!(self, grid => grid.extents())
    }

    fn empty_cells(&self) -> &EmptyCells {
        dispatch!(self, grid => grid.empty_cells())
    }

    fn make_empty(&mut self, index: usize) {
        dispatch!(self, grid => grid.make_empty(index))
    }

    fn polygon_at(&self, index: usize) -> &RegularPolygonTile {
        dispatch!(self, grid => grid.polygon_at(index))
    }

    fn tile_types_at(&self, index: usize) -> &TileTypes {
        dispatch!(self, grid => grid.tile_types_at(index))
    }

    fn tile_transform(&self, index: usize) -> TileTransform {
        dispatch!(self, grid => grid.tile_transform(index))
    }

    fn index_to_xy(&self, index: usize) -> (f64, f64) {
        dispatch!(self, grid => grid.index_to_xy(index))
    }

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit {
        dispatch!(self, grid => grid.which_tile_at(x, y))
    }

    fn find_neighbour(&self, index: usize, direction: Direction) -> Neighbour {
        dispatch!(self, grid => grid.find_neighbour(index, direction))
    }

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile> {
        dispatch!(self, grid => grid.visible_tiles(view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new_matches_kind() {
        for kind in GridKind::ALL {
            let grid = Grid::new(kind, 3, 2, true, &[]);
            assert_eq!(grid.kind(), kind);
            assert_eq!((grid.width(), grid.height()), (3, 2));
            assert!(grid.wrap());
            if kind != GridKind::SnubSquare {
                assert_eq!(grid.total(), 3 * 2 * grid.units());
            }
        }
    }

    #[test]
    fn test_grid_snub_total_uses_scaled_base() {
        let grid = Grid::new(GridKind::SnubSquare, 6, 6, false, &[]);
        assert_eq!(grid.total(), 2 * 2 * grid.units());
        assert_eq!(grid.empty_cells().sorted(), vec![17]);
    }

    #[test]
    fn test_grid_make_empty_dispatches() {
        let mut grid = Grid::new(GridKind::Hexagonal, 3, 3, false, &[]);
        grid.make_empty(4);
        assert_eq!(grid.find_neighbour(3, 1), Neighbour::at(4, true));
        assert_eq!(grid.cells().count(), 8);
        assert!(!grid.cells().any(|index| index == 4));
    }

    #[test]
    fn test_grid_transform_only_on_rhombs() {
        for kind in GridKind::ALL {
            let grid = Grid::new(kind, 2, 2, false, &[]);
            let identity = grid.tile_transform(0).is_identity();
            assert_eq!(identity, !matches!(kind, GridKind::Cube | GridKind::Cubes));
        }
    }
}
