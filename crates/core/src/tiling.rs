//! The contract every tiling fulfils
//!
//! A tiling answers three questions about a board:
//!
//! - which cell lies in a given direction from a cell ([`Tiling::find_neighbour`])
//! - how a tile state changes under rotation ([`Tiling::rotate`])
//! - which cell owns a screen position, and which cells a viewport shows
//!   ([`Tiling::which_tile_at`], [`Tiling::visible_tiles`])
//!
//! Implementors provide the topology and geometry. Everything that only
//! depends on the unit shape of a cell (rotation, typing, render outputs,
//! pointer predicates) is derived here from [`Tiling::polygon_at`] and
//! [`Tiling::tile_transform`].
//!
//! Lookups are total over valid input: a missing neighbour is a value
//! ([`Neighbour::NONE`]), never an error. An index outside `0..total()` or a
//! direction the tiling does not have is a caller bug and panics.

use arrayvec::ArrayVec;
use hashbrown::HashSet;

use crate::polygon::RegularPolygonTile;
use crate::tile_types::TileTypes;
use crate::transform::TileTransform;
use crate::types::{
    Direction, EdgeGesture, EdgeHit, Extents, GridKind, Neighbour, PointerOrigin, TileHit,
    TileState, ViewBox, VisibleTile,
};

/// Cells permanently excluded from a board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptyCells {
    cells: HashSet<usize>,
}

impl EmptyCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from raw tile states: every `0` state is a hole
    pub fn from_tiles(tiles: &[TileState]) -> Self {
        let cells = tiles
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile == 0)
            .map(|(index, _)| index)
            .collect();
        Self { cells }
    }

    pub fn insert(&mut self, index: usize) -> bool {
        self.cells.insert(index)
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Holes in ascending order
    pub fn sorted(&self) -> Vec<usize> {
        let mut cells: Vec<usize> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }
}

pub trait Tiling {
    fn kind(&self) -> GridKind;

    /// Board width as given at construction
    fn width(&self) -> usize;

    /// Board height as given at construction
    fn height(&self) -> usize;

    fn wrap(&self) -> bool;

    /// Number of cell indices, holes included
    fn total(&self) -> usize;

    /// Every direction used by the tiling
    fn directions(&self) -> &[Direction];

    fn opposite(&self, direction: Direction) -> Direction;

    /// Directions whose edge marks a cell draws itself, one per opposite pair
    fn edgemark_directions(&self) -> &[Direction];

    fn extents(&self) -> Extents;

    fn empty_cells(&self) -> &EmptyCells;

    /// Turn a cell into a hole (setup only)
    fn make_empty(&mut self, index: usize);

    /// Unit shape of a cell
    fn polygon_at(&self, index: usize) -> &RegularPolygonTile;

    /// Rotation classes of a cell's unit shape
    fn tile_types_at(&self, index: usize) -> &TileTypes;

    /// Affine placement of the unit shape relative to the cell anchor
    fn tile_transform(&self, _index: usize) -> TileTransform {
        TileTransform::IDENTITY
    }

    /// Drawing anchor of a cell
    fn index_to_xy(&self, index: usize) -> (f64, f64);

    fn which_tile_at(&self, x: f64, y: f64) -> TileHit;

    fn find_neighbour(&self, index: usize, direction: Direction) -> Neighbour;

    fn visible_tiles(&self, view: &ViewBox) -> Vec<VisibleTile>;

    fn is_empty(&self, index: usize) -> bool {
        self.empty_cells().contains(index)
    }

    fn fully_connected(&self, index: usize) -> TileState {
        self.polygon_at(index).fully_connected()
    }

    fn rotate(&self, state: TileState, rotations: i32, index: usize) -> TileState {
        self.polygon_at(index).rotate(state, rotations)
    }

    fn get_directions(
        &self,
        state: TileState,
        rotations: i32,
        index: usize,
    ) -> ArrayVec<Direction, 8> {
        self.polygon_at(index).get_directions(state, rotations)
    }

    /// Canonical representative of the rotation class of `state`
    fn tile_type(&self, state: TileState, index: usize) -> TileState {
        self.tile_types_at(index).canonical(state)
    }

    fn angle(&self, rotations: i32, index: usize) -> f64 {
        self.polygon_at(index).angle(rotations)
    }

    fn tile_path(&self, index: usize) -> String {
        self.polygon_at(index).contour_path()
    }

    fn pipes_path(&self, state: TileState, index: usize) -> String {
        self.polygon_at(index).pipes_path(state)
    }

    fn guide_dot_position(&self, state: TileState, index: usize) -> (f64, f64) {
        self.polygon_at(index).guide_dot_position(state)
    }

    fn edgemark_line(&self, direction: Direction, index: usize) -> [(f64, f64); 2] {
        self.polygon_at(index).edgemark_line(direction)
    }

    /// Side of the pointer's tile nearest to the pointer
    fn which_edge(&self, pointer: &PointerOrigin) -> EdgeHit {
        let (x, y) = self.tile_transform(pointer.tile_index).polygon_coords(
            pointer.tile_x,
            pointer.tile_y,
            pointer.x,
            pointer.y,
        );
        self.polygon_at(pointer.tile_index).is_close_to_edge(x, y)
    }

    /// Recognise a drag over a tile as an edge mark
    #[allow(clippy::too_many_arguments)]
    fn detect_edgemark_gesture(
        &self,
        index: usize,
        tile_x: f64,
        tile_y: f64,
        x1: f64,
        x2: f64,
        y1: f64,
        y2: f64,
    ) -> Option<EdgeGesture> {
        let (px1, px2, py1, py2) = self
            .tile_transform(index)
            .polygon_gesture_coords(tile_x, tile_y, x1, x2, y1, y2);
        self.polygon_at(index)
            .detect_edgemark_gesture(px1, px2, py1, py2)
    }

    /// Rotations that point the tile's guide arm at the pointer
    fn click_orient_tile(
        &self,
        state: TileState,
        old_rotations: i32,
        pointer: &PointerOrigin,
    ) -> i32 {
        let (x, y) = self.tile_transform(pointer.tile_index).polygon_coords(
            pointer.tile_x,
            pointer.tile_y,
            pointer.x,
            pointer.y,
        );
        self.polygon_at(pointer.tile_index)
            .click_orient_tile(state, old_rotations, y.atan2(x))
    }
}

/// Panic unless `index` addresses a cell
#[inline]
pub(crate) fn check_index(index: usize, total: usize) {
    assert!(
        index < total,
        "cell index {} out of range 0..{}",
        index,
        total
    );
}

pub(crate) fn invalid_direction(kind: GridKind, direction: Direction) -> ! {
    panic!("invalid direction {} for {} grid", direction, kind.as_str())
}

/// Redraw key for a drawing anchor
pub(crate) fn tile_key(x: f64, y: f64) -> String {
    format!("{}_{}", (10.0 * x).round() as i64, (10.0 * y).round() as i64)
}

/// Viewport grown by `margin`, clipped to the board extents
///
/// Returns `(xmin, xmax, ymin, ymax)`, or `None` when nothing overlaps.
pub(crate) fn clip_view(
    view: &ViewBox,
    extents: &Extents,
    margin: f64,
) -> Option<(f64, f64, f64, f64)> {
    let xmin = (view.xmin - margin).max(extents.xmin);
    let xmax = (view.xmax() + margin).min(extents.xmax);
    let ymin = (view.ymin - margin).max(extents.ymin);
    let ymax = (view.ymax() + margin).min(extents.ymax);
    if xmin > xmax || ymin > ymax {
        None
    } else {
        Some((xmin, xmax, ymin, ymax))
    }
}
