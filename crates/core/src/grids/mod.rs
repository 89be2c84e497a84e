//! Concrete tilings
//!
//! Three primitive grids ([`SquareGrid`], [`HexaGrid`], [`OctaGrid`]) and four
//! composites that split every base cell into a fixed number of units:
//!
//! | Grid | Base | Units per base cell |
//! |------|------|---------------------|
//! | [`CubeGrid`] | hexagon | 3 rhombs |
//! | [`CubesTiling`] | own rows of hexagon-shaped triples | 3 rhombs |
//! | [`EtratGrid`] | hexagon | up triangle, square, down triangle |
//! | [`SnubSquareGrid`] | square | 2 squares, 4 triangles |
//!
//! A composite index is `base_index * units + unit`. Neighbour lookups go
//! through a fixed table of [`UnitStep`]s indexed by unit and direction
//! slot: either another unit of the same base cell, or a unit of the base
//! neighbour in some base direction.

pub mod cube;
pub mod cubes;
pub mod etrat;
pub mod hexagon;
pub mod octagon;
pub mod snub_square;
pub mod square;

pub use cube::CubeGrid;
pub use cubes::CubesTiling;
pub use etrat::EtratGrid;
pub use hexagon::HexaGrid;
pub use octagon::OctaGrid;
pub use snub_square::SnubSquareGrid;
pub use square::SquareGrid;

use crate::polygon::RegularPolygonTile;
use crate::tiling::{EmptyCells, Tiling};
use crate::types::{Direction, Neighbour};

/// One entry of a composite adjacency table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitStep {
    /// Another unit of the same base cell
    Local(usize),
    /// A unit of the base cell one step away in a base direction
    Across(Direction, usize),
    /// The unit has no side facing this direction
    Missing,
}

/// Table slot of a four-direction composite direction (bits 1, 2, 4, 8)
pub(crate) fn slot(direction: Direction) -> Option<usize> {
    match direction {
        1 => Some(0),
        2 => Some(1),
        4 => Some(2),
        8 => Some(3),
        _ => None,
    }
}

/// Resolve a table entry against the base tiling
///
/// A missing or empty base neighbour ends the lookup: there is nothing on
/// the other side. Otherwise emptiness comes from the composite's own holes.
pub(crate) fn resolve_step<B: Tiling>(
    base: &B,
    empty: &EmptyCells,
    units: usize,
    base_index: usize,
    step: UnitStep,
) -> Neighbour {
    let neighbour = match step {
        UnitStep::Local(unit) => base_index * units + unit,
        UnitStep::Across(direction, unit) => match base.find_neighbour(base_index, direction) {
            Neighbour {
                neighbour: Some(next),
                empty: false,
            } => next * units + unit,
            _ => return Neighbour::NONE,
        },
        UnitStep::Missing => return Neighbour::NONE,
    };
    Neighbour::at(neighbour, empty.contains(neighbour))
}

/// Bounding box of shapes centred at screen offsets, as `(xmin, xmax, ymin, ymax)`
pub(crate) fn shapes_bounds<'a>(
    shapes: impl IntoIterator<Item = (&'a RegularPolygonTile, (f64, f64))>,
) -> (f64, f64, f64, f64) {
    let mut bounds = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
    for (polygon, (ox, oy)) in shapes {
        for (vx, vy) in polygon.screen_vertices() {
            bounds.0 = bounds.0.min(ox + vx);
            bounds.1 = bounds.1.max(ox + vx);
            bounds.2 = bounds.2.min(oy + vy);
            bounds.3 = bounds.3.max(oy + vy);
        }
    }
    bounds
}
