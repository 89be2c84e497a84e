//! Tessellation grids for tile-rotation puzzles - pure, deterministic, and testable
//!
//! Each grid answers the questions a pipe-connection puzzle asks of its
//! board: neighbour topology (including toroidal wrap), how a tile's
//! connection bitmask changes when it is rotated, which cell lies under a
//! screen point, and which cells a viewport shows. No I/O, no rendering: the
//! render helpers return SVG path strings and plain coordinates.
//!
//! # Module Structure
//!
//! - [`polygon`]: regular polygon unit shapes, rotation and pointer geometry
//! - [`tile_types`]: canonical tile state per rotation class
//! - [`transform`]: affine placement of sheared unit shapes (rhombs)
//! - [`tiling`]: the [`Tiling`] trait shared by every grid
//! - [`grids`]: square, hexagonal, octagonal, cube, cubes, etrat and snub-square grids
//! - [`grid`]: [`Grid`], every tiling behind one runtime-selected type
//! - [`config`]: serializable [`GridConfig`] with validation
//!
//! # Coordinates
//!
//! Screen coordinates have y growing downwards, with one cell edge as the
//! unit length. Polygon-local coordinates have y growing upwards; angles are
//! counter-clockwise in polygon space, and positive rotation counts are
//! clockwise on screen.
//!
//! # Example
//!
//! ```
//! use tessera_core::{Grid, Tiling};
//! use tessera_core::types::{hex, GridKind, Neighbour};
//!
//! // 3x3 hexagonal board with a hole in the middle
//! let mut grid = Grid::new(GridKind::Hexagonal, 3, 3, false, &[]);
//! grid.make_empty(4);
//!
//! assert_eq!(grid.find_neighbour(3, hex::E), Neighbour::at(4, true));
//! assert_eq!(grid.find_neighbour(3, hex::NE), Neighbour::at(1, false));
//! assert_eq!(grid.find_neighbour(3, hex::W), Neighbour::NONE);
//!
//! // a single arm pointing east, turned one step clockwise, points south-east
//! assert_eq!(grid.rotate(hex::E, 1, 0), hex::SE);
//! ```

pub mod config;
pub mod grid;
pub mod grids;
pub mod polygon;
pub mod tile_types;
pub mod tiling;
pub mod transform;

pub use tessera_types as types;

pub use config::{GridConfig, GridConfigError};
pub use grid::Grid;
pub use grids::{CubeGrid, CubesTiling, EtratGrid, HexaGrid, OctaGrid, SnubSquareGrid, SquareGrid};
pub use polygon::RegularPolygonTile;
pub use tile_types::TileTypes;
pub use tiling::{EmptyCells, Tiling};
pub use transform::TileTransform;
