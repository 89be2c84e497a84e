//! Shared types - plain data passed between grids, renderers and solvers
//!
//! Everything here is pure data. The geometry engines live in `tessera-core`;
//! this crate only fixes the vocabulary they speak.
//!
//! # Directions and tile states
//!
//! A direction is a single bit. A tile state is a bitmask over the
//! directions of its unit shape: bit `d` set means a pipe arm leaves the tile
//! through the side facing `d`. Every tiling lists its directions in
//! counter-clockwise order starting from east (or from the first side of the
//! unit shape).
//!
//! | Tiling | Direction bits | Units per base cell |
//! |--------|----------------|---------------------|
//! | `square` | E=1 N=2 W=4 S=8 | 1 |
//! | `hexagonal` | E=1 NE=2 NW=4 W=8 SW=16 SE=32 | 1 |
//! | `octagonal` | E=1 NE=2 N=4 NW=8 W=16 SW=32 S=64 SE=128 | 2 (octagon + square) |
//! | `cube` / `cubes` | 1 2 4 8 (rhomb sides) | 3 |
//! | `etrat` | E=1 N=2 W=4 S=8 | 3 |
//! | `snubsquare` | E=1 N=2 W=4 S=8 | 6 |
//!
//! # Examples
//!
//! ```
//! use tessera_types::{hex, GridKind, Neighbour};
//!
//! let kind = GridKind::parse_name("Hexagonal").unwrap();
//! assert_eq!(kind, GridKind::Hexagonal);
//! assert_eq!(kind.as_str(), "hexagonal");
//!
//! assert_eq!(hex::ALL.len(), 6);
//! assert!(Neighbour::NONE.neighbour.is_none());
//! assert!(Neighbour::NONE.empty);
//! ```

use serde::{Deserialize, Serialize};

/// One direction bit
pub type Direction = u8;

/// Bitmask of pipe arms over a unit shape's directions
pub type TileState = u8;

/// Square tiling directions (also used by etrat and snub-square units)
pub mod square {
    use super::Direction;

    pub const E: Direction = 1;
    pub const N: Direction = 2;
    pub const W: Direction = 4;
    pub const S: Direction = 8;

    /// Counter-clockwise from east
    pub const ALL: [Direction; 4] = [E, N, W, S];
}

/// Hexagon tiling directions (pointy-top cells)
pub mod hex {
    use super::Direction;

    pub const E: Direction = 1;
    pub const NE: Direction = 2;
    pub const NW: Direction = 4;
    pub const W: Direction = 8;
    pub const SW: Direction = 16;
    pub const SE: Direction = 32;

    /// Counter-clockwise from east
    pub const ALL: [Direction; 6] = [E, NE, NW, W, SW, SE];
}

/// Octagon tiling directions; the small squares use the four diagonals
pub mod octagon {
    use super::Direction;

    pub const E: Direction = 1;
    pub const NE: Direction = 2;
    pub const N: Direction = 4;
    pub const NW: Direction = 8;
    pub const W: Direction = 16;
    pub const SW: Direction = 32;
    pub const S: Direction = 64;
    pub const SE: Direction = 128;

    /// Counter-clockwise from east
    pub const ALL: [Direction; 8] = [E, NE, N, NW, W, SW, S, SE];

    /// Sides of the small squares between octagons
    pub const DIAGONALS: [Direction; 4] = [NE, NW, SW, SE];
}

/// Rhomb side labels for the cube tilings
pub mod rhomb {
    use super::Direction;

    /// Counter-clockwise around a rhomb, starting from its first side
    pub const ALL: [Direction; 4] = [1, 2, 4, 8];
}

/// The closed set of supported tilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridKind {
    Square,
    Hexagonal,
    Octagonal,
    /// Hexagons split into three rhombs each
    Cube,
    /// The rhomb tiling addressed by row, column and rhomb
    Cubes,
    /// Elongated triangular: rows of squares between rows of triangles
    Etrat,
    SnubSquare,
}

impl GridKind {
    /// Parse grid kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_types::GridKind;
    ///
    /// assert_eq!(GridKind::parse_name("square"), Some(GridKind::Square));
    /// assert_eq!(GridKind::parse_name("HEX"), Some(GridKind::Hexagonal));
    /// assert_eq!(GridKind::parse_name("snub-square"), Some(GridKind::SnubSquare));
    /// assert_eq!(GridKind::parse_name("unknown"), None);
    /// ```
    pub fn parse_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" => Some(GridKind::Square),
            "hexagonal" | "hex" => Some(GridKind::Hexagonal),
            "octagonal" | "octagon" => Some(GridKind::Octagonal),
            "cube" => Some(GridKind::Cube),
            "cubes" => Some(GridKind::Cubes),
            "etrat" => Some(GridKind::Etrat),
            "snubsquare" | "snub-square" | "snub" => Some(GridKind::SnubSquare),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GridKind::Square => "square",
            GridKind::Hexagonal => "hexagonal",
            GridKind::Octagonal => "octagonal",
            GridKind::Cube => "cube",
            GridKind::Cubes => "cubes",
            GridKind::Etrat => "etrat",
            GridKind::SnubSquare => "snubsquare",
        }
    }

    /// Every supported kind, in declaration order
    pub const ALL: [GridKind; 7] = [
        GridKind::Square,
        GridKind::Hexagonal,
        GridKind::Octagonal,
        GridKind::Cube,
        GridKind::Cubes,
        GridKind::Etrat,
        GridKind::SnubSquare,
    ];
}

/// Result of a neighbour lookup
///
/// `neighbour` is `None` when the step leaves a non-wrapping board or the
/// target cannot exist. `empty` is true whenever there is nothing to connect
/// to: no neighbour, or a neighbour that is a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbour {
    pub neighbour: Option<usize>,
    pub empty: bool,
}

impl Neighbour {
    /// No neighbour at all
    pub const NONE: Neighbour = Neighbour {
        neighbour: None,
        empty: true,
    };

    /// An existing cell together with its emptiness
    pub fn at(index: usize, empty: bool) -> Self {
        Neighbour {
            neighbour: Some(index),
            empty,
        }
    }
}

/// Result of point location: the owning cell and its drawing anchor
///
/// With wrapping boards the anchor is the unwrapped position nearest to the
/// query point, so it may lie outside the board rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileHit {
    pub index: Option<usize>,
    pub x: f64,
    pub y: f64,
}

/// Viewport rectangle in world coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub xmin: f64,
    pub ymin: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(xmin: f64, ymin: f64, width: f64, height: f64) -> Self {
        ViewBox {
            xmin,
            ymin,
            width,
            height,
        }
    }

    pub fn xmax(&self) -> f64 {
        self.xmin + self.width
    }

    pub fn ymax(&self) -> f64 {
        self.ymin + self.height
    }

    /// Same box with x scaled by `factor_x` and y by `factor_y`
    pub fn scaled(&self, factor_x: f64, factor_y: f64) -> Self {
        ViewBox {
            xmin: self.xmin * factor_x,
            ymin: self.ymin * factor_y,
            width: self.width * factor_x,
            height: self.height * factor_y,
        }
    }
}

/// A cell to draw: its index, anchor and a key stable across redraws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleTile {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub key: String,
}

/// Bounding box of everything drawable on a board
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extents {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Extents {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// Where a pointer went down: world position plus the tile it landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerOrigin {
    pub x: f64,
    pub y: f64,
    pub tile_index: usize,
    pub tile_x: f64,
    pub tile_y: f64,
}

/// Which side of a tile a point is nearest to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeHit {
    pub direction: Direction,
    /// True when the point is within grabbing distance of that side
    pub is_close: bool,
}

/// Kind of mark a player can put on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMark {
    /// "No pipe crosses here", drawn by dragging along the edge
    Wall,
    /// "A pipe crosses here", drawn by dragging across the edge
    Conn,
}

impl EdgeMark {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeMark::Wall => "wall",
            EdgeMark::Conn => "conn",
        }
    }
}

/// A recognised edge-mark drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeGesture {
    pub mark: EdgeMark,
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tables_are_single_bits() {
        for d in square::ALL
            .iter()
            .chain(hex::ALL.iter())
            .chain(octagon::ALL.iter())
            .chain(rhomb::ALL.iter())
        {
            assert_eq!(d.count_ones(), 1, "direction {} is not a single bit", d);
        }
        assert!(octagon::DIAGONALS.iter().all(|d| octagon::ALL.contains(d)));
    }

    #[test]
    fn test_grid_kind_str_roundtrip() {
        for kind in GridKind::ALL {
            assert_eq!(GridKind::parse_name(kind.as_str()), Some(kind));
            assert_eq!(GridKind::parse_name(&kind.as_str().to_uppercase()), Some(kind));
        }
        assert_eq!(GridKind::parse_name("octagon"), Some(GridKind::Octagonal));
        assert_eq!(GridKind::parse_name("snub"), Some(GridKind::SnubSquare));
        assert_eq!(GridKind::parse_name(""), None);
    }

    #[test]
    fn test_viewbox_bounds() {
        let view = ViewBox::new(-1.0, 2.0, 4.0, 3.0);
        assert_eq!(view.xmax(), 3.0);
        assert_eq!(view.ymax(), 5.0);
        let scaled = view.scaled(2.0, 0.5);
        assert_eq!(scaled, ViewBox::new(-2.0, 1.0, 8.0, 1.5));
    }

    #[test]
    fn test_neighbour_constructors() {
        assert_eq!(
            Neighbour::at(3, false),
            Neighbour {
                neighbour: Some(3),
                empty: false
            }
        );
        assert_eq!(Neighbour::NONE.neighbour, None);
    }
}
