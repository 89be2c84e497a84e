//! Serializable board description
//!
//! [`GridConfig`] is what a saved puzzle or a level file stores about its
//! board. [`GridConfig::build`] validates it and returns the [`Grid`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Grid;
use crate::tiling::Tiling;
use crate::types::{GridKind, TileState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    ZeroSize { width: usize, height: usize },

    #[error("{len} tile states given for a board of {total} cells")]
    TooManyTiles { len: usize, total: usize },

    #[error("unknown grid kind: {0}")]
    UnknownKind(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub kind: GridKind,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub wrap: bool,
    /// Raw tile states; a `0` marks a hole
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiles: Vec<TileState>,
}

impl GridConfig {
    pub fn new(kind: GridKind, width: usize, height: usize, wrap: bool) -> Self {
        Self {
            kind,
            width,
            height,
            wrap,
            tiles: Vec::new(),
        }
    }

    /// Config for a kind given by name, as typed on a command line
    pub fn named(
        name: &str,
        width: usize,
        height: usize,
        wrap: bool,
    ) -> Result<Self, GridConfigError> {
        let kind = GridKind::parse_name(name)
            .ok_or_else(|| GridConfigError::UnknownKind(name.to_string()))?;
        Ok(Self::new(kind, width, height, wrap))
    }

    pub fn with_tiles(mut self, tiles: Vec<TileState>) -> Self {
        self.tiles = tiles;
        self
    }

    /// Validate and construct the board
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::{GridConfig, Tiling};
    ///
    /// let config: GridConfig =
    ///     serde_json::from_str(r#"{"kind": "cube", "width": 3, "height": 3}"#).unwrap();
    /// let grid = config.build().unwrap();
    /// assert_eq!(grid.total(), 27);
    /// ```
    pub fn build(&self) -> Result<Grid, GridConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridConfigError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        let grid = Grid::new(self.kind, self.width, self.height, self.wrap, &self.tiles);
        if self.tiles.len() > grid.total() {
            return Err(GridConfigError::TooManyTiles {
                len: self.tiles.len(),
                total: grid.total(),
            });
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json_defaults() {
        let config: GridConfig =
            serde_json::from_str(r#"{"kind": "hexagonal", "width": 4, "height": 3}"#).unwrap();
        assert_eq!(config, GridConfig::new(GridKind::Hexagonal, 4, 3, false));
        let grid = config.build().unwrap();
        assert_eq!(grid.kind(), GridKind::Hexagonal);
        assert_eq!(grid.total(), 12);
    }

    #[test]
    fn test_config_json_roundtrip_with_tiles() {
        let config = GridConfig::new(GridKind::SnubSquare, 2, 2, true).with_tiles(vec![1, 0, 3]);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""kind":"snubsquare""#));
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(back.build().unwrap().is_empty(1));
    }

    #[test]
    fn test_config_rejects_zero_size() {
        let err = GridConfig::new(GridKind::Square, 0, 3, false).build().unwrap_err();
        assert_eq!(err, GridConfigError::ZeroSize { width: 0, height: 3 });
        assert_eq!(err.to_string(), "board must be at least 1x1, got 0x3");
    }

    #[test]
    fn test_config_rejects_long_tiles() {
        let config = GridConfig::new(GridKind::Square, 2, 2, false).with_tiles(vec![1; 5]);
        assert_eq!(
            config.build().unwrap_err(),
            GridConfigError::TooManyTiles { len: 5, total: 4 }
        );
    }

    #[test]
    fn test_config_snub_tiles_checked_against_scaled_board() {
        let config = GridConfig::new(GridKind::SnubSquare, 6, 6, false);
        assert_eq!(config.clone().with_tiles(vec![1; 72]).build().unwrap().total(), 72);
        assert_eq!(
            config.with_tiles(vec![1; 73]).build().unwrap_err(),
            GridConfigError::TooManyTiles { len: 73, total: 72 }
        );
    }

    #[test]
    fn test_config_unknown_kind() {
        assert_eq!(
            GridConfig::named("penrose", 2, 2, false).unwrap_err(),
            GridConfigError::UnknownKind("penrose".to_string())
        );
        assert_eq!(
            GridConfig::named("Hex", 2, 2, false).unwrap().kind,
            GridKind::Hexagonal
        );
        let json = r#"{"kind":"penrose","width":1,"height":1}"#;
        assert!(serde_json::from_str::<GridConfig>(json).is_err());
    }
}
