//! Canonical tile types
//!
//! Two tile states are the same type when one is a rotation of the other.
//! The table maps every state of a unit shape to the representative of its
//! rotation class: scanning states in ascending order, each state not yet
//! assigned starts a rotation chain, and every state on the chain is
//! assigned that starting state. The representative is therefore the
//! smallest state of the class.

use hashbrown::HashMap;

use crate::polygon::RegularPolygonTile;
use crate::types::TileState;

/// Rotation classes of one unit shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTypes {
    canonical: HashMap<TileState, TileState>,
    types: Vec<TileState>,
}

impl TileTypes {
    /// Build the table for a shape
    pub fn new(polygon: &RegularPolygonTile) -> Self {
        let full = polygon.fully_connected();
        let mut canonical = HashMap::new();
        let mut types = Vec::new();

        for state in 0..=full {
            if state & !full != 0 || canonical.contains_key(&state) {
                continue;
            }
            types.push(state);
            let mut rotated = state;
            while !canonical.contains_key(&rotated) {
                canonical.insert(rotated, state);
                rotated = polygon.rotate(rotated, 1);
            }
        }

        Self { canonical, types }
    }

    /// Representative of the rotation class of `state`
    ///
    /// # Panics
    ///
    /// When `state` has bits outside the shape's directions.
    pub fn canonical(&self, state: TileState) -> TileState {
        match self.canonical.get(&state) {
            Some(&t) => t,
            None => panic!("state {} is not a state of this tile shape", state),
        }
    }

    /// All representatives, ascending
    pub fn types(&self) -> &[TileState] {
        &self.types
    }

    /// Number of raw states covered
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_types() {
        let table = TileTypes::new(&RegularPolygonTile::new(4, 0.0, 0.5));
        assert_eq!(table.len(), 16);
        // empty, deadend, turn, straight, T, cross
        assert_eq!(table.types(), &[0, 1, 3, 5, 7, 15]);
        assert_eq!(table.canonical(8), 1);
        assert_eq!(table.canonical(12), 3);
        assert_eq!(table.canonical(10), 5);
        assert_eq!(table.canonical(13), 7);
    }

    #[test]
    fn test_hexagon_types() {
        let table = TileTypes::new(&RegularPolygonTile::new(6, 0.0, 0.5));
        assert_eq!(table.len(), 64);
        // necklaces of 6 binary beads under rotation
        assert_eq!(table.types().len(), 14);
        assert_eq!(table.canonical(32), 1);
        assert_eq!(table.canonical(1 | 32), 3);
        assert_eq!(table.canonical(8 | 1), 9);
    }

    #[test]
    fn test_custom_directions() {
        let square = RegularPolygonTile::with_directions(4, 0.785, 0.2, &[2, 8, 32, 128]);
        let table = TileTypes::new(&square);
        assert_eq!(table.len(), 16);
        assert_eq!(table.canonical(128), 2);
        assert_eq!(table.canonical(2 | 32), 34);
    }

    #[test]
    #[should_panic]
    fn test_foreign_state_panics() {
        let table = TileTypes::new(&RegularPolygonTile::new(3, 0.0, 0.3));
        table.canonical(8);
    }
}
