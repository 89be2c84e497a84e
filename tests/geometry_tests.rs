//! Geometry tests - point location, viewport queries, render helpers and pointer predicates

use std::collections::HashSet;

use tessera::core::{Grid, Tiling};
use tessera::types::{square, EdgeMark, GridKind, PointerOrigin, ViewBox};

const SIZES: [(usize, usize); 3] = [(3, 3), (4, 4), (4, 3)];

fn close(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
}

/// A screen point inside the cell: its anchor moved to the unit shape centre
fn interior(grid: &Grid, index: usize) -> (f64, f64) {
    let (x, y) = grid.index_to_xy(index);
    let (dx, dy) = grid.tile_transform(index).polygon_to_screen(0.0, 0.0);
    (x + dx, y + dy)
}

// ============== Point Location Tests ==============

#[test]
fn test_which_tile_at_round_trip_all_grids() {
    for kind in GridKind::ALL {
        for wrap in [false, true] {
            for (w, h) in SIZES {
                let grid = Grid::new(kind, w, h, wrap, &[]);
                for index in 0..grid.total() {
                    let (x, y) = interior(&grid, index);
                    let expected = (!grid.is_empty(index)).then_some(index);
                    assert_eq!(
                        grid.which_tile_at(x, y).index,
                        expected,
                        "{} {}x{} wrap={} cell {}",
                        kind.as_str(),
                        w,
                        h,
                        wrap,
                        index
                    );
                }
            }
        }
    }
}

#[test]
fn test_hit_anchor_is_cell_anchor() {
    for kind in GridKind::ALL {
        let grid = Grid::new(kind, 4, 3, false, &[]);
        for index in grid.cells() {
            let (x, y) = interior(&grid, index);
            let hit = grid.which_tile_at(x, y);
            assert!(close((hit.x, hit.y), grid.index_to_xy(index)));
        }
    }
}

#[test]
fn test_which_tile_at_never_returns_hole() {
    for kind in GridKind::ALL {
        let mut grid = Grid::new(kind, 3, 3, false, &[]);
        grid.make_empty(1);
        let extents = grid.extents();
        let steps = 40;
        for i in 0..=steps {
            for j in 0..=steps {
                let x = extents.xmin + extents.width() * i as f64 / steps as f64;
                let y = extents.ymin + extents.height() * j as f64 / steps as f64;
                if let Some(index) = grid.which_tile_at(x, y).index {
                    assert!(!grid.is_empty(index), "{} hit hole {}", kind.as_str(), index);
                }
            }
        }
    }
}

#[test]
fn test_off_board_points() {
    let grid = Grid::new(GridKind::Square, 3, 3, false, &[]);
    assert_eq!(grid.which_tile_at(-3.0, -3.0).index, None);
    let wrapped = Grid::new(GridKind::Square, 3, 3, true, &[]);
    let hit = wrapped.which_tile_at(-1.1, 3.2);
    assert_eq!(hit.index, Some(2));
    assert_eq!((hit.x, hit.y), (-1.0, 3.0));
}

// ============== Viewport Tests ==============

#[test]
fn test_visible_whole_board_lists_each_cell_once() {
    for kind in GridKind::ALL {
        for (w, h) in SIZES {
            let grid = Grid::new(kind, w, h, false, &[]);
            let e = grid.extents();
            let visible = grid.visible_tiles(&ViewBox::new(e.xmin, e.ymin, e.width(), e.height()));
            let indices: Vec<usize> = visible.iter().map(|t| t.index).collect();
            let unique: HashSet<usize> = indices.iter().copied().collect();
            assert_eq!(unique.len(), indices.len(), "{} lists a cell twice", kind.as_str());
            let expected: HashSet<usize> = grid.cells().collect();
            assert_eq!(unique, expected, "{} {}x{}", kind.as_str(), w, h);
            for tile in &visible {
                assert!(close((tile.x, tile.y), grid.index_to_xy(tile.index)));
            }
        }
    }
}

#[test]
fn test_visible_far_away_is_empty() {
    for kind in GridKind::ALL {
        let grid = Grid::new(kind, 3, 3, false, &[]);
        assert!(grid.visible_tiles(&ViewBox::new(100.0, 100.0, 2.0, 2.0)).is_empty());
    }
}

#[test]
fn test_visible_wrap_copies_have_own_keys() {
    let grid = Grid::new(GridKind::Square, 3, 3, true, &[]);
    let visible = grid.visible_tiles(&ViewBox::new(-1.5, -1.5, 1.0, 1.0));
    let copy = visible
        .iter()
        .find(|t| t.x == -1.0 && t.y == -1.0)
        .expect("wrapped copy of the last cell");
    assert_eq!(copy.index, 8);
    assert_eq!(copy.key, "-10_-10");
    let keys: HashSet<&str> = visible.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys.len(), visible.len());
}

#[test]
fn test_extents_contain_every_anchor() {
    for kind in GridKind::ALL {
        for wrap in [false, true] {
            let grid = Grid::new(kind, 4, 3, wrap, &[]);
            let extents = grid.extents();
            for index in grid.cells() {
                let (x, y) = grid.index_to_xy(index);
                assert!(extents.contains(x, y), "{} cell {}", kind.as_str(), index);
            }
        }
    }
}

// ============== Render Helper Tests ==============

#[test]
fn test_square_render_paths() {
    let grid = Grid::new(GridKind::Square, 2, 2, false, &[]);
    assert_eq!(grid.tile_path(0), "M 0.5 -0.5 L -0.5 -0.5 L -0.5 0.5 L 0.5 0.5 z");
    assert_eq!(
        grid.pipes_path(square::E | square::N, 0),
        "M 0 0 L 0.5 0 M 0 0 L 0 -0.5"
    );
    assert_eq!(grid.pipes_path(0, 0), "");

    let (x, y) = grid.guide_dot_position(square::N | square::W, 0);
    assert!(close((x, y), (0.0, -0.35)));

    let [a, b] = grid.edgemark_line(square::N, 0);
    assert!(close(a, (0.5, -0.5)));
    assert!(close(b, (-0.5, -0.5)));
}

#[test]
fn test_every_shape_has_closed_contour() {
    for kind in GridKind::ALL {
        let grid = Grid::new(kind, 2, 2, true, &[]);
        for index in 0..grid.total() {
            let path = grid.tile_path(index);
            assert!(path.starts_with("M ") && path.ends_with(" z"));
            assert_eq!(path.matches(" L ").count(), grid.polygon_at(index).sides() - 1);
        }
    }
}

// ============== Pointer Tests ==============

#[test]
fn test_which_edge_near_each_side() {
    for kind in GridKind::ALL {
        let grid = Grid::new(kind, 3, 3, true, &[]);
        for index in 0..grid.total() {
            let polygon = grid.polygon_at(index);
            let transform = grid.tile_transform(index);
            let (tile_x, tile_y) = grid.index_to_xy(index);
            for (side, &direction) in polygon.directions().iter().enumerate() {
                let a = polygon.side_angle(side);
                let r = 0.95 * polygon.radius_in();
                let (dx, dy) = transform.polygon_to_screen(r * a.cos(), r * a.sin());
                let hit = grid.which_edge(&PointerOrigin {
                    x: tile_x + dx,
                    y: tile_y + dy,
                    tile_index: index,
                    tile_x,
                    tile_y,
                });
                assert_eq!(hit.direction, direction, "{} cell {}", kind.as_str(), index);
                assert!(hit.is_close);
            }
        }
    }
}

#[test]
fn test_which_edge_far_from_edges() {
    let grid = Grid::new(GridKind::Square, 3, 3, false, &[]);
    let hit = grid.which_edge(&PointerOrigin {
        x: 1.1,
        y: 1.0,
        tile_index: 4,
        tile_x: 1.0,
        tile_y: 1.0,
    });
    assert_eq!(hit.direction, square::E);
    assert!(!hit.is_close);
}

#[test]
fn test_edgemark_gestures_on_square() {
    let grid = Grid::new(GridKind::Square, 3, 3, false, &[]);
    // drag down along the east side
    let wall = grid.detect_edgemark_gesture(4, 1.0, 1.0, 1.45, 1.45, 0.7, 1.3).unwrap();
    assert_eq!(wall.mark, EdgeMark::Wall);
    assert_eq!(wall.direction, square::E);
    // drag out through the east side
    let conn = grid.detect_edgemark_gesture(4, 1.0, 1.0, 1.3, 1.7, 1.05, 1.05).unwrap();
    assert_eq!(conn.mark, EdgeMark::Conn);
    assert_eq!(conn.direction, square::E);
    // too short, then diagonal
    assert!(grid.detect_edgemark_gesture(4, 1.0, 1.0, 1.45, 1.46, 1.0, 1.0).is_none());
    assert!(grid.detect_edgemark_gesture(4, 1.0, 1.0, 1.2, 1.8, 0.7, 1.3).is_none());
}

#[test]
fn test_click_orient_points_guide_arm_at_pointer() {
    let grid = Grid::new(GridKind::Square, 3, 3, false, &[]);
    let below = PointerOrigin {
        x: 1.0,
        y: 1.4,
        tile_index: 4,
        tile_x: 1.0,
        tile_y: 1.0,
    };
    let rotations = grid.click_orient_tile(square::E, 0, &below);
    assert_eq!(rotations, 1);
    assert_eq!(grid.rotate(square::E, rotations, 4), square::S);
    // already facing the pointer: nothing to do
    assert_eq!(grid.click_orient_tile(square::S, 0, &below), 0);
    // picks the rotation nearest the current one
    assert_eq!(grid.click_orient_tile(square::E, 4, &below), 5);
}
