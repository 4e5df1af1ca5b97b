//! Wall geometry derived from the passage grid.
//!
//! A closed wall exists on an internal edge only when NEITHER adjacent
//! cell opens toward the other. Edges open in exactly one direction get
//! a one-way marker instead, which the renderer draws as a chevron.

use defender_core::constants::{TILE_SIZE, WALL_THICKNESS};
use defender_core::enums::{Direction, WallOrientation};
use defender_core::types::{GridPos, OneWayWall, Rect};

use crate::grid::Grid;

/// Rectangles for the outer boundary and every fully closed internal edge.
pub fn wall_rects(grid: &Grid) -> Vec<Rect> {
    let w = grid.width() as f64 * TILE_SIZE;
    let h = grid.height() as f64 * TILE_SIZE;
    let t = WALL_THICKNESS;

    let mut walls = vec![
        Rect::new(0.0, 0.0, w, t),
        Rect::new(0.0, h - t, w, t),
        Rect::new(0.0, 0.0, t, h),
        Rect::new(w - t, 0.0, t, h),
    ];

    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 - 1 {
            let west = GridPos::new(x, y);
            let east = west.neighbor(Direction::East);
            if !grid.cell(west).is_open(Direction::East)
                && !grid.cell(east).is_open(Direction::West)
            {
                walls.push(Rect::new(
                    (x + 1) as f64 * TILE_SIZE - t / 2.0,
                    y as f64 * TILE_SIZE,
                    t,
                    TILE_SIZE,
                ));
            }
        }
    }
    for y in 0..grid.height() as i32 - 1 {
        for x in 0..grid.width() as i32 {
            let north = GridPos::new(x, y);
            let south = north.neighbor(Direction::South);
            if !grid.cell(north).is_open(Direction::South)
                && !grid.cell(south).is_open(Direction::North)
            {
                walls.push(Rect::new(
                    x as f64 * TILE_SIZE,
                    (y + 1) as f64 * TILE_SIZE - t / 2.0,
                    TILE_SIZE,
                    t,
                ));
            }
        }
    }

    walls
}

/// Markers for internal edges open in exactly one direction.
pub fn one_way_walls(grid: &Grid) -> Vec<OneWayWall> {
    let mut markers = Vec::new();

    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 - 1 {
            let west = GridPos::new(x, y);
            let east = west.neighbor(Direction::East);
            let eastward = grid.cell(west).is_open(Direction::East);
            let westward = grid.cell(east).is_open(Direction::West);
            if eastward != westward {
                markers.push(OneWayWall {
                    orientation: WallOrientation::Vertical,
                    cell: west,
                    open_toward: if eastward {
                        Direction::East
                    } else {
                        Direction::West
                    },
                });
            }
        }
    }
    for y in 0..grid.height() as i32 - 1 {
        for x in 0..grid.width() as i32 {
            let north = GridPos::new(x, y);
            let south = north.neighbor(Direction::South);
            let southward = grid.cell(north).is_open(Direction::South);
            let northward = grid.cell(south).is_open(Direction::North);
            if southward != northward {
                markers.push(OneWayWall {
                    orientation: WallOrientation::Horizontal,
                    cell: north,
                    open_toward: if southward {
                        Direction::South
                    } else {
                        Direction::North
                    },
                });
            }
        }
    }

    markers
}
