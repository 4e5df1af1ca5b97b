//! A* pathfinding over the directional passage grid.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use defender_core::enums::Direction;
use defender_core::types::GridPos;

use crate::grid::Grid;

/// Shortest path from `start` to `goal`, exclusive of `start` and
/// inclusive of `goal`. Empty when `start == goal` or no path exists.
///
/// Edges cost 1 and exist only where the departure cell's direction set
/// is open, so one-way passages are traversed in their permitted
/// direction only. The frontier is ordered by f-score with FIFO
/// insertion order as the deterministic tie-break.
pub fn find_path(start: GridPos, goal: GridPos, grid: &Grid) -> Vec<GridPos> {
    if start == goal || !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return Vec::new();
    }

    // (f-score, insertion sequence) in a min-heap.
    let mut open: BinaryHeap<Reverse<(u32, u64, GridPos)>> = BinaryHeap::new();
    let mut came_from: HashMap<GridPos, GridPos> = HashMap::new();
    let mut g_score: HashMap<GridPos, u32> = HashMap::new();
    let mut seq: u64 = 0;

    g_score.insert(start, 0);
    open.push(Reverse((start.manhattan(goal), seq, start)));

    while let Some(Reverse((_, _, current))) = open.pop() {
        if current == goal {
            return reconstruct(&came_from, start, goal);
        }
        let current_g = g_score[&current];

        for dir in Direction::ALL {
            if !grid.is_open(current, dir) {
                continue;
            }
            let neighbor = current.neighbor(dir);
            let tentative = current_g + 1;
            if tentative < g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                seq += 1;
                open.push(Reverse((tentative + neighbor.manhattan(goal), seq, neighbor)));
            }
        }
    }

    Vec::new()
}

/// Walk the predecessor map back from the goal.
fn reconstruct(came_from: &HashMap<GridPos, GridPos>, start: GridPos, goal: GridPos) -> Vec<GridPos> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
