//! The directional passage grid and its carving algorithms.

use rand::seq::SliceRandom;
use rand::Rng;

use defender_core::constants::ONE_WAY_PROB;
use defender_core::enums::Direction;
use defender_core::types::GridPos;

/// One maze cell: a bitmask of open traversal directions.
/// Openings are per-cell, so a passage may exist in one direction only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell(u8);

impl Cell {
    pub fn is_open(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn open(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    /// Number of open directions.
    pub fn exits(&self) -> u32 {
        self.0.count_ones()
    }
}

/// Row-major grid of cells with directional passages.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid with all passages closed.
    pub fn closed(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: GridPos) -> usize {
        (pos.y as u32 * self.width + pos.x as u32) as usize
    }

    pub fn cell(&self, pos: GridPos) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Whether travel from `pos` in `dir` is permitted. Checks only the
    /// departure cell's opening — one-way passages are directional.
    pub fn is_open(&self, pos: GridPos, dir: Direction) -> bool {
        self.in_bounds(pos) && self.cell(pos).is_open(dir) && self.in_bounds(pos.neighbor(dir))
    }

    /// Open a passage from `pos` outward only.
    pub fn open_one_way(&mut self, pos: GridPos, dir: Direction) {
        let idx = self.index(pos);
        self.cells[idx].open(dir);
    }

    /// Open a passage in both directions between `pos` and its neighbor.
    pub fn open_two_way(&mut self, pos: GridPos, dir: Direction) {
        self.open_one_way(pos, dir);
        let neighbor = pos.neighbor(dir);
        let idx = self.index(neighbor);
        self.cells[idx].open(dir.opposite());
    }

    /// All cells, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| GridPos::new(x, y)))
    }

    /// Randomized depth-first carving from a random start cell.
    ///
    /// Opens bidirectional passages along a random spanning tree, so every
    /// cell is reachable and, at this stage, exactly one simple path exists
    /// between any two cells.
    pub fn carve<R: Rng>(&mut self, rng: &mut R) {
        let start = GridPos::new(
            rng.gen_range(0..self.width as i32),
            rng.gen_range(0..self.height as i32),
        );

        let mut visited = vec![false; self.cells.len()];
        visited[self.index(start)] = true;
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let candidates: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&dir| {
                    let n = current.neighbor(dir);
                    self.in_bounds(n) && !visited[self.index(n)]
                })
                .collect();

            match candidates.choose(rng) {
                Some(&dir) => {
                    self.open_two_way(current, dir);
                    let next = current.neighbor(dir);
                    visited[self.index(next)] = true;
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Cells with exactly one open direction.
    pub fn dead_ends(&self) -> Vec<GridPos> {
        self.positions()
            .filter(|&pos| self.cell(pos).exits() == 1)
            .collect()
    }

    /// Give dead-end cells a second exit where possible.
    ///
    /// Each dead end gains one new connection toward a random in-bounds
    /// neighbor it is not already open to: with probability
    /// [`ONE_WAY_PROB`] the new passage is one-way outward, otherwise
    /// two-way. Repeats until the dead-end set is empty or stops changing
    /// (the explicit fixed-point check bounds the loop).
    pub fn reduce_dead_ends<R: Rng>(&mut self, rng: &mut R) {
        let mut previous: Vec<GridPos> = Vec::new();
        loop {
            let dead_ends = self.dead_ends();
            if dead_ends.is_empty() || dead_ends == previous {
                break;
            }
            previous = dead_ends.clone();

            for pos in dead_ends {
                let closed: Vec<Direction> = Direction::ALL
                    .into_iter()
                    .filter(|&dir| {
                        self.in_bounds(pos.neighbor(dir)) && !self.cell(pos).is_open(dir)
                    })
                    .collect();
                if let Some(&dir) = closed.choose(rng) {
                    if rng.gen_bool(ONE_WAY_PROB) {
                        self.open_one_way(pos, dir);
                    } else {
                        self.open_two_way(pos, dir);
                    }
                }
            }
        }
    }
}
