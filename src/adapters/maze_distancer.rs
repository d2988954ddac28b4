//! Precomputed maze distances over a [`Layout`].

use std::collections::VecDeque;

use crate::{adapters::grid_arena::Layout, ports::Distancer, types::{Move, Position}};

/// All-pairs shortest path lengths between open cells, computed once by
/// breadth-first search from every open cell.
#[derive(Debug, Clone)]
pub struct MazeDistancer {
    width: usize,
    height: usize,
    /// `distances[from][to]`, flattened cell indices
    distances: Vec<Vec<u32>>,
}

impl MazeDistancer {
    /// Distance reported for walls, out-of-bounds cells and disconnected
    /// regions.
    pub const UNREACHABLE: u32 = 100_000;

    /// Run a breadth-first search from every open cell of `layout`.
    pub fn new(layout: &Layout) -> Self {
        let width = layout.width() as usize;
        let height = layout.height() as usize;
        let cells = width * height;
        let mut distances = vec![Vec::new(); cells];

        for source in layout.open_cells() {
            let mut row = vec![Self::UNREACHABLE; cells];
            let mut queue = VecDeque::from([source]);
            row[Self::flat(width, source)] = 0;

            while let Some(cell) = queue.pop_front() {
                let next_distance = row[Self::flat(width, cell)] + 1;
                for mv in [Move::North, Move::East, Move::South, Move::West] {
                    let neighbour = cell.step(mv);
                    if !layout.is_open(neighbour) {
                        continue;
                    }
                    let slot = &mut row[Self::flat(width, neighbour)];
                    if *slot == Self::UNREACHABLE {
                        *slot = next_distance;
                        queue.push_back(neighbour);
                    }
                }
            }

            distances[Self::flat(width, source)] = row;
        }

        Self {
            width,
            height,
            distances,
        }
    }

    fn flat(width: usize, position: Position) -> usize {
        position.y as usize * width + position.x as usize
    }

    fn lookup(&self, position: Position) -> Option<usize> {
        let in_bounds = (0..self.width as i32).contains(&position.x)
            && (0..self.height as i32).contains(&position.y);
        in_bounds.then(|| Self::flat(self.width, position))
    }
}

impl Distancer for MazeDistancer {
    fn distance(&self, from: Position, to: Position) -> u32 {
        match (self.lookup(from), self.lookup(to)) {
            (Some(a), Some(b)) => self.distances[a].get(b).copied().unwrap_or(Self::UNREACHABLE),
            _ => Self::UNREACHABLE,
        }
    }
}
