// Reachability estimation: how much of the free board stays connected to
// the goal once a candidate path is committed as snake body
//
// A path that is individually best may still trap the snake. The estimator
// marks the path's intermediate cells as walls in a scratch copy of the
// occupancy, flood-fills from the goal and reports the fraction of free
// cells still reachable. O(cells) per invocation, run once per planning
// attempt.

use crate::grid::Grid;
use crate::types::Coord;

/// Result of one flood-fill measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachabilityEstimate {
    /// Free cells connected to the goal
    pub reached: usize,
    /// Free cells overall, path cells excluded
    pub free: usize,
    /// reached / free, in 0.0..=1.0
    pub fraction: f32,
}

/// Flood-fill worker with caller-owned scratch buffers.
///
/// The wall mask, visited mask and traversal stack are allocated once, sized
/// by cell count, and reused across estimates. The fill is an explicit-stack
/// traversal; grid size never translates into call-stack depth.
pub struct ReachabilityEstimator {
    walls: Vec<bool>,
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl ReachabilityEstimator {
    pub fn new(cell_count: usize) -> Self {
        ReachabilityEstimator {
            walls: vec![false; cell_count],
            visited: vec![false; cell_count],
            stack: Vec::with_capacity(cell_count),
        }
    }

    /// Measures the reachable fraction after hypothetically committing
    /// `path` (in goal-to-start order, endpoints inclusive) as snake body.
    /// Intermediate path cells become walls in the scratch occupancy; the
    /// start cell stays free because the snake vacates it, and the goal cell
    /// stays free because the fill begins there.
    pub fn estimate(&mut self, grid: &Grid, path: &[Coord], goal: Coord) -> ReachabilityEstimate {
        debug_assert_eq!(self.walls.len(), grid.cell_count());

        for (index, node) in grid.nodes().iter().enumerate() {
            self.walls[index] = node.is_wall;
            self.visited[index] = false;
        }

        if path.len() > 2 {
            for cell in &path[1..path.len() - 1] {
                self.walls[grid.index(cell.x, cell.y)] = true;
            }
        }

        let wall_count = self.walls.iter().filter(|w| **w).count();
        let free = grid.cell_count() - wall_count;

        let mut reached = 0;
        self.stack.clear();
        self.stack.push(grid.index(goal.x, goal.y));

        while let Some(index) = self.stack.pop() {
            if self.visited[index] {
                continue;
            }
            self.visited[index] = true;

            if self.walls[index] {
                continue;
            }
            reached += 1;

            let node = grid.node(index);
            for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                let (x, y) = (node.x + dx, node.y + dy);
                if !grid.in_bounds(x, y) {
                    continue;
                }
                let neighbor = grid.index(x, y);
                if !self.visited[neighbor] {
                    self.stack.push(neighbor);
                }
            }
        }

        let fraction = if free == 0 {
            0.0
        } else {
            reached as f32 / free as f32
        };

        ReachabilityEstimate { reached, free, fraction }
    }
}
