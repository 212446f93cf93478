// A* search engine with pluggable goal policies
//
// The loop pops the frontier node the policy ranks best, expands its four
// neighbors in a fixed order and relaxes their scores until the goal is
// selected or the frontier drains. Everything runs to completion within one
// call; there is no cancellation and no timeout.

use log::{debug, trace};

use crate::frontier::{CapacityExceeded, FrontierSet, PathPolicy};
use crate::grid::Grid;
use crate::observer::SearchObserver;
use crate::types::Coord;

/// Terminal outcome of a search. `Unsolved` means no path exists under the
/// current walls; it is a normal result, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved,
    Unsolved,
}

/// Neighbor expansion order: north, east, south, west. The fixed order is a
/// deliberate, acknowledged search-order bias.
const NEIGHBOR_ORDER: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// One planning attempt's worth of search state: the grid, both frontier
/// sets, the endpoints and an optional draw sink. Built fresh from current
/// game state for every attempt; the underlying buffers are caller-owned and
/// merely reset here.
pub struct Search<'a> {
    grid: &'a mut Grid,
    open: &'a mut FrontierSet,
    closed: &'a mut FrontierSet,
    start: Coord,
    goal: Coord,
    policy: PathPolicy,
    offset: usize,
    observer: Option<&'a mut dyn SearchObserver>,
}

impl<'a> Search<'a> {
    /// Prepares a search: zeroes scores, recomputes the heuristic towards
    /// `goal` and empties both frontier sets. Wall flags on the grid are left
    /// as the caller applied them.
    ///
    /// Panics if either endpoint lies outside the grid; in-bounds endpoints
    /// are a caller contract.
    pub fn new(
        grid: &'a mut Grid,
        open: &'a mut FrontierSet,
        closed: &'a mut FrontierSet,
        start: Coord,
        goal: Coord,
        policy: PathPolicy,
        offset: usize,
    ) -> Self {
        assert!(
            grid.in_bounds(start.x, start.y) && grid.in_bounds(goal.x, goal.y),
            "search endpoints must lie inside the grid"
        );

        grid.reset(goal);
        open.clear();
        closed.clear();

        Search {
            grid,
            open,
            closed,
            start,
            goal,
            policy,
            offset,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn SearchObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Runs the search to a terminal state.
    ///
    /// On `Solved` the goal node retains its parent chain for extraction.
    /// The observer, when set, is notified once after the terminal state is
    /// reached, never mid-iteration.
    pub fn run(&mut self) -> Result<SearchOutcome, CapacityExceeded> {
        let start_index = self.grid.index(self.start.x, self.start.y);

        {
            let node = self.grid.node_mut(start_index);
            node.g = 0;
            node.f = node.h;
        }
        self.open.push(start_index)?;

        loop {
            let position = match self.open.select(self.grid, self.policy, self.offset) {
                Some(position) => position,
                None => {
                    debug!("frontier exhausted, no path from {:?} to {:?}", self.start, self.goal);
                    self.present(None);
                    return Ok(SearchOutcome::Unsolved);
                }
            };

            let current = self.open.entry(position);
            trace!(
                "current: {} x {}",
                self.grid.node(current).x,
                self.grid.node(current).y
            );

            if self.grid.node(current).coord() == self.goal {
                debug!("reached goal node at g={}", self.grid.node(current).g);
                self.present(Some(current));
                return Ok(SearchOutcome::Solved);
            }

            self.open.remove_at(position);
            self.closed.push(current)?;

            let (cx, cy) = (self.grid.node(current).x, self.grid.node(current).y);
            for (dx, dy) in NEIGHBOR_ORDER {
                self.relax_neighbor(current, cx + dx, cy + dy)?;
            }
        }
    }

    /// Considers moving through `current` into the neighbor at (x, y),
    /// skipping cells that are outside the grid, walls, or already fully
    /// expanded. The cost comparison direction depends on the policy: the
    /// longest-path family prefers the higher f, which is what makes it
    /// actually lengthen routes instead of merely popping them last.
    fn relax_neighbor(&mut self, current: usize, x: i32, y: i32) -> Result<(), CapacityExceeded> {
        if !self.grid.in_bounds(x, y) {
            return Ok(());
        }

        let neighbor = self.grid.index(x, y);
        if self.grid.node(neighbor).is_wall {
            return Ok(());
        }
        if self.closed.contains(neighbor) {
            return Ok(());
        }

        let g = self.grid.node(current).g + 1;
        let f = g + self.grid.node(neighbor).h;

        let seen = self.grid.node(neighbor).parent.is_some();
        let improves = match self.policy {
            PathPolicy::Shortest => f < self.grid.node(neighbor).f,
            PathPolicy::Longest => f > self.grid.node(neighbor).f,
        };

        if !seen || improves {
            let node = self.grid.node_mut(neighbor);
            node.parent = Some(current);
            node.g = g;
            node.f = f;
            if !self.open.contains(neighbor) {
                self.open.push(neighbor)?;
            }
        }

        Ok(())
    }

    /// Walks the parent back-links from the solved goal node to the start,
    /// inclusive, producing the path in goal-to-start order. Each node's `g`
    /// equals its 1-based distance from the start, so callers can also
    /// reconstruct step order by index. Must be called before the next
    /// attempt resets the grid.
    pub fn extract_path(&self) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut cursor = Some(self.grid.index(self.goal.x, self.goal.y));

        while let Some(index) = cursor {
            let node = self.grid.node(index);
            path.push(node.coord());
            cursor = node.parent;
        }

        path
    }

    /// Reports the finished search to the observer: open and closed cells,
    /// walls, the path when one was found, then the frame hook. A single
    /// variant check here keeps null-observer handling out of the algorithm.
    fn present(&mut self, goal_node: Option<usize>) {
        let observer = match self.observer.as_deref_mut() {
            Some(observer) => observer,
            None => return,
        };

        for index in self.open.iter() {
            let node = self.grid.node(index);
            observer.on_open_cell(node.x, node.y);
        }
        for index in self.closed.iter() {
            let node = self.grid.node(index);
            observer.on_closed_cell(node.x, node.y);
        }
        for node in self.grid.nodes() {
            if node.is_wall {
                observer.on_wall_cell(node.x, node.y);
            }
        }

        if let Some(goal_node) = goal_node {
            let mut cursor = Some(goal_node);
            while let Some(index) = cursor {
                let node = self.grid.node(index);
                observer.on_path_cell(node.x, node.y);
                cursor = node.parent;
            }
        }
        observer.on_path_cell(self.start.x, self.start.y);
        observer.on_path_cell(self.goal.x, self.goal.y);

        observer.on_frame_presented();
    }
}
