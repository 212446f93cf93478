// Decision loop for the autonomous snake
//
// Per tick the bot snapshots the board into its planning grid, picks a goal
// and policy from the snake's length, and runs the search. Candidate paths
// that would leave too little of the board reachable are rejected and
// planning retries with the next-best frontier offset, up to a bounded
// retry count. All planning buffers are owned here, allocated once and
// reset per attempt.

use std::error::Error;
use std::fmt;

use log::{info, warn};

use crate::config::Config;
use crate::frontier::{CapacityExceeded, FrontierSet, PathPolicy};
use crate::game::Game;
use crate::grid::Grid;
use crate::observer::SearchObserver;
use crate::reachability::ReachabilityEstimator;
use crate::search::{Search, SearchOutcome};
use crate::types::{Coord, Direction};

/// An accepted planning result for one tick.
#[derive(Debug, Clone)]
pub struct Decision {
    pub direction: Direction,
    pub goal: Coord,
    pub policy: PathPolicy,
    /// Frontier offset of the accepted candidate
    pub offset: usize,
    /// Steps from head to goal along the accepted path
    pub path_len: usize,
    pub reachable_fraction: f32,
}

/// Why the bot could not produce a move.
#[derive(Debug)]
pub enum PlanError {
    /// No path exists between the head and the goal under the current body
    /// walls. A game-over condition for the caller, not an engine fault.
    NoPath,
    /// Engine fault; unreachable when buffers are sized to the cell count
    Capacity(CapacityExceeded),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::NoPath => write!(f, "no path exists between the snake and its goal"),
            PlanError::Capacity(e) => write!(f, "search engine fault: {}", e),
        }
    }
}

impl Error for PlanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlanError::NoPath => None,
            PlanError::Capacity(e) => Some(e),
        }
    }
}

impl From<CapacityExceeded> for PlanError {
    fn from(e: CapacityExceeded) -> Self {
        PlanError::Capacity(e)
    }
}

struct Candidate {
    path: Vec<Coord>,
    fraction: f32,
    offset: usize,
}

/// Autonomous snake bot owning the planning buffers
pub struct Bot {
    config: Config,
    grid: Grid,
    open: FrontierSet,
    closed: FrontierSet,
    estimator: ReachabilityEstimator,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration.
    /// Every planning buffer is sized here, once, from the board dimensions.
    pub fn new(config: Config) -> Self {
        let grid = Grid::new(config.board.width, config.board.height);
        let capacity = grid.cell_count();

        Bot {
            config,
            grid,
            open: FrontierSet::with_capacity(capacity),
            closed: FrontierSet::with_capacity(capacity),
            estimator: ReachabilityEstimator::new(capacity),
        }
    }

    /// Computes the next movement direction for the current game state.
    ///
    /// # Returns
    /// * `Ok(Decision)` - the accepted move plus its planning metadata
    /// * `Err(PlanError::NoPath)` - the goal is unreachable; game over
    pub fn next_move(&mut self, game: &Game) -> Result<Decision, PlanError> {
        self.plan(game, None)
    }

    /// Like `next_move`, with a draw sink receiving each finished search.
    pub fn next_move_observed(
        &mut self,
        game: &Game,
        observer: &mut dyn SearchObserver,
    ) -> Result<Decision, PlanError> {
        self.plan(game, Some(observer))
    }

    fn plan(
        &mut self,
        game: &Game,
        mut observer: Option<&mut dyn SearchObserver>,
    ) -> Result<Decision, PlanError> {
        assert!(
            game.width() == self.grid.width() && game.height() == self.grid.height(),
            "game board and planning grid dimensions must match"
        );

        let start = game.snake().head();
        let (goal, policy) = self.choose_goal(game);
        let threshold = self.config.planning.reachable_fraction_threshold;

        let mut best: Option<Candidate> = None;

        for offset in 0..=self.config.planning.max_offset_retries {
            self.apply_walls(game, goal);

            let mut search = Search::new(
                &mut self.grid,
                &mut self.open,
                &mut self.closed,
                start,
                goal,
                policy,
                offset,
            );
            if let Some(obs) = observer.as_deref_mut() {
                search = search.with_observer(obs);
            }

            match search.run()? {
                SearchOutcome::Unsolved => {
                    if offset == 0 {
                        return Err(PlanError::NoPath);
                    }
                    // solvability does not depend on the offset
                    break;
                }
                SearchOutcome::Solved => {
                    let path = search.extract_path();
                    let estimate = self.estimator.estimate(&self.grid, &path, goal);

                    if estimate.fraction >= threshold {
                        info!(
                            "planned {} path to {:?}: {} steps, {:.1}% reachable, offset {}",
                            policy.as_str(),
                            goal,
                            path.len() - 1,
                            estimate.fraction * 100.0,
                            offset
                        );
                        return self.decide(start, goal, policy, offset, &path, estimate.fraction);
                    }

                    info!(
                        "offset {}: path rejected, only {:.1}% of free cells stay reachable",
                        offset,
                        estimate.fraction * 100.0
                    );
                    if best.as_ref().map_or(true, |b| estimate.fraction > b.fraction) {
                        best = Some(Candidate {
                            path,
                            fraction: estimate.fraction,
                            offset,
                        });
                    }
                }
            }
        }

        let candidate = best.ok_or(PlanError::NoPath)?;
        warn!(
            "no candidate met the {:.0}% reachability threshold; falling back to the best at {:.1}% (offset {})",
            threshold * 100.0,
            candidate.fraction * 100.0,
            candidate.offset
        );
        self.decide(
            start,
            goal,
            policy,
            candidate.offset,
            &candidate.path,
            candidate.fraction,
        )
    }

    /// Food is the goal while the snake is short; once long, the bot chases
    /// its own tail on the longest route so it loops through free space
    /// instead of boxing itself in.
    fn choose_goal(&self, game: &Game) -> (Coord, PathPolicy) {
        let head = game.snake().head();

        if game.snake().len() < self.config.planning.tail_goal_length {
            if let Some(food) = game.food().iter().min_by_key(|f| head.manhattan(f)) {
                return (*food, PathPolicy::Shortest);
            }
        }
        (game.snake().tail(), PathPolicy::Longest)
    }

    /// Marks the snake body as walls, except the tail cell: it is frequently
    /// the destination and vacates as the snake advances. While growth is
    /// still pending the tail does not vacate, so it is walled like the rest
    /// of the body, unless it is the goal itself.
    fn apply_walls(&mut self, game: &Game, goal: Coord) {
        self.grid.clear_walls();

        let tail = game.snake().tail();
        let tail_is_open = game.snake().pending_growth() == 0 || tail == goal;
        for seg in game.snake().segments() {
            if *seg != tail || !tail_is_open {
                self.grid.set_wall(*seg);
            }
        }
    }

    /// Turns an accepted path (goal-to-start order) into a `Decision` by
    /// stepping towards the node whose g equals 1.
    fn decide(
        &self,
        start: Coord,
        goal: Coord,
        policy: PathPolicy,
        offset: usize,
        path: &[Coord],
        fraction: f32,
    ) -> Result<Decision, PlanError> {
        if path.len() < 2 {
            return Err(PlanError::NoPath);
        }

        let first_step = path[path.len() - 2];
        let direction = Direction::between(&start, &first_step).ok_or(PlanError::NoPath)?;

        Ok(Decision {
            direction,
            goal,
            policy,
            offset,
            path_len: path.len() - 1,
            reachable_fraction: fraction,
        })
    }
}
