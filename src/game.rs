// Snake and food bookkeeping for the autonomous game
//
// Movement wraps at the board edges, so only self-collision ends a run. The
// snake grows by one segment per tick until the growth owed by eaten food is
// paid off, mirroring how the target and committed lengths diverge in play.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Coord, Direction};

/// Outcome of advancing the game by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Died,
}

/// The snake body, head first.
pub struct Snake {
    body: VecDeque<Coord>,
    /// Segments owed by eaten food but not yet materialized
    pending_growth: u32,
}

impl Snake {
    fn new(head: Coord) -> Self {
        let mut body = VecDeque::new();
        body.push_front(head);
        Snake { body, pending_growth: 0 }
    }

    fn from_body(segments: &[Coord]) -> Self {
        assert!(!segments.is_empty(), "snake body must have at least one segment");
        Snake {
            body: segments.iter().copied().collect(),
            pending_growth: 0,
        }
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    pub fn tail(&self) -> Coord {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Iterates segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Coord> {
        self.body.iter()
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    fn feed(&mut self, amount: u32) {
        self.pending_growth += amount;
    }

    /// True when the tail cell frees up on the next advance.
    fn tail_vacates(&self) -> bool {
        self.pending_growth == 0
    }

    fn advance(&mut self, to: Coord) {
        self.body.push_front(to);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }
    }
}

/// Complete game state: board, snake, food and score.
pub struct Game {
    width: i32,
    height: i32,
    snake: Snake,
    food: Vec<Coord>,
    score: u32,
    grow_factor: u32,
    rng: StdRng,
}

impl Game {
    /// Creates a game with the snake at the board center and `food_count`
    /// items placed on random free cells.
    pub fn new(width: i32, height: i32, food_count: usize, grow_factor: u32) -> Self {
        Self::build(width, height, food_count, grow_factor, StdRng::from_os_rng())
    }

    /// Like `new` but with a deterministic RNG, for reproducible runs.
    pub fn with_seed(
        width: i32,
        height: i32,
        food_count: usize,
        grow_factor: u32,
        seed: u64,
    ) -> Self {
        Self::build(width, height, food_count, grow_factor, StdRng::seed_from_u64(seed))
    }

    /// Builds a game from an explicit snake body (head first) and food
    /// layout. Scenario constructor for tests and replays.
    pub fn from_parts(
        width: i32,
        height: i32,
        body: &[Coord],
        food: Vec<Coord>,
        grow_factor: u32,
        seed: u64,
    ) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Game {
            width,
            height,
            snake: Snake::from_body(body),
            food,
            score: 0,
            grow_factor,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn build(width: i32, height: i32, food_count: usize, grow_factor: u32, rng: StdRng) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");

        let head = Coord::new(width / 2, height / 2);
        let mut game = Game {
            width,
            height,
            snake: Snake::new(head),
            food: Vec::with_capacity(food_count),
            score: 0,
            grow_factor,
            rng,
        };
        for _ in 0..food_count {
            if let Some(cell) = game.random_free_cell() {
                game.food.push(cell);
            }
        }
        game
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &[Coord] {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Moves the snake one cell in `direction`, wrapping at the edges.
    /// Eating food adds the grow factor to the owed growth and respawns that
    /// item on a free cell. Hitting the body ends the game; the tail cell is
    /// exempt when it vacates this very tick.
    pub fn step(&mut self, direction: Direction) -> TickOutcome {
        let head = self.snake.head();
        let next = self.wrap(direction.apply(&head));

        let eaten = self.food.iter().position(|f| *f == next);
        if eaten.is_some() {
            self.snake.feed(self.grow_factor);
            self.score += 1;
        }

        let tail_vacates = self.snake.tail_vacates();
        let last = self.snake.len() - 1;
        let collides = self
            .snake
            .segments()
            .enumerate()
            .any(|(i, seg)| *seg == next && !(tail_vacates && i == last));
        if collides {
            return TickOutcome::Died;
        }

        self.snake.advance(next);

        if let Some(slot) = eaten {
            self.respawn_food(slot);
            return TickOutcome::Ate;
        }
        TickOutcome::Moved
    }

    fn wrap(&self, coord: Coord) -> Coord {
        Coord {
            x: coord.x.rem_euclid(self.width),
            y: coord.y.rem_euclid(self.height),
        }
    }

    fn is_occupied(&self, cell: &Coord) -> bool {
        self.snake.segments().any(|seg| seg == cell) || self.food.contains(cell)
    }

    fn respawn_food(&mut self, slot: usize) {
        match self.random_free_cell() {
            Some(cell) => self.food[slot] = cell,
            // board effectively full; the item is simply gone
            None => {
                self.food.remove(slot);
            }
        }
    }

    fn random_free_cell(&mut self) -> Option<Coord> {
        let free_count = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Coord::new(x, y)))
            .filter(|c| !self.is_occupied(c))
            .count();
        if free_count == 0 {
            return None;
        }

        let pick = self.rng.random_range(0..free_count);
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Coord::new(x, y)))
            .filter(|c| !self.is_occupied(c))
            .nth(pick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_wraps_at_edges() {
        let mut game = Game::from_parts(3, 3, &[Coord::new(0, 0)], vec![], 1, 7);

        assert_eq!(game.step(Direction::West), TickOutcome::Moved);
        assert_eq!(game.snake().head(), Coord::new(2, 0));

        assert_eq!(game.step(Direction::North), TickOutcome::Moved);
        assert_eq!(game.snake().head(), Coord::new(2, 2));
    }

    #[test]
    fn test_growth_is_paid_one_segment_per_tick() {
        let food = vec![Coord::new(1, 0)];
        let mut game = Game::from_parts(5, 5, &[Coord::new(0, 0)], food, 2, 7);

        assert_eq!(game.step(Direction::East), TickOutcome::Ate);
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.snake().pending_growth(), 1);

        assert_eq!(game.step(Direction::East), TickOutcome::Moved);
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.snake().pending_growth(), 0);

        assert_eq!(game.step(Direction::East), TickOutcome::Moved);
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_moving_onto_vacating_tail_is_legal() {
        // Snake coiled in a 2x2 block; stepping onto the tail cell is fine
        // because it frees up this tick.
        let body = [
            Coord::new(1, 0),
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 1),
        ];
        let mut game = Game::from_parts(4, 4, &body, vec![], 1, 7);

        assert_eq!(game.step(Direction::South), TickOutcome::Moved);
        assert_eq!(game.snake().head(), Coord::new(1, 1));
        assert_eq!(game.snake().len(), 4);
    }

    #[test]
    fn test_moving_onto_body_is_death() {
        let body = [
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(0, 1),
            Coord::new(0, 2),
        ];
        let mut game = Game::from_parts(4, 4, &body, vec![], 1, 7);

        assert_eq!(game.step(Direction::South), TickOutcome::Died);
    }

    #[test]
    fn test_food_respawns_on_a_free_cell() {
        let food = vec![Coord::new(1, 0)];
        let mut game = Game::from_parts(3, 1, &[Coord::new(0, 0)], food, 1, 7);

        assert_eq!(game.step(Direction::East), TickOutcome::Ate);

        // only (2,0) is free on this corridor: head sits on the old food cell
        assert_eq!(game.food(), &[Coord::new(2, 0)]);
    }
}
