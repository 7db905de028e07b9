/// GameState: the complete snapshot of a running game.
///
/// Owned by the loop controller (`Session`). The renderer only ever sees
/// `&GameState`, and `step` is the only thing that advances it.
///
/// ## Direction handling
///
///   - `direction` — the direction the snake moved on the last tick.
///   - `pending`   — the direction the next tick will commit.
///
/// Reverse checks compare against `direction`, so two quick presses between
/// ticks can never turn the snake back onto its own neck.

use rand::Rng;

use crate::domain::food::Food;
use crate::domain::geom::{Board, Direction};
use crate::domain::snake::Snake;

pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    pub food: Food,
    pub direction: Direction,
    pub pending: Direction,

    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub paused: bool,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(board: Board, high_score: u32, rng: &mut R) -> Self {
        GameState {
            board,
            snake: Snake::spawn(&board),
            food: Food::spawn(&board, rng),
            direction: INITIAL_DIRECTION,
            pending: INITIAL_DIRECTION,
            phase: Phase::Running,
            score: 0,
            high_score,
            paused: false,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
