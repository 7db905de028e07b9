/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound; the session consumes
/// `NewHighScore` to persist it.

use crate::domain::collision::Collision;
use crate::domain::geom::Cell;

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    FoodEaten { at: Cell, score: u32 },
    Collided { cause: Collision, at: Cell },
    NewHighScore { score: u32 },
    Restarted,
}
