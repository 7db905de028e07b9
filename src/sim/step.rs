/// The step function: advances the game by one tick.
///
/// Processing order (one tick is atomic):
///   1. Food check   — head on food → grow, score + 1, relocate food
///   2. Collision    — self-bite, then walls → GameOver, record high score
///   3. Movement     — commit pending direction, advance the snake
///
/// Collision runs on the position reached by the previous tick's move, so a
/// snake that steps off the board is caught at the start of the next tick.
///
/// No clock and no I/O in here: the RNG is injected and persistence is left
/// to whoever consumes `GameEvent::NewHighScore`.

use rand::Rng;

use crate::domain::collision::detect_collision;
use crate::domain::geom::Direction;
use super::event::GameEvent;
use super::world::{GameState, Phase};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step<R: Rng + ?Sized>(world: &mut GameState, rng: &mut R) -> Vec<GameEvent> {
    if world.phase != Phase::Running || world.paused { return vec![]; }

    let mut events: Vec<GameEvent> = Vec::new();

    resolve_food(world, rng, &mut events);
    if resolve_collision(world, &mut events) { return events; }
    resolve_movement(world);

    events
}

// ══════════════════════════════════════════════════════════════
// Input-driven transitions
// ══════════════════════════════════════════════════════════════

/// Queue a direction for the next tick. Returns false when rejected:
/// not running, paused, or the reverse of the current heading.
///
/// The reverse check uses the heading of the last tick, not an earlier press
/// queued in the same interval. Moving right, Up then Down ends up Down.
pub fn steer(world: &mut GameState, dir: Direction) -> bool {
    if world.phase != Phase::Running || world.paused { return false; }
    if dir == world.direction.reverse() { return false; }
    world.pending = dir;
    true
}

/// Start over from GameOver. Keeps the board and the high score.
/// Ignored in any other phase.
pub fn restart<R: Rng + ?Sized>(world: &mut GameState, rng: &mut R) -> Option<GameEvent> {
    if world.phase != Phase::GameOver { return None; }
    *world = GameState::new(world.board, world.high_score, rng);
    Some(GameEvent::Restarted)
}

// ══════════════════════════════════════════════════════════════
// Tick phases
// ══════════════════════════════════════════════════════════════

fn resolve_food<R: Rng + ?Sized>(world: &mut GameState, rng: &mut R, events: &mut Vec<GameEvent>) {
    let head = world.snake.head();
    if head != world.food.at { return; }

    world.snake.grow();
    world.score += 1;
    world.food.relocate(&world.board, rng);
    events.push(GameEvent::FoodEaten { at: head, score: world.score });
}

/// Returns true when the game just ended.
fn resolve_collision(world: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let cause = match detect_collision(&world.snake, &world.board) {
        Some(c) => c,
        None => return false,
    };

    world.phase = Phase::GameOver;
    events.push(GameEvent::Collided { cause, at: world.snake.head() });

    if world.score > world.high_score {
        world.high_score = world.score;
        events.push(GameEvent::NewHighScore { score: world.score });
    }
    true
}

fn resolve_movement(world: &mut GameState) {
    world.direction = world.pending;
    world.snake.advance(world.direction);
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
