/// Terminal-condition checks: self-bite first, then walls.

use super::geom::Board;
use super::snake::Snake;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Collision {
    SelfBite,
    Wall,
}

pub fn detect_collision(snake: &Snake, board: &Board) -> Option<Collision> {
    if snake.bites_itself() {
        return Some(Collision::SelfBite);
    }
    if !board.contains(snake.head()) {
        return Some(Collision::Wall);
    }
    None
}

#[cfg_attr(not(test), allow(dead_code))]
#[inline]
pub fn check_collision(snake: &Snake, board: &Board) -> bool {
    detect_collision(snake, board).is_some()
}
