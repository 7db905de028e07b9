/// Food: one cell, relocated uniformly over the board when eaten.
///
/// Placement does not avoid the snake body, so food can land under it.

use rand::Rng;

use super::geom::{Board, Cell};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Food {
    pub at: Cell,
}

impl Food {
    pub fn spawn<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Self {
        let mut food = Food { at: Cell::new(0, 0) };
        food.relocate(board, rng);
        food
    }

    /// Pick one of `cols * rows` cells at random and move there.
    pub fn relocate<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R) {
        let col = rng.gen_range(0..board.cols());
        let row = rng.gen_range(0..board.rows());
        self.at = Cell::new(col * board.cell_size, row * board.cell_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn relocate_stays_on_grid() {
        let board = Board::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::spawn(&board, &mut rng);
        for _ in 0..500 {
            food.relocate(&board, &mut rng);
            assert!(board.contains(food.at));
            assert_eq!(food.at.x % board.cell_size, 0);
            assert_eq!(food.at.y % board.cell_size, 0);
        }
    }

    #[test]
    fn relocate_reaches_corners() {
        let board = Board::new(20, 20, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut food = Food::spawn(&board, &mut rng);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            food.relocate(&board, &mut rng);
            seen.insert(food.at);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn same_seed_same_sequence() {
        let board = Board::default();
        let a = Food::spawn(&board, &mut StdRng::seed_from_u64(42));
        let b = Food::spawn(&board, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
