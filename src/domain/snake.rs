/// The snake: an ordered run of segments, head first.
///
/// Movement is head-follow: each segment takes its predecessor's old
/// position, then the head steps one cell. Growth duplicates the tail so the
/// next advance keeps the old tail position as a segment.

use super::geom::{Board, Cell, Direction};

pub const INITIAL_LENGTH: usize = 3;

/// Head start position in cells from the top-left corner.
const START_COL: i32 = 5;
const START_ROW: i32 = 5;

#[derive(Clone, Debug)]
pub struct Snake {
    segments: Vec<Cell>,
    capacity: usize,
    cell_size: i32,
}

impl Snake {
    /// Default 3-segment snake heading right: `(5c,5c), (4c,5c), (3c,5c)`.
    pub fn spawn(board: &Board) -> Self {
        let c = board.cell_size;
        let segments = (0..INITIAL_LENGTH as i32)
            .map(|i| Cell::new((START_COL - i) * c, START_ROW * c))
            .collect();
        Snake::from_segments(segments, board)
    }

    /// `segments` must be non-empty, head first.
    pub fn from_segments(segments: Vec<Cell>, board: &Board) -> Self {
        let capacity = board.cell_count().max(segments.len());
        Snake { segments, capacity, cell_size: board.cell_size }
    }

    #[inline]
    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Shift body forward and step the head in `dir`.
    pub fn advance(&mut self, dir: Direction) {
        let n = self.segments.len();
        for i in (1..n).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = self.segments[0].step(dir, self.cell_size);
    }

    /// Lengthen by one. Saturates at capacity.
    pub fn grow(&mut self) {
        if self.segments.len() >= self.capacity {
            return;
        }
        let tail = self.segments[self.segments.len() - 1];
        self.segments.push(tail);
    }

    /// Does any non-head segment sit on the head?
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.segments[1..].iter().any(|&s| s == head)
    }
}
