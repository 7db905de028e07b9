/// Grid geometry: cells, directions and the board.
///
/// Coordinates are in board units (the source surface is 500×400 with
/// 10-unit cells), so every in-bounds cell is a multiple of `cell_size`.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The neighbouring cell one step of `cell_size` away in `dir`.
    pub fn step(self, dir: Direction, cell_size: i32) -> Cell {
        let (dx, dy) = dir.delta();
        Cell::new(self.x + dx * cell_size, self.y + dy * cell_size)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit vector; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left  => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up    => (0, -1),
            Direction::Down  => (0, 1),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
        }
    }
}

/// The fixed-size playing field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Board {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Board { width, height, cell_size }
    }

    pub fn cols(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Number of grid cells; also the snake's capacity.
    pub fn cell_count(&self) -> usize {
        (self.cols().max(0) as usize) * (self.rows().max(0) as usize)
    }

    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    /// Board cell → grid column/row. None when off the board.
    pub fn to_grid(&self, c: Cell) -> Option<(usize, usize)> {
        if self.contains(c) {
            Some(((c.x / self.cell_size) as usize, (c.y / self.cell_size) as usize))
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(500, 400, 10)
    }
}
