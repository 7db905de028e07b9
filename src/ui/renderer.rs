/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Compose the next frame into `front` (a grid of Cell)
///   2. Compare each cell with `back` (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Each board cell is two terminal columns wide so squares look square.
/// When the terminal is smaller than the board, a camera follows the head
/// and a marker on the frame points at off-screen food.
/// The renderer never mutates game state; it only implements `Draw`.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::geom::Cell as BoardCell;
use crate::sim::world::{GameState, Phase};
use super::camera::Camera;

/// Anything that can present a `GameState`.
pub trait Draw {
    fn draw(&mut self, state: &GameState) -> io::Result<()>;
}

// ── Palette ──

const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };
const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const BOARD_BG: Color = Color::Blue;
const FOOD: Color = Color::Red;
const HEAD: Color = Color::Green;
const BODY: Color = Color::White;
const FRAME: Color = Color::DarkGrey;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: BASE_BG };

    /// Sentinel used to invalidate the back buffer: differs from any real
    /// cell, so every position is emitted on the next flush.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }

    fn solid(bg: Color) -> Self {
        Cell { ch: ' ', fg: Color::White, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::solid(bg));
        }
    }
}

// ── Renderer ──

/// Terminal columns per board cell.
const CELL_W: usize = 2;

/// Layout
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
const MAP_COL: usize = 1;
/// Rows below the board: bottom border, gap, help.
const BELOW_MAP: usize = 3;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    last_phase: Option<Phase>,
    camera: Camera,
    camera_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            last_phase: None,
            camera: Camera::new(),
            camera_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.front.resize(tw as usize, th as usize);
        self.back.resize(tw as usize, th as usize);
        // Force full repaint on first frame.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) { continue; }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, w: &GameState) {
        self.front.clear();
        self.fit_camera(w);
        self.compose_hud(w);

        if self.camera.view_w == 0 || self.camera.view_h == 0 {
            self.front.put_str(0, MAP_ROW, " Terminal too small", Color::Yellow, BASE_BG);
            return;
        }
        self.compose_frame(w);

        match w.phase {
            Phase::Running => {
                self.compose_board(w);
                if w.paused {
                    self.compose_centered(&[("PAUSED", Color::Yellow), ("[P] Resume", Color::White)]);
                }
            }
            Phase::GameOver => self.compose_game_over(w),
        }

        self.compose_help(w);
    }

    /// Size the viewport from the terminal and track the head. A phase
    /// change (new game, game over) snaps instead of scrolling.
    fn fit_camera(&mut self, w: &GameState) {
        let cols = w.board.cols().max(0) as usize;
        let rows = w.board.rows().max(0) as usize;
        let avail_w = self.front.width.saturating_sub(MAP_COL + 1) / CELL_W;
        let avail_h = self.front.height.saturating_sub(MAP_ROW + BELOW_MAP);
        self.camera.fit(avail_w, avail_h, cols, rows);

        if let Some((gx, gy)) = w.board.to_grid(w.snake.head()) {
            if self.camera_phase == Some(w.phase) {
                self.camera.follow(gx, gy, cols, rows);
            } else {
                self.camera.center_on(gx, gy, cols, rows);
                self.camera_phase = Some(w.phase);
            }
        }
    }

    fn compose_hud(&mut self, w: &GameState) {
        let hud = format!(
            " SNAKE   Score: {:<6}  High Score: {:<6}  Length: {}",
            w.score, w.high_score, w.snake.len(),
        );
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);
    }

    /// Border around the viewport. Solid where it is the board's wall,
    /// dashed where the board continues off-screen.
    fn compose_frame(&mut self, w: &GameState) {
        let cols = self.camera.view_w * CELL_W;
        let rows = self.camera.view_h;
        let (left, right) = (MAP_COL - 1, MAP_COL + cols);
        let (top, bottom) = (MAP_ROW - 1, MAP_ROW + rows);
        let (wall_l, wall_r, wall_t, wall_b) = self.camera.walls_visible(
            w.board.cols().max(0) as usize,
            w.board.rows().max(0) as usize,
        );
        let h = |wall: bool| if wall { '─' } else { '┄' };
        let v = |wall: bool| if wall { '│' } else { '┆' };

        for x in left..=right {
            let (t, b) = if x == left { ('┌', '└') } else if x == right { ('┐', '┘') } else { (h(wall_t), h(wall_b)) };
            self.front.set(x, top, Cell::new(t, FRAME, BASE_BG));
            self.front.set(x, bottom, Cell::new(b, FRAME, BASE_BG));
        }
        for y in MAP_ROW..bottom {
            self.front.set(left, y, Cell::new(v(wall_l), FRAME, BASE_BG));
            self.front.set(right, y, Cell::new(v(wall_r), FRAME, BASE_BG));
        }
        for y in MAP_ROW..bottom {
            for x in MAP_COL..right {
                self.front.set(x, y, Cell::solid(BOARD_BG));
            }
        }
    }

    fn compose_board(&mut self, w: &GameState) {
        if !self.paint(w, w.food.at, FOOD) {
            self.compose_food_marker(w);
        }
        // Body first so the head wins when food or body overlap it.
        for &seg in w.snake.segments().iter().skip(1) {
            self.paint(w, seg, BODY);
        }
        self.paint(w, w.snake.head(), HEAD);
    }

    /// Fill one board cell. Returns false when it is off-board or outside
    /// the viewport.
    fn paint(&mut self, w: &GameState, at: BoardCell, color: Color) -> bool {
        let Some((gx, gy)) = w.board.to_grid(at) else { return false };
        let Some((vx, vy)) = self.camera.to_view(gx, gy) else { return false };
        let col = MAP_COL + vx * CELL_W;
        let row = MAP_ROW + vy;
        for dx in 0..CELL_W {
            self.front.set(col + dx, row, Cell::solid(color));
        }
        true
    }

    /// Food outside the viewport: a marker on the frame, on the side
    /// facing it.
    fn compose_food_marker(&mut self, w: &GameState) {
        let Some((gx, gy)) = w.board.to_grid(w.food.at) else { return };
        let cam = &self.camera;
        let vx = gx as i32 - cam.x;
        let vy = gy as i32 - cam.y;

        let col = if vx < 0 {
            MAP_COL - 1
        } else if vx as usize >= cam.view_w {
            MAP_COL + cam.view_w * CELL_W
        } else {
            MAP_COL + vx as usize * CELL_W
        };
        let row = if vy < 0 {
            MAP_ROW - 1
        } else if vy as usize >= cam.view_h {
            MAP_ROW + cam.view_h
        } else {
            MAP_ROW + vy as usize
        };
        self.front.set(col, row, Cell::new('◆', FOOD, BASE_BG));
    }

    fn compose_game_over(&mut self, w: &GameState) {
        let score = format!("Score: {}", w.score);
        let high = format!("High Score: {}", w.high_score);
        self.compose_centered(&[
            ("Game Over", FOOD),
            ("", Color::White),
            (score.as_str(), Color::White),
            (high.as_str(), Color::White),
            ("", Color::White),
            ("Press 'R' to Try Again", Color::White),
        ]);
    }

    /// Lines centered on the board, drawn on the board background.
    fn compose_centered(&mut self, lines: &[(&str, Color)]) {
        let cols = self.camera.view_w * CELL_W;
        let rows = self.camera.view_h;
        let top = MAP_ROW + rows.saturating_sub(lines.len()) / 2;
        for (i, (text, fg)) in lines.iter().enumerate() {
            let len = text.chars().count();
            let x = MAP_COL + cols.saturating_sub(len) / 2;
            self.front.put_str(x, top + i, text, *fg, BOARD_BG);
        }
    }

    fn compose_help(&mut self, w: &GameState) {
        let row = MAP_ROW + self.camera.view_h + 2;
        let help = match w.phase {
            Phase::Running => " Arrows/WASD: Steer   P: Pause   Esc/Q: Quit",
            Phase::GameOver => " R: Try Again   Esc/Q: Quit",
        };
        self.front.put_str(0, row, help, Color::DarkGrey, BASE_BG);
    }
}

impl Draw for Renderer {
    fn draw(&mut self, state: &GameState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.front.width || th as usize != self.front.height {
            self.front.resize(tw as usize, th as usize);
            self.back.resize(tw as usize, th as usize);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
        }

        // Phase change → full repaint for a clean transition
        if self.last_phase != Some(state.phase) {
            self.back.cells.fill(Cell::INVALID);
            self.last_phase = Some(state.phase);
        }

        self.compose(state);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geom::Board;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state() -> GameState {
        let mut w = GameState::new(Board::default(), 7, &mut StdRng::seed_from_u64(5));
        w.food.at = BoardCell::new(100, 100);
        w
    }

    fn composed(w: &GameState) -> Renderer {
        let mut r = Renderer::new();
        r.front.resize(110, 46);
        r.compose(w);
        r
    }

    fn row_text(r: &Renderer, y: usize) -> String {
        (0..r.front.width).map(|x| r.front.get(x, y).ch).collect()
    }

    fn screen_text(r: &Renderer) -> String {
        (0..r.front.height).map(|y| row_text(r, y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn board_cells_map_to_two_columns() {
        let r = composed(&state());
        // Head (50,50) → grid (5,5)
        let (col, row) = (MAP_COL + 5 * CELL_W, MAP_ROW + 5);
        assert_eq!(r.front.get(col, row).bg, HEAD);
        assert_eq!(r.front.get(col + 1, row).bg, HEAD);
        // Body (40,50) → grid (4,5)
        assert_eq!(r.front.get(MAP_COL + 4 * CELL_W, row).bg, BODY);
        // Food (100,100) → grid (10,10)
        assert_eq!(r.front.get(MAP_COL + 10 * CELL_W, MAP_ROW + 10).bg, FOOD);
        // Empty board
        assert_eq!(r.front.get(MAP_COL + 30 * CELL_W, MAP_ROW + 30).bg, BOARD_BG);
    }

    #[test]
    fn hud_shows_scores() {
        let mut w = state();
        w.score = 3;
        let r = composed(&w);
        let hud = row_text(&r, HUD_ROW);
        assert!(hud.contains("Score: 3"));
        assert!(hud.contains("High Score: 7"));
    }

    #[test]
    fn game_over_panel() {
        let mut w = state();
        w.phase = Phase::GameOver;
        w.score = 2;
        let r = composed(&w);
        let text = screen_text(&r);
        assert!(text.contains("Game Over"));
        assert!(text.contains("Score: 2"));
        assert!(text.contains("High Score: 7"));
        assert!(text.contains("Press 'R' to Try Again"));
        // Snake is not drawn on the game-over screen.
        assert_eq!(r.front.get(MAP_COL + 5 * CELL_W, MAP_ROW + 5).bg, BOARD_BG);
    }

    #[test]
    fn pause_overlay() {
        let mut w = state();
        w.paused = true;
        let text = screen_text(&composed(&w));
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn off_board_head_is_clipped() {
        let mut w = state();
        w.snake.advance(crate::domain::geom::Direction::Up);
        for _ in 0..10 {
            w.snake.advance(crate::domain::geom::Direction::Up);
        }
        // Must not panic or draw outside the frame.
        let r = composed(&w);
        assert_eq!(r.front.get(MAP_COL + 5 * CELL_W, MAP_ROW - 1).ch, '─');
    }

    fn composed_at(w: &GameState, tw: usize, th: usize) -> Renderer {
        let mut r = Renderer::new();
        r.front.resize(tw, th);
        r.compose(w);
        r
    }

    fn count_bg(r: &Renderer, color: Color) -> usize {
        r.front.cells.iter().filter(|c| c.bg == color).count()
    }

    fn segments(pts: &[(i32, i32)], board: &Board) -> crate::domain::snake::Snake {
        let cells = pts.iter().map(|&(x, y)| BoardCell::new(x, y)).collect();
        crate::domain::snake::Snake::from_segments(cells, board)
    }

    #[test]
    fn default_board_on_80x24_shows_far_corner_around_head() {
        let mut w = state();
        w.snake = segments(&[(450, 350), (440, 350), (430, 350)], &w.board);
        w.food.at = BoardCell::new(470, 380);
        let r = composed_at(&w, 80, 24);

        // View is 39x19 cells, snapped to the bottom-right of the board.
        assert_eq!((r.camera.view_w, r.camera.view_h), (39, 19));
        assert_eq!((r.camera.x, r.camera.y), (11, 21));
        assert_eq!(count_bg(&r, HEAD), CELL_W);
        assert_eq!(count_bg(&r, FOOD), CELL_W);
        assert_eq!(r.front.get(MAP_COL + 34 * CELL_W, MAP_ROW + 14).bg, HEAD);
        assert_eq!(r.front.get(MAP_COL + 36 * CELL_W, MAP_ROW + 17).bg, FOOD);

        // Right and bottom walls are real; left and top scroll.
        assert_eq!(r.front.get(MAP_COL + 39 * CELL_W, MAP_ROW).ch, '│');
        assert_eq!(r.front.get(0, MAP_ROW).ch, '┆');
        assert_eq!(r.front.get(MAP_COL + 2, MAP_ROW + 19).ch, '─');
        assert_eq!(r.front.get(MAP_COL + 2, MAP_ROW - 1).ch, '┄');
    }

    #[test]
    fn off_screen_food_gets_a_frame_marker() {
        let mut w = state();
        w.food.at = BoardCell::new(450, 350);
        let r = composed_at(&w, 80, 24);
        assert_eq!(count_bg(&r, FOOD), 0);
        let marker = r.front.get(MAP_COL + 39 * CELL_W, MAP_ROW + 19);
        assert_eq!((marker.ch, marker.fg), ('◆', FOOD));
    }

    #[test]
    fn head_stays_on_screen_while_crossing_board() {
        let mut w = state();
        let mut r = Renderer::new();
        r.front.resize(80, 24);
        for _ in 0..44 {
            w.snake.advance(crate::domain::geom::Direction::Right);
            r.compose(&w);
            assert_eq!(count_bg(&r, HEAD), CELL_W);
        }
        assert_eq!(w.snake.head(), BoardCell::new(490, 50));
        assert_eq!(r.camera.x, 11);
    }

    #[test]
    fn help_row_fits_on_80x24() {
        let r = composed_at(&state(), 80, 24);
        assert!(row_text(&r, 23).contains("Esc/Q: Quit"));
    }

    #[test]
    fn small_terminal_does_not_panic() {
        let r = composed_at(&state(), 10, 5);
        assert!(row_text(&r, MAP_ROW).contains("Terminal"));
    }
}
