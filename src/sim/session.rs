/// Session: the loop controller.
///
/// Owns the `GameState`, the tick source and the high-score store. The
/// frame loop feeds it one `FrameInput` per frame and then asks it to
/// `update`; the renderer reads `world()`.
///
/// Ticker lifecycle follows the phase: stopped on GameOver, restarted when
/// the player starts over.

use rand::Rng;

use crate::domain::geom::{Board, Direction};
use super::clock::TickSource;
use super::event::GameEvent;
use super::save::HighScoreStore;
use super::step;
use super::world::{GameState, Phase};

/// Game input gathered during one frame, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub steer: Vec<Direction>,
    pub restart: bool,
    pub toggle_pause: bool,
}

pub struct Session<T: TickSource> {
    world: GameState,
    ticker: T,
    store: HighScoreStore,
}

impl<T: TickSource> Session<T> {
    pub fn new<R: Rng + ?Sized>(board: Board, mut ticker: T, store: HighScoreStore, rng: &mut R) -> Self {
        let high_score = store.load();
        ticker.start();
        Session {
            world: GameState::new(board, high_score, rng),
            ticker,
            store,
        }
    }

    pub fn world(&self) -> &GameState {
        &self.world
    }

    /// Apply player input. Between ticks, so the next tick sees it once.
    pub fn handle_input<R: Rng + ?Sized>(&mut self, input: &FrameInput, rng: &mut R) -> Vec<GameEvent> {
        let mut events = vec![];

        match self.world.phase {
            Phase::GameOver => {
                if input.restart {
                    if let Some(ev) = step::restart(&mut self.world, rng) {
                        self.ticker.start();
                        events.push(ev);
                    }
                }
            }
            Phase::Running => {
                if input.toggle_pause {
                    self.world.paused = !self.world.paused;
                }
                for &dir in &input.steer {
                    step::steer(&mut self.world, dir);
                }
            }
        }

        events
    }

    /// Run one tick if the ticker says one is due.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        if !self.ticker.ready() { return vec![]; }

        let events = step::step(&mut self.world, rng);

        if !self.world.is_running() {
            self.ticker.stop();
        }
        for ev in &events {
            if let GameEvent::NewHighScore { score } = ev {
                // Best effort: a failed write is not worth interrupting the game.
                let _ = self.store.save(*score);
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geom::Cell;
    use crate::domain::snake::Snake;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Fires only when a tick has been queued by the test.
    #[derive(Default)]
    struct ManualTicker {
        queued: u32,
        running: bool,
        starts: u32,
    }

    impl TickSource for ManualTicker {
        fn ready(&mut self) -> bool {
            if self.running && self.queued > 0 {
                self.queued -= 1;
                true
            } else {
                false
            }
        }
        fn stop(&mut self) { self.running = false; }
        fn start(&mut self) {
            self.running = true;
            self.starts += 1;
        }
    }

    fn temp_store(tag: &str) -> HighScoreStore {
        let path = std::env::temp_dir()
            .join(format!("snake_session_{}_{}.txt", tag, std::process::id()));
        let _ = std::fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    fn session(tag: &str) -> (Session<ManualTicker>, StdRng) {
        let mut rng = StdRng::seed_from_u64(99);
        let mut s = Session::new(Board::default(), ManualTicker::default(), temp_store(tag), &mut rng);
        s.world.food.at = Cell::new(400, 300);
        (s, rng)
    }

    fn put_at_right_wall(s: &mut Session<ManualTicker>) {
        let board = s.world.board;
        s.world.snake = Snake::from_segments(
            vec![Cell::new(500, 50), Cell::new(490, 50), Cell::new(480, 50)],
            &board,
        );
    }

    #[test]
    fn no_tick_no_movement() {
        let (mut s, mut rng) = session("idle");
        assert!(s.update(&mut rng).is_empty());
        assert_eq!(s.world().snake.head(), Cell::new(50, 50));
    }

    #[test]
    fn steering_applies_on_next_tick() {
        let (mut s, mut rng) = session("steer");
        let input = FrameInput { steer: vec![Direction::Down], ..Default::default() };
        s.handle_input(&input, &mut rng);
        assert_eq!(s.world().snake.head(), Cell::new(50, 50));
        s.ticker.queued = 1;
        s.update(&mut rng);
        assert_eq!(s.world().snake.head(), Cell::new(50, 60));
    }

    #[test]
    fn game_over_stops_ticker_and_persists() {
        let (mut s, mut rng) = session("over");
        s.world.score = 4;
        put_at_right_wall(&mut s);
        s.ticker.queued = 3;
        let events = s.update(&mut rng);
        assert_eq!(s.world().phase, Phase::GameOver);
        assert!(!s.ticker.running);
        assert!(events.contains(&GameEvent::NewHighScore { score: 4 }));
        assert_eq!(s.store.load(), 4);

        // Remaining queued ticks are not consumed while stopped.
        assert!(s.update(&mut rng).is_empty());
        assert_eq!(s.ticker.queued, 2);
        let _ = std::fs::remove_file(s.store.path());
    }

    #[test]
    fn restart_resumes_ticker() {
        let (mut s, mut rng) = session("restart");
        put_at_right_wall(&mut s);
        s.ticker.queued = 1;
        s.update(&mut rng);
        assert_eq!(s.world().phase, Phase::GameOver);

        let steer_only = FrameInput { steer: vec![Direction::Up], ..Default::default() };
        assert!(s.handle_input(&steer_only, &mut rng).is_empty());
        assert_eq!(s.world().phase, Phase::GameOver);

        let restart = FrameInput { restart: true, ..Default::default() };
        let events = s.handle_input(&restart, &mut rng);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(s.world().phase, Phase::Running);
        assert!(s.ticker.running);
        assert_eq!(s.ticker.starts, 2);
    }

    #[test]
    fn restart_key_ignored_while_running() {
        let (mut s, mut rng) = session("noreset");
        s.world.score = 2;
        let restart = FrameInput { restart: true, ..Default::default() };
        s.handle_input(&restart, &mut rng);
        assert_eq!(s.world().score, 2);
    }

    #[test]
    fn pause_freezes_ticks() {
        let (mut s, mut rng) = session("pause");
        let toggle = FrameInput { toggle_pause: true, ..Default::default() };
        s.handle_input(&toggle, &mut rng);
        assert!(s.world().paused);
        s.ticker.queued = 2;
        s.update(&mut rng);
        assert_eq!(s.world().snake.head(), Cell::new(50, 50));

        s.handle_input(&toggle, &mut rng);
        s.update(&mut rng);
        assert_eq!(s.world().snake.head(), Cell::new(60, 50));
    }

    #[test]
    fn loads_high_score_at_start() {
        let store = temp_store("load");
        store.save(31).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let s = Session::new(Board::default(), ManualTicker::default(), store, &mut rng);
        assert_eq!(s.world().high_score, 31);
        let _ = std::fs::remove_file(s.store.path());
    }
}
