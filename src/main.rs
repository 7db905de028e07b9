/// Entry point and frame loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::Duration;

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::geom::Direction;
use sim::clock::{IntervalTicker, TickSource};
use sim::event::GameEvent;
use sim::save::HighScoreStore;
use sim::session::{FrameInput, Session};
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::{Draw, Renderer};
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();
    let store = HighScoreStore::resolve(&config.high_score_file);
    let ticker = IntervalTicker::new(Duration::from_millis(config.speed.tick_rate_ms));
    let mut rng = rand::thread_rng();

    let mut session = Session::new(config.board, ticker, store, &mut rng);
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut session, &mut renderer, sound.as_ref(), &config, &mut rng);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    let world = session.world();
    println!();
    println!("Thanks for playing Snake!");
    println!("Final Score: {}   High Score: {}", world.score, world.high_score);
}

fn game_loop<T: TickSource, R: rand::Rng>(
    session: &mut Session<T>,
    renderer: &mut impl Draw,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
    rng: &mut R,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() || kb.any_pressed(KEYS_QUIT) || gp.quit_pressed() {
            break;
        }

        let input = collect_input(&kb, &gp);
        let events = session.handle_input(&input, rng);
        process_sound_events(sound, &events);

        let events = session.update(rng);
        process_sound_events(sound, &events);

        renderer.draw(session.world())?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::FoodEaten { .. } => sfx.play_eat(),
            GameEvent::Collided { .. } => sfx.play_crash(),
            GameEvent::NewHighScore { .. } => sfx.play_record(),
            GameEvent::Restarted => sfx.play_start(),
        }
    }
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_PAUSE: &[KeyCode] = &[KeyCode::Char('p'), KeyCode::Char('P'), KeyCode::F(1)];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

fn key_direction(code: KeyCode) -> Option<Direction> {
    if KEYS_LEFT.contains(&code) {
        Some(Direction::Left)
    } else if KEYS_RIGHT.contains(&code) {
        Some(Direction::Right)
    } else if KEYS_UP.contains(&code) {
        Some(Direction::Up)
    } else if KEYS_DOWN.contains(&code) {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Keyboard presses first, then gamepad, each in arrival order.
fn collect_input(kb: &InputState, gp: &GamepadState) -> FrameInput {
    let mut steer: Vec<Direction> = kb.presses().iter().filter_map(|&c| key_direction(c)).collect();
    steer.extend_from_slice(gp.steer_presses());

    FrameInput {
        steer,
        restart: kb.any_pressed(KEYS_RESTART) || gp.restart_pressed(),
        toggle_pause: kb.any_pressed(KEYS_PAUSE) || gp.pause_pressed(),
    }
}
