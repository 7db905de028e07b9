/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::geom::Board;
use crate::sim::save;

/// Smallest board accepted from config, in cells per axis.
/// The default snake spawns with its head on column 5, row 5.
const MIN_CELLS: i32 = 8;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub board: Board,
    pub speed: SpeedConfig,
    pub high_score_file: PathBuf,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub restart: Vec<String>,
    pub pause: Vec<String>,
    pub quit: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    board: TomlBoard,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    storage: TomlStorage,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlBoard {
    #[serde(default = "default_width")]
    width: i32,
    #[serde(default = "default_height")]
    height: i32,
    #[serde(default = "default_cell_size")]
    cell_size: i32,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlStorage {
    #[serde(default = "default_high_score_file")]
    high_score_file: String,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_restart")]
    restart: Vec<String>,
    #[serde(default = "default_pause")]
    pause: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

// ── Defaults ──

fn default_width() -> i32 { 500 }
fn default_height() -> i32 { 400 }
fn default_cell_size() -> i32 { 10 }
fn default_tick_rate() -> u64 { 100 }
fn default_high_score_file() -> String { save::DEFAULT_FILE.into() }

fn default_restart() -> Vec<String> { vec!["Start".into(), "A".into()] }
fn default_pause() -> Vec<String> { vec!["Y".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlBoard {
    fn default() -> Self {
        TomlBoard {
            width: default_width(),
            height: default_height(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlStorage {
    fn default() -> Self {
        TomlStorage { high_score_file: default_high_score_file() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            restart: default_restart(),
            pause: default_pause(),
            quit: default_quit(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: exe directory, CWD, XDG data home, system data dir.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig::from_toml(toml_cfg)
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        let board = match validate_board(&cfg.board) {
            Ok(b) => b,
            Err(msg) => {
                eprintln!("Warning: {msg}");
                eprintln!("Using the default 500x400 board.");
                Board::default()
            }
        };

        let tick_rate_ms = if cfg.speed.tick_rate_ms == 0 {
            eprintln!("Warning: tick_rate_ms must be positive; using {}.", default_tick_rate());
            default_tick_rate()
        } else {
            cfg.speed.tick_rate_ms
        };

        GameConfig {
            board,
            speed: SpeedConfig { tick_rate_ms },
            high_score_file: PathBuf::from(cfg.storage.high_score_file),
            gamepad: GamepadConfig {
                restart: cfg.gamepad.restart,
                pause: cfg.gamepad.pause,
                quit: cfg.gamepad.quit,
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

fn validate_board(b: &TomlBoard) -> Result<Board, String> {
    if b.cell_size <= 0 {
        return Err(format!("board.cell_size must be positive (got {})", b.cell_size));
    }
    if b.width % b.cell_size != 0 || b.height % b.cell_size != 0 {
        return Err(format!(
            "board {}x{} is not a multiple of cell_size {}",
            b.width, b.height, b.cell_size,
        ));
    }
    let board = Board::new(b.width, b.height, b.cell_size);
    if board.cols() < MIN_CELLS || board.rows() < MIN_CELLS {
        return Err(format!(
            "board must be at least {MIN_CELLS}x{MIN_CELLS} cells (got {}x{})",
            board.cols(), board.rows(),
        ));
    }
    Ok(board)
}

/// Candidate directories to search: exe dir + CWD + data paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/snake)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/snake");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share/snake");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return parse_toml(&text),
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Warning: config.toml parse error: {e}");
            eprintln!("Using default settings.");
            TomlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.board, Board::new(500, 400, 10));
        assert_eq!(cfg.speed.tick_rate_ms, 100);
        assert_eq!(cfg.high_score_file, PathBuf::from("highest_score.txt"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = GameConfig::from_toml(parse_toml("[speed]\ntick_rate_ms = 60\n"));
        assert_eq!(cfg.speed.tick_rate_ms, 60);
        assert_eq!(cfg.board, Board::default());
    }

    #[test]
    fn custom_board() {
        let cfg = GameConfig::from_toml(parse_toml(
            "[board]\nwidth = 300\nheight = 200\ncell_size = 20\n",
        ));
        assert_eq!(cfg.board, Board::new(300, 200, 20));
    }

    #[test]
    fn misaligned_board_falls_back() {
        let cfg = GameConfig::from_toml(parse_toml(
            "[board]\nwidth = 505\nheight = 400\ncell_size = 10\n",
        ));
        assert_eq!(cfg.board, Board::default());
    }

    #[test]
    fn tiny_board_rejected() {
        let b = TomlBoard { width: 50, height: 400, cell_size: 10 };
        assert!(validate_board(&b).is_err());
    }

    #[test]
    fn zero_cell_size_rejected() {
        let b = TomlBoard { width: 500, height: 400, cell_size: 0 };
        assert!(validate_board(&b).is_err());
    }

    #[test]
    fn garbage_toml_uses_defaults() {
        let cfg = GameConfig::from_toml(parse_toml("this is = = not toml"));
        assert_eq!(cfg.board, Board::default());
        assert_eq!(cfg.gamepad.restart, default_restart());
    }

    #[test]
    fn zero_tick_rate_rejected() {
        let cfg = GameConfig::from_toml(parse_toml("[speed]\ntick_rate_ms = 0\n"));
        assert_eq!(cfg.speed.tick_rate_ms, 100);
    }
}
