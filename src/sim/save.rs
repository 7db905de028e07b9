/// High-score persistence.
///
/// ## File format:
///   A single decimal integer, newline optional. Only the first line is read.
///
/// Errors are never surfaced to the player: an absent or unreadable file
/// loads as 0, and a failed write is dropped by the caller.

use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE: &str = "highest_score.txt";

// ══════════════════════════════════════════════════════════════
// Paths
// ══════════════════════════════════════════════════════════════

pub fn save_dir() -> PathBuf {
    // 1. Try exe directory (works for local/portable installs)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            // Check if writable (system installs like /usr/games/ won't be)
            let test_path = parent.join(".write_test_snake");
            if std::fs::write(&test_path, "").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return parent.to_path_buf();
            }
        }
    }

    // 2. XDG data home (~/.local/share/snake)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/snake");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }

    // 3. Fallback to CWD
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

// ══════════════════════════════════════════════════════════════
// Store
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    /// Relative names land in `save_dir()`; absolute paths are used as is.
    pub fn resolve(name: &Path) -> Self {
        if name.is_absolute() {
            HighScoreStore::new(name)
        } else {
            HighScoreStore::new(save_dir().join(name))
        }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> u32 {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| parse_score(&text))
            .unwrap_or(0)
    }

    pub fn save(&self, score: u32) -> io::Result<()> {
        std::fs::write(&self.path, score.to_string())
    }
}

fn parse_score(content: &str) -> Option<u32> {
    content.lines().next()?.trim().parse().ok()
}
