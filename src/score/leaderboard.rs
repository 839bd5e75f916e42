//! The highscore table
//!
//! Cleared runs are recorded as (nickname, elapsed, timestamp, seed) in a
//! JSON file under the platform data directory. Failures here must never
//! spoil a finished run; callers report them and move on.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("nickname must be exactly 3 letters")]
    InvalidNickname,
    #[error("failed to read or write the leaderboard: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard file is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// One cleared run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub nickname: String,
    pub elapsed_ms: u64,
    pub cleared_at: DateTime<Local>,
    pub seed: u64,
}

/// The on-disk leaderboard
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Open the leaderboard at its default location. A missing or corrupt
    /// file starts an empty board rather than failing.
    pub fn open() -> Self {
        Self::at(default_path())
    }

    pub fn at(path: PathBuf) -> Self {
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a cleared run and persist immediately. The nickname must be
    /// exactly three ASCII letters; it is stored uppercased.
    pub fn insert(
        &mut self,
        nickname: &str,
        elapsed_ms: u64,
        cleared_at: DateTime<Local>,
        seed: u64,
    ) -> Result<(), ScoreError> {
        if nickname.len() != 3 || !nickname.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ScoreError::InvalidNickname);
        }
        self.entries.push(ScoreEntry {
            nickname: nickname.to_ascii_uppercase(),
            elapsed_ms,
            cleared_at,
            seed,
        });
        self.persist()
    }

    /// The fastest runs, formatted for display. Equal times share a rank
    /// (standard competition ranking) and the podium gets its medals.
    pub fn top(&self, limit: usize) -> Vec<String> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|e| e.elapsed_ms);

        let mut rows = Vec::new();
        let mut rank = 0;
        let mut shown = 0;
        let mut prev_ms = None;
        for entry in sorted.into_iter().take(limit.max(1)) {
            if prev_ms != Some(entry.elapsed_ms) {
                rank = shown + 1;
                prev_ms = Some(entry.elapsed_ms);
            }
            shown += 1;
            rows.push(format!(
                "{}{:>2}) {}  {}  {}",
                medal_for_rank(rank),
                rank,
                entry.nickname,
                format_elapsed(entry.elapsed_ms),
                entry.cleared_at.format("%Y-%m-%d %H:%M"),
            ));
        }
        rows
    }

    /// 1-based rank a time would earn: strictly faster records plus one
    pub fn rank(&self, elapsed_ms: u64) -> usize {
        self.entries
            .iter()
            .filter(|e| e.elapsed_ms < elapsed_ms)
            .count()
            + 1
    }

    fn persist(&self) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// `mm:ss.mmm`, the board's time format
pub fn format_elapsed(millis: u64) -> String {
    let total_seconds = millis / 1000;
    format!(
        "{:02}:{:02}.{:03}",
        total_seconds / 60,
        total_seconds % 60,
        millis % 1000
    )
}

pub fn medal_for_rank(rank: usize) -> &'static str {
    match rank {
        1 => "🥇 ",
        2 => "🥈 ",
        3 => "🥉 ",
        _ => "",
    }
}

fn default_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "gloomkeep", "Gloomkeep") {
        proj_dirs.data_dir().join("leaderboard.json")
    } else {
        PathBuf::from("leaderboard.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(dir: &tempfile::TempDir) -> Leaderboard {
        Leaderboard::at(dir.path().join("leaderboard.json"))
    }

    #[test]
    fn elapsed_formats_as_minutes_seconds_millis() {
        assert_eq!(format_elapsed(0), "00:00.000");
        assert_eq!(format_elapsed(61_204), "01:01.204");
        assert_eq!(format_elapsed(600_000), "10:00.000");
    }

    #[test]
    fn medals_stop_at_the_podium() {
        assert_eq!(medal_for_rank(1), "🥇 ");
        assert_eq!(medal_for_rank(3), "🥉 ");
        assert_eq!(medal_for_rank(4), "");
    }

    #[test]
    fn nicknames_must_be_three_letters() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = board(&dir);
        let now = Local::now();
        assert!(matches!(
            board.insert("AB", 1000, now, 1),
            Err(ScoreError::InvalidNickname)
        ));
        assert!(matches!(
            board.insert("AB1", 1000, now, 1),
            Err(ScoreError::InvalidNickname)
        ));
        assert!(board.insert("abc", 1000, now, 1).is_ok());
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn entries_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let mut board = Leaderboard::at(path.clone());
        board.insert("AAA", 30_000, Local::now(), 7).unwrap();
        board.insert("BBB", 20_000, Local::now(), 7).unwrap();

        let reloaded = Leaderboard::at(path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.top(10)[0].contains("BBB"));
    }

    #[test]
    fn rank_counts_strictly_faster_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = board(&dir);
        let now = Local::now();
        board.insert("AAA", 10_000, now, 1).unwrap();
        board.insert("BBB", 20_000, now, 1).unwrap();
        board.insert("CCC", 20_000, now, 1).unwrap();

        assert_eq!(board.rank(5_000), 1);
        assert_eq!(board.rank(20_000), 2);
        assert_eq!(board.rank(25_000), 4);
    }

    #[test]
    fn tied_times_share_a_rank() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = board(&dir);
        let now = Local::now();
        board.insert("AAA", 10_000, now, 1).unwrap();
        board.insert("BBB", 10_000, now, 1).unwrap();
        board.insert("CCC", 30_000, now, 1).unwrap();

        let rows = board.top(10);
        assert!(rows[0].starts_with("🥇  1) AAA"));
        assert!(rows[1].starts_with("🥇  1) BBB"));
        assert!(rows[2].starts_with("🥉  3) CCC"));
    }

    #[test]
    fn a_missing_file_starts_an_empty_board() {
        let dir = tempfile::tempdir().unwrap();
        let board = board(&dir);
        assert!(board.is_empty());
        assert!(board.top(10).is_empty());
    }
}
