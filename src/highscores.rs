//! Quantum Dino leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 runs.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::settings::Settings;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Run length
    pub survived_ms: f64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "quantum_dino_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Index a new score would take; ties rank below existing entries
    fn insertion_index(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0 && self.insertion_index(score) < MAX_HIGH_SCORES
    }

    /// Rank a score would achieve (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score).then(|| self.insertion_index(score) + 1)
    }

    /// Record a run; returns the rank achieved (1-indexed) if it qualified
    pub fn add_score(&mut self, score: u64, survived_ms: f64, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                survived_ms,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished run and persist it, unless the player opted out
    pub fn record_run(
        &mut self,
        settings: &Settings,
        score: u64,
        survived_ms: f64,
        timestamp: f64,
    ) -> Option<usize> {
        if !settings.keep_highscores {
            log::debug!("High scores disabled, run of {score} not recorded");
            return None;
        }
        let rank = self.add_score(score, survived_ms, timestamp)?;
        self.save();
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn load() -> Self {
        match storage::load_json::<HighScores>(Self::STORAGE_KEY) {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        storage::save_json(Self::STORAGE_KEY, self);
        log::info!("High scores saved ({} entries)", self.entries.len());
    }
}

/// Format a run length as `m:ss`
pub fn format_survival(ms: f64) -> String {
    let total_secs = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending() {
        let mut hs = HighScores::new();
        assert_eq!(hs.add_score(50, 0.0, 0.0), Some(1));
        assert_eq!(hs.add_score(80, 0.0, 0.0), Some(1));
        assert_eq!(hs.add_score(60, 0.0, 0.0), Some(2));
        let scores: Vec<_> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![80, 60, 50]);
        assert_eq!(hs.top_score(), Some(80));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let hs = HighScores::new();
        assert!(!hs.qualifies(0));
        assert_eq!(hs.potential_rank(0), None);
    }

    #[test]
    fn test_full_board() {
        let mut hs = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            hs.add_score(s * 10, 0.0, 0.0);
        }
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        // Tie with the lowest entry doesn't get in
        assert!(!hs.qualifies(10));
        assert_eq!(hs.add_score(15, 0.0, 0.0), Some(10));
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries.last().unwrap().score, 15);
    }

    #[test]
    fn test_record_run_respects_opt_out() {
        let mut hs = HighScores::new();
        let mut settings = Settings {
            keep_highscores: false,
            ..Settings::default()
        };
        assert_eq!(hs.record_run(&settings, 120, 9_000.0, 1.0), None);
        assert!(hs.is_empty());

        settings.keep_highscores = true;
        assert_eq!(hs.record_run(&settings, 120, 9_000.0, 2.0), Some(1));
        assert_eq!(hs.top_score(), Some(120));
    }

    #[test]
    fn test_format_survival() {
        assert_eq!(format_survival(0.0), "0:00");
        assert_eq!(format_survival(65_400.0), "1:05");
        assert_eq!(format_survival(-5.0), "0:00");
    }
}
