//! Score tracking and the persisted best score
//!
//! The integer session score is authoritative; the visible counter trails it
//! by design, catching up one point per rendered frame. The best score is a
//! single record persisted through the `ScoreStore` boundary.

use serde::{Deserialize, Serialize};

use crate::platform::ScoreStore;

/// Persisted best-score record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub achieved_at_ms: f64,
}

impl BestScore {
    /// Parse a stored record. Accepts the JSON envelope as well as the bare
    /// integer written by older builds.
    pub fn from_stored(raw: &str) -> Option<Self> {
        if let Ok(record) = serde_json::from_str::<BestScore>(raw) {
            return Some(record);
        }
        raw.trim().parse::<u32>().ok().map(|score| BestScore {
            score,
            achieved_at_ms: 0.0,
        })
    }
}

/// Tracks the display counter and the running best across sessions
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    best: u32,
    displayed: u32,
    new_best: bool,
}

impl ScoreBoard {
    /// Load the persisted best score, defaulting to 0 when absent
    pub fn load(store: &impl ScoreStore) -> Self {
        let best = match store.load_best() {
            Some(record) => {
                log::info!("Loaded best score {}", record.score);
                record.score
            }
            None => {
                log::info!("No best score found, starting fresh");
                0
            }
        };
        Self {
            best,
            displayed: 0,
            new_best: false,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Whether the run that just ended set a new best
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    /// Begin a fresh run: the display counter restarts from zero
    pub fn reset_run(&mut self) {
        self.displayed = 0;
        self.new_best = false;
    }

    /// Advance the visible counter by at most one per rendered frame until
    /// it catches up with the authoritative score
    pub fn step_display(&mut self, score: u32) -> u32 {
        if self.displayed < score {
            self.displayed += 1;
        }
        self.displayed
    }

    /// Compare a finished run against the record; persist on a strict
    /// improvement only
    pub fn on_session_end(&mut self, score: u32, store: &mut impl ScoreStore) {
        if score > self.best {
            self.best = score;
            self.new_best = true;
            store.save_best(score);
            log::info!("New best score: {}", score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        best: Option<BestScore>,
        saves: usize,
    }

    impl ScoreStore for MemoryStore {
        fn load_best(&self) -> Option<BestScore> {
            self.best.clone()
        }
        fn save_best(&mut self, score: u32) {
            self.best = Some(BestScore {
                score,
                achieved_at_ms: 0.0,
            });
            self.saves += 1;
        }
    }

    #[test]
    fn test_from_stored_json_envelope() {
        let record = BestScore::from_stored(r#"{"score":42,"achieved_at_ms":1000.0}"#).unwrap();
        assert_eq!(record.score, 42);
        assert_eq!(record.achieved_at_ms, 1000.0);
    }

    #[test]
    fn test_from_stored_legacy_bare_integer() {
        let record = BestScore::from_stored("17").unwrap();
        assert_eq!(record.score, 17);
        assert_eq!(record.achieved_at_ms, 0.0);
    }

    #[test]
    fn test_from_stored_garbage_is_none() {
        assert!(BestScore::from_stored("not a score").is_none());
        assert!(BestScore::from_stored("").is_none());
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let store = MemoryStore::default();
        let board = ScoreBoard::load(&store);
        assert_eq!(board.best(), 0);
        assert!(!board.is_new_best());
    }

    #[test]
    fn test_display_catches_up_one_per_frame() {
        let store = MemoryStore::default();
        let mut board = ScoreBoard::load(&store);

        assert_eq!(board.step_display(3), 1);
        assert_eq!(board.step_display(3), 2);
        assert_eq!(board.step_display(3), 3);
        // Never overshoots the authoritative score
        assert_eq!(board.step_display(3), 3);
    }

    #[test]
    fn test_best_updates_only_on_strict_improvement() {
        let mut store = MemoryStore {
            best: Some(BestScore {
                score: 10,
                achieved_at_ms: 0.0,
            }),
            saves: 0,
        };
        let mut board = ScoreBoard::load(&store);

        board.on_session_end(10, &mut store);
        assert_eq!(board.best(), 10);
        assert!(!board.is_new_best());
        assert_eq!(store.saves, 0);

        board.on_session_end(42, &mut store);
        assert_eq!(board.best(), 42);
        assert!(board.is_new_best());
        assert_eq!(store.saves, 1);
        assert_eq!(store.best.as_ref().unwrap().score, 42);
    }

    #[test]
    fn test_new_best_flag_clears_on_next_run() {
        let mut store = MemoryStore::default();
        let mut board = ScoreBoard::load(&store);

        board.on_session_end(5, &mut store);
        assert!(board.is_new_best());

        board.reset_run();
        assert!(!board.is_new_best());
        assert_eq!(board.best(), 5);
    }
}
