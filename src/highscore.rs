//! Session high score
//!
//! Kept in memory only; a page reload starts from zero.

use serde::{Deserialize, Serialize};

/// Best score seen this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
    /// Finished runs this session
    runs: u32,
}

impl HighScore {
    /// Start with no score recorded
    pub fn new() -> Self {
        Self { best: 0, runs: 0 }
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Fold a finished run into the record.
    /// Returns true if the score is a new best.
    pub fn record(&mut self, score: u64) -> bool {
        self.runs += 1;
        if self.qualifies(score) {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_raises() {
        let mut hs = HighScore::new();
        assert!(hs.record(120));
        assert!(!hs.record(80));
        assert!(!hs.record(120));
        assert!(hs.record(121));
        assert_eq!(hs.best(), 121);
        assert_eq!(hs.runs(), 4);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut hs = HighScore::new();
        assert!(!hs.qualifies(0));
        assert!(!hs.record(0));
        assert_eq!(hs.best(), 0);
    }
}
