//! Remote leaderboard model
//!
//! Entries arrive best-first from the score service. Ranks are 1-indexed.

use serde::{Deserialize, Serialize};

/// A single leaderboard row as served by `GET /leaderboard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub wallet_address: String,
    pub score: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from entries in any order; ties keep their original order
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Rank a score would take if it were added now (ties rank below)
    pub fn potential_rank(&self, score: u64) -> usize {
        let rank = self.entries.iter().position(|e| score > e.score);
        rank.unwrap_or(self.entries.len()) + 1
    }

    /// Best rank held by a wallet, if it is on the board
    pub fn rank_of(&self, wallet: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.wallet_address == wallet)
            .map(|i| i + 1)
    }

    /// Display lines, `"{rank}. {wallet} - {score}"`
    pub fn render_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {} - {}", i + 1, e.wallet_address, e.score))
            .collect()
    }
}

/// Shorten a wallet address for display: first 6 and last 4 characters
pub fn short_wallet(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
