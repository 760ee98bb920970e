//! Cumulative play statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub times_played: u64,
    pub coins_spent: u64,
    pub prize_counts: BTreeMap<String, u64>,
}

impl Stats {
    pub fn record_play(&mut self, prize_key: Option<&str>, coins: u32) {
        self.times_played += 1;
        self.coins_spent += u64::from(coins);
        if let Some(key) = prize_key {
            *self.prize_counts.entry(key.to_string()).or_insert(0) += 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Stats::default();
    }

    /// Prize counts ordered most-drawn first, ties by key.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> =
            self.prize_counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_ranks() {
        let mut s = Stats::default();
        s.record_play(Some("hug"), 5);
        s.record_play(Some("kiss"), 10);
        s.record_play(Some("kiss"), 10);
        s.record_play(None, 5);
        assert_eq!(s.times_played, 4);
        assert_eq!(s.coins_spent, 30);
        assert_eq!(s.ranked(), vec![("kiss", 2), ("hug", 1)]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = Stats::default();
        s.record_play(Some("hug"), 5);
        s.reset();
        assert_eq!(s.times_played, 0);
        assert_eq!(s.coins_spent, 0);
        assert!(s.prize_counts.is_empty());
    }

    #[test]
    fn uses_camel_case_keys() {
        let mut s = Stats::default();
        s.record_play(Some("hug"), 5);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"timesPlayed":1,"coinsSpent":5,"prizeCounts":{"hug":1}}"#);
        let partial: Stats = serde_json::from_str(r#"{"timesPlayed":3}"#).unwrap();
        assert_eq!(partial.times_played, 3);
        assert!(partial.prize_counts.is_empty());
    }
}
