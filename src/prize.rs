//! Prize table: positional slots, each optionally holding a prize.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];

    /// Relative draw weight.
    ///
    /// NOTE: `Uncommon` outweighs `Rare` (10 vs 5). This is what the game has
    /// always shipped with and players' odds depend on it; the labels look
    /// swapped but changing them would silently change the odds.
    pub fn weight(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 10.0,
            Rarity::Rare => 5.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
        }
    }

    pub fn parse(s: &str) -> Option<Rarity> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Some(Rarity::Common),
            "uncommon" => Some(Rarity::Uncommon),
            "rare" => Some(Rarity::Rare),
            _ => None,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `data:` URI of an uploaded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub rarity: Rarity,
}

impl Prize {
    pub fn text(text: &str, rarity: Rarity) -> Self {
        Self { text: Some(text.to_string()), image: None, rarity }
    }

    /// A prize is drawable when it has something to show.
    pub fn is_drawable(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty()) || self.image.is_some()
    }

    /// Key under which draws of this prize are counted in the stats.
    pub fn stats_key(&self, slot: usize) -> String {
        match self.text.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("#{}", slot + 1),
        }
    }
}

/// Built-in prizes seeded into the first slots on first run.
pub const DEFAULT_PRIZES: &[(&str, Rarity)] = &[
    ("爸爸親親", Rarity::Common),
    ("爸爸抱抱", Rarity::Uncommon),
    ("爸爸牽手手", Rarity::Rare),
];

/// Fixed-size table of prize slots. Identity is the slot index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrizeTable {
    slots: Vec<Option<Prize>>,
}

impl PrizeTable {
    pub fn empty(len: usize) -> Self {
        Self { slots: vec![None; len] }
    }

    /// Table seeded with [`DEFAULT_PRIZES`].
    pub fn with_defaults(cfg: &GameConfig) -> Self {
        let mut table = Self::empty(cfg.prize_slots);
        for (slot, (text, rarity)) in table.slots.iter_mut().zip(DEFAULT_PRIZES) {
            *slot = Some(Prize::text(text, *rarity));
        }
        table
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Prize> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    pub fn set(&mut self, idx: usize, prize: Option<Prize>) {
        if let Some(slot) = self.slots.get_mut(idx) {
            *slot = prize;
        }
    }

    pub fn slots(&self) -> &[Option<Prize>] {
        &self.slots
    }

    /// Drawable prizes paired with their slot index.
    pub fn candidates(&self) -> Vec<(usize, &Prize)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().filter(|p| p.is_drawable()).map(|p| (i, p)))
            .collect()
    }

    /// Copy of the user-editable slots, in order.
    pub fn user_slots(&self, cfg: &GameConfig) -> Vec<Option<Prize>> {
        let end = cfg.user_slots.end.min(self.slots.len());
        let start = cfg.user_slots.start.min(end);
        self.slots[start..end].to_vec()
    }

    /// Overlay persisted user slots onto the table. Entry `i` lands in slot
    /// `user_slots.start + i`; anything beyond the user range is dropped so
    /// stored data can never clobber the defaults.
    pub fn merge_user_slots(&mut self, cfg: &GameConfig, stored: Vec<Option<Prize>>) {
        for (offset, prize) in stored.into_iter().enumerate() {
            let idx = cfg.user_slots.start + offset;
            if !cfg.user_slots.contains(&idx) || idx >= self.slots.len() {
                break;
            }
            self.slots[idx] = prize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_keep_shipped_values() {
        assert_eq!(Rarity::Common.weight(), 1.0);
        assert_eq!(Rarity::Uncommon.weight(), 10.0);
        assert_eq!(Rarity::Rare.weight(), 5.0);
    }

    #[test]
    fn rarity_round_trips_as_lowercase() {
        let json = serde_json::to_string(&Rarity::Uncommon).unwrap();
        assert_eq!(json, "\"uncommon\"");
        assert_eq!(Rarity::parse(" RARE "), Some(Rarity::Rare));
        assert_eq!(Rarity::parse("legendary"), None);
    }

    #[test]
    fn prize_without_rarity_defaults_to_common() {
        let p: Prize = serde_json::from_str(r#"{"text":"hug"}"#).unwrap();
        assert_eq!(p.rarity, Rarity::Common);
        assert!(p.image.is_none());
    }

    #[test]
    fn stats_key_falls_back_to_slot_number() {
        let img_only = Prize { text: None, image: Some("data:image/png;base64,AA==".into()), rarity: Rarity::Rare };
        assert_eq!(img_only.stats_key(4), "#5");
        assert_eq!(Prize::text("  kiss ", Rarity::Common).stats_key(0), "kiss");
        assert!(img_only.is_drawable());
        assert!(!Prize::text("   ", Rarity::Common).is_drawable());
    }

    #[test]
    fn defaults_fill_leading_slots() {
        let cfg = GameConfig::default();
        let table = PrizeTable::with_defaults(&cfg);
        assert_eq!(table.len(), 10);
        assert_eq!(table.candidates().len(), 3);
        assert_eq!(table.get(1).unwrap().rarity, Rarity::Uncommon);
        assert!(table.get(3).is_none());
    }

    #[test]
    fn merge_only_touches_user_range() {
        let cfg = GameConfig::default();
        let mut table = PrizeTable::with_defaults(&cfg);
        let mut stored = vec![None; 9];
        stored[0] = Some(Prize::text("ice cream", Rarity::Rare));
        stored[8] = Some(Prize::text("overflow", Rarity::Rare));
        table.merge_user_slots(&cfg, stored);
        assert_eq!(table.get(3).and_then(|p| p.text.as_deref()), Some("ice cream"));
        assert_eq!(table.get(0).and_then(|p| p.text.as_deref()), Some("爸爸親親"));
        assert_eq!(table.len(), 10);
        assert!(table.slots().iter().flatten().all(|p| p.text.as_deref() != Some("overflow")));
    }
}
