//! Tunable game parameters.
//!
//! Prices, turn threshold, tap window, password and capsule palette. The
//! browser host can override any of them with a JSON blob passed to
//! `start_game_with_config`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::GachaError;

/// Three full crank revolutions.
pub const TURN_THRESHOLD_DEG: f64 = 1080.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Possible prices for a single turn; one is picked at random per turn.
    pub price_choices: Vec<u32>,
    /// Face values of the coins the player can take.
    pub denominations: Vec<u32>,
    pub turn_threshold_deg: f64,
    pub double_tap_ms: f64,
    pub open_delay_ms: u32,
    pub snap_back_ms: u32,
    pub prize_slots: usize,
    /// Slots the settings panel may edit. Slots outside this range hold the
    /// built-in defaults and are never persisted.
    pub user_slots: Range<usize>,
    pub settings_password: String,
    pub capsule_colors: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            price_choices: vec![5, 10, 15],
            denominations: vec![1, 5, 10],
            turn_threshold_deg: TURN_THRESHOLD_DEG,
            double_tap_ms: 300.0,
            open_delay_ms: 800,
            snap_back_ms: 300,
            prize_slots: 10,
            user_slots: 3..10,
            settings_password: "pitt".to_string(),
            capsule_colors: [
                "#a29bfe", "#74b9ff", "#55efc4", "#ff7675", "#fd79a8", "#ffeaa7", "#fab1a0",
                "#00cec9", "#6c5ce7",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override; absent fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, GachaError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GachaError> {
        if self.price_choices.is_empty() || self.price_choices.contains(&0) {
            return Err(GachaError::Config("price_choices must be non-empty and positive".into()));
        }
        if self.denominations.is_empty() || self.denominations.contains(&0) {
            return Err(GachaError::Config("denominations must be non-empty and positive".into()));
        }
        if !(self.turn_threshold_deg > 0.0) {
            return Err(GachaError::Config("turn_threshold_deg must be positive".into()));
        }
        if self.user_slots.start > self.user_slots.end || self.user_slots.end > self.prize_slots {
            return Err(GachaError::Config(format!(
                "user_slots {:?} does not fit in {} prize slots",
                self.user_slots, self.prize_slots
            )));
        }
        if self.capsule_colors.is_empty() {
            return Err(GachaError::Config("capsule_colors must not be empty".into()));
        }
        Ok(())
    }

    /// Smallest coin the player can take.
    pub fn smallest_denomination(&self) -> u32 {
        self.denominations.iter().copied().min().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.turn_threshold_deg, 1080.0);
        assert_eq!(cfg.user_slots, 3..10);
        assert_eq!(cfg.smallest_denomination(), 1);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"price_choices":[3,4,5],"settings_password":"x"}"#)
            .unwrap();
        assert_eq!(cfg.price_choices, vec![3, 4, 5]);
        assert_eq!(cfg.settings_password, "x");
        assert_eq!(cfg.denominations, vec![1, 5, 10]);
        assert_eq!(cfg.prize_slots, 10);
    }

    #[test]
    fn rejects_user_range_outside_table() {
        let err = GameConfig::from_json(r#"{"prize_slots":4,"user_slots":{"start":2,"end":6}}"#);
        assert!(matches!(err, Err(GachaError::Config(_))));
    }

    #[test]
    fn rejects_empty_prices() {
        let err = GameConfig::from_json(r#"{"price_choices":[]}"#);
        assert!(matches!(err, Err(GachaError::Config(_))));
    }
}
