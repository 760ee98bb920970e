//! Capsule helpers: colour choice and double-tap detection.

use rand::Rng;
use rand::seq::SliceRandom;

/// Touch screens have no dblclick; two taps inside `window_ms` count as one.
#[derive(Clone, Debug)]
pub struct DoubleTap {
    window_ms: f64,
    last_tap: Option<f64>,
}

impl DoubleTap {
    pub fn new(window_ms: f64) -> Self {
        Self { window_ms, last_tap: None }
    }

    /// Register a tap at `now_ms`. True when it completes a double tap.
    pub fn tap(&mut self, now_ms: f64) -> bool {
        let hit = self.last_tap.is_some_and(|prev| now_ms - prev < self.window_ms);
        self.last_tap = if hit { None } else { Some(now_ms) };
        hit
    }
}

pub fn pick_color<'a, R: Rng + ?Sized>(palette: &'a [String], rng: &mut R) -> &'a str {
    palette.choose(rng).map(String::as_str).unwrap_or("#a29bfe")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn double_tap_within_window() {
        let mut t = DoubleTap::new(300.0);
        assert!(!t.tap(1_000.0));
        assert!(t.tap(1_250.0));
        // consumed; the next tap starts a new pair
        assert!(!t.tap(1_400.0));
    }

    #[test]
    fn slow_taps_do_not_open() {
        let mut t = DoubleTap::new(300.0);
        assert!(!t.tap(0.0));
        assert!(!t.tap(300.0));
        assert!(!t.tap(700.0));
        assert!(t.tap(900.0));
    }

    #[test]
    fn colour_comes_from_palette() {
        let palette = vec!["#111".to_string(), "#222".to_string()];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let c = pick_color(&palette, &mut rng);
            assert!(c == "#111" || c == "#222");
        }
        assert_eq!(pick_color(&[], &mut rng), "#a29bfe");
    }
}
