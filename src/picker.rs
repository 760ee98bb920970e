//! Rarity-weighted prize selection.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::prize::Prize;

/// Pick one candidate with probability proportional to its rarity weight.
///
/// Draws `r` uniformly in `[0, total)` and walks the candidates subtracting
/// each weight until `r <= 0`. If rounding leaves `r` positive after the last
/// entry, falls back to a uniform pick. Returns `None` only for an empty list.
pub fn pick_weighted<'a, R: Rng + ?Sized>(
    candidates: &[(usize, &'a Prize)],
    rng: &mut R,
) -> Option<(usize, &'a Prize)> {
    if candidates.is_empty() {
        return None;
    }
    let total: f64 = candidates.iter().map(|(_, p)| p.rarity.weight()).sum();
    if total > 0.0 {
        let mut r = rng.gen_range(0.0..total);
        for &(idx, prize) in candidates {
            r -= prize.rarity.weight();
            if r <= 0.0 {
                return Some((idx, prize));
            }
        }
    }
    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::Rarity;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    #[test]
    fn empty_list_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_weighted(&[], &mut rng).is_none());
    }

    #[test]
    fn single_candidate_always_wins() {
        let p = Prize::text("only", Rarity::Common);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(pick_weighted(&[(4, &p)], &mut rng).map(|(i, _)| i), Some(4));
        }
    }

    #[test]
    fn zero_draw_lands_on_first_entry() {
        let a = Prize::text("a", Rarity::Rare);
        let b = Prize::text("b", Rarity::Uncommon);
        // StepRng(0, 0) always yields zero, i.e. the bottom of the range.
        let mut rng = StepRng::new(0, 0);
        let (idx, _) = pick_weighted(&[(0, &a), (1, &b)], &mut rng).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn heavier_rarity_is_drawn_more_often() {
        let common = Prize::text("c", Rarity::Common);
        let uncommon = Prize::text("u", Rarity::Uncommon);
        let cands = [(0, &common), (1, &uncommon)];
        let mut rng = StdRng::seed_from_u64(42);
        let hits = (0..5_000)
            .filter(|_| pick_weighted(&cands, &mut rng).map(|(i, _)| i) == Some(1))
            .count();
        // expected 10/11 of draws
        assert!(hits > 4_300, "uncommon drawn only {hits} times");
    }
}
