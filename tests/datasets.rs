// Dataset and odds invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use gacha_box::picker::pick_weighted;
use gacha_box::prize::DEFAULT_PRIZES;
use gacha_box::{GameConfig, Prize, PrizeTable, Rarity};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn default_prizes_are_unique_and_cover_every_rarity() {
    let mut seen = HashSet::new();
    for (text, _) in DEFAULT_PRIZES {
        assert!(!text.trim().is_empty(), "empty default prize text");
        assert!(seen.insert(*text), "duplicate default prize '{}'", text);
    }
    for r in Rarity::ALL {
        assert!(DEFAULT_PRIZES.iter().any(|(_, pr)| *pr == r), "no default prize of rarity {}", r);
    }
}

#[test]
fn defaults_sit_outside_the_user_range() {
    let cfg = GameConfig::default();
    assert!(DEFAULT_PRIZES.len() <= cfg.user_slots.start);
    let table = PrizeTable::with_defaults(&cfg);
    for slot in cfg.user_slots.clone() {
        assert!(table.get(slot).is_none(), "user slot {} pre-filled", slot);
    }
}

#[test]
fn weighted_draw_converges_to_rarity_weights() {
    // three prizes of each rarity
    let prizes: Vec<Prize> = Rarity::ALL
        .iter()
        .flat_map(|r| (0..3).map(move |i| Prize::text(&format!("{}-{}", r, i), *r)))
        .collect();
    let candidates: Vec<(usize, &Prize)> = prizes.iter().enumerate().collect();

    let draws = 200_000;
    let mut rng = StdRng::seed_from_u64(2024);
    let mut per_rarity = [0usize; 3];
    for _ in 0..draws {
        let (_, p) = pick_weighted(&candidates, &mut rng).unwrap();
        let idx = Rarity::ALL.iter().position(|r| *r == p.rarity).unwrap();
        per_rarity[idx] += 1;
    }

    let total_weight: f64 = prizes.iter().map(|p| p.rarity.weight()).sum();
    for (i, r) in Rarity::ALL.iter().enumerate() {
        let expected = 3.0 * r.weight() / total_weight;
        let observed = per_rarity[i] as f64 / draws as f64;
        assert!(
            (observed - expected).abs() < 0.01,
            "{}: observed {:.4}, expected {:.4}",
            r,
            observed,
            expected
        );
    }
    // uncommon outweighs rare: 30/48 vs 15/48
    assert!(per_rarity[1] > per_rarity[2]);
}

#[test]
fn every_candidate_is_reachable() {
    let prizes: Vec<Prize> = (0..6).map(|i| Prize::text(&i.to_string(), Rarity::Common)).collect();
    let candidates: Vec<(usize, &Prize)> = prizes.iter().enumerate().collect();
    let mut rng = StdRng::seed_from_u64(5);
    let mut hit = HashSet::new();
    for _ in 0..1_000 {
        hit.insert(pick_weighted(&candidates, &mut rng).unwrap().0);
    }
    assert_eq!(hit.len(), 6);
}
