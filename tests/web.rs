// Browser tests: localStorage-backed store and game start-up.
// Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use gacha_box::storage::{KEY_STATS, KeyValueStore, LocalStorage, Persistence};
use gacha_box::{GameConfig, PrizeTable, Stats};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_storage() -> LocalStorage {
    let mut store = LocalStorage::open().unwrap();
    for key in ["gachaUserPrizes", "gachaStats", "gachaPrizes", "gachaPrizeTexts"] {
        store.remove_item(key).unwrap();
    }
    store
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let mut store = fresh_storage();
    store.set_item("gachaTest", "1").unwrap();
    assert_eq!(store.get_item("gachaTest").unwrap().as_deref(), Some("1"));
    store.remove_item("gachaTest").unwrap();
    assert!(store.get_item("gachaTest").unwrap().is_none());
}

#[wasm_bindgen_test]
fn stats_persist_in_local_storage() {
    let mut p = Persistence::new(fresh_storage());
    let mut stats = Stats::default();
    stats.record_play(Some("爸爸抱抱"), 10);
    p.save_stats(&stats).unwrap();
    assert!(p.store().get_item(KEY_STATS).unwrap().is_some());
    assert_eq!(p.load_stats().unwrap(), stats);
}

#[wasm_bindgen_test]
fn empty_local_storage_loads_defaults() {
    let cfg = GameConfig::default();
    let mut p = Persistence::new(fresh_storage());
    assert_eq!(p.load_table(&cfg).unwrap(), PrizeTable::with_defaults(&cfg));
}

#[wasm_bindgen_test]
fn game_starts_on_a_blank_page_and_renders_stats() {
    fresh_storage();
    gacha_box::start_game().unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    assert!(doc.get_element_by_id("gacha-machine").is_some());
    assert_eq!(doc.query_selector_all(".coin-btn").unwrap().length(), 3);

    let stats_btn: web_sys::HtmlElement = doc.get_element_by_id("stats-btn").unwrap().dyn_into().unwrap();
    stats_btn.click();
    let body = doc.get_element_by_id("stats-body").unwrap();
    assert!(body.child_element_count() >= 3);
    assert!(body.text_content().unwrap().contains("還沒有紀錄"));
}
