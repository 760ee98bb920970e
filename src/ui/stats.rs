use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget};

use super::{Elements, GameUi, alert, confirm, create, listen, show, with_game};

const RESET_CONFIRM_MSG: &str = "確定要重設統計資料嗎？";

pub(crate) fn install(els: &Elements) -> Result<(), JsValue> {
    let open: EventTarget = els.stats_btn.clone().into();
    listen(&open, "click", |_evt: Event| {
        with_game(|g| {
            if let Err(e) = render(g) {
                warn!("could not render stats: {:?}", e);
            }
            show(&g.els.stats_modal);
        });
    })?;

    let reset: EventTarget = els.reset_stats_btn.clone().into();
    listen(&reset, "click", |_evt: Event| {
        if !confirm(RESET_CONFIRM_MSG) {
            return;
        }
        with_game(|g| {
            if let Err(e) = g.session.reset_stats() {
                alert(&e.to_string());
            }
            if let Err(e) = render(g) {
                warn!("could not render stats: {:?}", e);
            }
        });
    })?;
    Ok(())
}

fn line(doc: &Document, label: &str, value: &str) -> Result<Element, JsValue> {
    let row: Element = create(doc, "div", "stats-row")?;
    let l: Element = create(doc, "span", "stats-label")?;
    l.set_text_content(Some(label));
    let v: Element = create(doc, "span", "stats-value")?;
    v.set_text_content(Some(value));
    row.append_child(&l)?;
    row.append_child(&v)?;
    Ok(row)
}

fn render(g: &GameUi) -> Result<(), JsValue> {
    let stats = g.session.stats();
    let body = &g.els.stats_body;
    body.set_inner_html("");
    let played = line(&g.doc, "遊玩次數", &stats.times_played.to_string())?;
    body.append_child(&played)?;
    let spent = line(&g.doc, "花費硬幣", &stats.coins_spent.to_string())?;
    body.append_child(&spent)?;

    let heading: Element = create(&g.doc, "h4", "")?;
    heading.set_text_content(Some("獎品紀錄"));
    body.append_child(&heading)?;
    let ranked = stats.ranked();
    if ranked.is_empty() {
        let empty: Element = create(&g.doc, "div", "stats-empty")?;
        empty.set_text_content(Some("還沒有紀錄"));
        body.append_child(&empty)?;
    }
    for (key, count) in ranked {
        let row = line(&g.doc, key, &count.to_string())?;
        body.append_child(&row)?;
    }
    Ok(())
}
