//! Coin buttons, coin elements and drag & drop into the slot.

use log::{debug, warn};
use rand::Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlElement};

use super::{Elements, GameUi, alert, create, listen, listen_active, overlaps, pointer_xy, with_game};
use crate::coins::Deposit;
use crate::config::GameConfig;
use crate::error::GachaError;

const COIN_SIZE: f64 = 90.0;
const NO_ROOM_MSG: &str = "場上的硬幣夠多了，先把硬幣投進去吧！";

/// Coin currently held by the pointer.
pub(crate) struct CoinDrag {
    el: HtmlElement,
    value: u32,
    offset_x: f64,
    offset_y: f64,
}

/// One button per denomination inside `#get-coin-btn`.
pub(crate) fn render_coin_buttons(doc: &Document, els: &Elements, cfg: &GameConfig) -> Result<(), JsValue> {
    els.coin_buttons.set_inner_html("");
    for &value in &cfg.denominations {
        let btn: HtmlElement = create(doc, "button", "coin-btn")?;
        btn.set_attribute("type", "button")?;
        btn.set_attribute("data-value", &value.to_string())?;
        btn.set_text_content(Some(&format!("跟爸爸拿 {} 元", value)));
        els.coin_buttons.append_child(&btn)?;
    }
    Ok(())
}

pub(crate) fn install(doc: &Document, els: &Elements) -> Result<(), JsValue> {
    let buttons: EventTarget = els.coin_buttons.clone().into();
    listen(&buttons, "click", |evt: Event| {
        let Some(value) = evt
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(".coin-btn").ok().flatten())
            .and_then(|btn| btn.get_attribute("data-value"))
            .and_then(|v| v.parse::<u32>().ok())
        else {
            return;
        };
        with_game(|g| {
            if let Err(e) = spawn_coin(g, value) {
                if let GachaError::NoRoomForCoin { .. } = e {
                    alert(NO_ROOM_MSG);
                } else {
                    warn!("could not create coin: {}", e);
                }
            }
        });
    })?;

    // one delegated grab listener for every coin, present or future
    let target: EventTarget = doc.clone().into();
    for ev in ["mousedown", "touchstart"] {
        listen_active(&target, ev, |evt: Event| {
            with_game(|g| grab_coin(g, &evt));
        })?;
    }
    for ev in ["mousemove", "touchmove"] {
        listen_active(&target, ev, |evt: Event| {
            with_game(|g| drag_coin(g, &evt));
        })?;
    }
    for ev in ["mouseup", "touchend"] {
        listen(&target, ev, |_evt: Event| {
            with_game(drop_coin);
        })?;
    }
    Ok(())
}

fn spawn_coin(g: &mut GameUi, value: u32) -> Result<(), GachaError> {
    g.session.take_coin(value)?;

    let coin: HtmlElement = create(&g.doc, "div", "coin")?;
    coin.set_attribute("data-value", &value.to_string())?;
    coin.set_text_content(Some(&value.to_string()));
    let area = g.els.coin_area.get_bounding_client_rect();
    let rng = g.session.rng();
    let top = area.top() + rng.gen_range(0.0..1.0) * (area.height() - COIN_SIZE).max(0.0);
    let left = area.left() + rng.gen_range(0.0..1.0) * (area.width() - COIN_SIZE).max(0.0);
    let style = coin.style();
    style.set_property("top", &format!("{}px", top))?;
    style.set_property("left", &format!("{}px", left))?;
    if let Some(body) = g.doc.body() {
        body.append_child(&coin)?;
    }
    debug!("coin {} on the field", value);
    Ok(())
}

fn grab_coin(g: &mut GameUi, evt: &Event) {
    let Some(coin) = evt
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(".coin").ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let Some(value) = coin.get_attribute("data-value").and_then(|v| v.parse::<u32>().ok()) else {
        return;
    };
    let Some((x, y)) = pointer_xy(evt) else { return };
    evt.prevent_default();
    let rect = coin.get_bounding_client_rect();
    let style = coin.style();
    let _ = style.set_property("cursor", "grabbing");
    let _ = style.set_property("z-index", "1000");
    g.coin_drag = Some(CoinDrag { el: coin, value, offset_x: x - rect.left(), offset_y: y - rect.top() });
}

fn drag_coin(g: &mut GameUi, evt: &Event) {
    let Some(drag) = g.coin_drag.as_ref() else { return };
    evt.prevent_default();
    let Some((x, y)) = pointer_xy(evt) else { return };
    let style = drag.el.style();
    let _ = style.set_property("left", &format!("{}px", x - drag.offset_x));
    let _ = style.set_property("top", &format!("{}px", y - drag.offset_y));
}

fn drop_coin(g: &mut GameUi) {
    let Some(drag) = g.coin_drag.take() else { return };
    let _ = drag.el.style().set_property("cursor", "grab");
    if !overlaps(&drag.el, &g.els.coin_slot) {
        return;
    }
    match g.session.insert_coin(drag.value) {
        Deposit::Rejected => {}
        Deposit::Accepted { .. } | Deposit::Paid => {
            drag.el.remove();
            super::refresh_turn_display(g);
        }
    }
}
