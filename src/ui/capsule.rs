//! Capsule drop, double-tap opening and the prize reveal.

use gloo_timers::callback::Timeout;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement};

use super::{GameUi, create, listen, listen_active, with_game};
use crate::capsule::{DoubleTap, pick_color};
use crate::session::DrawnPrize;

pub(crate) fn drop_capsule(g: &mut GameUi) -> Result<(), JsValue> {
    let capsule: HtmlElement = create(&g.doc, "div", "capsule")?;
    let palette = g.session.config().capsule_colors.clone();
    let colour = pick_color(&palette, g.session.rng()).to_string();
    let exit = g.els.capsule_exit.get_bounding_client_rect();
    let tray = g.els.capsule_tray.get_bounding_client_rect();
    let style = capsule.style();
    style.set_property("background", &colour)?;
    style.set_property("left", &format!("{}px", exit.left() + exit.width() / 2.0 - 30.0))?;
    style.set_property("top", &format!("{}px", exit.top()))?;
    if let Some(body) = g.doc.body() {
        body.append_child(&capsule)?;
    }
    capsule.class_list().add_1("capsule-drop")?;
    style.set_property("transform", &format!("translateY({}px)", tray.top() - exit.top() + 5.0))?;

    let landed = capsule.clone();
    let target: EventTarget = capsule.into();
    let mut armed = false;
    let tap_window = g.session.config().double_tap_ms;
    listen(&target, "animationend", move |_evt: Event| {
        if armed {
            return;
        }
        armed = true;
        if let Err(e) = add_open_listeners(&landed, tap_window) {
            warn!("capsule listeners failed: {:?}", e);
        }
    })?;
    Ok(())
}

fn add_open_listeners(capsule: &HtmlElement, tap_window: f64) -> Result<(), JsValue> {
    let target: EventTarget = capsule.clone().into();
    {
        let capsule = capsule.clone();
        listen(&target, "dblclick", move |evt: Event| open(&capsule, &evt))?;
    }
    {
        let capsule = capsule.clone();
        let mut taps = DoubleTap::new(tap_window);
        listen_active(&target, "touchend", move |evt: Event| {
            if taps.tap(crate::performance_now()) {
                open(&capsule, &evt);
            }
        })?;
    }
    Ok(())
}

fn open(capsule: &HtmlElement, evt: &Event) {
    evt.prevent_default();
    // the same capsule can only be opened once
    if capsule.class_list().contains("opening") {
        return;
    }
    let delay = with_game(|g| {
        let _ = g.els.machine.class_list().add_1("faded");
        let _ = g.els.coin_buttons.style().set_property("display", "none");
        g.session.config().open_delay_ms
    });
    let Some(delay) = delay else { return };
    let _ = capsule.class_list().add_1("opening");

    let capsule = capsule.clone();
    Timeout::new(delay, move || {
        with_game(|g| {
            if let Some(drawn) = g.session.open_capsule() {
                if let Err(e) = show_prize(g, drawn.as_ref()) {
                    warn!("could not show prize: {:?}", e);
                }
            }
        });
        capsule.remove();
    })
    .forget();
}

fn show_prize(g: &mut GameUi, drawn: Option<&DrawnPrize>) -> Result<(), JsValue> {
    let display = &g.els.prize_display;
    display.set_inner_html("");

    let title: HtmlElement = create(&g.doc, "h3", "")?;
    title.set_text_content(Some("恭喜獲得"));
    display.append_child(&title)?;

    match drawn {
        None => {
            let empty: HtmlElement = create(&g.doc, "div", "prize-text")?;
            empty.set_text_content(Some("沒有獎品了！"));
            display.append_child(&empty)?;
        }
        Some(d) => {
            info!("prize drawn from slot {} ({})", d.slot, d.prize.rarity);
            if let Some(src) = &d.prize.image {
                let img: HtmlElement = create(&g.doc, "img", "")?;
                img.set_attribute("src", src)?;
                display.append_child(&img)?;
            }
            if let Some(text) = d.prize.text.as_deref().filter(|t| !t.is_empty()) {
                let label: HtmlElement = create(&g.doc, "div", "prize-text")?;
                label.set_text_content(Some(text));
                display.append_child(&label)?;
            }
            let badge: HtmlElement = create(&g.doc, "div", &format!("prize-rarity {}", d.prize.rarity))?;
            badge.set_text_content(Some(d.prize.rarity.as_str()));
            display.append_child(&badge)?;
        }
    }

    let again: HtmlElement = create(&g.doc, "button", "")?;
    again.set_id("play-again-btn");
    again.set_text_content(Some("再來一次"));
    display.append_child(&again)?;
    let target: EventTarget = again.into();
    listen(&target, "click", |_evt: Event| {
        with_game(play_again);
    })?;

    display.style().set_property("display", "flex")?;
    Ok(())
}

fn play_again(g: &mut GameUi) {
    let _ = g.els.prize_display.style().set_property("display", "none");
    let _ = g.els.machine.class_list().remove_1("faded");
    let _ = g.els.coin_buttons.style().remove_property("display");
    g.session.start_new_turn();
    super::refresh_turn_display(g);
}
