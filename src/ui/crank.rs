use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlElement};

use super::{Elements, GameUi, centre_of, listen, listen_active, pointer_xy, with_game};
use crate::crank::{CrankMove, CrankRelease, pointer_angle};

pub(crate) fn set_rotation(handle_container: &HtmlElement, deg: f64) {
    let _ = handle_container
        .style()
        .set_property("transform", &format!("translateX(-50%) rotate({}deg)", deg));
}

fn shake_decorations(doc: &Document, on: bool) {
    let Ok(list) = doc.query_selector_all(".deco-capsule") else { return };
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
            let _ = if on {
                el.class_list().add_1("shake-animation")
            } else {
                el.class_list().remove_1("shake-animation")
            };
        }
    }
}

fn handle_angle(g: &GameUi, evt: &Event) -> Option<f64> {
    let (x, y) = pointer_xy(evt)?;
    let (cx, cy) = centre_of(&g.els.handle);
    Some(pointer_angle(cx, cy, x, y))
}

pub(crate) fn install(doc: &Document, els: &Elements) -> Result<(), JsValue> {
    let handle: EventTarget = els.handle.clone().into();
    for ev in ["mousedown", "touchstart"] {
        listen_active(&handle, ev, |evt: Event| {
            with_game(|g| grab(g, &evt));
        })?;
    }
    let target: EventTarget = doc.clone().into();
    for ev in ["mousemove", "touchmove"] {
        listen_active(&target, ev, |evt: Event| {
            with_game(|g| turn(g, &evt));
        })?;
    }
    for ev in ["mouseup", "touchend"] {
        listen(&target, ev, |_evt: Event| {
            with_game(release);
        })?;
    }
    Ok(())
}

fn grab(g: &mut GameUi, evt: &Event) {
    let Some(angle) = handle_angle(g, evt) else { return };
    if !g.session.grab_handle(angle) {
        return;
    }
    evt.prevent_default();
    shake_decorations(&g.doc, true);
}

fn turn(g: &mut GameUi, evt: &Event) {
    if !g.session.crank().is_turning() {
        return;
    }
    evt.prevent_default();
    let Some(angle) = handle_angle(g, evt) else { return };
    match g.session.turn_handle(angle) {
        CrankMove::Ignored => {}
        CrankMove::Rotated { rotation } => set_rotation(&g.els.handle_container, rotation),
        CrankMove::Dispense { rotation } => {
            set_rotation(&g.els.handle_container, rotation);
            shake_decorations(&g.doc, false);
            let _ = g.els.handle_container.class_list().add_1("disabled");
            if let Err(e) = super::capsule::drop_capsule(g) {
                warn!("could not drop capsule: {:?}", e);
            }
        }
    }
}

fn release(g: &mut GameUi) {
    if g.session.release_handle() != CrankRelease::SnapBack {
        return;
    }
    shake_decorations(&g.doc, false);
    let container = g.els.handle_container.clone();
    let _ = container.style().set_property("transition", "transform 0.3s ease-out");
    set_rotation(&container, 0.0);
    Timeout::new(g.session.config().snap_back_ms, move || {
        let _ = container.style().set_property("transition", "none");
    })
    .forget();
}
