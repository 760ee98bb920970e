//! Browser front end.
//!
//! Wires DOM events to a single [`GachaSession`] held in a thread-local.
//! Element ids are the contract with the host page; when the page does not
//! provide the machine markup, a default layout is injected.

use std::cell::RefCell;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, window};

use crate::config::GameConfig;
use crate::error::GachaError;
use crate::session::GachaSession;
use crate::storage::{KeyValueStore, LocalStorage, MemoryStore};

mod capsule;
mod coins;
mod crank;
mod layout;
mod settings;
mod stats;

pub(crate) type Session = GachaSession<Box<dyn KeyValueStore>, SmallRng>;

/// Handles to the fixed elements the game talks to.
pub(crate) struct Elements {
    pub coin_buttons: HtmlElement,
    pub coin_area: HtmlElement,
    pub coin_slot: HtmlElement,
    pub machine: HtmlElement,
    pub handle_container: HtmlElement,
    pub handle: HtmlElement,
    pub capsule_exit: HtmlElement,
    pub capsule_tray: HtmlElement,
    pub prize_display: HtmlElement,
    pub required_display: HtmlElement,
    pub settings_btn: HtmlElement,
    pub password_modal: HtmlElement,
    pub password_input: web_sys::HtmlInputElement,
    pub password_submit: HtmlElement,
    pub settings_panel: HtmlElement,
    pub settings_form: HtmlElement,
    pub save_settings_btn: HtmlElement,
    pub stats_btn: HtmlElement,
    pub stats_modal: HtmlElement,
    pub stats_body: HtmlElement,
    pub reset_stats_btn: HtmlElement,
}

impl Elements {
    fn lookup(doc: &Document) -> Result<Self, GachaError> {
        Ok(Self {
            coin_buttons: by_id(doc, "get-coin-btn")?,
            coin_area: by_id(doc, "coin-area")?,
            coin_slot: by_id(doc, "coin-slot")?,
            machine: by_id(doc, "gacha-machine")?,
            handle_container: by_id(doc, "handle-container")?,
            handle: by_id(doc, "handle")?,
            capsule_exit: by_id(doc, "capsule-exit")?,
            capsule_tray: by_id(doc, "capsule-tray")?,
            prize_display: by_id(doc, "prize-display")?,
            required_display: by_id(doc, "required-coins-display")?,
            settings_btn: by_id(doc, "settings-btn")?,
            password_modal: by_id(doc, "password-modal")?,
            password_input: by_id(doc, "password-input")?,
            password_submit: by_id(doc, "password-submit")?,
            settings_panel: by_id(doc, "settings-panel")?,
            settings_form: by_id(doc, "settings-form")?,
            save_settings_btn: by_id(doc, "save-settings-btn")?,
            stats_btn: by_id(doc, "stats-btn")?,
            stats_modal: by_id(doc, "stats-modal")?,
            stats_body: by_id(doc, "stats-body")?,
            reset_stats_btn: by_id(doc, "reset-stats-btn")?,
        })
    }
}

/// Everything the event handlers share.
pub(crate) struct GameUi {
    pub doc: Document,
    pub els: Elements,
    pub session: Session,
    pub coin_drag: Option<coins::CoinDrag>,
    pub draft: Option<crate::settings::SettingsDraft>,
}

thread_local! {
    static GAME: RefCell<Option<GameUi>> = const { RefCell::new(None) };
}

/// Run `f` against the live game, if started. Never call re-entrantly.
pub(crate) fn with_game<T>(f: impl FnOnce(&mut GameUi) -> T) -> Option<T> {
    GAME.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub fn start(cfg: GameConfig) -> Result<(), JsValue> {
    cfg.validate()?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    layout::ensure_layout(&doc)?;
    let els = Elements::lookup(&doc)?;

    let store: Box<dyn KeyValueStore> = match LocalStorage::open() {
        Ok(s) => Box::new(s),
        Err(e) => {
            warn!("{}; progress will not be saved", e);
            Box::new(MemoryStore::new())
        }
    };
    let session = GachaSession::new(cfg, store, SmallRng::from_entropy());

    coins::render_coin_buttons(&doc, &els, session.config())?;

    // handlers only touch the state when they fire, so wiring comes first
    coins::install(&doc, &els)?;
    crank::install(&doc, &els)?;
    settings::install(&els)?;
    stats::install(&els)?;
    install_close_buttons(&doc)?;

    GAME.with(|cell| {
        cell.replace(Some(GameUi { doc: doc.clone(), els, session, coin_drag: None, draft: None }))
    });

    with_game(refresh_turn_display);
    info!("gacha machine ready");
    Ok(())
}

/// Reset the machine visuals for the session's current turn.
pub(crate) fn refresh_turn_display(game: &mut GameUi) {
    let purse = game.session.purse();
    game.els.required_display.set_text_content(Some(&purse.required().to_string()));
    let classes = game.els.required_display.class_list();
    if purse.is_paid() {
        let _ = classes.add_1("ready");
    } else {
        let _ = classes.remove_1("ready");
    }
    let handle_classes = game.els.handle_container.class_list();
    if game.session.crank().is_enabled() {
        let _ = handle_classes.remove_1("disabled");
    } else {
        let _ = handle_classes.add_1("disabled");
    }
    crank::set_rotation(&game.els.handle_container, game.session.crank().rotation());
}

fn install_close_buttons(doc: &Document) -> Result<(), JsValue> {
    let buttons = doc.query_selector_all(".close-btn")?;
    for i in 0..buttons.length() {
        let Some(node) = buttons.item(i) else { continue };
        let target: EventTarget = node.dyn_into()?;
        listen(&target, "click", |_evt: Event| {
            with_game(|g| {
                hide(&g.els.password_modal);
                hide(&g.els.settings_panel);
                hide(&g.els.stats_modal);
                g.draft = None;
            });
        })?;
    }
    Ok(())
}

// --- small DOM helpers ------------------------------------------------------

pub(crate) fn by_id<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, GachaError> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or(GachaError::MissingElement(id))
}

pub(crate) fn create<T: JsCast>(doc: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.dyn_into::<T>().map_err(|_| JsValue::from_str("unexpected element type"))
}

pub(crate) fn show(el: &HtmlElement) {
    let _ = el.class_list().remove_1("hidden");
}

pub(crate) fn hide(el: &HtmlElement) {
    let _ = el.class_list().add_1("hidden");
}

pub(crate) fn alert(msg: &str) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(msg);
    }
}

pub(crate) fn confirm(msg: &str) -> bool {
    window().and_then(|w| w.confirm_with_message(msg).ok()).unwrap_or(false)
}

/// Attach a permanent listener.
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`] but non-passive, so touch handlers may `preventDefault`.
pub(crate) fn listen_active<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(false);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    )?;
    closure.forget();
    Ok(())
}

/// Client coordinates of a mouse event or the first touch of a touch event.
pub(crate) fn pointer_xy(evt: &Event) -> Option<(f64, f64)> {
    if evt.type_().starts_with("touch") {
        let te: &web_sys::TouchEvent = evt.unchecked_ref();
        let t = te.touches().get(0).or_else(|| te.changed_touches().get(0))?;
        Some((t.client_x() as f64, t.client_y() as f64))
    } else {
        let me = evt.dyn_ref::<web_sys::MouseEvent>()?;
        Some((me.client_x() as f64, me.client_y() as f64))
    }
}

/// Centre of an element's bounding box in client coordinates.
pub(crate) fn centre_of(el: &Element) -> (f64, f64) {
    let r = el.get_bounding_client_rect();
    (r.left() + r.width() / 2.0, r.top() + r.height() / 2.0)
}

pub(crate) fn overlaps(a: &Element, b: &Element) -> bool {
    let a = a.get_bounding_client_rect();
    let b = b.get_bounding_client_rect();
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
