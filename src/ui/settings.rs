//! Password modal and the prize settings form.

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, File, HtmlElement, HtmlInputElement, HtmlSelectElement};

use super::{Elements, GameUi, alert, create, hide, listen, show, with_game};
use crate::error::GachaError;
use crate::prize::{Prize, Rarity};
use crate::settings::{SettingsDraft, data_uri};

const WRONG_PASSWORD_MSG: &str = "密碼錯誤！";
const SAVED_MSG: &str = "設定已儲存！";

pub(crate) fn install(els: &Elements) -> Result<(), JsValue> {
    let settings_btn: EventTarget = els.settings_btn.clone().into();
    listen(&settings_btn, "click", |_evt: Event| {
        with_game(|g| show(&g.els.password_modal));
    })?;

    let submit: EventTarget = els.password_submit.clone().into();
    listen(&submit, "click", |_evt: Event| {
        with_game(submit_password);
    })?;

    let form: EventTarget = els.settings_form.clone().into();
    listen(&form, "click", |evt: Event| {
        with_game(|g| on_form_click(g, &evt));
    })?;
    listen(&form, "change", |evt: Event| {
        let Some(input) = evt.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        if input.type_() != "file" {
            return;
        }
        let has_file = input.files().is_some_and(|f| f.length() > 0);
        let _ = if has_file {
            input.class_list().add_1("file-selected")
        } else {
            input.class_list().remove_1("file-selected")
        };
    })?;

    let save: EventTarget = els.save_settings_btn.clone().into();
    listen(&save, "click", |_evt: Event| {
        let pending = with_game(begin_save).flatten();
        if let Some((draft, uploads)) = pending {
            wasm_bindgen_futures::spawn_local(finish_save(draft, uploads));
        }
    })?;
    Ok(())
}

fn submit_password(g: &mut GameUi) {
    let input = g.els.password_input.value();
    match g.session.unlock_settings(&input) {
        Ok(draft) => {
            hide(&g.els.password_modal);
            g.els.password_input.set_value("");
            g.draft = Some(draft);
            if let Err(e) = render_form(g) {
                warn!("could not render settings: {:?}", e);
            }
            show(&g.els.settings_panel);
        }
        Err(GachaError::WrongPassword) => alert(WRONG_PASSWORD_MSG),
        Err(e) => warn!("settings unlock failed: {}", e),
    }
}

fn render_form(g: &GameUi) -> Result<(), JsValue> {
    let Some(draft) = g.draft.as_ref() else { return Ok(()) };
    let form = &g.els.settings_form;
    form.set_inner_html("");
    for (i, row) in draft.rows().iter().enumerate() {
        let slot = draft.first_slot() + i;
        let el = render_row(&g.doc, slot, row.as_ref())?;
        form.append_child(&el)?;
    }
    Ok(())
}

fn render_row(doc: &Document, slot: usize, prize: Option<&Prize>) -> Result<Element, JsValue> {
    let row: Element = create(doc, "div", "prize-setting")?;
    row.set_attribute("data-slot", &slot.to_string())?;
    let label: Element = create(doc, "span", "prize-label")?;
    label.set_text_content(Some(&format!("{}.", slot + 1)));
    row.append_child(&label)?;

    let Some(prize) = prize else {
        let add: Element = create(doc, "button", "prize-action-btn add-btn")?;
        add.set_attribute("type", "button")?;
        add.set_text_content(Some("+"));
        row.append_child(&add)?;
        return Ok(row);
    };

    let name: HtmlInputElement = create(doc, "input", "prize-name")?;
    name.set_type("text");
    name.set_value(prize.text.as_deref().unwrap_or(""));
    row.append_child(&name)?;

    let rarity: HtmlSelectElement = create(doc, "select", "prize-rarity")?;
    for r in Rarity::ALL {
        let opt: Element = create(doc, "option", "")?;
        opt.set_attribute("value", r.as_str())?;
        opt.set_text_content(Some(r.as_str()));
        rarity.append_child(&opt)?;
    }
    rarity.set_value(prize.rarity.as_str());
    row.append_child(&rarity)?;

    let file: HtmlInputElement = create(doc, "input", if prize.image.is_some() { "file-selected" } else { "" })?;
    file.set_type("file");
    file.set_accept("image/*");
    row.append_child(&file)?;

    if prize.image.is_some() {
        let rm_img: Element = create(doc, "button", "prize-action-btn remove-image-btn")?;
        rm_img.set_attribute("type", "button")?;
        rm_img.set_text_content(Some("X"));
        row.append_child(&rm_img)?;
    }
    let rm: Element = create(doc, "button", "prize-action-btn remove-btn")?;
    rm.set_attribute("type", "button")?;
    rm.set_text_content(Some("-"));
    row.append_child(&rm)?;
    Ok(row)
}

fn row_slot(row: &Element) -> Option<usize> {
    row.get_attribute("data-slot")?.parse().ok()
}

/// Copy typed text and chosen rarities from the form into the draft.
fn sync_inputs(g: &mut GameUi) {
    let Some(draft) = g.draft.as_mut() else { return };
    let Ok(rows) = g.els.settings_form.query_selector_all(".prize-setting") else { return };
    for i in 0..rows.length() {
        let Some(row) = rows.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else { continue };
        let Some(slot) = row_slot(&row) else { continue };
        if let Some(name) = row
            .query_selector(".prize-name")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        {
            let _ = draft.set_text(slot, &name.value());
        }
        if let Some(rarity) = row
            .query_selector(".prize-rarity")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
            .and_then(|s| Rarity::parse(&s.value()))
        {
            let _ = draft.set_rarity(slot, rarity);
        }
    }
}

fn on_form_click(g: &mut GameUi, evt: &Event) {
    let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else { return };
    let Some(row) = target.closest(".prize-setting").ok().flatten() else { return };
    let Some(slot) = row_slot(&row) else { return };
    let classes = target.class_list();
    let is_add = classes.contains("add-btn");
    let is_remove = classes.contains("remove-btn");
    let is_remove_image = classes.contains("remove-image-btn");
    if !(is_add || is_remove || is_remove_image) {
        return;
    }
    sync_inputs(g);
    let Some(draft) = g.draft.as_mut() else { return };
    let result = if is_add {
        draft.add(slot)
    } else if is_remove {
        draft.remove(slot)
    } else {
        draft.remove_image(slot)
    };
    if let Err(e) = result {
        warn!("settings edit rejected: {}", e);
    }
    if let Err(e) = render_form(g) {
        warn!("could not render settings: {:?}", e);
    }
}

/// Files picked in the form, by slot.
fn pending_uploads(form: &HtmlElement) -> Vec<(usize, File)> {
    let mut out = Vec::new();
    let Ok(rows) = form.query_selector_all(".prize-setting") else { return out };
    for i in 0..rows.length() {
        let Some(row) = rows.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else { continue };
        let Some(slot) = row_slot(&row) else { continue };
        let file = row
            .query_selector("input[type=\"file\"]")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            out.push((slot, file));
        }
    }
    out
}

fn begin_save(g: &mut GameUi) -> Option<(SettingsDraft, Vec<(usize, File)>)> {
    sync_inputs(g);
    let uploads = pending_uploads(&g.els.settings_form);
    let draft = g.draft.take()?;
    Some((draft, uploads))
}

async fn read_data_uri(file: &File) -> Result<String, GachaError> {
    let buf = JsFuture::from(file.array_buffer()).await.map_err(|e| GachaError::FileRead {
        name: file.name(),
        reason: format!("{:?}", e),
    })?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    Ok(data_uri(&file.type_(), &bytes))
}

async fn finish_save(mut draft: SettingsDraft, uploads: Vec<(usize, File)>) {
    for (slot, file) in uploads {
        match read_data_uri(&file).await {
            Ok(uri) => {
                if let Err(e) = draft.set_image(slot, uri) {
                    warn!("{}", e);
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
    with_game(|g| match g.session.save_settings(&draft) {
        Ok(()) => {
            alert(SAVED_MSG);
            hide(&g.els.settings_panel);
        }
        Err(e) => {
            warn!("could not save settings: {}", e);
            // keep editing the same rows, uploaded images included
            g.draft = Some(draft);
            if let Err(e) = render_form(g) {
                warn!("could not render settings: {:?}", e);
            }
            alert(&e.to_string());
        }
    });
}
