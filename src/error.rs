use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum GachaError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("missing DOM element #{0}")]
    MissingElement(&'static str),

    #[error("could not read file {name}: {reason}")]
    FileRead { name: String, reason: String },

    #[error("wrong password")]
    WrongPassword,

    #[error("not enough room for another coin ({on_field} on field, {in_slot} in slot, {required} required)")]
    NoRoomForCoin {
        on_field: u32,
        in_slot: u32,
        required: u32,
    },

    #[error("prize slot {0} is not editable")]
    SlotNotEditable(usize),

    #[error("browser error: {0}")]
    Js(String),
}

impl From<JsValue> for GachaError {
    fn from(v: JsValue) -> Self {
        GachaError::Js(v.as_string().unwrap_or_else(|| format!("{:?}", v)))
    }
}

impl From<GachaError> for JsValue {
    fn from(e: GachaError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
