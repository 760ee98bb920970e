//! Settings panel model: password gate and an editable draft of the user
//! prize slots. The DOM layer renders the draft and applies it on save.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::GameConfig;
use crate::error::GachaError;
use crate::prize::{Prize, PrizeTable, Rarity};

/// Plain string comparison; this only keeps small hands out of the panel.
pub fn check_password(cfg: &GameConfig, input: &str) -> Result<(), GachaError> {
    if input == cfg.settings_password {
        Ok(())
    } else {
        Err(GachaError::WrongPassword)
    }
}

/// Encode raw file bytes as a `data:` URI suitable for `<img src>`.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() { "application/octet-stream" } else { mime };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Working copy of the user-editable slots while the panel is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsDraft {
    first_slot: usize,
    rows: Vec<Option<Prize>>,
}

impl SettingsDraft {
    pub fn from_table(table: &PrizeTable, cfg: &GameConfig) -> Self {
        Self { first_slot: cfg.user_slots.start, rows: table.user_slots(cfg) }
    }

    /// Absolute slot index of the first row.
    pub fn first_slot(&self) -> usize {
        self.first_slot
    }

    pub fn rows(&self) -> &[Option<Prize>] {
        &self.rows
    }

    fn row_mut(&mut self, slot: usize) -> Result<&mut Option<Prize>, GachaError> {
        slot.checked_sub(self.first_slot)
            .and_then(|i| self.rows.get_mut(i))
            .ok_or(GachaError::SlotNotEditable(slot))
    }

    fn prize_mut(&mut self, slot: usize) -> Result<Option<&mut Prize>, GachaError> {
        Ok(self.row_mut(slot)?.as_mut())
    }

    /// Fill an empty row with a placeholder prize.
    pub fn add(&mut self, slot: usize) -> Result<(), GachaError> {
        let row = self.row_mut(slot)?;
        if row.is_none() {
            *row = Some(Prize::text(&format!("新獎品 {}", slot + 1), Rarity::Common));
        }
        Ok(())
    }

    pub fn remove(&mut self, slot: usize) -> Result<(), GachaError> {
        *self.row_mut(slot)? = None;
        Ok(())
    }

    pub fn remove_image(&mut self, slot: usize) -> Result<(), GachaError> {
        if let Some(p) = self.prize_mut(slot)? {
            p.image = None;
        }
        Ok(())
    }

    pub fn set_text(&mut self, slot: usize, text: &str) -> Result<(), GachaError> {
        if let Some(p) = self.prize_mut(slot)? {
            p.text = if text.is_empty() { None } else { Some(text.to_string()) };
        }
        Ok(())
    }

    pub fn set_rarity(&mut self, slot: usize, rarity: Rarity) -> Result<(), GachaError> {
        if let Some(p) = self.prize_mut(slot)? {
            p.rarity = rarity;
        }
        Ok(())
    }

    pub fn set_image(&mut self, slot: usize, data_uri: String) -> Result<(), GachaError> {
        if let Some(p) = self.prize_mut(slot)? {
            p.image = Some(data_uri);
        }
        Ok(())
    }

    /// Write the rows back into the table's user range.
    pub fn apply(&self, table: &mut PrizeTable) {
        for (i, prize) in self.rows.iter().enumerate() {
            table.set(self.first_slot + i, prize.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> (PrizeTable, SettingsDraft) {
        let cfg = GameConfig::default();
        let table = PrizeTable::with_defaults(&cfg);
        let draft = SettingsDraft::from_table(&table, &cfg);
        (table, draft)
    }

    #[test]
    fn password_gate() {
        let cfg = GameConfig::default();
        assert!(check_password(&cfg, "pitt").is_ok());
        assert!(matches!(check_password(&cfg, "Pitt"), Err(GachaError::WrongPassword)));
    }

    #[test]
    fn encodes_data_uri() {
        assert_eq!(data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
        assert!(data_uri("", b"").starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn add_edit_and_apply() {
        let (mut table, mut d) = draft();
        assert_eq!(d.first_slot(), 3);
        d.add(4).unwrap();
        assert_eq!(d.rows()[1].as_ref().and_then(|p| p.text.as_deref()), Some("新獎品 5"));
        d.set_text(4, "sticker").unwrap();
        d.set_rarity(4, Rarity::Rare).unwrap();
        d.set_image(4, "data:image/png;base64,AA==".into()).unwrap();
        d.apply(&mut table);
        let p = table.get(4).unwrap();
        assert_eq!(p.text.as_deref(), Some("sticker"));
        assert_eq!(p.rarity, Rarity::Rare);
        assert!(p.image.is_some());
    }

    #[test]
    fn removing_image_keeps_text() {
        let (_, mut d) = draft();
        d.add(3).unwrap();
        d.set_image(3, "data:x".into()).unwrap();
        d.remove_image(3).unwrap();
        let p = d.rows()[0].as_ref().unwrap();
        assert!(p.image.is_none());
        assert!(p.text.is_some());
        d.remove(3).unwrap();
        assert!(d.rows()[0].is_none());
    }

    #[test]
    fn default_slots_are_not_editable() {
        let (_, mut d) = draft();
        assert!(matches!(d.add(0), Err(GachaError::SlotNotEditable(0))));
        assert!(matches!(d.remove(10), Err(GachaError::SlotNotEditable(10))));
    }

    #[test]
    fn edits_on_empty_rows_are_noops() {
        let (_, mut d) = draft();
        d.set_text(5, "ghost").unwrap();
        assert!(d.rows()[2].is_none());
    }
}
