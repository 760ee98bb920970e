//! Persistence of the prize table and stats in browser local storage.
//!
//! Current keys hold a versioned envelope `{"version": N, "data": ...}`.
//! Values written before versioning existed are still read: a bare value
//! under a current key is treated as version 1, and the two legacy prize keys
//! are migrated once into the user slot range and then removed.

use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::GameConfig;
use crate::prize::{Prize, PrizeTable, Rarity};
use crate::stats::Stats;

pub const KEY_USER_PRIZES: &str = "gachaUserPrizes";
pub const KEY_STATS: &str = "gachaStats";
/// Oldest layout: array of `string | null`, one per absolute slot.
pub const LEGACY_KEY_PRIZE_TEXTS: &str = "gachaPrizeTexts";
/// Second layout: array of prize objects (or null), one per absolute slot.
pub const LEGACY_KEY_PRIZES: &str = "gachaPrizes";

pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("corrupt value under '{key}': {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("value under '{key}' has schema version {found}, newest supported is {supported}")]
    UnsupportedVersion {
        key: &'static str,
        found: u32,
        supported: u32,
    },
    #[error("could not encode value for '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal string key/value store, shaped after `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// `window.localStorage`.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let win = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        let inner = win
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is null".into()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

/// In-memory store for tests and for hosts without local storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: std::collections::BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[derive(Serialize)]
struct EnvelopeOut<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    version: u32,
    data: Value,
}

/// Persisted user prize slots, aligned with `GameConfig::user_slots`.
pub type UserSlots = Vec<Option<Prize>>;

/// Typed access to the game's keys on top of a [`KeyValueStore`].
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write<T: Serialize>(&mut self, key: &'static str, data: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(&EnvelopeOut { version: SCHEMA_VERSION, data })
            .map_err(|source| StorageError::Encode { key, source })?;
        self.store.set_item(key, &json)
    }

    /// Read a versioned value. Bare (pre-envelope) values decode as version 1.
    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(None);
        };
        let value: Value =
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt { key, source })?;
        let is_envelope = value
            .as_object()
            .is_some_and(|o| o.contains_key("version") && o.contains_key("data"));
        let data = if is_envelope {
            let env: EnvelopeIn = serde_json::from_value(value)
                .map_err(|source| StorageError::Corrupt { key, source })?;
            if env.version > SCHEMA_VERSION {
                return Err(StorageError::UnsupportedVersion {
                    key,
                    found: env.version,
                    supported: SCHEMA_VERSION,
                });
            }
            env.data
        } else {
            value
        };
        serde_json::from_value(data)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { key, source })
    }

    pub fn load_user_prizes(&mut self, cfg: &GameConfig) -> Result<Option<UserSlots>, StorageError> {
        if let Some(slots) = self.read::<UserSlots>(KEY_USER_PRIZES)? {
            self.drop_legacy_keys()?;
            return Ok(Some(slots));
        }
        self.migrate_legacy(cfg)
    }

    /// Legacy keys are superseded once the current key holds data.
    fn drop_legacy_keys(&mut self) -> Result<(), StorageError> {
        for key in [LEGACY_KEY_PRIZES, LEGACY_KEY_PRIZE_TEXTS] {
            if self.store.get_item(key)?.is_some() {
                self.store.remove_item(key)?;
                info!("removed stale legacy key '{}'", key);
            }
        }
        Ok(())
    }

    pub fn save_user_prizes(&mut self, table: &PrizeTable, cfg: &GameConfig) -> Result<(), StorageError> {
        self.write(KEY_USER_PRIZES, &table.user_slots(cfg))
    }

    /// Default table with any persisted user slots merged in.
    pub fn load_table(&mut self, cfg: &GameConfig) -> Result<PrizeTable, StorageError> {
        let mut table = PrizeTable::with_defaults(cfg);
        if let Some(stored) = self.load_user_prizes(cfg)? {
            table.merge_user_slots(cfg, stored);
        }
        Ok(table)
    }

    pub fn load_stats(&self) -> Result<Stats, StorageError> {
        Ok(self.read::<Stats>(KEY_STATS)?.unwrap_or_default())
    }

    pub fn save_stats(&mut self, stats: &Stats) -> Result<(), StorageError> {
        self.write(KEY_STATS, stats)
    }

    /// Pull prizes out of a legacy key, keep only those that land in the
    /// user range, rewrite them under the current key and drop the old keys.
    fn migrate_legacy(&mut self, cfg: &GameConfig) -> Result<Option<UserSlots>, StorageError> {
        let absolute: Option<Vec<Option<Prize>>> =
            if let Some(raw) = self.store.get_item(LEGACY_KEY_PRIZES)? {
                let prizes: Vec<Option<Prize>> = serde_json::from_str(&raw)
                    .map_err(|source| StorageError::Corrupt { key: LEGACY_KEY_PRIZES, source })?;
                Some(prizes)
            } else if let Some(raw) = self.store.get_item(LEGACY_KEY_PRIZE_TEXTS)? {
                let texts: Vec<Option<String>> = serde_json::from_str(&raw).map_err(|source| {
                    StorageError::Corrupt { key: LEGACY_KEY_PRIZE_TEXTS, source }
                })?;
                Some(
                    texts
                        .into_iter()
                        .map(|t| t.filter(|t| !t.is_empty()).map(|t| Prize::text(&t, Rarity::Common)))
                        .collect(),
                )
            } else {
                None
            };
        let Some(absolute) = absolute else {
            return Ok(None);
        };

        let mut slots: UserSlots = vec![None; cfg.user_slots.len()];
        for (idx, prize) in absolute.into_iter().enumerate() {
            if cfg.user_slots.contains(&idx) {
                slots[idx - cfg.user_slots.start] = prize;
            }
        }
        info!("migrated legacy prize storage into {} user slots", slots.len());
        self.write(KEY_USER_PRIZES, &slots)?;
        self.drop_legacy_keys()?;
        Ok(Some(slots))
    }
}
