//! One player's game: coins, crank, prize table, stats and their storage,
//! bundled so event handlers operate on an explicit context.

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::coins::{CoinPurse, Deposit};
use crate::config::GameConfig;
use crate::crank::{Crank, CrankMove, CrankPhase, CrankRelease};
use crate::error::GachaError;
use crate::picker::pick_weighted;
use crate::prize::{Prize, PrizeTable};
use crate::settings::{SettingsDraft, check_password};
use crate::stats::Stats;
use crate::storage::{KeyValueStore, Persistence};

/// Prize revealed when a capsule is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawnPrize {
    pub slot: usize,
    pub prize: Prize,
}

pub struct GachaSession<S, R> {
    cfg: GameConfig,
    purse: CoinPurse,
    crank: Crank,
    table: PrizeTable,
    stats: Stats,
    persistence: Persistence<S>,
    rng: R,
    /// Set once the dispensed capsule of this turn has been opened.
    opened: bool,
}

impl<S: KeyValueStore, R: Rng> GachaSession<S, R> {
    /// Load persisted state (falling back to defaults on damage) and start
    /// the first turn.
    pub fn new(cfg: GameConfig, store: S, rng: R) -> Self {
        let mut persistence = Persistence::new(store);
        let table = persistence.load_table(&cfg).unwrap_or_else(|e| {
            warn!("prize storage unreadable, using defaults: {}", e);
            PrizeTable::with_defaults(&cfg)
        });
        let stats = persistence.load_stats().unwrap_or_else(|e| {
            warn!("stats storage unreadable, starting fresh: {}", e);
            Stats::default()
        });
        let crank = Crank::new(cfg.turn_threshold_deg);
        let mut session = Self {
            cfg,
            purse: CoinPurse::default(),
            crank,
            table,
            stats,
            persistence,
            rng,
            opened: false,
        };
        session.start_new_turn();
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn purse(&self) -> &CoinPurse {
        &self.purse
    }

    pub fn crank(&self) -> &Crank {
        &self.crank
    }

    pub fn table(&self) -> &PrizeTable {
        &self.table
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Pick a fresh price, empty the slot and disable the handle.
    pub fn start_new_turn(&mut self) -> u32 {
        let price = self.cfg.price_choices.choose(&mut self.rng).copied().unwrap_or(1);
        self.purse = CoinPurse::new(price);
        self.crank.reset();
        self.opened = false;
        info!("new turn, price {}", price);
        price
    }

    /// Put a coin of `value` on the field, if there is room for it.
    pub fn take_coin(&mut self, value: u32) -> Result<(), GachaError> {
        self.purse.spawn(value)
    }

    /// A coin was dropped on the slot. Arms the crank when the price is met.
    pub fn insert_coin(&mut self, value: u32) -> Deposit {
        let outcome = self.purse.deposit(value);
        if outcome == Deposit::Paid {
            self.crank.arm();
            info!("price {} paid, handle enabled", self.purse.required());
        }
        outcome
    }

    pub fn grab_handle(&mut self, angle: f64) -> bool {
        self.crank.grab(angle)
    }

    pub fn turn_handle(&mut self, angle: f64) -> CrankMove {
        let m = self.crank.drag(angle);
        if let CrankMove::Dispense { .. } = m {
            info!("capsule dispensed");
        }
        m
    }

    pub fn release_handle(&mut self) -> CrankRelease {
        self.crank.release()
    }

    /// Open this turn's capsule: draw a prize and record the play. Returns
    /// `None` when nothing was dispensed (or it was already opened), and
    /// `Some(None)` when the table has no drawable prize.
    pub fn open_capsule(&mut self) -> Option<Option<DrawnPrize>> {
        if self.crank.phase() != CrankPhase::Dispensed || self.opened {
            return None;
        }
        self.opened = true;
        let drawn = {
            let candidates = self.table.candidates();
            pick_weighted(&candidates, &mut self.rng)
                .map(|(slot, prize)| DrawnPrize { slot, prize: prize.clone() })
        };
        let key = drawn.as_ref().map(|d| d.prize.stats_key(d.slot));
        debug!("capsule opened: {:?}", key);
        self.stats.record_play(key.as_deref(), self.purse.required());
        if let Err(e) = self.persistence.save_stats(&self.stats) {
            warn!("could not save stats: {}", e);
        }
        Some(drawn)
    }

    pub fn reset_stats(&mut self) -> Result<(), GachaError> {
        self.stats.reset();
        self.persistence.save_stats(&self.stats)?;
        info!("stats reset");
        Ok(())
    }

    pub fn unlock_settings(&self, password: &str) -> Result<SettingsDraft, GachaError> {
        check_password(&self.cfg, password)?;
        Ok(SettingsDraft::from_table(&self.table, &self.cfg))
    }

    /// Persist the draft, then make it live. A failed write leaves the
    /// current table untouched.
    pub fn save_settings(&mut self, draft: &SettingsDraft) -> Result<(), GachaError> {
        let mut table = self.table.clone();
        draft.apply(&mut table);
        self.persistence.save_user_prizes(&table, &self.cfg)?;
        self.table = table;
        info!("prize settings saved");
        Ok(())
    }
}
