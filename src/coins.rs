//! Coin purse: what is on the field, what is in the slot, what the turn costs.

use log::debug;

use crate::error::GachaError;

/// Outcome of dropping a coin onto the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deposit {
    /// Accepted; more value still required.
    Accepted { in_slot: u32 },
    /// Accepted and the price is now exactly paid.
    Paid,
    /// Would overshoot the price (or the turn is already paid); the coin
    /// stays on the field.
    Rejected,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoinPurse {
    required: u32,
    in_slot: u32,
    on_field: u32,
}

impl CoinPurse {
    pub fn new(required: u32) -> Self {
        Self { required, in_slot: 0, on_field: 0 }
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    pub fn in_slot(&self) -> u32 {
        self.in_slot
    }

    pub fn on_field(&self) -> u32 {
        self.on_field
    }

    pub fn is_paid(&self) -> bool {
        self.in_slot == self.required
    }

    /// Still missing from the slot.
    pub fn remaining(&self) -> u32 {
        self.required.saturating_sub(self.in_slot)
    }

    /// Take a coin of `value` onto the field. Refused when the field and slot
    /// together would then hold more than the price.
    pub fn spawn(&mut self, value: u32) -> Result<(), GachaError> {
        if self.on_field + self.in_slot + value > self.required {
            return Err(GachaError::NoRoomForCoin {
                on_field: self.on_field,
                in_slot: self.in_slot,
                required: self.required,
            });
        }
        self.on_field += value;
        Ok(())
    }

    /// Move a coin of `value` from the field into the slot.
    pub fn deposit(&mut self, value: u32) -> Deposit {
        if self.is_paid() || self.in_slot + value > self.required {
            return Deposit::Rejected;
        }
        self.on_field = self.on_field.saturating_sub(value);
        self.in_slot += value;
        debug!("coin {} deposited, {}/{}", value, self.in_slot, self.required);
        if self.is_paid() {
            Deposit::Paid
        } else {
            Deposit::Accepted { in_slot: self.in_slot }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pays_with_mixed_denominations() {
        let mut p = CoinPurse::new(15);
        p.spawn(10).unwrap();
        p.spawn(5).unwrap();
        assert_eq!(p.deposit(10), Deposit::Accepted { in_slot: 10 });
        assert!(!p.is_paid());
        assert_eq!(p.deposit(5), Deposit::Paid);
        assert_eq!(p.on_field(), 0);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn refuses_coins_beyond_price() {
        let mut p = CoinPurse::new(5);
        p.spawn(1).unwrap();
        let err = p.spawn(5).unwrap_err();
        assert!(matches!(err, GachaError::NoRoomForCoin { on_field: 1, in_slot: 0, required: 5 }));
        p.spawn(1).unwrap();
        p.spawn(1).unwrap();
        p.spawn(1).unwrap();
        p.spawn(1).unwrap();
        assert!(p.spawn(1).is_err());
    }

    #[test]
    fn overshooting_deposit_is_rejected() {
        let mut p = CoinPurse::new(5);
        p.spawn(1).unwrap();
        p.deposit(1);
        assert_eq!(p.deposit(5), Deposit::Rejected);
        assert_eq!(p.in_slot(), 1);
    }

    #[test]
    fn nothing_enters_a_paid_slot() {
        let mut p = CoinPurse::new(1);
        p.spawn(1).unwrap();
        assert_eq!(p.deposit(1), Deposit::Paid);
        assert_eq!(p.deposit(1), Deposit::Rejected);
        assert_eq!(p.in_slot(), 1);
    }
}
