//! Coin balance and egg piece ledger.
//!
//! Every successful mutation queues a [`LedgerEvent`]; the engine drains them
//! once per tick and forwards them to whoever displays the balance.

use crate::levels::EGG_PIECES;

/// Change notification from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Balance after the change
    CoinsChanged(u32),
    /// Index of the slot that was just bought
    EggPieceBought(usize),
}

#[derive(Debug, Clone)]
pub struct EconomyLedger {
    coins: u32,
    egg_pieces: [bool; EGG_PIECES],
    pending: Vec<LedgerEvent>,
}

impl EconomyLedger {
    pub fn new(start_coins: u32) -> Self {
        Self {
            coins: start_coins,
            egg_pieces: [false; EGG_PIECES],
            pending: Vec::new(),
        }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn egg_pieces(&self) -> &[bool; EGG_PIECES] {
        &self.egg_pieces
    }

    pub fn egg_pieces_completed(&self) -> usize {
        self.egg_pieces.iter().filter(|b| **b).count()
    }

    pub fn all_eggs_bought(&self) -> bool {
        self.egg_pieces.iter().all(|b| *b)
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.coins >= amount
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
        self.pending.push(LedgerEvent::CoinsChanged(self.coins));
    }

    /// Deduct `amount`. Returns false and leaves the balance alone when it
    /// cannot be afforded.
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.coins -= amount;
        self.pending.push(LedgerEvent::CoinsChanged(self.coins));
        true
    }

    /// Mark an egg slot bought. Fails for out-of-range or already bought
    /// slots.
    pub fn buy_egg_piece(&mut self, index: usize) -> bool {
        match self.egg_pieces.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                self.pending.push(LedgerEvent::EggPieceBought(index));
                true
            }
            _ => false,
        }
    }

    /// Shop purchase of an egg slot: the slot must be open and `price`
    /// affordable, otherwise nothing changes.
    pub fn purchase_egg_piece(&mut self, index: usize, price: u32) -> bool {
        let open = matches!(self.egg_pieces.get(index), Some(false));
        if !open || !self.spend_coins(price) {
            return false;
        }
        self.buy_egg_piece(index)
    }

    /// Take all notifications queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.pending)
    }
}
