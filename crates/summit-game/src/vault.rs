//! # Bond Vault
//!
//! Explicit custody ledger for proposal bonds. A bond is owned by its game
//! instance from capture at initialization until resolution, when it moves
//! exactly once: refunded in full to the original proposer on acceptance,
//! or forfeited to the tournament treasury on elimination.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use summit_core::Address;

/// Ledger of credited bond balances by account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondVault {
    credits: BTreeMap<Address, u128>,
}

impl BondVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account`.
    pub fn credit(&mut self, account: Address, amount: u128) {
        if amount == 0 {
            return;
        }
        *self.credits.entry(account).or_insert(0) += amount;
    }

    /// The balance credited to `account`.
    pub fn balance(&self, account: &Address) -> u128 {
        self.credits.get(account).copied().unwrap_or(0)
    }

    /// Total value held across all accounts.
    pub fn total(&self) -> u128 {
        self.credits.values().sum()
    }
}
