//! Coin balance
//!
//! The balance lives in the preference store under `totalCoins`; nothing is
//! cached so every reader sees the latest write.

use crate::persistence::{PreferenceStore, keys};

/// Current banked coins
pub fn balance<S: PreferenceStore + ?Sized>(store: &S) -> i64 {
    store.get_int(keys::TOTAL_COINS)
}

/// Add coins to the balance and return the new total
pub fn deposit<S: PreferenceStore + ?Sized>(store: &mut S, amount: i64) -> i64 {
    let total = balance(store).saturating_add(amount.max(0));
    store.set_int(keys::TOTAL_COINS, total);
    total
}

/// Take coins if the balance covers `amount`. Returns false (and changes
/// nothing) when it does not.
pub fn spend<S: PreferenceStore + ?Sized>(store: &mut S, amount: i64) -> bool {
    let current = balance(store);
    if amount < 0 || current < amount {
        return false;
    }
    store.set_int(keys::TOTAL_COINS, current - amount);
    true
}
