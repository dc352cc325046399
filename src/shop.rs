//! Cosmetic shop
//!
//! Ten balls and ten backgrounds, bought with banked coins. Ownership and
//! the current selection per category live in the preference store.

use serde::{Deserialize, Serialize};

use crate::consts::{SHOP_ITEM_COUNT, SHOP_ITEM_PRICE};
use crate::meta::wallet;
use crate::persistence::{PreferenceStore, keys};

/// Item shelves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopCategory {
    Ball,
    Background,
}

impl ShopCategory {
    pub const ALL: [ShopCategory; 2] = [ShopCategory::Ball, ShopCategory::Background];

    fn purchased_key(&self, id: u32) -> String {
        match self {
            ShopCategory::Ball => keys::purchased_ball(id),
            ShopCategory::Background => keys::purchased_background(id),
        }
    }

    fn selected_key(&self) -> &'static str {
        match self {
            ShopCategory::Ball => keys::SELECTED_BALL,
            ShopCategory::Background => keys::SELECTED_BACKGROUND,
        }
    }

    fn image_prefix(&self) -> &'static str {
        match self {
            ShopCategory::Ball => "Ball",
            ShopCategory::Background => "Background",
        }
    }
}

/// One purchasable cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopItem {
    pub category: ShopCategory,
    /// 1-based id within the category
    pub id: u32,
}

impl ShopItem {
    /// Item `id` of `category`, if it exists
    pub fn new(category: ShopCategory, id: u32) -> Option<Self> {
        (1..=SHOP_ITEM_COUNT)
            .contains(&id)
            .then_some(Self { category, id })
    }

    /// Every item of a category in shelf order
    pub fn all(category: ShopCategory) -> impl Iterator<Item = ShopItem> {
        (1..=SHOP_ITEM_COUNT).map(move |id| ShopItem { category, id })
    }

    /// Asset name, e.g. "Ball3"
    pub fn image_name(&self) -> String {
        format!("{}{}", self.category.image_prefix(), self.id)
    }

    /// Reverse of `image_name`
    pub fn from_image_name(name: &str) -> Option<Self> {
        ShopCategory::ALL.into_iter().find_map(|category| {
            let id = name.strip_prefix(category.image_prefix())?.parse().ok()?;
            Self::new(category, id)
        })
    }

    pub fn price(&self) -> i64 {
        SHOP_ITEM_PRICE
    }
}

/// Why a purchase did not go through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    AlreadyOwned,
    InsufficientCoins { balance: i64, price: i64 },
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseError::AlreadyOwned => write!(f, "item already owned"),
            PurchaseError::InsufficientCoins { balance, price } => {
                write!(f, "need {} coins, have {}", price, balance)
            }
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Give a fresh profile the first item of each shelf, owned and selected
pub fn ensure_defaults<S: PreferenceStore + ?Sized>(store: &mut S) {
    for category in ShopCategory::ALL {
        let first = category.purchased_key(1);
        if !store.get_bool(&first) {
            store.set_bool(&first, true);
        }
        if selected_id(store, category).is_none() {
            store.set_int(category.selected_key(), 1);
        }
    }
}

pub fn is_owned<S: PreferenceStore + ?Sized>(store: &S, item: ShopItem) -> bool {
    store.get_bool(&item.category.purchased_key(item.id))
}

fn selected_id<S: PreferenceStore + ?Sized>(store: &S, category: ShopCategory) -> Option<u32> {
    let id = u32::try_from(store.get_int(category.selected_key())).ok()?;
    ShopItem::new(category, id).map(|item| item.id)
}

/// Currently equipped item of a category (item 1 if nothing valid is stored)
pub fn selected<S: PreferenceStore + ?Sized>(store: &S, category: ShopCategory) -> ShopItem {
    let id = selected_id(store, category).unwrap_or(1);
    ShopItem { category, id }
}

/// Buy `item` with banked coins
pub fn purchase<S: PreferenceStore + ?Sized>(
    store: &mut S,
    item: ShopItem,
) -> Result<(), PurchaseError> {
    if is_owned(store, item) {
        return Err(PurchaseError::AlreadyOwned);
    }
    let price = item.price();
    if !wallet::spend(store, price) {
        return Err(PurchaseError::InsufficientCoins {
            balance: wallet::balance(store),
            price,
        });
    }
    store.set_bool(&item.category.purchased_key(item.id), true);
    log::info!("Purchased {} for {} coins", item.image_name(), price);
    Ok(())
}

/// Equip an owned item. Returns false for items not yet bought.
pub fn select<S: PreferenceStore + ?Sized>(store: &mut S, item: ShopItem) -> bool {
    if !is_owned(store, item) {
        return false;
    }
    store.set_int(item.category.selected_key(), i64::from(item.id));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn ball(id: u32) -> ShopItem {
        ShopItem::new(ShopCategory::Ball, id).unwrap()
    }

    #[test]
    fn test_defaults_own_and_select_first_items() {
        let mut store = MemoryStore::new();
        ensure_defaults(&mut store);
        for category in ShopCategory::ALL {
            let first = ShopItem::new(category, 1).unwrap();
            assert!(is_owned(&store, first));
            assert_eq!(selected(&store, category), first);
            assert!(!is_owned(&store, ShopItem::new(category, 2).unwrap()));
        }
    }

    #[test]
    fn test_defaults_keep_existing_selection() {
        let mut store = MemoryStore::new();
        store.set_int(keys::SELECTED_BALL, 4);
        ensure_defaults(&mut store);
        assert_eq!(selected(&store, ShopCategory::Ball).id, 4);
    }

    #[test]
    fn test_purchase_deducts_price() {
        let mut store = MemoryStore::new();
        ensure_defaults(&mut store);
        wallet::deposit(&mut store, 20);

        assert_eq!(purchase(&mut store, ball(3)), Ok(()));
        assert!(is_owned(&store, ball(3)));
        assert_eq!(wallet::balance(&store), 5);
    }

    #[test]
    fn test_purchase_rejects_poor_and_owned() {
        let mut store = MemoryStore::new();
        ensure_defaults(&mut store);
        wallet::deposit(&mut store, 14);

        assert_eq!(
            purchase(&mut store, ball(2)),
            Err(PurchaseError::InsufficientCoins {
                balance: 14,
                price: 15
            })
        );
        assert_eq!(purchase(&mut store, ball(1)), Err(PurchaseError::AlreadyOwned));
        assert_eq!(wallet::balance(&store), 14);
    }

    #[test]
    fn test_select_is_exclusive_and_requires_ownership() {
        let mut store = MemoryStore::new();
        ensure_defaults(&mut store);
        assert!(!select(&mut store, ball(5)));
        assert_eq!(selected(&store, ShopCategory::Ball).id, 1);

        wallet::deposit(&mut store, 15);
        purchase(&mut store, ball(5)).unwrap();
        assert!(select(&mut store, ball(5)));
        assert_eq!(selected(&store, ShopCategory::Ball).id, 5);
        // Backgrounds are a separate shelf
        assert_eq!(selected(&store, ShopCategory::Background).id, 1);
    }

    #[test]
    fn test_image_names() {
        let item = ShopItem::new(ShopCategory::Background, 10).unwrap();
        assert_eq!(item.image_name(), "Background10");
        assert_eq!(ShopItem::from_image_name("Background10"), Some(item));
        assert_eq!(ShopItem::from_image_name("Ball7"), Some(ball(7)));
        assert_eq!(ShopItem::from_image_name("Ball11"), None);
        assert_eq!(ShopItem::from_image_name("Hat1"), None);
        assert_eq!(ShopItem::new(ShopCategory::Ball, 0), None);
    }

    #[test]
    fn test_shelves_list_ten_items() {
        assert_eq!(ShopItem::all(ShopCategory::Ball).count(), 10);
    }
}
