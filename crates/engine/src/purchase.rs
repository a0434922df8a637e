use blindbox_core::{ListingId, UserId};
use blindbox_store::{CatalogStore, Store};

use crate::error::{ensure_quantity, EngineError, EngineResult};
use crate::ownership::credit_units;

/// Receipt for a completed purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purchase {
    pub quantity: u64,
    pub total_price_cents: u64,
}

/// Converts available stock into ownership units.
#[derive(Debug)]
pub struct PurchaseEngine<S> {
    store: S,
}

impl<S: Store> PurchaseEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Buy `qty` sealed units of a listing.
    ///
    /// One transaction: the stock check, the ownership credit and the
    /// order-count bump commit together or not at all.
    #[tracing::instrument(skip(self))]
    pub fn buy(&self, listing_id: ListingId, user_id: UserId, qty: u64) -> EngineResult<Purchase> {
        ensure_quantity(qty)?;

        self.store.transaction(|tx| {
            let mut listing = tx
                .listing(listing_id)?
                .ok_or_else(|| EngineError::listing_not_found(listing_id))?;

            listing.record_purchase(qty)?;
            let total_price_cents = listing.price().total(qty)?;

            credit_units(tx, user_id, listing_id, qty)?;
            tx.update_listing(&listing)?;

            tracing::debug!(%listing_id, %user_id, qty, total_price_cents, "purchase committed");
            Ok(Purchase {
                quantity: qty,
                total_price_cents,
            })
        })
    }
}
