use chrono::Utc;

use blindbox_catalog::{ImageRef, Listing};
use blindbox_core::{ListingId, Price, UserId};
use blindbox_store::{CatalogStore, Store};

use crate::error::{ensure_quantity, EngineError, EngineResult};

/// Result of a delist call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelistOutcome {
    /// The delist drove total stock to zero and the listing was removed.
    pub listing_deleted: bool,
}

/// Creates listings and adjusts their total stock (delist/relist).
#[derive(Debug)]
pub struct ListingLifecycle<S> {
    store: S,
}

impl<S: Store> ListingLifecycle<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Put a new blind-box listing on sale.
    #[tracing::instrument(skip_all, fields(%merchant_id))]
    pub fn create(
        &self,
        merchant_id: UserId,
        name: &str,
        cover_image: ImageRef,
        content_images: Vec<ImageRef>,
        price: Price,
        total_stock: u64,
    ) -> EngineResult<ListingId> {
        let listing = Listing::new(
            ListingId::new(),
            merchant_id,
            name,
            cover_image,
            content_images,
            price,
            total_stock,
            Utc::now(),
        )?;
        let id = listing.id_typed();

        self.store.transaction(move |tx| {
            tx.insert_listing(listing)?;
            tracing::debug!(listing_id = %id, "listing created");
            Ok(id)
        })
    }

    /// Take `qty` unsold units off sale; the listing itself is removed when
    /// its total stock reaches zero. Draw and ownership history stays.
    #[tracing::instrument(skip(self))]
    pub fn delist(&self, listing_id: ListingId, qty: u64) -> EngineResult<DelistOutcome> {
        ensure_quantity(qty)?;

        self.store.transaction(|tx| {
            let mut listing = tx
                .listing(listing_id)?
                .ok_or_else(|| EngineError::listing_not_found(listing_id))?;

            let listing_deleted = listing.reduce_stock(qty)?;
            if listing_deleted {
                tx.delete_listing(listing_id)?;
            } else {
                tx.update_listing(&listing)?;
            }

            tracing::debug!(%listing_id, qty, listing_deleted, "delisted");
            Ok(DelistOutcome { listing_deleted })
        })
    }

    /// Put `qty` more units of an existing listing on sale.
    #[tracing::instrument(skip(self))]
    pub fn relist(&self, listing_id: ListingId, qty: u64) -> EngineResult<()> {
        ensure_quantity(qty)?;

        self.store.transaction(|tx| {
            let mut listing = tx
                .listing(listing_id)?
                .ok_or_else(|| EngineError::listing_not_found(listing_id))?;

            listing.restock(qty)?;
            tx.update_listing(&listing)?;

            tracing::debug!(%listing_id, qty, "relisted");
            Ok(())
        })
    }
}
