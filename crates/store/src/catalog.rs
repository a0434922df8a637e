use blindbox_catalog::Listing;
use blindbox_core::{ListingId, UserId};

use crate::error::StoreError;

/// Listing rows and their projections.
///
/// Mutating methods are only ever called from inside a transaction scope
/// ([`crate::Store::transaction`]); invariants on the counters themselves
/// live in [`Listing`], not here.
pub trait CatalogStore {
    fn insert_listing(&mut self, listing: Listing) -> Result<(), StoreError>;

    fn listing(&self, id: ListingId) -> Result<Option<Listing>, StoreError>;

    /// Overwrite an existing row with fresh counters.
    fn update_listing(&mut self, listing: &Listing) -> Result<(), StoreError>;

    fn delete_listing(&mut self, id: ListingId) -> Result<(), StoreError>;

    /// Catalog view: every listing, newest first.
    fn listings(&self) -> Result<Vec<Listing>, StoreError>;

    /// Merchant view: one merchant's listings, oldest first (ids are
    /// time-ordered, so ascending id is creation order).
    fn listings_for_merchant(&self, merchant_id: UserId) -> Result<Vec<Listing>, StoreError>;
}
