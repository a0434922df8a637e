use std::collections::HashMap;
use std::sync::RwLock;

use blindbox_catalog::{ImageRef, Listing};
use blindbox_core::{DrawId, ListingId, UserId};
use blindbox_ledger::{DrawRecord, OwnershipRecord};

use crate::catalog::CatalogStore;
use crate::draws::DrawLedger;
use crate::error::StoreError;
use crate::ownership::OwnershipLedger;
use crate::{LedgerTxn, Store};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    listings: HashMap<ListingId, Listing>,
    ownership: HashMap<(UserId, ListingId), OwnershipRecord>,
    draws: HashMap<DrawId, DrawRecord>,
}

/// In-memory transactional store.
///
/// Transactions stage their writes on a clone of the state and swap it in
/// on commit, so an `Err` exit rolls back structurally. The write lock is
/// held for the whole transaction, which serializes every read-modify-write
/// sequence against the same rows. Intended for tests/dev; not optimized
/// for large catalogs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for InMemoryStore {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut dyn LedgerTxn) -> Result<T, E>,
    {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(_) => return Err(E::from(StoreError::LockPoisoned)),
        };

        let mut staged = guard.clone();
        let mut txn = MemoryTxn { state: &mut staged };
        let out = f(&mut txn)?;

        *guard = staged;
        Ok(out)
    }
}

struct MemoryTxn<'a> {
    state: &'a mut MemoryState,
}

impl CatalogStore for MemoryTxn<'_> {
    fn insert_listing(&mut self, listing: Listing) -> Result<(), StoreError> {
        let id = listing.id_typed();
        if self.state.listings.contains_key(&id) {
            return Err(StoreError::DuplicateKey(format!("listing {id}")));
        }
        self.state.listings.insert(id, listing);
        Ok(())
    }

    fn listing(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        Ok(self.state.listings.get(&id).cloned())
    }

    fn update_listing(&mut self, listing: &Listing) -> Result<(), StoreError> {
        let id = listing.id_typed();
        match self.state.listings.get_mut(&id) {
            Some(row) => {
                *row = listing.clone();
                Ok(())
            }
            None => Err(StoreError::RowMissing(format!("listing {id}"))),
        }
    }

    fn delete_listing(&mut self, id: ListingId) -> Result<(), StoreError> {
        self.state
            .listings
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::RowMissing(format!("listing {id}")))
    }

    fn listings(&self) -> Result<Vec<Listing>, StoreError> {
        let mut rows: Vec<Listing> = self.state.listings.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id_typed().cmp(&a.id_typed()))
        });
        Ok(rows)
    }

    fn listings_for_merchant(&self, merchant_id: UserId) -> Result<Vec<Listing>, StoreError> {
        let mut rows: Vec<Listing> = self
            .state
            .listings
            .values()
            .filter(|l| l.merchant_id() == merchant_id)
            .cloned()
            .collect();
        rows.sort_by_key(|l| l.id_typed());
        Ok(rows)
    }
}

impl OwnershipLedger for MemoryTxn<'_> {
    fn ownership(
        &self,
        user_id: UserId,
        listing_id: ListingId,
    ) -> Result<Option<OwnershipRecord>, StoreError> {
        Ok(self.state.ownership.get(&(user_id, listing_id)).cloned())
    }

    fn put_ownership(&mut self, record: OwnershipRecord) -> Result<(), StoreError> {
        self.state
            .ownership
            .insert((record.user_id(), record.listing_id()), record);
        Ok(())
    }

    fn delete_ownership(
        &mut self,
        user_id: UserId,
        listing_id: ListingId,
    ) -> Result<(), StoreError> {
        self.state
            .ownership
            .remove(&(user_id, listing_id))
            .map(|_| ())
            .ok_or_else(|| {
                StoreError::RowMissing(format!("ownership ({user_id}, {listing_id})"))
            })
    }
}

impl DrawLedger for MemoryTxn<'_> {
    fn draw_record(&self, id: DrawId) -> Result<Option<DrawRecord>, StoreError> {
        Ok(self.state.draws.get(&id).cloned())
    }

    fn unshipped_record(
        &self,
        user_id: UserId,
        listing_id: ListingId,
        image: &ImageRef,
    ) -> Result<Option<DrawRecord>, StoreError> {
        Ok(self
            .state
            .draws
            .values()
            .find(|d| {
                !d.is_shipped()
                    && d.user_id() == user_id
                    && d.listing_id() == listing_id
                    && d.image() == image
            })
            .cloned())
    }

    fn put_draw(&mut self, record: DrawRecord) -> Result<(), StoreError> {
        self.state.draws.insert(record.id_typed(), record);
        Ok(())
    }

    fn delete_draw(&mut self, id: DrawId) -> Result<(), StoreError> {
        self.state
            .draws
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::RowMissing(format!("draw {id}")))
    }

    fn draws_for_user(&self, user_id: UserId) -> Result<Vec<DrawRecord>, StoreError> {
        let mut rows: Vec<DrawRecord> = self
            .state
            .draws
            .values()
            .filter(|d| d.user_id() == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id_typed().cmp(&a.id_typed()))
        });
        Ok(rows)
    }

    fn shipped_for_listing(&self, listing_id: ListingId) -> Result<Vec<DrawRecord>, StoreError> {
        let mut rows: Vec<DrawRecord> = self
            .state
            .draws
            .values()
            .filter(|d| d.is_shipped() && d.listing_id() == listing_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id_typed().cmp(&a.id_typed()))
        });
        Ok(rows)
    }
}
