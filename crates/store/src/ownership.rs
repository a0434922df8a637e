use blindbox_core::{ListingId, UserId};
use blindbox_ledger::OwnershipRecord;

use crate::error::StoreError;

/// Ownership rows: purchased-but-undrawn units per `(user, listing)`.
pub trait OwnershipLedger {
    fn ownership(
        &self,
        user_id: UserId,
        listing_id: ListingId,
    ) -> Result<Option<OwnershipRecord>, StoreError>;

    /// Insert or overwrite the row for the record's `(user, listing)` pair.
    fn put_ownership(&mut self, record: OwnershipRecord) -> Result<(), StoreError>;

    /// Remove a drained row. Absent rows are a store anomaly.
    fn delete_ownership(&mut self, user_id: UserId, listing_id: ListingId)
    -> Result<(), StoreError>;

    /// Owned quantity, zero when no row exists.
    fn owned_quantity(&self, user_id: UserId, listing_id: ListingId) -> Result<u64, StoreError> {
        Ok(self
            .ownership(user_id, listing_id)?
            .map_or(0, |r| r.quantity()))
    }
}
