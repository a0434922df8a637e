use blindbox_catalog::ImageRef;
use blindbox_core::{DrawId, ListingId, UserId};
use blindbox_ledger::DrawRecord;

use crate::error::StoreError;

/// Draw rows: drawn units, unshipped (grouped by image) or shipped.
pub trait DrawLedger {
    fn draw_record(&self, id: DrawId) -> Result<Option<DrawRecord>, StoreError>;

    /// The at-most-one unshipped row for `(user, listing, image)`.
    fn unshipped_record(
        &self,
        user_id: UserId,
        listing_id: ListingId,
        image: &ImageRef,
    ) -> Result<Option<DrawRecord>, StoreError>;

    /// Insert or overwrite the row with the record's id.
    fn put_draw(&mut self, record: DrawRecord) -> Result<(), StoreError>;

    /// Remove a drained row. Absent rows are a store anomaly.
    fn delete_draw(&mut self, id: DrawId) -> Result<(), StoreError>;

    /// A user's draw cabinet (shipped and unshipped), newest first.
    fn draws_for_user(&self, user_id: UserId) -> Result<Vec<DrawRecord>, StoreError>;

    /// Merchant order book: shipped rows for a listing, newest first.
    fn shipped_for_listing(&self, listing_id: ListingId) -> Result<Vec<DrawRecord>, StoreError>;
}
