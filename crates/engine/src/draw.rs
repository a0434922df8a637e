use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use blindbox_catalog::ImageRef;
use blindbox_core::{DrawId, ListingId, UserId};
use blindbox_ledger::DrawRecord;
use blindbox_store::{CatalogStore, DrawLedger, Store};

use crate::error::{ensure_quantity, EngineError, EngineResult};
use crate::ownership::debit_units;
use crate::rng::DrawRng;

/// Converts ownership units into draw-ledger entries.
///
/// Each of a call's `qty` selections is independent and with replacement:
/// one position of the content pool, uniform over positions, so an image
/// listed twice is twice as likely to come up.
#[derive(Debug)]
pub struct DrawEngine<S, R> {
    store: S,
    rng: Mutex<R>,
}

impl<S: Store, R: DrawRng> DrawEngine<S, R> {
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    /// Draw `qty` owned units of a listing, revealing one reward image per
    /// unit. Returns the drawn images in selection order.
    ///
    /// The ownership debit and every per-image upsert run in one
    /// transaction; a failure anywhere rolls the whole draw back, so a
    /// partial draw is never observable.
    #[tracing::instrument(skip(self))]
    pub fn draw(
        &self,
        listing_id: ListingId,
        user_id: UserId,
        qty: u64,
    ) -> EngineResult<Vec<ImageRef>> {
        ensure_quantity(qty)?;

        self.store.transaction(|tx| {
            let listing = tx
                .listing(listing_id)?
                .ok_or_else(|| EngineError::listing_not_found(listing_id))?;

            let drawn = {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                let pool = listing.content_pool();
                (0..qty)
                    .map(|_| pool[rng.pick(pool.len())].clone())
                    .collect::<Vec<_>>()
            };

            debit_units(tx, user_id, listing_id, qty)?;

            for (image, count) in tally(&drawn) {
                match tx.unshipped_record(user_id, listing_id, &image)? {
                    Some(mut record) => {
                        record.accumulate(count)?;
                        tx.put_draw(record)?;
                    }
                    None => {
                        let record = DrawRecord::unshipped(
                            DrawId::new(),
                            user_id,
                            listing_id,
                            image,
                            count,
                            Utc::now(),
                        )?;
                        tx.put_draw(record)?;
                    }
                }
            }

            tracing::debug!(%listing_id, %user_id, qty, "draw committed");
            Ok(drawn)
        })
    }
}

/// Per-image counts of a draw result, in first-seen order.
fn tally(drawn: &[ImageRef]) -> Vec<(ImageRef, u64)> {
    let mut counts: Vec<(ImageRef, u64)> = Vec::new();
    for image in drawn {
        match counts.iter_mut().find(|(i, _)| i == image) {
            Some((_, n)) => *n += 1,
            None => counts.push((image.clone(), 1)),
        }
    }
    counts
}
