use chrono::Utc;

use blindbox_core::{DrawId, UserId};
use blindbox_ledger::ShippingAddress;
use blindbox_store::{DrawLedger, Store};

use crate::error::{EngineError, EngineResult};

/// Splits one unshipped drawn unit at a time into its own shipped record.
#[derive(Debug)]
pub struct FulfillmentSplitter<S> {
    store: S,
}

impl<S: Store> FulfillmentSplitter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Ship exactly one unit off the user's unshipped record `draw_id`.
    ///
    /// Not idempotent: each call peels one more unit until the source
    /// record is exhausted and deleted. Shipping N units takes N calls.
    #[tracing::instrument(skip(self, address))]
    pub fn ship(
        &self,
        user_id: UserId,
        draw_id: DrawId,
        address: ShippingAddress,
    ) -> EngineResult<()> {
        self.store.transaction(|tx| {
            let mut source = tx
                .draw_record(draw_id)?
                .filter(|d| d.user_id() == user_id && !d.is_shipped())
                .ok_or_else(|| EngineError::draw_not_found(draw_id))?;

            let shipped = source.split_shipment(DrawId::new(), address, Utc::now())?;
            let shipped_id = shipped.id_typed();
            tx.put_draw(shipped)?;

            if source.quantity() == 0 {
                tx.delete_draw(source.id_typed())?;
            } else {
                tx.put_draw(source)?;
            }

            tracing::debug!(%draw_id, %user_id, %shipped_id, "unit shipped");
            Ok(())
        })
    }

    /// Merchant confirmation that a shipped parcel left the warehouse.
    /// Idempotent; rejects records that are not shipped yet.
    #[tracing::instrument(skip(self))]
    pub fn mark_dispatched(&self, draw_id: DrawId) -> EngineResult<()> {
        self.store.transaction(|tx| {
            let mut record = tx
                .draw_record(draw_id)?
                .filter(|d| d.is_shipped())
                .ok_or_else(|| EngineError::draw_not_found(draw_id))?;

            record.confirm_dispatch();
            tx.put_draw(record)?;
            Ok(())
        })
    }
}
