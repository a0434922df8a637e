//! Ownership-ledger bookkeeping shared by the purchase and draw engines.

use blindbox_core::{ListingId, UserId};
use blindbox_ledger::OwnershipRecord;
use blindbox_store::{LedgerTxn, OwnershipLedger};

use crate::error::{EngineError, EngineResult};

/// Upsert `qty` purchased units onto the `(user, listing)` row.
pub(crate) fn credit_units(
    tx: &mut dyn LedgerTxn,
    user_id: UserId,
    listing_id: ListingId,
    qty: u64,
) -> EngineResult<()> {
    match tx.ownership(user_id, listing_id)? {
        Some(mut record) => {
            record.add(qty)?;
            tx.put_ownership(record)?;
        }
        None => {
            tx.put_ownership(OwnershipRecord::open(user_id, listing_id, qty)?)?;
        }
    }
    Ok(())
}

/// Consume `qty` owned units; the row is deleted when drained to zero.
pub(crate) fn debit_units(
    tx: &mut dyn LedgerTxn,
    user_id: UserId,
    listing_id: ListingId,
    qty: u64,
) -> EngineResult<()> {
    let mut record =
        tx.ownership(user_id, listing_id)?
            .ok_or(EngineError::InsufficientOwnedUnits {
                requested: qty,
                owned: 0,
            })?;

    if record.take(qty)? {
        tx.delete_ownership(user_id, listing_id)?;
    } else {
        tx.put_ownership(record)?;
    }
    Ok(())
}
