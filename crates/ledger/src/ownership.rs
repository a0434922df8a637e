use serde::{Deserialize, Serialize};

use blindbox_core::{DomainError, DomainResult, ListingId, UserId};

/// Purchased-but-undrawn units of one listing held by one user.
///
/// Keyed by `(user, listing)`. A persisted record always has `quantity >= 1`;
/// draining it to zero means the record must be deleted, never stored empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    user_id: UserId,
    listing_id: ListingId,
    quantity: u64,
}

impl OwnershipRecord {
    /// Open a record with an initial purchase of `qty` units.
    pub fn open(user_id: UserId, listing_id: ListingId, qty: u64) -> DomainResult<Self> {
        if qty == 0 {
            return Err(DomainError::validation(
                "ownership record cannot be opened empty",
            ));
        }
        Ok(Self {
            user_id,
            listing_id,
            quantity: qty,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn listing_id(&self) -> ListingId {
        self.listing_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Add purchased units.
    pub fn add(&mut self, qty: u64) -> DomainResult<()> {
        self.quantity = self
            .quantity
            .checked_add(qty)
            .ok_or_else(|| DomainError::validation("owned quantity overflows"))?;
        Ok(())
    }

    /// Consume `qty` units for a draw.
    ///
    /// Returns `true` when the record is drained and must be deleted.
    pub fn take(&mut self, qty: u64) -> DomainResult<bool> {
        if self.quantity < qty {
            return Err(DomainError::InsufficientOwnedUnits {
                requested: qty,
                owned: self.quantity,
            });
        }
        self.quantity -= qty;
        Ok(self.quantity == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cannot_open_empty() {
        let err = OwnershipRecord::open(UserId::new(), ListingId::new(), 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn take_reports_shortfall() {
        let mut rec = OwnershipRecord::open(UserId::new(), ListingId::new(), 2).unwrap();
        let err = rec.take(3).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientOwnedUnits {
                requested: 3,
                owned: 2,
            }
        );
        assert_eq!(rec.quantity(), 2);
    }

    #[test]
    fn take_signals_drained_record() {
        let mut rec = OwnershipRecord::open(UserId::new(), ListingId::new(), 3).unwrap();
        assert!(!rec.take(1).unwrap());
        assert!(rec.take(2).unwrap());
        assert_eq!(rec.quantity(), 0);
    }
}
