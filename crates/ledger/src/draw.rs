use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use blindbox_catalog::ImageRef;
use blindbox_core::{DomainError, DomainResult, DrawId, Entity, ListingId, UserId, ValueObject};

/// Delivery address captured when a drawn unit is shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingAddress(String);

impl ShippingAddress {
    pub fn new(address: impl Into<String>) -> DomainResult<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(DomainError::validation("shipping address cannot be empty"));
        }
        Ok(Self(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ShippingAddress {}

/// Drawn units of one reward image.
///
/// Two sub-states, told apart by the address field:
///
/// - *Unshipped* (`shipping_address = None`): accumulated undelivered units
///   for `(user, listing, image)`. At most one such record per triple;
///   repeated draws of the same image bump its quantity.
/// - *Shipped* (`shipping_address = Some(_)`): exactly one physical parcel,
///   always `quantity = 1`, never merged. Terminal, except that the merchant
///   may confirm dispatch once the parcel leaves the warehouse.
///
/// A persisted record always has `quantity >= 1`; shipping the last unit of
/// an unshipped record deletes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    id: DrawId,
    user_id: UserId,
    listing_id: ListingId,
    image: ImageRef,
    quantity: u64,
    shipping_address: Option<ShippingAddress>,
    dispatched: bool,
    created_at: DateTime<Utc>,
}

impl DrawRecord {
    /// New unshipped record holding `qty` freshly drawn units of `image`.
    pub fn unshipped(
        id: DrawId,
        user_id: UserId,
        listing_id: ListingId,
        image: ImageRef,
        qty: u64,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if qty == 0 {
            return Err(DomainError::validation(
                "draw record cannot be created empty",
            ));
        }
        Ok(Self {
            id,
            user_id,
            listing_id,
            image,
            quantity: qty,
            shipping_address: None,
            dispatched: false,
            created_at,
        })
    }

    pub fn id_typed(&self) -> DrawId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn listing_id(&self) -> ListingId {
        self.listing_id
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn shipping_address(&self) -> Option<&ShippingAddress> {
        self.shipping_address.as_ref()
    }

    pub fn is_shipped(&self) -> bool {
        self.shipping_address.is_some()
    }

    pub fn is_dispatched(&self) -> bool {
        self.dispatched
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Fold `qty` more drawn units of the same image into this record.
    pub fn accumulate(&mut self, qty: u64) -> DomainResult<()> {
        if self.is_shipped() {
            return Err(DomainError::validation(
                "shipped records never accumulate units",
            ));
        }
        self.quantity = self
            .quantity
            .checked_add(qty)
            .ok_or_else(|| DomainError::validation("drawn quantity overflows"))?;
        Ok(())
    }

    /// Peel exactly one unit off this unshipped record into its own shipped
    /// record bound to `address`.
    ///
    /// The caller persists the returned record, then either deletes `self`
    /// (when `quantity` reached zero) or persists the decrement.
    pub fn split_shipment(
        &mut self,
        shipped_id: DrawId,
        address: ShippingAddress,
        created_at: DateTime<Utc>,
    ) -> DomainResult<DrawRecord> {
        if self.is_shipped() {
            return Err(DomainError::validation(
                "only unshipped records can be shipped from",
            ));
        }
        // quantity >= 1 invariant makes this subtraction safe.
        self.quantity -= 1;
        Ok(DrawRecord {
            id: shipped_id,
            user_id: self.user_id,
            listing_id: self.listing_id,
            image: self.image.clone(),
            quantity: 1,
            shipping_address: Some(address),
            dispatched: false,
            created_at,
        })
    }

    /// Merchant confirmation that the parcel left the warehouse.
    /// Only meaningful on shipped records; confirming twice is a no-op.
    pub fn confirm_dispatch(&mut self) {
        self.dispatched = true;
    }
}

impl Entity for DrawRecord {
    type Id = DrawId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageRef {
        ImageRef::new("/uploads/contents/a.png").unwrap()
    }

    fn unshipped(qty: u64) -> DrawRecord {
        DrawRecord::unshipped(
            DrawId::new(),
            UserId::new(),
            ListingId::new(),
            image(),
            qty,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_blank_address() {
        let err = ShippingAddress::new("  ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn cannot_create_empty_record() {
        let err = DrawRecord::unshipped(
            DrawId::new(),
            UserId::new(),
            ListingId::new(),
            image(),
            0,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn split_peels_exactly_one_unit() {
        let mut source = unshipped(2);
        let address = ShippingAddress::new("12 Harbor Lane").unwrap();
        let shipped = source
            .split_shipment(DrawId::new(), address.clone(), Utc::now())
            .unwrap();

        assert_eq!(shipped.quantity(), 1);
        assert_eq!(shipped.shipping_address(), Some(&address));
        assert!(!shipped.is_dispatched());
        assert_eq!(shipped.user_id(), source.user_id());
        assert_eq!(shipped.listing_id(), source.listing_id());
        assert_eq!(shipped.image(), source.image());
        assert_ne!(shipped.id_typed(), source.id_typed());
        assert_eq!(source.quantity(), 1);
    }

    #[test]
    fn shipped_records_cannot_split_again() {
        let mut source = unshipped(1);
        let mut shipped = source
            .split_shipment(
                DrawId::new(),
                ShippingAddress::new("12 Harbor Lane").unwrap(),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(source.quantity(), 0);

        let err = shipped
            .split_shipment(
                DrawId::new(),
                ShippingAddress::new("34 Quay Street").unwrap(),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn shipped_records_do_not_accumulate() {
        let mut source = unshipped(1);
        let mut shipped = source
            .split_shipment(
                DrawId::new(),
                ShippingAddress::new("12 Harbor Lane").unwrap(),
                Utc::now(),
            )
            .unwrap();
        assert!(shipped.accumulate(1).is_err());
    }

    #[test]
    fn dispatch_confirmation_is_idempotent() {
        let mut source = unshipped(1);
        let mut shipped = source
            .split_shipment(
                DrawId::new(),
                ShippingAddress::new("12 Harbor Lane").unwrap(),
                Utc::now(),
            )
            .unwrap();
        shipped.confirm_dispatch();
        shipped.confirm_dispatch();
        assert!(shipped.is_dispatched());
    }
}
