use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use blindbox_core::{DomainError, DomainResult, Entity, ListingId, Price, UserId, ValueObject};

/// Opaque reference to an uploaded image (cover or content-pool entry).
///
/// The upload collaborator hands these out before a listing is created;
/// the catalog never inspects what they point at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> DomainResult<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(DomainError::validation("image reference cannot be empty"));
        }
        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for ImageRef {}

/// A blind-box listing.
///
/// `total_stock` is the number of units the merchant has put on sale;
/// `order_count` is the number of units ever purchased. The catalog keeps
/// `order_count <= total_stock` at all times, so `remaining_stock` never
/// underflows.
///
/// The content pool is an ordered, non-empty sequence of reward images.
/// Duplicates are allowed and meaningful: the draw distribution is uniform
/// over pool *positions*, so an image listed twice is twice as likely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    id: ListingId,
    merchant_id: UserId,
    name: String,
    cover_image: ImageRef,
    content_images: Vec<ImageRef>,
    price: Price,
    total_stock: u64,
    order_count: u64,
    created_at: DateTime<Utc>,
}

impl Listing {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ListingId,
        merchant_id: UserId,
        name: impl Into<String>,
        cover_image: ImageRef,
        content_images: Vec<ImageRef>,
        price: Price,
        total_stock: u64,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("listing name cannot be empty"));
        }
        if content_images.is_empty() {
            return Err(DomainError::validation(
                "content pool must hold at least one image",
            ));
        }
        if total_stock == 0 {
            return Err(DomainError::validation("total stock must be positive"));
        }

        Ok(Self {
            id,
            merchant_id,
            name,
            cover_image,
            content_images,
            price,
            total_stock,
            order_count: 0,
            created_at,
        })
    }

    pub fn id_typed(&self) -> ListingId {
        self.id
    }

    pub fn merchant_id(&self) -> UserId {
        self.merchant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cover_image(&self) -> &ImageRef {
        &self.cover_image
    }

    /// The reward-image pool, in merchant-supplied order. Never empty.
    pub fn content_pool(&self) -> &[ImageRef] {
        &self.content_images
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn total_stock(&self) -> u64 {
        self.total_stock
    }

    pub fn order_count(&self) -> u64 {
        self.order_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Units still available for purchase.
    pub fn remaining_stock(&self) -> u64 {
        self.total_stock - self.order_count
    }

    /// Consume `qty` units of available stock for a purchase.
    pub fn record_purchase(&mut self, qty: u64) -> DomainResult<()> {
        let available = self.remaining_stock();
        if available < qty {
            return Err(DomainError::InsufficientStock {
                requested: qty,
                available,
            });
        }
        self.order_count += qty;
        Ok(())
    }

    /// Take `qty` unsold units off sale.
    ///
    /// Returns `true` when the listing's total stock reached zero and the
    /// listing itself should be removed from the catalog.
    pub fn reduce_stock(&mut self, qty: u64) -> DomainResult<bool> {
        let available = self.remaining_stock();
        if qty > available {
            return Err(DomainError::validation(
                "delist quantity exceeds available stock",
            ));
        }
        self.total_stock -= qty;
        Ok(self.total_stock == 0)
    }

    /// Put `qty` more units on sale.
    pub fn restock(&mut self, qty: u64) -> DomainResult<()> {
        self.total_stock = self
            .total_stock
            .checked_add(qty)
            .ok_or_else(|| DomainError::validation("total stock overflows"))?;
        Ok(())
    }
}

impl Entity for Listing {
    type Id = ListingId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
