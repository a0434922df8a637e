//! Request/response DTOs and mapping to/from domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use blindbox_catalog::Listing;
use blindbox_core::{DrawId, ListingId, UserId};
use blindbox_ledger::DrawRecord;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateListingRequest {
    pub merchant_id: UserId,
    pub name: String,
    pub cover_image: String,
    pub content_images: Vec<String>,
    pub price_cents: u64,
    pub total_stock: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BuyRequest {
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub quantity: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DrawRequest {
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub quantity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShipRequest {
    pub user_id: UserId,
    pub draw_id: DrawId,
    pub address: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CreatedListing {
    pub listing_id: ListingId,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuyReceipt {
    pub quantity: u64,
    pub total_price_cents: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawOutcome {
    pub drawn_images: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Delisted {
    pub listing_deleted: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OwnedQuantity {
    pub quantity: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub listing_id: ListingId,
    pub merchant_id: UserId,
    pub name: String,
    pub cover_image: String,
    pub content_images: Vec<String>,
    pub price_cents: u64,
    pub total_stock: u64,
    pub order_count: u64,
    pub remaining_stock: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&Listing> for ListingView {
    fn from(listing: &Listing) -> Self {
        Self {
            listing_id: listing.id_typed(),
            merchant_id: listing.merchant_id(),
            name: listing.name().to_string(),
            cover_image: listing.cover_image().as_str().to_string(),
            content_images: listing
                .content_pool()
                .iter()
                .map(|i| i.as_str().to_string())
                .collect(),
            price_cents: listing.price().cents(),
            total_stock: listing.total_stock(),
            order_count: listing.order_count(),
            remaining_stock: listing.remaining_stock(),
            created_at: listing.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawView {
    pub draw_id: DrawId,
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub image: String,
    pub quantity: u64,
    pub shipping_address: Option<String>,
    pub dispatched: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&DrawRecord> for DrawView {
    fn from(record: &DrawRecord) -> Self {
        Self {
            draw_id: record.id_typed(),
            listing_id: record.listing_id(),
            user_id: record.user_id(),
            image: record.image().as_str().to_string(),
            quantity: record.quantity(),
            shipping_address: record
                .shipping_address()
                .map(|a| a.as_str().to_string()),
            dispatched: record.is_dispatched(),
            created_at: record.created_at(),
        }
    }
}
