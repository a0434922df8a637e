//! Application wiring: engines over one injected store.

use std::sync::Arc;

use blindbox_catalog::ImageRef;
use blindbox_core::{DrawId, ListingId, Price, UserId};
use blindbox_engine::{
    DrawEngine, DrawRng, EngineError, FulfillmentSplitter, ListingLifecycle, PurchaseEngine,
};
use blindbox_ledger::ShippingAddress;
use blindbox_store::{CatalogStore, DrawLedger, InMemoryStore, OwnershipLedger, Store};

use crate::dto::{
    BuyReceipt, BuyRequest, CreateListingRequest, CreatedListing, Delisted, DrawOutcome,
    DrawRequest, DrawView, ListingView, OwnedQuantity, ShipRequest,
};
use crate::errors::ApiError;

/// The ledger core behind the excluded HTTP layer.
///
/// One store, four engines; every operation below is one atomic transaction
/// and returns either a response DTO or a typed [`ApiError`].
pub struct App<S, R> {
    store: S,
    purchase: PurchaseEngine<S>,
    drawer: DrawEngine<S, R>,
    fulfillment: FulfillmentSplitter<S>,
    lifecycle: ListingLifecycle<S>,
}

impl<R: DrawRng> App<Arc<InMemoryStore>, R> {
    /// Fresh app over an empty in-memory store (tests, dev, demo).
    pub fn in_memory(rng: R) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), rng)
    }
}

impl<S: Store + Clone, R: DrawRng> App<S, R> {
    pub fn new(store: S, rng: R) -> Self {
        Self {
            purchase: PurchaseEngine::new(store.clone()),
            drawer: DrawEngine::new(store.clone(), rng),
            fulfillment: FulfillmentSplitter::new(store.clone()),
            lifecycle: ListingLifecycle::new(store.clone()),
            store,
        }
    }

    // ---- lifecycle ----

    pub fn create_listing(&self, req: CreateListingRequest) -> Result<CreatedListing, ApiError> {
        let cover_image = ImageRef::new(req.cover_image)?;
        let content_images = req
            .content_images
            .into_iter()
            .map(ImageRef::new)
            .collect::<Result<Vec<_>, _>>()?;
        let price = Price::from_cents(req.price_cents)?;

        let listing_id = self.lifecycle.create(
            req.merchant_id,
            &req.name,
            cover_image,
            content_images,
            price,
            req.total_stock,
        )?;
        Ok(CreatedListing { listing_id })
    }

    pub fn delist(&self, listing_id: ListingId, qty: u64) -> Result<Delisted, ApiError> {
        let outcome = self.lifecycle.delist(listing_id, qty)?;
        Ok(Delisted {
            listing_deleted: outcome.listing_deleted,
        })
    }

    pub fn relist(&self, listing_id: ListingId, qty: u64) -> Result<(), ApiError> {
        self.lifecycle.relist(listing_id, qty)?;
        Ok(())
    }

    // ---- purchase / draw / fulfillment ----

    pub fn buy(&self, req: BuyRequest) -> Result<BuyReceipt, ApiError> {
        let purchase = self
            .purchase
            .buy(req.listing_id, req.user_id, req.quantity)?;
        Ok(BuyReceipt {
            quantity: purchase.quantity,
            total_price_cents: purchase.total_price_cents,
        })
    }

    pub fn draw(&self, req: DrawRequest) -> Result<DrawOutcome, ApiError> {
        let drawn = self.drawer.draw(req.listing_id, req.user_id, req.quantity)?;
        Ok(DrawOutcome {
            drawn_images: drawn.iter().map(|i| i.as_str().to_string()).collect(),
        })
    }

    pub fn ship(&self, req: ShipRequest) -> Result<(), ApiError> {
        let address = ShippingAddress::new(req.address)?;
        self.fulfillment.ship(req.user_id, req.draw_id, address)?;
        Ok(())
    }

    pub fn mark_dispatched(&self, draw_id: DrawId) -> Result<(), ApiError> {
        self.fulfillment.mark_dispatched(draw_id)?;
        Ok(())
    }

    // ---- read projections ----

    pub fn listings(&self) -> Result<Vec<ListingView>, ApiError> {
        let rows = self
            .store
            .transaction::<_, EngineError, _>(|tx| Ok(tx.listings()?))?;
        Ok(rows.iter().map(ListingView::from).collect())
    }

    pub fn listings_for_merchant(
        &self,
        merchant_id: UserId,
    ) -> Result<Vec<ListingView>, ApiError> {
        let rows = self
            .store
            .transaction::<_, EngineError, _>(|tx| Ok(tx.listings_for_merchant(merchant_id)?))?;
        Ok(rows.iter().map(ListingView::from).collect())
    }

    pub fn listing(&self, listing_id: ListingId) -> Result<ListingView, ApiError> {
        let listing = self.store.transaction::<_, EngineError, _>(|tx| {
            tx.listing(listing_id)?
                .ok_or_else(|| EngineError::NotFound(format!("listing {listing_id}")))
        })?;
        Ok(ListingView::from(&listing))
    }

    pub fn owned_quantity(
        &self,
        user_id: UserId,
        listing_id: ListingId,
    ) -> Result<OwnedQuantity, ApiError> {
        let quantity = self
            .store
            .transaction::<_, EngineError, _>(|tx| Ok(tx.owned_quantity(user_id, listing_id)?))?;
        Ok(OwnedQuantity { quantity })
    }

    pub fn draws_for_user(&self, user_id: UserId) -> Result<Vec<DrawView>, ApiError> {
        let rows = self
            .store
            .transaction::<_, EngineError, _>(|tx| Ok(tx.draws_for_user(user_id)?))?;
        Ok(rows.iter().map(DrawView::from).collect())
    }

    pub fn orders_for_listing(&self, listing_id: ListingId) -> Result<Vec<DrawView>, ApiError> {
        let rows = self
            .store
            .transaction::<_, EngineError, _>(|tx| Ok(tx.shipped_for_listing(listing_id)?))?;
        Ok(rows.iter().map(DrawView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blindbox_engine::SeededRng;

    fn create_request(merchant_id: UserId, total_stock: u64) -> CreateListingRequest {
        CreateListingRequest {
            merchant_id,
            name: "Deep Sea Friends".to_string(),
            cover_image: "/uploads/covers/deep-sea.png".to_string(),
            content_images: vec![
                "/uploads/contents/octopus.png".to_string(),
                "/uploads/contents/jellyfish.png".to_string(),
            ],
            price_cents: 5900,
            total_stock,
        }
    }

    #[test]
    fn full_walkthrough_from_listing_to_order_book() {
        let app = App::in_memory(SeededRng::new(1));
        let merchant = UserId::new();
        let buyer = UserId::new();

        let created = app.create_listing(create_request(merchant, 10)).unwrap();

        let receipt = app
            .buy(BuyRequest {
                listing_id: created.listing_id,
                user_id: buyer,
                quantity: 3,
            })
            .unwrap();
        assert_eq!(receipt.quantity, 3);
        assert_eq!(receipt.total_price_cents, 17_700);
        assert_eq!(app.owned_quantity(buyer, created.listing_id).unwrap().quantity, 3);

        let outcome = app
            .draw(DrawRequest {
                listing_id: created.listing_id,
                user_id: buyer,
                quantity: 3,
            })
            .unwrap();
        assert_eq!(outcome.drawn_images.len(), 3);
        assert_eq!(app.owned_quantity(buyer, created.listing_id).unwrap().quantity, 0);

        let cabinet = app.draws_for_user(buyer).unwrap();
        assert_eq!(cabinet.iter().map(|d| d.quantity).sum::<u64>(), 3);

        let source = &cabinet[0];
        app.ship(ShipRequest {
            user_id: buyer,
            draw_id: source.draw_id,
            address: "1 Dock Street".to_string(),
        })
        .unwrap();

        let orders = app.orders_for_listing(created.listing_id).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].quantity, 1);
        assert_eq!(orders[0].shipping_address.as_deref(), Some("1 Dock Street"));
        assert!(!orders[0].dispatched);

        app.mark_dispatched(orders[0].draw_id).unwrap();
        let orders = app.orders_for_listing(created.listing_id).unwrap();
        assert!(orders[0].dispatched);
    }

    #[test]
    fn failures_surface_stable_error_kinds() {
        let app = App::in_memory(SeededRng::new(2));
        let merchant = UserId::new();
        let buyer = UserId::new();
        let created = app.create_listing(create_request(merchant, 2)).unwrap();

        let err = app
            .buy(BuyRequest {
                listing_id: created.listing_id,
                user_id: buyer,
                quantity: 5,
            })
            .unwrap_err();
        assert_eq!(err.kind, "insufficient_stock");

        let err = app
            .draw(DrawRequest {
                listing_id: created.listing_id,
                user_id: buyer,
                quantity: 1,
            })
            .unwrap_err();
        assert_eq!(err.kind, "insufficient_owned_units");

        let err = app
            .ship(ShipRequest {
                user_id: buyer,
                draw_id: DrawId::new(),
                address: "   ".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.kind, "validation_error");

        let err = app.listing(ListingId::new()).unwrap_err();
        assert_eq!(err.kind, "not_found");

        let err = app
            .create_listing(CreateListingRequest {
                content_images: vec![],
                ..create_request(merchant, 2)
            })
            .unwrap_err();
        assert_eq!(err.kind, "validation_error");
    }

    #[test]
    fn merchant_view_is_creation_ordered() {
        let app = App::in_memory(SeededRng::new(3));
        let merchant = UserId::new();
        let first = app.create_listing(create_request(merchant, 5)).unwrap();
        let second = app.create_listing(create_request(merchant, 5)).unwrap();
        // Another merchant's listing stays out of the view.
        app.create_listing(create_request(UserId::new(), 5)).unwrap();

        let mine = app.listings_for_merchant(merchant).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].listing_id, first.listing_id);
        assert_eq!(mine[1].listing_id, second.listing_id);

        assert_eq!(app.listings().unwrap().len(), 3);
    }
}
