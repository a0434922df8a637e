use anyhow::Context;

use blindbox_api::dto::{BuyRequest, CreateListingRequest, DrawRequest, ShipRequest};
use blindbox_api::App;
use blindbox_core::UserId;
use blindbox_engine::EntropyRng;

/// Demo walkthrough over the in-memory store: list, buy, draw, ship.
/// The real HTTP layer lives outside this repository and drives the same
/// [`App`] facade.
fn main() -> anyhow::Result<()> {
    blindbox_observability::init();

    let app = App::in_memory(EntropyRng::new());
    let merchant = UserId::new();
    let buyer = UserId::new();

    let created = app.create_listing(CreateListingRequest {
        merchant_id: merchant,
        name: "Deep Sea Friends".to_string(),
        cover_image: "/uploads/covers/deep-sea.png".to_string(),
        content_images: vec![
            "/uploads/contents/octopus.png".to_string(),
            "/uploads/contents/jellyfish.png".to_string(),
            "/uploads/contents/anglerfish.png".to_string(),
        ],
        price_cents: 5900,
        total_stock: 20,
    })?;
    tracing::info!(listing_id = %created.listing_id, "listing on sale");

    let receipt = app.buy(BuyRequest {
        listing_id: created.listing_id,
        user_id: buyer,
        quantity: 3,
    })?;
    tracing::info!(receipt.quantity, receipt.total_price_cents, "units purchased");

    let outcome = app.draw(DrawRequest {
        listing_id: created.listing_id,
        user_id: buyer,
        quantity: 3,
    })?;
    tracing::info!(drawn = ?outcome.drawn_images, "rewards revealed");

    let cabinet = app.draws_for_user(buyer)?;
    let source = cabinet.first().context("draw cabinet is empty")?;
    app.ship(ShipRequest {
        user_id: buyer,
        draw_id: source.draw_id,
        address: "1 Dock Street, Rotterdam".to_string(),
    })?;

    let orders = app.orders_for_listing(created.listing_id)?;
    println!("{}", serde_json::to_string_pretty(&orders)?);

    Ok(())
}
