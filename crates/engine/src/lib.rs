//! `blindbox-engine` — the operations that move units through the ledger.
//!
//! Four independent entry points, each executing as one atomic transaction
//! against the injected store:
//!
//! - [`PurchaseEngine`]: available stock → ownership units
//! - [`DrawEngine`]: ownership units → draw records, via weighted random
//!   selection over the listing's content pool
//! - [`FulfillmentSplitter`]: one unshipped unit → its own shipped record
//! - [`ListingLifecycle`]: listing creation, delisting, relisting
//!
//! None of the engines call each other, and none of them retry internally;
//! a failure rolls the whole call back and propagates as [`EngineError`].

pub mod draw;
pub mod error;
pub mod fulfillment;
pub mod lifecycle;
mod ownership;
pub mod purchase;
pub mod rng;


pub use draw::DrawEngine;
pub use error::{EngineError, EngineResult};
pub use fulfillment::FulfillmentSplitter;
pub use lifecycle::{DelistOutcome, ListingLifecycle};
pub use purchase::{Purchase, PurchaseEngine};
pub use rng::{DrawRng, EntropyRng, SeededRng};
