//! `blindbox-catalog` — blind-box listings and their stock counters.

pub mod listing;

pub use listing::{ImageRef, Listing};
