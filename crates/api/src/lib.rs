//! `blindbox-api` — the operation facade handed to the HTTP layer.
//!
//! The HTTP framework, authentication and upload handling live outside this
//! repository; they call [`App`] with plain DTOs and get back a response
//! DTO or an [`errors::ApiError`] carrying an error kind plus message.

pub mod app;
pub mod dto;
pub mod errors;

pub use app::App;
