//! Async Rust client for the tripkit travel-booking REST API.
//!
//! This crate is the stateless service layer: every method maps onto one
//! remote HTTP operation and returns the unwrapped `data` payload of the
//! `{ success, data, message }` envelope. Caching, filtering and
//! user-facing notifications live in `tripkit-core`.
//!
//! - **[`ApiClient`]**: transport mechanics (base URL, bearer auth,
//!   envelope parsing, error mapping).
//! - **[`Resource`] / [`Writable`]**: per-entity endpoint metadata used by
//!   the generic CRUD and search calls.
//! - **[`models`]**: wire records for bookings, destinations, payments,
//!   services, tours, activities, itineraries, info entries and blog posts.

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod resource;
pub mod transport;
pub mod types;

mod endpoints;

pub use client::ApiClient;
pub use error::Error;
pub use resource::{Resource, Writable};
pub use transport::{TlsMode, TransportConfig};
pub use types::{EntityId, Page, SearchRequest, SortOrder};
