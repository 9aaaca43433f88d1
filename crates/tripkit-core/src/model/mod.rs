// ── Domain entities ──
//
// The wire records from tripkit-api are the domain records. This module
// adds what the cache needs on top: identity, search fields, a typed
// filter and a storage key per entity.

mod activity;
mod blog;
mod booking;
mod destination;
mod info;
mod itinerary;
mod payment;
mod service;
mod tour;

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tripkit_api::Resource;

pub use activity::ActivityFilter;
pub use blog::BlogFilter;
pub use booking::BookingFilter;
pub use destination::DestinationFilter;
pub use info::InfoFilter;
pub use itinerary::ItineraryFilter;
pub use payment::PaymentFilter;
pub use service::ServiceFilter;
pub use tour::TourFilter;

pub use tripkit_api::EntityId;
pub use tripkit_api::models::*;

use crate::store::FilterSpec;

/// A record type that can live in an `EntityCache`.
pub trait Entity: Resource + Debug {
    type Filter: FilterSpec<Self>;
    /// Aggregate statistics cached alongside the list (`()` if none).
    type Stats: Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Session storage key, e.g. `booking-storage`.
    const STORAGE_KEY: &'static str;

    fn id(&self) -> &EntityId;

    /// Text fields searched by the free-text query.
    fn search_fields(&self) -> Vec<&str>;
}
