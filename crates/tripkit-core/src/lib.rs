// tripkit-core: cache-and-filter layer between tripkit-api and consumers (CLI).

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod notify;
pub mod repository;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ClientConfig;
pub use controller::Controller;
pub use error::CoreError;
pub use model::{
    ActivityFilter, BlogFilter, BookingFilter, DestinationFilter, Entity, InfoFilter,
    ItineraryFilter, PaymentFilter, ServiceFilter, TourFilter,
};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use repository::Repository;
pub use store::{
    CachePolicy, CacheView, EntityCache, FileStorage, FilterSpec, MemoryStorage, OperationState,
    Range, SessionStorage,
};
pub use stream::EntityStream;

// The wire records are the domain records; re-export them for ergonomics.
pub use tripkit_api::models::*;
pub use tripkit_api::{EntityId, Page, Resource, SearchRequest, SortOrder, TlsMode, Writable};
