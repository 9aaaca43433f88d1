//! Wire records for every REST collection.
//!
//! Field names follow the backend's camelCase JSON. Records accept either
//! `id` or MongoDB-style `_id`. Each writable record has a `*Draft` create
//! payload and a `*Patch` partial update payload whose absent fields are
//! omitted from the request body.

mod activity;
mod blog;
mod booking;
mod destination;
mod info;
mod itinerary;
mod payment;
mod service;
mod tour;

pub use activity::{Activity, ActivityDraft, ActivityPatch};
pub use blog::BlogPost;
pub use booking::{
    Booking, BookingDraft, BookingPatch, BookingPayment, BookingPaymentState, BookingStats,
    BookingStatus, Customer, NewBookingPayment, Participant,
};
pub use destination::{Destination, DestinationDraft, DestinationImage, DestinationPatch};
pub use info::{InfoDraft, InfoEntry, InfoKind, InfoPatch};
pub use itinerary::{Itinerary, ItineraryDay, ItineraryDraft, ItineraryPatch};
pub use payment::{Payment, PaymentDraft, PaymentMethod, PaymentPatch, PaymentStats, PaymentStatus};
pub use service::{PricingUnit, Service, ServiceCategory, ServiceDraft, ServicePatch};
pub use tour::{Difficulty, Tour, TourDraft, TourPatch, TourStatus};

fn default_currency() -> String {
    "USD".into()
}
