// Entity-specific endpoints that fall outside the generic CRUD surface.
//
// Each file adds inherent methods to `ApiClient`, grouped by the
// collection they address.

use serde::Serialize;

mod blog;
mod bookings;
mod destinations;
mod payments;
mod services;
mod tours;

/// `{ "status": ... }` body for the status PATCH endpoints.
#[derive(Serialize)]
struct StatusBody<S> {
    status: S,
}

/// Optional free-text reason attached to cancellations and refunds.
#[derive(Serialize)]
struct ReasonBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}
