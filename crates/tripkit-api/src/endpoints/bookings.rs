use tracing::debug;

use super::{ReasonBody, StatusBody};
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Booking, BookingPayment, BookingStats, BookingStatus, NewBookingPayment};
use crate::types::EntityId;

impl ApiClient {
    /// Aggregate booking counters and revenue.
    pub async fn booking_stats(&self) -> Result<BookingStats, Error> {
        self.get("bookings/stats").await
    }

    pub async fn update_booking_status(
        &self,
        id: &EntityId,
        status: BookingStatus,
    ) -> Result<Booking, Error> {
        debug!(booking = %id, %status, "updating booking status");
        self.patch(&format!("bookings/{id}/status"), &StatusBody { status })
            .await
    }

    pub async fn cancel_booking(
        &self,
        id: &EntityId,
        reason: Option<&str>,
    ) -> Result<Booking, Error> {
        self.post(&format!("bookings/{id}/cancel"), &ReasonBody { reason })
            .await
    }

    /// Payments recorded against one booking.
    pub async fn list_booking_payments(&self, id: &EntityId) -> Result<Vec<BookingPayment>, Error> {
        self.get(&format!("bookings/{id}/payments")).await
    }

    /// Record a payment; the backend returns the updated booking.
    pub async fn add_booking_payment(
        &self,
        id: &EntityId,
        payment: &NewBookingPayment,
    ) -> Result<Booking, Error> {
        self.post(&format!("bookings/{id}/payments"), payment).await
    }
}
