use tracing::debug;

use super::Repository;
use crate::error::CoreError;
use crate::model::{
    Booking, BookingPayment, BookingStats, BookingStatus, EntityId, NewBookingPayment,
};

/// Category for one booking's payments sub-resource. Keyed per booking
/// so reads for different bookings never supersede each other.
pub fn payments_category(id: &EntityId) -> String {
    format!("payments:{id}")
}

impl Repository<Booking> {
    pub async fn stats(&self, force_refresh: bool) -> Result<BookingStats, CoreError> {
        self.load_stats(force_refresh, self.api().booking_stats())
            .await
    }

    pub async fn update_status(
        &self,
        id: &EntityId,
        status: BookingStatus,
    ) -> Result<Booking, CoreError> {
        self.mutate_record(self.api().update_booking_status(id, status), |b| {
            format!("Booking {} is now {}", b.reference, b.status)
        })
        .await
    }

    pub async fn cancel(&self, id: &EntityId, reason: Option<&str>) -> Result<Booking, CoreError> {
        self.mutate_record(self.api().cancel_booking(id, reason), |b| {
            format!("Booking {} cancelled", b.reference)
        })
        .await
    }

    /// Fetch a booking's payments and store them on the cached booking.
    pub async fn payments(&self, id: &EntityId) -> Result<Vec<BookingPayment>, CoreError> {
        let ticket = self.cache().begin_fetch(&payments_category(id));
        match self.api().list_booking_payments(id).await {
            Ok(payments) => {
                let nested = payments.clone();
                ticket.commit(|s| {
                    if !s.update_with(id, |b| b.payments = nested) {
                        debug!(booking = %id, "payments fetched for uncached booking");
                    }
                });
                self.persist();
                Ok(payments)
            }
            Err(e) => Err(Self::read_failed(ticket, e.into())),
        }
    }

    pub async fn add_payment(
        &self,
        id: &EntityId,
        payment: &NewBookingPayment,
    ) -> Result<Booking, CoreError> {
        self.mutate_record(self.api().add_booking_payment(id, payment), |b| {
            format!(
                "Payment recorded for booking {} ({:.2} {} due)",
                b.reference,
                b.balance_due(),
                b.currency
            )
        })
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::PaymentMethod;
    use crate::model::test_support::booking;
    use crate::store::EntityCache;

    fn card(amount: f64) -> BookingPayment {
        BookingPayment {
            id: None,
            amount,
            method: PaymentMethod::Card,
            reference: None,
            paid_at: None,
        }
    }

    #[test]
    fn payment_reads_for_different_bookings_both_apply() {
        let cache = EntityCache::default();
        cache.replace_all(vec![
            booking("a", BookingStatus::Confirmed),
            booking("b", BookingStatus::Confirmed),
        ]);
        let (a, b) = (EntityId::from("a"), EntityId::from("b"));

        let first = cache.begin_fetch(&payments_category(&a));
        let second = cache.begin_fetch(&payments_category(&b));

        assert!(second.commit(|s| {
            s.update_with(&b, |x| x.payments = vec![card(50.0)]);
        }));
        assert!(first.commit(|s| {
            s.update_with(&a, |x| x.payments = vec![card(100.0)]);
        }));

        assert_eq!(cache.get(&a).unwrap().payments.len(), 1);
        assert_eq!(cache.get(&b).unwrap().payments.len(), 1);
    }

    #[test]
    fn payment_reads_for_same_booking_keep_newest() {
        let cache = EntityCache::default();
        cache.replace_all(vec![booking("a", BookingStatus::Confirmed)]);
        let a = EntityId::from("a");

        let older = cache.begin_fetch(&payments_category(&a));
        let newer = cache.begin_fetch(&payments_category(&a));

        assert!(newer.commit(|s| {
            s.update_with(&a, |x| x.payments = vec![card(10.0), card(20.0)]);
        }));
        assert!(!older.commit(|s| {
            s.update_with(&a, |x| x.payments = Vec::new());
        }));
        assert_eq!(cache.get(&a).unwrap().payments.len(), 2);
    }
}
