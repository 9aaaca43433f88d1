use super::Repository;
use crate::error::CoreError;
use crate::model::{EntityId, Payment, PaymentStats, PaymentStatus};

impl Repository<Payment> {
    pub async fn stats(&self, force_refresh: bool) -> Result<PaymentStats, CoreError> {
        self.load_stats(force_refresh, self.api().payment_stats())
            .await
    }

    pub async fn update_status(
        &self,
        id: &EntityId,
        status: PaymentStatus,
    ) -> Result<Payment, CoreError> {
        self.mutate_record(self.api().update_payment_status(id, status), |p| {
            format!("Payment {} marked {}", p.transaction_ref, p.status)
        })
        .await
    }

    pub async fn refund(&self, id: &EntityId, reason: Option<&str>) -> Result<Payment, CoreError> {
        self.mutate_record(self.api().refund_payment(id, reason), |p| {
            format!("Refunded {:.2} {} ({})", p.amount, p.currency, p.transaction_ref)
        })
        .await
    }
}
