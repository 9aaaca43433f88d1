use tracing::debug;

use super::{ReasonBody, StatusBody};
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Payment, PaymentStats, PaymentStatus};
use crate::types::EntityId;

impl ApiClient {
    pub async fn payment_stats(&self) -> Result<PaymentStats, Error> {
        self.get("payments/stats").await
    }

    pub async fn update_payment_status(
        &self,
        id: &EntityId,
        status: PaymentStatus,
    ) -> Result<Payment, Error> {
        debug!(payment = %id, %status, "updating payment status");
        self.patch(&format!("payments/{id}/status"), &StatusBody { status })
            .await
    }

    /// Refund a completed payment. The returned record carries the new status.
    pub async fn refund_payment(
        &self,
        id: &EntityId,
        reason: Option<&str>,
    ) -> Result<Payment, Error> {
        self.post(&format!("payments/{id}/refund"), &ReasonBody { reason })
            .await
    }
}
