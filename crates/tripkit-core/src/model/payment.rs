use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, Payment, PaymentMethod, PaymentStats, PaymentStatus};
use crate::store::filter::{in_range, in_range_opt, in_set, same};
use crate::store::{FilterSpec, Range};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<PaymentStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Vec<PaymentMethod>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Range<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<Range<DateTime<Utc>>>,
}

impl FilterSpec<Payment> for PaymentFilter {
    fn matches(&self, p: &Payment) -> bool {
        in_set(self.status.as_ref(), &p.status)
            && in_set(self.method.as_ref(), &p.method)
            && same(self.booking_id.as_ref(), Some(&p.booking_id))
            && in_range(self.amount.as_ref(), &p.amount)
            && in_range_opt(self.paid_at.as_ref(), p.paid_at.as_ref())
    }
}

impl Entity for Payment {
    type Filter = PaymentFilter;
    type Stats = PaymentStats;

    const STORAGE_KEY: &'static str = "payment-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.transaction_ref.as_str(),
            self.customer_name.as_str(),
            self.customer_email.as_str(),
            self.status.as_ref(),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::store::filter::apply;

    fn payment(id: &str, method: &str, status: &str, paid_at: Option<&str>) -> Payment {
        serde_json::from_value(json!({
            "id": id,
            "bookingId": "b1",
            "transactionRef": format!("TX-{id}"),
            "customerName": "Rui Costa",
            "customerEmail": "rui@example.com",
            "amount": 300.0,
            "method": method,
            "status": status,
            "paidAt": paid_at
        }))
        .unwrap()
    }

    #[test]
    fn method_and_status_sets() {
        let filter = PaymentFilter {
            method: Some(vec![PaymentMethod::BankTransfer]),
            status: Some(vec![PaymentStatus::Completed, PaymentStatus::Refunded]),
            ..PaymentFilter::default()
        };
        assert!(filter.matches(&payment("1", "bank_transfer", "completed", None)));
        assert!(!filter.matches(&payment("2", "card", "completed", None)));
        assert!(!filter.matches(&payment("3", "bank_transfer", "failed", None)));
    }

    #[test]
    fn paid_at_window_excludes_unpaid() {
        let filter = PaymentFilter {
            paid_at: Some(Range::at_least(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())),
            ..PaymentFilter::default()
        };
        assert!(filter.matches(&payment("1", "card", "completed", Some("2024-03-02T10:00:00Z"))));
        assert!(!filter.matches(&payment("2", "card", "pending", None)));
    }

    #[test]
    fn search_by_transaction_ref() {
        let list = vec![
            Arc::new(payment("1", "card", "completed", None)),
            Arc::new(payment("2", "cash", "pending", None)),
        ];
        let view = apply(&list, "tx-2", &PaymentFilter::default());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id.as_str(), "2");
    }
}
