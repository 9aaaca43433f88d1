use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    Booking, BookingPaymentState, BookingStats, BookingStatus, Entity, EntityId,
};
use crate::store::filter::{in_range, in_set, same};
use crate::store::{FilterSpec, Range};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<BookingStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<Vec<BookingPaymentState>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Range<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Range<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<Range<u32>>,
}

impl FilterSpec<Booking> for BookingFilter {
    fn matches(&self, b: &Booking) -> bool {
        let participants = u32::try_from(b.participants.len()).unwrap_or(u32::MAX);
        in_set(self.status.as_ref(), &b.status)
            && in_set(self.payment_status.as_ref(), &b.payment_status)
            && same(self.tour_id.as_ref(), b.tour_id.as_ref())
            && in_range(self.start_date.as_ref(), &b.start_date)
            && in_range(self.total_amount.as_ref(), &b.total_amount)
            && in_range(self.participant_count.as_ref(), &participants)
    }
}

impl Entity for Booking {
    type Filter = BookingFilter;
    type Stats = BookingStats;

    const STORAGE_KEY: &'static str = "booking-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.reference.as_str(),
            self.customer.name.as_str(),
            self.customer.email.as_str(),
            self.status.as_ref(),
        ];
        fields.extend(self.tour_title.as_deref());
        fields
    }
}
