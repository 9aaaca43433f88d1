use serde::{Deserialize, Serialize};

use super::{Difficulty, Entity, EntityId, Tour, TourStatus};
use crate::store::filter::{flag, in_range, in_set, same};
use crate::store::{FilterSpec, Range};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<TourStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Vec<Difficulty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Range<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<Range<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl FilterSpec<Tour> for TourFilter {
    fn matches(&self, t: &Tour) -> bool {
        in_set(self.status.as_ref(), &t.status)
            && in_set(self.difficulty.as_ref(), &t.difficulty)
            && same(self.destination_id.as_ref(), Some(&t.destination_id))
            && in_range(self.price.as_ref(), &t.price)
            && in_range(self.duration_days.as_ref(), &t.duration_days)
            && flag(self.featured, t.featured)
    }
}

impl Entity for Tour {
    type Filter = TourFilter;
    type Stats = ();

    const STORAGE_KEY: &'static str = "tour-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.status.as_ref(),
        ];
        fields.extend(self.destination_name.as_deref());
        fields
    }
}
