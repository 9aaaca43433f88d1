use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, Itinerary};
use crate::store::filter::{in_range, same};
use crate::store::{FilterSpec, Range};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_count: Option<Range<u32>>,
}

impl FilterSpec<Itinerary> for ItineraryFilter {
    fn matches(&self, i: &Itinerary) -> bool {
        let days = u32::try_from(i.days.len()).unwrap_or(u32::MAX);
        same(self.tour_id.as_ref(), Some(&i.tour_id)) && in_range(self.day_count.as_ref(), &days)
    }
}

impl Entity for Itinerary {
    type Filter = ItineraryFilter;
    type Stats = ();

    const STORAGE_KEY: &'static str = "itinerary-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.days.iter().map(|d| d.title.as_str()));
        fields
    }
}
