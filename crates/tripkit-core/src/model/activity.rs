use serde::{Deserialize, Serialize};

use super::{Activity, Difficulty, Entity, EntityId};
use crate::store::filter::{flag, in_range, in_set_ci, in_set_opt, same};
use crate::store::{FilterSpec, Range};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFilter {
    /// Matched case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Vec<Difficulty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Range<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<Range<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl FilterSpec<Activity> for ActivityFilter {
    fn matches(&self, a: &Activity) -> bool {
        in_set_ci(self.category.as_ref(), Some(a.category.as_str()))
            && in_set_opt(self.difficulty.as_ref(), a.difficulty.as_ref())
            && same(self.destination_id.as_ref(), a.destination_id.as_ref())
            && in_range(self.price.as_ref(), &a.price)
            && in_range(self.duration_hours.as_ref(), &a.duration_hours)
            && flag(self.is_active, a.is_active)
    }
}

impl Entity for Activity {
    type Filter = ActivityFilter;
    type Stats = ();

    const STORAGE_KEY: &'static str = "activity-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unrated_difficulty_fails_difficulty_set() {
        let activity: Activity = serde_json::from_value(json!({
            "id": "a1",
            "name": "Wine tasting",
            "category": "Food & Drink",
            "durationHours": 2.5,
            "price": 45.0
        }))
        .unwrap();

        let by_category = ActivityFilter {
            category: Some(vec!["food & drink".into()]),
            duration_hours: Some(Range::between(2.0, 3.0)),
            ..ActivityFilter::default()
        };
        assert!(by_category.matches(&activity));

        let by_difficulty = ActivityFilter {
            difficulty: Some(vec![Difficulty::Easy]),
            ..ActivityFilter::default()
        };
        assert!(!by_difficulty.matches(&activity));
    }
}
