use serde::{Deserialize, Serialize};

use super::{Destination, Entity, EntityId};
use crate::store::filter::{flag, in_range_opt, in_set_ci};
use crate::store::{FilterSpec, Range};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationFilter {
    /// Matched case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Vec<String>>,
    /// Matched case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_active_tours: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Range<f32>>,
}

impl FilterSpec<Destination> for DestinationFilter {
    fn matches(&self, d: &Destination) -> bool {
        in_set_ci(self.country.as_ref(), Some(d.country.as_str()))
            && in_set_ci(self.region.as_ref(), d.region.as_deref())
            && flag(self.featured, d.featured)
            && flag(self.has_active_tours, d.has_active_tours())
            && in_range_opt(self.rating.as_ref(), d.rating.as_ref())
    }
}

impl Entity for Destination {
    type Filter = DestinationFilter;
    type Stats = ();

    const STORAGE_KEY: &'static str = "destination-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.country.as_str(),
            self.description.as_str(),
        ];
        fields.extend(self.region.as_deref());
        fields
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn destination(country: &str, active_tours: u32, rating: Option<f32>) -> Destination {
        serde_json::from_value(json!({
            "id": format!("{country}-{active_tours}"),
            "name": format!("Somewhere in {country}"),
            "country": country,
            "activeTours": active_tours,
            "rating": rating
        }))
        .unwrap()
    }

    #[test]
    fn country_match_ignores_case() {
        let filter = DestinationFilter {
            country: Some(vec!["portugal".into()]),
            ..DestinationFilter::default()
        };
        assert!(filter.matches(&destination("Portugal", 1, None)));
        assert!(!filter.matches(&destination("Spain", 1, None)));
    }

    #[test]
    fn active_tours_flag() {
        let filter = DestinationFilter {
            has_active_tours: Some(false),
            ..DestinationFilter::default()
        };
        assert!(filter.matches(&destination("Peru", 0, None)));
        assert!(!filter.matches(&destination("Peru", 4, None)));
    }

    #[test]
    fn unrated_destination_fails_rating_range() {
        let filter = DestinationFilter {
            rating: Some(Range::at_least(4.0)),
            ..DestinationFilter::default()
        };
        assert!(filter.matches(&destination("Chile", 1, Some(4.5))));
        assert!(!filter.matches(&destination("Chile", 1, None)));
    }

    #[test]
    fn missing_region_fails_region_set() {
        let filter = DestinationFilter {
            region: Some(vec!["Algarve".into()]),
            ..DestinationFilter::default()
        };
        assert!(!filter.matches(&destination("Portugal", 1, None)));
    }
}
