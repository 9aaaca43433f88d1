use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BlogPost, Entity, EntityId};
use crate::store::filter::{in_range_opt, in_set_ci, overlaps_ci};
use crate::store::{FilterSpec, Range};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFilter {
    /// Matched case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    /// Matches posts carrying any of these tags (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Range<DateTime<Utc>>>,
}

impl FilterSpec<BlogPost> for BlogFilter {
    fn matches(&self, p: &BlogPost) -> bool {
        in_set_ci(self.category.as_ref(), p.category.as_deref())
            && overlaps_ci(self.tags.as_ref(), &p.tags)
            && in_range_opt(self.published_at.as_ref(), p.published_at.as_ref())
    }
}

impl Entity for BlogPost {
    type Filter = BlogFilter;
    type Stats = ();

    const STORAGE_KEY: &'static str = "blog-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str()];
        fields.extend(self.author.as_deref());
        fields.extend(self.category.as_deref());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn tag_overlap_and_category() {
        let post: BlogPost = serde_json::from_value(json!({
            "id": "p1",
            "slug": "ten-days-in-peru",
            "title": "Ten days in Peru",
            "category": "Guides",
            "tags": ["Hiking", "Andes"]
        }))
        .unwrap();

        let filter = BlogFilter {
            category: Some(vec!["guides".into()]),
            tags: Some(vec!["andes".into(), "beach".into()]),
            ..BlogFilter::default()
        };
        assert!(filter.matches(&post));

        let filter = BlogFilter {
            tags: Some(vec!["beach".into()]),
            ..BlogFilter::default()
        };
        assert!(!filter.matches(&post));
    }
}
