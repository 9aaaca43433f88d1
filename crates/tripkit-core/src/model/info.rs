use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, InfoEntry, InfoKind};
use crate::store::FilterSpec;
use crate::store::filter::{flag, in_set, in_set_ci};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Vec<InfoKind>>,
    /// Matched case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl FilterSpec<InfoEntry> for InfoFilter {
    fn matches(&self, e: &InfoEntry) -> bool {
        in_set(self.kind.as_ref(), &e.kind)
            && in_set_ci(self.category.as_ref(), e.category.as_deref())
            && flag(self.published, e.published)
    }
}

impl Entity for InfoEntry {
    type Filter = InfoFilter;
    type Stats = ();

    const STORAGE_KEY: &'static str = "info-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.content.as_str()];
        fields.extend(self.category.as_deref());
        fields
    }
}
