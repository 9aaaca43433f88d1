use std::sync::Arc;

use super::Repository;
use crate::model::{InfoEntry, InfoKind};

impl Repository<InfoEntry> {
    /// Cached FAQ entries in display order.
    pub fn faqs(&self) -> Vec<Arc<InfoEntry>> {
        self.of_kind(InfoKind::Faq)
    }

    /// Cached policy entries in display order.
    pub fn policies(&self) -> Vec<Arc<InfoEntry>> {
        self.of_kind(InfoKind::Policy)
    }

    fn of_kind(&self, kind: InfoKind) -> Vec<Arc<InfoEntry>> {
        let mut entries: Vec<_> = self
            .cache()
            .items()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.order);
        entries
    }
}
