use super::{EntityList, Repository};
use crate::error::CoreError;
use crate::model::Destination;
use crate::store::cache::DETAIL;

impl Repository<Destination> {
    pub async fn popular(&self, force_refresh: bool) -> Result<EntityList<Destination>, CoreError> {
        self.fetch_view("popular", force_refresh).await
    }

    pub async fn featured(
        &self,
        force_refresh: bool,
    ) -> Result<EntityList<Destination>, CoreError> {
        self.fetch_view("featured", force_refresh).await
    }

    pub async fn by_slug(&self, slug: &str) -> Result<std::sync::Arc<Destination>, CoreError> {
        let ticket = self.cache().begin_fetch(DETAIL);
        match self.api().destination_by_slug(slug).await {
            Ok(destination) => Ok(self.commit_selected(ticket, destination)),
            Err(e) => {
                let err = CoreError::from(e);
                let err = if err.is_not_found() {
                    CoreError::not_found("destination", slug)
                } else {
                    err
                };
                Err(Self::read_failed(ticket, err))
            }
        }
    }
}
