use super::{EntityList, Repository};
use crate::error::CoreError;
use crate::model::{EntityId, Tour, TourStatus};

impl Repository<Tour> {
    pub async fn featured(&self, force_refresh: bool) -> Result<EntityList<Tour>, CoreError> {
        self.fetch_view("featured", force_refresh).await
    }

    pub async fn by_destination(
        &self,
        destination: &EntityId,
        force_refresh: bool,
    ) -> Result<EntityList<Tour>, CoreError> {
        self.load_view(
            &format!("destination:{destination}"),
            force_refresh,
            self.api().tours_by_destination(destination),
        )
        .await
    }

    pub async fn update_status(&self, id: &EntityId, status: TourStatus) -> Result<Tour, CoreError> {
        self.mutate_record(self.api().update_tour_status(id, status), |t| {
            format!("Tour {} is now {}", t.title, t.status)
        })
        .await
    }
}
