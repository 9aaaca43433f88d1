use super::{EntityList, Repository};
use crate::error::CoreError;
use crate::model::{EntityId, Itinerary};

impl Repository<Itinerary> {
    pub async fn by_tour(
        &self,
        tour: &EntityId,
        force_refresh: bool,
    ) -> Result<EntityList<Itinerary>, CoreError> {
        self.load_view(
            &format!("tour:{tour}"),
            force_refresh,
            self.api().itineraries_by_tour(tour),
        )
        .await
    }
}
