use super::{EntityList, Repository};
use crate::error::CoreError;
use crate::model::{Activity, EntityId};

impl Repository<Activity> {
    pub async fn by_destination(
        &self,
        destination: &EntityId,
        force_refresh: bool,
    ) -> Result<EntityList<Activity>, CoreError> {
        self.load_view(
            &format!("destination:{destination}"),
            force_refresh,
            self.api().activities_by_destination(destination),
        )
        .await
    }
}
