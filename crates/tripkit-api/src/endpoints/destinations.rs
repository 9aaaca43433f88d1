use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Activity, Destination};
use crate::types::EntityId;

impl ApiClient {
    pub async fn destination_by_slug(&self, slug: &str) -> Result<Destination, Error> {
        self.get(&format!("destinations/slug/{slug}")).await
    }

    /// Activities offered at one destination.
    pub async fn activities_by_destination(
        &self,
        destination: &EntityId,
    ) -> Result<Vec<Activity>, Error> {
        self.get(&format!("activities/destination/{destination}"))
            .await
    }
}
