use tracing::debug;

use super::StatusBody;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Itinerary, Tour, TourStatus};
use crate::types::EntityId;

impl ApiClient {
    pub async fn update_tour_status(
        &self,
        id: &EntityId,
        status: TourStatus,
    ) -> Result<Tour, Error> {
        debug!(tour = %id, %status, "updating tour status");
        self.patch(&format!("tours/{id}/status"), &StatusBody { status })
            .await
    }

    pub async fn tours_by_destination(&self, destination: &EntityId) -> Result<Vec<Tour>, Error> {
        self.get(&format!("tours/destination/{destination}")).await
    }

    /// Itineraries attached to one tour, in day order.
    pub async fn itineraries_by_tour(&self, tour: &EntityId) -> Result<Vec<Itinerary>, Error> {
        self.get(&format!("itineraries/tour/{tour}")).await
    }
}
