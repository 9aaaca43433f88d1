use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Service;
use crate::types::EntityId;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveBody {
    is_active: bool,
}

impl ApiClient {
    /// Enable or disable a service without touching its other fields.
    pub async fn set_service_active(&self, id: &EntityId, active: bool) -> Result<Service, Error> {
        self.patch(
            &format!("services/{id}/status"),
            &ActiveBody { is_active: active },
        )
        .await
    }
}
