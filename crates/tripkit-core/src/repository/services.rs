use super::Repository;
use crate::error::CoreError;
use crate::model::{EntityId, Service};

impl Repository<Service> {
    pub async fn set_active(&self, id: &EntityId, active: bool) -> Result<Service, CoreError> {
        self.mutate_record(self.api().set_service_active(id, active), |s| {
            let state = if s.is_active { "enabled" } else { "disabled" };
            format!("Service {} {state}", s.name)
        })
        .await
    }
}
