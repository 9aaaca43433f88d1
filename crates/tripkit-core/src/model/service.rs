use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, PricingUnit, Service, ServiceCategory};
use crate::store::filter::{flag, in_range, in_set};
use crate::store::{FilterSpec, Range};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<ServiceCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_unit: Option<Vec<PricingUnit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Range<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl FilterSpec<Service> for ServiceFilter {
    fn matches(&self, s: &Service) -> bool {
        in_set(self.category.as_ref(), &s.category)
            && in_set(self.pricing_unit.as_ref(), &s.pricing_unit)
            && in_range(self.price.as_ref(), &s.price)
            && flag(self.is_active, s.is_active)
    }
}

impl Entity for Service {
    type Filter = ServiceFilter;
    type Stats = ();

    const STORAGE_KEY: &'static str = "services-storage";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_ref(),
        ];
        fields.extend(self.provider.as_deref());
        fields
    }
}
