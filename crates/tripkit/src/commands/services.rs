//! Add-on service command handlers.

use tabled::Tabled;
use tripkit_core::{Controller, EntityId, Service};

use crate::cli::{GlobalOpts, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct ServiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl Present for Service {
    type Row = ServiceRow;

    fn row(&self) -> ServiceRow {
        ServiceRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            category: self.category.to_string(),
            price: util::money(self.price),
            unit: self.pricing_unit.to_string(),
            active: util::yes_no(self.is_active),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Category", self.category.to_string()),
            ("Price", util::money(self.price)),
            ("Unit", self.pricing_unit.to_string()),
            ("Provider", self.provider.clone().unwrap_or_default()),
            ("Active", util::yes_no(self.is_active)),
            ("Description", self.description.clone()),
        ])
    }
}

pub async fn handle(
    controller: &Controller,
    args: ServicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.services();
    match args.command {
        ServicesCommand::Crud(cmd) => crud::crud(repo, cmd, global).await,
        ServicesCommand::Enable { id } => {
            let service = repo.set_active(&EntityId::from(id), true).await?;
            crud::print_one(&service, global)
        }
        ServicesCommand::Disable { id } => {
            let service = repo.set_active(&EntityId::from(id), false).await?;
            crud::print_one(&service, global)
        }
    }
}
