//! Activity command handlers.

use tabled::Tabled;
use tripkit_core::{Activity, Controller, EntityId};

use crate::cli::{ActivitiesArgs, ActivitiesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct ActivityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl Present for Activity {
    type Row = ActivityRow;

    fn row(&self) -> ActivityRow {
        ActivityRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            category: self.category.clone(),
            hours: format!("{:.1}", self.duration_hours),
            price: util::money(self.price),
            active: util::yes_no(self.is_active),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Category", self.category.clone()),
            (
                "Destination",
                self.destination_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            ("Duration", format!("{:.1} h", self.duration_hours)),
            ("Price", util::money(self.price)),
            (
                "Difficulty",
                self.difficulty.map(|d| d.to_string()).unwrap_or_default(),
            ),
            ("Active", util::yes_no(self.is_active)),
            ("Description", self.description.clone()),
        ])
    }
}

pub async fn handle(
    controller: &Controller,
    args: ActivitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.activities();
    match args.command {
        ActivitiesCommand::Crud(cmd) => crud::crud(repo, cmd, global).await,
        ActivitiesCommand::ByDestination {
            destination,
            refresh,
        } => {
            let items = repo
                .by_destination(&EntityId::from(destination), refresh || global.no_cache)
                .await?;
            crud::print_list(&items, global)
        }
    }
}
