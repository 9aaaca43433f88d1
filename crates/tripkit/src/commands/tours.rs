//! Tour command handlers.

use chrono::Utc;
use tabled::Tabled;
use tripkit_core::{Controller, EntityId, Tour};

use crate::cli::{GlobalOpts, ToursArgs, ToursCommand};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct TourRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Days")]
    days: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Next")]
    next: String,
}

impl Present for Tour {
    type Row = TourRow;

    fn row(&self) -> TourRow {
        let today = Utc::now().date_naive();
        TourRow {
            id: self.id.to_string(),
            title: self.title.clone(),
            destination: self
                .destination_name
                .clone()
                .unwrap_or_else(|| self.destination_id.to_string()),
            days: self.duration_days.to_string(),
            price: util::money(self.price),
            difficulty: self.difficulty.to_string(),
            status: self.status.to_string(),
            next: self
                .next_departure(today)
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }

    fn detail(&self) -> String {
        let today = Utc::now().date_naive();
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Title", self.title.clone()),
            ("Slug", self.slug.clone()),
            (
                "Destination",
                self.destination_name
                    .clone()
                    .unwrap_or_else(|| self.destination_id.to_string()),
            ),
            ("Duration", format!("{} days", self.duration_days)),
            ("Price", util::money(self.price)),
            ("Max group", self.max_participants.to_string()),
            ("Difficulty", self.difficulty.to_string()),
            ("Status", self.status.to_string()),
            ("Featured", util::yes_no(self.featured)),
            (
                "Next departure",
                self.next_departure(today)
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ),
            ("Highlights", self.highlights.join(", ")),
            ("Description", self.description.clone()),
        ])
    }
}

pub async fn handle(
    controller: &Controller,
    args: ToursArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.tours();
    match args.command {
        ToursCommand::Crud(cmd) => crud::crud(repo, cmd, global).await,
        ToursCommand::Featured { refresh } => {
            let items = repo.featured(refresh || global.no_cache).await?;
            crud::print_list(&items, global)
        }
        ToursCommand::ByDestination {
            destination,
            refresh,
        } => {
            let items = repo
                .by_destination(&EntityId::from(destination), refresh || global.no_cache)
                .await?;
            crud::print_list(&items, global)
        }
        ToursCommand::Status { id, status } => {
            let tour = repo.update_status(&EntityId::from(id), status).await?;
            crud::print_one(&tour, global)
        }
    }
}
