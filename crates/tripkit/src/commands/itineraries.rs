//! Itinerary command handlers.

use std::fmt::Write;

use tabled::Tabled;
use tripkit_core::{Controller, EntityId, Itinerary};

use crate::cli::{GlobalOpts, ItinerariesArgs, ItinerariesCommand};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};

#[derive(Tabled)]
pub struct ItineraryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tour")]
    tour: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Days")]
    days: String,
}

impl Present for Itinerary {
    type Row = ItineraryRow;

    fn row(&self) -> ItineraryRow {
        ItineraryRow {
            id: self.id.to_string(),
            tour: self.tour_id.to_string(),
            title: self.title.clone(),
            days: self.days.len().to_string(),
        }
    }

    fn detail(&self) -> String {
        let mut out = output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Tour", self.tour_id.to_string()),
            ("Title", self.title.clone()),
            ("Description", self.description.clone().unwrap_or_default()),
        ]);
        for day in &self.days {
            let _ = write!(out, "\n\nDay {}: {}", day.day, day.title);
            if !day.description.is_empty() {
                let _ = write!(out, "\n  {}", day.description);
            }
            if !day.meals.is_empty() {
                let _ = write!(out, "\n  Meals: {}", day.meals.join(", "));
            }
            if let Some(ref stay) = day.accommodation {
                let _ = write!(out, "\n  Stay: {stay}");
            }
        }
        out
    }
}

pub async fn handle(
    controller: &Controller,
    args: ItinerariesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.itineraries();
    match args.command {
        ItinerariesCommand::Crud(cmd) => crud::crud(repo, cmd, global).await,
        ItinerariesCommand::ByTour { tour, refresh } => {
            let items = repo
                .by_tour(&EntityId::from(tour), refresh || global.no_cache)
                .await?;
            crud::print_list(&items, global)
        }
    }
}
