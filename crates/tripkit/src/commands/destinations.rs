//! Destination command handlers.

use tabled::Tabled;
use tripkit_core::{Controller, Destination};

use crate::cli::{DestinationsArgs, DestinationsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct DestinationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Tours")]
    tours: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Featured")]
    featured: String,
}

impl Present for Destination {
    type Row = DestinationRow;

    fn row(&self) -> DestinationRow {
        DestinationRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            country: self.country.clone(),
            region: self.region.clone().unwrap_or_default(),
            tours: self.active_tours.to_string(),
            rating: self.rating.map(|r| format!("{r:.1}")).unwrap_or_default(),
            featured: util::yes_no(self.featured),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Slug", self.slug.clone()),
            ("Country", self.country.clone()),
            ("Region", self.region.clone().unwrap_or_default()),
            ("Active tours", self.active_tours.to_string()),
            (
                "Rating",
                self.rating.map(|r| format!("{r:.1}")).unwrap_or_default(),
            ),
            ("Featured", util::yes_no(self.featured)),
            (
                "Image",
                self.primary_image()
                    .map(|i| i.url.clone())
                    .unwrap_or_default(),
            ),
            ("Description", self.description.clone()),
        ])
    }
}

pub async fn handle(
    controller: &Controller,
    args: DestinationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.destinations();
    match args.command {
        DestinationsCommand::Crud(cmd) => crud::crud(repo, cmd, global).await,
        DestinationsCommand::Popular { refresh } => {
            let items = repo.popular(refresh || global.no_cache).await?;
            crud::print_list(&items, global)
        }
        DestinationsCommand::Featured { refresh } => {
            let items = repo.featured(refresh || global.no_cache).await?;
            crud::print_list(&items, global)
        }
        DestinationsCommand::Slug { slug } => {
            let destination = repo.by_slug(&slug).await?;
            crud::print_one(destination.as_ref(), global)
        }
    }
}
