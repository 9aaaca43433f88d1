//! FAQ and policy command handlers.

use tabled::Tabled;
use tripkit_core::{Controller, InfoEntry};

use crate::cli::{GlobalOpts, InfoArgs, InfoCommand};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct InfoRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Order")]
    order: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Published")]
    published: String,
}

impl Present for InfoEntry {
    type Row = InfoRow;

    fn row(&self) -> InfoRow {
        InfoRow {
            id: self.id.to_string(),
            kind: self.kind.to_string(),
            order: self.order.to_string(),
            title: self.title.clone(),
            published: util::yes_no(self.published),
        }
    }

    fn detail(&self) -> String {
        format!(
            "{}\n\n{}",
            output::detail_lines(&[
                ("ID", self.id.to_string()),
                ("Kind", self.kind.to_string()),
                ("Category", self.category.clone().unwrap_or_default()),
                ("Title", self.title.clone()),
                ("Published", util::yes_no(self.published)),
            ]),
            self.content
        )
    }
}

pub async fn handle(
    controller: &Controller,
    args: InfoArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.info();
    match args.command {
        InfoCommand::Crud(cmd) => crud::crud(repo, cmd, global).await,
        InfoCommand::Faqs { refresh } => {
            repo.get_all(None, refresh || global.no_cache).await?;
            crud::print_list(&repo.faqs(), global)
        }
        InfoCommand::Policies { refresh } => {
            repo.get_all(None, refresh || global.no_cache).await?;
            crud::print_list(&repo.policies(), global)
        }
    }
}
