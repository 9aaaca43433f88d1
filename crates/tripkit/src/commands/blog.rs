//! Blog command handlers (read-only).

use tabled::Tabled;
use tripkit_core::{BlogPost, Controller};

use crate::cli::{BlogArgs, BlogCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};

#[derive(Tabled)]
pub struct BlogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Published")]
    published: String,
}

impl Present for BlogPost {
    type Row = BlogRow;

    fn row(&self) -> BlogRow {
        BlogRow {
            id: self.id.to_string(),
            title: self.title.clone(),
            category: self.category.clone().unwrap_or_default(),
            published: self
                .published_at
                .map(|t| t.date_naive().to_string())
                .unwrap_or_default(),
        }
    }

    fn detail(&self) -> String {
        format!(
            "{}\n\n{}",
            output::detail_lines(&[
                ("ID", self.id.to_string()),
                ("Title", self.title.clone()),
                ("Slug", self.slug.clone()),
                ("Author", self.author.clone().unwrap_or_default()),
                ("Category", self.category.clone().unwrap_or_default()),
                ("Tags", self.tags.join(", ")),
                (
                    "Published",
                    self.published_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                ),
            ]),
            self.excerpt
        )
    }
}

pub async fn handle(
    controller: &Controller,
    args: BlogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.blog();
    match args.command {
        BlogCommand::Read(cmd) => crud::read(repo, cmd, global).await,
        BlogCommand::Slug { slug } => {
            let post = repo.by_slug(&slug).await?;
            crud::print_one(post.as_ref(), global)
        }
    }
}
