//! Generic list/get/search and create/update/delete handlers.
//!
//! Each entity module implements [`Present`] (table row + detail view)
//! and routes its flattened shared verbs here.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tabled::Tabled;

use tripkit_core::{Entity, EntityId, FilterSpec, Repository, SearchRequest, Writable};

use crate::cli::{CrudCommand, GlobalOpts, ListArgs, ReadCommand, SearchArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// How an entity renders in table output.
pub trait Present: Entity {
    type Row: Tabled;

    fn row(&self) -> Self::Row;

    fn detail(&self) -> String;
}

// ── Rendering ───────────────────────────────────────────────────────

pub fn print_list<E: Present>(items: &[Arc<E>], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        items,
        |e| e.row(),
        |e| e.id().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn print_one<E: Present>(entity: &E, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(
        &global.output,
        entity,
        |e| e.detail(),
        |e| e.id().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Read verbs ──────────────────────────────────────────────────────

pub async fn read<E: Present>(
    repo: &Repository<E>,
    cmd: ReadCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        ReadCommand::List(args) => list(repo, args, global).await,

        ReadCommand::Get { id } => {
            let entity = repo.get_by_id(&EntityId::from(id)).await?;
            print_one(entity.as_ref(), global)
        }

        ReadCommand::Search(args) => {
            let request = search_request::<E>(args)?;
            let items = repo.search(&request).await?;
            print_list(&items, global)
        }
    }
}

/// Fetch (or reuse) the list, then narrow it locally by query and filter.
async fn list<E: Present>(
    repo: &Repository<E>,
    args: ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filter = args
        .filter
        .as_deref()
        .map(util::parse_filter::<E>)
        .transpose()?
        .filter(|f| !f.is_empty());

    repo.get_all(filter.as_ref(), args.refresh || global.no_cache)
        .await?;

    let cache = repo.cache();
    if let Some(filter) = filter {
        cache.set_filter(filter);
    }
    if let Some(query) = args.query {
        cache.set_search_query(query);
    }
    print_list(&cache.filtered(), global)
}

fn search_request<E: Entity>(args: SearchArgs) -> Result<SearchRequest<E::Filter>, CliError> {
    let mut request = SearchRequest::new(args.query);
    request.filters = args
        .filter
        .as_deref()
        .map(util::parse_filter::<E>)
        .transpose()?;
    request.sort_by = args.sort_by;
    request.sort_order = args.order;
    request.page = args.page;
    request.limit = args.limit;
    Ok(request)
}

// ── Write verbs ─────────────────────────────────────────────────────

pub async fn crud<E>(
    repo: &Repository<E>,
    cmd: CrudCommand,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    E: Present + Writable,
    E::Draft: DeserializeOwned,
    E::Patch: DeserializeOwned,
{
    match cmd {
        CrudCommand::Read(read_cmd) => read(repo, read_cmd, global).await,

        CrudCommand::Create { from_file } => {
            let draft: E::Draft = util::read_json_file(&from_file)?;
            let created = repo.create(&draft).await?;
            print_one(&created, global)
        }

        CrudCommand::Update { id, from_file } => {
            let patch: E::Patch = util::read_json_file(&from_file)?;
            let updated = repo.update(&EntityId::from(id), &patch).await?;
            print_one(&updated, global)
        }

        CrudCommand::Delete { id } => {
            if !util::confirm(&format!("Delete {} '{id}'?", E::NAME), global.yes)? {
                return Ok(());
            }
            repo.delete(&EntityId::from(id)).await?;
            Ok(())
        }
    }
}
