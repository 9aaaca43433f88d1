// ── Repositories ──
//
// One repository per entity type. Every action follows the same
// discipline: consult the cache policy, open a ticket for its category,
// call the service layer, then commit or fail the ticket. Tickets release
// their loading flag on every path. Mutations notify; reads only set the
// category error.

mod activities;
mod blog;
mod bookings;
mod destinations;
mod info;
mod itineraries;
mod payments;
mod services;
mod tours;

use std::future::Future;
use std::sync::Arc;

use tracing::debug;
use tripkit_api::{ApiClient, Resource, SearchRequest, Writable};

use crate::error::CoreError;
use crate::model::{Entity, EntityId};
use crate::notify::Notifier;
use crate::store::cache::{DETAIL, LIST, MUTATION, SEARCH, STATS};
use crate::store::{CacheView, EntityCache, FetchTicket, SessionStorage};
use crate::stream::EntityStream;

/// Shared list type returned by list-shaped actions.
pub type EntityList<E> = Arc<Vec<Arc<E>>>;

/// Orchestrates service calls and cache transitions for one entity type.
pub struct Repository<E: Entity> {
    api: ApiClient,
    cache: Arc<EntityCache<E>>,
    notifier: Notifier,
    storage: Arc<dyn SessionStorage>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            cache: Arc::clone(&self.cache),
            notifier: self.notifier.clone(),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(
        api: ApiClient,
        cache: Arc<EntityCache<E>>,
        notifier: Notifier,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self {
            api,
            cache,
            notifier,
            storage,
        }
    }

    pub fn cache(&self) -> &Arc<EntityCache<E>> {
        &self.cache
    }

    pub fn subscribe(&self) -> EntityStream<E> {
        self.cache.subscribe()
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    // ── Generic actions ──────────────────────────────────────────────

    /// Fetch the full list, serving it from cache when possible.
    ///
    /// The cache is consulted only when `force_refresh` is off and no
    /// `filters` are given. A filtered response replaces the list but is
    /// not treated as a fresh unfiltered cache.
    pub async fn get_all(
        &self,
        filters: Option<&E::Filter>,
        force_refresh: bool,
    ) -> Result<EntityList<E>, CoreError> {
        if !force_refresh && filters.is_none() && self.cache.is_list_cache_hit() {
            debug!(resource = E::NAME, "list cache hit");
            return Ok(self.cache.items());
        }
        debug!(
            resource = E::NAME,
            filtered = filters.is_some(),
            force_refresh,
            "list cache miss"
        );

        let ticket = self.cache.begin_fetch(LIST);
        let result = match filters {
            Some(filters) => self.api.list_filtered::<E, _>(filters).await,
            None => self.api.list::<E>().await,
        };

        match result {
            Ok(page) => {
                let filtered = filters.is_some();
                ticket.commit(|s| {
                    s.replace_all(page.items);
                    if filtered {
                        s.invalidate(LIST);
                    } else {
                        s.stamp(LIST);
                    }
                });
                self.persist();
                Ok(self.cache.items())
            }
            Err(e) => Err(Self::read_failed(ticket, e.into())),
        }
    }

    /// Fetch one record, select it, and refresh its list entry if cached.
    pub async fn get_by_id(&self, id: &EntityId) -> Result<Arc<E>, CoreError> {
        let ticket = self.cache.begin_fetch(DETAIL);
        match self.api.get_by_id::<E>(id).await {
            Ok(entity) => Ok(self.commit_selected(ticket, entity)),
            Err(e) => {
                let err = CoreError::from(e);
                let err = if err.is_not_found() {
                    CoreError::not_found(E::NAME, id.as_str())
                } else {
                    err
                };
                Err(Self::read_failed(ticket, err))
            }
        }
    }

    /// Server-side search. Results land in the `search` view; the query
    /// also narrows the local filtered view.
    pub async fn search(
        &self,
        request: &SearchRequest<E::Filter>,
    ) -> Result<EntityList<E>, CoreError> {
        let ticket = self.cache.begin_fetch(SEARCH);
        match self.api.search::<E, E::Filter>(request).await {
            Ok(page) => {
                let query = request.query.clone();
                ticket.commit(|s| {
                    s.set_view(SEARCH, page.items);
                    s.set_query(query);
                });
                Ok(self.cache.view(SEARCH).unwrap_or_default())
            }
            Err(e) => Err(Self::read_failed(ticket, e.into())),
        }
    }

    /// Fetch a server-defined secondary list such as `popular`.
    pub async fn fetch_view(
        &self,
        name: &str,
        force_refresh: bool,
    ) -> Result<EntityList<E>, CoreError> {
        self.load_view(name, force_refresh, self.api.list_view::<E>(name))
            .await
    }

    // ── Building blocks ──────────────────────────────────────────────

    pub(crate) fn persist(&self) {
        self.cache.persist(self.storage.as_ref());
    }

    pub(crate) fn read_failed(ticket: FetchTicket<'_, E>, err: CoreError) -> CoreError {
        debug!(
            resource = E::NAME,
            category = ticket.category(),
            error = %err,
            "read failed"
        );
        ticket.fail(err.user_message());
        err
    }

    pub(crate) fn commit_selected(&self, ticket: FetchTicket<'_, E>, entity: E) -> Arc<E> {
        let selected = Arc::new(entity);
        let for_cache = E::clone(&selected);
        ticket.commit(|s| {
            s.select(Some(for_cache.clone()));
            s.update(for_cache);
        });
        selected
    }

    /// Fetch into a named view, served from cache while fresh.
    pub(crate) async fn load_view<Fut>(
        &self,
        name: &str,
        force_refresh: bool,
        fetch: Fut,
    ) -> Result<EntityList<E>, CoreError>
    where
        Fut: Future<Output = Result<Vec<E>, tripkit_api::Error>>,
    {
        if !force_refresh && self.cache.is_cache_valid(name) {
            if let Some(view) = self.cache.view(name) {
                debug!(resource = E::NAME, view = name, "view cache hit");
                return Ok(view);
            }
        }

        let ticket = self.cache.begin_fetch(name);
        match fetch.await {
            Ok(items) => {
                ticket.commit(|s| {
                    s.set_view(name, items);
                    s.stamp(name);
                });
                Ok(self.cache.view(name).unwrap_or_default())
            }
            Err(e) => Err(Self::read_failed(ticket, e.into())),
        }
    }

    /// Fetch aggregate statistics, served from cache while fresh.
    pub(crate) async fn load_stats<Fut>(
        &self,
        force_refresh: bool,
        fetch: Fut,
    ) -> Result<E::Stats, CoreError>
    where
        Fut: Future<Output = Result<E::Stats, tripkit_api::Error>>,
    {
        if !force_refresh && self.cache.is_cache_valid(STATS) {
            if let Some(stats) = self.cache.stats() {
                debug!(resource = E::NAME, "stats cache hit");
                return Ok(stats);
            }
        }

        let ticket = self.cache.begin_fetch(STATS);
        match fetch.await {
            Ok(stats) => {
                let cached = stats.clone();
                ticket.commit(|s| {
                    s.set_stats(cached);
                    s.stamp(STATS);
                });
                self.persist();
                Ok(stats)
            }
            Err(e) => Err(Self::read_failed(ticket, e.into())),
        }
    }

    /// Run a mutating call: apply its result, persist, and notify on
    /// success or failure.
    pub(crate) async fn mutate<T, Fut>(
        &self,
        fetch: Fut,
        success: impl FnOnce(&T) -> String,
        apply: impl FnOnce(&mut CacheView<E>, &T),
    ) -> Result<T, CoreError>
    where
        Fut: Future<Output = Result<T, tripkit_api::Error>>,
    {
        let ticket = self.cache.begin_mutation(MUTATION);
        match fetch.await {
            Ok(value) => {
                ticket.commit(|s| apply(s, &value));
                self.persist();
                self.notifier.success(success(&value));
                Ok(value)
            }
            Err(e) => {
                let err = CoreError::from(e);
                let message = err.user_message();
                ticket.fail(message.clone());
                self.notifier.error(message);
                Err(err)
            }
        }
    }
}

// ── CRUD (writable entities only) ────────────────────────────────────

impl<E: Entity + Writable> Repository<E> {
    pub async fn create(&self, draft: &E::Draft) -> Result<E, CoreError> {
        self.mutate(
            self.api.create::<E>(draft),
            |_| format!("{} created successfully", label::<E>()),
            |s, created| s.add(created.clone()),
        )
        .await
    }

    pub async fn update(&self, id: &EntityId, patch: &E::Patch) -> Result<E, CoreError> {
        self.mutate(
            self.api.update::<E>(id, patch),
            |_| format!("{} updated successfully", label::<E>()),
            |s, updated| {
                s.update(updated.clone());
            },
        )
        .await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        self.mutate(
            self.api.delete_by_id::<E>(id),
            |message: &String| {
                if message.is_empty() {
                    format!("{} deleted successfully", label::<E>())
                } else {
                    message.clone()
                }
            },
            |s, _| {
                s.remove(id);
            },
        )
        .await
        .map(|_| ())
    }

    /// Replace a cached record with a server response from a status-style
    /// endpoint, notifying with `message`.
    pub(crate) async fn mutate_record<Fut>(
        &self,
        fetch: Fut,
        message: impl FnOnce(&E) -> String,
    ) -> Result<E, CoreError>
    where
        Fut: Future<Output = Result<E, tripkit_api::Error>>,
    {
        self.mutate(fetch, message, |s, updated| {
            s.update(updated.clone());
        })
        .await
    }
}

/// `"info entry"` → `"Info entry"`.
fn label<R: Resource>() -> String {
    let mut chars = R::NAME.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
