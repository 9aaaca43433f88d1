// ── Generic entity cache ──
//
// One reactive cache per entity type. State lives in a `watch` channel
// and every mutation is a single `send_modify` transition, so
// subscribers only ever observe a consistent (list, query, filter,
// filtered) quadruple.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use super::filter::{self, FilterSpec};
use super::persist::{PersistedCache, SessionStorage};
use super::policy::{self, CachePolicy};
use crate::model::{Entity, EntityId};
use crate::stream::EntityStream;

/// Category for the unfiltered full list.
pub const LIST: &str = "list";
/// Category for single-record fetches.
pub const DETAIL: &str = "detail";
/// Category for server-side search.
pub const SEARCH: &str = "search";
/// Category shared by create, update, delete and status changes.
pub const MUTATION: &str = "mutation";
/// Category for aggregate statistics.
pub const STATS: &str = "stats";

// ── Per-category operation flags ─────────────────────────────────────

/// Loading and error flags for one operation category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationState {
    /// Requests currently outstanding for this category.
    pub in_flight: u32,
    pub error: Option<String>,
    /// Highest sequence number handed out.
    pub issued: u64,
    /// Highest sequence number whose outcome has been applied.
    pub applied: u64,
}

impl OperationState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

// ── Snapshot ─────────────────────────────────────────────────────────

/// A consistent snapshot of one entity cache.
#[derive(Debug, Clone)]
pub struct CacheView<E: Entity> {
    pub items: Arc<Vec<Arc<E>>>,
    /// `items` narrowed by `query` and `filter`; never mutated directly.
    pub filtered: Arc<Vec<Arc<E>>>,
    pub selected: Option<Arc<E>>,
    pub query: String,
    pub filter: E::Filter,
    pub stats: Option<E::Stats>,
    /// Secondary server-defined lists (`popular`, `tour:{id}`, ...).
    pub views: HashMap<String, Arc<Vec<Arc<E>>>>,
    pub timestamps: BTreeMap<String, DateTime<Utc>>,
    pub operations: HashMap<String, OperationState>,
}

impl<E: Entity> Default for CacheView<E> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            filtered: Arc::new(Vec::new()),
            selected: None,
            query: String::new(),
            filter: E::Filter::default(),
            stats: None,
            views: HashMap::new(),
            timestamps: BTreeMap::new(),
            operations: HashMap::new(),
        }
    }
}

impl<E: Entity> CacheView<E> {
    pub fn operation(&self, category: &str) -> OperationState {
        self.operations.get(category).cloned().unwrap_or_default()
    }

    pub fn is_loading(&self, category: &str) -> bool {
        self.operations
            .get(category)
            .is_some_and(OperationState::is_loading)
    }

    pub fn error(&self, category: &str) -> Option<&str> {
        self.operations.get(category)?.error.as_deref()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Arc<E>> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn view(&self, name: &str) -> Option<&Arc<Vec<Arc<E>>>> {
        self.views.get(name)
    }

    // ── Transitions (always called inside `send_modify`) ─────────────

    fn refilter(&mut self) {
        self.filtered = Arc::new(filter::apply(&self.items, &self.query, &self.filter));
    }

    pub(crate) fn replace_all(&mut self, items: Vec<E>) {
        self.items = Arc::new(items.into_iter().map(Arc::new).collect());
        // The selection survives a reload; it only re-points at a fresh copy.
        if let Some(fresh) = self
            .selected
            .as_ref()
            .and_then(|s| self.items.iter().find(|e| e.id() == s.id()))
        {
            self.selected = Some(Arc::clone(fresh));
        }
        self.refilter();
    }

    pub(crate) fn add(&mut self, entity: E) {
        Arc::make_mut(&mut self.items).push(Arc::new(entity));
        self.refilter();
    }

    /// Replace the first entity with a matching id, keeping its position.
    pub(crate) fn update(&mut self, entity: E) -> bool {
        let entity = Arc::new(entity);
        let replaced = {
            let items = Arc::make_mut(&mut self.items);
            match items.iter_mut().find(|e| e.id() == entity.id()) {
                Some(slot) => {
                    *slot = Arc::clone(&entity);
                    true
                }
                None => false,
            }
        };

        if self
            .selected
            .as_ref()
            .is_some_and(|s| s.id() == entity.id())
        {
            self.selected = Some(entity);
        }
        if replaced {
            self.refilter();
        }
        replaced
    }

    /// Apply `f` to a copy of the entity with `id` and store the result.
    pub(crate) fn update_with(&mut self, id: &EntityId, f: impl FnOnce(&mut E)) -> bool {
        let Some(current) = self
            .get(id)
            .or_else(|| self.selected.as_ref().filter(|s| s.id() == id))
        else {
            return false;
        };
        let mut next = E::clone(current);
        f(&mut next);
        if !self.update(next.clone()) {
            self.selected = Some(Arc::new(next));
        }
        true
    }

    /// Drop `id` from the list, the selection and every named view.
    /// Returns the list entry, if the list held one.
    pub(crate) fn remove(&mut self, id: &EntityId) -> Option<Arc<E>> {
        if self.selected.as_ref().is_some_and(|s| s.id() == id) {
            self.selected = None;
        }
        for view in self.views.values_mut() {
            if view.iter().any(|e| e.id() == id) {
                Arc::make_mut(view).retain(|e| e.id() != id);
            }
        }
        let position = self.items.iter().position(|e| e.id() == id)?;
        let removed = Arc::make_mut(&mut self.items).remove(position);
        self.refilter();
        Some(removed)
    }

    pub(crate) fn select(&mut self, entity: Option<E>) {
        self.selected = entity.map(Arc::new);
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
        self.refilter();
    }

    pub(crate) fn set_filter(&mut self, filter: E::Filter) {
        self.filter = filter;
        self.refilter();
    }

    pub(crate) fn set_view(&mut self, name: &str, items: Vec<E>) {
        self.views.insert(
            name.to_owned(),
            Arc::new(items.into_iter().map(Arc::new).collect()),
        );
    }

    pub(crate) fn set_stats(&mut self, stats: E::Stats) {
        self.stats = Some(stats);
    }

    pub(crate) fn stamp(&mut self, category: &str) {
        self.timestamps.insert(category.to_owned(), Utc::now());
    }

    pub(crate) fn invalidate(&mut self, category: &str) {
        self.timestamps.remove(category);
    }
}

// ── EntityCache ──────────────────────────────────────────────────────

/// Reactive cache for a single entity type.
pub struct EntityCache<E: Entity> {
    state: watch::Sender<CacheView<E>>,
    policy: CachePolicy,
}

impl<E: Entity> EntityCache<E> {
    pub fn new(policy: CachePolicy) -> Self {
        let (state, _) = watch::channel(CacheView::default());
        Self { state, policy }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// A consistent copy of the whole state (cheap: lists are `Arc`ed).
    pub fn snapshot(&self) -> CacheView<E> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> EntityStream<E> {
        EntityStream::new(self.state.subscribe())
    }

    pub fn items(&self) -> Arc<Vec<Arc<E>>> {
        Arc::clone(&self.state.borrow().items)
    }

    pub fn filtered(&self) -> Arc<Vec<Arc<E>>> {
        Arc::clone(&self.state.borrow().filtered)
    }

    pub fn selected(&self) -> Option<Arc<E>> {
        self.state.borrow().selected.clone()
    }

    pub fn get(&self, id: &EntityId) -> Option<Arc<E>> {
        self.state.borrow().get(id).cloned()
    }

    pub fn stats(&self) -> Option<E::Stats> {
        self.state.borrow().stats.clone()
    }

    pub fn view(&self, name: &str) -> Option<Arc<Vec<Arc<E>>>> {
        self.state.borrow().view(name).cloned()
    }

    pub fn is_loading(&self, category: &str) -> bool {
        self.state.borrow().is_loading(category)
    }

    pub fn error(&self, category: &str) -> Option<String> {
        self.state.borrow().error(category).map(str::to_owned)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().items.is_empty()
    }

    // ── Cache validity ───────────────────────────────────────────────

    /// `false` if `category` was never stamped, otherwise whether the
    /// stamp is younger than the policy's `max_age`.
    pub fn is_cache_valid(&self, category: &str) -> bool {
        self.is_cache_valid_within(category, self.policy.max_age)
    }

    /// Like [`is_cache_valid`](Self::is_cache_valid) with a caller-chosen window.
    pub fn is_cache_valid_within(&self, category: &str, max_age: Duration) -> bool {
        self.state
            .borrow()
            .timestamps
            .get(category)
            .is_some_and(|ts| policy::is_fresh(*ts, Utc::now(), max_age))
    }

    pub fn timestamp(&self, category: &str) -> Option<DateTime<Utc>> {
        self.state.borrow().timestamps.get(category).copied()
    }

    pub fn update_cache_timestamp(&self, category: &str) {
        self.state.send_modify(|s| s.stamp(category));
    }

    pub fn invalidate(&self, category: &str) {
        self.state.send_modify(|s| s.invalidate(category));
    }

    /// Whether the unfiltered list can be served without a fetch.
    pub fn is_list_cache_hit(&self) -> bool {
        self.is_cache_valid(LIST) && (self.policy.cache_empty_results || !self.is_empty())
    }

    // ── CRUD list mutators ───────────────────────────────────────────

    pub fn replace_all(&self, items: Vec<E>) {
        self.state.send_modify(|s| s.replace_all(items));
    }

    pub fn add(&self, entity: E) {
        self.state.send_modify(|s| s.add(entity));
    }

    /// Returns `false` when no entity with that id is cached.
    pub fn update(&self, entity: E) -> bool {
        let mut replaced = false;
        self.state.send_modify(|s| replaced = s.update(entity));
        replaced
    }

    pub fn update_with(&self, id: &EntityId, f: impl FnOnce(&mut E)) -> bool {
        let mut found = false;
        self.state.send_modify(|s| found = s.update_with(id, f));
        found
    }

    pub fn remove(&self, id: &EntityId) -> Option<Arc<E>> {
        let mut removed = None;
        self.state.send_modify(|s| removed = s.remove(id));
        removed
    }

    pub fn select(&self, entity: Option<E>) {
        self.state.send_modify(|s| s.select(entity));
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.set_query(query));
    }

    pub fn set_filter(&self, filter: E::Filter) {
        self.state.send_modify(|s| s.set_filter(filter));
    }

    /// Reset both the search query and the filter.
    pub fn clear_filters(&self) {
        self.state.send_modify(|s| {
            s.query.clear();
            s.filter = E::Filter::default();
            s.refilter();
        });
    }

    pub fn set_stats(&self, stats: E::Stats) {
        self.state.send_modify(|s| s.set_stats(stats));
    }

    pub fn set_view(&self, name: &str, items: Vec<E>) {
        self.state.send_modify(|s| s.set_view(name, items));
    }

    pub fn clear_error(&self, category: &str) {
        self.state.send_modify(|s| {
            if let Some(op) = s.operations.get_mut(category) {
                op.error = None;
            }
        });
    }

    // ── Request sequencing ───────────────────────────────────────────

    /// Start a read for `category`. Its outcome is applied only if no
    /// later-issued read for the same category already resolved.
    pub fn begin_fetch(&self, category: &str) -> FetchTicket<'_, E> {
        self.begin(category, true)
    }

    /// Start a mutation. Mutations never discard each other.
    pub fn begin_mutation(&self, category: &str) -> FetchTicket<'_, E> {
        self.begin(category, false)
    }

    fn begin(&self, category: &str, ordered: bool) -> FetchTicket<'_, E> {
        let mut seq = 0;
        self.state.send_modify(|s| {
            let op = s.operations.entry(category.to_owned()).or_default();
            op.in_flight += 1;
            op.issued += 1;
            op.error = None;
            seq = op.issued;
        });
        trace!(resource = E::NAME, category, seq, "request started");
        FetchTicket {
            cache: self,
            category: category.to_owned(),
            seq,
            ordered,
            done: false,
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    pub fn to_persisted(&self) -> PersistedCache<E> {
        PersistedCache::from_view(&self.state.borrow())
    }

    /// Write the persistable subset to `storage`. Failures are logged.
    pub fn persist(&self, storage: &dyn SessionStorage) {
        let persisted = self.to_persisted();
        let result = serde_json::to_string(&persisted)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                storage
                    .store(E::STORAGE_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!(key = E::STORAGE_KEY, error = %e, "failed to persist cache");
        }
    }

    /// Load persisted state from `storage`, dropping every timestamp that
    /// is already outside the cache window. Returns whether anything was
    /// restored.
    pub fn rehydrate(&self, storage: &dyn SessionStorage) -> bool {
        let raw = match storage.load(E::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                warn!(key = E::STORAGE_KEY, error = %e, "failed to read persisted cache");
                return false;
            }
        };

        let persisted: PersistedCache<E> = match serde_json::from_str(&raw) {
            Ok(p) => p,
            Err(e) => {
                warn!(key = E::STORAGE_KEY, error = %e, "discarding unreadable persisted cache");
                return false;
            }
        };

        self.restore(persisted);
        true
    }

    pub fn restore(&self, persisted: PersistedCache<E>) {
        let now = Utc::now();
        let timestamps = persisted.fresh_timestamps(&self.policy, now);
        debug!(
            key = E::STORAGE_KEY,
            items = persisted.items.len(),
            fresh = timestamps.len(),
            "rehydrated cache"
        );
        self.state.send_modify(|s| {
            s.replace_all(persisted.items);
            s.stats = persisted.stats;
            s.timestamps = timestamps;
        });
    }
}

impl<E: Entity> Default for EntityCache<E> {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

// ── FetchTicket ──────────────────────────────────────────────────────

/// An outstanding request for one category.
///
/// Dropping the ticket without resolving it still releases the loading
/// flag, so an early return or panic never leaves a category loading.
#[must_use = "a ticket releases its loading flag when resolved or dropped"]
pub struct FetchTicket<'a, E: Entity> {
    cache: &'a EntityCache<E>,
    category: String,
    seq: u64,
    ordered: bool,
    done: bool,
}

impl<E: Entity> FetchTicket<'_, E> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Apply a successful outcome. Returns `false` if a newer request
    /// for the category already resolved and `apply` was skipped.
    pub fn commit(mut self, apply: impl FnOnce(&mut CacheView<E>)) -> bool {
        let mut applied = false;
        let (category, seq, ordered) = (self.category.as_str(), self.seq, self.ordered);
        self.cache.state.send_modify(|s| {
            let op = s.operations.entry(category.to_owned()).or_default();
            op.in_flight = op.in_flight.saturating_sub(1);
            if ordered && seq <= op.applied {
                return;
            }
            op.applied = op.applied.max(seq);
            op.error = None;
            apply(s);
            applied = true;
        });
        self.done = true;
        if !applied {
            debug!(resource = E::NAME, category, seq, "discarding stale response");
        }
        applied
    }

    /// Record a failure message under the same ordering rule as `commit`.
    pub fn fail(mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        let mut applied = false;
        let (category, seq, ordered) = (self.category.as_str(), self.seq, self.ordered);
        self.cache.state.send_modify(|s| {
            let op = s.operations.entry(category.to_owned()).or_default();
            op.in_flight = op.in_flight.saturating_sub(1);
            if ordered && seq <= op.applied {
                return;
            }
            op.applied = op.applied.max(seq);
            op.error = Some(message);
            applied = true;
        });
        self.done = true;
        applied
    }
}

impl<E: Entity> Drop for FetchTicket<'_, E> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let category = self.category.as_str();
        self.cache.state.send_modify(|s| {
            if let Some(op) = s.operations.get_mut(category) {
                op.in_flight = op.in_flight.saturating_sub(1);
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Booking, BookingFilter, BookingStatus};
    use crate::model::test_support::booking;
    use crate::store::MemoryStorage;

    fn ids(list: &[Arc<Booking>]) -> Vec<&str> {
        list.iter().map(|b| b.id.as_str()).collect()
    }

    fn seeded() -> EntityCache<Booking> {
        let cache = EntityCache::default();
        cache.replace_all(vec![
            booking("1", BookingStatus::Pending),
            booking("2", BookingStatus::Confirmed),
            booking("3", BookingStatus::Pending),
        ]);
        cache
    }

    // ── Filtered view ────────────────────────────────────────────────

    #[test]
    fn unconstrained_view_is_identity() {
        let cache = seeded();
        assert_eq!(ids(&cache.filtered()), vec!["1", "2", "3"]);
    }

    #[test]
    fn status_filter_narrows_view() {
        let cache = EntityCache::default();
        cache.replace_all(vec![
            booking("1", BookingStatus::Pending),
            booking("2", BookingStatus::Confirmed),
        ]);
        cache.set_filter(BookingFilter {
            status: Some(vec![BookingStatus::Confirmed]),
            ..BookingFilter::default()
        });
        assert_eq!(ids(&cache.filtered()), vec!["2"]);

        cache.clear_filters();
        assert_eq!(ids(&cache.filtered()), vec!["1", "2"]);
    }

    #[test]
    fn added_entity_appears_when_it_matches() {
        let cache = seeded();
        cache.set_filter(BookingFilter {
            status: Some(vec![BookingStatus::Pending]),
            ..BookingFilter::default()
        });
        cache.add(booking("4", BookingStatus::Pending));
        cache.add(booking("5", BookingStatus::Cancelled));

        assert_eq!(ids(&cache.filtered()), vec!["1", "3", "4"]);
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn filtered_view_is_subset_of_items() {
        let cache = seeded();
        cache.set_search_query("BK-2");
        let items = cache.items();
        for entity in cache.filtered().iter() {
            assert!(items.iter().any(|i| Arc::ptr_eq(i, entity)));
        }
        assert_eq!(ids(&cache.filtered()), vec!["2"]);
    }

    // ── Mutators ─────────────────────────────────────────────────────

    #[test]
    fn update_preserves_position_and_selection() {
        let cache = seeded();
        cache.select(Some(booking("2", BookingStatus::Confirmed)));

        let mut changed = booking("2", BookingStatus::Completed);
        changed.notes = Some("late checkout".into());
        assert!(cache.update(changed));

        assert_eq!(ids(&cache.items()), vec!["1", "2", "3"]);
        assert_eq!(cache.items()[1].status, BookingStatus::Completed);
        assert_eq!(
            cache.selected().unwrap().notes.as_deref(),
            Some("late checkout")
        );
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let cache = seeded();
        assert!(!cache.update(booking("9", BookingStatus::Pending)));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn remove_clears_matching_selection() {
        let cache = seeded();
        cache.select(Some(booking("3", BookingStatus::Pending)));

        cache.remove(&EntityId::from("1"));
        assert!(cache.selected().is_some());

        let removed = cache.remove(&EntityId::from("3")).unwrap();
        assert_eq!(removed.id.as_str(), "3");
        assert!(cache.selected().is_none());
        assert_eq!(ids(&cache.items()), vec!["2"]);
        assert!(cache.get(&EntityId::from("3")).is_none());
    }

    #[test]
    fn remove_clears_selection_missing_from_list() {
        let cache = seeded();
        cache.select(Some(booking("9", BookingStatus::Pending)));
        cache.set_view("recent", vec![booking("9", BookingStatus::Pending)]);

        assert!(cache.remove(&EntityId::from("9")).is_none());
        assert!(cache.selected().is_none());
        assert!(cache.view("recent").unwrap().is_empty());
        assert_eq!(ids(&cache.items()), vec!["1", "2", "3"]);
    }

    #[test]
    fn replace_all_keeps_selection_absent_from_new_list() {
        let cache = seeded();
        cache.select(Some(booking("9", BookingStatus::Pending)));

        cache.replace_all(vec![booking("1", BookingStatus::Pending)]);
        assert_eq!(cache.selected().unwrap().id.as_str(), "9");
    }

    #[test]
    fn replace_all_repoints_selection_at_fresh_copy() {
        let cache = seeded();
        cache.select(Some(booking("2", BookingStatus::Confirmed)));

        cache.replace_all(vec![booking("2", BookingStatus::Completed)]);
        assert_eq!(cache.selected().unwrap().status, BookingStatus::Completed);
    }

    #[test]
    fn update_with_edits_nested_data() {
        let cache = seeded();
        assert!(cache.update_with(&EntityId::from("1"), |b| b.paid_amount = 250.0));
        assert!((cache.get(&EntityId::from("1")).unwrap().paid_amount - 250.0).abs() < 1e-9);
        assert!(!cache.update_with(&EntityId::from("nope"), |_| {}));
    }

    // ── Cache validity ───────────────────────────────────────────────

    #[test]
    fn unstamped_category_is_invalid() {
        let cache = seeded();
        assert!(!cache.is_cache_valid(LIST));
        cache.update_cache_timestamp(LIST);
        assert!(cache.is_cache_valid(LIST));
        assert!(!cache.is_cache_valid(STATS));
        cache.invalidate(LIST);
        assert!(!cache.is_cache_valid(LIST));
    }

    #[test]
    fn explicit_window_overrides_policy_age() {
        let cache: EntityCache<Booking> =
            EntityCache::new(CachePolicy::default().with_max_age(Duration::ZERO));
        cache.update_cache_timestamp(LIST);
        assert!(!cache.is_cache_valid(LIST));
        assert!(cache.is_cache_valid_within(LIST, Duration::from_secs(300)));
        assert!(!cache.is_cache_valid_within(STATS, Duration::from_secs(300)));
        assert!(!cache.is_cache_valid_within(LIST, Duration::ZERO));
    }

    #[test]
    fn zero_max_age_never_hits() {
        let cache: EntityCache<Booking> =
            EntityCache::new(CachePolicy::default().with_max_age(Duration::ZERO));
        cache.update_cache_timestamp(LIST);
        assert!(!cache.is_cache_valid(LIST));
    }

    #[test]
    fn empty_list_hit_follows_policy() {
        let cache: EntityCache<Booking> = EntityCache::default();
        cache.update_cache_timestamp(LIST);
        assert!(cache.is_list_cache_hit());

        let strict: EntityCache<Booking> = EntityCache::new(CachePolicy {
            cache_empty_results: false,
            ..CachePolicy::default()
        });
        strict.update_cache_timestamp(LIST);
        assert!(!strict.is_list_cache_hit());
        strict.add(booking("1", BookingStatus::Pending));
        assert!(strict.is_list_cache_hit());
    }

    // ── Sequencing ───────────────────────────────────────────────────

    #[test]
    fn stale_fetch_is_discarded() {
        let cache: EntityCache<Booking> = EntityCache::default();
        let first = cache.begin_fetch(LIST);
        let second = cache.begin_fetch(LIST);
        assert!(cache.is_loading(LIST));

        assert!(second.commit(|s| s.replace_all(vec![booking("new", BookingStatus::Pending)])));
        assert!(cache.is_loading(LIST));
        assert!(!first.commit(|s| s.replace_all(vec![booking("old", BookingStatus::Pending)])));

        assert!(!cache.is_loading(LIST));
        assert_eq!(ids(&cache.items()), vec!["new"]);
    }

    #[test]
    fn stale_failure_does_not_mask_success() {
        let cache: EntityCache<Booking> = EntityCache::default();
        let first = cache.begin_fetch(LIST);
        let second = cache.begin_fetch(LIST);
        assert!(second.commit(|_| {}));
        assert!(!first.fail("connection reset"));
        assert_eq!(cache.error(LIST), None);
    }

    #[test]
    fn mutations_are_never_discarded() {
        let cache: EntityCache<Booking> = EntityCache::default();
        let a = cache.begin_mutation(MUTATION);
        let b = cache.begin_mutation(MUTATION);
        assert!(b.commit(|s| s.add(booking("b", BookingStatus::Pending))));
        assert!(a.commit(|s| s.add(booking("a", BookingStatus::Pending))));
        assert_eq!(ids(&cache.items()), vec!["b", "a"]);
    }

    #[test]
    fn dropped_ticket_releases_loading() {
        let cache: EntityCache<Booking> = EntityCache::default();
        {
            let _ticket = cache.begin_fetch(SEARCH);
            assert!(cache.is_loading(SEARCH));
        }
        assert!(!cache.is_loading(SEARCH));
    }

    #[test]
    fn categories_do_not_share_flags() {
        let cache: EntityCache<Booking> = EntityCache::default();
        let search = cache.begin_fetch(SEARCH);
        assert!(search.fail("search index offline"));
        assert_eq!(cache.error(SEARCH).as_deref(), Some("search index offline"));
        assert_eq!(cache.error(LIST), None);
        assert!(!cache.is_loading(LIST));
    }

    // ── Persistence ──────────────────────────────────────────────────

    #[test]
    fn persist_then_rehydrate_round_trips_list() {
        let storage = MemoryStorage::new();
        let cache = seeded();
        cache.update_cache_timestamp(LIST);
        cache.select(Some(booking("1", BookingStatus::Pending)));
        cache.set_search_query("anything");
        cache.persist(&storage);

        let restored: EntityCache<Booking> = EntityCache::default();
        assert!(restored.rehydrate(&storage));
        assert_eq!(ids(&restored.items()), vec!["1", "2", "3"]);
        assert!(restored.is_cache_valid(LIST));
        assert!(restored.selected().is_none());
        assert!(restored.snapshot().query.is_empty());
    }

    #[test]
    fn rehydrate_without_entry_is_a_no_op() {
        let storage = MemoryStorage::new();
        let cache: EntityCache<Booking> = EntityCache::default();
        assert!(!cache.rehydrate(&storage));
        assert!(cache.is_empty());
    }
}
