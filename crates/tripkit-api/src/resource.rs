// Generic resource endpoints
//
// Every entity collection exposes the same REST shape:
//
//   GET    /{path}            list (filters as query params)
//   GET    /{path}/{id}       single record
//   POST   /{path}            create
//   PUT    /{path}/{id}       update
//   DELETE /{path}/{id}       delete
//   POST   /{path}/search     free-text search
//   GET    /{path}/{view}     named server-side views ("popular", "featured")
//
// The per-entity files under `endpoints/` add the operations that do not
// fit this shape.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::query::to_query_pairs;
use crate::types::{EntityId, Page, SearchRequest};

/// A record type served by a REST collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path relative to the API base, e.g. `"bookings"`.
    const PATH: &'static str;

    /// Singular human-readable name used in logs and messages.
    const NAME: &'static str;
}

/// A resource that accepts create, update and delete.
pub trait Writable: Resource {
    /// Create payload.
    type Draft: Serialize + Send + Sync;
    /// Partial update payload.
    type Patch: Serialize + Send + Sync;
}

impl ApiClient {
    /// List a whole collection.
    ///
    /// `GET /{path}`
    pub async fn list<R: Resource>(&self) -> Result<Page<R>, Error> {
        debug!(resource = R::NAME, "listing");
        self.get_with_params(R::PATH, &[]).await
    }

    /// List a collection narrowed by server-side filters.
    ///
    /// `GET /{path}?{filters}` (see [`to_query_pairs`] for the flattening).
    pub async fn list_filtered<R: Resource, F: Serialize + Sync + ?Sized>(
        &self,
        filters: &F,
    ) -> Result<Page<R>, Error> {
        let params = to_query_pairs(filters)?;
        debug!(resource = R::NAME, filters = params.len(), "listing with filters");
        self.get_with_params(R::PATH, &params).await
    }

    /// Fetch one record.
    ///
    /// `GET /{path}/{id}`
    pub async fn get_by_id<R: Resource>(&self, id: &EntityId) -> Result<R, Error> {
        self.get(&format!("{}/{id}", R::PATH)).await
    }

    /// Create a record.
    ///
    /// `POST /{path}`
    pub async fn create<R: Writable>(&self, draft: &R::Draft) -> Result<R, Error> {
        debug!(resource = R::NAME, "creating");
        self.post(R::PATH, draft).await
    }

    /// Update a record with a partial patch.
    ///
    /// `PUT /{path}/{id}`
    pub async fn update<R: Writable>(&self, id: &EntityId, patch: &R::Patch) -> Result<R, Error> {
        debug!(resource = R::NAME, %id, "updating");
        self.put(&format!("{}/{id}", R::PATH), patch).await
    }

    /// Delete a record, returning the server's confirmation message.
    ///
    /// `DELETE /{path}/{id}`
    pub async fn delete_by_id<R: Writable>(&self, id: &EntityId) -> Result<String, Error> {
        debug!(resource = R::NAME, %id, "deleting");
        self.delete(&format!("{}/{id}", R::PATH)).await
    }

    /// Free-text search with optional filters, sorting and paging.
    ///
    /// `POST /{path}/search`
    pub async fn search<R: Resource, F: Serialize + Sync>(
        &self,
        request: &SearchRequest<F>,
    ) -> Result<Page<R>, Error> {
        debug!(resource = R::NAME, query = %request.query, "searching");
        self.post(&format!("{}/search", R::PATH), request).await
    }

    /// Fetch a named server-side view of the collection.
    ///
    /// `GET /{path}/{view}`, e.g. `destinations/popular`, `tours/featured`.
    pub async fn list_view<R: Resource>(&self, view: &str) -> Result<Vec<R>, Error> {
        debug!(resource = R::NAME, view, "fetching view");
        self.get(&format!("{}/{view}", R::PATH)).await
    }
}
