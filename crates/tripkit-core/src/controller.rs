// ── Controller ──
//
// Entry point for consumers. Owns the service client, one cache per
// entity type and the notification channel, and hands out repositories
// that share them.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info};
use tripkit_api::{ApiClient, TransportConfig};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{
    Activity, BlogPost, Booking, Destination, Entity, InfoEntry, Itinerary, Payment, Service, Tour,
};
use crate::notify::{Notification, Notifier};
use crate::repository::Repository;
use crate::store::{EntityCache, SessionStorage};

/// Cheaply cloneable via `Arc<ControllerInner>`.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ClientConfig,
    notifier: Notifier,
    bookings: Repository<Booking>,
    destinations: Repository<Destination>,
    payments: Repository<Payment>,
    services: Repository<Service>,
    tours: Repository<Tour>,
    activities: Repository<Activity>,
    itineraries: Repository<Itinerary>,
    info: Repository<InfoEntry>,
    blog: Repository<BlogPost>,
}

impl Controller {
    /// Build the HTTP client from `config` and rehydrate every cache from
    /// the configured session storage.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: config.tls.clone(),
            ..TransportConfig::default()
        }
        .with_timeout(config.timeout);
        let api = ApiClient::new(config.base_url.as_str(), config.token.as_ref(), &transport)?;
        Ok(Self::with_client(config, api))
    }

    /// Use a pre-built client (tests, custom transports).
    pub fn with_client(config: ClientConfig, api: ApiClient) -> Self {
        let notifier = Notifier::new();
        let storage = Arc::clone(&config.storage);
        let repo = Builder {
            api: &api,
            config: &config,
            notifier: &notifier,
            storage: &storage,
        };

        let inner = ControllerInner {
            bookings: repo.build(),
            destinations: repo.build(),
            payments: repo.build(),
            services: repo.build(),
            tours: repo.build(),
            activities: repo.build(),
            itineraries: repo.build(),
            info: repo.build(),
            blog: repo.build(),
            notifier: notifier.clone(),
            config: config.clone(),
        };
        info!(base_url = %config.base_url, "controller ready");

        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Arc<Notification>> {
        self.inner.notifier.subscribe()
    }

    // ── Repositories ─────────────────────────────────────────────────

    pub fn bookings(&self) -> &Repository<Booking> {
        &self.inner.bookings
    }

    pub fn destinations(&self) -> &Repository<Destination> {
        &self.inner.destinations
    }

    pub fn payments(&self) -> &Repository<Payment> {
        &self.inner.payments
    }

    pub fn services(&self) -> &Repository<Service> {
        &self.inner.services
    }

    pub fn tours(&self) -> &Repository<Tour> {
        &self.inner.tours
    }

    pub fn activities(&self) -> &Repository<Activity> {
        &self.inner.activities
    }

    pub fn itineraries(&self) -> &Repository<Itinerary> {
        &self.inner.itineraries
    }

    pub fn info(&self) -> &Repository<InfoEntry> {
        &self.inner.info
    }

    pub fn blog(&self) -> &Repository<BlogPost> {
        &self.inner.blog
    }

    /// Drop every persisted snapshot. In-memory caches are left as is.
    pub fn clear_session(&self) -> Result<(), CoreError> {
        let storage = self.inner.config.storage.as_ref();
        for key in [
            Booking::STORAGE_KEY,
            Destination::STORAGE_KEY,
            Payment::STORAGE_KEY,
            Service::STORAGE_KEY,
            Tour::STORAGE_KEY,
            Activity::STORAGE_KEY,
            Itinerary::STORAGE_KEY,
            InfoEntry::STORAGE_KEY,
            BlogPost::STORAGE_KEY,
        ] {
            storage.remove(key)?;
        }
        debug!("cleared persisted session");
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct Builder<'a> {
    api: &'a ApiClient,
    config: &'a ClientConfig,
    notifier: &'a Notifier,
    storage: &'a Arc<dyn SessionStorage>,
}

impl Builder<'_> {
    fn build<E: Entity>(self) -> Repository<E> {
        let cache = EntityCache::<E>::new(self.config.cache);
        if cache.rehydrate(self.storage.as_ref()) {
            debug!(key = E::STORAGE_KEY, items = cache.len(), "restored session cache");
        }
        Repository::new(
            self.api.clone(),
            Arc::new(cache),
            self.notifier.clone(),
            Arc::clone(self.storage),
        )
    }
}
