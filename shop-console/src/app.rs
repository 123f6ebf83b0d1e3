//! Application context
//!
//! Owns the API client, event bus, local store, cart and session, wired
//! from one [`AppConfig`].

use shop_client::{ApiClient, Transport};
use std::sync::Arc;

use crate::cart::CartStore;
use crate::core::AppConfig;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::flows::Session;
use crate::storage::LocalStore;
use crate::utils::{Debouncer, LatestFetch};

pub struct App {
    pub config: AppConfig,
    pub api: ApiClient,
    pub bus: EventBus,
    pub store: Arc<LocalStore>,
    pub cart: Arc<CartStore>,
    pub session: Session,
    pub debouncer: Debouncer,
    pub latest: LatestFetch,
}

impl App {
    /// Context talking to the configured backend over HTTP
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let api = ApiClient::http(&config.client)?;
        Self::with_api(config, api)
    }

    /// Context over any transport
    pub fn with_transport(config: AppConfig, transport: Arc<dyn Transport>) -> AppResult<Self> {
        Self::with_api(config, ApiClient::new(transport))
    }

    fn with_api(config: AppConfig, api: ApiClient) -> AppResult<Self> {
        let bus = EventBus::new();
        let store = Arc::new(LocalStore::open(config.store_path(), bus.clone())?);
        let cart = Arc::new(CartStore::load(store.clone())?);
        let session = Session::new(store.clone());
        if let Some(user) = session.restore(&api)? {
            tracing::debug!(user_id = user.id, "session restored");
        }
        let debouncer = Debouncer::new(config.search_debounce);

        Ok(Self {
            config,
            api,
            bus,
            store,
            cart,
            session,
            debouncer,
            latest: LatestFetch::new(),
        })
    }
}
