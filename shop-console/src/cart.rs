//! Local cart
//!
//! The cart lives in the local store under `cart`, independent of any
//! login. Each mutation recomputes the total, writes the whole cart back
//! and publishes `CartUpdated`. Other handles on the same store pick the
//! change up through `reload`; concurrent writers race and the last write
//! wins.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{Cart, CartItem, Product};
use shop_client::ApiClient;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::{AppError, AppResult};
use crate::events::AppEvent;
use crate::pricing::product_price;
use crate::storage::{CART_KEY, LocalStore};

pub struct CartStore {
    store: Arc<LocalStore>,
    cart: RwLock<Cart>,
}

impl CartStore {
    /// Load the persisted cart, or start empty
    pub fn load(store: Arc<LocalStore>) -> AppResult<Self> {
        let mut cart: Cart = store.get(CART_KEY)?.unwrap_or_default();
        cart.recompute();
        Ok(Self {
            store,
            cart: RwLock::new(cart),
        })
    }

    pub fn snapshot(&self) -> Cart {
        self.cart.read().clone()
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.cart.read().items.clone()
    }

    pub fn total_price(&self) -> Decimal {
        self.cart.read().total_price
    }

    /// Sum of quantities
    pub fn count(&self) -> u32 {
        self.cart.read().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.read().is_empty()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> AppResult<R> {
        let (result, snapshot) = {
            let mut cart = self.cart.write();
            let result = f(&mut cart);
            cart.recompute();
            (result, cart.clone())
        };
        self.persist(&snapshot)?;
        Ok(result)
    }

    fn persist(&self, cart: &Cart) -> AppResult<()> {
        self.store.set(CART_KEY, cart)?;
        self.store.bus().publish(AppEvent::CartUpdated {
            count: cart.count(),
            total: cart.total_price,
        });
        Ok(())
    }

    /// Merge by product id
    pub fn add(&self, item: CartItem) -> AppResult<()> {
        tracing::debug!(product_id = item.product_id, quantity = item.quantity, "cart add");
        self.mutate(|cart| cart.add(item))
    }

    /// Add `quantity` of `product` at its current customer price
    pub fn add_product(
        &self,
        product: &Product,
        quantity: u32,
        campaigns: &[shared::models::Discount],
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let price = product_price(product, campaigns, now).price;
        self.add(CartItem {
            product_id: product.id,
            name: product.name.clone(),
            price,
            quantity,
            image: product.image.clone(),
        })
    }

    pub fn remove_at(&self, index: usize) -> AppResult<Option<CartItem>> {
        self.mutate(|cart| cart.remove_at(index))
    }

    pub fn remove_product(&self, product_id: i64) -> AppResult<Option<CartItem>> {
        self.mutate(|cart| cart.remove_product(product_id))
    }

    /// 0 removes the line; false when the product is not in the cart
    pub fn set_quantity(&self, product_id: i64, quantity: u32) -> AppResult<bool> {
        self.mutate(|cart| cart.set_quantity(product_id, quantity))
    }

    pub fn clear(&self) -> AppResult<()> {
        self.mutate(Cart::clear)
    }

    /// Re-read the stored cart; true when it differed from memory
    pub fn reload(&self) -> AppResult<bool> {
        let mut stored: Cart = self.store.get(CART_KEY)?.unwrap_or_default();
        stored.recompute();
        let changed = {
            let mut cart = self.cart.write();
            if *cart == stored {
                false
            } else {
                *cart = stored.clone();
                true
            }
        };
        if changed {
            tracing::debug!(lines = stored.items.len(), "cart reloaded from store");
            self.store.bus().publish(AppEvent::CartUpdated {
                count: stored.count(),
                total: stored.total_price,
            });
        }
        Ok(changed)
    }

    /// Upload the local cart to the logged-in account
    pub async fn push(&self, api: &ApiClient) -> AppResult<()> {
        if !api.is_logged_in() {
            return Err(AppError::NotLoggedIn);
        }
        let snapshot = self.snapshot();
        api.cart().push(&snapshot).await?;
        Ok(())
    }

    /// Replace the local cart with the account's copy
    pub async fn pull(&self, api: &ApiClient) -> AppResult<()> {
        if !api.is_logged_in() {
            return Err(AppError::NotLoggedIn);
        }
        let remote = api.cart().fetch().await?;
        self.mutate(|cart| *cart = remote)
    }

    /// Follow writes made through other store handles.
    ///
    /// The task holds only a weak reference: it ends at the first event
    /// after the last `Arc<CartStore>` is dropped, or when the bus closes.
    pub fn spawn_sync(self: Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.store.bus().subscribe();
        let own = self.store.origin();
        let cart = Arc::downgrade(&self);
        drop(self);

        tokio::spawn(async move {
            loop {
                let event = rx.recv().await;
                if matches!(event, Err(broadcast::error::RecvError::Closed)) {
                    break;
                }
                let Some(cart) = cart.upgrade() else {
                    break;
                };
                match event {
                    Ok(AppEvent::StorageChanged { key, origin }) if key == CART_KEY && origin != own => {
                        if let Err(e) = cart.reload() {
                            tracing::warn!(error = %e, "cart reload failed");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "cart sync lagged, reloading");
                        if let Err(e) = cart.reload() {
                            tracing::warn!(error = %e, "cart reload failed");
                        }
                    }
                    _ => {}
                }
            }
            tracing::debug!("cart sync stopped");
        })
    }
}
