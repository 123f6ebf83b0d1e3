//! Account cart API

use shared::models::Cart;

use crate::{ApiClient, ClientResult};

pub struct CartService<'a> {
    api: &'a ApiClient,
}

impl<'a> CartService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Server copy of the cart; a missing cart comes back empty
    pub async fn fetch(&self) -> ClientResult<Cart> {
        let value: serde_json::Value = self.api.get("/api/cart", Vec::new()).await?;
        if value.is_null() {
            return Ok(Cart::default());
        }
        let mut cart: Cart = serde_json::from_value(value)?;
        cart.recompute();
        Ok(cart)
    }

    pub async fn push(&self, cart: &Cart) -> ClientResult<()> {
        let _: serde_json::Value = self.api.put("/api/cart", cart).await?;
        tracing::debug!(lines = cart.items.len(), "cart pushed");
        Ok(())
    }
}
