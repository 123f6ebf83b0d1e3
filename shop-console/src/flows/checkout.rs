//! Checkout: cart to order request

use shared::dto::{OrderRequestPayload, RequestItemDto};
use shared::models::Request;
use shared::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, ValidationError, validate_email,
    validate_optional_text, validate_phone, validate_required_text,
};
use shop_client::ApiClient;

use crate::cart::CartStore;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, NoticeLevel};

#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub note: Option<String>,
}

impl CheckoutForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_email(&self.email, "email")?;
        validate_phone(&self.phone, "phone")?;
        validate_required_text(&self.address, "address", MAX_ADDRESS_LEN)?;
        validate_optional_text(&self.note, "note", MAX_NOTE_LEN)?;
        Ok(())
    }
}

/// Submit the cart as an order; the cart is cleared only after the order is accepted
pub async fn checkout(
    api: &ApiClient,
    cart: &CartStore,
    bus: &EventBus,
    form: &CheckoutForm,
) -> AppResult<Request> {
    form.validate()?;
    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let payload = OrderRequestPayload {
        request_type: "order".to_string(),
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        address: form.address.trim().to_string(),
        items: snapshot
            .items
            .iter()
            .map(|i| RequestItemDto {
                product_id: i.product_id,
                name: i.name.clone(),
                price: i.price,
                quantity: i.quantity,
                image: i.image.clone(),
            })
            .collect(),
        total: snapshot.total_price,
        note: form.note.clone().filter(|n| !n.trim().is_empty()),
    };

    let request = match api.requests().create_order(&payload).await {
        Ok(request) => request,
        Err(e) => {
            bus.notify(NoticeLevel::Error, format!("Đặt hàng thất bại: {e}"));
            return Err(e.into());
        }
    };

    // order exists now; a failed clear only leaves a stale cart behind
    if let Err(e) = cart.clear() {
        tracing::warn!(request_id = request.id, error = %e, "cart not cleared after checkout");
    }
    bus.notify(
        NoticeLevel::Success,
        format!("Đặt hàng thành công, mã đơn #{}", request.id),
    );
    Ok(request)
}
