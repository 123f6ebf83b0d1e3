//! Repair request submission

use shared::dto::RepairRequestPayload;
use shared::models::Request;
use shared::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, ValidationError, validate_email,
    validate_optional_text, validate_phone, validate_required_text,
};
use shop_client::ApiClient;
use std::path::PathBuf;

use crate::error::AppResult;
use crate::events::{EventBus, NoticeLevel};

/// Images attached to one repair request
pub const MAX_REPAIR_IMAGES: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct RepairForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub service_id: Option<i64>,
    pub description: String,
    pub images: Vec<PathBuf>,
}

impl RepairForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_email(&self.email, "email")?;
        validate_phone(&self.phone, "phone")?;
        validate_optional_text(&self.address, "address", MAX_ADDRESS_LEN)?;
        validate_required_text(&self.description, "description", MAX_NOTE_LEN)?;
        if self.images.len() > MAX_REPAIR_IMAGES {
            return Err(ValidationError::invalid(
                "images",
                format!("at most {MAX_REPAIR_IMAGES} images"),
            ));
        }
        Ok(())
    }
}

/// Upload the photos, then create the ticket with their URLs
pub async fn submit_repair(api: &ApiClient, bus: &EventBus, form: &RepairForm) -> AppResult<Request> {
    form.validate()?;

    let mut urls = Vec::with_capacity(form.images.len());
    for path in &form.images {
        match api.uploads().upload_path(path).await {
            Ok(url) => urls.push(url),
            Err(e) => {
                bus.notify(
                    NoticeLevel::Error,
                    format!("Tải ảnh {} thất bại: {e}", path.display()),
                );
                return Err(e.into());
            }
        }
    }

    let payload = RepairRequestPayload {
        request_type: "repair".to_string(),
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        address: form.address.clone().filter(|a| !a.trim().is_empty()),
        service_id: form.service_id,
        description: form.description.trim().to_string(),
        images: urls,
    };
    match api.requests().create_repair(&payload).await {
        Ok(request) => {
            bus.notify(
                NoticeLevel::Success,
                format!("Đã gửi yêu cầu sửa chữa #{}", request.id),
            );
            Ok(request)
        }
        Err(e) => {
            bus.notify(NoticeLevel::Error, format!("Gửi yêu cầu thất bại: {e}"));
            Err(e.into())
        }
    }
}
