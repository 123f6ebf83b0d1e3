//! Customer request API (orders and repair tickets)

use shared::dto::{
    HiddenPatch, ListEnvelope, OrderRequestPayload, RepairRequestPayload, RequestDto,
    RequestUpdatePayload, StatusPatch,
};
use shared::models::{Request, RequestFilter, RequestStatus};
use shared::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, ValidationError, validate_email,
    validate_optional_text, validate_phone, validate_required_text,
};

use crate::{ApiClient, ClientResult, mapper};

pub struct RequestService<'a> {
    api: &'a ApiClient,
}

fn validate_contact(name: &str, email: &str, phone: &str) -> Result<(), ValidationError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_email(email, "email")?;
    validate_phone(phone, "phone")?;
    Ok(())
}

fn validate_order(payload: &OrderRequestPayload) -> Result<(), ValidationError> {
    validate_contact(&payload.name, &payload.email, &payload.phone)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    if payload.items.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }
    if payload.items.iter().any(|i| i.quantity == 0) {
        return Err(ValidationError::invalid("items", "quantity must be positive"));
    }
    Ok(())
}

fn validate_repair(payload: &RepairRequestPayload) -> Result<(), ValidationError> {
    validate_contact(&payload.name, &payload.email, &payload.phone)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    Ok(())
}

impl<'a> RequestService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Requests matching `filter`; records the board cannot represent are skipped
    ///
    /// Each record is decoded on its own so one malformed row does not
    /// fail the whole board.
    pub async fn list(&self, filter: &RequestFilter) -> ClientResult<Vec<Request>> {
        let envelope: ListEnvelope<serde_json::Value> =
            self.api.get("/api/requests", filter.to_pairs()).await?;
        Ok(envelope
            .into_items()
            .into_iter()
            .filter_map(|raw| {
                let id = raw.get("id").and_then(serde_json::Value::as_i64);
                let dto: RequestDto = serde_json::from_value(raw)
                    .inspect_err(|e| tracing::warn!(request_id = ?id, error = %e, "skipping malformed request"))
                    .ok()?;
                mapper::request(dto)
                    .inspect_err(|e| tracing::warn!(request_id = ?id, error = %e, "skipping request"))
                    .ok()
            })
            .collect())
    }

    pub async fn get(&self, id: i64) -> ClientResult<Request> {
        let dto: RequestDto = self.api.get(&format!("/api/requests/{id}"), Vec::new()).await?;
        mapper::request(dto)
    }

    pub async fn create_order(&self, payload: &OrderRequestPayload) -> ClientResult<Request> {
        validate_order(payload)?;
        let dto: RequestDto = self.api.post("/api/requests", payload).await?;
        tracing::info!(request_id = dto.id, lines = payload.items.len(), "order submitted");
        mapper::request(dto)
    }

    pub async fn create_repair(&self, payload: &RepairRequestPayload) -> ClientResult<Request> {
        validate_repair(payload)?;
        let dto: RequestDto = self.api.post("/api/requests", payload).await?;
        tracing::info!(request_id = dto.id, "repair request submitted");
        mapper::request(dto)
    }

    /// Persist a status change
    pub async fn update_status(&self, id: i64, status: RequestStatus) -> ClientResult<()> {
        let _: serde_json::Value = self
            .api
            .patch(&format!("/api/requests/{id}"), &StatusPatch { status })
            .await?;
        tracing::info!(request_id = id, status = %status, "request status updated");
        Ok(())
    }

    /// Edit from the admin modal
    pub async fn update(&self, id: i64, payload: &RequestUpdatePayload) -> ClientResult<Request> {
        if let Some(name) = &payload.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(email) = &payload.email {
            validate_email(email, "email")?;
        }
        if let Some(phone) = &payload.phone {
            validate_phone(phone, "phone")?;
        }
        validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
        validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

        let dto: RequestDto = self.api.put(&format!("/api/requests/{id}"), payload).await?;
        mapper::request(dto)
    }

    /// Archive (`true`) or restore (`false`)
    pub async fn set_hidden(&self, id: i64, hidden: bool) -> ClientResult<()> {
        let _: serde_json::Value = self
            .api
            .patch(&format!("/api/requests/{id}"), &HiddenPatch { hidden })
            .await?;
        tracing::info!(request_id = id, hidden, "request visibility changed");
        Ok(())
    }
}
