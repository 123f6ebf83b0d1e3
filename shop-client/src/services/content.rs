//! Banners and store information

use shared::dto::{BannerDto, BannerPayload, ListEnvelope, SiteInfoDto};
use shared::models::{Banner, SiteInfo};
use shared::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_email, validate_optional_text, validate_required_text};

use crate::{ApiClient, ClientResult, mapper};

pub struct ContentService<'a> {
    api: &'a ApiClient,
}

impl<'a> ContentService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Active banners in display order
    pub async fn banners(&self) -> ClientResult<Vec<Banner>> {
        let envelope: ListEnvelope<BannerDto> = self.api.get("/api/banners", Vec::new()).await?;
        Ok(mapper::active_banners(envelope.into_items()))
    }

    /// Every banner, including inactive ones (admin)
    pub async fn all_banners(&self) -> ClientResult<Vec<Banner>> {
        let envelope: ListEnvelope<BannerDto> = self.api.get("/api/banners", Vec::new()).await?;
        let mut banners: Vec<Banner> = envelope.into_items().into_iter().map(mapper::banner).collect();
        banners.sort_by_key(|b| (b.position, b.id));
        Ok(banners)
    }

    pub async fn create_banner(&self, payload: &BannerPayload) -> ClientResult<Banner> {
        validate_required_text(&payload.image, "image", MAX_URL_LEN)?;
        validate_optional_text(&payload.title, "title", MAX_NAME_LEN)?;
        let dto: BannerDto = self.api.post("/api/banners", payload).await?;
        Ok(mapper::banner(dto))
    }

    pub async fn update_banner(&self, id: i64, payload: &BannerPayload) -> ClientResult<Banner> {
        validate_required_text(&payload.image, "image", MAX_URL_LEN)?;
        validate_optional_text(&payload.title, "title", MAX_NAME_LEN)?;
        let dto: BannerDto = self.api.put(&format!("/api/banners/{id}"), payload).await?;
        Ok(mapper::banner(dto))
    }

    pub async fn delete_banner(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("/api/banners/{id}")).await
    }

    pub async fn site_info(&self) -> ClientResult<SiteInfo> {
        let value: serde_json::Value = self.api.get("/api/info", Vec::new()).await?;
        // an unconfigured store answers with null
        let dto: SiteInfoDto = if value.is_null() {
            SiteInfoDto::default()
        } else {
            serde_json::from_value(value)?
        };
        Ok(mapper::site_info(dto))
    }

    pub async fn update_site_info(&self, payload: &SiteInfoDto) -> ClientResult<SiteInfo> {
        validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
        for (field, value) in [("email", &payload.email), ("contact_email", &payload.contact_email)] {
            if let Some(email) = value.as_deref().filter(|e| !e.trim().is_empty()) {
                validate_email(email, field)?;
            }
        }
        let dto: SiteInfoDto = self.api.put("/api/info", payload).await?;
        tracing::info!("site info updated");
        Ok(mapper::site_info(dto))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use http::Method;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unconfigured_store_info_is_default() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::GET, "/api/info", serde_json::Value::Null);
        let api = ApiClient::new(mock);

        let info = api.content().site_info().await.unwrap();
        assert_eq!(info, SiteInfo::default());
        assert_eq!(info.notice_address(), None);
    }

    #[tokio::test]
    async fn test_storefront_banners_hide_inactive() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(
            Method::GET,
            "/api/banners",
            json!([
                {"id": 1, "image": "/a.png", "position": 2, "is_active": 1},
                {"id": 2, "image": "/b.png", "position": 1, "is_active": 0},
                {"id": 3, "image": "/c.png", "position": 0, "is_active": true, "layout": "LEFT"}
            ]),
        );
        let api = ApiClient::new(mock);

        let banners = api.content().banners().await.unwrap();
        assert_eq!(banners.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3, 1]);

        let all = api.content().all_banners().await.unwrap();
        assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3, 2, 1]);
    }
}
