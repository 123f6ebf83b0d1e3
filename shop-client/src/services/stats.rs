//! Dashboard statistics API

use shared::dto::StatsDto;
use shared::models::{StatsOverview, StatsRange};

use crate::{ApiClient, ClientResult, mapper};

pub struct StatsService<'a> {
    api: &'a ApiClient,
}

impl<'a> StatsService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn overview(&self, range: StatsRange) -> ClientResult<StatsOverview> {
        let dto: StatsDto = self
            .api
            .get(
                "/api/stats",
                vec![("range".to_string(), range.as_str().to_string())],
            )
            .await?;
        Ok(mapper::stats(dto))
    }
}
