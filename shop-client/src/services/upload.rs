//! File upload API

use shared::dto::UploadResponse;
use std::path::Path;

use crate::transport::UploadFile;
use crate::{ApiClient, ClientResult};

pub struct UploadService<'a> {
    api: &'a ApiClient,
}

impl<'a> UploadService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Upload one file, returning its public URL
    pub async fn upload_file(&self, file: UploadFile) -> ClientResult<String> {
        let name = file.file_name.clone();
        let size = file.bytes.len();
        let response: UploadResponse = self.api.upload("/api/upload", file).await?;
        tracing::info!(file = %name, size, url = %response.url, "file uploaded");
        Ok(response.url)
    }

    pub async fn upload_path(&self, path: &Path) -> ClientResult<String> {
        self.upload_file(UploadFile::from_path(path)?).await
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
    async fn test_upload_returns_url_alias() {
        let mock = Arc::new(MockTransport::new());
        mock.reply(Method::POST, "/api/upload", json!({"path": "/uploads/a.png"}));
        let api = ApiClient::new(mock.clone());

        let url = api
            .uploads()
            .upload_file(UploadFile::new("a.png", "image/png", vec![1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(url, "/uploads/a.png");
        assert!(matches!(mock.calls()[0].body, crate::RequestBody::File(_)));
    }
}
