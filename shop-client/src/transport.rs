//! Transport seam
//!
//! Services build an [`ApiRequest`] and hand it to a [`Transport`]. The
//! network implementation is [`crate::HttpClient`]; tests use
//! `crate::mock::MockTransport`.

use async_trait::async_trait;
use http::Method;
use serde_json::Value;
use std::path::Path;

use crate::ClientResult;

/// File attached to a multipart upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension
    pub fn from_path(path: &Path) -> ClientResult<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        Ok(Self::new(file_name, mime, bytes))
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart form with a single `file` field
    File(UploadFile),
}

/// One API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/api/products/3`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn with_file(mut self, file: UploadFile) -> Self {
        self.body = RequestBody::File(file);
        self
    }
}

/// Sends requests and returns the decoded JSON body (`Null` when empty)
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value>;

    /// Replace the bearer token used for later requests
    fn set_token(&self, token: Option<String>);

    fn token(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_upload_file_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0x89, b'P', b'N', b'G'])
            .unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "screen.png");
        assert_eq!(file.mime, "image/png");
        assert_eq!(file.bytes.len(), 4);
    }
}
