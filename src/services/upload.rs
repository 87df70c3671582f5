// src/services/upload.rs
use serde::{Deserialize, Serialize};

use crate::app_log;
use crate::core::ApiClient;
use crate::error::ClientResult;
use crate::types::Envelope;
use crate::upload_validator::{UploadFile, UploadKind, UploadValidator};

/// Where the server stored an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    #[serde(alias = "fileUrl")]
    pub url: String,
    #[serde(default)]
    pub file_name: String,
}

#[derive(Clone)]
pub struct UploadService {
    api: ApiClient,
}

impl UploadService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn upload_resume(&self, file: UploadFile) -> ClientResult<Envelope<UploadResult>> {
        self.upload(UploadKind::Resume, file).await
    }

    pub async fn upload_avatar(&self, file: UploadFile) -> ClientResult<Envelope<UploadResult>> {
        self.upload(UploadKind::Avatar, file).await
    }

    /// Rejected files never reach the network.
    pub async fn upload(&self, kind: UploadKind, file: UploadFile) -> ClientResult<Envelope<UploadResult>> {
        if let Err(e) = UploadValidator::validate(kind, &file) {
            app_log!(warn, "Upload of {} rejected: {} ({})", e.file_name, e.message, e.error_type.code());
            return Err(e.into());
        }

        app_log!(info, "Uploading {} ({} bytes) to {}", file.file_name, file.bytes.len(), kind.endpoint());
        self.api.post_multipart(kind.endpoint(), file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::RequestBody;
    use crate::error::ClientError;
    use crate::test_support::{ok, Harness};
    use crate::types::Role;
    use serde_json::json;

    #[tokio::test]
    async fn test_oversized_resume_is_not_sent() {
        let h = Harness::signed_in(7, Role::Seeker).await;
        let file = UploadFile::new("cv.pdf", "application/pdf", vec![0u8; 6 * 1024 * 1024]);

        let err = UploadService::new(h.api.clone()).upload_resume(file).await.unwrap_err();
        assert!(matches!(err, ClientError::Upload(_)));
        assert!(err.is_pre_dispatch());
        assert_eq!(h.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_type_avatar_is_not_sent() {
        let h = Harness::signed_in(7, Role::Seeker).await;
        let file = UploadFile::new("me.pdf", "application/pdf", b"%PDF-1.4".to_vec());

        assert!(UploadService::new(h.api.clone()).upload_avatar(file).await.is_err());
        assert_eq!(h.mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_resume_is_sent_as_multipart() {
        let h = Harness::signed_in(7, Role::Seeker).await;
        h.mock.push_json(200, ok(json!({"url": "https://cdn.example.com/cv.pdf"})));
        let file = UploadFile::new("cv.pdf", "application/pdf", b"%PDF-1.4 body".to_vec());

        let result = UploadService::new(h.api.clone())
            .upload_resume(file)
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(result.url, "https://cdn.example.com/cv.pdf");

        let request = &h.mock.requests()[0];
        assert_eq!(request.path, "/upload/resume");
        assert!(matches!(request.body, RequestBody::Multipart(_)));
    }
}
