// src/core/service_client.rs
//! Envelope-aware API client shared by every service.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::transport::{ApiRequest, ApiResponse, Method, RequestBody, Transport};
use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionContext;
use crate::types::Envelope;
use crate::upload_validator::UploadFile;

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionContext) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Envelope<T>> {
        self.send(ApiRequest::new(Method::Get, path)).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ClientResult<Envelope<T>> {
        self.send(ApiRequest::new(Method::Get, path).with_query(query))
            .await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        self.send(ApiRequest::new(Method::Post, path).with_body(body))
            .await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> ClientResult<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        self.send(ApiRequest::new(Method::Put, path).with_body(body))
            .await
    }

    /// POST whose reply is decoded by `decode` instead of [`decode_envelope`],
    /// for endpoints that do not always answer with an envelope.
    pub async fn post_json_with<B, T>(
        &self,
        path: &str,
        body: &B,
        decode: fn(&str, ApiResponse) -> ClientResult<Envelope<T>>,
    ) -> ClientResult<Envelope<T>>
    where
        B: Serialize + ?Sized,
    {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        self.send_with(ApiRequest::new(Method::Post, path).with_body(body), decode)
            .await
    }

    /// Body-less PUT, used by the status transition endpoints.
    pub async fn put<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Envelope<T>> {
        self.send(ApiRequest::new(Method::Put, path)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Envelope<T>> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        file: UploadFile,
    ) -> ClientResult<Envelope<T>> {
        self.send(ApiRequest::new(Method::Post, path).with_body(RequestBody::Multipart(file)))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<Envelope<T>> {
        self.send_with(request, decode_envelope).await
    }

    async fn send_with<T>(
        &self,
        request: ApiRequest,
        decode: fn(&str, ApiResponse) -> ClientResult<Envelope<T>>,
    ) -> ClientResult<Envelope<T>> {
        let context = format!("{} {}", request.method.as_str(), request.path);
        let request = request.with_bearer(self.session.token());
        let response = self.transport.send(request).await?;
        decode(&context, response)
    }
}

/// 2xx bodies must be envelopes (an empty body counts as a bare success).
/// Non-2xx bodies that are failure envelopes are structured failures, not
/// errors; anything else becomes [`ClientError::Http`].
pub fn decode_envelope<T: DeserializeOwned>(
    context: &str,
    response: ApiResponse,
) -> ClientResult<Envelope<T>> {
    if response.is_success() {
        if response.body.trim().is_empty() {
            return Ok(Envelope {
                success: true,
                message: String::new(),
                data: None,
            });
        }
        return serde_json::from_str(&response.body).map_err(|e| {
            app_log!(error, "Undecodable response from {}: {}", context, e);
            ClientError::decode(context, e.to_string())
        });
    }

    if let Ok(envelope) = serde_json::from_str::<Envelope<Value>>(&response.body) {
        if !envelope.success {
            app_log!(
                debug,
                "{} answered {} with a failure envelope: {}",
                context,
                response.status,
                envelope.message
            );
            return Ok(Envelope::failure(envelope.message));
        }
    }

    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default();

    app_log!(warn, "{} failed with HTTP {}", context, response.status);
    Err(ClientError::Http {
        status: response.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use crate::test_support::MockTransport;
    use crate::types::user::AuthPayload;
    use crate::types::{Role, User};

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_conflict_with_failure_envelope_is_structured() {
        let env: Envelope<Value> = decode_envelope(
            "POST /applications/apply",
            response(409, r#"{"success":false,"message":"You have already applied"}"#),
        )
        .unwrap();
        assert!(!env.success);
        assert_eq!(env.message, "You have already applied");
    }

    #[test]
    fn test_plain_error_body_is_http_error() {
        let err = decode_envelope::<Value>("GET /jobs/9", response(404, r#"{"message":"Not found"}"#))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Not found");

        let err = decode_envelope::<Value>("GET /jobs", response(502, "<html>bad gateway</html>"))
            .unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 502, .. }));
    }

    #[test]
    fn test_garbage_success_body_is_decode_error() {
        let err = decode_envelope::<Value>("GET /jobs", response(200, "not json")).unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
        let env = decode_envelope::<Value>("DELETE /jobs/1", response(204, "")).unwrap();
        assert!(env.success);
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_signed_in() {
        let mock = MockTransport::new();
        mock.push_json(200, serde_json::json!({"success": true, "data": []}));
        mock.push_json(200, serde_json::json!({"success": true, "data": []}));

        let session = SessionContext::new(LocalStore::in_memory());
        let client = ApiClient::new(mock.clone(), session.clone());

        client.get::<Vec<Value>>("/jobs").await.unwrap();
        session
            .login(AuthPayload {
                token: "tok".to_string(),
                user: User {
                    id: 1,
                    name: "R".to_string(),
                    email: "r@example.com".to_string(),
                    role: Role::Recruiter,
                },
            })
            .await
            .unwrap();
        client.get::<Vec<Value>>("/jobs").await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].bearer_token, None);
        assert_eq!(requests[1].bearer_token.as_deref(), Some("tok"));
    }
}
