// src/services/auth.rs
use serde_json::Value;

use crate::app_log;
use crate::core::service_client::decode_envelope;
use crate::core::transport::ApiResponse;
use crate::core::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::types::user::{AuthPayload, BareAuthResponse, LoginRequest, SignupRequest};
use crate::types::Envelope;

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// On success the token and user are persisted and the session adopts
    /// them. Any other outcome leaves the previous session as it was.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<Envelope<AuthPayload>> {
        let envelope = self
            .api
            .post_json_with("/auth/login", request, decode_auth_reply)
            .await?;
        self.adopt(&envelope).await?;
        Ok(envelope)
    }

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<Envelope<AuthPayload>> {
        let envelope = self
            .api
            .post_json_with("/auth/signup", request, decode_auth_reply)
            .await?;
        self.adopt(&envelope).await?;
        Ok(envelope)
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.api.session().logout().await
    }

    async fn adopt(&self, envelope: &Envelope<AuthPayload>) -> ClientResult<()> {
        if let (true, Some(payload)) = (envelope.success, envelope.data.as_ref()) {
            let user = self.api.session().login(payload.clone()).await?;
            app_log!(info, "Signed in as {} ({})", user.email, user.role);
        }
        Ok(())
    }
}

/// Auth endpoints answer either with the usual envelope or with a bare
/// `{token, user, message}` body. A 2xx body without a `success` field is
/// read as the bare shape.
fn decode_auth_reply(context: &str, response: ApiResponse) -> ClientResult<Envelope<AuthPayload>> {
    if !response.is_success() || response.body.trim().is_empty() {
        return decode_envelope(context, response);
    }

    let has_success = serde_json::from_str::<Value>(&response.body)
        .map(|value| value.get("success").is_some())
        .unwrap_or(true);
    if has_success {
        return decode_envelope(context, response);
    }

    serde_json::from_str::<BareAuthResponse>(&response.body)
        .map(BareAuthResponse::into_envelope)
        .map_err(|e| {
            app_log!(error, "Undecodable auth response from {}: {}", context, e);
            ClientError::decode(context, e.to_string())
        })
}
