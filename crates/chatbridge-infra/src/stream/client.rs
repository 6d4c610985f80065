//! Stream Chat REST client.
//!
//! Every request carries the `api_key` query parameter and the server token
//! in the `Authorization` header with `stream-auth-type: jwt`.

use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use chatbridge_core::messaging::client::MessagingClient;
use chatbridge_types::messaging::{ChannelRef, MessagingError, OutgoingMessage, PlatformUser};

use super::token::server_token;
use super::types::{
    ApiErrorBody, QueryChannelRequest, QueryUsersPayload, QueryUsersResponse,
    SendMessageRequest, UpsertUsersRequest,
};

/// Server-side client for the Stream Chat REST API.
///
/// Does NOT derive Debug: it holds the signed server token.
pub struct StreamChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    token: SecretString,
}

impl StreamChatClient {
    /// Create a client, signing the server token from the API secret.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: &SecretString,
        base_url: impl Into<String>,
    ) -> Result<Self, MessagingError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            token: server_token(api_secret)?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn channel_path(channel: &ChannelRef, action: &str) -> String {
        format!("/channels/{}/{}/{}", channel.channel_type, channel.id, action)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
            .header("Authorization", self.token.expose_secret())
            .header("stream-auth-type", "jwt")
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, MessagingError> {
        let response = request
            .send()
            .await
            .map_err(|e| MessagingError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, body = %body, "Stream API error response");
        Err(map_status(status.as_u16(), &body))
    }
}

/// Map a non-2xx status and its body to a [`MessagingError`].
fn map_status(status: u16, body: &str) -> MessagingError {
    match status {
        401 | 403 => MessagingError::AuthenticationFailed,
        429 => MessagingError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .ok()
                .map(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| body.to_string());
            MessagingError::Api { status, message }
        }
    }
}

impl MessagingClient for StreamChatClient {
    async fn find_user(&self, user_id: &str) -> Result<Option<PlatformUser>, MessagingError> {
        let payload = serde_json::to_string(&QueryUsersPayload::by_id(user_id))
            .map_err(|e| MessagingError::Deserialization(e.to_string()))?;

        let response = self
            .execute(
                self.request(Method::GET, "/users")
                    .query(&[("payload", payload.as_str())]),
            )
            .await?;

        let body: QueryUsersResponse = response
            .json()
            .await
            .map_err(|e| MessagingError::Deserialization(e.to_string()))?;

        Ok(body.users.into_iter().find(|u| u.id == user_id))
    }

    async fn upsert_user(&self, user: &PlatformUser) -> Result<(), MessagingError> {
        debug!(user_id = %user.id, "Upserting Stream user");
        self.execute(
            self.request(Method::POST, "/users")
                .json(&UpsertUsersRequest::single(user)),
        )
        .await?;
        Ok(())
    }

    async fn ensure_channel(
        &self,
        channel: &ChannelRef,
        created_by_id: &str,
    ) -> Result<(), MessagingError> {
        debug!(channel_id = %channel, "Ensuring Stream channel");
        self.execute(
            self.request(Method::POST, &Self::channel_path(channel, "query"))
                .json(&QueryChannelRequest::create(created_by_id)),
        )
        .await?;
        Ok(())
    }

    async fn send_message(
        &self,
        channel: &ChannelRef,
        message: &OutgoingMessage,
    ) -> Result<(), MessagingError> {
        self.execute(
            self.request(Method::POST, &Self::channel_path(channel, "message"))
                .json(&SendMessageRequest { message }),
        )
        .await?;
        Ok(())
    }
}
