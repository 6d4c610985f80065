//! Stream Chat REST request/response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use chatbridge_types::messaging::{OutgoingMessage, PlatformUser};

/// `payload` query parameter of `GET /users`, sent as a JSON string.
#[derive(Debug, Clone, Serialize)]
pub struct QueryUsersPayload {
    pub filter_conditions: Value,
    pub limit: u32,
}

impl QueryUsersPayload {
    /// Exact-match lookup of a single user id.
    pub fn by_id(user_id: &str) -> Self {
        Self {
            filter_conditions: json!({ "id": { "$eq": user_id } }),
            limit: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryUsersResponse {
    #[serde(default)]
    pub users: Vec<PlatformUser>,
}

/// Body of `POST /users`: users keyed by id.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertUsersRequest {
    pub users: BTreeMap<String, PlatformUser>,
}

impl UpsertUsersRequest {
    pub fn single(user: &PlatformUser) -> Self {
        let mut users = BTreeMap::new();
        users.insert(user.id.clone(), user.clone());
        Self { users }
    }
}

/// Body of `POST /channels/{type}/{id}/query`. Creates the channel if missing.
#[derive(Debug, Clone, Serialize)]
pub struct QueryChannelRequest {
    pub data: ChannelData,
    pub state: bool,
    pub watch: bool,
    pub presence: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelData {
    pub created_by_id: String,
}

impl QueryChannelRequest {
    pub fn create(created_by_id: &str) -> Self {
        Self {
            data: ChannelData {
                created_by_id: created_by_id.to_string(),
            },
            state: false,
            watch: false,
            presence: false,
        }
    }
}

/// Body of `POST /channels/{type}/{id}/message`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub message: &'a OutgoingMessage,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_users_payload_shape() {
        let payload = serde_json::to_value(QueryUsersPayload::by_id("a_x_com")).unwrap();
        assert_eq!(payload["filter_conditions"]["id"]["$eq"], "a_x_com");
        assert_eq!(payload["limit"], 1);
    }

    #[test]
    fn test_upsert_users_keyed_by_id() {
        let user = PlatformUser {
            id: "a_x_com".to_string(),
            name: Some("A".to_string()),
            role: Some("user".to_string()),
        };
        let body = serde_json::to_value(UpsertUsersRequest::single(&user)).unwrap();
        assert_eq!(body["users"]["a_x_com"]["id"], "a_x_com");
        assert_eq!(body["users"]["a_x_com"]["name"], "A");
        assert_eq!(body["users"]["a_x_com"]["role"], "user");
    }

    #[test]
    fn test_query_channel_create_shape() {
        let body = serde_json::to_value(QueryChannelRequest::create("ai_bot")).unwrap();
        assert_eq!(body["data"]["created_by_id"], "ai_bot");
        assert_eq!(body["watch"], false);
    }

    #[test]
    fn test_send_message_shape() {
        let msg = OutgoingMessage::from_bot("hello");
        let body = serde_json::to_value(SendMessageRequest { message: &msg }).unwrap();
        assert_eq!(body["message"]["text"], "hello");
        assert_eq!(body["message"]["user_id"], "ai_bot");
    }

    #[test]
    fn test_query_users_response_tolerates_extra_fields() {
        let json = r#"{"users":[{"id":"a","name":"A","role":"user","online":false}],"duration":"1ms"}"#;
        let resp: QueryUsersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.users.len(), 1);
        assert_eq!(resp.users[0].id, "a");
    }

    #[test]
    fn test_api_error_body() {
        let json = r#"{"code":16,"message":"GetOrCreateChannel failed","StatusCode":400}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.code, Some(16));
        assert_eq!(body.message, "GetOrCreateChannel failed");
    }
}
