//! Server-side token for the Stream Chat REST API.

use jsonwebtoken::{EncodingKey, Header, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use chatbridge_types::messaging::MessagingError;

/// Claims of a server token. Stream grants full access to any HS256 token
/// signed with the app secret that carries `"server": true`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerClaims {
    pub server: bool,
}

/// Sign a server token with the API secret. The token has no expiry.
pub fn server_token(api_secret: &SecretString) -> Result<SecretString, MessagingError> {
    let token = encode(
        &Header::default(),
        &ServerClaims { server: true },
        &EncodingKey::from_secret(api_secret.expose_secret().as_bytes()),
    )
    .map_err(|e| MessagingError::Token(e.to_string()))?;

    Ok(SecretString::from(token))
}
