//! User registration.
//!
//! Registration keeps the messaging platform's directory and the local
//! `users` table in step. Each store is checked and written independently
//! with no transaction spanning them: two concurrent registrations for the
//! same email can both pass the existence check, and the second local insert
//! then fails on the primary key.

use std::sync::Arc;

use chatbridge_types::error::UserError;
use chatbridge_types::messaging::PlatformUser;
use chatbridge_types::user::{RegisteredUser, User, UserId};
use chrono::Utc;
use tracing::info;

use crate::messaging::box_client::BoxMessagingClient;
use crate::repository::user::UserRepository;

/// Registers users with the messaging platform and the local store.
pub struct UserService<U: UserRepository> {
    user_repo: U,
    messaging: Arc<BoxMessagingClient>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(user_repo: U, messaging: Arc<BoxMessagingClient>) -> Self {
        Self {
            user_repo,
            messaging,
        }
    }

    /// Register a user, creating whichever records are missing.
    ///
    /// Repeated calls with the same email are idempotent in effect: the
    /// existing records are left untouched and the same id is returned.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
    ) -> Result<RegisteredUser, UserError> {
        let user_id = UserId::from_email(email);

        if self.messaging.find_user(user_id.as_str()).await?.is_none() {
            self.messaging
                .upsert_user(&PlatformUser::member(&user_id, name))
                .await?;
            info!(user_id = %user_id, "Created messaging platform user");
        }

        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            info!(user_id = %user_id, "User not found locally, creating");
            self.user_repo
                .insert(&User {
                    user_id: user_id.clone(),
                    name: name.to_string(),
                    email: email.to_string(),
                    created_at: Utc::now(),
                })
                .await?;
        }

        Ok(RegisteredUser {
            user_id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}
