//! User administration.
//!
//! Deleting users is not reliably supported by every server version; treat
//! the delete operations with care.

use serde_json::json;
use tracing::{info, warn};
use wekan_core::WekanResult;

use crate::models::{IdRef, User};
use crate::session::WekanClient;

impl WekanClient {
    pub async fn get_user(&self, id: &str) -> WekanResult<User> {
        User::fetch(self, id).await
    }

    pub async fn get_all_users(&self) -> WekanResult<Vec<User>> {
        let refs: Vec<IdRef> = self.get("/api/users").await?;
        let mut users = Vec::with_capacity(refs.len());
        for user in refs {
            users.push(self.get_user(&user.id).await?);
        }
        Ok(users)
    }

    /// Linear scan over all users. `None` when no user has this username.
    pub async fn get_user_by_username(&self, username: &str) -> WekanResult<Option<User>> {
        Ok(self
            .get_all_users()
            .await?
            .into_iter()
            .find(|user| user.username == username))
    }

    pub async fn create_new_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> WekanResult<User> {
        let body = json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let created: IdRef = self.post("/api/users", &body).await?;
        info!(user_id = %created.id, username, "created user");
        self.get_user(&created.id).await
    }

    /// Returns the id of the deleted user.
    pub async fn delete_user(&self, id: &str) -> WekanResult<String> {
        let deleted: IdRef = self.delete(&format!("/api/users/{}", id)).await?;
        warn!(user_id = %deleted.id, "deleted user");
        Ok(deleted.id)
    }

    /// Returns the deleted id, or `None` when no such user exists.
    pub async fn delete_user_by_username(&self, username: &str) -> WekanResult<Option<String>> {
        match self.get_user_by_username(username).await? {
            Some(user) => self.delete_user(&user.id).await.map(Some),
            None => Ok(None),
        }
    }
}
