use serde::{Deserialize, Serialize};
use wekan_core::WekanResult;

use super::Entity;
use crate::session::WekanClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    pub async fn fetch(api: &WekanClient, id: &str) -> WekanResult<Self> {
        api.get(&format!("/api/users/{}", id)).await
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}
