use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use wekan_core::{WekanError, WekanResult};
use wekan_domain::{BoardColor, BoardPermission, Color, MemberPermissions};

use super::{find_by_title, Entity, IdRef, List, Swimlane, Titled, User};
use crate::session::WekanClient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLabel {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub user_id: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_no_comments: bool,
    #[serde(default)]
    pub is_comment_only: bool,
}

/// Snapshot of a board as returned by `GET /api/boards/{id}`.
///
/// Changing the board on the server (members, lists, ...) does not update an
/// existing snapshot; call [`Board::refresh`] to observe it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub archived: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub labels: Vec<BoardLabel>,
    #[serde(default)]
    pub members: Vec<BoardMember>,
    #[serde(default)]
    pub permission: BoardPermission,
    pub color: BoardColor,
    pub description: Option<String>,
    pub subtasks_default_board_id: Option<String>,
    pub subtasks_default_list_id: Option<String>,
    #[serde(default)]
    pub allows_subtasks: bool,
    pub present_parent_task: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub spent_time: Option<f64>,
    #[serde(default)]
    pub is_overtime: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Board {
    pub async fn fetch(api: &WekanClient, id: &str) -> WekanResult<Self> {
        api.get(&format!("/api/boards/{}", id)).await
    }

    pub async fn refresh(&self, api: &WekanClient) -> WekanResult<Self> {
        api.get(&self.path()).await
    }

    fn lists_path(&self) -> String {
        format!("/api/boards/{}/lists", self.id)
    }

    fn swimlanes_path(&self) -> String {
        format!("/api/boards/{}/swimlanes", self.id)
    }

    pub async fn get_lists(&self, api: &WekanClient) -> WekanResult<Vec<List>> {
        let refs: Vec<IdRef> = api.get(&self.lists_path()).await?;
        let mut lists = Vec::with_capacity(refs.len());
        for list in refs {
            lists.push(self.get_list(api, &list.id).await?);
        }
        Ok(lists)
    }

    pub async fn get_list(&self, api: &WekanClient, list_id: &str) -> WekanResult<List> {
        List::fetch(api, &self.id, list_id).await
    }

    pub async fn get_list_by_title(&self, api: &WekanClient, title: &str) -> WekanResult<List> {
        find_by_title(self.get_lists(api).await?, title)
            .ok_or_else(|| WekanError::NotFound(format!("Could not find list {}", title)))
    }

    pub async fn create_list(&self, api: &WekanClient, title: &str) -> WekanResult<List> {
        let created: IdRef = api
            .post(&self.lists_path(), &json!({ "title": title }))
            .await?;
        info!(list_id = %created.id, board_id = %self.id, "created list");
        self.get_list(api, &created.id).await
    }

    /// Returns the id of the deleted list.
    pub async fn delete_list(&self, api: &WekanClient, list_id: &str) -> WekanResult<String> {
        let response: Value = api
            .delete(&format!("{}/{}", self.lists_path(), list_id))
            .await?;
        Ok(response
            .get("_id")
            .and_then(Value::as_str)
            .unwrap_or(list_id)
            .to_string())
    }

    /// All swimlanes of the board. A board without swimlanes cannot hold
    /// cards, so it is reported as [`WekanError::NotFound`].
    pub async fn get_swimlanes(&self, api: &WekanClient) -> WekanResult<Vec<Swimlane>> {
        let refs: Vec<IdRef> = api.get(&self.swimlanes_path()).await?;
        if refs.is_empty() {
            return Err(WekanError::NotFound(format!(
                "Could not find swimlanes in board {}",
                self.title
            )));
        }

        let mut swimlanes = Vec::with_capacity(refs.len());
        for swimlane in refs {
            swimlanes.push(Swimlane::fetch(api, &self.id, &swimlane.id).await?);
        }
        Ok(swimlanes)
    }

    pub async fn get_swimlane_by_title(
        &self,
        api: &WekanClient,
        title: &str,
    ) -> WekanResult<Swimlane> {
        find_by_title(self.get_swimlanes(api).await?, title)
            .ok_or_else(|| WekanError::NotFound(format!("Could not find swimlane {}", title)))
    }

    pub async fn add_swimlane(&self, api: &WekanClient, title: &str) -> WekanResult<Swimlane> {
        let created: IdRef = api
            .post(&self.swimlanes_path(), &json!({ "title": title }))
            .await?;
        info!(swimlane_id = %created.id, board_id = %self.id, "created swimlane");
        Swimlane::fetch(api, &self.id, &created.id).await
    }

    pub fn admin_ids(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(|member| member.is_admin)
            .map(|member| member.user_id.as_str())
    }

    /// Members with admin rights, in member order, fetched as users.
    pub async fn get_admin_users(&self, api: &WekanClient) -> WekanResult<Vec<User>> {
        let mut admins = Vec::new();
        for user_id in self.admin_ids() {
            admins.push(api.get_user(user_id).await?);
        }

        if admins.is_empty() {
            return Err(WekanError::NotFound(format!(
                "Could not find admin users for board {}",
                self.title
            )));
        }
        Ok(admins)
    }

    pub async fn add_board_member(
        &self,
        api: &WekanClient,
        user_id: &str,
        permissions: &MemberPermissions,
    ) -> WekanResult<()> {
        let body = json!({
            "action": "add",
            "isAdmin": permissions.is_admin,
            "isNoComments": permissions.is_no_comments,
            "isCommentOnly": permissions.is_comment_only,
        });
        let _: Value = api
            .post(
                &format!("/api/boards/{}/members/{}/add", self.id, user_id),
                &body,
            )
            .await?;
        info!(board_id = %self.id, user_id, "added board member");
        Ok(())
    }

    pub async fn change_member_permissions(
        &self,
        api: &WekanClient,
        user_id: &str,
        permissions: &MemberPermissions,
    ) -> WekanResult<()> {
        let _: Value = api
            .post(
                &format!("/api/boards/{}/members/{}", self.id, user_id),
                permissions,
            )
            .await?;
        info!(board_id = %self.id, user_id, "changed member permissions");
        Ok(())
    }
}

impl Entity for Board {
    fn id(&self) -> &str {
        &self.id
    }

    fn path(&self) -> String {
        format!("/api/boards/{}", self.id)
    }
}

impl Titled for Board {
    fn title(&self) -> &str {
        &self.title
    }
}
