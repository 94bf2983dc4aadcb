use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wekan_core::WekanResult;

use super::{Entity, Titled};
use crate::session::WekanClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swimlane {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub board_id: String,
    #[serde(default)]
    pub archived: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sort: Option<f64>,
}

impl Swimlane {
    pub async fn fetch(api: &WekanClient, board_id: &str, swimlane_id: &str) -> WekanResult<Self> {
        let mut swimlane: Swimlane = api
            .get(&format!("/api/boards/{}/swimlanes/{}", board_id, swimlane_id))
            .await?;
        swimlane.board_id = board_id.to_string();
        Ok(swimlane)
    }
}

impl Entity for Swimlane {
    fn id(&self) -> &str {
        &self.id
    }

    fn path(&self) -> String {
        format!("/api/boards/{}/swimlanes/{}", self.board_id, self.id)
    }
}

impl Titled for Swimlane {
    fn title(&self) -> &str {
        &self.title
    }
}
