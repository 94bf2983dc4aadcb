use serde::{Deserialize, Serialize};
use wekan_core::WekanResult;

use super::{Entity, Titled};
use crate::session::WekanClient;

/// A card, projected down to the fields this client works with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub board_id: String,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub swimlane_id: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
}

impl Card {
    pub async fn fetch(
        api: &WekanClient,
        board_id: &str,
        list_id: &str,
        card_id: &str,
    ) -> WekanResult<Self> {
        let mut card: Card = api
            .get(&format!(
                "/api/boards/{}/lists/{}/cards/{}",
                board_id, list_id, card_id
            ))
            .await?;
        card.board_id = board_id.to_string();
        card.list_id = list_id.to_string();
        Ok(card)
    }
}

impl Entity for Card {
    fn id(&self) -> &str {
        &self.id
    }

    fn path(&self) -> String {
        format!(
            "/api/boards/{}/lists/{}/cards/{}",
            self.board_id, self.list_id, self.id
        )
    }
}

impl Titled for Card {
    fn title(&self) -> &str {
        &self.title
    }
}
