use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use wekan_core::{WekanError, WekanResult};
use wekan_domain::Color;

use super::{Card, Entity, IdRef, Titled};
use crate::session::WekanClient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WipLimit {
    #[serde(default)]
    pub value: Option<u32>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub soft: bool,
}

/// A column of cards on a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub board_id: String,
    pub swimlane_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub sort: Option<f64>,
    pub wip_limit: Option<WipLimit>,
    pub color: Option<Color>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl List {
    pub async fn fetch(api: &WekanClient, board_id: &str, list_id: &str) -> WekanResult<Self> {
        let mut list: List = api
            .get(&format!("/api/boards/{}/lists/{}", board_id, list_id))
            .await?;
        list.board_id = board_id.to_string();
        Ok(list)
    }

    fn cards_path(&self) -> String {
        format!("/api/boards/{}/lists/{}/cards", self.board_id, self.id)
    }

    /// Add a card to this list.
    ///
    /// The card is authored by the board's first admin and placed in the
    /// board's first swimlane; both are looked up on the server for every
    /// call. Fails with [`WekanError::NotFound`] when the board has no admin
    /// or no swimlane.
    pub async fn create_card(
        &self,
        api: &WekanClient,
        title: &str,
        description: &str,
    ) -> WekanResult<Card> {
        let board = api.get_board(&self.board_id).await?;
        let author = board
            .get_admin_users(api)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WekanError::NotFound(format!("admin users for board {}", board.title)))?;
        let swimlane = board
            .get_swimlanes(api)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WekanError::NotFound(format!("swimlanes in board {}", board.title)))?;

        let body = json!({
            "title": title,
            "description": description,
            "authorId": author.id,
            "swimlaneId": swimlane.id,
        });
        let created: IdRef = api.post(&self.cards_path(), &body).await?;
        info!(card_id = %created.id, list_id = %self.id, "created card");

        Card::fetch(api, &self.board_id, &self.id, &created.id).await
    }

    /// All cards in this list. An empty list is reported as
    /// [`WekanError::NotFound`], not as an empty vector.
    pub async fn get_cards(&self, api: &WekanClient) -> WekanResult<Vec<Card>> {
        let refs: Vec<IdRef> = api.get(&self.cards_path()).await?;
        if refs.is_empty() {
            return Err(WekanError::NotFound(format!(
                "Could not find cards in list {}",
                self.title
            )));
        }

        let mut cards = Vec::with_capacity(refs.len());
        for card in refs {
            cards.push(Card::fetch(api, &self.board_id, &self.id, &card.id).await?);
        }
        Ok(cards)
    }

    pub async fn get_card(&self, api: &WekanClient, card_id: &str) -> WekanResult<Card> {
        Card::fetch(api, &self.board_id, &self.id, card_id).await
    }
}

impl Entity for List {
    fn id(&self) -> &str {
        &self.id
    }

    fn path(&self) -> String {
        format!("/api/boards/{}/lists/{}", self.board_id, self.id)
    }
}

impl Titled for List {
    fn title(&self) -> &str {
        &self.title
    }
}
