//! Board templates and duplication.
//!
//! A live board is captured into a [`BoardConfiguration`] (titles and card
//! descriptions only) and a configuration is replayed into a new board.
//! Replay is sequential and order-preserving. The server has no
//! transactions, so a failure part way through leaves the new board partially
//! populated and the error is returned to the caller.

use tracing::{info, warn};
use wekan_core::{WekanError, WekanResult};
use wekan_domain::{BoardConfiguration, BoardOptions, CardConfiguration, ListConfiguration};

use crate::models::Board;
use crate::session::WekanClient;

/// Lookups that report an empty collection as `NotFound` yield an empty
/// vector here. Every other error is passed through.
fn absent_as_empty<T>(result: WekanResult<Vec<T>>) -> WekanResult<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(WekanError::NotFound(reason)) => {
            warn!(%reason, "treating missing collection as empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

impl WekanClient {
    /// Walk `source` into a configuration titled `title`.
    ///
    /// Ids, timestamps, colors, labels and members are dropped. A board with
    /// no lists, or a list with no cards, contributes an empty collection.
    pub async fn capture_configuration(
        &self,
        source: &Board,
        title: &str,
    ) -> WekanResult<BoardConfiguration> {
        let lists = absent_as_empty(source.get_lists(self).await)?;

        let mut list_configs = Vec::with_capacity(lists.len());
        for list in lists {
            let cards = absent_as_empty(list.get_cards(self).await)?;
            let card_configs = cards
                .into_iter()
                .map(|card| CardConfiguration::new(card.title, card.description.unwrap_or_default()))
                .collect();
            list_configs.push(ListConfiguration::new(list.title, card_configs));
        }

        Ok(BoardConfiguration::new(title, list_configs))
    }

    /// Create a board and populate it from `config`, list by list and card by
    /// card, in order.
    pub async fn create_board_from_configuration(
        &self,
        config: &BoardConfiguration,
        owner_id: &str,
        options: &BoardOptions,
    ) -> WekanResult<Board> {
        let board = self.create_board(&config.title, owner_id, options).await?;

        for (index, list_config) in config.lists.iter().enumerate() {
            if let Err(e) = self.replay_list(&board, list_config).await {
                warn!(
                    board_id = %board.id,
                    lists_done = index,
                    lists_total = config.lists.len(),
                    error = %e,
                    "board left partially populated"
                );
                return Err(e);
            }
        }

        info!(
            board_id = %board.id,
            lists = config.lists.len(),
            cards = config.card_count(),
            "created board from configuration"
        );
        Ok(board)
    }

    async fn replay_list(&self, board: &Board, config: &ListConfiguration) -> WekanResult<()> {
        let list = board.create_list(self, &config.title).await?;
        for card in &config.cards {
            list.create_card(self, &card.title, &card.description).await?;
        }
        Ok(())
    }

    /// Copy the list/card skeleton of `source` into a new board titled
    /// `new_title`, owned by the source's first admin.
    ///
    /// Board metadata (color, labels, members, dates) is not copied. Fails
    /// with [`WekanError::NotFound`] when the source has no admin.
    pub async fn duplicate_board(&self, source: &Board, new_title: &str) -> WekanResult<Board> {
        let config = self.capture_configuration(source, new_title).await?;

        let owner = source
            .get_admin_users(self)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                WekanError::NotFound(format!("Could not find admin users for board {}", source.title))
            })?;

        info!(
            source_id = %source.id,
            new_title,
            owner_id = %owner.id,
            "duplicating board"
        );
        self.create_board_from_configuration(&config, &owner.id, &BoardOptions::default())
            .await
    }
}
