//! Board-level operations on the session.

use serde::Serialize;
use serde_json::Value;
use tracing::info;
use wekan_core::{WekanError, WekanResult};
use wekan_domain::{BoardColor, BoardOptions, BoardPermission};

use crate::models::{find_by_title, Board, IdRef};
use crate::session::WekanClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewBoard<'a> {
    title: &'a str,
    owner: &'a str,
    is_admin: bool,
    is_active: bool,
    is_no_comments: bool,
    is_comment_only: bool,
    permission: BoardPermission,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<BoardColor>,
}

impl<'a> NewBoard<'a> {
    fn new(title: &'a str, owner: &'a str, options: &BoardOptions) -> Self {
        Self {
            title,
            owner,
            is_admin: options.is_admin,
            is_active: options.is_active,
            is_no_comments: options.is_no_comments,
            is_comment_only: options.is_comment_only,
            permission: options.permission,
            color: options.color,
        }
    }
}

impl WekanClient {
    /// Fetch a single board.
    pub async fn get_board(&self, id: &str) -> WekanResult<Board> {
        Board::fetch(self, id).await
    }

    /// All boards the user is a member of, each fetched in full.
    pub async fn get_user_boards(&self, user_id: &str) -> WekanResult<Vec<Board>> {
        let refs: Vec<IdRef> = self.get(&format!("/api/users/{}/boards", user_id)).await?;
        self.fetch_boards(refs).await
    }

    pub async fn get_public_boards(&self) -> WekanResult<Vec<Board>> {
        let refs: Vec<IdRef> = self.get("/api/boards").await?;
        self.fetch_boards(refs).await
    }

    async fn fetch_boards(&self, refs: Vec<IdRef>) -> WekanResult<Vec<Board>> {
        let mut boards = Vec::with_capacity(refs.len());
        for board in refs {
            boards.push(self.get_board(&board.id).await?);
        }
        Ok(boards)
    }

    /// First of the user's boards whose title matches exactly.
    pub async fn get_board_by_title(&self, user_id: &str, title: &str) -> WekanResult<Board> {
        find_by_title(self.get_user_boards(user_id).await?, title)
            .ok_or_else(|| WekanError::NotFound(format!("Could not find board {}", title)))
    }

    pub async fn create_board(
        &self,
        title: &str,
        owner_id: &str,
        options: &BoardOptions,
    ) -> WekanResult<Board> {
        let created: IdRef = self
            .post("/api/boards", &NewBoard::new(title, owner_id, options))
            .await?;
        info!(board_id = %created.id, title, owner_id, "created board");
        self.get_board(&created.id).await
    }

    pub async fn delete_board(&self, board_id: &str) -> WekanResult<()> {
        let _: Value = self.delete(&format!("/api/boards/{}", board_id)).await?;
        info!(board_id, "deleted board");
        Ok(())
    }

    /// Delete the user's board with this title. Returns the deleted board id.
    pub async fn delete_board_by_title(&self, user_id: &str, title: &str) -> WekanResult<String> {
        let board = self.get_board_by_title(user_id, title).await?;
        self.delete_board(&board.id).await?;
        Ok(board.id)
    }
}
