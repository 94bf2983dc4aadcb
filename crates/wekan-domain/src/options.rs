use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use wekan_core::WekanError;

use crate::colors::BoardColor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardPermission {
    #[default]
    Private,
    Public,
}

impl BoardPermission {
    pub fn as_str(self) -> &'static str {
        match self {
            BoardPermission::Private => "private",
            BoardPermission::Public => "public",
        }
    }
}

impl fmt::Display for BoardPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardPermission {
    type Err = WekanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(BoardPermission::Private),
            "public" => Ok(BoardPermission::Public),
            other => Err(WekanError::Validation(format!(
                "'{}' is not a board permission (expected private or public)",
                other
            ))),
        }
    }
}

/// Settings applied when a board is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardOptions {
    /// Whether the owner becomes a board admin.
    pub is_admin: bool,
    pub is_active: bool,
    pub is_no_comments: bool,
    pub is_comment_only: bool,
    pub permission: BoardPermission,
    /// Unset lets the server pick its default theme.
    pub color: Option<BoardColor>,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            is_admin: true,
            is_active: true,
            is_no_comments: false,
            is_comment_only: false,
            permission: BoardPermission::Private,
            color: None,
        }
    }
}

impl BoardOptions {
    pub fn with_permission(mut self, permission: BoardPermission) -> Self {
        self.permission = permission;
        self
    }

    pub fn with_color(mut self, color: BoardColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// A member's rights on a board.
///
/// `is_admin` members can edit cards, remove members and change board
/// settings. `is_no_comments` hides comments and activities.
/// `is_comment_only` restricts the member to commenting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPermissions {
    pub is_admin: bool,
    pub is_no_comments: bool,
    pub is_comment_only: bool,
}

impl MemberPermissions {
    pub fn admin() -> Self {
        Self {
            is_admin: true,
            ..Self::default()
        }
    }

    pub fn comment_only() -> Self {
        Self {
            is_comment_only: true,
            ..Self::default()
        }
    }
}
