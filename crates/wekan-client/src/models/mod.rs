//! Entity snapshots.
//!
//! Every entity is built by a `fetch` that issues exactly one GET against its
//! canonical path. Entities hold foreign keys (`board_id`, `list_id`) rather
//! than references to each other; child accessors re-query the server.

pub mod board;
pub mod card;
pub mod list;
pub mod swimlane;
pub mod user;

pub use board::{Board, BoardLabel, BoardMember};
pub use card::Card;
pub use list::{List, WipLimit};
pub use swimlane::Swimlane;
pub use user::User;

use serde::Deserialize;

/// Identity shared by all server-side resources.
pub trait Entity {
    fn id(&self) -> &str;

    /// Canonical REST path of this resource.
    fn path(&self) -> String;
}

pub trait Titled: Entity {
    fn title(&self) -> &str;
}

/// Exact-title lookup; the first match wins.
pub fn find_by_title<T: Titled>(items: Vec<T>, title: &str) -> Option<T> {
    items.into_iter().find(|item| item.title() == title)
}

/// `{"_id": ...}` as returned by listings and create calls.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IdRef {
    #[serde(rename = "_id")]
    pub id: String,
}
