//! Typed client for the Wekan REST API.
//!
//! [`WekanClient`] logs in once and then issues authenticated calls. Entities
//! ([`Board`], [`List`], [`Swimlane`], [`Card`], [`User`]) are snapshots built
//! by fetching from the server; navigating from a parent to its children always
//! goes back to the server through the client.

pub mod boards;
pub mod duplicate;
pub mod models;
pub mod session;
pub mod users;

pub use models::{
    Board, BoardLabel, BoardMember, Card, Entity, List, Swimlane, Titled, User, WipLimit,
};
pub use session::{Payload, WekanClient, LOGIN_PATH};

pub use wekan_core::{ClientConfig, WekanError, WekanResult};
pub use wekan_domain::{
    BoardColor, BoardConfiguration, BoardOptions, BoardPermission, CardConfiguration, Color,
    ListConfiguration, MemberPermissions,
};
