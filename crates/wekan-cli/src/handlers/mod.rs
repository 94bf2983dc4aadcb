pub mod board;
pub mod user;
