pub mod config;
pub mod error;
pub mod result;

pub use config::ClientConfig;
pub use error::WekanError;
pub use result::WekanResult;
