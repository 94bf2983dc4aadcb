pub mod colors;
pub mod configuration;
pub mod options;

pub use colors::{BoardColor, Color};
pub use configuration::{
    BoardConfiguration, CardConfiguration, ConfigurationNode, ListConfiguration,
};
pub use options::{BoardOptions, BoardPermission, MemberPermissions};
