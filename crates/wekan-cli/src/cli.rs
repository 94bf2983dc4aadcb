use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wekan_domain::{BoardColor, BoardPermission};

#[derive(Parser)]
#[command(name = "wekan")]
#[command(about = "Manage boards and users on a Wekan server", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and as whom to log in. Unset values fall back to the config file.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Server URL (or set WEKAN_URL)
    #[arg(long, global = true, env = "WEKAN_URL")]
    pub url: Option<String>,

    /// Login name (or set WEKAN_USERNAME)
    #[arg(long, global = true, env = "WEKAN_USERNAME")]
    pub username: Option<String>,

    /// Password (or set WEKAN_PASSWORD)
    #[arg(long, global = true, env = "WEKAN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, global = true)]
    pub insecure: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// User administration
    User(UserCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List boards of a user (the logged-in user by default)
    List {
        #[arg(long, conflicts_with = "public")]
        user_id: Option<String>,
        /// List public boards instead
        #[arg(long)]
        public: bool,
    },
    /// Get a board by id or title
    Get(BoardSelector),
    /// Create an empty board
    Create(BoardCreateArgs),
    /// Delete a board by id or title
    Delete(BoardSelector),
    /// Copy the lists and cards of a board into a new board
    Duplicate {
        #[command(flatten)]
        source: BoardSelector,
        /// Title of the new board
        #[arg(long)]
        new_title: String,
    },
    /// Write a board's lists and cards to a YAML template
    Export {
        #[command(flatten)]
        source: BoardSelector,
        /// Destination file
        #[arg(long)]
        output: PathBuf,
        /// Title recorded in the template (defaults to the board title)
        #[arg(long)]
        template_title: Option<String>,
    },
    /// Create a board from a YAML template
    Apply {
        /// Template file
        #[arg(long)]
        file: PathBuf,
        /// Owner user id (defaults to the logged-in user)
        #[arg(long)]
        owner: Option<String>,
        #[command(flatten)]
        options: BoardStyleArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BoardSelector {
    #[arg(long, required_unless_present = "title", conflicts_with = "title")]
    pub id: Option<String>,
    /// Exact title among the logged-in user's boards
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct BoardCreateArgs {
    #[arg(long)]
    pub title: String,
    /// Owner user id (defaults to the logged-in user)
    #[arg(long)]
    pub owner: Option<String>,
    #[command(flatten)]
    pub options: BoardStyleArgs,
}

#[derive(Args, Debug, Clone)]
pub struct BoardStyleArgs {
    /// private or public
    #[arg(long)]
    pub permission: Option<BoardPermission>,
    /// Board theme color, e.g. belize or wisteria
    #[arg(long)]
    pub color: Option<BoardColor>,
}

// User commands
#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// List all users
    List,
    /// Get a user by id or username
    Get(UserSelector),
    /// Create a user
    Create {
        #[arg(long = "name")]
        new_username: String,
        #[arg(long)]
        email: String,
        #[arg(long = "new-password")]
        new_password: String,
    },
    /// Delete a user by id or username
    Delete(UserSelector),
}

#[derive(Args, Debug, Clone)]
pub struct UserSelector {
    #[arg(long, required_unless_present = "name", conflicts_with = "name")]
    pub id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
}
