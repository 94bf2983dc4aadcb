use wekan_client::{Board, User, WekanClient};
use wekan_core::{ClientConfig, WekanError, WekanResult};

use crate::cli::{BoardSelector, ConnectionArgs, UserSelector};

/// A logged-in session plus the lookups shared by the handlers.
pub struct CliContext {
    pub api: WekanClient,
}

impl CliContext {
    /// Merge flags and environment over the config file, then log in.
    pub async fn connect(args: &ConnectionArgs) -> WekanResult<Self> {
        let config = ClientConfig::load();
        Self::connect_with(args, config).await
    }

    async fn connect_with(args: &ConnectionArgs, config: ClientConfig) -> WekanResult<Self> {
        let url = args.url.clone().or_else(|| config.url.clone()).ok_or_else(|| {
            WekanError::Config("no server URL; pass --url or set WEKAN_URL".to_string())
        })?;
        let username = args
            .username
            .clone()
            .or_else(|| config.username.clone())
            .ok_or_else(|| {
                WekanError::Config(
                    "no username; pass --username or set WEKAN_USERNAME".to_string(),
                )
            })?;
        let password = args.password.clone().ok_or_else(|| {
            WekanError::Config("no password; pass --password or set WEKAN_PASSWORD".to_string())
        })?;

        let verify_tls = config.verify_tls && !args.insecure;
        let config = config.with_verify_tls(verify_tls);
        tracing::debug!(%url, %username, verify_tls, "connecting");

        let api = WekanClient::connect(&url, &username, &password, &config).await?;
        Ok(Self { api })
    }

    pub fn session_user(&self) -> &User {
        self.api.user()
    }

    pub async fn board(&self, selector: &BoardSelector) -> WekanResult<Board> {
        match (&selector.id, &selector.title) {
            (Some(id), _) => self.api.get_board(id).await,
            (None, Some(title)) => {
                self.api
                    .get_board_by_title(&self.session_user().id, title)
                    .await
            }
            (None, None) => Err(WekanError::Validation(
                "either --id or --title is required".to_string(),
            )),
        }
    }

    pub async fn user(&self, selector: &UserSelector) -> WekanResult<User> {
        match (&selector.id, &selector.name) {
            (Some(id), _) => self.api.get_user(id).await,
            (None, Some(name)) => self
                .api
                .get_user_by_username(name)
                .await?
                .ok_or_else(|| WekanError::NotFound(format!("Could not find user {}", name))),
            (None, None) => Err(WekanError::Validation(
                "either --id or --name is required".to_string(),
            )),
        }
    }
}
