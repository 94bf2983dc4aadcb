//! Board configuration templates.
//!
//! A [`BoardConfiguration`] describes the list/card skeleton of a board with
//! no server identifiers, so it can be written to YAML, edited by hand, and
//! replayed against any server. On disk every node carries its kind as a YAML
//! tag:
//!
//! ```yaml
//! !BoardConfiguration
//! title: Sprint board
//! lists:
//! - !ListConfiguration
//!   title: Todo
//!   cards:
//!   - !CardConfiguration
//!     title: Write docs
//!     description: README first
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use wekan_core::{WekanError, WekanResult};

/// Tagged node as it appears in a configuration document.
///
/// Documents are parsed into nodes first; the typed tree is then built from
/// them, which rejects a node of the wrong kind at any level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigurationNode {
    BoardConfiguration {
        title: String,
        #[serde(default)]
        lists: Vec<ConfigurationNode>,
    },
    ListConfiguration {
        title: String,
        #[serde(default)]
        cards: Vec<ConfigurationNode>,
    },
    CardConfiguration {
        title: String,
        #[serde(default)]
        description: String,
    },
}

impl ConfigurationNode {
    pub fn tag(&self) -> &'static str {
        match self {
            ConfigurationNode::BoardConfiguration { .. } => "!BoardConfiguration",
            ConfigurationNode::ListConfiguration { .. } => "!ListConfiguration",
            ConfigurationNode::CardConfiguration { .. } => "!CardConfiguration",
        }
    }

    fn unexpected(&self, expected: &str) -> WekanError {
        WekanError::Validation(format!("expected {}, found {}", expected, self.tag()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationNode", into = "ConfigurationNode")]
pub struct CardConfiguration {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationNode", into = "ConfigurationNode")]
pub struct ListConfiguration {
    pub title: String,
    pub cards: Vec<CardConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationNode", into = "ConfigurationNode")]
pub struct BoardConfiguration {
    pub title: String,
    pub lists: Vec<ListConfiguration>,
}

impl CardConfiguration {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl ListConfiguration {
    pub fn new(title: impl Into<String>, cards: Vec<CardConfiguration>) -> Self {
        Self {
            title: title.into(),
            cards,
        }
    }
}

impl BoardConfiguration {
    pub fn new(title: impl Into<String>, lists: Vec<ListConfiguration>) -> Self {
        Self {
            title: title.into(),
            lists,
        }
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|list| list.cards.len()).sum()
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> WekanResult<Self> {
        let node: ConfigurationNode = serde_yaml_ng::from_str(yaml)
            .map_err(|e| WekanError::Serialization(e.to_string()))?;
        Self::try_from(node)
    }

    /// Serialize to a tagged YAML document.
    pub fn to_yaml_string(&self) -> WekanResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| WekanError::Serialization(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> WekanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> WekanResult<()> {
        let yaml = self.to_yaml_string()?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

impl TryFrom<ConfigurationNode> for CardConfiguration {
    type Error = WekanError;

    fn try_from(node: ConfigurationNode) -> Result<Self, Self::Error> {
        match node {
            ConfigurationNode::CardConfiguration { title, description } => {
                Ok(Self { title, description })
            }
            other => Err(other.unexpected("!CardConfiguration")),
        }
    }
}

impl TryFrom<ConfigurationNode> for ListConfiguration {
    type Error = WekanError;

    fn try_from(node: ConfigurationNode) -> Result<Self, Self::Error> {
        match node {
            ConfigurationNode::ListConfiguration { title, cards } => Ok(Self {
                title,
                cards: cards
                    .into_iter()
                    .map(CardConfiguration::try_from)
                    .collect::<WekanResult<_>>()?,
            }),
            other => Err(other.unexpected("!ListConfiguration")),
        }
    }
}

impl TryFrom<ConfigurationNode> for BoardConfiguration {
    type Error = WekanError;

    fn try_from(node: ConfigurationNode) -> Result<Self, Self::Error> {
        match node {
            ConfigurationNode::BoardConfiguration { title, lists } => Ok(Self {
                title,
                lists: lists
                    .into_iter()
                    .map(ListConfiguration::try_from)
                    .collect::<WekanResult<_>>()?,
            }),
            other => Err(other.unexpected("!BoardConfiguration")),
        }
    }
}

impl From<CardConfiguration> for ConfigurationNode {
    fn from(card: CardConfiguration) -> Self {
        ConfigurationNode::CardConfiguration {
            title: card.title,
            description: card.description,
        }
    }
}

impl From<ListConfiguration> for ConfigurationNode {
    fn from(list: ListConfiguration) -> Self {
        ConfigurationNode::ListConfiguration {
            title: list.title,
            cards: list.cards.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BoardConfiguration> for ConfigurationNode {
    fn from(board: BoardConfiguration) -> Self {
        ConfigurationNode::BoardConfiguration {
            title: board.title,
            lists: board.lists.into_iter().map(Into::into).collect(),
        }
    }
}
