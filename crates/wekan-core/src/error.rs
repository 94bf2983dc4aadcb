use thiserror::Error;

#[derive(Error, Debug)]
pub enum WekanError {
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        #[source]
        source: Option<Box<WekanError>>,
    },

    /// The server answered with a non-2xx status. `body` is the raw response text.
    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The server answered 2xx but the JSON payload carries an `error` field.
    #[error("Service error: {0}")]
    Service(serde_json::Value),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WekanError {
    pub fn authentication(message: impl Into<String>, source: Option<WekanError>) -> Self {
        Self::Authentication {
            message: message.into(),
            source: source.map(Box::new),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for WekanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
