use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Article error: {0}")]
    Article(#[from] ArticleError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl CoreError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArticleError {
    /// Transport failure (`status_code` is `None`) or a non-success HTTP status.
    #[error("Failed to {operation}")]
    FetchFailed {
        operation: String,
        status_code: Option<u16>,
    },

    #[error("Invalid article URL: {slug}")]
    InvalidSlug { slug: String },

    #[error("Article not found: {post_id}")]
    NotFound { post_id: String },

    #[error("Article {post_id} not found in category {requested} (stored under {actual})")]
    CategoryMismatch {
        post_id: String,
        requested: String,
        actual: String,
    },

    #[error("Invalid service response: {details}")]
    InvalidResponse { details: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Environment variable not set: {var_name}")]
    MissingEnvironmentVariable { var_name: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
