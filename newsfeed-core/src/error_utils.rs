use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_not_found(&self) -> bool;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Article(e) => {
                error!("Article error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_not_found(&self) -> bool {
        match self {
            CoreError::Article(e) => e.is_not_found(),
            _ => false,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Article(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::InvalidInput { .. } => {
                "Invalid input provided. Please check your input and try again.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Article(_) => "ARTICLE".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
        }
    }
}

impl ErrorExt for ArticleError {
    fn log_error(&self) -> &Self {
        error!("ArticleError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ArticleError (warning): {}", self);
        self
    }

    fn is_not_found(&self) -> bool {
        matches!(
            self,
            ArticleError::NotFound { .. } | ArticleError::CategoryMismatch { .. }
        )
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ArticleError::FetchFailed { .. } => {
                "Could not load articles. Please check your connection and try again.".to_string()
            }
            ArticleError::InvalidSlug { .. } => "This article link is not valid.".to_string(),
            // Same wording for both so a wrong category never reveals that the id exists.
            ArticleError::NotFound { .. } | ArticleError::CategoryMismatch { .. } => {
                "The requested article could not be found.".to_string()
            }
            ArticleError::InvalidResponse { .. } => {
                "The news service returned an unexpected response. Please try again later."
                    .to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ArticleError::FetchFailed { .. } => "ARTICLE_FETCH_FAILED".to_string(),
            ArticleError::InvalidSlug { .. } => "ARTICLE_INVALID_SLUG".to_string(),
            ArticleError::NotFound { .. } => "ARTICLE_NOT_FOUND".to_string(),
            ArticleError::CategoryMismatch { .. } => "ARTICLE_CATEGORY_MISMATCH".to_string(),
            ArticleError::InvalidResponse { .. } => "ARTICLE_INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn is_not_found(&self) -> bool {
        false
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::MissingField { field } => {
                format!("Required configuration field '{}' is missing.", field)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::MissingEnvironmentVariable { var_name } => format!(
                "Environment variable '{}' is required but not set.",
                var_name
            ),
            ConfigError::Parse(_) => {
                "Configuration format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::MissingField { .. } => "CONFIG_MISSING_FIELD".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::MissingEnvironmentVariable { .. } => "CONFIG_MISSING_ENV_VAR".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
