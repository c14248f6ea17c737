use thiserror::Error;

/// Errors that can occur while fetching, converting or publishing a recipe.
///
/// The conversion core itself is total and never produces one of these; they
/// come from the fetch and publish boundaries and from configuration.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Required configuration (usually Cookidoo credentials) is absent
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// Failed to fetch recipe from URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Failed to parse recipe from webpage
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// No extractor could successfully parse the recipe
    #[error("No extractor could parse the recipe from this webpage")]
    NoExtractorMatched,

    /// Cookidoo refused the credentials or no session is open
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Cookidoo refused to create or update the recipe
    #[error("Recipe upload rejected (status {status}): {body}")]
    PublishRejected { status: u16, body: String },

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
