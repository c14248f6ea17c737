use std::time::Duration;

use crate::{
    convert_recipe, fetch_recipe_with_timeout, CookidooClient, ImportConfig, ImportError, Locale,
    RawRecipe, Recipe, UploadResult,
};

/// Where the recipe comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Scrape a recipe page
    Url(String),
    /// Already scraped recipe
    Raw(RawRecipe),
}

/// Result of a recipe import operation
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    /// Converted but not published
    Preview(Recipe),
    /// Converted and published to Cookidoo
    Imported {
        recipe: Recipe,
        result: UploadResult,
    },
}

impl ImportOutcome {
    pub fn recipe(&self) -> &Recipe {
        match self {
            ImportOutcome::Preview(recipe) => recipe,
            ImportOutcome::Imported { recipe, .. } => recipe,
        }
    }
}

/// Builder for configuring and executing recipe imports
#[derive(Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    locale: Option<Locale>,
    timeout: Option<Duration>,
    config: Option<ImportConfig>,
    client: Option<CookidooClient>,
    preview_only: bool,
}

impl RecipeImporterBuilder {
    /// Scrape the recipe from a web page
    ///
    /// # Example
    /// ```
    /// use cookidoo_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Convert a recipe that was scraped elsewhere
    pub fn raw(mut self, recipe: RawRecipe) -> Self {
        self.source = Some(InputSource::Raw(recipe));
        self
    }

    /// Rendering language; defaults to the configured language, then French
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Timeout for fetching the recipe page
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Publish with this client instead of one built from the config
    pub fn client(mut self, client: CookidooClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Stop after conversion
    ///
    /// # Example
    /// ```
    /// use cookidoo_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .preview_only();
    /// ```
    pub fn preview_only(mut self) -> Self {
        self.preview_only = true;
        self
    }

    /// Run the import
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - Publishing was requested without a client or a config
    /// - Fetching, scraping, login or upload fails
    ///
    /// # Example
    /// ```no_run
    /// # use cookidoo_import::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let outcome = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .preview_only()
    ///     .build()
    ///     .await?;
    /// println!("{}", outcome.recipe().name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ImportOutcome, ImportError> {
        let source = self.source.ok_or_else(|| {
            ImportError::BuilderError("No input source specified. Use .url() or .raw()".to_string())
        })?;

        let locale = self
            .locale
            .or_else(|| self.config.as_ref().map(ImportConfig::locale))
            .unwrap_or_default();
        let timeout = self
            .timeout
            .or_else(|| self.config.as_ref().map(ImportConfig::timeout));

        let raw = match source {
            InputSource::Url(url) => fetch_recipe_with_timeout(&url, timeout).await?,
            InputSource::Raw(raw) => raw,
        };
        let recipe = convert_recipe(&raw, locale);

        if self.preview_only {
            return Ok(ImportOutcome::Preview(recipe));
        }

        let mut client = match (self.client, &self.config) {
            (Some(client), _) => client,
            (None, Some(config)) => CookidooClient::from_config(config)?,
            (None, None) => {
                return Err(ImportError::BuilderError(
                    "Publishing needs .client() or .config(); use .preview_only() to skip it"
                        .to_string(),
                ))
            }
        };
        if !client.is_connected() {
            client.login().await?;
        }
        let result = client.upload_recipe(&recipe).await?;

        Ok(ImportOutcome::Imported { recipe, result })
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use cookidoo_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
