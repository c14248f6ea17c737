//! Import web recipes into Cookidoo as Thermomix recipes.
//!
//! A recipe page is scraped into a [`RawRecipe`], converted into a
//! [`Recipe`] whose steps carry Thermomix speed, temperature and time, and
//! optionally published to a Cookidoo account with a [`CookidooClient`].

pub mod builder;
pub mod config;
pub mod converters;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod publish;
pub mod report;

use log::{debug, info};
use std::time::Duration;

use crate::extractors::{Extractor, JsonLdExtractor, ParsingContext};
use crate::fetchers::RequestFetcher;

pub use builder::{ImportOutcome, RecipeImporter, RecipeImporterBuilder};
pub use config::ImportConfig;
pub use converters::convert_recipe;
pub use error::ImportError;
pub use model::{
    Ingredient, IngredientMention, Locale, ParameterAnnotation, Position, RawRecipe, Recipe,
    SpeedMode, Step, TempMode,
};
pub use publish::{CookidooClient, RecipePayload, UploadResult};
pub use report::{format_import_summary, format_preview};

/// Fetch a recipe page and read its structured data
pub async fn fetch_recipe(url: &str) -> Result<RawRecipe, ImportError> {
    fetch_recipe_with_timeout(url, None).await
}

pub async fn fetch_recipe_with_timeout(
    url: &str,
    timeout: Option<Duration>,
) -> Result<RawRecipe, ImportError> {
    let fetcher = RequestFetcher::new(timeout)?;
    let html = fetcher.fetch(url).await?;
    let context = ParsingContext::new(url, &html);

    let recipe = JsonLdExtractor.parse(&context)?;
    debug!(
        "Scraped '{}' from {}: {} ingredients, {} instructions",
        recipe.title,
        url,
        recipe.ingredients.len(),
        recipe.instructions.len()
    );
    Ok(recipe)
}

/// Fetch and convert without publishing
pub async fn preview_recipe(url: &str, config: &ImportConfig) -> Result<Recipe, ImportError> {
    let raw = fetch_recipe_with_timeout(url, Some(config.timeout())).await?;
    Ok(convert_recipe(&raw, config.locale()))
}

/// Fetch, convert and publish with an authenticated client
pub async fn import_recipe(
    url: &str,
    client: &mut CookidooClient,
    locale: Locale,
) -> Result<(Recipe, UploadResult), ImportError> {
    let raw = fetch_recipe(url).await?;
    let recipe = convert_recipe(&raw, locale);

    if !client.is_connected() {
        client.login().await?;
    }
    let result = client.upload_recipe(&recipe).await?;
    info!("Imported {} as {}", url, result.url);
    Ok((recipe, result))
}
