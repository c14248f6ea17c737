use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::ImportConfig;
use crate::model::Recipe;
use crate::ImportError;

/// Where a published recipe ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub recipe_id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedRecipe {
    recipe_id: Option<String>,
}

/// Session with the Cookidoo created-recipes API.
///
/// Construct one per account from an [`ImportConfig`], call
/// [`login`](Self::login), then upload as many recipes as needed.
pub struct CookidooClient {
    client: Client,
    email: String,
    password: String,
    client_id: String,
    client_secret: String,
    base_url: String,
    auth_url: String,
    language: String,
    propagation_delay: Duration,
    access_token: Option<String>,
}

impl CookidooClient {
    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        let (email, password) = config.credentials()?;
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            email: email.to_string(),
            password: password.to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            base_url: config.base_url(),
            auth_url: config.auth_url(),
            language: config.language.clone(),
            propagation_delay: config.propagation_delay(),
            access_token: None,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.access_token.is_some()
    }

    /// Password grant against the account service
    pub async fn login(&mut self) -> Result<(), ImportError> {
        let response = self
            .client
            .post(&self.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", "password"),
                ("username", self.email.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::AuthenticationFailed(format!(
                "login refused (status {}): {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ImportError::AuthenticationFailed(format!("unexpected token response: {e}"))
        })?;
        self.access_token = Some(token.access_token);
        info!("Logged in to Cookidoo as {}", self.email);
        Ok(())
    }

    fn headers(&self) -> Result<HeaderMap, ImportError> {
        let token = self.access_token.as_deref().ok_or_else(|| {
            ImportError::AuthenticationFailed("not logged in, call login() first".to_string())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        Ok(headers)
    }

    /// Create the recipe by name, then fill in its content
    pub async fn upload_recipe(&self, recipe: &Recipe) -> Result<UploadResult, ImportError> {
        let headers = self.headers()?;
        let collection_url = format!("{}/created-recipes/{}", self.base_url, self.language);

        let response = self
            .client
            .post(&collection_url)
            .headers(headers.clone())
            .json(&json!({ "recipeName": recipe.name }))
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(rejected(status, response).await);
        }
        let created: CreatedRecipe = response
            .json()
            .await
            .map_err(|e| ImportError::PublishRejected {
                status: status.as_u16(),
                body: format!("unreadable creation response: {e}"),
            })?;
        let recipe_id = created
            .recipe_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ImportError::PublishRejected {
                status: status.as_u16(),
                body: "no recipeId returned".to_string(),
            })?;
        debug!("Created recipe {} ({})", recipe_id, recipe.name);

        // the new recipe is not immediately visible to the update endpoint
        if !self.propagation_delay.is_zero() {
            tokio::time::sleep(self.propagation_delay).await;
        }

        let recipe_url = format!("{collection_url}/{recipe_id}");
        let response = self
            .client
            .patch(&recipe_url)
            .headers(headers)
            .json(&recipe.to_payload())
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            return Err(rejected(status, response).await);
        }

        info!("Uploaded '{}' as {}", recipe.name, recipe_id);
        Ok(UploadResult {
            recipe_id,
            url: recipe_url,
        })
    }
}

async fn rejected(status: StatusCode, response: reqwest::Response) -> ImportError {
    ImportError::PublishRejected {
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    }
}
