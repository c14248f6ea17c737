use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::model::Locale;
use crate::ImportError;

/// Import configuration: Cookidoo account, localization and HTTP settings
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Cookidoo account email (required only for publishing)
    #[serde(default)]
    pub email: Option<String>,
    /// Cookidoo account password (required only for publishing)
    #[serde(default)]
    pub password: Option<String>,
    /// Cookidoo country code, e.g. "fr"
    #[serde(default = "default_country")]
    pub country: String,
    /// Cookidoo language, e.g. "fr-FR"
    #[serde(default = "default_language")]
    pub language: String,
    /// Base URL of the Cookidoo site (derived from the country when absent)
    #[serde(default)]
    pub base_url: Option<String>,
    /// OAuth token endpoint (derived from the country when absent)
    #[serde(default)]
    pub auth_url: Option<String>,
    /// OAuth client id of the mobile application
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// OAuth client secret of the mobile application
    #[serde(default = "default_client_secret")]
    pub client_secret: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Delay between recipe creation and the content update, in milliseconds
    #[serde(default = "default_propagation_delay_ms")]
    pub propagation_delay_ms: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            country: default_country(),
            language: default_language(),
            base_url: None,
            auth_url: None,
            client_id: default_client_id(),
            client_secret: default_client_secret(),
            timeout: default_timeout(),
            propagation_delay_ms: default_propagation_delay_ms(),
        }
    }
}

// Default value functions
fn default_country() -> String {
    "fr".to_string()
}

fn default_language() -> String {
    "fr-FR".to_string()
}

fn default_client_id() -> String {
    "kupferwerk-client-nwot".to_string()
}

fn default_client_secret() -> String {
    "Ls50ON1woySqs1dCdJge".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_propagation_delay_ms() -> u64 {
    3000
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COOKIDOO_ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COOKIDOO_EMAIL, COOKIDOO_LANGUAGE, ...
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// The two-letter locale tag used for conversion ("fr-FR" -> "fr")
    pub fn locale_tag(&self) -> &str {
        self.language.split('-').next().unwrap_or(&self.language)
    }

    pub fn locale(&self) -> Locale {
        Locale::from_tag(self.locale_tag())
    }

    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://cookidoo.{}", self.country),
        }
    }

    pub fn auth_url(&self) -> String {
        self.auth_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}.tmmobile.vorwerk-digital.com/ciam/auth/token",
                self.country
            )
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn propagation_delay(&self) -> Duration {
        Duration::from_millis(self.propagation_delay_ms)
    }

    /// Account credentials, or `MissingConfig` when either is absent or blank
    pub fn credentials(&self) -> Result<(&str, &str), ImportError> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(ImportError::MissingConfig(
                "COOKIDOO_EMAIL and COOKIDOO_PASSWORD must be set in the environment or config.toml"
                    .to_string(),
            )),
        }
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // COOKIDOO_EMAIL -> email, COOKIDOO_BASE_URL -> base_url
        .add_source(Environment::with_prefix("COOKIDOO").try_parsing(true))
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ImportConfig::default();
        assert_eq!(config.country, "fr");
        assert_eq!(config.language, "fr-FR");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.propagation_delay_ms, 3000);
        assert!(config.email.is_none());
    }

    #[test]
    fn test_locale_tag() {
        let mut config = ImportConfig::default();
        assert_eq!(config.locale_tag(), "fr");
        assert_eq!(config.locale(), Locale::French);

        config.language = "en-GB".to_string();
        assert_eq!(config.locale_tag(), "en");
        assert_eq!(config.locale(), Locale::English);
    }

    #[test]
    fn test_derived_urls() {
        let mut config = ImportConfig::default();
        assert_eq!(config.base_url(), "https://cookidoo.fr");
        assert_eq!(
            config.auth_url(),
            "https://fr.tmmobile.vorwerk-digital.com/ciam/auth/token"
        );

        config.base_url = Some("http://127.0.0.1:1234/".to_string());
        assert_eq!(config.base_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn test_missing_credentials() {
        let mut config = ImportConfig::default();
        assert!(matches!(
            config.credentials(),
            Err(ImportError::MissingConfig(_))
        ));

        config.email = Some("cook@example.com".to_string());
        config.password = Some(String::new());
        assert!(config.credentials().is_err());

        config.password = Some("secret".to_string());
        assert_eq!(config.credentials().unwrap(), ("cook@example.com", "secret"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ImportConfig = Config::builder()
            .add_source(config::File::from_str(
                "email = \"cook@example.com\"\nlanguage = \"en-US\"\ntimeout = 5",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.email.as_deref(), Some("cook@example.com"));
        assert_eq!(config.locale(), Locale::English);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.country, "fr");
    }
}
