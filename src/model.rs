use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rendering language. `"fr*"` tags select French rules, anything else English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_lowercase().starts_with("fr") {
            Locale::French
        } else {
            Locale::English
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::French => "fr",
            Locale::English => "en",
        }
    }

    pub fn is_french(&self) -> bool {
        matches!(self, Locale::French)
    }
}

/// Raw recipe as produced by the scraping boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Total time in minutes
    pub total_time: Option<u32>,
    /// Prep time in minutes
    pub prep_time: Option<u32>,
    /// Cook time in minutes
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub image_url: Option<String>,
    pub source_url: String,
}

/// A parsed ingredient line. Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Display quantity, possibly with fraction glyphs ("1 ½")
    pub quantity: Option<String>,
    /// Canonical short unit ("g", "tbsp")
    pub unit: Option<String>,
    pub quantity_numeric: Option<f64>,
    /// Upper bound for ranges such as "200-300 g"
    pub quantity_max: Option<f64>,
}

/// Initials taking "d'" / "l'" in French, mute h included
const FRENCH_ELISION_INITIALS: &str = "aeiouyàâéèêëïîôùûüh";

/// Whether a French article or "de" elides before `word`
pub(crate) fn elides(word: &str) -> bool {
    word.chars()
        .next()
        .and_then(|c| c.to_lowercase().next())
        .is_some_and(|c| FRENCH_ELISION_INITIALS.contains(c))
}

impl Ingredient {
    /// Format the ingredient the way Cookidoo displays it.
    ///
    /// French: `200 g de farine`, `20 g d'huile d'olive`.
    /// English: `200 g flour`, `1 tbsp olive oil`.
    pub fn to_text(&self, locale: Locale) -> String {
        let name = lowercase_first(&self.name);
        match (&self.quantity, &self.unit) {
            (Some(quantity), Some(unit)) => {
                if locale.is_french() {
                    if elides(&name) {
                        format!("{quantity} {unit} d'{name}")
                    } else {
                        format!("{quantity} {unit} de {name}")
                    }
                } else {
                    format!("{quantity} {unit} {name}")
                }
            }
            (Some(quantity), None) => format!("{quantity} {name}"),
            _ => name,
        }
    }
}

pub(crate) fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Character span inside one rendered step text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedMode {
    Numeric(u32),
    Turbo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempMode {
    Numeric(u32),
    Steam,
}

/// Time/temperature/speed marker anchored to the parameter suffix of a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAnnotation {
    pub position: Position,
    /// "1".."10" or "Turbo"
    pub speed: Option<String>,
    /// Duration in seconds
    pub time: Option<u32>,
    /// "100" or "varoma"
    pub temperature_value: Option<String>,
    pub temperature_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMention {
    pub position: Position,
    pub ingredient: Arc<Ingredient>,
}

/// A recipe step with resolved appliance parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub description: String,
    pub duration_seconds: Option<u32>,
    pub temperature: Option<TempMode>,
    pub speed: Option<SpeedMode>,
    pub reverse: bool,
    pub ingredient_mentions: Vec<IngredientMention>,
    pub parameter_annotation: Option<ParameterAnnotation>,
}

/// A fully converted recipe, ready to be published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Arc<Ingredient>>,
    pub steps: Vec<Step>,
    pub servings: u32,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub total_time_minutes: u32,
    pub hints: Vec<String>,
    /// Always starts with the base appliance
    pub tools: Vec<String>,
    pub source_url: String,
    pub locale: Locale,
}
