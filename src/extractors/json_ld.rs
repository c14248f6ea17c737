use html_escape::decode_html_entities;
use log::debug;
use regex::Regex;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

use super::{clean_instruction_lines, Extractor, ParsingContext};
use crate::model::RawRecipe;
use crate::ImportError;

pub const UNTITLED_RECIPE: &str = "Untitled recipe";

/// Reads the schema.org `Recipe` object embedded in `application/ld+json`
/// scripts.
pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: Option<String>,
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<RecipeYield>,
    #[serde(rename = "prepTime")]
    prep_time: Option<TimeValue>,
    #[serde(rename = "cookTime")]
    cook_time: Option<TimeValue>,
    #[serde(rename = "totalTime")]
    total_time: Option<TimeValue>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Strings(Vec<String>),
    Single(String),
}

#[derive(Debug, Deserialize)]
struct RecipeInstructionObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    HowTo(Vec<HowTo>),
    MultipleObject(Vec<RecipeInstructionObject>),
    NestedSections(Vec<Vec<HowTo>>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    description: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement", default)]
    item_list_element: Vec<HowTo>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    Number(f64),
    String(String),
    Array(Vec<Value>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeValue {
    Minutes(f64),
    Text(String),
}

static ISO_DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^P(?:(\d+)D)?(?:T(?:(\d+(?:\.\d+)?)H)?(?:(\d+)(?:-\d+)?M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("valid ISO 8601 duration regex")
});
static FIRST_INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid integer regex"));
static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid trailing comma regex"));

fn decode_html_symbols(text: &str) -> String {
    // entities are sometimes encoded twice ("&amp;eacute;")
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Minutes in an ISO 8601 duration ("PT1H30M" -> 90). Plain numbers are
/// taken as minutes already.
fn parse_duration_minutes(value: &TimeValue) -> Option<u32> {
    let text = match value {
        TimeValue::Minutes(minutes) if minutes.is_finite() && *minutes >= 0.0 => {
            return Some(minutes.round() as u32)
        }
        TimeValue::Minutes(_) => return None,
        TimeValue::Text(text) => text.trim(),
    };

    if let Ok(minutes) = text.parse::<u32>() {
        return Some(minutes);
    }

    let captures = ISO_DURATION_RE.captures(text)?;
    let number = |i: usize| -> f64 {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let minutes = number(1) * 1440.0 + number(2) * 60.0 + number(3) + number(4) / 60.0;
    Some(minutes.round() as u32)
}

fn parse_yield(value: &RecipeYield) -> Option<u32> {
    match value {
        RecipeYield::Number(n) if n.is_finite() && *n >= 0.0 => Some(n.trunc() as u32),
        RecipeYield::Number(_) => None,
        RecipeYield::String(text) => first_integer(text),
        RecipeYield::Array(values) => values.iter().find_map(|v| match v {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(text) => first_integer(text),
            _ => None,
        }),
    }
}

fn first_integer(text: &str) -> Option<u32> {
    FIRST_INTEGER_RE.find(text)?.as_str().parse().ok()
}

fn first_image(image: &ImageType) -> Option<String> {
    let url = match image {
        ImageType::String(url) => Some(url.as_str()),
        ImageType::Object(object) => Some(object.url.as_str()),
        ImageType::MultipleStrings(urls) => urls.first().map(String::as_str),
        ImageType::MultipleObjects(objects) => objects.first().map(|o| o.url.as_str()),
    }?;
    let url = decode_html_symbols(url.trim());
    (!url.is_empty()).then_some(url)
}

fn howto_texts(howto: HowTo, texts: &mut Vec<String>) {
    match howto {
        HowTo::HowToStep(step) => {
            if let Some(text) = step.text.or(step.description).or(step.name) {
                texts.push(text);
            }
        }
        HowTo::HowToSection(section) => {
            for item in section.item_list_element {
                howto_texts(item, texts);
            }
        }
    }
}

fn instruction_lines(instructions: RecipeInstructions) -> Vec<String> {
    let lines: Vec<String> = match instructions {
        RecipeInstructions::String(text) => decode_html_symbols(&text)
            .lines()
            .map(str::to_string)
            .collect(),
        RecipeInstructions::Multiple(steps) => steps,
        RecipeInstructions::MultipleObject(steps) => steps.into_iter().map(|s| s.text).collect(),
        RecipeInstructions::HowTo(items) => {
            let mut texts = Vec::new();
            for item in items {
                howto_texts(item, &mut texts);
            }
            texts
        }
        RecipeInstructions::NestedSections(sections) => {
            let mut texts = Vec::new();
            for item in sections.into_iter().flatten() {
                howto_texts(item, &mut texts);
            }
            texts
        }
    };
    clean_instruction_lines(lines.iter().map(|line| decode_html_symbols(line)))
}

impl JsonLdRecipe {
    fn into_raw_recipe(self, url: &str) -> RawRecipe {
        let title = self
            .name
            .map(|name| decode_html_symbols(name.trim()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNTITLED_RECIPE.to_string());

        let ingredients = match self.recipe_ingredient {
            Some(RecipeIngredients::Strings(lines)) => lines,
            Some(RecipeIngredients::Single(line)) => vec![line],
            None => Vec::new(),
        }
        .iter()
        .map(|line| decode_html_symbols(line.trim()))
        .filter(|line| !line.is_empty())
        .collect();

        RawRecipe {
            title,
            ingredients,
            instructions: self
                .recipe_instructions
                .map(instruction_lines)
                .unwrap_or_default(),
            total_time: self.total_time.as_ref().and_then(parse_duration_minutes),
            prep_time: self.prep_time.as_ref().and_then(parse_duration_minutes),
            cook_time: self.cook_time.as_ref().and_then(parse_duration_minutes),
            servings: self.recipe_yield.as_ref().and_then(parse_yield),
            image_url: self.image.as_ref().and_then(first_image),
            source_url: url.to_string(),
        }
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| kind.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if is_recipe_type(json_ld) {
        return Some(json_ld);
    }
    let candidates = match json_ld {
        Value::Array(items) => items,
        _ => json_ld.get("@graph")?.as_array()?,
    };
    candidates.iter().find_map(find_recipe)
}

/// Repair the most common defects of hand-written JSON-LD blocks: HTML
/// comment or CDATA wrappers, leading garbage and trailing commas.
fn sanitize_json(json_str: &str) -> String {
    let cleaned = json_str
        .replace("<!--", "")
        .replace("-->", "")
        .replace("<![CDATA[", "")
        .replace("]]>", "");
    let cleaned = cleaned.trim();
    let start = cleaned.find(['{', '[']).unwrap_or(0);
    TRAILING_COMMA_RE
        .replace_all(&cleaned[start..], "$1")
        .into_owned()
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RawRecipe, ImportError> {
        let selector = Selector::parse("script[type='application/ld+json']")
            .map_err(|e| ImportError::ParseError(e.to_string()))?;

        let mut last_error = None;
        for (index, script) in context.document.select(&selector).enumerate() {
            let cleaned_json = sanitize_json(&script.inner_html());
            let json_ld = match serde_json::from_str::<Value>(&cleaned_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: script {} is not JSON: {}", index, e);
                    continue;
                }
            };

            let Some(recipe) = find_recipe(&json_ld) else {
                debug!("JsonLdExtractor: no Recipe in script {}", index);
                continue;
            };

            match JsonLdRecipe::deserialize(recipe) {
                Ok(recipe) => {
                    let raw = recipe.into_raw_recipe(&context.url);
                    debug!(
                        "JsonLdExtractor: '{}' with {} ingredients and {} instructions",
                        raw.title,
                        raw.ingredients.len(),
                        raw.instructions.len()
                    );
                    return Ok(raw);
                }
                Err(e) => {
                    debug!("JsonLdExtractor: invalid Recipe in script {}: {}", index, e);
                    last_error = Some(e.to_string());
                }
            }
        }

        match last_error {
            Some(message) => Err(ImportError::ParseError(message)),
            None => Err(ImportError::NoExtractorMatched),
        }
    }
}
