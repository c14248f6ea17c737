//! Conversion of a scraped recipe into a Thermomix recipe.
//!
//! Everything in this module is pure: no I/O, no shared state, and the same
//! input always produces the same [`Recipe`].

pub mod annotations;
pub mod description;
pub mod ingredients;
pub mod keywords;
pub mod normalize;
pub mod parameters;
pub mod quantities;
pub mod tools;

use log::debug;
use std::sync::Arc;

use crate::model::{Ingredient, RawRecipe, Recipe, Step};

pub use annotations::{build_parameter_annotation, find_ingredient_mentions};
pub use description::clean_description;
pub use ingredients::{normalize_quantity, normalize_unit, parse_ingredient, parse_numeric_quantity};
pub use parameters::{extract_parameters, StepParameters};
pub use quantities::QuantityEraser;
pub use tools::detect_tools;

pub use crate::model::Locale;

pub const DEFAULT_SERVINGS: u32 = 4;
pub const DEFAULT_PREP_TIME: u32 = 15;
pub const DEFAULT_TOTAL_TIME: u32 = 45;

/// Convert one instruction line: parameters are read from the raw text,
/// then the text is cleaned. Ingredient references are resolved later by
/// [`convert_recipe`].
pub fn convert_step(step_text: &str, locale: Locale) -> Step {
    let parameters = extract_parameters(step_text);
    let mut step = Step {
        description: clean_description(step_text),
        duration_seconds: parameters.duration_seconds,
        temperature: parameters.temperature,
        speed: parameters.speed,
        reverse: parameters.reverse,
        ..Default::default()
    };
    step.parameter_annotation = build_parameter_annotation(&step, locale);
    step
}

pub fn convert_recipe(raw: &RawRecipe, locale: Locale) -> Recipe {
    let ingredients: Vec<Arc<Ingredient>> = raw
        .ingredients
        .iter()
        .map(|line| Arc::new(parse_ingredient(line)))
        .collect();

    let eraser = QuantityEraser::new(ingredients.iter().map(Arc::as_ref), locale);
    let steps: Vec<Step> = raw
        .instructions
        .iter()
        .map(|line| {
            let mut step = convert_step(line, locale);
            step.description = eraser.erase(&step.description);
            // offsets depend on the final description
            step.parameter_annotation = build_parameter_annotation(&step, locale);
            step.ingredient_mentions = find_ingredient_mentions(&step.to_text(locale), &ingredients);
            step
        })
        .collect();

    let tools = detect_tools(&raw.instructions);
    debug!(
        "Converted '{}': {} ingredients, {} steps, tools {:?}",
        raw.title,
        ingredients.len(),
        steps.len(),
        tools
    );

    let mut hints = Vec::new();
    if !raw.source_url.is_empty() {
        hints.push(format!("Original recipe: {}", raw.source_url));
    }

    Recipe {
        name: raw.title.clone(),
        ingredients,
        steps,
        servings: or_default(raw.servings, DEFAULT_SERVINGS),
        prep_time_minutes: or_default(raw.prep_time, DEFAULT_PREP_TIME),
        cook_time_minutes: raw.cook_time.unwrap_or(0),
        total_time_minutes: or_default(raw.total_time, DEFAULT_TOTAL_TIME),
        hints,
        tools,
        source_url: raw.source_url.clone(),
        locale,
    }
}

/// Scraped zeros mean "unknown"
fn or_default(value: Option<u32>, default: u32) -> u32 {
    value.filter(|v| *v > 0).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SpeedMode, TempMode};

    fn raw_recipe() -> RawRecipe {
        RawRecipe {
            title: "Velouté de potiron".to_string(),
            ingredients: vec![
                "500 g de potiron".to_string(),
                "1 oignon".to_string(),
                "20 g d'huile d'olive".to_string(),
                "Sel".to_string(),
            ],
            instructions: vec![
                "Mixer l'oignon 5 sec/vitesse 5.".to_string(),
                "Ajouter 20 g d'huile d'olive et faire revenir 3 min à 120°C.".to_string(),
                "Ajouter 500 g de potiron et cuire 20 minutes à 100°C.".to_string(),
                "Saler et servir.".to_string(),
            ],
            source_url: "https://example.com/veloute".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_step() {
        let step = convert_step("Mixer l'oignon 5 sec/vitesse 5.", Locale::French);
        assert_eq!(step.description, "Mixer l'oignon");
        assert_eq!(step.duration_seconds, Some(5));
        assert_eq!(step.speed, Some(SpeedMode::Numeric(5)));
        assert_eq!(step.to_text(Locale::French), "Mixer l'oignon 5 sec/vitesse 5");
        assert!(step.parameter_annotation.is_some());
    }

    #[test]
    fn test_convert_recipe() {
        let recipe = convert_recipe(&raw_recipe(), Locale::French);

        assert_eq!(recipe.name, "Velouté de potiron");
        assert_eq!(recipe.ingredients.len(), 4);
        assert_eq!(recipe.steps.len(), 4);
        assert_eq!(recipe.tools, vec!["TM7"]);
        assert_eq!(recipe.hints, vec!["Original recipe: https://example.com/veloute"]);

        let step = &recipe.steps[1];
        assert_eq!(
            step.description,
            "Ajouter l'huile d'olive et faire revenir 3 min à 120°C."
        );
        assert_eq!(step.temperature, Some(TempMode::Numeric(120)));
        assert_eq!(step.duration_seconds, Some(180));
        assert!(step.reverse);

        let mentioned: Vec<&str> = step
            .ingredient_mentions
            .iter()
            .map(|m| m.ingredient.name.as_str())
            .collect();
        assert_eq!(mentioned, vec!["huile d'olive"]);

        let step = &recipe.steps[2];
        assert!(step.description.starts_with("Ajouter le potiron"));
        assert_eq!(step.duration_seconds, Some(1200));
        assert_eq!(step.temperature, Some(TempMode::Numeric(100)));
    }

    #[test]
    fn test_annotations_point_into_rendered_text() {
        let recipe = convert_recipe(&raw_recipe(), Locale::French);
        for step in &recipe.steps {
            let text = step.to_text(Locale::French);
            let length = text.chars().count();
            if let Some(annotation) = &step.parameter_annotation {
                assert!(annotation.position.offset + annotation.position.length <= length);
                assert_eq!(annotation.position.offset + annotation.position.length, length);
            }
            for mention in &step.ingredient_mentions {
                let found: String = text
                    .chars()
                    .skip(mention.position.offset)
                    .take(mention.position.length)
                    .collect();
                assert_eq!(found.to_lowercase(), mention.ingredient.name.to_lowercase());
            }
        }
    }

    #[test]
    fn test_defaults() {
        let recipe = convert_recipe(&raw_recipe(), Locale::French);
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        assert_eq!(recipe.prep_time_minutes, DEFAULT_PREP_TIME);
        assert_eq!(recipe.total_time_minutes, DEFAULT_TOTAL_TIME);
        assert_eq!(recipe.cook_time_minutes, 0);

        let raw = RawRecipe {
            servings: Some(0),
            prep_time: Some(10),
            total_time: Some(0),
            cook_time: Some(25),
            source_url: String::new(),
            ..raw_recipe()
        };
        let recipe = convert_recipe(&raw, Locale::French);
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        assert_eq!(recipe.prep_time_minutes, 10);
        assert_eq!(recipe.total_time_minutes, DEFAULT_TOTAL_TIME);
        assert_eq!(recipe.cook_time_minutes, 25);
        assert!(recipe.hints.is_empty());
    }

    #[test]
    fn test_conversion_is_repeatable() {
        let raw = raw_recipe();
        assert_eq!(
            convert_recipe(&raw, Locale::French),
            convert_recipe(&raw, Locale::French)
        );
    }
}
