//! Rendering of step texts and the annotations anchored into them.
//!
//! Positions are counted in characters of the rendered step text, never in
//! bytes, and are only valid for the text they were computed against.

use std::sync::Arc;

use crate::model::{
    Ingredient, IngredientMention, Locale, ParameterAnnotation, Position, SpeedMode, Step,
    TempMode,
};

pub const TEMPERATURE_UNIT: &str = "C";
pub const STEAM_LABEL: &str = "Varoma";
pub const TURBO_LABEL: &str = "Turbo";

impl Step {
    /// "5 min/100°C/vitesse 1", or `None` when the step has no parameter
    pub fn parameter_text(&self, locale: Locale) -> Option<String> {
        let mut details = Vec::new();

        if let Some(seconds) = self.duration_seconds.filter(|s| *s > 0) {
            details.push(format_duration(seconds));
        }

        match self.temperature {
            Some(TempMode::Steam) => details.push(STEAM_LABEL.to_string()),
            Some(TempMode::Numeric(value)) => details.push(format!("{value}°C")),
            None => {}
        }

        match self.speed {
            Some(SpeedMode::Turbo) => details.push(TURBO_LABEL.to_string()),
            Some(SpeedMode::Numeric(speed)) => {
                let label = if locale.is_french() { "vitesse" } else { "speed" };
                details.push(format!("{label} {speed}"));
            }
            None => {}
        }

        (!details.is_empty()).then(|| details.join("/"))
    }

    /// Description followed by the parameter suffix, as shown in Cookidoo
    pub fn to_text(&self, locale: Locale) -> String {
        match self.parameter_text(locale) {
            Some(parameters) => format!("{} {}", self.description, parameters),
            None => self.description.clone(),
        }
    }
}

fn format_duration(seconds: u32) -> String {
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    match (minutes, seconds) {
        (0, s) => format!("{s} sec"),
        (m, 0) => format!("{m} min"),
        (m, s) => format!("{m} min {s} sec"),
    }
}

/// Annotation covering the parameter suffix of the rendered step text
pub fn build_parameter_annotation(step: &Step, locale: Locale) -> Option<ParameterAnnotation> {
    let suffix = step.parameter_text(locale)?;

    let speed = step.speed.map(|speed| match speed {
        SpeedMode::Turbo => TURBO_LABEL.to_string(),
        SpeedMode::Numeric(n) => n.to_string(),
    });
    let temperature_value = step.temperature.map(|temperature| match temperature {
        TempMode::Steam => "varoma".to_string(),
        TempMode::Numeric(n) => n.to_string(),
    });

    Some(ParameterAnnotation {
        position: Position {
            offset: step.description.chars().count() + 1,
            length: suffix.chars().count(),
        },
        speed,
        time: step.duration_seconds.filter(|s| *s > 0),
        temperature_value,
        temperature_unit: TEMPERATURE_UNIT.to_string(),
    })
}

/// First case-insensitive occurrence of each ingredient name in `text`.
///
/// Names are compared char by char against the original text, so offsets
/// stay valid even where lower-casing would change the char count.
pub fn find_ingredient_mentions(
    text: &str,
    ingredients: &[Arc<Ingredient>],
) -> Vec<IngredientMention> {
    let haystack: Vec<char> = text.chars().collect();

    ingredients
        .iter()
        .filter(|ingredient| !ingredient.name.is_empty())
        .filter_map(|ingredient| {
            let needle: Vec<char> = ingredient.name.chars().collect();
            let offset = haystack
                .windows(needle.len())
                .position(|window| same_letters(window, &needle))?;
            Some(IngredientMention {
                position: Position {
                    offset,
                    length: needle.len(),
                },
                ingredient: Arc::clone(ingredient),
            })
        })
        .collect()
}

fn same_letters(window: &[char], needle: &[char]) -> bool {
    window
        .iter()
        .zip(needle)
        .all(|(a, b)| a == b || a.to_lowercase().eq(b.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(description: &str) -> Step {
        Step {
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn ingredient(name: &str) -> Arc<Ingredient> {
        Arc::new(Ingredient {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn slice(text: &str, position: Position) -> String {
        text.chars()
            .skip(position.offset)
            .take(position.length)
            .collect()
    }

    #[test]
    fn test_parameter_text_french() {
        let step = Step {
            duration_seconds: Some(300),
            temperature: Some(TempMode::Numeric(100)),
            speed: Some(SpeedMode::Numeric(1)),
            ..step("Cuire")
        };
        assert_eq!(
            step.parameter_text(Locale::French).as_deref(),
            Some("5 min/100°C/vitesse 1")
        );
        assert_eq!(step.to_text(Locale::French), "Cuire 5 min/100°C/vitesse 1");
    }

    #[test]
    fn test_parameter_text_english() {
        let step = Step {
            duration_seconds: Some(90),
            speed: Some(SpeedMode::Numeric(3)),
            ..step("Mix")
        };
        assert_eq!(step.to_text(Locale::English), "Mix 1 min 30 sec/speed 3");
    }

    #[test]
    fn test_turbo_and_steam_labels() {
        let turbo = Step {
            duration_seconds: Some(15),
            speed: Some(SpeedMode::Turbo),
            ..step("Pulvériser")
        };
        assert_eq!(turbo.parameter_text(Locale::French).as_deref(), Some("15 sec/Turbo"));

        let steam = Step {
            temperature: Some(TempMode::Steam),
            speed: Some(SpeedMode::Numeric(1)),
            ..step("Steam")
        };
        assert_eq!(steam.parameter_text(Locale::English).as_deref(), Some("Varoma/speed 1"));
    }

    #[test]
    fn test_no_parameters() {
        let step = step("Servir");
        assert_eq!(step.parameter_text(Locale::French), None);
        assert_eq!(step.to_text(Locale::French), "Servir");
        assert_eq!(build_parameter_annotation(&step, Locale::French), None);
    }

    #[test]
    fn test_parameter_annotation_covers_suffix() {
        let step = Step {
            duration_seconds: Some(600),
            temperature: Some(TempMode::Steam),
            speed: Some(SpeedMode::Numeric(1)),
            ..step("Cuire les légumes à la vapeur")
        };
        let annotation = build_parameter_annotation(&step, Locale::French).unwrap();
        let text = step.to_text(Locale::French);

        assert_eq!(slice(&text, annotation.position), "10 min/Varoma/vitesse 1");
        assert_eq!(
            annotation.position.offset + annotation.position.length,
            text.chars().count()
        );
        assert_eq!(annotation.speed.as_deref(), Some("1"));
        assert_eq!(annotation.time, Some(600));
        assert_eq!(annotation.temperature_value.as_deref(), Some("varoma"));
        assert_eq!(annotation.temperature_unit, "C");
    }

    #[test]
    fn test_turbo_annotation() {
        let step = Step {
            duration_seconds: Some(15),
            speed: Some(SpeedMode::Turbo),
            ..step("Mixer")
        };
        let annotation = build_parameter_annotation(&step, Locale::English).unwrap();
        assert_eq!(annotation.speed.as_deref(), Some("Turbo"));
        assert_eq!(annotation.temperature_value, None);
    }

    #[test]
    fn test_ingredient_mentions_use_char_offsets() {
        let ingredients = vec![ingredient("Échalote"), ingredient("beurre"), ingredient("sel")];
        let text = "Faire fondre le beurre avec l'échalote";
        let mentions = find_ingredient_mentions(text, &ingredients);

        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].ingredient.name, "Échalote");
        assert_eq!(slice(text, mentions[0].position), "échalote");
        assert_eq!(mentions[1].ingredient.name, "beurre");
        assert_eq!(mentions[1].position, Position { offset: 16, length: 6 });
        assert!(Arc::ptr_eq(&mentions[1].ingredient, &ingredients[1]));
    }

    #[test]
    fn test_only_first_occurrence() {
        let ingredients = vec![ingredient("lait")];
        let mentions = find_ingredient_mentions("Verser le lait, puis le lait", &ingredients);
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].position.offset, 10);
    }

    #[test]
    fn test_mentions_after_case_expanding_chars() {
        let ingredients = vec![ingredient("sel")];
        let text = "İİİ ajouter le sel";
        let mentions = find_ingredient_mentions(text, &ingredients);

        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].position, Position { offset: 15, length: 3 });
        assert_eq!(slice(text, mentions[0].position), "sel");
    }

    #[test]
    fn test_name_longer_than_text() {
        let ingredients = vec![ingredient("crème fraîche épaisse")];
        assert!(find_ingredient_mentions("Crème", &ingredients).is_empty());
    }
}
