use serde::Serialize;

use crate::model::{Recipe, Step};

/// Body of the created-recipe update request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub name: String,
    pub image: Option<String>,
    pub tools: Vec<String>,
    #[serde(rename = "yield")]
    pub recipe_yield: Yield,
    /// Seconds
    pub prep_time: u32,
    /// Seconds
    pub cook_time: u32,
    /// Seconds
    pub total_time: u32,
    pub ingredients: Vec<TextItem>,
    pub instructions: Vec<StepItem>,
    pub hints: String,
    pub work_status: String,
    pub recipe_metadata: RecipeMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Yield {
    pub value: u32,
    pub unit_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub annotations: Vec<Annotation>,
    pub missed_usages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationPosition {
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Annotation {
    Ingredient {
        position: AnnotationPosition,
        data: IngredientData,
    },
    Tts {
        position: AnnotationPosition,
        data: TtsData,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientData {
    pub description: Description,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Description {
    pub text: String,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TtsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Temperature {
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMetadata {
    pub requires_annotations_check: bool,
}

impl From<crate::model::Position> for AnnotationPosition {
    fn from(position: crate::model::Position) -> Self {
        Self {
            offset: position.offset,
            length: position.length,
        }
    }
}

impl Step {
    /// Ingredient mentions first, then the parameter annotation
    pub fn annotations(&self, recipe: &Recipe) -> Vec<Annotation> {
        let mentions = self.ingredient_mentions.iter().map(|mention| Annotation::Ingredient {
            position: mention.position.into(),
            data: IngredientData {
                description: Description {
                    text: mention.ingredient.to_text(recipe.locale),
                    annotations: Vec::new(),
                },
            },
        });

        let parameters = self.parameter_annotation.iter().map(|annotation| Annotation::Tts {
            position: annotation.position.into(),
            data: TtsData {
                speed: annotation.speed.clone(),
                time: annotation.time,
                temperature: annotation.temperature_value.clone().map(|value| Temperature {
                    value,
                    unit: annotation.temperature_unit.clone(),
                }),
            },
        });

        mentions.chain(parameters).collect()
    }
}

impl Recipe {
    pub fn to_payload(&self) -> RecipePayload {
        let locale = self.locale;
        RecipePayload {
            name: self.name.clone(),
            image: None,
            tools: self.tools.clone(),
            recipe_yield: Yield {
                value: self.servings,
                unit_text: if locale.is_french() { "portion" } else { "serving" }.to_string(),
            },
            prep_time: self.prep_time_minutes.saturating_mul(60),
            cook_time: self.cook_time_minutes.saturating_mul(60),
            total_time: self.total_time_minutes.saturating_mul(60),
            ingredients: self
                .ingredients
                .iter()
                .map(|ingredient| TextItem {
                    kind: "INGREDIENT".to_string(),
                    text: ingredient.to_text(locale),
                })
                .collect(),
            instructions: self
                .steps
                .iter()
                .map(|step| StepItem {
                    kind: "STEP".to_string(),
                    text: step.to_text(locale),
                    annotations: step.annotations(self),
                    missed_usages: Vec::new(),
                })
                .collect(),
            hints: self.hints.join("\n"),
            work_status: "PRIVATE".to_string(),
            recipe_metadata: RecipeMetadata {
                requires_annotations_check: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::converters::convert_recipe;
    use crate::model::{Locale, RawRecipe};
    use serde_json::json;

    fn raw() -> RawRecipe {
        RawRecipe {
            title: "Riz au lait".to_string(),
            ingredients: vec!["1 l de lait".to_string(), "100 g de riz".to_string()],
            instructions: vec![
                "Verser 1 l de lait dans le Thermomix et chauffer 10 min à 90°C.".to_string(),
                "Ajouter le riz et mijoter 40 minutes.".to_string(),
            ],
            servings: Some(6),
            cook_time: Some(50),
            source_url: "https://example.com/riz".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_payload_shape() {
        let recipe = convert_recipe(&raw(), Locale::French);
        let payload = serde_json::to_value(recipe.to_payload()).unwrap();

        assert_eq!(payload["name"], "Riz au lait");
        assert_eq!(payload["image"], serde_json::Value::Null);
        assert_eq!(payload["tools"], json!(["TM7"]));
        assert_eq!(payload["yield"], json!({"value": 6, "unitText": "portion"}));
        assert_eq!(payload["prepTime"], 900);
        assert_eq!(payload["cookTime"], 3000);
        assert_eq!(payload["totalTime"], 2700);
        assert_eq!(
            payload["ingredients"],
            json!([
                {"type": "INGREDIENT", "text": "1 l de lait"},
                {"type": "INGREDIENT", "text": "100 g de riz"}
            ])
        );
        assert_eq!(payload["hints"], "Original recipe: https://example.com/riz");
        assert_eq!(payload["workStatus"], "PRIVATE");
        assert_eq!(
            payload["recipeMetadata"],
            json!({"requiresAnnotationsCheck": false})
        );
    }

    #[test]
    fn test_step_annotations() {
        let recipe = convert_recipe(&raw(), Locale::French);
        let payload = serde_json::to_value(recipe.to_payload()).unwrap();
        let step = &payload["instructions"][0];

        assert_eq!(step["type"], "STEP");
        assert_eq!(
            step["text"],
            "Verser le lait dans le bol et chauffer 10 min à 90°C. 10 min/90°C/vitesse 2"
        );
        assert_eq!(step["missedUsages"], json!([]));
        assert_eq!(
            step["annotations"],
            json!([
                {
                    "type": "INGREDIENT",
                    "position": {"offset": 10, "length": 4},
                    "data": {"description": {"text": "1 l de lait", "annotations": []}}
                },
                {
                    "type": "TTS",
                    "position": {"offset": 54, "length": 21},
                    "data": {"speed": "2", "time": 600, "temperature": {"value": "90", "unit": "C"}}
                }
            ])
        );
    }

    #[test]
    fn test_oversized_times_saturate() {
        let raw = RawRecipe {
            prep_time: Some(u32::MAX),
            cook_time: Some(u32::MAX / 30),
            total_time: Some(u32::MAX),
            ..raw()
        };
        let payload = convert_recipe(&raw, Locale::French).to_payload();
        assert_eq!(payload.prep_time, u32::MAX);
        assert_eq!(payload.cook_time, u32::MAX);
        assert_eq!(payload.total_time, u32::MAX);
    }

    #[test]
    fn test_english_yield_unit() {
        let recipe = convert_recipe(&raw(), Locale::English);
        let payload = recipe.to_payload();
        assert_eq!(payload.recipe_yield.unit_text, "serving");
    }
}
