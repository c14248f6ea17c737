//! Plain-text reports printed by the command line tool

use crate::model::Recipe;
use crate::publish::UploadResult;

const SUMMARY_STEPS: usize = 5;

/// Full converted recipe, as it would appear once published
pub fn format_preview(recipe: &Recipe) -> String {
    let locale = recipe.locale;
    let mut out = format!(
        "{}\n{} servings | {} min\n\nIngredients:\n",
        recipe.name, recipe.servings, recipe.total_time_minutes
    );

    for ingredient in &recipe.ingredients {
        out.push_str(&format!("  • {}\n", ingredient.to_text(locale)));
    }
    out.push_str("\nThermomix steps:\n");
    for (i, step) in recipe.steps.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step.to_text(locale)));
    }
    if !recipe.hints.is_empty() {
        out.push('\n');
        for hint in &recipe.hints {
            out.push_str(&format!("  - {hint}\n"));
        }
    }
    out.push_str(&format!("\nTools: {}", recipe.tools.join(", ")));
    out
}

/// Short confirmation after a successful upload
pub fn format_import_summary(recipe: &Recipe, result: &UploadResult) -> String {
    let locale = recipe.locale;
    let mut out = format!(
        "Recipe imported successfully!\n\n{}\n{} servings\n{} min\n{} ingredients\n\nThermomix steps:\n",
        recipe.name,
        recipe.servings,
        recipe.total_time_minutes,
        recipe.ingredients.len()
    );

    for (i, step) in recipe.steps.iter().take(SUMMARY_STEPS).enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step.to_text(locale)));
    }
    if recipe.steps.len() > SUMMARY_STEPS {
        out.push_str(&format!(
            "  ... and {} more steps\n",
            recipe.steps.len() - SUMMARY_STEPS
        ));
    }
    out.push_str(&format!("\nView on Cookidoo: {}", result.url));
    out
}
