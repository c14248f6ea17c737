use log::warn;
use regex::{NoExpand, Regex, RegexBuilder};

use super::ingredients::UNITS_PATTERN;
use crate::model::{elides, lowercase_first, Ingredient, Locale};

const QUANTITY_START: &str = r"[\d¼½¾⅓⅔][\d/.,¼½¾⅓⅔]*\s*";

/// Rewrites "200 g de boulgour" inside step text into "le boulgour"-style
/// references, so that quantities only appear in the ingredient list.
///
/// Patterns are compiled once per recipe and ordered longest name first, so
/// "huile d'olive" is erased before "huile" gets a chance to match.
pub struct QuantityEraser {
    rules: Vec<(Regex, String)>,
}

impl QuantityEraser {
    pub fn new<'a>(ingredients: impl IntoIterator<Item = &'a Ingredient>, locale: Locale) -> Self {
        let mut named: Vec<&Ingredient> = ingredients
            .into_iter()
            .filter(|ingredient| !ingredient.name.is_empty())
            .collect();
        named.sort_by_key(|ingredient| std::cmp::Reverse(ingredient.name.chars().count()));

        let rules = named
            .into_iter()
            .filter_map(|ingredient| {
                let pattern = format!(
                    r"{QUANTITY_START}(?:{UNITS_PATTERN})?\s*(?:de\s+|d['’]\s*|of\s+)?{}",
                    regex::escape(&ingredient.name)
                );
                match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                    Ok(regex) => Some((regex, reference(&ingredient.name, locale))),
                    Err(e) => {
                        warn!("Skipping quantity pattern for '{}': {}", ingredient.name, e);
                        None
                    }
                }
            })
            .collect();

        Self { rules }
    }

    pub fn erase(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |text, (regex, replacement)| {
                regex
                    .replace_all(&text, NoExpand(replacement))
                    .into_owned()
            })
    }
}

/// "l'huile", "le sucre" in French; the bare lower-cased name otherwise
fn reference(name: &str, locale: Locale) -> String {
    let name = lowercase_first(name);
    if !locale.is_french() {
        return name;
    }
    if elides(&name) {
        format!("l'{name}")
    } else {
        format!("le {name}")
    }
}
