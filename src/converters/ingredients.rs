//! Ingredient line parsing.
//!
//! Two layouts are recognized, tried in order:
//! - `Name - quantity [unit]` ("Oignon blanc - 1", "Huile d'olive - 20 grammes")
//! - `quantity [unit] [de|d'|of] name` ("200 g de farine", "1 cup flour")
//!
//! Anything else becomes a bare name without quantity.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::model::Ingredient;

/// Unit words recognized after a quantity. Word units are guarded by a
/// trailing word boundary so that "2 gousses" is not read as "2 g ousses".
pub(crate) const UNITS_PATTERN: &str = concat!(
    r"(?:(?:tablespoons?|tbsp|teaspoons?|tsp|cups?|ounces?|oz|pounds?|lbs?",
    r"|pinch|slices?|leaves?|cloves?|bunch|sprigs?|sticks?|cans?|pieces?",
    r"|kilogrammes?|grammes?|litres?|kg|ml|cl|g",
    r"|cuillères?\s*à\s*\w+|pincées?|sachets?|tranches?|feuilles?|l)\b",
    r"|c\.\s*à\s*(?:soupe|café|s|c)\b\.?)",
);

static NAME_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<name>.+?)\s*[-–]\s*(?P<qty>[\d/.,]+)\s*(?P<unit>{UNITS_PATTERN})?\s*$"
    ))
    .expect("valid name-first ingredient regex")
});

static QUANTITY_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<qty>[\d/.,]+)(?:\s*[-–]\s*(?P<max>[\d/.,]+))?\s*(?P<unit>{UNITS_PATTERN})?\s*(?:de\s+|d['’]|of\s+)?\s*(?P<name>.+)$"
    ))
    .expect("valid quantity-first ingredient regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

const FRACTION_GLYPHS: &[(&str, &str)] = &[
    ("0.25", "¼"),
    ("0.33", "⅓"),
    ("0.5", "½"),
    ("0.66", "⅔"),
    ("0.75", "¾"),
];

const UNIT_ABBREVIATIONS: &[(&str, &str)] = &[
    // French
    ("gramme", "g"),
    ("grammes", "g"),
    ("kilogramme", "kg"),
    ("kilogrammes", "kg"),
    ("litre", "l"),
    ("litres", "l"),
    ("cuillère à soupe", "c. à s."),
    ("cuillères à soupe", "c. à s."),
    ("cuillère à café", "c. à c."),
    ("cuillères à café", "c. à c."),
    ("pincée", "pincée"),
    ("pincées", "pincée"),
    // English
    ("tablespoon", "tbsp"),
    ("tablespoons", "tbsp"),
    ("teaspoon", "tsp"),
    ("teaspoons", "tsp"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    ("pound", "lb"),
    ("pounds", "lb"),
    ("lbs", "lb"),
    ("cup", "cup"),
    ("cups", "cup"),
];

/// Parse a raw ingredient line. Never fails: unrecognized lines become a
/// name-only ingredient.
pub fn parse_ingredient(raw: &str) -> Ingredient {
    let text = raw.trim();

    if let Some(captures) = NAME_FIRST_RE.captures(text) {
        let quantity = &captures["qty"];
        return Ingredient {
            name: captures["name"].trim().to_string(),
            quantity: Some(normalize_quantity(quantity)),
            unit: captures.name("unit").map(|u| normalize_unit(u.as_str())),
            quantity_numeric: parse_numeric_quantity(quantity),
            quantity_max: None,
        };
    }

    if let Some(captures) = QUANTITY_FIRST_RE.captures(text) {
        let quantity = &captures["qty"];
        let max = captures.name("max").map(|m| m.as_str());
        let display = match max {
            Some(max) => format!(
                "{} - {}",
                normalize_quantity(quantity),
                normalize_quantity(max)
            ),
            None => normalize_quantity(quantity),
        };
        return Ingredient {
            name: captures["name"].trim().to_string(),
            quantity: Some(display),
            unit: captures.name("unit").map(|u| normalize_unit(u.as_str())),
            quantity_numeric: parse_numeric_quantity(quantity),
            quantity_max: max.and_then(parse_numeric_quantity),
        };
    }

    debug!("No quantity found in ingredient line '{}'", text);
    Ingredient {
        name: text.to_string(),
        ..Default::default()
    }
}

fn fraction_glyph(decimal: &str) -> Option<&'static str> {
    FRACTION_GLYPHS
        .iter()
        .find(|(d, _)| *d == decimal)
        .map(|(_, glyph)| *glyph)
}

/// Display form of a quantity: "0.75" -> "¾", "1.5" -> "1 ½".
/// Quantities without a matching glyph are returned trimmed but unchanged.
pub fn normalize_quantity(raw: &str) -> String {
    let quantity = raw.trim();

    if let Some(glyph) = fraction_glyph(quantity) {
        return glyph.to_string();
    }

    if let Ok(value) = quantity.replace(',', ".").parse::<f64>() {
        if value.is_finite() {
            let whole = value.trunc();
            let remainder = ((value - whole) * 100.0).round() / 100.0;
            if remainder > 0.0 {
                if let Some(glyph) = fraction_glyph(&remainder.to_string()) {
                    return if whole > 0.0 {
                        format!("{} {glyph}", whole as u64)
                    } else {
                        glyph.to_string()
                    };
                }
            }
        }
    }

    quantity.to_string()
}

/// Numeric value of "200", "1,5" or "3/4". Division by zero and
/// unparseable text yield `None`.
pub fn parse_numeric_quantity(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', ".");
    let cleaned = cleaned.trim();

    let value = if cleaned.contains('/') {
        let mut parts = cleaned.split('/');
        let numerator: f64 = parts.next()?.trim().parse().ok()?;
        let denominator: f64 = parts.next()?.trim().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        numerator / denominator
    } else {
        cleaned.parse().ok()?
    };

    value.is_finite().then_some(value)
}

/// Short canonical form of a unit; unknown units pass through unchanged
pub fn normalize_unit(unit: &str) -> String {
    let key = WHITESPACE_RE.replace_all(unit.trim(), " ").to_lowercase();
    UNIT_ABBREVIATIONS
        .iter()
        .find(|(long, _)| *long == key)
        .map(|(_, short)| short.to_string())
        .unwrap_or_else(|| unit.to_string())
}
