use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("valid description regex")
}

// Old format, in parentheses: "(100°C, speed 1)", "(30 s, vitesse 3)"
static PARENTHESIZED_PARAMS_RE: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"\s*\([^)]*(?:speed|vitesse)\s*[\d.]+[^)]*\)\s*"));

// Inline format: "5 sec/vitesse 5", "2 min/120°C/vitesse 1", "100°C/speed 1"
static INLINE_PARAMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    case_insensitive(
        r"\s*\.?\s*(?:\d+\s*(?:sec|min|s)\s*/\s*)?(?:\d+\s*°C\s*/\s*)?(?:vitesse|speed)\s*[\d.]+\s*\.?\s*",
    )
});

// Inline format without a speed: "10 min/100°C", "20 min/Varoma"
static INLINE_TIME_TEMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    case_insensitive(r"\s*\b\d+\s*(?:sec|min)\s*/\s*(?:\d+\s*°C|varoma)\b\s*\.?\s*")
});

static SPATULA_EN_RE: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"(?:the\s+)?thermomix['’]s\s+spatula"));
static MIXING_BOWL_EN_RE: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"\b(?:in|into)\s+(?:the\s+)?thermomix\b"));
static MIXING_BOWL_FR_RE: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"\b(?:dans|au)\s+(?:le\s+)?thermomix\b"));
static SPATULA_FR_RE: LazyLock<Regex> =
    LazyLock::new(|| case_insensitive(r"\bdu\s+thermomix\b"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static SPACE_BEFORE_PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,])").expect("valid punctuation regex"));
static TRAILING_PERIODS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(?:\s*\.)+$").expect("valid period regex"));

/// Strip parameter phrases already written in a step and neutralize direct
/// references to the appliance. Cleaning clean text is a no-op.
pub fn clean_description(text: &str) -> String {
    let text = PARENTHESIZED_PARAMS_RE.replace_all(text, " ");
    let text = INLINE_PARAMS_RE.replace_all(&text, " ");
    let text = INLINE_TIME_TEMP_RE.replace_all(&text, " ");

    let text = SPATULA_EN_RE.replace_all(&text, "the spatula");
    let text = MIXING_BOWL_EN_RE.replace_all(&text, "in the mixing bowl");
    let text = MIXING_BOWL_FR_RE.replace_all(&text, "dans le bol");
    // "la spatule du Thermomix" -> "la spatule"
    let text = SPATULA_FR_RE.replace_all(&text, "");

    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCTUATION_RE.replace_all(&text, "$1");
    TRAILING_PERIODS_RE.replace(text.trim(), ".").into_owned()
}
