use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use crate::model::RawRecipe;
use crate::ImportError;

mod json_ld;

pub use json_ld::JsonLdExtractor;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<RawRecipe, ImportError>;
}

static STEP_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:étape|etape|step|fase|schritt|paso)\s*\d+\s*[:.>)\-]?\s*$")
        .expect("valid step header regex")
});

/// Bare headers such as "Étape 2" or "Step 3:" carry no instruction
pub fn is_step_header(line: &str) -> bool {
    STEP_HEADER_RE.is_match(line.trim())
}

/// Trim instruction lines, dropping blanks and step headers
pub fn clean_instruction_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty() && !is_step_header(line))
        .collect()
}
