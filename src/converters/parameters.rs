//! Infers Thermomix parameters (speed, temperature, time, reverse) for one step.
//!
//! Resolution order:
//! 1. Turbo phrases short-circuit the keyword tables (15 s pulse).
//! 2. Cooking keywords, then mixing keywords if no speed was resolved.
//! 3. Values written explicitly in the text override the table values field
//!    by field. An explicit temperature is ignored in Varoma mode.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use super::keywords;
use super::normalize::fold;
use crate::model::{SpeedMode, TempMode};

/// Duration of a turbo pulse, in seconds
pub const TURBO_DURATION: u32 = 15;
pub const MIN_TEMPERATURE: u32 = 37;
pub const MAX_TEMPERATURE: u32 = 120;

static TEMPERATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*°\s*[Cc]?").expect("valid temperature regex"));
static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:minutes?|min)").expect("valid minutes regex"));
static SECONDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:secondes?|seconds?|sec|s\b)").expect("valid seconds regex")
});
static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:h(?:eures?|ours?)?)\s*(\d+)?").expect("valid hours regex")
});
static SPEED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:vitesse|speed)\s*([\d.]+)").expect("valid speed regex"));
static VAROMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bvaroma\b").expect("valid varoma regex"));

/// Resolved parameters of one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepParameters {
    pub duration_seconds: Option<u32>,
    pub temperature: Option<TempMode>,
    pub speed: Option<SpeedMode>,
    pub reverse: bool,
}

pub fn extract_parameters(step_text: &str) -> StepParameters {
    let folded = fold(step_text);

    let mut speed = None;
    let mut temperature = None;
    let mut duration = None;
    let mut reverse = false;
    let mut steam = mentions_varoma(step_text);
    let turbo = keywords::is_turbo(&folded);

    if turbo {
        duration = Some(TURBO_DURATION);
    } else {
        if let Some((keyword, preset)) = keywords::find_cooking(&folded) {
            debug!("Cooking keyword '{}' matched: {:?}", keyword, preset);
            speed = Some(preset.speed);
            temperature = Some(preset.temperature);
            reverse = preset.reverse;
            steam |= preset.steam;
        }

        if speed.is_none() {
            if let Some((keyword, preset)) = keywords::find_mixing(&folded) {
                debug!("Mixing keyword '{}' matched: {:?}", keyword, preset);
                speed = Some(preset.speed);
                duration = Some(preset.duration);
                reverse = preset.reverse;
            }
        }
    }

    if !steam {
        if let Some(explicit) = parse_temperature(step_text) {
            temperature = Some(explicit);
        }
    }
    if let Some(explicit) = parse_duration(step_text).filter(|d| *d > 0) {
        duration = Some(explicit);
    }
    if let Some(explicit) = parse_speed(step_text) {
        speed = Some(explicit);
    }

    StepParameters {
        duration_seconds: duration,
        temperature: if steam {
            Some(TempMode::Steam)
        } else {
            temperature.map(TempMode::Numeric)
        },
        speed: if turbo {
            Some(SpeedMode::Turbo)
        } else {
            speed.map(SpeedMode::Numeric)
        },
        reverse,
    }
}

/// Whether the step explicitly asks for Varoma temperature
pub fn mentions_varoma(text: &str) -> bool {
    VAROMA_RE.is_match(text)
}

/// First "<n>°C" in the text, capped at 120. Below 37 it is not a cooking
/// temperature and yields `None`.
pub fn parse_temperature(text: &str) -> Option<u32> {
    let captures = TEMPERATURE_RE.captures(text)?;
    let value: u64 = captures[1].parse().ok()?;
    if value < u64::from(MIN_TEMPERATURE) {
        return None;
    }
    Some(value.min(u64::from(MAX_TEMPERATURE)) as u32)
}

/// Duration in seconds: minutes, then seconds, then "1h30" forms
pub fn parse_duration(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();

    if let Some(captures) = MINUTES_RE.captures(&lower) {
        return captures[1].parse::<u32>().ok()?.checked_mul(60);
    }

    if let Some(captures) = SECONDS_RE.captures(&lower) {
        return captures[1].parse().ok();
    }

    let captures = HOURS_RE.captures(&lower)?;
    let hours: u32 = captures[1].parse().ok()?;
    let minutes: u32 = match captures.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    hours.checked_mul(60)?.checked_add(minutes)?.checked_mul(60)
}

/// "vitesse 5" / "speed 3.5", rounded half to even and floored at 1
pub fn parse_speed(text: &str) -> Option<u32> {
    let captures = SPEED_RE.captures(text)?;
    let value: f64 = captures[1].parse().ok()?;
    Some(value.round_ties_even().max(1.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixing_keyword_defaults() {
        let params = extract_parameters("Mélanger la farine et le sucre");
        assert_eq!(params.speed, Some(SpeedMode::Numeric(3)));
        assert_eq!(params.duration_seconds, Some(30));
        assert_eq!(params.temperature, None);
        assert!(!params.reverse);
    }

    #[test]
    fn test_reverse_mixing_keyword() {
        let params = extract_parameters("Incorporer délicatement les blancs");
        assert_eq!(params.speed, Some(SpeedMode::Numeric(3)));
        assert!(params.reverse);
    }

    #[test]
    fn test_cooking_keyword_has_priority_over_mixing() {
        let params = extract_parameters("Mélanger puis faire mijoter");
        assert_eq!(params.speed, Some(SpeedMode::Numeric(1)));
        assert_eq!(params.temperature, Some(TempMode::Numeric(90)));
        assert_eq!(params.duration_seconds, None);
        assert!(params.reverse);
    }

    #[test]
    fn test_explicit_values_override_presets() {
        let params = extract_parameters("Cuire à 180°C pendant 10 minutes");
        assert_eq!(params.temperature, Some(TempMode::Numeric(120)));
        assert_eq!(params.duration_seconds, Some(600));
        assert_eq!(params.speed, Some(SpeedMode::Numeric(1)));
    }

    #[test]
    fn test_english_explicit_values() {
        let params = extract_parameters("Cook at 90°C for 3 min, speed 2");
        assert_eq!(params.temperature, Some(TempMode::Numeric(90)));
        assert_eq!(params.duration_seconds, Some(180));
        assert_eq!(params.speed, Some(SpeedMode::Numeric(2)));
    }

    #[test]
    fn test_turbo_short_circuits_tables() {
        let params = extract_parameters("Mixer finement le sucre pour faire du sucre glace");
        assert_eq!(params.speed, Some(SpeedMode::Turbo));
        assert_eq!(params.duration_seconds, Some(TURBO_DURATION));
        assert_eq!(params.temperature, None);
        assert!(!params.reverse);
    }

    #[test]
    fn test_steam_preset_ignores_explicit_temperature() {
        let params = extract_parameters("Steam the broccoli at 100°C for 15 minutes");
        assert_eq!(params.temperature, Some(TempMode::Steam));
        assert_eq!(params.duration_seconds, Some(900));
        assert_eq!(params.speed, Some(SpeedMode::Numeric(1)));
    }

    #[test]
    fn test_varoma_word_sets_steam() {
        let params = extract_parameters("Placer le Varoma et laisser 20 min");
        assert_eq!(params.temperature, Some(TempMode::Steam));
        assert_eq!(params.duration_seconds, Some(1200));
    }

    #[test]
    fn test_no_keyword_no_parameters() {
        let params = extract_parameters("Servir bien frais");
        assert_eq!(params, StepParameters::default());
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature("à 100°C"), Some(100));
        assert_eq!(parse_temperature("à 100 ° c"), Some(100));
        assert_eq!(parse_temperature("four à 200°"), Some(120));
        assert_eq!(parse_temperature("à 20°C"), None);
        assert_eq!(parse_temperature("à 37°C"), Some(37));
        assert_eq!(parse_temperature("100 degrés"), None);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("cuire 30 minutes"), Some(1800));
        assert_eq!(parse_duration("10 min"), Some(600));
        assert_eq!(parse_duration("30 secondes"), Some(30));
        assert_eq!(parse_duration("10 sec"), Some(10));
        assert_eq!(parse_duration("10 s."), Some(10));
        assert_eq!(parse_duration("1h30"), Some(5400));
        assert_eq!(parse_duration("2 heures"), Some(7200));
        assert_eq!(parse_duration("1 hour 15"), Some(4500));
        assert_eq!(parse_duration("sans durée"), None);
    }

    #[test]
    fn test_minutes_win_over_hours() {
        assert_eq!(parse_duration("1 heure et 20 minutes"), Some(1200));
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!(parse_speed("vitesse 5"), Some(5));
        assert_eq!(parse_speed("Speed 3.5"), Some(4));
        assert_eq!(parse_speed("speed 2.5"), Some(2));
        assert_eq!(parse_speed("vitesse 0.5"), Some(1));
        assert_eq!(parse_speed("vitesse 12"), Some(12));
        assert_eq!(parse_speed("vitesse ."), None);
        assert_eq!(parse_speed("rapide"), None);
    }
}
