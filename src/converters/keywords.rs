//! Keyword tables mapping cooking vocabulary to Thermomix presets.
//!
//! Every table is an ordered slice: the first keyword found in a step wins,
//! so the order below is part of the behavior. Keywords are stored without
//! accents and lower-cased, ready to be matched against folded text.

/// Parameters adopted when a mixing keyword matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixingPreset {
    pub speed: u32,
    /// Duration in seconds
    pub duration: u32,
    pub reverse: bool,
}

/// Parameters adopted when a cooking keyword matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookingPreset {
    pub speed: u32,
    /// Temperature in °C
    pub temperature: u32,
    pub reverse: bool,
    /// Forces Varoma (steam) mode
    pub steam: bool,
}

const fn mix(speed: u32, duration: u32) -> MixingPreset {
    MixingPreset {
        speed,
        duration,
        reverse: false,
    }
}

const fn mix_reverse(speed: u32, duration: u32) -> MixingPreset {
    MixingPreset {
        speed,
        duration,
        reverse: true,
    }
}

const fn cook(speed: u32, temperature: u32) -> CookingPreset {
    CookingPreset {
        speed,
        temperature,
        reverse: false,
        steam: false,
    }
}

const fn cook_reverse(speed: u32, temperature: u32) -> CookingPreset {
    CookingPreset {
        speed,
        temperature,
        reverse: true,
        steam: false,
    }
}

const fn steam(speed: u32, temperature: u32) -> CookingPreset {
    CookingPreset {
        speed,
        temperature,
        reverse: false,
        steam: true,
    }
}

pub const MIXING_KEYWORDS: &[(&str, MixingPreset)] = &[
    // French
    ("melanger", mix(3, 30)),
    ("mixer", mix(8, 30)),
    ("battre", mix(4, 45)),
    ("fouetter", mix(4, 60)),
    ("petrir", mix(6, 120)),
    ("hacher", mix(5, 5)),
    ("emincer", mix(5, 5)),
    ("pulveriser", mix(10, 15)),
    ("broyer", mix(10, 30)),
    ("raper", mix(5, 10)),
    ("concasser", mix(5, 10)),
    ("incorporer", mix_reverse(3, 30)),
    ("remuer", mix_reverse(1, 60)),
    ("touiller", mix_reverse(1, 30)),
    // English
    ("mix", mix(3, 30)),
    ("blend", mix(8, 30)),
    ("beat", mix(4, 45)),
    ("whisk", mix(4, 60)),
    ("whip", mix(4, 60)),
    ("knead", mix(6, 120)),
    ("chop", mix(5, 5)),
    ("dice", mix(5, 5)),
    ("slice", mix(5, 5)),
    ("mince", mix(5, 5)),
    ("grind", mix(10, 30)),
    ("grate", mix(5, 10)),
    ("shred", mix(5, 10)),
    ("crush", mix(5, 10)),
    ("puree", mix(8, 30)),
    ("fold", mix_reverse(3, 30)),
    ("combine", mix(3, 30)),
    ("stir", mix_reverse(1, 60)),
    ("emulsify", mix(4, 30)),
];

pub const COOKING_KEYWORDS: &[(&str, CookingPreset)] = &[
    // French
    ("cuire", cook(1, 100)),
    ("mijoter", cook_reverse(1, 90)),
    ("rissoler", cook(1, 120)),
    ("sauter", cook(1, 120)),
    ("saute", cook(1, 120)),
    ("revenir", cook_reverse(1, 120)),
    ("faire revenir", cook_reverse(1, 120)),
    ("dorer", cook_reverse(1, 120)),
    ("fondre", cook(1, 50)),
    ("faire fondre", cook(1, 50)),
    ("chauffer", cook(2, 90)),
    ("rechauffer", cook(2, 70)),
    ("bouillir", cook(1, 100)),
    ("fremir", cook(1, 90)),
    ("porter a ebullition", cook(1, 100)),
    ("blanchir", cook(1, 100)),
    ("braiser", cook_reverse(1, 100)),
    ("compoter", cook_reverse(1, 90)),
    ("confire", cook_reverse(1, 80)),
    ("carameliser", cook(2, 120)),
    ("vapeur", steam(1, 100)),
    // English
    ("cook", cook(1, 100)),
    ("simmer", cook_reverse(1, 90)),
    ("sear", cook(1, 120)),
    ("fry", cook(1, 120)),
    ("brown", cook_reverse(1, 120)),
    ("melt", cook(1, 50)),
    ("heat", cook(2, 90)),
    ("warm", cook(2, 70)),
    ("reheat", cook(2, 70)),
    ("boil", cook(1, 100)),
    ("bring to a boil", cook(1, 100)),
    ("blanch", cook(1, 100)),
    ("braise", cook_reverse(1, 100)),
    ("caramelize", cook(2, 120)),
    ("steam", steam(1, 100)),
    ("roast", cook(1, 120)),
    ("reduce", cook(1, 100)),
    ("poach", cook(1, 80)),
    ("scald", cook(1, 90)),
];

pub const TURBO_KEYWORDS: &[&str] = &[
    // French
    "mixer finement",
    "reduire en poudre",
    "glace pilee",
    // English
    "crush ice",
    "grind to powder",
    "finely blend",
];

/// Label of the appliance itself, always the first tool of a recipe
pub const BASE_TOOL: &str = "TM7";

pub const TOOL_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Four",
        &[
            "four",
            "enfourner",
            "oven",
            "bake",
            "baking",
            "prechauffer",
            "preheat",
        ],
    ),
    ("Varoma", &["varoma", "vapeur", "steam", "steaming"]),
    (
        "Fouet papillon",
        &[
            "fouet papillon",
            "butterfly",
            "butterfly whisk",
            "monter en neige",
            "chantilly",
            "creme fouettee",
            "whipped cream",
            "stiff peaks",
            "soft peaks",
        ],
    ),
    (
        "Panier de cuisson",
        &["panier de cuisson", "steaming basket", "steam basket"],
    ),
];

/// First mixing preset whose keyword occurs in `folded`
pub fn find_mixing(folded: &str) -> Option<(&'static str, MixingPreset)> {
    MIXING_KEYWORDS
        .iter()
        .find(|(keyword, _)| folded.contains(keyword))
        .copied()
}

/// First cooking preset whose keyword occurs in `folded`
pub fn find_cooking(folded: &str) -> Option<(&'static str, CookingPreset)> {
    COOKING_KEYWORDS
        .iter()
        .find(|(keyword, _)| folded.contains(keyword))
        .copied()
}

pub fn is_turbo(folded: &str) -> bool {
    TURBO_KEYWORDS.iter().any(|keyword| folded.contains(keyword))
}
