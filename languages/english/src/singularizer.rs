//! Plural to singular conversion with irregular and uncountable tables.

use std::collections::{HashMap, HashSet};

use regex::{Captures, Regex};

const IRREGULAR: &[(&str, &str)] = &[
    // Pronouns
    ("I", "we"),
    ("me", "us"),
    ("he", "they"),
    ("she", "they"),
    ("them", "them"),
    ("myself", "ourselves"),
    ("yourself", "yourselves"),
    ("itself", "themselves"),
    ("herself", "themselves"),
    ("himself", "themselves"),
    ("themself", "themselves"),
    ("is", "are"),
    ("was", "were"),
    ("has", "have"),
    ("this", "these"),
    ("that", "those"),
    // Consonant followed by `o`
    ("echo", "echoes"),
    ("dingo", "dingoes"),
    ("volcano", "volcanoes"),
    ("tornado", "tornadoes"),
    ("torpedo", "torpedoes"),
    // Ends with `us`
    ("genus", "genera"),
    ("viscus", "viscera"),
    // Ends with `ma`
    ("stigma", "stigmata"),
    ("stoma", "stomata"),
    ("dogma", "dogmata"),
    ("lemma", "lemmata"),
    ("schema", "schemata"),
    ("anathema", "anathemata"),
    ("ox", "oxen"),
    ("axe", "axes"),
    ("die", "dice"),
    ("yes", "yeses"),
    ("foot", "feet"),
    ("eave", "eaves"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("quiz", "quizzes"),
    ("human", "humans"),
    ("proof", "proofs"),
    ("carve", "carves"),
    ("valve", "valves"),
    ("looey", "looies"),
    ("thief", "thieves"),
    ("groove", "grooves"),
    ("pickaxe", "pickaxes"),
    ("passerby", "passersby"),
];

/// Applied last to first
const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"s$", ""),
    (r"(ss)$", "$1"),
    (
        r"(wi|kni|(?:after|half|high|low|mid|non|night|[^\w]|^)li)ves$",
        "$1fe",
    ),
    (r"(ar|(?:wo|[ae])l|[eo][ao])ves$", "$1f"),
    (r"ies$", "y"),
    (
        r"(dg|ss|ois|lk|ok|wn|mb|th|ch|ec|oal|is|ck|ix|sser|ts|wb)ies$",
        "$1ie",
    ),
    (
        r"\b(l|(?:neck|cross|hog|aun)?t|coll|faer|food|gen|goon|group|hipp|junk|vegg|(?:pork)?p|charl|calor|cut)ies$",
        "$1ie",
    ),
    (r"\b(mon|smil)ies$", "$1ey"),
    (r"\b((?:tit)?m|l)ice$", "$1ouse"),
    (r"(seraph|cherub)im$", "$1"),
    (
        r"(x|ch|ss|sh|zz|tto|go|cho|alias|[^aou]us|t[lm]as|gas|(?:her|at|gr)o|[aeiou]ris)(?:es)?$",
        "$1",
    ),
    (
        r"(analy|diagno|parenthe|progno|synop|the|empha|cri|ne)(?:sis|ses)$",
        "$1sis",
    ),
    (r"(movie|twelve|abuse|e[mn]u)s$", "$1"),
    (r"(test)(?:is|es)$", "$1is"),
    (
        r"(alumn|syllab|vir|radi|nucle|fung|cact|stimul|termin|bacill|foc|uter|loc|strat)(?:us|i)$",
        "$1us",
    ),
    (
        r"(agend|addend|millenni|dat|extrem|bacteri|desiderat|strat|candelabr|errat|ov|symposi|curricul|quor)a$",
        "$1um",
    ),
    (
        r"(apheli|hyperbat|periheli|asyndet|noumen|phenomen|criteri|organ|prolegomen|hedr|automat)a$",
        "$1on",
    ),
    (r"(alumn|alg|vertebr)ae$", "$1a"),
    (r"(cod|mur|sil|vert|ind)ices$", "$1ex"),
    (r"(matr|append)ices$", "$1ix"),
    (r"(pe)(rson|ople)$", "$1rson"),
    (r"(child)ren$", "$1"),
    (r"(eau)x?$", "$1"),
    (r"men$", "man"),
];

const UNCOUNTABLE: &[&str] = &[
    "adulthood",
    "advice",
    "agenda",
    "aid",
    "aircraft",
    "alcohol",
    "ammo",
    "analytics",
    "anime",
    "athletics",
    "audio",
    "bison",
    "blood",
    "bream",
    "buffalo",
    "butter",
    "carp",
    "cash",
    "chassis",
    "chess",
    "clothing",
    "cod",
    "commerce",
    "cooperation",
    "corps",
    "debris",
    "diabetes",
    "digestion",
    "elk",
    "energy",
    "equipment",
    "excretion",
    "expertise",
    "firmware",
    "flounder",
    "fun",
    "gallows",
    "garbage",
    "graffiti",
    "hardware",
    "headquarters",
    "health",
    "herpes",
    "highjinks",
    "homework",
    "housework",
    "information",
    "jeans",
    "justice",
    "kudos",
    "labour",
    "literature",
    "machinery",
    "mackerel",
    "mail",
    "media",
    "mews",
    "moose",
    "music",
    "mud",
    "manga",
    "news",
    "only",
    "personnel",
    "pike",
    "plankton",
    "pliers",
    "police",
    "pollution",
    "premises",
    "rain",
    "research",
    "rice",
    "salmon",
    "scissors",
    "series",
    "sewage",
    "shambles",
    "shrimp",
    "software",
    "staff",
    "swine",
    "tennis",
    "traffic",
    "transportation",
    "trout",
    "tuna",
    "wealth",
    "welfare",
    "whiting",
    "wildebeest",
    "wildlife",
    "you",
];

/// Uncountable endings, e.g. "japanese", "reindeer", "smallpox"
const UNCOUNTABLE_PATTERNS: &[&str] = &[
    r"pok[eé]mon$",
    r"[^aeiou]ese$",
    r"deer$",
    r"fish$",
    r"measles$",
    r"o[iu]s$",
    r"pox$",
    r"sheep$",
];

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i){pattern}")).expect("valid pattern"),
            replacement,
        }
    }
}

/// Singular forms of English nouns
pub struct Singularizer {
    rules: Vec<Rule>,
    uncountables: HashSet<&'static str>,
    irregular_singles: HashSet<String>,
    irregular_plurals: HashMap<String, String>,
}

impl Singularizer {
    pub fn new() -> Self {
        let mut irregular_singles = HashSet::new();
        let mut irregular_plurals = HashMap::new();
        for (single, plural) in IRREGULAR {
            irregular_singles.insert(single.to_lowercase());
            irregular_plurals.insert(plural.to_lowercase(), single.to_lowercase());
        }

        // Uncountable patterns come last so they are tried first
        let rules = SINGULAR_RULES
            .iter()
            .map(|&(pattern, replacement)| Rule::new(pattern, replacement))
            .chain(
                UNCOUNTABLE_PATTERNS
                    .iter()
                    .map(|pattern| Rule::new(pattern, "$0")),
            )
            .collect();

        Self {
            rules,
            uncountables: UNCOUNTABLE.iter().copied().collect(),
            irregular_singles,
            irregular_plurals,
        }
    }

    /// Singular of `word`, keeping its letter case
    pub fn singular(&self, word: &str) -> String {
        let token = word.to_lowercase();

        if self.irregular_singles.contains(&token) {
            return restore_case(word, &token);
        }

        if let Some(single) = self.irregular_plurals.get(&token) {
            return restore_case(word, single);
        }

        if token.is_empty() || self.uncountables.contains(token.as_str()) {
            return word.to_string();
        }

        match self.rules.iter().rev().find(|rule| rule.pattern.is_match(word)) {
            Some(rule) => replace(word, rule),
            None => word.to_string(),
        }
    }

    /// Whether `word` is already singular
    pub fn is_singular(&self, word: &str) -> bool {
        let token = word.to_lowercase();
        if self.irregular_singles.contains(&token) {
            return true;
        }
        if self.irregular_plurals.contains_key(&token) {
            return false;
        }
        self.singular(&token) == token
    }
}

impl Default for Singularizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the first match of the rule, carrying the matched text's case over
fn replace(word: &str, rule: &Rule) -> String {
    let Some(caps) = rule.pattern.captures(word) else {
        return word.to_string();
    };
    let Some(whole) = caps.get(0) else {
        return word.to_string();
    };

    let result = interpolate(rule.replacement, &caps);
    let restored = if whole.as_str().is_empty() {
        let previous = word[..whole.start()]
            .chars()
            .last()
            .map(String::from)
            .unwrap_or_default();
        restore_case(&previous, &result)
    } else {
        restore_case(whole.as_str(), &result)
    };

    format!("{}{}{}", &word[..whole.start()], restored, &word[whole.end()..])
}

/// Expand `$N` group references; groups that did not participate become empty
fn interpolate(template: &str, caps: &Captures) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        let mut digits = String::new();
        while digits.len() < 2 {
            match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    digits.push(*d);
                    chars.next();
                }
                _ => break,
            }
        }

        match digits.parse::<usize>() {
            Ok(group) => {
                if let Some(m) = caps.get(group) {
                    out.push_str(m.as_str());
                }
            }
            Err(_) => out.push('$'),
        }
    }

    out
}

/// Give `token` the letter case of `word`
fn restore_case(word: &str, token: &str) -> String {
    if word == token {
        return token.to_string();
    }

    if word == word.to_lowercase() {
        return token.to_lowercase();
    }

    if word == word.to_uppercase() {
        return token.to_uppercase();
    }

    let mut word_chars = word.chars();
    let title_cased = word_chars
        .next()
        .is_some_and(|c| c.to_uppercase().eq(std::iter::once(c)));
    if title_cased {
        let mut chars = token.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        };
    }

    token.to_lowercase()
}
