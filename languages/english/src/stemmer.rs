//! Porter stemmer.

use std::collections::HashMap;

use regex::Regex;

const CONSONANTS: &str = "([^aeiou][^aeiouy]*)";
const VOWELS: &str = "([aeiouy][aeiou]*)";
const VOWEL: &str = "[aeiouy]";

const STEP2_LIST: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_LIST: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &str =
    "al|ance|ence|er|ic|able|ible|ant|ement|ment|ent|ou|ism|ate|iti|ous|ive|ize";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid pattern")
}

fn suffix_alternation(list: &[(&str, &str)]) -> String {
    list.iter()
        .map(|(suffix, _)| *suffix)
        .collect::<Vec<_>>()
        .join("|")
}

/// Compiled Porter rule set
pub struct PorterStemmer {
    gt0: Regex,
    eq1: Regex,
    gt1: Regex,
    vowel_in_stem: Regex,
    consonant_like: Regex,
    sfx_e: Regex,
    sfx_y: Regex,
    sfx_ion: Regex,
    sfx_ed_or_ing: Regex,
    sfx_at_or_bl_or_iz: Regex,
    sfx_eed: Regex,
    sfx_s: Regex,
    sfx_sses_or_ies: Regex,
    step2: Regex,
    step3: Regex,
    step4: Regex,
    step2_list: HashMap<&'static str, &'static str>,
    step3_list: HashMap<&'static str, &'static str>,
}

impl PorterStemmer {
    pub fn new() -> Self {
        Self {
            gt0: compile(&format!("^{CONSONANTS}?{VOWELS}{CONSONANTS}")),
            eq1: compile(&format!("^{CONSONANTS}?{VOWELS}{CONSONANTS}{VOWELS}?$")),
            gt1: compile(&format!("^{CONSONANTS}?({VOWELS}{CONSONANTS}){{2,}}")),
            vowel_in_stem: compile(&format!("^{CONSONANTS}?{VOWEL}")),
            consonant_like: compile(&format!("^{CONSONANTS}{VOWEL}[^aeiouwxy]$")),
            sfx_e: compile(r"^(.+?)e$"),
            sfx_y: compile(r"^(.+?)y$"),
            sfx_ion: compile(r"^(.+?(s|t))(ion)$"),
            sfx_ed_or_ing: compile(r"^(.+?)(ed|ing)$"),
            sfx_at_or_bl_or_iz: compile(r"(at|bl|iz)$"),
            sfx_eed: compile(r"^(.+?)eed$"),
            sfx_s: compile(r"^.+?[^s]s$"),
            sfx_sses_or_ies: compile(r"^.+?(ss|i)es$"),
            step2: compile(&format!("^(.+?)({})$", suffix_alternation(STEP2_LIST))),
            step3: compile(&format!("^(.+?)({})$", suffix_alternation(STEP3_LIST))),
            step4: compile(&format!("^(.+?)({STEP4_SUFFIXES})$")),
            step2_list: STEP2_LIST.iter().copied().collect(),
            step3_list: STEP3_LIST.iter().copied().collect(),
        }
    }

    /// Stem of `word`, lowercased; words shorter than three letters are returned as-is
    pub fn stem(&self, word: &str) -> String {
        let mut value = word.to_lowercase();

        if value.chars().count() < 3 {
            return value;
        }

        // An initial `y` is a consonant
        let initial_y = value.starts_with('y');
        if initial_y {
            value.replace_range(..1, "Y");
        }

        // Step 1a
        if self.sfx_sses_or_ies.is_match(&value) {
            value.pop();
            value.pop();
        } else if self.sfx_s.is_match(&value) {
            value.pop();
        }

        // Step 1b
        if let Some((stem, _)) = stem_and_suffix(&self.sfx_eed, &value) {
            if self.gt0.is_match(&stem) {
                value.pop();
            }
        } else if let Some((stem, _)) = stem_and_suffix(&self.sfx_ed_or_ing, &value)
            .filter(|(stem, _)| self.vowel_in_stem.is_match(stem))
        {
            value = stem;

            if self.sfx_at_or_bl_or_iz.is_match(&value) {
                value.push('e');
            } else if ends_with_double_consonant(&value) {
                value.pop();
            } else if self.consonant_like.is_match(&value) {
                value.push('e');
            }
        }

        // Step 1c
        if let Some((stem, _)) = stem_and_suffix(&self.sfx_y, &value)
            .filter(|(stem, _)| self.vowel_in_stem.is_match(stem))
        {
            value = stem + "i";
        }

        // Step 2
        if let Some((stem, suffix)) = stem_and_suffix(&self.step2, &value) {
            if self.gt0.is_match(&stem) {
                value = stem + self.step2_list[suffix.as_str()];
            }
        }

        // Step 3
        if let Some((stem, suffix)) = stem_and_suffix(&self.step3, &value) {
            if self.gt0.is_match(&stem) {
                value = stem + self.step3_list[suffix.as_str()];
            }
        }

        // Step 4
        if let Some((stem, _)) = stem_and_suffix(&self.step4, &value) {
            if self.gt1.is_match(&stem) {
                value = stem;
            }
        } else if let Some((stem, _)) = stem_and_suffix(&self.sfx_ion, &value) {
            if self.gt1.is_match(&stem) {
                value = stem;
            }
        }

        // Step 5
        if let Some((stem, _)) = stem_and_suffix(&self.sfx_e, &value) {
            if self.gt1.is_match(&stem)
                || (self.eq1.is_match(&stem) && !self.consonant_like.is_match(&stem))
            {
                value = stem;
            }
        }

        if value.ends_with("ll") && self.gt1.is_match(&value) {
            value.pop();
        }

        if initial_y && value.starts_with('Y') {
            value.replace_range(..1, "y");
        }

        value
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

/// First and second capture groups of `pattern` in `value`
fn stem_and_suffix(pattern: &Regex, value: &str) -> Option<(String, String)> {
    pattern.captures(value).map(|caps| {
        let group = |i| caps.get(i).map_or(String::new(), |m| m.as_str().to_string());
        (group(1), group(2))
    })
}

/// Two identical final letters other than `l`, `s`, `z` or a vowel
fn ends_with_double_consonant(value: &str) -> bool {
    let mut chars = value.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(last), Some(prev)) if last == prev => !"aeiouylsz".contains(last),
        _ => false,
    }
}
